//! Core skill types and logic

pub mod categories;
pub mod clock;
pub mod controller;
pub mod settings;
pub mod skill;
pub mod store;

pub use categories::{CategorySet, DEFAULT_CATEGORIES};
pub use clock::{Clock, FixedClock, SystemClock, local_date};
pub use controller::{Action, Controller, Outcome, SessionState};
pub use settings::Settings;
pub use skill::{
    Certificate, Confidence, ImportItem, JournalEntry, Level, RecordId, Resource, ResourceKind,
    Skill, SkillId, SkillInput,
};
pub use store::{CertificateInput, RecordStore};
