//! Derived views: stateless projections of the skill collection.

pub mod decay;
pub mod filter;
pub mod heatmap;
pub mod stats;
pub mod streak;
pub mod timeline;

pub use decay::{CertificateStatus, DecayLevel, DecayWarning, certificate_status, decay_warning};
pub use filter::{Query, SortKey};
pub use heatmap::{Heatmap, HeatmapDay};
pub use stats::{CategoryCount, LevelCounts, Summary, category_counts};
pub use streak::Streak;
pub use timeline::{TimelineEntry, days_ago_label, recent};
