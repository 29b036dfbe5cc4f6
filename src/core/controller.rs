//! Session controller.
//!
//! Owns the record store plus the small pieces of state around it (streak,
//! categories, preferences, what is being edited) and applies [`Action`]s
//! through a single [`Controller::dispatch`] transition. The streak is
//! refreshed at session start and whenever an action changes the number of
//! skills.

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SklogError};
use crate::gap::{self, GapReport};
use crate::storage::KvStore;
use crate::views::{Query, Streak};

use super::categories::CategorySet;
use super::clock::Clock;
use super::settings::Settings;
use super::skill::{
    Certificate, Confidence, ImportItem, JournalEntry, RecordId, Resource, ResourceKind, Skill,
    SkillId, SkillInput,
};
use super::store::{CertificateInput, RecordStore};

/// Interaction state that is not part of the persisted collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Skill whose fields are being edited.
    pub editing: Option<SkillId>,
    /// Skill whose detail panel is open.
    pub expanded: Option<SkillId>,
    pub query: Query,
    pub last_gap: Option<GapReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddSkill(SkillInput),
    RemoveSkill(SkillId),
    StartEdit(SkillId),
    CancelEdit,
    /// Apply fields to the skill in `SessionState::editing`, then stop editing.
    SaveEdit(SkillInput),
    EditSkill { id: SkillId, fields: SkillInput },
    Promote(SkillId),
    SetConfidence { id: SkillId, confidence: Confidence },
    AddPracticeMinutes { id: SkillId, minutes: u32 },
    ImportBatch(Vec<ImportItem>),
    SetResources { id: SkillId, resources: Vec<Resource> },
    SetJournal { id: SkillId, journal: Vec<JournalEntry> },
    SetCertificates { id: SkillId, certificates: Vec<Certificate> },
    AddResource { id: SkillId, title: String, url: String, kind: ResourceKind },
    RemoveResource { id: SkillId, resource_id: RecordId },
    AddJournalEntry { id: SkillId, text: String },
    RemoveJournalEntry { id: SkillId, entry_id: RecordId },
    AddCertificate { id: SkillId, input: CertificateInput },
    RemoveCertificate { id: SkillId, cert_id: RecordId },
    AddCategory(String),
    SetDarkMode(bool),
    SetQuery(Query),
    ToggleExpanded(SkillId),
    AnalyzeGap(String),
    ImportMissingFromGap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Added(Skill),
    Updated(Skill),
    Removed(Skill),
    Imported(Vec<Skill>),
    CategoryAdded { name: String, added: bool },
    Gap(GapReport),
    /// Only session state changed.
    Session,
    /// The action named an unknown id.
    Unchanged,
}

impl Outcome {
    fn from_update(skill: Option<Skill>) -> Self {
        skill.map_or(Self::Unchanged, Self::Updated)
    }
}

pub struct Controller<S: KvStore> {
    store: RecordStore<S>,
    streak: Streak,
    categories: CategorySet,
    settings: Settings,
    state: SessionState,
}

impl<S: KvStore> Controller<S> {
    /// Load every persisted piece from `kv` and start a session.
    pub fn open(kv: S, clock: Box<dyn Clock>, category_defaults: Vec<String>) -> Self {
        let store = RecordStore::load(kv, clock);
        let streak = Streak::load(store.kv());
        let categories = CategorySet::load(store.kv(), category_defaults);
        let settings = Settings::load(store.kv());
        let mut controller = Self {
            store,
            streak,
            categories,
            settings,
            state: SessionState::default(),
        };
        controller.refresh_streak();
        controller
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        self.store.skills()
    }

    #[must_use]
    pub const fn streak(&self) -> &Streak {
        &self.streak
    }

    #[must_use]
    pub const fn categories(&self) -> &CategorySet {
        &self.categories
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Skills matching the current query, in its sort order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Skill> {
        self.state.query.apply(self.store.skills())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let before = self.store.len();
        let outcome = self.apply(action)?;
        if self.store.len() != before {
            self.refresh_streak();
        }
        Ok(outcome)
    }

    fn apply(&mut self, action: Action) -> Result<Outcome> {
        let store = &mut self.store;
        let outcome = match action {
            Action::AddSkill(input) => Outcome::Added(store.add(input)?),
            Action::RemoveSkill(id) => match store.remove(&id) {
                Some(removed) => {
                    if self.state.editing.as_ref() == Some(&id) {
                        self.state.editing = None;
                    }
                    if self.state.expanded.as_ref() == Some(&id) {
                        self.state.expanded = None;
                    }
                    Outcome::Removed(removed)
                }
                None => Outcome::Unchanged,
            },
            Action::StartEdit(id) => {
                if store.get(&id).is_none() {
                    debug!(%id, "edit requested for unknown skill");
                    Outcome::Unchanged
                } else {
                    self.state.editing = Some(id);
                    Outcome::Session
                }
            }
            Action::CancelEdit => {
                self.state.editing = None;
                Outcome::Session
            }
            Action::SaveEdit(fields) => {
                let id = self.state.editing.clone().ok_or_else(|| {
                    SklogError::ValidationFailed("no skill is being edited".to_string())
                })?;
                let outcome = Outcome::from_update(store.edit(&id, fields)?);
                self.state.editing = None;
                outcome
            }
            Action::EditSkill { id, fields } => Outcome::from_update(store.edit(&id, fields)?),
            Action::Promote(id) => Outcome::from_update(store.promote(&id)),
            Action::SetConfidence { id, confidence } => {
                Outcome::from_update(store.set_confidence(&id, confidence))
            }
            Action::AddPracticeMinutes { id, minutes } => {
                Outcome::from_update(store.add_practice_minutes(&id, minutes))
            }
            Action::ImportBatch(items) => Outcome::Imported(store.import_batch(items)),
            Action::SetResources { id, resources } => {
                Outcome::from_update(store.set_resources(&id, resources))
            }
            Action::SetJournal { id, journal } => {
                Outcome::from_update(store.set_journal(&id, journal))
            }
            Action::SetCertificates { id, certificates } => {
                Outcome::from_update(store.set_certificates(&id, certificates))
            }
            Action::AddResource {
                id,
                title,
                url,
                kind,
            } => Outcome::from_update(store.add_resource(&id, &title, &url, kind)?),
            Action::RemoveResource { id, resource_id } => {
                Outcome::from_update(store.remove_resource(&id, &resource_id))
            }
            Action::AddJournalEntry { id, text } => {
                Outcome::from_update(store.add_journal_entry(&id, &text)?)
            }
            Action::RemoveJournalEntry { id, entry_id } => {
                Outcome::from_update(store.remove_journal_entry(&id, &entry_id))
            }
            Action::AddCertificate { id, input } => {
                Outcome::from_update(store.add_certificate(&id, input)?)
            }
            Action::RemoveCertificate { id, cert_id } => {
                Outcome::from_update(store.remove_certificate(&id, &cert_id))
            }
            Action::AddCategory(name) => {
                let (name, added) = self.categories.add(&name)?;
                if added {
                    self.categories.persist(store.kv_mut());
                }
                Outcome::CategoryAdded { name, added }
            }
            Action::SetDarkMode(enabled) => {
                self.settings.dark_mode = enabled;
                self.settings.persist(store.kv_mut());
                Outcome::Session
            }
            Action::SetQuery(query) => {
                self.state.query = query;
                Outcome::Session
            }
            Action::ToggleExpanded(id) => {
                self.state.expanded = if self.state.expanded.as_ref() == Some(&id) {
                    None
                } else {
                    Some(id)
                };
                Outcome::Session
            }
            Action::AnalyzeGap(text) => {
                let names: Vec<&str> = store.skills().iter().map(|s| s.name.as_str()).collect();
                let report = gap::analyze(&text, &names)?;
                self.state.last_gap = Some(report.clone());
                Outcome::Gap(report)
            }
            Action::ImportMissingFromGap => {
                let report = self.state.last_gap.take().ok_or_else(|| {
                    SklogError::ValidationFailed("no gap analysis to import from".to_string())
                })?;
                Outcome::Imported(store.import_batch(report.missing_as_import()))
            }
        };
        debug!(?outcome, "dispatched action");
        Ok(outcome)
    }

    fn refresh_streak(&mut self) {
        let today = self.store.clock().today();
        if self.streak.record_activity(today, !self.store.is_empty()) {
            debug!(count = self.streak.count, "streak updated");
            self.streak.persist(self.store.kv_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::categories::DEFAULT_CATEGORIES;
    use crate::core::clock::FixedClock;
    use crate::core::skill::Level;
    use crate::storage::{MemoryStore, keys};
    use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};

    fn noon(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Local.from_local_datetime(&naive).unwrap().with_timezone(&Utc)
    }

    fn defaults() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()
    }

    fn controller() -> (Controller<MemoryStore>, FixedClock) {
        let clock = FixedClock::new(noon(2025, 3, 1));
        let controller = Controller::open(MemoryStore::new(), Box::new(clock.clone()), defaults());
        (controller, clock)
    }

    fn add(controller: &mut Controller<MemoryStore>, name: &str) -> Skill {
        match controller
            .dispatch(Action::AddSkill(SkillInput::named(name)))
            .unwrap()
        {
            Outcome::Added(skill) => skill,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_streak_consecutive_days() {
        let (mut controller, clock) = controller();
        add(&mut controller, "Rust");
        assert_eq!(controller.streak().count, 1);

        clock.set(noon(2025, 3, 2));
        add(&mut controller, "Go");
        assert_eq!(controller.streak().count, 2);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let (mut controller, clock) = controller();
        add(&mut controller, "Rust");
        clock.set(noon(2025, 3, 3));
        add(&mut controller, "Go");
        assert_eq!(controller.streak().count, 1);
    }

    #[test]
    fn test_streak_not_updated_while_empty_or_unchanged_length() {
        let (mut controller, clock) = controller();
        assert_eq!(controller.streak().count, 0);
        let skill = add(&mut controller, "Rust");
        clock.set(noon(2025, 3, 2));
        controller.dispatch(Action::Promote(skill.id)).unwrap();
        assert_eq!(controller.streak().last_update, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_streak_refreshed_at_session_start() {
        let (mut controller, clock) = controller();
        add(&mut controller, "Rust");
        let kv = controller.store().kv().clone();

        clock.set(noon(2025, 3, 2));
        let reopened = Controller::open(kv, Box::new(clock), defaults());
        assert_eq!(reopened.streak().count, 2);
    }

    #[test]
    fn test_delete_clears_editing() {
        let (mut controller, _) = controller();
        let skill = add(&mut controller, "Rust");
        controller
            .dispatch(Action::StartEdit(skill.id.clone()))
            .unwrap();
        assert_eq!(controller.state().editing, Some(skill.id.clone()));

        controller.dispatch(Action::RemoveSkill(skill.id)).unwrap();
        assert!(controller.state().editing.is_none());
        assert!(controller.skills().is_empty());
    }

    #[test]
    fn test_start_edit_on_removed_skill_is_a_no_op() {
        let (mut controller, _) = controller();
        let kept = add(&mut controller, "Rust");
        let gone = add(&mut controller, "Go");
        controller
            .dispatch(Action::StartEdit(kept.id.clone()))
            .unwrap();
        controller.dispatch(Action::RemoveSkill(gone.id.clone())).unwrap();

        let outcome = controller.dispatch(Action::StartEdit(gone.id)).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(controller.state().editing, Some(kept.id));
    }

    #[test]
    fn test_save_edit_applies_and_stops_editing() {
        let (mut controller, _) = controller();
        let skill = add(&mut controller, "Rust");
        controller
            .dispatch(Action::StartEdit(skill.id.clone()))
            .unwrap();
        let outcome = controller
            .dispatch(Action::SaveEdit(
                SkillInput::named("Rust").with_level(Level::Advanced),
            ))
            .unwrap();
        assert!(matches!(outcome, Outcome::Updated(ref s) if s.level == Level::Advanced));
        assert!(controller.state().editing.is_none());
        assert!(controller.dispatch(Action::SaveEdit(SkillInput::named("x"))).is_err());
    }

    #[test]
    fn test_unknown_id_is_unchanged() {
        let (mut controller, _) = controller();
        let outcome = controller
            .dispatch(Action::Promote(SkillId::from("missing")))
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_gap_then_import_missing() {
        let (mut controller, clock) = controller();
        add(&mut controller, "React");
        clock.advance(Duration::minutes(1));

        let outcome = controller
            .dispatch(Action::AnalyzeGap("React and Docker".to_string()))
            .unwrap();
        let Outcome::Gap(report) = outcome else {
            panic!("expected gap report");
        };
        assert_eq!(report.missing, vec!["Docker".to_string()]);

        let imported = controller.dispatch(Action::ImportMissingFromGap).unwrap();
        let Outcome::Imported(skills) = imported else {
            panic!("expected import");
        };
        assert_eq!(skills[0].name, "Docker");
        assert_eq!(skills[0].notes, gap::GAP_IMPORT_NOTE);
        assert_eq!(controller.skills()[0].name, "Docker");
        assert!(controller.state().last_gap.is_none());
    }

    #[test]
    fn test_add_category_persists_once() {
        let (mut controller, _) = controller();
        let first = controller
            .dispatch(Action::AddCategory(" AI ".to_string()))
            .unwrap();
        assert_eq!(
            first,
            Outcome::CategoryAdded {
                name: "AI".to_string(),
                added: true
            }
        );
        let again = controller
            .dispatch(Action::AddCategory("Frontend".to_string()))
            .unwrap();
        assert!(matches!(again, Outcome::CategoryAdded { added: false, .. }));
        assert_eq!(
            controller.store().kv().get(keys::CUSTOM_CATEGORIES).unwrap().as_deref(),
            Some("[\"AI\"]")
        );
    }

    #[test]
    fn test_dark_mode_persisted() {
        let (mut controller, _) = controller();
        controller.dispatch(Action::SetDarkMode(true)).unwrap();
        assert!(controller.settings().dark_mode);
        assert_eq!(
            controller.store().kv().get(keys::DARK_MODE).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_query_drives_visible() {
        let (mut controller, _) = controller();
        add(&mut controller, "Rust");
        add(&mut controller, "Go");
        controller
            .dispatch(Action::SetQuery(Query {
                search: "ru".to_string(),
                ..Query::default()
            }))
            .unwrap();
        let names: Vec<_> = controller.visible().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_toggle_expanded() {
        let (mut controller, _) = controller();
        let skill = add(&mut controller, "Rust");
        controller
            .dispatch(Action::ToggleExpanded(skill.id.clone()))
            .unwrap();
        assert_eq!(controller.state().expanded, Some(skill.id.clone()));
        controller.dispatch(Action::ToggleExpanded(skill.id)).unwrap();
        assert!(controller.state().expanded.is_none());
    }
}
