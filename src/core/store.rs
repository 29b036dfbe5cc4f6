//! Record store: the ordered skill collection and every mutation on it.
//!
//! The in-memory collection is authoritative. After each successful
//! mutation the whole collection is written to the `skills` key; a failed
//! write is logged and the mutation still stands.
//!
//! Operations on an unknown id are silent no-ops and return `None`.
//! Validation failures return an error and leave the collection untouched.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::{self, KvStore, keys};

use super::clock::Clock;
use super::skill::{
    Certificate, Confidence, ImportItem, JournalEntry, RecordId, Resource, ResourceKind, Skill,
    SkillId, SkillInput, require_text,
};

/// Fields of a certificate supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateInput {
    pub name: String,
    pub issuer: String,
    pub issue_date: Option<chrono::NaiveDate>,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub credential_url: String,
}

pub struct RecordStore<S: KvStore> {
    skills: Vec<Skill>,
    kv: S,
    clock: Box<dyn Clock>,
}

impl<S: KvStore> RecordStore<S> {
    /// Load the collection from `kv`. Missing or malformed content yields an
    /// empty collection; individual malformed entries are skipped.
    pub fn load(kv: S, clock: Box<dyn Clock>) -> Self {
        let raw: Vec<serde_json::Value> = storage::load_json_or_default(&kv, keys::SKILLS);
        let mut skills = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Skill>(value) {
                Ok(mut skill) => {
                    if !seen.insert(skill.id.clone()) {
                        let fresh = fresh_skill_id(&seen);
                        warn!(old = %skill.id, new = %fresh, "duplicate skill id on load, reassigned");
                        seen.insert(fresh.clone());
                        skill.id = fresh;
                    }
                    dedupe_record_ids(&mut skill);
                    skills.push(skill);
                }
                Err(err) => warn!(index, error = %err, "skipping malformed skill entry"),
            }
        }
        debug!(count = skills.len(), "loaded skills");
        Self { skills, kv, clock }
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[must_use]
    pub const fn kv(&self) -> &S {
        &self.kv
    }

    pub const fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    // =========================================================================
    // CORE MUTATIONS
    // =========================================================================

    /// Create a skill and put it at the front of the collection.
    pub fn add(&mut self, input: SkillInput) -> Result<Skill> {
        input.validate()?;
        let id = self.next_skill_id();
        let skill = Skill::new(id, input, self.clock.now());
        debug!(id = %skill.id, name = %skill.name, "adding skill");
        self.skills.insert(0, skill.clone());
        self.persist();
        Ok(skill)
    }

    pub fn remove(&mut self, id: &SkillId) -> Option<Skill> {
        let index = self.skills.iter().position(|skill| &skill.id == id)?;
        let removed = self.skills.remove(index);
        debug!(id = %removed.id, "removed skill");
        self.persist();
        Some(removed)
    }

    /// Replace name, level, category and notes.
    pub fn edit(&mut self, id: &SkillId, fields: SkillInput) -> Result<Option<Skill>> {
        fields.validate()?;
        Ok(self.update(id, |skill, now| {
            skill.name = fields.name.trim().to_string();
            skill.level = fields.level;
            skill.category = fields.category.trim().to_string();
            skill.notes = fields.notes.trim().to_string();
            skill.updated_at = now;
        }))
    }

    /// Advance one level; at Advanced only `updatedAt` changes.
    pub fn promote(&mut self, id: &SkillId) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.level = skill.level.next();
            skill.updated_at = now;
        })
    }

    pub fn set_confidence(&mut self, id: &SkillId, confidence: Confidence) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.confidence = confidence;
            skill.last_practiced = Some(now);
        })
    }

    /// Add practice minutes. The total saturates instead of wrapping.
    pub fn add_practice_minutes(&mut self, id: &SkillId, minutes: u32) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.practice_time = skill.practice_time.saturating_add(minutes);
            skill.last_practiced = Some(now);
        })
    }

    /// Create one skill per item, all sharing a single timestamp, and put
    /// them at the front in input order. Items without a name are skipped.
    pub fn import_batch(&mut self, items: Vec<ImportItem>) -> Vec<Skill> {
        let now = self.clock.now();
        let mut imported = Vec::with_capacity(items.len());
        for item in items {
            let input = item.into_input();
            if let Err(err) = input.validate() {
                warn!(error = %err, "skipping import item");
                continue;
            }
            let id = self.next_skill_id_excluding(&imported);
            let mut skill = Skill::new(id, input, now);
            skill.last_practiced = Some(now);
            imported.push(skill);
        }
        if imported.is_empty() {
            return imported;
        }
        debug!(count = imported.len(), "imported skills");
        self.skills.splice(0..0, imported.iter().cloned());
        self.persist();
        imported
    }

    // =========================================================================
    // SUB-RECORD COLLECTIONS (wholesale replace)
    // =========================================================================

    pub fn set_resources(&mut self, id: &SkillId, resources: Vec<Resource>) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.resources = resources;
            dedupe_ids(&mut skill.resources, |r| &mut r.id);
            skill.last_practiced = Some(now);
        })
    }

    pub fn set_journal(&mut self, id: &SkillId, journal: Vec<JournalEntry>) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.journal = journal;
            dedupe_ids(&mut skill.journal, |e| &mut e.id);
            skill.last_practiced = Some(now);
        })
    }

    pub fn set_certificates(
        &mut self,
        id: &SkillId,
        certificates: Vec<Certificate>,
    ) -> Option<Skill> {
        self.update(id, |skill, now| {
            skill.certificates = certificates;
            dedupe_ids(&mut skill.certificates, |c| &mut c.id);
            skill.last_practiced = Some(now);
        })
    }

    // =========================================================================
    // SUB-RECORD COLLECTIONS (append / remove)
    // =========================================================================

    pub fn add_resource(
        &mut self,
        id: &SkillId,
        title: &str,
        url: &str,
        kind: ResourceKind,
    ) -> Result<Option<Skill>> {
        require_text(title, "resource title")?;
        require_text(url, "resource url")?;
        Ok(self.update(id, |skill, now| {
            let record_id = fresh_record_id(skill.resources.iter().map(|r| &r.id));
            skill.resources.push(Resource {
                id: record_id,
                title: title.trim().to_string(),
                url: url.trim().to_string(),
                kind,
            });
            skill.last_practiced = Some(now);
        }))
    }

    pub fn remove_resource(&mut self, id: &SkillId, resource_id: &RecordId) -> Option<Skill> {
        self.update_if(id, |skill, now| {
            let before = skill.resources.len();
            skill.resources.retain(|r| &r.id != resource_id);
            touch_if_changed(skill, before != skill.resources.len(), now)
        })
    }

    pub fn add_journal_entry(&mut self, id: &SkillId, text: &str) -> Result<Option<Skill>> {
        require_text(text, "journal entry")?;
        Ok(self.update(id, |skill, now| {
            let record_id = fresh_record_id(skill.journal.iter().map(|e| &e.id));
            skill.journal.push(JournalEntry {
                id: record_id,
                date: now,
                text: text.trim().to_string(),
            });
            skill.last_practiced = Some(now);
        }))
    }

    pub fn remove_journal_entry(&mut self, id: &SkillId, entry_id: &RecordId) -> Option<Skill> {
        self.update_if(id, |skill, now| {
            let before = skill.journal.len();
            skill.journal.retain(|e| &e.id != entry_id);
            touch_if_changed(skill, before != skill.journal.len(), now)
        })
    }

    pub fn add_certificate(
        &mut self,
        id: &SkillId,
        input: CertificateInput,
    ) -> Result<Option<Skill>> {
        require_text(&input.name, "certificate name")?;
        require_text(&input.issuer, "certificate issuer")?;
        Ok(self.update(id, |skill, now| {
            let record_id = fresh_record_id(skill.certificates.iter().map(|c| &c.id));
            skill.certificates.push(Certificate {
                id: record_id,
                name: input.name.trim().to_string(),
                issuer: input.issuer.trim().to_string(),
                issue_date: input.issue_date,
                expiry_date: input.expiry_date,
                credential_url: input.credential_url.trim().to_string(),
            });
            skill.last_practiced = Some(now);
        }))
    }

    pub fn remove_certificate(&mut self, id: &SkillId, cert_id: &RecordId) -> Option<Skill> {
        self.update_if(id, |skill, now| {
            let before = skill.certificates.len();
            skill.certificates.retain(|c| &c.id != cert_id);
            touch_if_changed(skill, before != skill.certificates.len(), now)
        })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn update<F>(&mut self, id: &SkillId, apply: F) -> Option<Skill>
    where
        F: FnOnce(&mut Skill, DateTime<Utc>),
    {
        self.update_if(id, |skill, now| {
            apply(skill, now);
            true
        })
    }

    /// Apply `apply` to the matching skill; persist only when it reports a
    /// change. Returns the skill after the call either way.
    fn update_if<F>(&mut self, id: &SkillId, apply: F) -> Option<Skill>
    where
        F: FnOnce(&mut Skill, DateTime<Utc>) -> bool,
    {
        let now = self.clock.now();
        let skill = self.skills.iter_mut().find(|skill| &skill.id == id)?;
        let changed = apply(skill, now);
        let snapshot = skill.clone();
        if changed {
            self.persist();
        }
        Some(snapshot)
    }

    fn persist(&mut self) {
        storage::persist_json(&mut self.kv, keys::SKILLS, &self.skills);
    }

    fn next_skill_id(&self) -> SkillId {
        self.next_skill_id_excluding(&[])
    }

    fn next_skill_id_excluding(&self, pending: &[Skill]) -> SkillId {
        loop {
            let id = SkillId::generate();
            let taken = self
                .skills
                .iter()
                .chain(pending.iter())
                .any(|skill| skill.id == id);
            if !taken {
                return id;
            }
        }
    }
}

fn touch_if_changed(skill: &mut Skill, changed: bool, now: DateTime<Utc>) -> bool {
    if changed {
        skill.last_practiced = Some(now);
    }
    changed
}

fn fresh_skill_id(taken: &HashSet<SkillId>) -> SkillId {
    loop {
        let id = SkillId::generate();
        if !taken.contains(&id) {
            return id;
        }
    }
}

fn fresh_record_id<'a>(existing: impl Iterator<Item = &'a RecordId> + Clone) -> RecordId {
    loop {
        let id = RecordId::generate();
        if !existing.clone().any(|taken| taken == &id) {
            return id;
        }
    }
}

/// Give every repeated id after its first occurrence a fresh one.
fn dedupe_ids<T>(records: &mut [T], id_of: impl Fn(&mut T) -> &mut RecordId) {
    let mut seen: HashSet<RecordId> = HashSet::new();
    let mut repeated = Vec::new();
    for (index, record) in records.iter_mut().enumerate() {
        let id = id_of(record).clone();
        if !seen.insert(id) {
            repeated.push(index);
        }
    }
    for index in repeated {
        let fresh = loop {
            let candidate = RecordId::generate();
            if !seen.contains(&candidate) {
                break candidate;
            }
        };
        seen.insert(fresh.clone());
        *id_of(&mut records[index]) = fresh;
    }
}

fn dedupe_record_ids(skill: &mut Skill) {
    dedupe_ids(&mut skill.resources, |r| &mut r.id);
    dedupe_ids(&mut skill.journal, |e| &mut e.id);
    dedupe_ids(&mut skill.certificates, |c| &mut c.id);
}
