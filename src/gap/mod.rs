//! Skill gap analysis
//!
//! Compares a free-text job description against a reference vocabulary and
//! the user's skill names. Matching is a case-insensitive substring test,
//! so short names like "Go" also hit inside longer words; that is accepted
//! in exchange for not needing a tokenizer per technology name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::skill::{ImportItem, Level};
use crate::error::{Result, SklogError};

pub mod vocabulary;

pub use vocabulary::REFERENCE_SKILLS;

pub const GAP_IMPORT_NOTE: &str = "Added from job gap analysis";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GapReport {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub match_percent: u8,
}

impl GapReport {
    /// Import items for every missing skill, ready for a batch import.
    #[must_use]
    pub fn missing_as_import(&self) -> Vec<ImportItem> {
        self.missing
            .iter()
            .map(|name| ImportItem {
                name: name.clone(),
                level: Some(Level::Beginner),
                category: None,
                notes: Some(GAP_IMPORT_NOTE.to_string()),
            })
            .collect()
    }
}

/// Analyze against the built-in vocabulary.
pub fn analyze<S: AsRef<str>>(job_text: &str, user_skill_names: &[S]) -> Result<GapReport> {
    analyze_with(&REFERENCE_SKILLS, job_text, user_skill_names)
}

/// Analyze against a caller-supplied vocabulary. Output keeps vocabulary
/// order.
pub fn analyze_with<V, S>(vocabulary: &[V], job_text: &str, user_skill_names: &[S]) -> Result<GapReport>
where
    V: AsRef<str>,
    S: AsRef<str>,
{
    if job_text.trim().is_empty() {
        return Err(SklogError::ValidationFailed(
            "job description cannot be empty".to_string(),
        ));
    }

    let text = job_text.to_lowercase();
    let owned: HashSet<String> = user_skill_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for skill in vocabulary {
        let skill = skill.as_ref();
        let lowered = skill.to_lowercase();
        if !text.contains(&lowered) {
            continue;
        }
        if owned.contains(&lowered) {
            found.push(skill.to_string());
        } else {
            missing.push(skill.to_string());
        }
    }

    let match_percent = match_percent(found.len(), missing.len());
    Ok(GapReport {
        found,
        missing,
        match_percent,
    })
}

/// round(100 * found / (found + missing)), 0 when nothing matched.
#[must_use]
pub fn match_percent(found: usize, missing: usize) -> u8 {
    let total = found + missing;
    if total == 0 {
        return 0;
    }
    // Integer round-half-up of 100 * found / total.
    let percent = (200 * found + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}
