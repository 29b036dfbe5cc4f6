//! Recent activity timeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::skill::{Level, Skill, SkillId};

pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub id: SkillId,
    pub name: String,
    pub level: Level,
    pub created_at: DateTime<Utc>,
    pub days_ago: i64,
    pub label: String,
}

/// "Today", "Yesterday" or "N days ago".
#[must_use]
pub fn days_ago_label(days: i64) -> String {
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}

/// Most recently created skills, newest first.
#[must_use]
pub fn recent(skills: &[Skill], now: DateTime<Utc>, limit: usize) -> Vec<TimelineEntry> {
    let mut ordered: Vec<&Skill> = skills.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered
        .into_iter()
        .take(limit)
        .map(|skill| {
            let days_ago = (now - skill.created_at).num_days();
            TimelineEntry {
                id: skill.id.clone(),
                name: skill.name.clone(),
                level: skill.level,
                created_at: skill.created_at,
                days_ago,
                label: days_ago_label(days_ago),
            }
        })
        .collect()
}
