//! Filtered and sorted projections of the skill collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::skill::{Level, Skill};
use crate::error::{Result, SklogError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Creation time, newest first.
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    /// Level rank ascending, Beginner first.
    Level,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::Oldest,
        Self::NameAsc,
        Self::NameDesc,
        Self::Level,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Level => "level",
        }
    }

    fn compare(self, a: &Skill, b: &Skill) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::Level => a.level.rank().cmp(&b.level.rank()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SklogError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| {
                SklogError::ValidationFailed(format!(
                    "unknown sort key {s:?} (expected newest|oldest|name-asc|name-desc|level)"
                ))
            })
    }
}

/// Case-insensitive first, then exact, so "go" and "Go" have a fixed order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter and sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    pub level: Option<Level>,
    pub search: String,
    pub sort: SortKey,
}

impl Query {
    #[must_use]
    pub fn matches(&self, skill: &Skill) -> bool {
        let level_match = self.level.is_none_or(|level| skill.level == level);
        let needle = self.search.to_lowercase();
        level_match && skill.name.to_lowercase().contains(&needle)
    }

    /// Matching skills in sort order. Ties keep collection order.
    #[must_use]
    pub fn apply<'a>(&self, skills: &'a [Skill]) -> Vec<&'a Skill> {
        let mut selected: Vec<&Skill> = skills.iter().filter(|s| self.matches(s)).collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::{SkillId, SkillInput};
    use chrono::{Duration, TimeZone, Utc};

    fn skill(name: &str, level: Level, minutes_after: i64) -> Skill {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Skill::new(
            SkillId::from(name),
            SkillInput::named(name).with_level(level),
            base + Duration::minutes(minutes_after),
        )
    }

    fn names(skills: &[&Skill]) -> Vec<String> {
        skills.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_name_and_level_sort() {
        let skills = vec![
            skill("B", Level::Beginner, 0),
            skill("A", Level::Advanced, 1),
        ];
        let by_name = Query {
            sort: SortKey::NameAsc,
            ..Query::default()
        };
        assert_eq!(names(&by_name.apply(&skills)), ["A", "B"]);

        let by_level = Query {
            sort: SortKey::Level,
            ..Query::default()
        };
        assert_eq!(names(&by_level.apply(&skills)), ["B", "A"]);
    }

    #[test]
    fn test_created_sorts() {
        let skills = vec![
            skill("old", Level::Beginner, 0),
            skill("new", Level::Beginner, 10),
        ];
        assert_eq!(names(&Query::default().apply(&skills)), ["new", "old"]);
        let oldest = Query {
            sort: SortKey::Oldest,
            ..Query::default()
        };
        assert_eq!(names(&oldest.apply(&skills)), ["old", "new"]);
    }

    #[test]
    fn test_level_sort_is_stable() {
        let skills = vec![
            skill("x", Level::Intermediate, 0),
            skill("y", Level::Beginner, 0),
            skill("z", Level::Intermediate, 0),
            skill("w", Level::Beginner, 0),
        ];
        let query = Query {
            sort: SortKey::Level,
            ..Query::default()
        };
        assert_eq!(names(&query.apply(&skills)), ["y", "w", "x", "z"]);
    }

    #[test]
    fn test_filter_level_and_search() {
        let skills = vec![
            skill("TypeScript", Level::Intermediate, 0),
            skill("JavaScript", Level::Advanced, 1),
            skill("Rust", Level::Intermediate, 2),
        ];
        let query = Query {
            level: Some(Level::Intermediate),
            search: "SCRIPT".into(),
            sort: SortKey::NameAsc,
        };
        assert_eq!(names(&query.apply(&skills)), ["TypeScript"]);
    }

    #[test]
    fn test_name_desc_case_insensitive() {
        let skills = vec![
            skill("alpha", Level::Beginner, 0),
            skill("Beta", Level::Beginner, 1),
        ];
        let query = Query {
            sort: SortKey::NameDesc,
            ..Query::default()
        };
        assert_eq!(names(&query.apply(&skills)), ["Beta", "alpha"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("name_asc".parse::<SortKey>().unwrap(), SortKey::NameAsc);
        assert_eq!("LEVEL".parse::<SortKey>().unwrap(), SortKey::Level);
        assert!("random".parse::<SortKey>().is_err());
    }
}
