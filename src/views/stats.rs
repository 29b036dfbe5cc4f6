//! Aggregate counts over the collection.

use serde::Serialize;

use crate::core::skill::{Level, Skill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelCounts {
    pub total: usize,
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl LevelCounts {
    /// Single pass over the collection.
    #[must_use]
    pub fn from_skills(skills: &[Skill]) -> Self {
        skills.iter().fold(Self::default(), |mut acc, skill| {
            acc.total += 1;
            match skill.level {
                Level::Beginner => acc.beginner += 1,
                Level::Intermediate => acc.intermediate += 1,
                Level::Advanced => acc.advanced += 1,
            }
            acc
        })
    }

    #[must_use]
    pub const fn for_level(&self, level: Level) -> usize {
        match level {
            Level::Beginner => self.beginner,
            Level::Intermediate => self.intermediate,
            Level::Advanced => self.advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Occurrences per non-empty category, in first-seen order.
#[must_use]
pub fn category_counts(skills: &[Skill]) -> Vec<CategoryCount> {
    skills
        .iter()
        .filter(|skill| !skill.category.is_empty())
        .fold(Vec::<CategoryCount>::new(), |mut acc, skill| {
            match acc.iter_mut().find(|entry| entry.category == skill.category) {
                Some(entry) => entry.count += 1,
                None => acc.push(CategoryCount {
                    category: skill.category.clone(),
                    count: 1,
                }),
            }
            acc
        })
}

/// Everything the stats screen shows except the streak and timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub levels: LevelCounts,
    pub categories: Vec<CategoryCount>,
    pub practice_minutes: u64,
    pub certificates: usize,
    pub journal_entries: usize,
    pub resources: usize,
}

impl Summary {
    #[must_use]
    pub fn from_skills(skills: &[Skill]) -> Self {
        Self {
            levels: LevelCounts::from_skills(skills),
            categories: category_counts(skills),
            practice_minutes: skills.iter().map(|s| u64::from(s.practice_time)).sum(),
            certificates: skills.iter().map(|s| s.certificates.len()).sum(),
            journal_entries: skills.iter().map(|s| s.journal.len()).sum(),
            resources: skills.iter().map(|s| s.resources.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::{SkillId, SkillInput};
    use chrono::Utc;

    fn skill(name: &str, level: Level, category: &str) -> Skill {
        Skill::new(
            SkillId::from(name),
            SkillInput::named(name)
                .with_level(level)
                .with_category(category),
            Utc::now(),
        )
    }

    #[test]
    fn test_level_counts() {
        let skills = vec![
            skill("a", Level::Beginner, ""),
            skill("b", Level::Beginner, ""),
            skill("c", Level::Advanced, ""),
        ];
        let counts = LevelCounts::from_skills(&skills);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.for_level(Level::Beginner), 2);
        assert_eq!(counts.intermediate, 0);
        assert_eq!(counts.advanced, 1);
    }

    #[test]
    fn test_category_counts_skip_empty_and_keep_order() {
        let skills = vec![
            skill("a", Level::Beginner, "Backend"),
            skill("b", Level::Beginner, ""),
            skill("c", Level::Beginner, "Frontend"),
            skill("d", Level::Beginner, "Backend"),
        ];
        let counts = category_counts(&skills);
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    category: "Backend".into(),
                    count: 2
                },
                CategoryCount {
                    category: "Frontend".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_summary_totals_practice() {
        let mut a = skill("a", Level::Beginner, "");
        a.practice_time = 50;
        let mut b = skill("b", Level::Beginner, "");
        b.practice_time = 25;
        let summary = Summary::from_skills(&[a, b]);
        assert_eq!(summary.practice_minutes, 75);
        assert_eq!(summary.levels.total, 2);
    }
}
