//! 365-day activity heatmap.
//!
//! Each skill contributes one point on the day it was created and one more
//! on the day it was last updated when that is a different day. Days are
//! grouped in runs of seven starting at the window start, not aligned to
//! weekdays.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use itertools::Itertools;
use serde::Serialize;

use crate::core::clock::local_date;
use crate::core::skill::Skill;

pub const WINDOW_DAYS: u64 = 365;
const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
    /// 0 for no activity, then 1, 2, 3, and 4 for four or more.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks: Vec<Vec<HeatmapDay>>,
}

#[must_use]
pub fn activity_level(count: u32) -> u8 {
    u8::try_from(count.min(4)).unwrap_or(4)
}

impl Heatmap {
    #[must_use]
    pub fn build(skills: &[Skill], today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(today);

        let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
        for skill in skills {
            let created = local_date(skill.created_at);
            *counts.entry(created).or_default() += 1;
            let updated = local_date(skill.updated_at);
            if updated != created {
                *counts.entry(updated).or_default() += 1;
            }
        }

        let weeks: Vec<Vec<HeatmapDay>> = start
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| {
                let count = counts.get(&date).copied().unwrap_or(0);
                HeatmapDay {
                    date,
                    count,
                    level: activity_level(count),
                }
            })
            .chunks(7)
            .into_iter()
            .map(|week| week.collect())
            .collect();

        Self {
            start,
            end: today,
            weeks,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &HeatmapDay> {
        self.weeks.iter().flatten()
    }

    #[must_use]
    pub fn active_days(&self) -> usize {
        self.days().filter(|day| day.count > 0).count()
    }

    #[must_use]
    pub fn total_activity(&self) -> u32 {
        self.days().map(|day| day.count).sum()
    }

    /// Text grid: one column per week, one row per position in the week.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rows = vec![String::new(); 7];
        for week in &self.weeks {
            for (row, line) in rows.iter_mut().enumerate() {
                let cell = week
                    .get(row)
                    .map_or(' ', |day| SHADES[usize::from(day.level)]);
                line.push(cell);
            }
        }
        rows.iter()
            .map(|line| line.trim_end().to_string())
            .join("\n")
    }

    #[must_use]
    pub fn legend() -> String {
        format!("less {} more", SHADES.iter().join(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::{SkillId, SkillInput};
    use chrono::{Local, TimeZone, Utc};

    fn local_noon(date: NaiveDate) -> chrono::DateTime<Utc> {
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    fn skill_on(name: &str, created: NaiveDate, updated: NaiveDate) -> Skill {
        let mut skill = Skill::new(SkillId::from(name), SkillInput::named(name), local_noon(created));
        skill.updated_at = local_noon(updated);
        skill
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn test_single_skill_today() {
        let heatmap = Heatmap::build(&[skill_on("Rust", today(), today())], today());
        let days: Vec<_> = heatmap.days().collect();
        assert_eq!(days.len(), 365);
        assert_eq!(days.iter().filter(|d| d.level == 1).count(), 1);
        assert_eq!(days.iter().filter(|d| d.level == 0).count(), 364);
        assert_eq!(days.last().unwrap().date, today());
    }

    #[test]
    fn test_update_on_other_day_counts_twice() {
        let created = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let heatmap = Heatmap::build(&[skill_on("Rust", created, today())], today());
        assert_eq!(heatmap.total_activity(), 2);
        assert_eq!(heatmap.active_days(), 2);
    }

    #[test]
    fn test_levels_cap_at_four() {
        let skills: Vec<_> = (0..6)
            .map(|i| skill_on(&format!("s{i}"), today(), today()))
            .collect();
        let heatmap = Heatmap::build(&skills, today());
        let last = heatmap.days().last().unwrap();
        assert_eq!(last.count, 6);
        assert_eq!(last.level, 4);
    }

    #[test]
    fn test_out_of_window_ignored() {
        let old = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let heatmap = Heatmap::build(&[skill_on("Old", old, old)], today());
        assert_eq!(heatmap.total_activity(), 0);
    }

    #[test]
    fn test_weeks_of_seven_from_start() {
        let heatmap = Heatmap::build(&[], today());
        assert_eq!(heatmap.weeks.len(), 53);
        assert!(heatmap.weeks[..52].iter().all(|w| w.len() == 7));
        assert_eq!(heatmap.weeks[52].len(), 1);
        assert_eq!(heatmap.weeks[0][0].date, heatmap.start);
    }

    #[test]
    fn test_activity_level_buckets() {
        assert_eq!(activity_level(0), 0);
        assert_eq!(activity_level(1), 1);
        assert_eq!(activity_level(3), 3);
        assert_eq!(activity_level(40), 4);
    }

    #[test]
    fn test_render_has_seven_rows() {
        let heatmap = Heatmap::build(&[skill_on("Rust", today(), today())], today());
        let rendered = heatmap.render();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.contains('░'));
    }
}
