//! Learning streak: consecutive calendar days with skill activity.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::storage::{self, KvStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(default)]
    pub count: u32,
    #[serde(default, deserialize_with = "de_streak_date")]
    pub last_update: Option<NaiveDate>,
}

impl Streak {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        storage::load_json_or_default(store, keys::LEARNING_STREAK)
    }

    pub fn persist<S: KvStore + ?Sized>(&self, store: &mut S) {
        storage::persist_json(store, keys::LEARNING_STREAK, self);
    }

    /// Record activity on `today`. At most one update per calendar day and
    /// none while the collection is empty. Returns whether the streak
    /// changed.
    pub fn record_activity(&mut self, today: NaiveDate, has_skills: bool) -> bool {
        if !has_skills || self.last_update == Some(today) {
            return false;
        }
        let yesterday = today.checked_sub_days(Days::new(1));
        let consecutive = self.last_update.is_some() && self.last_update == yesterday;
        self.count = if consecutive {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last_update = Some(today);
        true
    }

    /// Streak as seen on `today`: a streak whose last update is older than
    /// yesterday is already broken.
    #[must_use]
    pub fn current(&self, today: NaiveDate) -> u32 {
        match self.last_update {
            Some(last) if last == today || Some(last) == today.checked_sub_days(Days::new(1)) => {
                self.count
            }
            _ => 0,
        }
    }
}

/// Accepts `YYYY-MM-DD` or the `Mon Mar 03 2025` day form; anything else
/// reads as no previous update.
fn de_streak_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%a %b %d %Y"))
            .ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_first_activity_starts_at_one() {
        let mut streak = Streak::default();
        assert!(streak.record_activity(day(1), true));
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_update, Some(day(1)));
    }

    #[test]
    fn test_consecutive_days_increment() {
        let mut streak = Streak::default();
        streak.record_activity(day(1), true);
        streak.record_activity(day(2), true);
        assert_eq!(streak.count, 2);
    }

    #[test]
    fn test_gap_resets() {
        let mut streak = Streak::default();
        streak.record_activity(day(1), true);
        streak.record_activity(day(3), true);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_same_day_updates_once() {
        let mut streak = Streak::default();
        streak.record_activity(day(1), true);
        assert!(!streak.record_activity(day(1), true));
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_empty_collection_never_updates() {
        let mut streak = Streak::default();
        assert!(!streak.record_activity(day(1), false));
        assert_eq!(streak, Streak::default());
    }

    #[test]
    fn test_current_breaks_after_gap() {
        let mut streak = Streak::default();
        streak.record_activity(day(1), true);
        streak.record_activity(day(2), true);
        assert_eq!(streak.current(day(3)), 2);
        assert_eq!(streak.current(day(4)), 0);
    }

    #[test]
    fn test_parses_day_string_form() {
        let streak: Streak =
            serde_json::from_str(r#"{"count": 4, "lastUpdate": "Sat Mar 01 2025"}"#).unwrap();
        assert_eq!(streak.count, 4);
        assert_eq!(streak.last_update, Some(day(1)));
    }

    #[test]
    fn test_null_last_update() {
        let streak: Streak = serde_json::from_str(r#"{"count": 0, "lastUpdate": null}"#).unwrap();
        assert_eq!(streak, Streak::default());
    }

    #[test]
    fn test_serializes_iso_date() {
        let mut streak = Streak::default();
        streak.record_activity(day(5), true);
        let json = serde_json::to_string(&streak).unwrap();
        assert_eq!(json, r#"{"count":1,"lastUpdate":"2025-03-05"}"#);
    }
}
