//! Daily challenges and accumulated points.
//!
//! A fresh set is drawn from a fixed pool once per calendar day. Completing
//! a challenge awards its points exactly once. State lives under three
//! keys: the drawn challenges, the point total (plain integer text) and the
//! day of the last draw.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SklogError};
use crate::storage::{self, KvStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeTemplate {
    pub id: u32,
    pub text: &'static str,
    pub points: u32,
    pub kind: &'static str,
}

pub const CHALLENGE_POOL: [ChallengeTemplate; 8] = [
    ChallengeTemplate { id: 1, text: "Add a new skill", points: 10, kind: "add-skill" },
    ChallengeTemplate { id: 2, text: "Level up any skill", points: 15, kind: "level-up" },
    ChallengeTemplate { id: 3, text: "Add a journal entry", points: 10, kind: "journal" },
    ChallengeTemplate { id: 4, text: "Add a learning resource", points: 10, kind: "resource" },
    ChallengeTemplate { id: 5, text: "Study for 30 minutes", points: 20, kind: "study-time" },
    ChallengeTemplate { id: 6, text: "Add a certificate", points: 25, kind: "certificate" },
    ChallengeTemplate { id: 7, text: "Update skill confidence rating", points: 5, kind: "confidence" },
    ChallengeTemplate { id: 8, text: "Maintain your streak", points: 15, kind: "streak" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub text: String,
    pub points: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<&ChallengeTemplate> for Challenge {
    fn from(template: &ChallengeTemplate) -> Self {
        Self {
            id: template.id,
            text: template.text.to_string(),
            points: template.points,
            kind: template.kind.to_string(),
            completed: false,
        }
    }
}

/// Result of completing a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub challenge: Challenge,
    /// Points awarded by this call; 0 when it was already completed.
    pub awarded: u32,
    pub total_points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChallengeBoard {
    pub challenges: Vec<Challenge>,
    pub points: u64,
    pub last_reset: Option<NaiveDate>,
}

impl ChallengeBoard {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let challenges = storage::load_json_or_default(store, keys::DAILY_CHALLENGES);
        let points = match store.get(keys::USER_POINTS) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().unwrap_or_else(|err| {
                warn!(value = %raw, error = %err, "malformed point total, using 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "failed to read point total, using 0");
                0
            }
        };
        let last_reset = match store.get(keys::CHALLENGES_LAST_RESET) {
            Ok(Some(raw)) => parse_reset_date(&raw),
            _ => None,
        };
        Self {
            challenges,
            points,
            last_reset,
        }
    }

    /// Draw a new set when the last draw was not `today`. Returns whether a
    /// new set was drawn.
    pub fn refresh<S, R>(&mut self, store: &mut S, today: NaiveDate, count: usize, rng: &mut R) -> bool
    where
        S: KvStore + ?Sized,
        R: Rng + ?Sized,
    {
        if self.last_reset == Some(today) {
            return false;
        }
        let mut pool: Vec<&ChallengeTemplate> = CHALLENGE_POOL.iter().collect();
        pool.shuffle(rng);
        self.challenges = pool.into_iter().take(count).map(Challenge::from).collect();
        self.last_reset = Some(today);
        debug!(count = self.challenges.len(), %today, "drew daily challenges");

        storage::persist_json(store, keys::DAILY_CHALLENGES, &self.challenges);
        if let Err(err) = store.set(keys::CHALLENGES_LAST_RESET, &today.format("%Y-%m-%d").to_string()) {
            warn!(error = %err, "failed to persist challenge reset date");
        }
        true
    }

    /// Complete the challenge at 1-based `position` of today's list.
    pub fn complete<S: KvStore + ?Sized>(&mut self, store: &mut S, position: usize) -> Result<Completion> {
        let len = self.challenges.len();
        let challenge = position
            .checked_sub(1)
            .and_then(|index| self.challenges.get_mut(index))
            .ok_or_else(|| {
                SklogError::ValidationFailed(format!(
                    "no challenge #{position} (today has {len})"
                ))
            })?;

        let awarded = if challenge.completed {
            0
        } else {
            challenge.completed = true;
            challenge.points
        };
        let challenge = challenge.clone();

        if awarded > 0 {
            self.points = self.points.saturating_add(u64::from(awarded));
            storage::persist_json(store, keys::DAILY_CHALLENGES, &self.challenges);
            if let Err(err) = store.set(keys::USER_POINTS, &self.points.to_string()) {
                warn!(error = %err, "failed to persist point total");
            }
        }

        Ok(Completion {
            challenge,
            awarded,
            total_points: self.points,
        })
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.challenges.iter().filter(|c| c.completed).count()
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.challenges.is_empty() && self.completed_count() == self.challenges.len()
    }
}

/// `YYYY-MM-DD`, or the `Mon Mar 03 2025` day form older data used.
fn parse_reset_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%a %b %d %Y"))
        .ok()
}
