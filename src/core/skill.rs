//! Skill entity and its sub-records.
//!
//! Field names serialize in camelCase so the persisted `skills` document
//! keeps a single schema across versions. Older documents that predate
//! confidence, practice time or the sub-record collections still load;
//! the missing fields take their defaults.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Result, SklogError};

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        // Early documents used numeric (millisecond timestamp) ids.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                #[derive(Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Text(String),
                    Int(i64),
                    Float(f64),
                }
                Ok(match Raw::deserialize(deserializer)? {
                    Raw::Text(value) => Self(value),
                    Raw::Int(value) => Self(value.to_string()),
                    Raw::Float(value) => Self(value.to_string()),
                })
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Skill`], unique across the collection.
    SkillId
);

string_id!(
    /// Identifier of a sub-record, unique within its parent collection.
    RecordId
);

// =============================================================================
// LEVEL
// =============================================================================

/// Three-tier proficiency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Ordinal rank, Beginner = 1.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// Next step on the promotion path. Advanced stays Advanced.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate | Self::Advanced => Self::Advanced,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = SklogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "b" => Ok(Self::Beginner),
            "intermediate" | "i" => Ok(Self::Intermediate),
            "advanced" | "a" => Ok(Self::Advanced),
            other => Err(SklogError::ValidationFailed(format!(
                "unknown level {other:?} (expected beginner|intermediate|advanced)"
            ))),
        }
    }
}

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Self-assessed confidence, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SklogError::ValidationFailed(format!(
                "confidence must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Novice",
            2 => "Beginner",
            3 => "Intermediate",
            4 => "Advanced",
            _ => "Expert",
        }
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(3)
    }
}

// Stored values out of range are clamped instead of failing the whole document.
impl From<i64> for Confidence {
    fn from(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(3))
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

// =============================================================================
// SUB-RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Article,
    Video,
    Course,
    Book,
    Documentation,
    Project,
    #[serde(other)]
    Other,
}

impl ResourceKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Article => "📄",
            Self::Video => "🎥",
            Self::Course => "🎓",
            Self::Book => "📚",
            Self::Documentation => "📖",
            Self::Project => "🔨",
            Self::Other => "🔗",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = SklogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "article" => Ok(Self::Article),
            "video" => Ok(Self::Video),
            "course" => Ok(Self::Course),
            "book" => Ok(Self::Book),
            "documentation" | "docs" => Ok(Self::Documentation),
            "project" => Ok(Self::Project),
            "other" => Ok(Self::Other),
            other => Err(SklogError::ValidationFailed(format!(
                "unknown resource type {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: RecordId,
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: RecordId,
    pub name: String,
    pub issuer: String,
    #[serde(default, deserialize_with = "de_optional_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_optional_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_url: String,
}

/// Accepts `null`, `""`, `YYYY-MM-DD` or a full RFC 3339 instant.
fn de_optional_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(serde::de::Error::custom)
}

// =============================================================================
// SKILL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<DateTime<Utc>>,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub practice_time: u32,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl Skill {
    /// Fresh skill with empty sub-records and every timestamp at `now`.
    #[must_use]
    pub fn new(id: SkillId, input: SkillInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            level: input.level,
            category: input.category.trim().to_string(),
            notes: input.notes.trim().to_string(),
            created_at: now,
            updated_at: now,
            last_used: now,
            last_practiced: None,
            confidence: Confidence::default(),
            practice_time: 0,
            resources: Vec::new(),
            journal: Vec::new(),
            certificates: Vec::new(),
        }
    }
}

/// User-editable fields of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillInput {
    pub name: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl SkillInput {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Fails when the trimmed name is empty.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "skill name")
    }
}

/// One entry of a batch import. Only the name is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportItem {
    pub name: String,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ImportItem {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn into_input(self) -> SkillInput {
        SkillInput {
            name: self.name,
            level: self.level.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// Validation helper: `value` must contain non-whitespace text.
pub fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SklogError::ValidationFailed(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(())
}
