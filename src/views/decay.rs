//! Practice decay warnings and certificate expiry status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::DecayConfig;
use crate::core::skill::{Certificate, Skill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayLevel {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecayWarning {
    pub level: DecayLevel,
    pub days_since: i64,
    pub message: String,
}

/// Warning for a skill whose last practice is old enough. Skills never
/// practiced get none.
#[must_use]
pub fn decay_warning(skill: &Skill, now: DateTime<Utc>, config: &DecayConfig) -> Option<DecayWarning> {
    let last = skill.last_practiced?;
    let days_since = (now - last).num_days();
    let level = if days_since >= i64::from(config.critical_days) {
        DecayLevel::Critical
    } else if days_since >= i64::from(config.high_days) {
        DecayLevel::High
    } else if days_since >= i64::from(config.medium_days) {
        DecayLevel::Medium
    } else {
        return None;
    };
    let message = match level {
        DecayLevel::Critical => format!("Critical: no practice in {days_since} days"),
        DecayLevel::High => format!("Warning: no practice in {days_since} days"),
        DecayLevel::Medium => format!("Attention: no practice in {days_since} days"),
    };
    Some(DecayWarning {
        level,
        days_since,
        message,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    NoExpiry,
    Valid,
    ExpiringSoon { days_left: i64 },
    Expired,
}

#[must_use]
pub fn certificate_status(cert: &Certificate, today: NaiveDate, warning_days: u32) -> CertificateStatus {
    let Some(expiry) = cert.expiry_date else {
        return CertificateStatus::NoExpiry;
    };
    let days_left = (expiry - today).num_days();
    if days_left < 0 {
        CertificateStatus::Expired
    } else if days_left <= i64::from(warning_days) {
        CertificateStatus::ExpiringSoon { days_left }
    } else {
        CertificateStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::{RecordId, SkillId, SkillInput};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn practiced(days_ago: i64) -> Skill {
        let mut skill = Skill::new(SkillId::from("s"), SkillInput::named("s"), now());
        skill.last_practiced = Some(now() - Duration::days(days_ago));
        skill
    }

    #[test]
    fn test_decay_thresholds() {
        let config = DecayConfig::default();
        assert!(decay_warning(&practiced(29), now(), &config).is_none());
        assert_eq!(
            decay_warning(&practiced(30), now(), &config).unwrap().level,
            DecayLevel::Medium
        );
        assert_eq!(
            decay_warning(&practiced(60), now(), &config).unwrap().level,
            DecayLevel::High
        );
        assert_eq!(
            decay_warning(&practiced(120), now(), &config).unwrap().level,
            DecayLevel::Critical
        );
    }

    #[test]
    fn test_never_practiced_has_no_warning() {
        let skill = Skill::new(SkillId::from("s"), SkillInput::named("s"), now() - Duration::days(400));
        assert!(decay_warning(&skill, now(), &DecayConfig::default()).is_none());
    }

    fn cert(expiry: Option<NaiveDate>) -> Certificate {
        Certificate {
            id: RecordId::from("c"),
            name: "CKA".into(),
            issuer: "CNCF".into(),
            issue_date: None,
            expiry_date: expiry,
            credential_url: String::new(),
        }
    }

    #[test]
    fn test_certificate_status() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(certificate_status(&cert(None), today, 90), CertificateStatus::NoExpiry);
        assert_eq!(
            certificate_status(&cert(NaiveDate::from_ymd_opt(2025, 8, 31)), today, 90),
            CertificateStatus::Expired
        );
        assert_eq!(
            certificate_status(&cert(NaiveDate::from_ymd_opt(2025, 9, 1)), today, 90),
            CertificateStatus::ExpiringSoon { days_left: 0 }
        );
        assert_eq!(
            certificate_status(&cert(NaiveDate::from_ymd_opt(2026, 9, 1)), today, 90),
            CertificateStatus::Valid
        );
    }
}
