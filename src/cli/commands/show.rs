//! sklog show - Show one skill in detail

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{level_badge, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_machine};
use crate::core::controller::Action;
use crate::core::skill::{Certificate, Skill};
use crate::error::Result;
use crate::utils::{format_minutes, stars};
use crate::views::{CertificateStatus, DecayLevel, DecayWarning, certificate_status, decay_warning};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Skill id, id prefix or name
    pub skill: String,
}

#[derive(Serialize)]
struct CertificateView<'a> {
    #[serde(flatten)]
    certificate: &'a Certificate,
    status: CertificateStatus,
}

#[derive(Serialize)]
struct SkillDetail<'a> {
    skill: &'a Skill,
    decay: Option<DecayWarning>,
    certificates: Vec<CertificateView<'a>>,
}

pub fn run(ctx: &mut AppContext, args: &ShowArgs) -> Result<()> {
    let id = resolve_skill(ctx.controller.skills(), &args.skill)?.id.clone();
    ctx.controller.dispatch(Action::ToggleExpanded(id.clone()))?;

    let now = ctx.controller.store().now();
    let today = ctx.controller.store().clock().today();
    let skill = resolve_skill(ctx.controller.skills(), id.as_str())?;
    let decay = decay_warning(skill, now, &ctx.config.decay);
    let warning_days = ctx.config.decay.cert_expiry_warning_days;
    let certificates: Vec<CertificateView> = skill
        .certificates
        .iter()
        .map(|certificate| CertificateView {
            certificate,
            status: certificate_status(certificate, today, warning_days),
        })
        .collect();

    let detail = SkillDetail {
        skill,
        decay,
        certificates,
    };
    if emit_machine(ctx.output_format, &detail)? {
        return Ok(());
    }

    emit_human(render(&detail));
    Ok(())
}

fn render(detail: &SkillDetail<'_>) -> HumanLayout {
    let skill = detail.skill;
    let mut layout = HumanLayout::new();
    layout.title(&skill.name);
    layout
        .kv("id", skill.id.as_str())
        .kv("level", &level_badge(skill.level).to_string())
        .kv(
            "category",
            if skill.category.is_empty() { "-" } else { skill.category.as_str() },
        )
        .kv(
            "confidence",
            &format!("{} {}", stars(skill.confidence.get()), skill.confidence.label()),
        )
        .kv("practice", &format_minutes(u64::from(skill.practice_time)))
        .kv("created", &skill.created_at.format("%Y-%m-%d %H:%M").to_string())
        .kv("updated", &skill.updated_at.format("%Y-%m-%d %H:%M").to_string());
    if let Some(last) = skill.last_practiced {
        layout.kv("last practiced", &last.format("%Y-%m-%d").to_string());
    }
    if let Some(warning) = &detail.decay {
        let message = match warning.level {
            DecayLevel::Critical => warning.message.red().bold(),
            DecayLevel::High => warning.message.yellow().bold(),
            DecayLevel::Medium => warning.message.yellow(),
        };
        layout.kv("decay", &message.to_string());
    }
    if !skill.notes.is_empty() {
        layout.blank().push_line(skill.notes.clone());
    }

    if !skill.resources.is_empty() {
        layout.blank().section("Resources");
        for (index, resource) in skill.resources.iter().enumerate() {
            layout.push_line(format!(
                "{:>2}. {} {} {}",
                index + 1,
                resource.kind.icon(),
                resource.title.bold(),
                resource.url.dimmed()
            ));
        }
    }

    if !skill.journal.is_empty() {
        layout.blank().section("Journal");
        for (index, entry) in skill.journal.iter().enumerate() {
            layout.push_line(format!(
                "{:>2}. {} {}",
                index + 1,
                entry.date.format("%Y-%m-%d").to_string().dimmed(),
                entry.text
            ));
        }
    }

    if !detail.certificates.is_empty() {
        layout.blank().section("Certificates");
        for (index, view) in detail.certificates.iter().enumerate() {
            let cert = view.certificate;
            let status = match view.status {
                CertificateStatus::NoExpiry => "no expiry".dimmed(),
                CertificateStatus::Valid => "valid".green(),
                CertificateStatus::ExpiringSoon { days_left } => {
                    format!("expires in {days_left} days").yellow()
                }
                CertificateStatus::Expired => "expired".red(),
            };
            layout.push_line(format!(
                "{:>2}. {} ({}) {}",
                index + 1,
                cert.name.bold(),
                cert.issuer,
                status
            ));
        }
    }
    layout
}
