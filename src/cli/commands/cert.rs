//! sklog cert - Record or remove certificates

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{expect_skill, resolve_record, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::store::CertificateInput;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,
}

#[derive(Subcommand, Debug)]
pub enum CertCommand {
    /// Record a certificate
    Add {
        /// Skill id, id prefix or name
        skill: String,

        /// Certificate name
        name: String,

        /// Issuing organization
        #[arg(long)]
        issuer: String,

        /// Issue date (YYYY-MM-DD)
        #[arg(long)]
        issued: Option<NaiveDate>,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,

        /// Verification URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Remove a certificate
    Remove {
        /// Skill id, id prefix or name
        skill: String,

        /// Certificate position (as shown by `sklog show`), id or id prefix
        certificate: String,
    },
}

pub fn run(ctx: &mut AppContext, args: &CertArgs) -> Result<()> {
    match &args.command {
        CertCommand::Add {
            skill,
            name,
            issuer,
            issued,
            expires,
            url,
        } => {
            let id = resolve_skill(ctx.controller.skills(), skill)?.id.clone();
            let input = CertificateInput {
                name: name.clone(),
                issuer: issuer.clone(),
                issue_date: *issued,
                expiry_date: *expires,
                credential_url: url.clone().unwrap_or_default(),
            };
            let outcome = ctx.controller.dispatch(Action::AddCertificate { id, input })?;
            let updated = expect_skill(outcome, skill)?;
            if emit_machine(ctx.output_format, &updated)? {
                return Ok(());
            }
            println!(
                "{} Added certificate {} to {}",
                "✓".green().bold(),
                name.trim().bold(),
                updated.name.cyan()
            );
        }
        CertCommand::Remove { skill, certificate } => {
            let target = resolve_skill(ctx.controller.skills(), skill)?;
            let cert_id = resolve_record(
                target.certificates.iter().map(|c| &c.id),
                certificate,
                "certificate",
            )?;
            let id = target.id.clone();
            let outcome = ctx
                .controller
                .dispatch(Action::RemoveCertificate { id, cert_id })?;
            let updated = expect_skill(outcome, skill)?;
            if emit_machine(ctx.output_format, &updated)? {
                return Ok(());
            }
            println!(
                "{} Removed certificate from {}",
                "✓".green().bold(),
                updated.name.cyan()
            );
        }
    }
    Ok(())
}
