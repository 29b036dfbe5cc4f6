//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;
use colored::{ColoredString, Colorize};

pub mod add;
pub mod category;
pub mod cert;
pub mod challenges;
pub mod confidence;
pub mod delete;
pub mod edit;
pub mod gap;
pub mod heatmap;
pub mod import;
pub mod init;
pub mod journal;
pub mod list;
pub mod practice;
pub mod promote;
pub mod resource;
pub mod settings;
pub mod show;
pub mod stats;
pub mod templates;

use crate::app::AppContext;
use crate::core::controller::{Action, Outcome};
use crate::core::skill::{Level, RecordId, Skill, SkillId};
use crate::error::{Result, SklogError};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .sklog data root in the current directory
    Init(init::InitArgs),

    /// Add a skill
    Add(add::AddArgs),

    /// List skills with optional filters
    List(list::ListArgs),

    /// Show a skill with its resources, journal and certificates
    Show(show::ShowArgs),

    /// Change a skill's name, level, category or notes
    Edit(edit::EditArgs),

    /// Move a skill up one level
    Promote(promote::PromoteArgs),

    /// Delete a skill
    Delete(delete::DeleteArgs),

    /// Manage learning resources of a skill
    Resource(resource::ResourceArgs),

    /// Manage journal entries of a skill
    Journal(journal::JournalArgs),

    /// Manage certificates of a skill
    Cert(cert::CertArgs),

    /// Rate your confidence in a skill (1-5)
    Confidence(confidence::ConfidenceArgs),

    /// Run a focus timer or log practice minutes
    Practice(practice::PracticeArgs),

    /// Import skills from a JSON file or a built-in template
    Import(import::ImportArgs),

    /// List built-in skill templates
    Templates(templates::TemplatesArgs),

    /// Compare a job description against your skills
    Gap(gap::GapArgs),

    /// Show counts, categories, recent activity and streak
    Stats(stats::StatsArgs),

    /// Show the 365-day activity heatmap
    Heatmap(heatmap::HeatmapArgs),

    /// List or add categories
    Category(category::CategoryArgs),

    /// Show or complete today's challenges
    Challenges(challenges::ChallengesArgs),

    /// Show or change preferences
    Settings(settings::SettingsArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &mut AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run_without_context(ctx.output_format, args),
        Commands::Add(args) => add::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Edit(args) => edit::run(ctx, args),
        Commands::Promote(args) => promote::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::Resource(args) => resource::run(ctx, args),
        Commands::Journal(args) => journal::run(ctx, args),
        Commands::Cert(args) => cert::run(ctx, args),
        Commands::Confidence(args) => confidence::run(ctx, args),
        Commands::Practice(args) => practice::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Templates(args) => templates::run(ctx, args),
        Commands::Gap(args) => gap::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Heatmap(args) => heatmap::run(ctx, args),
        Commands::Category(args) => category::run(ctx, args),
        Commands::Challenges(args) => challenges::run(ctx, args),
        Commands::Settings(args) => settings::run(ctx, args),
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Resolve a skill reference: exact id, then case-insensitive exact name,
/// then unique id prefix.
pub fn resolve_skill<'a>(skills: &'a [Skill], reference: &str) -> Result<&'a Skill> {
    let wanted = reference.trim();
    if wanted.is_empty() {
        return Err(SklogError::ValidationFailed(
            "skill reference cannot be empty".to_string(),
        ));
    }

    if let Some(skill) = skills.iter().find(|s| s.id.as_str() == wanted) {
        return Ok(skill);
    }

    let lowered = wanted.to_lowercase();
    let by_name: Vec<&Skill> = skills
        .iter()
        .filter(|s| s.name.to_lowercase() == lowered)
        .collect();
    match by_name.as_slice() {
        [single] => return Ok(*single),
        [] => {}
        many => return Err(ambiguous(wanted, many)),
    }

    let by_prefix: Vec<&Skill> = skills
        .iter()
        .filter(|s| s.id.as_str().starts_with(wanted))
        .collect();
    match by_prefix.as_slice() {
        [single] => Ok(*single),
        [] => Err(SklogError::SkillNotFound(wanted.to_string())),
        many => Err(ambiguous(wanted, many)),
    }
}

fn ambiguous(reference: &str, matches: &[&Skill]) -> SklogError {
    let listed: Vec<String> = matches
        .iter()
        .map(|s| format!("{} ({})", s.name, short_id(s.id.as_str())))
        .collect();
    SklogError::AmbiguousSkill(format!(
        "{reference:?} matches {}; use a longer id prefix",
        listed.join(", ")
    ))
}

/// Id of the referenced skill.
pub fn resolve_skill_id(ctx: &AppContext, reference: &str) -> Result<SkillId> {
    resolve_skill(ctx.controller.skills(), reference).map(|skill| skill.id.clone())
}

/// Resolve a sub-record by 1-based position, exact id or unique id prefix.
pub fn resolve_record<'a, I>(ids: I, reference: &str, kind: &str) -> Result<RecordId>
where
    I: IntoIterator<Item = &'a RecordId>,
{
    let ids: Vec<&RecordId> = ids.into_iter().collect();
    let wanted = reference.trim();
    if let Ok(position) = wanted.parse::<usize>() {
        if let Some(id) = position.checked_sub(1).and_then(|index| ids.get(index)) {
            return Ok((*id).clone());
        }
    }
    if let Some(id) = ids.iter().find(|id| id.as_str() == wanted) {
        return Ok((*id).clone());
    }
    let matches: Vec<&&RecordId> = ids
        .iter()
        .filter(|id| id.as_str().starts_with(wanted))
        .collect();
    match matches.as_slice() {
        [single] => Ok((**single).clone()),
        [] => Err(SklogError::ValidationFailed(format!(
            "no {kind} matching {wanted:?}"
        ))),
        _ => Err(SklogError::ValidationFailed(format!(
            "{kind} reference {wanted:?} is ambiguous"
        ))),
    }
}

/// Skill carried by a mutation outcome; unknown ids surface as not found.
pub fn expect_skill(outcome: Outcome, reference: &str) -> Result<Skill> {
    match outcome {
        Outcome::Added(skill) | Outcome::Updated(skill) | Outcome::Removed(skill) => Ok(skill),
        _ => Err(SklogError::SkillNotFound(reference.to_string())),
    }
}

/// Register a category the user typed that is not known yet.
pub fn ensure_category(ctx: &mut AppContext, category: &str) -> Result<()> {
    let category = category.trim();
    if category.is_empty() || ctx.controller.categories().contains(category) {
        return Ok(());
    }
    tracing::debug!(category, "registering new category");
    ctx.controller
        .dispatch(Action::AddCategory(category.to_string()))?;
    Ok(())
}

/// First eight characters of an id.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(index, _)| &id[..index])
}

#[must_use]
pub fn level_badge(level: Level) -> ColoredString {
    match level {
        Level::Beginner => level.as_str().yellow(),
        Level::Intermediate => level.as_str().blue(),
        Level::Advanced => level.as_str().green(),
    }
}

/// One-line human summary of a skill.
#[must_use]
pub fn skill_line(skill: &Skill) -> String {
    let category = if skill.category.is_empty() {
        String::new()
    } else {
        format!(" [{}]", skill.category)
    };
    format!(
        "{}  {:<28} {:<14}{}",
        short_id(skill.id.as_str()).dimmed(),
        skill.name.bold(),
        level_badge(skill.level),
        category.cyan()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::SkillInput;
    use chrono::Utc;

    fn skill(id: &str, name: &str) -> Skill {
        Skill::new(SkillId::from(id), SkillInput::named(name), Utc::now())
    }

    #[test]
    fn test_resolve_by_id_name_and_prefix() {
        let skills = vec![skill("abc123", "Rust"), skill("abd456", "Go")];
        assert_eq!(resolve_skill(&skills, "abc123").unwrap().name, "Rust");
        assert_eq!(resolve_skill(&skills, "rust").unwrap().name, "Rust");
        assert_eq!(resolve_skill(&skills, "abd").unwrap().name, "Go");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let skills = vec![skill("abc123", "Rust"), skill("abd456", "Go")];
        assert!(matches!(
            resolve_skill(&skills, "ab"),
            Err(SklogError::AmbiguousSkill(_))
        ));
    }

    #[test]
    fn test_resolve_ambiguous_name() {
        let skills = vec![skill("a1", "Rust"), skill("b2", "rust")];
        assert!(matches!(
            resolve_skill(&skills, "RUST"),
            Err(SklogError::AmbiguousSkill(_))
        ));
    }

    #[test]
    fn test_resolve_unknown() {
        let skills = vec![skill("a1", "Rust")];
        assert!(matches!(
            resolve_skill(&skills, "zig"),
            Err(SklogError::SkillNotFound(_))
        ));
        assert!(resolve_skill(&skills, "  ").is_err());
    }

    #[test]
    fn test_resolve_record_by_position_and_prefix() {
        let ids = vec![RecordId::from("r-one"), RecordId::from("q-two")];
        assert_eq!(resolve_record(&ids, "2", "resource").unwrap().as_str(), "q-two");
        assert_eq!(resolve_record(&ids, "r-", "resource").unwrap().as_str(), "r-one");
        assert!(resolve_record(&ids, "9", "resource").is_err());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
