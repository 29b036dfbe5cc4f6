//! Built-in skill templates for common roles.

use serde::Serialize;

use crate::core::skill::Level::{Advanced, Beginner, Intermediate};
use crate::core::skill::{ImportItem, Level};
use crate::error::{Result, SklogError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateSkill {
    pub name: &'static str,
    pub level: Level,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub skills: &'static [TemplateSkill],
}

impl Template {
    #[must_use]
    pub fn import_items(&self) -> Vec<ImportItem> {
        self.skills
            .iter()
            .map(|skill| ImportItem {
                name: skill.name.to_string(),
                level: Some(skill.level),
                category: Some(skill.category.to_string()),
                notes: None,
            })
            .collect()
    }
}

const fn ts(name: &'static str, level: Level, category: &'static str) -> TemplateSkill {
    TemplateSkill {
        name,
        level,
        category,
    }
}

pub static TEMPLATES: [Template; 5] = [
    Template {
        key: "mern",
        name: "MERN Stack Developer",
        skills: &[
            ts("MongoDB", Intermediate, "Database"),
            ts("Express.js", Intermediate, "Backend"),
            ts("React", Advanced, "Frontend"),
            ts("Node.js", Intermediate, "Backend"),
            ts("JavaScript", Advanced, "Frontend"),
            ts("REST API", Intermediate, "Backend"),
        ],
    },
    Template {
        key: "fullstack",
        name: "Full Stack Developer",
        skills: &[
            ts("HTML5", Advanced, "Frontend"),
            ts("CSS3", Advanced, "Frontend"),
            ts("JavaScript", Advanced, "Frontend"),
            ts("React", Advanced, "Frontend"),
            ts("Node.js", Intermediate, "Backend"),
            ts("SQL", Intermediate, "Database"),
            ts("Git", Intermediate, "DevOps"),
            ts("REST API", Intermediate, "Backend"),
        ],
    },
    Template {
        key: "datascience",
        name: "Data Science",
        skills: &[
            ts("Python", Advanced, "Backend"),
            ts("Pandas", Intermediate, "Backend"),
            ts("NumPy", Intermediate, "Backend"),
            ts("Scikit-learn", Intermediate, "Backend"),
            ts("Matplotlib", Beginner, "Backend"),
            ts("SQL", Intermediate, "Database"),
            ts("Jupyter", Intermediate, "Backend"),
        ],
    },
    Template {
        key: "devops",
        name: "DevOps Engineer",
        skills: &[
            ts("Docker", Intermediate, "DevOps"),
            ts("Kubernetes", Beginner, "DevOps"),
            ts("AWS", Intermediate, "Cloud"),
            ts("CI/CD", Intermediate, "DevOps"),
            ts("Linux", Intermediate, "DevOps"),
            ts("Git", Advanced, "DevOps"),
            ts("Terraform", Beginner, "DevOps"),
        ],
    },
    Template {
        key: "mobile",
        name: "Mobile Developer",
        skills: &[
            ts("React Native", Intermediate, "Mobile"),
            ts("JavaScript", Advanced, "Mobile"),
            ts("TypeScript", Intermediate, "Mobile"),
            ts("iOS Development", Beginner, "Mobile"),
            ts("Android Development", Beginner, "Mobile"),
            ts("REST API", Intermediate, "Backend"),
        ],
    },
];

pub fn find(key: &str) -> Result<&'static Template> {
    let wanted = key.trim().to_lowercase();
    TEMPLATES
        .iter()
        .find(|template| template.key == wanted)
        .ok_or_else(|| {
            let known: Vec<_> = TEMPLATES.iter().map(|t| t.key).collect();
            SklogError::ValidationFailed(format!(
                "unknown template {key:?} (expected one of: {})",
                known.join(", ")
            ))
        })
}
