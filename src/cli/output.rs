use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{Result, SklogError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored text for terminals
    #[default]
    Human,
    /// One pretty-printed JSON document
    Json,
    /// One compact JSON document per line
    Jsonl,
    /// Tab-separated text without colors or headers
    Plain,
}

impl OutputFormat {
    /// Machine format selected by `[robot] format` when `--robot` is given.
    #[must_use]
    pub fn from_robot_config(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "jsonl" => Self::Jsonl,
            _ => Self::Json,
        }
    }

    #[must_use]
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SklogError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub fn emit_json_line<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string(value)
        .map_err(|err| SklogError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// Emit `data` wrapped in a robot envelope when `format` is a machine
/// format. Returns `false` when the caller should render text instead.
pub fn emit_machine<T: Serialize>(format: OutputFormat, data: T) -> Result<bool> {
    match format {
        OutputFormat::Json => emit_json(&robot_ok(data)).map(|()| true),
        OutputFormat::Jsonl => emit_json_line(&robot_ok(data)).map(|()| true),
        OutputFormat::Human | OutputFormat::Plain => Ok(false),
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 16,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.chars().count().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines
            .push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_ok_envelope() {
        let value = serde_json::to_value(robot_ok(serde_json::json!({"count": 2}))).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["count"], 2);
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_robot_format_from_config() {
        assert_eq!(OutputFormat::from_robot_config("jsonl"), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_robot_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_robot_config("toml"), OutputFormat::Json);
    }

    #[test]
    fn test_human_layout_lines() {
        let mut layout = HumanLayout::new();
        layout.section("Skills").bullet("Rust").blank().push_line("done");
        let text = layout.build();
        assert!(text.contains("Skills"));
        assert!(text.contains("- Rust"));
        assert!(text.ends_with("done"));
    }
}
