use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A literal text substitution applied to layer filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// How layer filenames are rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRules {
    pub color_tag: String,
    pub color_name: String,
    pub dir_delimiter: char,
    /// Compared case-sensitively, without the leading dot.
    pub extension: String,
    /// Replace every occurrence instead of only the first one.
    pub replace_all: bool,
    pub extra_replacements: Vec<Replacement>,
}

impl RenameRules {
    pub fn color_replacement(&self) -> String {
        format!("@{}", self.color_name)
    }
}

impl Default for RenameRules {
    fn default() -> Self {
        Self {
            color_tag: "@COLOR".to_string(),
            color_name: "Purple".to_string(),
            dir_delimiter: '=',
            extension: "png".to_string(),
            replace_all: false,
            extra_replacements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovePolicy {
    pub create_missing_dirs: bool,
    pub overwrite_existing: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub original_name: String,
    pub substituted_name: String,
    pub destination_subdir: Option<String>,
    pub final_name: String,
}

impl RenamePlan {
    /// Destination relative to the layers directory.
    pub fn relative_destination(&self) -> PathBuf {
        match &self.destination_subdir {
            Some(dir) => PathBuf::from(dir).join(&self.final_name),
            None => PathBuf::from(&self.final_name),
        }
    }

    /// Operator-facing form, e.g. `Arms/Long#1.png`.
    pub fn destination_display(&self) -> String {
        match &self.destination_subdir {
            Some(dir) => format!("{}/{}", dir, self.final_name),
            None => self.final_name.clone(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.destination_subdir.is_none() && self.final_name == self.original_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Moved,
    Unchanged,
    Planned,
    Blocked,
}

impl MoveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveStatus::Moved => "moved",
            MoveStatus::Unchanged => "unchanged",
            MoveStatus::Planned => "planned",
            MoveStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub original: String,
    pub destination: String,
    pub subdir: Option<String>,
    pub status: MoveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub layers_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub scanned: usize,
    pub skipped: usize,
    pub records: Vec<MoveRecord>,
}

impl RunSummary {
    pub fn count(&self, status: MoveStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
