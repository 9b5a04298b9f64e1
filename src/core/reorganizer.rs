use crate::core::planner;
use crate::domain::model::{
    MovePolicy, MoveRecord, MoveStatus, RenamePlan, RenameRules, RunSummary,
};
use crate::domain::ports::{ConfigProvider, FileSystem};
use crate::utils::error::{LayerError, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::path::PathBuf;

/// Paths earlier dry-run plans would create, fill or free.
#[derive(Debug, Default)]
struct PreviewState {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
    created_dirs: HashSet<PathBuf>,
}

/// Single sequential pass over a layers directory.
pub struct Reorganizer<F: FileSystem> {
    fs: F,
    layers_dir: PathBuf,
    rules: RenameRules,
    policy: MovePolicy,
}

impl<F: FileSystem> Reorganizer<F> {
    pub fn new(fs: F, layers_dir: impl Into<PathBuf>, rules: RenameRules, policy: MovePolicy) -> Self {
        Self {
            fs,
            layers_dir: layers_dir.into(),
            rules,
            policy,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(fs: F, config: &C) -> Self {
        let rules = RenameRules {
            color_tag: config.color_tag().to_string(),
            color_name: config.color_name().to_string(),
            dir_delimiter: config.dir_delimiter(),
            extension: config.extension().to_string(),
            replace_all: config.replace_all(),
            extra_replacements: config.extra_replacements().to_vec(),
        };
        let policy = MovePolicy {
            create_missing_dirs: config.create_missing_dirs(),
            overwrite_existing: config.overwrite_existing(),
            dry_run: config.dry_run(),
        };
        Self::new(fs, config.layers_dir(), rules, policy)
    }

    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        tracing::debug!("Scanning {}", self.layers_dir.display());

        let entries = self
            .fs
            .list_dir(&self.layers_dir)
            .map_err(|source| LayerError::DirectoryReadError {
                path: self.layers_dir.clone(),
                source,
            })?;

        let mut records = Vec::new();
        let mut skipped = 0;
        let mut completed = 0;
        let mut preview = PreviewState::default();

        for entry in &entries {
            if !planner::is_candidate(entry, &self.rules.extension) {
                skipped += 1;
                continue;
            }
            let Some(name) = entry.to_str() else {
                tracing::warn!("Skipping non UTF-8 filename {:?}", entry);
                skipped += 1;
                continue;
            };

            let plan = planner::plan(name, &self.rules)?;

            tracing::info!("Original: {}", plan.original_name);
            tracing::info!("New: {}", plan.destination_display());

            let record = if self.policy.dry_run {
                self.preview(&plan, &mut preview)
            } else {
                let record = self.apply(&plan, completed)?;
                if record.status == MoveStatus::Moved {
                    completed += 1;
                }
                record
            };
            records.push(record);
        }

        Ok(RunSummary {
            layers_dir: self.layers_dir.clone(),
            started_at,
            finished_at: Utc::now(),
            dry_run: self.policy.dry_run,
            scanned: entries.len(),
            skipped,
            records,
        })
    }

    fn record(plan: &RenamePlan, status: MoveStatus, detail: Option<String>) -> MoveRecord {
        MoveRecord {
            original: plan.original_name.clone(),
            destination: plan.destination_display(),
            subdir: plan.destination_subdir.clone(),
            status,
            detail,
        }
    }

    /// Checks that a real run would perform, without mutating anything.
    /// Earlier planned moves in the same pass are taken into account.
    fn blocker(&self, plan: &RenamePlan, state: &PreviewState) -> Option<String> {
        if let Some(dir) = &plan.destination_subdir {
            let dir_path = self.layers_dir.join(dir);
            let dir_ready = self.fs.is_dir(&dir_path) || state.created_dirs.contains(&dir_path);
            if !dir_ready {
                if !self.policy.create_missing_dirs {
                    return Some(format!("directory {} does not exist", dir_path.display()));
                }
                if self.fs.exists(&dir_path) && !state.vacated.contains(&dir_path) {
                    return Some(format!(
                        "{} exists and is not a directory",
                        dir_path.display()
                    ));
                }
            }
        }

        let target = self.layers_dir.join(plan.relative_destination());
        if self.policy.overwrite_existing {
            return None;
        }
        if state.claimed.contains(&target) {
            return Some(format!("{} is the destination of an earlier file", target.display()));
        }
        if self.fs.exists(&target) && !state.vacated.contains(&target) {
            return Some(format!("{} already exists", target.display()));
        }
        None
    }

    fn preview(&self, plan: &RenamePlan, state: &mut PreviewState) -> MoveRecord {
        if plan.is_noop() {
            return Self::record(plan, MoveStatus::Unchanged, None);
        }
        if let Some(reason) = self.blocker(plan, state) {
            return Self::record(plan, MoveStatus::Blocked, Some(reason));
        }

        if let Some(dir) = &plan.destination_subdir {
            let dir_path = self.layers_dir.join(dir);
            if !self.fs.is_dir(&dir_path) {
                state.created_dirs.insert(dir_path);
            }
        }
        let target = self.layers_dir.join(plan.relative_destination());
        state.vacated.remove(&target);
        state.claimed.insert(target);
        state
            .vacated
            .insert(self.layers_dir.join(&plan.original_name));
        Self::record(plan, MoveStatus::Planned, None)
    }

    fn ensure_dir(&self, plan: &RenamePlan, dir: &str, completed: usize) -> Result<bool> {
        let dir_path = self.layers_dir.join(dir);
        if self.fs.is_dir(&dir_path) {
            return Ok(false);
        }
        if !self.policy.create_missing_dirs {
            return Err(LayerError::MissingDestinationDir {
                file: plan.original_name.clone(),
                dir: dir_path,
                completed,
            });
        }
        self.fs
            .create_dir(&dir_path)
            .map_err(|source| LayerError::CreateDirError {
                dir: dir_path.clone(),
                completed,
                source,
            })?;
        tracing::debug!("Created directory {}", dir_path.display());
        Ok(true)
    }

    fn apply(&self, plan: &RenamePlan, completed: usize) -> Result<MoveRecord> {
        if plan.is_noop() {
            return Ok(Self::record(plan, MoveStatus::Unchanged, None));
        }

        let created = match &plan.destination_subdir {
            Some(dir) => self.ensure_dir(plan, dir, completed)?,
            None => false,
        };

        let source = self.layers_dir.join(&plan.original_name);
        let target = self.layers_dir.join(plan.relative_destination());

        if self.fs.exists(&target) {
            if !self.policy.overwrite_existing {
                return Err(LayerError::DestinationExists {
                    file: plan.original_name.clone(),
                    destination: target,
                    completed,
                });
            }
            tracing::warn!("Overwriting {}", target.display());
        }

        self.fs
            .rename(&source, &target)
            .map_err(|source| LayerError::MoveError {
                file: plan.original_name.clone(),
                destination: target.clone(),
                completed,
                source,
            })?;

        let detail = created.then(|| "created directory".to_string());
        Ok(Self::record(plan, MoveStatus::Moved, detail))
    }
}
