pub mod names;

use crate::config::RenameConfig;
use crate::error::{AppError, AppResult};
use crate::utils::Reporter;
use names::parse_name_list;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One planned rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Renames the files of a directory after an ordered list of names
pub struct Renamer<'a> {
    config: &'a RenameConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> Renamer<'a> {
    pub fn new(config: &'a RenameConfig, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Read the names file, plan, and apply unless `dry_run`
    pub fn rename_directory(
        &self,
        names_file: &Path,
        directory: &Path,
        num_seasons: usize,
        dry_run: bool,
    ) -> AppResult<Vec<RenameStep>> {
        let contents = std::fs::read_to_string(names_file).map_err(|e| {
            AppError::Rename(format!("cannot read {}: {}", names_file.display(), e))
        })?;
        let names = parse_name_list(&contents, num_seasons, &self.config.invalid_chars)?;
        let files = list_files(directory, names_file)?;
        let steps = self.plan(&files, &names)?;

        if dry_run {
            for step in &steps {
                self.reporter.info(&format!(
                    "Would rename {} -> {}",
                    step.from.display(),
                    step.to.display()
                ));
            }
        } else {
            self.apply(&steps)?;
            self.reporter.info(&format!(
                "Renaming successful! See directory {} for changes",
                directory.display()
            ));
        }
        Ok(steps)
    }

    /// Match the n-th file to the n-th name; nothing is planned unless the counts agree
    pub fn plan(&self, files: &[PathBuf], names: &[String]) -> AppResult<Vec<RenameStep>> {
        if files.len() != names.len() {
            return Err(AppError::Rename(format!(
                "folder has {} file(s) but the names file has {} name(s)",
                files.len(),
                names.len()
            )));
        }

        let sources: HashSet<&PathBuf> = files.iter().collect();
        let mut steps = Vec::with_capacity(files.len());
        for (idx, (from, name)) in files.iter().zip(names).enumerate() {
            let to = from.with_file_name(self.new_file_name(idx + 1, name, from));
            if to != *from && (to.exists() || sources.contains(&to)) {
                return Err(AppError::Rename(format!(
                    "{} would overwrite an existing file",
                    to.display()
                )));
            }
            steps.push(RenameStep {
                from: from.clone(),
                to,
            });
        }
        Ok(steps)
    }

    /// `<number zero-padded>. <name><original extension>`
    pub fn new_file_name(&self, number: usize, name: &str, original: &Path) -> String {
        let extension = original
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        format!(
            "{:0width$}. {}{}",
            number,
            name,
            extension,
            width = self.config.pad_width
        )
    }

    pub fn apply(&self, steps: &[RenameStep]) -> AppResult {
        for step in steps.iter().filter(|s| s.from != s.to) {
            std::fs::rename(&step.from, &step.to)?;
            tracing::debug!("Renamed {} -> {}", step.from.display(), step.to.display());
        }
        Ok(())
    }
}

/// Regular files directly inside `directory`, sorted by name, without the names file
pub fn list_files(directory: &Path, names_file: &Path) -> AppResult<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(AppError::Rename(format!(
            "{} is not a directory",
            directory.display()
        )));
    }
    let names_file = names_file.canonicalize().ok();

    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| AppError::Rename(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if names_file.is_some() && entry.path().canonicalize().ok() == names_file {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}
