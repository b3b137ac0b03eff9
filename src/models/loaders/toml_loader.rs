use crate::error::{AppResult, FileError};
use crate::models::catalog::{BranchEntry, Catalog};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// On-disk catalog layout
///
/// Either a list of `[[branches]]` or one top-level `subjects` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    branches: Option<Vec<BranchEntry>>,
    #[serde(default)]
    subjects: Option<Vec<String>>,
}

/// Loads a subject catalog from a TOML file
pub async fn load_catalog_file(path: &Path) -> AppResult<Catalog> {
    let shown = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: shown }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::read_failed(&shown, e))?;

    parse_catalog(&content, &shown)
}

/// Parses and validates catalog TOML; `origin` is only used in error messages
pub fn parse_catalog(content: &str, origin: &str) -> AppResult<Catalog> {
    let file: CatalogFile = toml::from_str(content).map_err(|e| FileError::TomlParseFailed {
        path: origin.to_string(),
        source: Box::new(e),
    })?;

    let invalid = |reason: String| FileError::invalid_catalog(origin, reason);

    match (file.branches, file.subjects) {
        (Some(_), Some(_)) => {
            Err(invalid("use either [[branches]] or a top-level subjects list, not both".into()).into())
        }
        (None, None) => Err(invalid("no branches and no subjects".into()).into()),
        (Some(branches), None) => {
            if branches.is_empty() {
                return Err(invalid("branches list is empty".into()).into());
            }
            let mut names = HashSet::new();
            for branch in &branches {
                if branch.name.trim().is_empty() {
                    return Err(invalid("branch with an empty name".into()).into());
                }
                if !names.insert(branch.name.as_str()) {
                    return Err(invalid(format!("duplicate branch {}", branch.name)).into());
                }
                check_subjects(&branch.subjects, &branch.name).map_err(invalid)?;
            }
            Ok(Catalog::Branched(branches))
        }
        (None, Some(subjects)) => {
            check_subjects(&subjects, "subjects").map_err(invalid)?;
            Ok(Catalog::Flat(subjects))
        }
    }
}

fn check_subjects(subjects: &[String], owner: &str) -> Result<(), String> {
    if subjects.is_empty() {
        return Err(format!("{} has no subjects", owner));
    }
    let mut seen = HashSet::new();
    for subject in subjects {
        if subject.trim().is_empty() {
            return Err(format!("{} has an empty subject name", owner));
        }
        if !seen.insert(subject.as_str()) {
            return Err(format!("{} lists {} twice", owner, subject));
        }
    }
    Ok(())
}
