use crate::cli::CommonArgs;
use crate::error::{GitcalError, Result};
use crate::store::{merge_paths, RepoStore, SqliteStore};
use crate::util::spinner;
use anyhow::Context;
use console::style;
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Directory names that are never descended into.
pub const SKIPPED_DIRS: &[&str] = &[".git", "vendor", "node_modules"];

pub fn exec(common: &CommonArgs, folder: &Path) -> anyhow::Result<()> {
    let mut store = SqliteStore::open(common.store_path()?).context("Failed to open repository store")?;

    let pb = spinner("Scanning for repositories...");
    let discovered = discover_with_progress(folder, &pb)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;
    pb.finish_and_clear();

    let existing = store.load().context("Failed to load repository store")?;
    let merged = merge_paths(&existing, &discovered);
    let added = &merged[existing.len()..];

    for path in added {
        println!("{}", path);
    }
    store.save(&merged).context("Failed to save repository store")?;

    println!(
        "{} {} new, {} known",
        style("Repositories:").bold(),
        style(added.len()).green(),
        style(merged.len()).cyan()
    );
    Ok(())
}

/// Find every directory below `root` (itself included) that holds a `.git` directory.
pub fn discover_repositories(root: &Path) -> Result<Vec<String>> {
    discover_with_progress(root, &ProgressBar::hidden())
}

fn discover_with_progress(root: &Path, pb: &ProgressBar) -> Result<Vec<String>> {
    let root = root
        .canonicalize()
        .map_err(|e| GitcalError::Scan(format!("{}: {e}", root.display())))?;
    if !root.is_dir() {
        return Err(GitcalError::Scan(format!("{} is not a directory", root.display())));
    }

    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d))
        })
        .build();

    let mut found = BTreeSet::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        pb.set_message(format!("Scanning {}", entry.path().display()));
        if entry.path().join(".git").is_dir() {
            debug!(repo = %entry.path().display(), "found repository");
            found.insert(entry.path().to_string_lossy().to_string());
            pb.inc(1);
        }
    }

    Ok(found.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn repo_at(root: &Path, rel: &str) -> String {
        let dir = root.join(rel);
        fs::create_dir_all(dir.join(".git")).unwrap();
        dir.canonicalize().unwrap().to_string_lossy().to_string()
    }

    #[test]
    fn finds_nested_repositories() {
        let tmp = tempfile::tempdir().unwrap();
        let a = repo_at(tmp.path(), "work/a");
        let b = repo_at(tmp.path(), "work/a/sub/b");
        let c = repo_at(tmp.path(), ".hidden/c");
        fs::create_dir_all(tmp.path().join("plain/dir")).unwrap();

        let mut expected = vec![a, b, c];
        expected.sort();
        assert_eq!(discover_repositories(tmp.path()).unwrap(), expected);
    }

    #[test]
    fn skips_dependency_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let app = repo_at(tmp.path(), "app");
        repo_at(tmp.path(), "app/node_modules/dep");
        repo_at(tmp.path(), "app/vendor/lib");
        assert_eq!(discover_repositories(tmp.path()).unwrap(), vec![app]);
    }

    #[test]
    fn root_can_be_a_repository() {
        let tmp = tempfile::tempdir().unwrap();
        let root = repo_at(tmp.path(), "");
        assert_eq!(discover_repositories(tmp.path()).unwrap(), vec![root]);
    }

    #[test]
    fn gitignored_repositories_are_found() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".gitignore"), "ignored/\n").unwrap();
        let r = repo_at(tmp.path(), "ignored/r");
        assert_eq!(discover_repositories(tmp.path()).unwrap(), vec![r]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_repositories(&tmp.path().join("nope")),
            Err(GitcalError::Scan(_))
        ));
    }
}
