use super::index::{offset_of, BucketCounts};
use crate::error::Result;
use crate::model::{CommitRecord, SkippedRepo};
use chrono::{DateTime, TimeZone};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, warn};

/// Yields the commit history of a repository, newest first.
pub trait CommitSource {
    /// Call `visit` once per commit reachable from HEAD.
    ///
    /// Fails with `RepositoryAccess` before the first visit when the repository cannot be
    /// opened or has no HEAD, and with `HistoryRead` when the walk breaks part way.
    fn walk(&self, repo: &Path, visit: &mut dyn FnMut(CommitRecord)) -> Result<()>;
}

/// Outcome of one aggregation pass.
#[derive(Debug, Clone)]
pub struct Activity {
    pub counts: BucketCounts,
    pub scanned: usize,
    pub skipped: Vec<SkippedRepo>,
}

/// Count the commits authored by `author_email` per day over all `repo_paths`.
///
/// A repository that fails is reported in `skipped`; commits it yielded before failing
/// are still counted.
pub fn aggregate<S, Tz>(
    repo_paths: &[String],
    author_email: &str,
    source: &S,
    now: &DateTime<Tz>,
) -> Activity
where
    S: CommitSource + ?Sized,
    Tz: TimeZone,
{
    aggregate_with_progress(repo_paths, author_email, source, now, &ProgressBar::hidden())
}

pub fn aggregate_with_progress<S, Tz>(
    repo_paths: &[String],
    author_email: &str,
    source: &S,
    now: &DateTime<Tz>,
    pb: &ProgressBar,
) -> Activity
where
    S: CommitSource + ?Sized,
    Tz: TimeZone,
{
    let mut counts = BucketCounts::new();
    let mut skipped = Vec::new();
    let mut scanned = 0;

    for path in repo_paths {
        pb.set_message(format!("Reading {path}"));
        let mut matched = 0u32;
        let result = source.walk(Path::new(path), &mut |commit| {
            if commit.author_email != author_email {
                return;
            }
            if let Some(offset) = offset_of(&commit.timestamp, now) {
                counts.increment(offset);
                matched += 1;
            }
        });

        match result {
            Ok(()) => {
                scanned += 1;
                debug!(repo = %path, commits = matched, "repository aggregated");
            }
            Err(e) => {
                if e.is_access_error() {
                    warn!(repo = %path, error = %e, "skipping repository");
                } else {
                    scanned += 1;
                    warn!(repo = %path, error = %e, counted = matched, "history read stopped early");
                }
                skipped.push(SkippedRepo {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }

    Activity {
        counts,
        scanned,
        skipped,
    }
}
