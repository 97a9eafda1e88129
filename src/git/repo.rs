use crate::calendar::CommitSource;
use crate::error::{GitcalError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, FixedOffset};
use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;
use gix::Repository;
use std::path::{Path, PathBuf};
use tracing::trace;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walk every commit reachable from HEAD, newest commit time first.
    pub fn for_each_commit(&self, visit: &mut dyn FnMut(CommitRecord)) -> Result<()> {
        let head = self
            .repo
            .head_id()
            .map_err(|e| GitcalError::RepositoryAccess {
                path: self.path().display().to_string(),
                reason: format!("failed to resolve HEAD: {e}"),
            })?
            .detach();

        let walk = self
            .repo
            .rev_walk([head])
            .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
            .all()
            .map_err(|e| GitcalError::GitRepo(format!("failed to start revision walk: {e}")))?;

        for info in walk {
            let info = info.map_err(|e| GitcalError::GitRepo(format!("revision walk entry failed: {e}")))?;
            let commit = self.repo.find_commit(info.id)?;
            let author = commit.author()?;
            let time = author
                .time()
                .map_err(|e| GitcalError::InvalidDate(format!("commit {}: {e}", info.id)))?;
            let timestamp = to_datetime(time.seconds, time.offset)?;

            trace!(commit = %info.id, %timestamp, "visit");
            visit(CommitRecord::new(author.email.to_string(), timestamp));
        }

        Ok(())
    }
}

fn to_datetime(secs: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let tz = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid UTC offset: {offset}")))?;
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(&tz))
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid timestamp: {secs}")))
}

/// [`CommitSource`] reading repositories from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct GixSource;

impl CommitSource for GixSource {
    fn walk(&self, repo: &Path, visit: &mut dyn FnMut(CommitRecord)) -> Result<()> {
        let display = repo.display().to_string();
        let repo = GitRepo::open(repo).map_err(|e| GitcalError::RepositoryAccess {
            path: display,
            reason: e.to_string(),
        })?;

        repo.for_each_commit(visit).map_err(|e| match e {
            GitcalError::RepositoryAccess { .. } | GitcalError::HistoryRead { .. } => e,
            other => GitcalError::HistoryRead {
                path: repo.path().display().to_string(),
                reason: other.to_string(),
            },
        })
    }
}
