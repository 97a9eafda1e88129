use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitcalError>;

#[derive(Error, Debug)]
pub enum GitcalError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Cannot access repository {path}: {reason}")]
    RepositoryAccess { path: String, reason: String },
    #[error("Failed reading history of {path}: {reason}")]
    HistoryRead { path: String, reason: String },
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Scan error: {0}")]
    Scan(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

impl GitcalError {
    /// True for failures that happened before any commit of the repository was read.
    pub fn is_access_error(&self) -> bool {
        matches!(self, GitcalError::RepositoryAccess { .. } | GitcalError::Git(_))
    }
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for GitcalError {
    fn from(err: gix::open::Error) -> Self {
        GitcalError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitcalError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitcalError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitcalError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitcalError::ObjectDecode(Box::new(err))
    }
}
