pub mod repo;

pub use repo::{GitRepo, GixSource};
