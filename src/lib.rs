pub mod cli;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod gitlab_commit_collector;
pub mod models;
pub mod report;
pub mod stream;

pub use gitlab::{GitlabApi, GitlabClient};
pub use gitlab_commit_collector::GitlabCommitCollector;
pub use report::Report;
