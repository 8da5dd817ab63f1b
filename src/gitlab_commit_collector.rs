pub mod project_filter;

use crate::{
    config::Config,
    error::{ApiError, RunError},
    gitlab::GitlabApi,
    models::{Project, User},
    report::Report,
};
use tracing::{debug, info, warn};

/// Commits counted for one project.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectCount {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The remote answered 404/403 for the commit listing.
    Inaccessible,
    Failed(String),
}

/// A project whose commits could not be listed.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedProject {
    pub name: String,
    pub reason: SkipReason,
}

/// Per-project counts in the order the projects were processed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommitTally {
    counts: Vec<ProjectCount>,
    skipped: Vec<SkippedProject>,
}

impl CommitTally {
    /// Only non-zero counts are kept.
    pub fn record(&mut self, name: impl Into<String>, count: usize) {
        if count > 0 {
            self.counts.push(ProjectCount {
                name: name.into(),
                count,
            });
        }
    }

    pub fn skip(&mut self, name: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedProject {
            name: name.into(),
            reason,
        });
    }

    pub fn counts(&self) -> &[ProjectCount] {
        &self.counts
    }

    pub fn skipped(&self) -> &[SkippedProject] {
        &self.skipped
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

pub struct GitlabCommitCollector<A> {
    api: A,
}

impl<A: GitlabApi> GitlabCommitCollector<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolve the user, walk every accessible project and count their commits
    /// in the configured range. Only the user lookup and project listing abort
    /// the run; a failing project is recorded as skipped.
    pub async fn collect(&self, config: &Config) -> Result<Report, RunError> {
        let username = &config.connection.username;
        let user = self.resolve_user(username).await?;

        info!("listing projects visible to the access token");
        let projects = self
            .api
            .list_projects()
            .await
            .map_err(RunError::ProjectList)?;
        info!(count = projects.len(), "found projects");

        let tally = self.count_commits(&user, &projects, config).await;

        Ok(Report::new(username.clone(), config.range, tally))
    }

    async fn resolve_user(&self, username: &str) -> Result<User, RunError> {
        info!(%username, "looking up user");
        let user = self
            .api
            .find_user(username)
            .await
            .map_err(RunError::UserLookup)?
            .ok_or_else(|| RunError::UserNotFound {
                username: username.to_string(),
            })?;
        info!(user_id = user.id, "resolved user");
        Ok(user)
    }

    async fn count_commits(&self, user: &User, projects: &[Project], config: &Config) -> CommitTally {
        let since = config.range.since();
        let until = config.range.until();
        let mut tally = CommitTally::default();

        for project in projects {
            if config.projects.excludes(project) {
                debug!(project = %project.path_with_namespace, "excluded by filter");
                continue;
            }

            match self.api.list_commits(project.id, user.id, since, until).await {
                Ok(commits) => {
                    for commit in &commits {
                        debug!(
                            project = %project.name,
                            commit = %commit.id,
                            authored = ?commit.authored_date,
                            title = %commit.title,
                            "counted commit"
                        );
                    }
                    if !commits.is_empty() {
                        info!(project = %project.name, count = commits.len(), "found commits");
                    }
                    tally.record(project.name.as_str(), commits.len());
                }
                Err(err) => {
                    tally.skip(project.name.as_str(), skip_reason(&project.name, err));
                }
            }
        }

        tally
    }
}

fn skip_reason(project: &str, err: ApiError) -> SkipReason {
    if err.is_access_denied() {
        warn!(%project, "project is not accessible, skipping");
        SkipReason::Inaccessible
    } else {
        warn!(%project, error = %err, "failed to list commits, skipping");
        SkipReason::Failed(err.to_string())
    }
}
