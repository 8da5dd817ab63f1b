use crate::models::Project;
use regex::Regex;

#[derive(Debug, Clone, Default)]
/// Projects the user asked to leave out of the count
pub struct ProjectFilter {
    exclude: Vec<Regex>,
}

impl ProjectFilter {
    /// Compile the exclude patterns, case-insensitive
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let exclude = patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){}", pattern)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProjectFilter { exclude })
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty()
    }

    /// Determine if the project should be skipped, matching on its full path
    pub fn excludes(&self, project: &Project) -> bool {
        let path = if project.path_with_namespace.is_empty() {
            &project.name
        } else {
            &project.path_with_namespace
        };

        self.exclude.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(path: &str) -> Project {
        Project {
            id: 1,
            name: path.rsplit('/').next().unwrap().to_string(),
            path_with_namespace: path.to_string(),
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = ProjectFilter::default();
        assert!(!filter.excludes(&project("team/api")));
    }

    #[test]
    fn matches_full_path_ignoring_case() {
        let filter = ProjectFilter::new(&["^Sandbox/".to_string(), "archive".to_string()]).unwrap();

        assert!(filter.excludes(&project("sandbox/playground")));
        assert!(filter.excludes(&project("team/old-ARCHIVE")));
        assert!(!filter.excludes(&project("team/sandbox")));
    }

    #[test]
    fn falls_back_to_name_without_path() {
        let filter = ProjectFilter::new(&["^tools$".to_string()]).unwrap();
        let mut bare = project("tools");
        bare.path_with_namespace.clear();

        assert!(filter.excludes(&bare));
    }

    #[test]
    fn rejects_invalid_pattern() {
        assert!(ProjectFilter::new(&["(".to_string()]).is_err());
    }
}
