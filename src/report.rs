use crate::{
    config::DateRange,
    gitlab_commit_collector::{CommitTally, SkipReason},
};
use std::fmt;

const RULE: &str = "------------------";

/// Summary printed at the end of a run.
#[derive(Debug)]
pub struct Report {
    username: String,
    range: DateRange,
    tally: CommitTally,
}

impl Report {
    pub fn new(username: impl Into<String>, range: DateRange, tally: CommitTally) -> Self {
        Report {
            username: username.into(),
            range,
            tally,
        }
    }

    pub fn tally(&self) -> &CommitTally {
        &self.tally
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Commit report ---")?;
        writeln!(f, "Date range: {} to {}", self.range.start, self.range.end)?;
        writeln!(f, "User: {}", self.username)?;
        writeln!(f, "{}", RULE)?;

        let total = self.tally.total();
        if total == 0 {
            writeln!(f, "No commits found in this date range.")?;
        } else {
            for entry in self.tally.counts() {
                writeln!(f, "Project '{}': {} {}", entry.name, entry.count, plural(entry.count))?;
            }
            writeln!(f, "{}", RULE)?;
            writeln!(f, "Total commits: {}", total)?;
        }

        if self.tally.is_partial() {
            let inaccessible = self
                .tally
                .skipped()
                .iter()
                .filter(|skipped| skipped.reason == SkipReason::Inaccessible)
                .count();
            let failed = self.tally.skipped().len() - inaccessible;
            writeln!(
                f,
                "Note: {} inaccessible and {} failed project(s) were skipped; the total may be undercounted.",
                inaccessible, failed
            )?;
        }

        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "commit"
    } else {
        "commits"
    }
}
