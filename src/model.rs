use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::breakdown::LanguageShare;
use crate::stats::Stats;

pub const SCHEMA_VERSION: u32 = 1;

/// One changed source line, as read from the input log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChange {
    pub commit_id: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub file: String,
    pub language: String,
    pub line_number: u32,
    pub nesting_depth: u32,
    pub length: u32,
}

/// Public view of a commit. Its line records live in [`CommitSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub url: Option<String>,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_of_day_fraction: f64,
    pub total_lines: usize,
}

/// All commits of one load plus a side table of their line records keyed by commit id.
#[derive(Debug, Clone, Default)]
pub struct CommitSet {
    commits: Vec<Commit>,
    lines: HashMap<String, Vec<LineChange>>,
}

impl CommitSet {
    pub(crate) fn from_parts(commits: Vec<Commit>, lines: HashMap<String, Vec<LineChange>>) -> Self {
        Self { commits, lines }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Line records of `commit`, in input order.
    pub fn lines_of(&self, commit: &Commit) -> &[LineChange] {
        self.lines.get(&commit.id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every line record, grouped by commit in commit order.
    pub fn all_lines(&self) -> impl Iterator<Item = &LineChange> + '_ {
        self.commits.iter().flat_map(move |c| self.lines_of(c).iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub selected_commits: usize,
    pub filtered: bool,
    pub languages: Vec<LanguageShare>,
}
