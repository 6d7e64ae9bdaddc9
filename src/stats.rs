use crate::cli::CommonArgs;
use crate::load::load_commits;
use crate::model::{CommitSet, StatsOutput, SCHEMA_VERSION};
use crate::util::weekday_name;
use anyhow::Context;
use chrono::{Datelike, Utc};
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const NOT_AVAILABLE: &str = "not available";

/// Summary metrics over one load. Every field is defined for an empty commit set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub commit_count: usize,
    pub total_lines: usize,
    pub total_files: usize,
    pub longest_line: Option<u32>,
    pub average_line_length: Option<f64>,
    pub max_depth: Option<u32>,
    pub average_depth: Option<f64>,
    pub author_count: usize,
    /// 0 = Sunday .. 6 = Saturday
    pub most_active_weekday: Option<u32>,
}

impl Stats {
    pub fn compute(set: &CommitSet) -> Self {
        let total_lines = set.all_lines().count();
        let files: HashSet<&str> = set.all_lines().map(|l| l.file.as_str()).collect();
        let authors: HashSet<&str> = set.commits().iter().map(|c| c.author.as_str()).collect();

        let (length_sum, depth_sum) = set.all_lines().fold((0u64, 0u64), |(len, depth), l| {
            (len + l.length as u64, depth + l.nesting_depth as u64)
        });
        let mean = |sum: u64| (total_lines > 0).then(|| sum as f64 / total_lines as f64);

        Self {
            commit_count: set.len(),
            total_lines,
            total_files: files.len(),
            longest_line: set.all_lines().map(|l| l.length).max(),
            average_line_length: mean(length_sum),
            max_depth: set.all_lines().map(|l| l.nesting_depth).max(),
            average_depth: mean(depth_sum),
            author_count: authors.len(),
            most_active_weekday: most_active_weekday(set),
        }
    }

    pub fn most_active_day_name(&self) -> &'static str {
        self.most_active_weekday
            .and_then(weekday_name)
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let opt_int = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string());
        let opt_avg = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        vec![
            ("Commits", self.commit_count.to_string()),
            ("Total Lines", self.total_lines.to_string()),
            ("Total Files", self.total_files.to_string()),
            ("Longest Line", opt_int(self.longest_line)),
            ("Average Line Length", opt_avg(self.average_line_length)),
            ("Max Depth", opt_int(self.max_depth)),
            ("Average Depth", opt_avg(self.average_depth)),
            ("Authors", self.author_count.to_string()),
            ("Most Active Day", self.most_active_day_name().to_string()),
        ]
    }
}

/// Weekday with the most commits, in each commit's recorded offset.
///
/// Counts are enumerated Sunday through Saturday and stably sorted by count
/// descending, so a tie goes to the weekday earliest in the week.
pub fn most_active_weekday(set: &CommitSet) -> Option<u32> {
    let mut counts = [0usize; 7];
    for commit in set.commits() {
        counts[commit.datetime.weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut ranked: Vec<(u32, usize)> = (0u32..7)
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.first().map(|(day, _)| *day)
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let set = load_commits(&common.input, common.repo_url.as_deref(), false)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;
    let stats = Stats::compute(&set);

    if json {
        let output = StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input: common.input.to_string_lossy().to_string(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_table(&stats);
    }
    Ok(())
}

fn output_table(stats: &Stats) {
    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(40));
    for (label, value) in stats.entries() {
        println!("{:<24} {:>15}", label, style(value).cyan());
    }
}
