use crate::model::{Commit, CommitSet, LineChange};
use chrono::{DateTime, FixedOffset, Timelike};
use std::collections::HashMap;

/// Group line records into commits, keeping the order in which each commit id first appears.
///
/// Metadata comes from the first record of each group; the remaining records of a
/// commit are assumed to agree with it and are not re-checked.
pub fn group_commits(lines: Vec<LineChange>, url_base: Option<&str>) -> CommitSet {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<LineChange>> = HashMap::new();

    for line in lines {
        match groups.get_mut(&line.commit_id) {
            Some(group) => group.push(line),
            None => {
                order.push(line.commit_id.clone());
                groups.insert(line.commit_id.clone(), vec![line]);
            }
        }
    }

    let commits: Vec<Commit> = order
        .iter()
        .filter_map(|id| groups.get(id).and_then(|g| g.first().map(|first| (g.len(), first))))
        .map(|(total_lines, first)| Commit {
            id: first.commit_id.clone(),
            url: url_base.map(|base| commit_url(base, &first.commit_id)),
            author: first.author.clone(),
            datetime: first.datetime,
            hour_of_day_fraction: hour_fraction(&first.datetime),
            total_lines,
        })
        .collect();

    log::debug!("grouped {} commits", commits.len());
    CommitSet::from_parts(commits, groups)
}

pub fn hour_fraction(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

fn commit_url(base: &str, id: &str) -> String {
    format!("{}/commit/{}", base.trim_end_matches('/'), id)
}
