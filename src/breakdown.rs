use crate::brush::{Rect, Selection};
use crate::cli::CommonArgs;
use crate::explorer::Explorer;
use crate::load::load_commits;
use crate::model::{BreakdownOutput, CommitSet, LineChange, SCHEMA_VERSION};
use crate::util::format_percent;
use anyhow::Context;
use chrono::Utc;
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    pub share: f64,
    pub percent: String,
}

/// Count lines per language, largest first; ties keep first-seen order.
pub fn language_breakdown<'a, I>(lines: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a LineChange>,
{
    let mut seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        let lang = line.language.as_str();
        let entry = counts.entry(lang).or_insert(0);
        if *entry == 0 {
            seen.push(lang);
        }
        *entry += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = seen
        .into_iter()
        .map(|lang| {
            let count = counts.get(lang).copied().unwrap_or(0);
            let share = count as f64 / total as f64;
            LanguageShare {
                language: lang.to_string(),
                count,
                share,
                percent: format_percent(share),
            }
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Breakdown over the selected commits, or over every commit when the selection is none or empty.
pub fn breakdown_for(set: &CommitSet, selection: &Selection) -> Vec<LanguageShare> {
    match selection.indices() {
        Some(ids) => language_breakdown(
            ids.iter()
                .filter_map(|&i| set.commits().get(i))
                .flat_map(|c| set.lines_of(c)),
        ),
        None => language_breakdown(set.all_lines()),
    }
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, brush: Option<Rect>) -> anyhow::Result<()> {
    let set = load_commits(&common.input, common.repo_url.as_deref(), false)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;

    let mut explorer = Explorer::new(set, &common.layout());
    if let Some(rect) = brush {
        explorer.select_rect(rect);
    }
    let languages = explorer.breakdown().to_vec();
    let selected_commits = explorer.selection_count();

    if json {
        let output = BreakdownOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input: common.input.to_string_lossy().to_string(),
            selected_commits,
            filtered: explorer.selection().indices().is_some(),
            languages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for entry in &languages {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output_table(&languages, &explorer.selection_label());
    }
    Ok(())
}

fn output_table(languages: &[LanguageShare], label: &str) {
    if languages.is_empty() {
        println!("No data to display");
        return;
    }
    println!("{} ({})", style("Language Breakdown").bold(), label);
    println!("{}", "─".repeat(40));
    for entry in languages {
        println!(
            "{:<20} {:>8} {:>9}",
            entry.language,
            style(entry.count).cyan(),
            style(&entry.percent).green()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;
    use pretty_assertions::assert_eq;

    fn js_css_set() -> CommitSet {
        let mut rows = Vec::new();
        for _ in 0..5 {
            rows.push(line("c1", "2025-02-11T10:00:00+00:00", "a.js", "js", 1));
        }
        rows.push(line("c1", "2025-02-11T10:00:00+00:00", "a.css", "css", 1));
        for _ in 0..3 {
            rows.push(line("c2", "2025-02-12T10:00:00+00:00", "b.js", "js", 1));
        }
        rows.push(line("c2", "2025-02-12T10:00:00+00:00", "b.css", "css", 1));
        rows.push(line("c3", "2025-02-13T10:00:00+00:00", "c.rs", "rs", 1));
        group_commits(rows, None)
    }

    #[test]
    fn eighty_twenty_split() {
        let set = js_css_set();
        let shares = breakdown_for(&set, &Selection::Commits(vec![0, 1]));
        let view: Vec<(&str, usize, &str)> = shares
            .iter()
            .map(|s| (s.language.as_str(), s.count, s.percent.as_str()))
            .collect();
        assert_eq!(view, [("js", 8, "80.0%"), ("css", 2, "20.0%")]);
    }

    #[test]
    fn no_selection_uses_all_commits() {
        let set = js_css_set();
        let all = breakdown_for(&set, &Selection::None);
        assert_eq!(all.iter().map(|s| s.count).sum::<usize>(), 11);
        assert_eq!(breakdown_for(&set, &Selection::Commits(Vec::new())), all);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let set = js_css_set();
        let shares = breakdown_for(&set, &Selection::None);
        let displayed: f64 = shares
            .iter()
            .map(|s| s.percent.trim_end_matches('%').parse::<f64>().unwrap())
            .sum();
        assert!((displayed - 100.0).abs() <= 0.1 * shares.len() as f64);
        assert!((shares.iter().map(|s| s.share).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let set = group_commits(
            vec![
                line("c1", "2025-02-11T10:00:00+00:00", "a.py", "py", 1),
                line("c1", "2025-02-11T10:00:00+00:00", "a.go", "go", 1),
            ],
            None,
        );
        let langs: Vec<String> = breakdown_for(&set, &Selection::None)
            .into_iter()
            .map(|s| s.language)
            .collect();
        assert_eq!(langs, ["py", "go"]);
    }

    #[test]
    fn idempotent_and_empty() {
        let set = js_css_set();
        let sel = Selection::Commits(vec![2]);
        assert_eq!(breakdown_for(&set, &sel), breakdown_for(&set, &sel));
        assert!(breakdown_for(&CommitSet::default(), &Selection::None).is_empty());
    }
}
