use crate::cli::CommonArgs;
use crate::load::load_commits;
use crate::model::{Commit, CommitsOutput, SCHEMA_VERSION};
use crate::util::truncate;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashSet;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let set = load_commits(&common.input, common.repo_url.as_deref(), false)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;

    if json {
        output_json(set.commits(), &common)?;
    } else if ndjson {
        output_ndjson(set.commits())?;
    } else {
        output_summary(set.commits());
    }
    Ok(())
}

fn output_json(commits: &[Commit], common: &CommonArgs) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input: common.input.to_string_lossy().to_string(),
        commits: commits.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[Commit]) -> anyhow::Result<()> {
    for commit in commits {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(commits: &[Commit]) {
    println!(
        "{:<12} {:<20} {:<25} {:>8}",
        style("Commit").bold(),
        style("Author").bold(),
        style("When").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(68));
    for c in commits.iter().take(50) {
        println!(
            "{:<12} {:<20} {:<25} {:>8}",
            truncate(&c.id, 12),
            truncate(&c.author, 20),
            c.datetime.format("%Y-%m-%d %H:%M %:z").to_string(),
            c.total_lines
        );
    }
    if commits.len() > 50 {
        println!("\n... and {} more commits", commits.len() - 50);
    }

    let authors: HashSet<&str> = commits.iter().map(|c| c.author.as_str()).collect();
    println!(
        "\nTotal commits: {}  Unique authors: {}",
        style(commits.len()).cyan(),
        style(authors.len()).yellow()
    );
    if let (Some(first), Some(last)) = (
        commits.iter().map(|c| c.datetime).min(),
        commits.iter().map(|c| c.datetime).max(),
    ) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }
    println!("\nUse --json or --ndjson flags to export the raw data.");
}
