use crate::brush::Rect;
use crate::cli::CommonArgs;
use crate::explorer::Explorer;
use crate::load::load_commits;
use anyhow::Context;
use console::style;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, output: PathBuf, brush: Option<Rect>) -> anyhow::Result<()> {
    let set = load_commits(&common.input, common.repo_url.as_deref(), false)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;

    let mut explorer = Explorer::new(set, &common.layout());
    if let Some(rect) = brush {
        explorer.select_rect(rect);
    }

    let markup = super::svg::render(explorer.scene(), explorer.commits(), explorer.brush_rect());
    std::fs::write(&output, markup.into_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({} commits, {})",
        style("Wrote").green().bold(),
        output.display(),
        explorer.commits().len(),
        explorer.selection_label()
    );
    for entry in explorer.breakdown() {
        println!("  {:<16} {:>6} {:>7}", entry.language, entry.count, entry.percent);
    }
    Ok(())
}
