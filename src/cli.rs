use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::brush::Rect;
use crate::scale::ChartLayout;

#[derive(Parser)]
#[command(name = "locviz")]
#[command(about = "Explore per-line code change logs: commit scatterplot, brushing and language breakdown")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, short, global = true, default_value = "loc.csv", help = "Line change CSV to read ('-' for stdin)")]
    pub input: PathBuf,

    #[arg(long, global = true, help = "Repository URL used to build commit links, e.g. https://github.com/org/repo")]
    pub repo_url: Option<String>,

    #[arg(long, global = true, default_value_t = 1000.0, help = "Chart width in chart units")]
    pub width: f64,

    #[arg(long, global = true, default_value_t = 600.0, help = "Chart height in chart units")]
    pub height: f64,

    #[arg(long, global = true, default_value_t = 2.0, help = "Smallest mark radius")]
    pub min_radius: f64,

    #[arg(long, global = true, default_value_t = 30.0, help = "Radius of the largest commit")]
    pub max_radius: f64,
}

impl CommonArgs {
    /// Chart layout from the flags, falling back to defaults for values that cannot produce a plot.
    pub fn layout(&self) -> ChartLayout {
        let defaults = ChartLayout::default();
        let m = defaults.margin;
        let usable = |v: f64, min: f64, fallback: f64| if v.is_finite() && v > min { v } else { fallback };

        let max_radius = usable(self.max_radius, 0.0, defaults.max_radius);
        ChartLayout {
            width: usable(self.width, m.left + m.right, defaults.width),
            height: usable(self.height, m.top + m.bottom, defaults.height),
            margin: m,
            min_radius: usable(self.min_radius, -1.0, defaults.min_radius).min(max_radius),
            max_radius,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// One row per commit
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Lines per language over all commits or a brushed region
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Brush rectangle in chart units: x0,y0,x1,y1")]
        brush: Option<Rect>,
    },
    /// Write the scatterplot as SVG
    Plot {
        #[arg(long, short, default_value = "chart.svg", help = "SVG file to write")]
        output: PathBuf,

        #[arg(long, help = "Brush rectangle in chart units: x0,y0,x1,y1")]
        brush: Option<Rect>,
    },
    /// Interactive terminal explorer
    #[command(alias = "tui", alias = "ui")]
    Explore,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json } => crate::stats::exec(self.common, json),
            Commands::Commits { json, ndjson } => crate::export::exec(self.common, json, ndjson),
            Commands::Breakdown { json, ndjson, brush } => {
                crate::breakdown::exec(self.common, json, ndjson, brush)
            }
            Commands::Plot { output, brush } => crate::chart::exec(self.common, output, brush),
            Commands::Explore => crate::tui::run(&self.common),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brush_and_globals() {
        let cli = Cli::try_parse_from([
            "locviz", "breakdown", "--brush", "0,0,500,300", "--input", "x.csv", "--json",
        ])
        .unwrap();
        assert_eq!(cli.common.input, PathBuf::from("x.csv"));
        match cli.command {
            Commands::Breakdown { json, brush, .. } => {
                assert!(json);
                let r = brush.unwrap();
                assert_eq!((r.x1, r.y1), (500.0, 300.0));
            }
            _ => panic!("expected breakdown"),
        }
    }

    #[test]
    fn rejects_bad_brush() {
        assert!(Cli::try_parse_from(["locviz", "plot", "--brush", "1,2"]).is_err());
    }

    #[test]
    fn layout_falls_back_on_unusable_sizes() {
        let cli = Cli::try_parse_from(["locviz", "--width", "20", "--max-radius", "10", "stats"]).unwrap();
        let layout = cli.common.layout();
        assert_eq!(layout.width, 1000.0);
        assert_eq!(layout.max_radius, 10.0);
        assert_eq!(layout.min_radius, 2.0);
    }
}
