use maud::{html, Markup};

use super::{Mark, Scene};
use crate::brush::Rect;
use crate::model::CommitSet;
use crate::tooltip::TooltipContent;

const TEXT_STYLE: &str = "fill: #444; font-family: sans-serif";
const MARK_FILL: &str = "steelblue";
const SELECTED_FILL: &str = "#ff6b6b";
const GRID_STROKE: &str = "#ddd";

fn px(v: f64) -> String {
    format!("{v:.2}")
}

/// Standalone SVG document for a scene, with an optional brush rectangle on top.
pub fn render(scene: &Scene, commits: &CommitSet, brush: Option<Rect>) -> Markup {
    let l = scene.layout;
    let (left, right, top, bottom) = (l.plot_left(), l.plot_right(), l.plot_top(), l.plot_bottom());

    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(l.width) height=(l.height)
            viewBox=(format!("0 0 {} {}", l.width, l.height))
            style="overflow: visible" {
            rect width=(l.width) height=(l.height) fill="white" {}
            g.gridlines {
                @for y in &scene.gridlines {
                    line x1=(px(left)) x2=(px(right)) y1=(px(*y)) y2=(px(*y))
                        stroke=(GRID_STROKE) stroke-dasharray="4" {}
                }
            }
            g.x-axis {
                line x1=(px(left)) x2=(px(right)) y1=(px(bottom)) y2=(px(bottom)) stroke="currentColor" {}
                @for tick in &scene.x_ticks {
                    line x1=(px(tick.pos)) x2=(px(tick.pos)) y1=(px(bottom)) y2=(px(bottom + 6.0)) stroke="currentColor" {}
                    text x=(px(tick.pos)) y=(px(bottom + 20.0)) font-size="10" text-anchor="middle" style=(TEXT_STYLE) {
                        (tick.label)
                    }
                }
            }
            g.y-axis {
                line x1=(px(left)) x2=(px(left)) y1=(px(top)) y2=(px(bottom)) stroke="currentColor" {}
                @for tick in &scene.y_ticks {
                    line x1=(px(left - 6.0)) x2=(px(left)) y1=(px(tick.pos)) y2=(px(tick.pos)) stroke="currentColor" {}
                    text x=(px(left - 9.0)) y=(px(tick.pos + 3.0)) font-size="10" text-anchor="end" style=(TEXT_STYLE) {
                        (tick.label)
                    }
                }
            }
            g.dots {
                @for mark in &scene.marks {
                    (render_mark(mark, commits))
                }
            }
            @if scene.marks.is_empty() {
                text x=(px((left + right) / 2.0)) y=(px((top + bottom) / 2.0)) font-size="14" text-anchor="middle" style=(TEXT_STYLE) {
                    "No commits"
                }
            }
            @if let Some(r) = brush {
                rect.selection x=(px(r.x0)) y=(px(r.y0)) width=(px(r.x1 - r.x0)) height=(px(r.y1 - r.y0))
                    fill="#777" fill-opacity="0.1" stroke="#333" stroke-dasharray="5 3" {}
            }
        }
    }
}

fn render_mark(mark: &Mark, commits: &CommitSet) -> Markup {
    let title = commits.commits().get(mark.commit).map(|c| {
        let content = TooltipContent::from_commit(c);
        content
            .rows()
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    });
    let fill = if mark.selected { SELECTED_FILL } else { MARK_FILL };

    html! {
        circle.selected[mark.selected]
            cx=(px(mark.cx)) cy=(px(mark.cy)) r=(px(mark.radius))
            fill=(fill) fill-opacity=(px(mark.opacity)) {
            @if let Some(title) = title {
                title { (title) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;
    use crate::explorer::Explorer;
    use crate::scale::ChartLayout;

    #[test]
    fn renders_axes_and_marks() {
        let set = group_commits(
            vec![
                line("c1", "2025-02-11T10:00:00+00:00", "a.js", "js", 1),
                line("c2", "2025-02-12T22:00:00+00:00", "a.js", "js", 1),
            ],
            None,
        );
        let mut ex = Explorer::new(set, &ChartLayout::default());
        ex.select_rect(Rect::from_corners((0.0, 0.0), (1000.0, 300.0)));
        let svg = render(ex.scene(), ex.commits(), ex.brush_rect()).into_string();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("class=\"selected\"").count(), 1);
        assert!(svg.contains("12:00"));
        assert!(svg.contains("Commit: c1"));
        assert!(svg.contains("class=\"selection\""));
    }

    #[test]
    fn empty_scene_renders_placeholder() {
        let ex = Explorer::new(CommitSet::default(), &ChartLayout::default());
        let svg = render(ex.scene(), ex.commits(), None).into_string();
        assert!(svg.contains("No commits"));
        assert!(!svg.contains("<circle"));
        assert!(svg.contains("00:00"));
    }
}
