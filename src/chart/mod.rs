pub mod exec;
pub mod svg;

pub use exec::exec;

use chrono::Utc;

use crate::brush::Selection;
use crate::model::CommitSet;
use crate::scale::{hour_label, ChartLayout, ScaleModel};

/// Radius added to a hovered mark.
pub const HOVER_GROWTH: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub pos: f64,
    pub label: String,
}

/// One circle per commit, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Index into `CommitSet::commits()`.
    pub commit: usize,
    pub cx: f64,
    pub cy: f64,
    pub base_radius: f64,
    pub radius: f64,
    pub base_opacity: f64,
    pub opacity: f64,
    pub selected: bool,
}

impl Mark {
    fn reset(&mut self) {
        self.radius = self.base_radius;
        self.opacity = self.base_opacity;
    }

    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (self.cx - x, self.cy - y);
        dx * dx + dy * dy
    }
}

/// Larger marks are more transparent so small ones stay visible on top.
pub fn base_opacity(radius: f64, max_radius: f64) -> f64 {
    if max_radius <= 0.0 {
        return 0.7;
    }
    (0.2 + 0.5 * (1.0 - radius / max_radius)).clamp(0.2, 0.7)
}

/// Everything the scatterplot draws. Marks are kept in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: ChartLayout,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    /// y position of each horizontal gridline
    pub gridlines: Vec<f64>,
    pub marks: Vec<Mark>,
    hovered: Option<usize>,
}

impl Scene {
    pub fn build(set: &CommitSet, scales: &ScaleModel) -> Self {
        let x_ticks = scales
            .x
            .ticks()
            .into_iter()
            .map(|t| AxisTick {
                pos: scales.x.apply(t.at),
                label: t.label,
            })
            .collect();

        let hours = scales.hour_ticks();
        let y_ticks = hours
            .iter()
            .map(|h| AxisTick {
                pos: scales.y.apply(*h),
                label: hour_label(*h),
            })
            .collect();
        let gridlines = hours.iter().map(|h| scales.y.apply(*h)).collect();

        let mut order: Vec<usize> = (0..set.len()).collect();
        // stable: equal sizes keep commit order
        order.sort_by(|a, b| set.commits()[*b].total_lines.cmp(&set.commits()[*a].total_lines));

        let marks = order
            .into_iter()
            .map(|idx| {
                let commit = &set.commits()[idx];
                let radius = scales.radius.apply(commit.total_lines);
                let opacity = base_opacity(radius, scales.layout.max_radius);
                Mark {
                    commit: idx,
                    cx: scales.x.apply(commit.datetime.with_timezone(&Utc)),
                    cy: scales.y.apply(commit.hour_of_day_fraction),
                    base_radius: radius,
                    radius,
                    base_opacity: opacity,
                    opacity,
                    selected: false,
                }
            })
            .collect();

        Self {
            layout: scales.layout,
            x_ticks,
            y_ticks,
            gridlines,
            marks,
            hovered: None,
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered mark `idx`: every other mark back to base, this one opaque and enlarged.
    pub fn enter(&mut self, idx: usize) {
        if idx >= self.marks.len() {
            return;
        }
        self.marks.iter_mut().for_each(Mark::reset);
        let mark = &mut self.marks[idx];
        mark.opacity = 1.0;
        mark.radius = mark.base_radius + HOVER_GROWTH;
        self.hovered = Some(idx);
    }

    pub fn leave(&mut self) {
        self.marks.iter_mut().for_each(Mark::reset);
        self.hovered = None;
    }

    /// Topmost mark whose circle contains the point.
    pub fn mark_at(&self, x: f64, y: f64) -> Option<usize> {
        self.marks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, m)| m.distance_sq(x, y) <= m.radius * m.radius)
            .map(|(i, _)| i)
    }

    /// Mark whose centre is closest to the point. Linear in the number of marks.
    pub fn nearest(&self, x: f64, y: f64) -> Option<usize> {
        self.marks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.distance_sq(x, y).total_cmp(&b.distance_sq(x, y)))
            .map(|(i, _)| i)
    }

    pub fn apply_selection(&mut self, selection: &Selection) {
        for mark in &mut self.marks {
            mark.selected = selection.contains(mark.commit);
        }
    }
}
