//! Interaction state for one loaded data set.
//!
//! [`Explorer`] owns the commit set, the scales built from it, the rendered
//! scene and the brush/tooltip state. It is constructed in one step, so event
//! handlers only ever see a complete scale model and scene.

use crate::breakdown::{breakdown_for, LanguageShare};
use crate::brush::{BrushSelector, Rect, Selection};
use crate::chart::Scene;
use crate::model::{Commit, CommitSet};
use crate::scale::{ChartLayout, ScaleModel};
use crate::stats::Stats;
use crate::tooltip::Tooltip;

pub struct Explorer {
    commits: CommitSet,
    scales: ScaleModel,
    scene: Scene,
    stats: Stats,
    brush: BrushSelector,
    tooltip: Tooltip,
    selection: Selection,
    breakdown: Vec<LanguageShare>,
}

impl Explorer {
    pub fn new(commits: CommitSet, layout: &ChartLayout) -> Self {
        let scales = ScaleModel::build(&commits, layout);
        let scene = Scene::build(&commits, &scales);
        let stats = Stats::compute(&commits);
        let breakdown = breakdown_for(&commits, &Selection::None);
        Self {
            commits,
            scales,
            scene,
            stats,
            brush: BrushSelector::default(),
            tooltip: Tooltip::default(),
            selection: Selection::None,
            breakdown,
        }
    }

    pub fn commits(&self) -> &CommitSet {
        &self.commits
    }

    pub fn scales(&self) -> &ScaleModel {
        &self.scales
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn breakdown(&self) -> &[LanguageShare] {
        &self.breakdown
    }

    pub fn brush_rect(&self) -> Option<Rect> {
        self.brush.rect()
    }

    pub fn hovered_commit(&self) -> Option<&Commit> {
        self.scene
            .hovered()
            .and_then(|m| self.scene.marks.get(m))
            .and_then(|m| self.commits.commits().get(m.commit))
    }

    /// Pointer moved over the plot at chart coordinates `(x, y)`; `viewport` is where to put the tooltip.
    ///
    /// Binds the nearest commit and moves the tooltip. Visibility is left to
    /// [`pointer_over`](Self::pointer_over), so the box only shows while a mark is hovered.
    pub fn pointer_move(&mut self, x: f64, y: f64, viewport: (f64, f64)) {
        let nearest = self
            .scene
            .nearest(x, y)
            .and_then(|m| self.scene.marks.get(m))
            .and_then(|m| self.commits.commits().get(m.commit));
        if nearest.is_none() {
            return;
        }
        self.tooltip.set_content(nearest);
        self.tooltip.set_position(viewport.0, viewport.1);
    }

    /// Hover transitions: entering a mark highlights it, leaving every mark restores the scene.
    pub fn pointer_over(&mut self, x: f64, y: f64, viewport: (f64, f64)) {
        match self.scene.mark_at(x, y) {
            Some(idx) if self.scene.hovered() != Some(idx) => {
                self.scene.enter(idx);
                let commit = self
                    .scene
                    .marks
                    .get(idx)
                    .and_then(|m| self.commits.commits().get(m.commit));
                self.tooltip.set_content(commit);
                self.tooltip.set_position(viewport.0, viewport.1);
                self.tooltip.set_visible(true);
            }
            Some(_) => self.tooltip.set_position(viewport.0, viewport.1),
            None if self.scene.hovered().is_some() => self.pointer_leave(),
            None => {}
        }
    }

    pub fn pointer_leave(&mut self) {
        self.scene.leave();
        self.tooltip.set_visible(false);
    }

    pub fn brush_start(&mut self, x: f64, y: f64) {
        let rect = self.brush.start(x, y);
        self.reselect(rect);
    }

    pub fn brush_move(&mut self, x: f64, y: f64) {
        let rect = self.brush.brush(x, y);
        self.reselect(rect);
    }

    pub fn brush_end(&mut self, x: f64, y: f64) {
        let rect = self.brush.end(x, y);
        self.reselect(rect);
    }

    pub fn clear_brush(&mut self) {
        self.brush.clear();
        self.reselect(None);
    }

    /// Apply a fixed rectangle as if it had been dragged.
    pub fn select_rect(&mut self, rect: Rect) {
        self.brush_start(rect.x0, rect.y0);
        self.brush_end(rect.x1, rect.y1);
    }

    fn reselect(&mut self, rect: Option<Rect>) {
        self.selection = Selection::from_rect(&self.scene, rect);
        self.scene.apply_selection(&self.selection);
        self.breakdown = breakdown_for(&self.commits, &self.selection);
    }

    /// Number of commits the breakdown covers: every commit when nothing is brushed.
    pub fn selection_count(&self) -> usize {
        match &self.selection {
            Selection::None => self.commits.len(),
            Selection::Commits(ids) => ids.len(),
        }
    }

    /// Date and time of day under a chart position, e.g. `Feb 11, 2025 14:30` (date in UTC).
    pub fn position_label(&self, x: f64, y: f64) -> Option<String> {
        let (at, hour) = self.scales.invert(x, y)?;
        let minutes = (hour * 60.0).round() as u32;
        Some(format!(
            "{} {:02}:{:02}",
            at.format("%b %-d, %Y"),
            minutes / 60,
            minutes % 60
        ))
    }

    pub fn selection_label(&self) -> String {
        match &self.selection {
            Selection::None => format!("No selection, showing all {} commits", self.commits.len()),
            Selection::Commits(ids) if ids.is_empty() => {
                format!("No commits selected, showing all {}", self.commits.len())
            }
            Selection::Commits(ids) => format!("{} commits selected", ids.len()),
        }
    }
}
