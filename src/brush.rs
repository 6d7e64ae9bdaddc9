use crate::chart::Scene;
use crate::error::{LocvizError, Result};
use std::str::FromStr;

/// Normalized screen-space rectangle, closed on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x1 - self.x0 <= 0.0 || self.y1 - self.y0 <= 0.0
    }
}

/// `x0,y0,x1,y1`
impl FromStr for Rect {
    type Err = LocvizError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| LocvizError::InvalidBrush(format!("{s:?}: {e}")))?;
        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Rect::from_corners((*x0, *y0), (*x1, *y1)))
            }
            _ => Err(LocvizError::InvalidBrush(format!(
                "{s:?}: expected four numbers x0,y0,x1,y1"
            ))),
        }
    }
}

/// Which commits the brush currently covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// No active brush: consumers fall back to every commit.
    #[default]
    None,
    /// Commit indices inside the brush, ascending. May be empty.
    Commits(Vec<usize>),
}

impl Selection {
    /// Commits whose projected centre lies inside `rect`. A zero-area rectangle selects nothing.
    pub fn from_rect(scene: &Scene, rect: Option<Rect>) -> Self {
        let Some(rect) = rect.filter(|r| !r.is_empty()) else {
            return Selection::None;
        };
        let mut picked: Vec<usize> = scene
            .marks
            .iter()
            .filter(|m| rect.contains(m.cx, m.cy))
            .map(|m| m.commit)
            .collect();
        picked.sort_unstable();
        Selection::Commits(picked)
    }

    pub fn contains(&self, commit: usize) -> bool {
        match self {
            Selection::None => false,
            Selection::Commits(ids) => ids.binary_search(&commit).is_ok(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Selected commit indices, or `None` when nothing filters the set.
    pub fn indices(&self) -> Option<&[usize]> {
        match self {
            Selection::Commits(ids) if !ids.is_empty() => Some(ids),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushPhase {
    Idle,
    Dragging,
}

/// Drag-to-select rectangle driven by start / brush / end events.
#[derive(Debug, Clone)]
pub struct BrushSelector {
    phase: BrushPhase,
    anchor: Option<(f64, f64)>,
    rect: Option<Rect>,
}

impl Default for BrushSelector {
    fn default() -> Self {
        Self {
            phase: BrushPhase::Idle,
            anchor: None,
            rect: None,
        }
    }
}

impl BrushSelector {
    pub fn phase(&self) -> BrushPhase {
        self.phase
    }

    /// Current rectangle, `None` once cleared or when it has no area.
    pub fn rect(&self) -> Option<Rect> {
        self.rect.filter(|r| !r.is_empty())
    }

    pub fn start(&mut self, x: f64, y: f64) -> Option<Rect> {
        self.phase = BrushPhase::Dragging;
        self.anchor = Some((x, y));
        self.rect = Some(Rect::from_corners((x, y), (x, y)));
        log::trace!("brush start at ({x:.1}, {y:.1})");
        self.rect()
    }

    pub fn brush(&mut self, x: f64, y: f64) -> Option<Rect> {
        if self.phase != BrushPhase::Dragging {
            return self.rect();
        }
        if let Some(anchor) = self.anchor {
            self.rect = Some(Rect::from_corners(anchor, (x, y)));
        }
        self.rect()
    }

    pub fn end(&mut self, x: f64, y: f64) -> Option<Rect> {
        let rect = self.brush(x, y);
        self.phase = BrushPhase::Idle;
        self.anchor = None;
        if rect.is_none() {
            self.rect = None;
        }
        log::debug!("brush end: {:?}", rect);
        rect
    }

    pub fn clear(&mut self) {
        self.phase = BrushPhase::Idle;
        self.anchor = None;
        self.rect = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;
    use crate::scale::{ChartLayout, ScaleModel};

    fn scene() -> Scene {
        let rows = vec![
            line("a", "2025-02-10T03:00:00+00:00", "a.js", "js", 1),
            line("b", "2025-02-14T12:00:00+00:00", "a.js", "js", 1),
            line("c", "2025-02-20T21:00:00+00:00", "a.js", "js", 1),
        ];
        let set = group_commits(rows, None);
        Scene::build(&set, &ScaleModel::build(&set, &ChartLayout::default()))
    }

    #[test]
    fn full_plot_selects_everything() {
        let scene = scene();
        let l = scene.layout;
        let rect = Rect::from_corners((l.plot_left(), l.plot_top()), (l.plot_right(), l.plot_bottom()));
        assert_eq!(Selection::from_rect(&scene, Some(rect)), Selection::Commits(vec![0, 1, 2]));
    }

    #[test]
    fn zero_area_selects_none() {
        let scene = scene();
        let point = Rect::from_corners((100.0, 100.0), (100.0, 100.0));
        assert_eq!(Selection::from_rect(&scene, Some(point)), Selection::None);
        let line = Rect::from_corners((0.0, 100.0), (1000.0, 100.0));
        assert_eq!(Selection::from_rect(&scene, Some(line)), Selection::None);
    }

    #[test]
    fn containment_is_closed() {
        let scene = scene();
        let m = &scene.marks[0];
        let rect = Rect::from_corners((m.cx, m.cy), (m.cx + 5.0, m.cy + 5.0));
        assert!(Selection::from_rect(&scene, Some(rect)).contains(m.commit));
    }

    #[test]
    fn enlarging_never_drops_commits() {
        let scene = scene();
        let mut rect = Rect::from_corners((400.0, 200.0), (500.0, 300.0));
        let mut previous = Selection::from_rect(&scene, Some(rect));
        for _ in 0..20 {
            rect.x0 -= 30.0;
            rect.x1 += 30.0;
            rect.y0 -= 20.0;
            rect.y1 += 20.0;
            let current = Selection::from_rect(&scene, Some(rect));
            if let Selection::Commits(prev) = &previous {
                for c in prev {
                    assert!(current.contains(*c));
                }
            }
            previous = current;
        }
        assert_eq!(previous.indices().map(<[usize]>::len), Some(3));
    }

    #[test]
    fn drag_lifecycle() {
        let mut brush = BrushSelector::default();
        assert_eq!(brush.start(10.0, 20.0), None);
        assert_eq!(brush.phase(), BrushPhase::Dragging);
        let r = brush.brush(5.0, 40.0).unwrap();
        assert_eq!((r.x0, r.y0, r.x1, r.y1), (5.0, 20.0, 10.0, 40.0));
        let r = brush.end(50.0, 60.0).unwrap();
        assert_eq!((r.x0, r.y0, r.x1, r.y1), (10.0, 20.0, 50.0, 60.0));
        assert_eq!(brush.phase(), BrushPhase::Idle);
        assert_eq!(brush.rect(), Some(r));

        // moving after release does not reshape the brush
        assert_eq!(brush.brush(0.0, 0.0), Some(r));

        // a click without drag clears it
        brush.start(70.0, 70.0);
        assert_eq!(brush.end(70.0, 70.0), None);
        assert_eq!(brush.rect(), None);
    }

    #[test]
    fn parses_rect() {
        let r: Rect = "30, 40,10,20".parse().unwrap();
        assert_eq!((r.x0, r.y0, r.x1, r.y1), (10.0, 20.0, 30.0, 40.0));
        assert!("1,2,3".parse::<Rect>().is_err());
        assert!("a,b,c,d".parse::<Rect>().is_err());
    }
}
