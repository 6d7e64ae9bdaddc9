//! Mappings from commit data to chart coordinates.
//!
//! All three scales are built together from one commit set and layout, and are
//! shared by rendering and hit-testing. Coordinates are screen space: x grows
//! right, y grows down.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::model::CommitSet;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 40.0,
                left: 50.0,
            },
            min_radius: 2.0,
            max_radius: 30.0,
        }
    }
}

impl ChartLayout {
    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn plot_top(&self) -> f64 {
        self.margin.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

/// Continuous linear mapping with "nice" 1/2/5 ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count.max(1));
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Step of 1, 2 or 5 times a power of ten that yields roughly `count` ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Calendar step used for time ticks and domain rounding. Calendar math is in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Hours(u32),
    Days(u32),
    Week,
    Months(u32),
    Years(u32),
}

impl TimeInterval {
    const CANDIDATES: [(TimeInterval, i64); 10] = [
        (TimeInterval::Hours(1), HOUR_MS),
        (TimeInterval::Hours(3), 3 * HOUR_MS),
        (TimeInterval::Hours(6), 6 * HOUR_MS),
        (TimeInterval::Hours(12), 12 * HOUR_MS),
        (TimeInterval::Days(1), DAY_MS),
        (TimeInterval::Days(2), 2 * DAY_MS),
        (TimeInterval::Week, 7 * DAY_MS),
        (TimeInterval::Months(1), 30 * DAY_MS),
        (TimeInterval::Months(3), 91 * DAY_MS),
        (TimeInterval::Years(1), 365 * DAY_MS),
    ];

    /// Interval whose duration is closest (by ratio) to `span_ms / count`.
    pub fn for_span(span_ms: i64, count: usize) -> Self {
        let target = span_ms as f64 / count.max(1) as f64;
        if target <= HOUR_MS as f64 {
            return TimeInterval::Hours(1);
        }
        let year = (365 * DAY_MS) as f64;
        if target > year {
            let years = tick_step(0.0, span_ms as f64 / year, count.max(1)).max(1.0);
            return TimeInterval::Years(years as u32);
        }
        Self::CANDIDATES
            .iter()
            .min_by(|a, b| {
                let ra = (target / a.1 as f64).ln().abs();
                let rb = (target / b.1 as f64).ln().abs();
                ra.total_cmp(&rb)
            })
            .map(|(interval, _)| *interval)
            .unwrap_or(TimeInterval::Days(1))
    }

    pub fn floor(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let naive = t.naive_utc();
        let date = naive.date();
        let floored = match *self {
            TimeInterval::Hours(n) => {
                let hour = naive.hour() - naive.hour() % n.max(1);
                date.and_hms_opt(hour, 0, 0)
            }
            TimeInterval::Days(n) => {
                let days = date.num_days_from_ce() as i64;
                let n = n.max(1) as i64;
                let start = days - days.rem_euclid(n);
                NaiveDate::from_num_days_from_ce_opt(start as i32).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
            TimeInterval::Week => {
                let back = date.weekday().num_days_from_sunday() as i64;
                (date - Duration::days(back)).and_hms_opt(0, 0, 0)
            }
            TimeInterval::Months(n) => {
                let month0 = date.month0() - date.month0() % n.max(1);
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
            TimeInterval::Years(n) => {
                let n = n.max(1) as i32;
                let year = date.year() - date.year().rem_euclid(n);
                NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        };
        floored.map(|n| Utc.from_utc_datetime(&n)).unwrap_or(t)
    }

    pub fn offset(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            TimeInterval::Hours(n) => t + Duration::hours(n as i64),
            TimeInterval::Days(n) => t + Duration::days(n as i64),
            TimeInterval::Week => t + Duration::days(7),
            TimeInterval::Months(n) => add_months(t, n as i32),
            TimeInterval::Years(n) => add_months(t, 12 * n as i32),
        }
    }

    pub fn ceil(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let f = self.floor(t);
        if f == t {
            t
        } else {
            self.offset(f)
        }
    }

    pub fn label(&self, t: DateTime<Utc>) -> String {
        match *self {
            TimeInterval::Hours(_) if t.hour() != 0 => t.format("%H:%M").to_string(),
            TimeInterval::Hours(_) | TimeInterval::Days(_) | TimeInterval::Week => {
                t.format("%b %d").to_string()
            }
            TimeInterval::Months(_) if t.month() == 1 => t.format("%Y").to_string(),
            TimeInterval::Months(_) => t.format("%b").to_string(),
            TimeInterval::Years(_) => t.format("%Y").to_string(),
        }
    }
}

fn add_months(t: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let naive = t.naive_utc();
    let total = naive.year() * 12 + naive.month0() as i32 + months;
    let (year, month0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, naive.day().min(28))
        .and_then(|d| d.and_hms_opt(naive.hour(), naive.minute(), naive.second()))
        .map(|n: NaiveDateTime| Utc.from_utc_datetime(&n))
        .unwrap_or(t)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    pub at: DateTime<Utc>,
    pub label: String,
}

/// Time to x, over a domain widened to whole calendar intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: Option<(DateTime<Utc>, DateTime<Utc>)>,
    interval: TimeInterval,
    pub range: (f64, f64),
}

impl TimeScale {
    pub const TICK_COUNT: usize = 10;

    /// `extent` is `None` for an empty data set, which maps everything to the range midpoint.
    pub fn new(extent: Option<(DateTime<Utc>, DateTime<Utc>)>, range: (f64, f64)) -> Self {
        let Some((start, end)) = extent else {
            return Self {
                domain: None,
                interval: TimeInterval::Days(1),
                range,
            };
        };

        let span = (end - start).num_milliseconds().max(0);
        let interval = TimeInterval::for_span(span, Self::TICK_COUNT);
        let lo = interval.floor(start);
        let mut hi = interval.ceil(end);
        if hi <= lo {
            hi = interval.offset(lo);
        }
        Self {
            domain: Some((lo, hi)),
            interval,
            range,
        }
    }

    pub fn domain(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.domain
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    pub fn apply(&self, t: DateTime<Utc>) -> f64 {
        let (r0, r1) = self.range;
        match self.domain {
            Some((d0, d1)) if d1 > d0 => {
                let frac = (t - d0).num_milliseconds() as f64 / (d1 - d0).num_milliseconds() as f64;
                r0 + frac * (r1 - r0)
            }
            _ => (r0 + r1) / 2.0,
        }
    }

    pub fn invert(&self, px: f64) -> Option<DateTime<Utc>> {
        let (d0, d1) = self.domain?;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return Some(d0);
        }
        let frac = (px - r0) / (r1 - r0);
        let ms = (d1 - d0).num_milliseconds() as f64 * frac;
        if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
            return None;
        }
        d0.checked_add_signed(Duration::try_milliseconds(ms.round() as i64)?)
    }

    pub fn ticks(&self) -> Vec<TimeTick> {
        let Some((d0, d1)) = self.domain else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut t = self.interval.ceil(d0);
        while t <= d1 && out.len() < 1000 {
            out.push(TimeTick {
                at: t,
                label: self.interval.label(t),
            });
            let next = self.interval.offset(t);
            if next <= t {
                break;
            }
            t = next;
        }
        out
    }
}

/// Line count to radius, proportional to the square root so that mark area tracks line count.
///
/// The domain is anchored at zero and the largest commit gets `max_radius`;
/// radii below `min_radius` are raised to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    pub max_lines: usize,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl RadiusScale {
    pub fn apply(&self, lines: usize) -> f64 {
        if self.max_lines == 0 {
            return self.min_radius;
        }
        let r = self.max_radius * (lines as f64 / self.max_lines as f64).sqrt();
        r.max(self.min_radius)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleModel {
    pub layout: ChartLayout,
    pub x: TimeScale,
    pub y: LinearScale,
    pub radius: RadiusScale,
}

impl ScaleModel {
    pub const HOUR_TICKS: usize = 10;

    pub fn build(set: &CommitSet, layout: &ChartLayout) -> Self {
        let instants = set.commits().iter().map(|c| c.datetime.with_timezone(&Utc));
        let extent = instants.fold(None, |acc: Option<(DateTime<Utc>, DateTime<Utc>)>, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        });

        let x = TimeScale::new(extent, (layout.plot_left(), layout.plot_right()));
        let y = LinearScale::new((0.0, 24.0), (layout.plot_top(), layout.plot_bottom()));
        let radius = RadiusScale {
            max_lines: set.commits().iter().map(|c| c.total_lines).max().unwrap_or(0),
            min_radius: layout.min_radius,
            max_radius: layout.max_radius,
        };

        log::debug!(
            "scale model: x domain {:?} ({:?}), max lines {}",
            x.domain(),
            x.interval(),
            radius.max_lines
        );

        Self {
            layout: *layout,
            x,
            y,
            radius,
        }
    }

    /// Instant and hour of day under a chart position. Hours are clamped to `[0, 24]`.
    pub fn invert(&self, x: f64, y: f64) -> Option<(DateTime<Utc>, f64)> {
        let at = self.x.invert(x)?;
        let hour = self.y.invert(y);
        hour.is_finite().then(|| (at, hour.clamp(0.0, 24.0)))
    }

    pub fn hour_ticks(&self) -> Vec<f64> {
        self.y.ticks(Self::HOUR_TICKS)
    }
}

pub fn hour_label(hour: f64) -> String {
    format!("{:02}:00", hour.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_commits;
    use crate::aggregate::tests::line;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn hour_ticks_every_two_hours() {
        let y = LinearScale::new((0.0, 24.0), (10.0, 560.0));
        let ticks = y.ticks(10);
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks[1], 2.0);
        assert_eq!(hour_label(ticks[0]), "00:00");
        assert_eq!(hour_label(ticks[12]), "24:00");
    }

    #[test]
    fn hour_zero_is_at_top() {
        let model = ScaleModel::build(&CommitSet::default(), &ChartLayout::default());
        assert_eq!(model.y.apply(0.0), 10.0);
        assert_eq!(model.y.apply(24.0), 560.0);
        assert!((model.y.invert(285.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn radius_is_area_linear() {
        let r = RadiusScale {
            max_lines: 50,
            min_radius: 2.0,
            max_radius: 30.0,
        };
        let (r5, r50) = (r.apply(5), r.apply(50));
        assert!(r5 < r50);
        assert_eq!(r50, 30.0);
        let ratio = (r50 * r50) / (r5 * r5);
        assert!((ratio - 10.0).abs() < 1e-9);
    }

    #[test]
    fn floor_flattens_the_smallest_commits() {
        let r = RadiusScale {
            max_lines: 10_000,
            min_radius: 2.0,
            max_radius: 30.0,
        };
        // 30 * sqrt(4 / 10_000) = 0.6, so both sit on the floor and share one area
        assert_eq!(r.apply(1), 2.0);
        assert_eq!(r.apply(4), 2.0);
        // above the floor, area tracks line count again
        let (a, b) = (r.apply(100), r.apply(400));
        assert!(a > 2.0);
        assert!(((b * b) / (a * a) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn radius_is_monotonic_and_floored() {
        let r = RadiusScale {
            max_lines: 10_000,
            min_radius: 2.0,
            max_radius: 30.0,
        };
        let mut prev = 0.0;
        for lines in [0, 1, 2, 10, 100, 1000, 10_000] {
            let v = r.apply(lines);
            assert!(v >= prev);
            assert!(v >= 2.0);
            prev = v;
        }
    }

    #[test]
    fn time_domain_is_niced() {
        let scale = TimeScale::new(
            Some((utc("2025-02-03T13:20:00Z"), utc("2025-03-20T08:00:00Z"))),
            (50.0, 990.0),
        );
        let (lo, hi) = scale.domain().unwrap();
        assert!(lo <= utc("2025-02-03T13:20:00Z"));
        assert!(hi >= utc("2025-03-20T08:00:00Z"));
        assert_eq!(lo.hour(), 0);
        assert_eq!(scale.apply(lo), 50.0);
        assert_eq!(scale.apply(hi), 990.0);
        assert!(!scale.ticks().is_empty());
        for tick in scale.ticks() {
            assert!(tick.at >= lo && tick.at <= hi);
        }
    }

    #[test]
    fn time_invert_round_trips_within_a_millisecond() {
        let t = utc("2025-02-10T12:00:00Z");
        let scale = TimeScale::new(Some((utc("2025-02-01T00:00:00Z"), utc("2025-02-28T00:00:00Z"))), (0.0, 1000.0));
        let back = scale.invert(scale.apply(t)).unwrap();
        assert!((back - t).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn time_invert_rejects_runaway_positions() {
        let scale = TimeScale::new(Some((utc("2025-02-01T00:00:00Z"), utc("2025-02-28T00:00:00Z"))), (0.0, 1000.0));
        assert_eq!(scale.invert(1e18), None);
        assert_eq!(scale.invert(-1e18), None);
        assert_eq!(scale.invert(f64::NAN), None);
        assert!(scale.invert(-50.0).is_some());
    }

    #[test]
    fn model_invert_clamps_hours() {
        let set = group_commits(vec![line("c1", "2025-02-10T09:00:00+00:00", "a.js", "js", 1)], None);
        let model = ScaleModel::build(&set, &ChartLayout::default());
        let (_, hour) = model.invert(500.0, 285.0).unwrap();
        assert!((hour - 12.0).abs() < 1e-9);
        assert_eq!(model.invert(500.0, -100.0).map(|(_, h)| h), Some(0.0));
        assert_eq!(model.invert(500.0, 900.0).map(|(_, h)| h), Some(24.0));
        assert_eq!(ScaleModel::build(&CommitSet::default(), &ChartLayout::default()).invert(1.0, 1.0), None);
    }

    #[test]
    fn single_instant_gets_a_whole_interval() {
        let t = utc("2025-02-10T00:00:00Z");
        let scale = TimeScale::new(Some((t, t)), (0.0, 100.0));
        let (lo, hi) = scale.domain().unwrap();
        assert!(hi > lo);
        let x = scale.apply(t);
        assert!((0.0..=100.0).contains(&x));
    }

    #[test]
    fn empty_domain_does_not_panic() {
        let model = ScaleModel::build(&CommitSet::default(), &ChartLayout::default());
        assert!(model.x.ticks().is_empty());
        assert_eq!(model.x.apply(utc("2025-01-01T00:00:00Z")), 520.0);
        assert_eq!(model.radius.apply(0), 2.0);
    }

    #[test]
    fn interval_choice_scales_with_span() {
        assert_eq!(TimeInterval::for_span(10 * HOUR_MS, 10), TimeInterval::Hours(1));
        assert_eq!(TimeInterval::for_span(10 * DAY_MS, 10), TimeInterval::Days(1));
        assert_eq!(TimeInterval::for_span(70 * DAY_MS, 10), TimeInterval::Week);
        assert!(matches!(
            TimeInterval::for_span(30 * 365 * DAY_MS, 10),
            TimeInterval::Years(_)
        ));
    }

    #[test]
    fn model_from_commits() {
        let set = group_commits(
            vec![
                line("a", "2025-02-10T09:00:00+00:00", "a.js", "js", 1),
                line("b", "2025-02-20T18:00:00+00:00", "a.js", "js", 1),
                line("b", "2025-02-20T18:00:00+00:00", "a.js", "js", 1),
            ],
            None,
        );
        let model = ScaleModel::build(&set, &ChartLayout::default());
        assert_eq!(model.radius.max_lines, 2);
        let xa = model.x.apply(set.commits()[0].datetime.with_timezone(&Utc));
        let xb = model.x.apply(set.commits()[1].datetime.with_timezone(&Utc));
        assert!(xa < xb);
        assert!(xa >= 50.0 && xb <= 990.0);
    }
}
