// Visualization adapter: records -> plot data
//
// Each record contributes exactly one point at (launch angle, exit speed),
// in record order - that ordering equality is the invariant point-index
// selection depends on. Everything here is pure so it tests without a
// terminal; rendering lives in ui.rs.

use crate::data::{opt_unit, BattedBall};
use ratatui::layout::Rect;

/// Axis window shown when there is no data yet
const EMPTY_X: (f64, f64) = (-30.0, 60.0);
const EMPTY_Y: (f64, f64) = (40.0, 120.0);

/// Padding added around the data so edge points don't sit on the border
const PADDING: f64 = 5.0;

/// How close (in cells, chebyshev) a click must land to count as a hit
const HIT_RADIUS: u16 = 2;

/// Plot window in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Project records into plot points: x = launch angle, y = exit speed.
/// One point per record, same order as the input.
pub fn plot_points(records: &[BattedBall]) -> Vec<(f64, f64)> {
    records
        .iter()
        .map(|r| (r.launch_angle, r.exit_speed))
        .collect()
}

/// Axis bounds for a set of points, padded so points stay off the border
pub fn bounds(points: &[(f64, f64)]) -> PlotBounds {
    if points.is_empty() {
        return PlotBounds {
            x_min: EMPTY_X.0,
            x_max: EMPTY_X.1,
            y_min: EMPTY_Y.0,
            y_max: EMPTY_Y.1,
        };
    }

    let mut b = PlotBounds {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for (x, y) in points {
        b.x_min = b.x_min.min(*x);
        b.x_max = b.x_max.max(*x);
        b.y_min = b.y_min.min(*y);
        b.y_max = b.y_max.max(*y);
    }

    b.x_min -= PADDING;
    b.x_max += PADDING;
    b.y_min -= PADDING;
    b.y_max += PADDING;
    b
}

/// Hover description for one point: ordered, labeled, units attached.
/// Optional fields render as "-" rather than erroring.
pub fn hover_lines(record: &BattedBall) -> Vec<String> {
    vec![
        format!("Batter: {}", record.batter),
        format!("Pitcher: {}", record.pitcher),
        format!("Exit Speed: {} mph", record.exit_speed),
        format!("Launch Angle: {}°", record.launch_angle),
        format!("Distance: {}", opt_unit(record.hit_distance, "ft")),
        format!("Outcome: {}", record.play_outcome),
    ]
}

/// Project one data point to a terminal cell within `area`.
/// Returns None when the point falls outside the bounds.
pub fn point_cell(area: Rect, bounds: &PlotBounds, point: (f64, f64)) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let x_span = bounds.x_max - bounds.x_min;
    let y_span = bounds.y_max - bounds.y_min;
    if x_span <= 0.0 || y_span <= 0.0 {
        return None;
    }

    let fx = (point.0 - bounds.x_min) / x_span;
    let fy = (point.1 - bounds.y_min) / y_span;
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return None;
    }

    let col = area.x + (fx * f64::from(area.width - 1)).round() as u16;
    // Terminal rows grow downward; data y grows upward
    let row = area.y + area.height - 1 - (fy * f64::from(area.height - 1)).round() as u16;
    Some((col, row))
}

/// Map a mouse click (terminal cell) to the index of the nearest plotted
/// point, if one is within the hit radius. Clicks on empty plot area
/// resolve to None - no selection.
pub fn hit_test(
    area: Rect,
    bounds: &PlotBounds,
    points: &[(f64, f64)],
    column: u16,
    row: u16,
) -> Option<usize> {
    let mut best: Option<(usize, u16)> = None;

    for (index, point) in points.iter().enumerate() {
        let Some((col, r)) = point_cell(area, bounds, *point) else {
            continue;
        };
        let distance = col.abs_diff(column).max(r.abs_diff(row));
        if distance > HIT_RADIUS {
            continue;
        }
        // Earliest point wins ties, keeping resolution deterministic
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index)
}
