//! Pie-slice geometry: percentages to wedge angles and SVG arc paths.
//!
//! Angle 0 points straight up (rotated -90 degrees from the math convention)
//! and angles increase clockwise, so the first category starts at twelve
//! o'clock.

use serde::Serialize;

use crate::category::{Category, CategoryInfo};
use crate::constants::{DEFAULT_CANVAS, DEFAULT_RADIUS, FULL_CIRCLE, HALF_CIRCLE};
use crate::state::Balance;

/// Canvas placement for the chart. Presentation constants — any canvas is
/// valid as long as center and radius are consistent.
#[derive(Clone, Copy, Debug)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Default for ChartLayout {
    /// 300x300 canvas, centered pie of radius 120.
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            cx: DEFAULT_CANVAS / 2.0,
            cy: DEFAULT_CANVAS / 2.0,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl ChartLayout {
    /// Point on the circumference at the given wheel angle (degrees).
    fn point_at(&self, angle: f64) -> (f64, f64) {
        let rad = (angle - 90.0).to_radians();
        (
            self.cx + self.radius * rad.cos(),
            self.cy + self.radius * rad.sin(),
        )
    }
}

/// One wedge of the pie: derived from a state, recomputed every render.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Slice {
    pub category: Category,
    pub color: &'static str,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    /// Angular span in degrees.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the wedge must take the long way around the circle.
    pub fn large_arc(&self) -> bool {
        self.span() > HALF_CIRCLE
    }

    /// Filled-wedge path: center, line to the start point, arc to the end
    /// point, close. A zero-span slice yields a degenerate (invisible) but
    /// valid path.
    pub fn path(&self, layout: &ChartLayout) -> String {
        let (x1, y1) = layout.point_at(self.start_angle);
        let (x2, y2) = layout.point_at(self.end_angle);
        let large_arc = u8::from(self.large_arc());
        let r = fmt_coord(layout.radius);
        format!(
            "M {} {} L {} {} A {r} {r} 0 {large_arc} 1 {} {} Z",
            fmt_coord(layout.cx),
            fmt_coord(layout.cy),
            fmt_coord(x1),
            fmt_coord(y1),
            fmt_coord(x2),
            fmt_coord(y2),
        )
    }
}

/// Format a coordinate to at most three decimals, trimming trailing zeros.
/// Keeps sin/cos noise out of the emitted paths.
fn fmt_coord(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Walk the categories in display order and carve the circle proportionally.
///
/// Normalizes against the state's actual total, so any positive total works;
/// a zero total degenerates to four zero-span slices rather than NaN angles.
/// A zero-valued category yields a zero-span slice at its cumulative start
/// angle without disturbing the slices after it.
pub fn compute_slices(state: &Balance, categories: &[CategoryInfo]) -> Vec<Slice> {
    let total = state.total();
    let scale = if total > 0 {
        FULL_CIRCLE / f64::from(total)
    } else {
        0.0
    };

    let mut current_angle = 0.0;
    categories
        .iter()
        .map(|info| {
            let span = f64::from(state.get(info.category)) * scale;
            let slice = Slice {
                category: info.category,
                color: info.color,
                start_angle: current_angle,
                end_angle: current_angle + span,
            };
            current_angle += span;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::category::CATEGORIES;

    #[test]
    fn test_uniform_split_quarters() {
        let slices = compute_slices(&Balance::default(), &CATEGORIES);
        assert_eq!(slices.len(), 4);
        for (i, slice) in slices.iter().enumerate() {
            assert_abs_diff_eq!(slice.start_angle, i as f64 * 90.0, epsilon = 1e-9);
            assert_abs_diff_eq!(slice.span(), 90.0, epsilon = 1e-9);
            assert!(!slice.large_arc());
        }
        assert_abs_diff_eq!(slices[3].end_angle, 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slices_follow_display_order() {
        let slices = compute_slices(&Balance::default(), &CATEGORIES);
        let order: Vec<Category> = slices.iter().map(|s| s.category).collect();
        assert_eq!(order, Category::ALL);
        for (slice, info) in slices.iter().zip(CATEGORIES.iter()) {
            assert_eq!(slice.color, info.color);
        }
    }

    #[test]
    fn test_zero_value_yields_degenerate_slice() {
        let state = Balance::new(50, 0, 25, 25);
        let slices = compute_slices(&state, &CATEGORIES);
        assert_abs_diff_eq!(slices[0].span(), 180.0, epsilon = 1e-9);
        // relationships collapses to a point at 180 degrees
        assert_abs_diff_eq!(slices[1].start_angle, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(slices[1].span(), 0.0, epsilon = 1e-9);
        // and the slices after it are unperturbed
        assert_abs_diff_eq!(slices[2].start_angle, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(slices[2].end_angle, 270.0, epsilon = 1e-9);
        assert_abs_diff_eq!(slices[3].end_angle, 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_majority_slice_uses_large_arc() {
        let state = Balance::new(70, 10, 10, 10);
        let slices = compute_slices(&state, &CATEGORIES);
        assert_abs_diff_eq!(slices[0].span(), 252.0, epsilon = 1e-9);
        assert!(slices[0].large_arc());
        assert!(!slices[1].large_arc());
        let path = slices[0].path(&ChartLayout::default());
        assert!(path.contains("A 120 120 0 1 1"), "path was: {path}");
    }

    #[test]
    fn test_exact_semicircle_uses_short_arc() {
        // 180 degrees is not strictly greater than a half turn
        let state = Balance::new(50, 50, 0, 0);
        let slices = compute_slices(&state, &CATEGORIES);
        assert!(!slices[0].large_arc());
        assert!(!slices[1].large_arc());
    }

    #[test]
    fn test_normalizes_non_hundred_totals() {
        let state = Balance::new(50, 50, 50, 50);
        let slices = compute_slices(&state, &CATEGORIES);
        for slice in &slices {
            assert_abs_diff_eq!(slice.span(), 90.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_total_degenerates_without_nan() {
        let state = Balance::new(0, 0, 0, 0);
        let slices = compute_slices(&state, &CATEGORIES);
        for slice in &slices {
            assert_abs_diff_eq!(slice.start_angle, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(slice.span(), 0.0, epsilon = 1e-9);
            assert!(slice.path(&ChartLayout::default()).starts_with("M 150 150"));
        }
    }

    #[test]
    fn test_quarter_slice_path() {
        let slices = compute_slices(&Balance::default(), &CATEGORIES);
        let layout = ChartLayout::default();
        assert_eq!(slices[0].path(&layout), "M 150 150 L 150 30 A 120 120 0 0 1 270 150 Z");
        assert_eq!(
            slices[1].path(&layout),
            "M 150 150 L 270 150 A 120 120 0 0 1 150 270 Z"
        );
    }

    #[test]
    fn test_path_respects_custom_layout() {
        let layout = ChartLayout {
            width: 100.0,
            height: 100.0,
            cx: 50.0,
            cy: 50.0,
            radius: 40.0,
        };
        let slices = compute_slices(&Balance::default(), &CATEGORIES);
        let path = slices[0].path(&layout);
        assert_eq!(path, "M 50 50 L 50 10 A 40 40 0 0 1 90 50 Z");
    }

    #[test]
    fn test_fmt_coord_trims_noise() {
        assert_eq!(fmt_coord(150.0), "150");
        assert_eq!(fmt_coord(150.0000000000001), "150");
        assert_eq!(fmt_coord(-0.0000001), "0");
        assert_eq!(fmt_coord(33.4567), "33.457");
        assert_eq!(fmt_coord(270.5), "270.5");
    }
}
