//! Standalone SVG document for the pie chart.

use std::fmt::Write;

use crate::category::CategoryInfo;
use crate::slice::{ChartLayout, compute_slices};
use crate::state::Balance;

/// Render the full chart as an SVG document: one filled wedge per category,
/// separated by a white stroke. Degenerate (zero-span) wedges are still
/// emitted; they are simply invisible.
pub fn render_chart(state: &Balance, categories: &[CategoryInfo], layout: &ChartLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    for slice in compute_slices(state, categories) {
        let _ = writeln!(
            out,
            r#"  <path d="{}" fill="{}" stroke="white" stroke-width="2"/>"#,
            slice.path(layout),
            slice.color,
        );
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CATEGORIES;

    #[test]
    fn test_chart_document_structure() {
        let svg = render_chart(&Balance::default(), &CATEGORIES, &ChartLayout::default());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 300 300""#));
        assert_eq!(svg.matches("<path ").count(), 4);
        for info in &CATEGORIES {
            assert!(svg.contains(info.color), "missing fill for {}", info.label);
        }
    }

    #[test]
    fn test_wedges_are_stroked_white() {
        let svg = render_chart(&Balance::default(), &CATEGORIES, &ChartLayout::default());
        assert_eq!(svg.matches(r#"stroke="white" stroke-width="2""#).count(), 4);
    }

    #[test]
    fn test_degenerate_wedges_still_emitted() {
        let svg = render_chart(
            &Balance::new(100, 0, 0, 0),
            &CATEGORIES,
            &ChartLayout::default(),
        );
        assert_eq!(svg.matches("<path ").count(), 4);
    }
}
