//! SVG builder — accumulates SVG elements and produces the final string,
//! either as one tall layout or tiled into pages.

use super::canvas::{Canvas, Color, Paint, PaintStyle, Point, TextAnchor};
use crate::pager::TilePlan;

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

const LAYOUT_ID: &str = "layout";

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `fill`/`stroke` attributes for a paint.
fn paint_attrs(paint: &Paint) -> String {
    let color = paint.color.hex();
    let opacity = paint.color.opacity();
    match paint.style {
        PaintStyle::Fill if opacity < 1.0 => {
            format!(r#"fill="{color}" fill-opacity="{opacity:.3}""#)
        }
        PaintStyle::Fill => format!(r#"fill="{color}""#),
        PaintStyle::Stroke { width } if opacity < 1.0 => format!(
            r#"fill="none" stroke="{color}" stroke-opacity="{opacity:.3}" stroke-width="{width:.1}""#
        ),
        PaintStyle::Stroke { width } => {
            format!(r#"fill="none" stroke="{color}" stroke-width="{width:.1}""#)
        }
    }
}

fn line_attrs(paint: &Paint) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{:.1}""#,
        paint.color.hex(),
        paint.line_width()
    );
    if paint.color.alpha() < 255 {
        attrs.push_str(&format!(r#" stroke-opacity="{:.3}""#, paint.color.opacity()));
    }
    attrs
}

impl SvgBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn open_tag(width: f64, height: f64) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" style="font-family: sans-serif;">"#,
            w = width,
            h = height
        )
    }

    fn push_elements(&self, svg: &mut String, indent: &str) {
        for el in &self.elements {
            svg.push_str(indent);
            svg.push_str(el);
            svg.push('\n');
        }
    }

    /// The full layout as a single SVG document.
    pub fn build(self) -> String {
        let mut svg = Self::open_tag(self.width, self.height);
        svg.push('\n');
        self.push_elements(&mut svg, "  ");
        svg.push_str("</svg>\n");
        svg
    }

    /// The layout tiled into pages on a solid background.
    ///
    /// The layout is defined once and every page shows it through a
    /// nested viewport onto its source band, so content outside the
    /// band is clipped and bands past the layout stay background.
    pub fn build_paged(self, plan: &TilePlan, background: Color) -> String {
        let (w, h) = (plan.tiled_width as f64, plan.tiled_height as f64);
        let mut svg = Self::open_tag(w, h);
        svg.push('\n');

        svg.push_str(&format!("  <defs>\n    <g id=\"{LAYOUT_ID}\">\n"));
        self.push_elements(&mut svg, "      ");
        svg.push_str("    </g>\n  </defs>\n");

        svg.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>\n",
            background.hex()
        ));

        for tile in &plan.tiles {
            let (src, dst) = (tile.src, tile.dst);
            svg.push_str(&format!(
                "  <svg x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" overflow=\"hidden\"><use href=\"#{LAYOUT_ID}\"/></svg>\n",
                dst.left,
                dst.top,
                dst.width(),
                dst.height(),
                src.left,
                src.top,
                src.width(),
                src.height()
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Canvas backend
// ═══════════════════════════════════════════════════════════════════════

impl Canvas for SvgBuilder {
    fn rect(&mut self, left: f64, top: f64, right: f64, bottom: f64, paint: &Paint) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" {}/>"#,
            left,
            top,
            right - left,
            bottom - top,
            paint_attrs(paint)
        ));
    }

    fn round_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64, radius: f64, paint: &Paint) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" ry="{:.1}" {}/>"#,
            left,
            top,
            right - left,
            bottom - top,
            radius,
            radius,
            paint_attrs(paint)
        ));
    }

    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {}/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            line_attrs(paint)
        ));
    }

    fn dashed_line(&mut self, from: Point, to: Point, dash: f64, paint: &Paint) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {} stroke-dasharray="{:.1} {:.1}"/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            line_attrs(paint),
            dash,
            dash
        ));
    }

    fn polygon(&mut self, points: &[Point], paint: &Paint) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut d = format!("M{:.1},{:.1}", first.0, first.1);
        for (x, y) in rest {
            d.push_str(&format!(" L{x:.1},{y:.1}"));
        }
        d.push_str(" Z");
        self.elements
            .push(format!(r#"<path d="{}" {}/>"#, d, paint_attrs(paint)));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: TextAnchor, paint: &Paint) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        };
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            size,
            paint.color.hex(),
            anchor,
            escape(content)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::tile;

    #[test]
    fn polygon_closes_path() {
        let mut svg = SvgBuilder::new(10.0, 10.0);
        svg.polygon(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)], &Paint::fill(0xff004a80));
        let out = svg.build();
        assert!(out.contains(r#"d="M0.0,0.0 L5.0,0.0 L5.0,5.0 Z""#));
        assert!(out.contains(r##"fill="#004a80""##));
    }

    #[test]
    fn translucent_fill_gets_opacity() {
        let mut svg = SvgBuilder::new(10.0, 10.0);
        svg.rect(0.0, 0.0, 10.0, 10.0, &Paint::fill(0x11ffff00));
        let out = svg.build();
        assert!(out.contains("fill-opacity=\"0.067\""));
    }

    #[test]
    fn paged_output_has_one_viewport_per_tile() {
        let mut svg = SvgBuilder::new(100.0, 250.0);
        svg.text(1.0, 2.0, "a<b", 20.0, TextAnchor::End, &Paint::fill(0xffffffff));
        let plan = tile(250, 100, 100).unwrap();
        let out = svg.build_paged(&plan, Color(0xff080403));

        assert_eq!(out.matches("<use href=\"#layout\"/>").count(), 3);
        assert!(out.contains("a&lt;b"));
        assert!(out.contains(r#"viewBox="0 0 300 100""#));
        assert!(out.contains(r#"viewBox="0 -50 100 100""#));
        assert!(out.contains(r##"fill="#080403""##));
    }
}
