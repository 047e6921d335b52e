//! Drawing surface used by the renderer, and its SVG implementation

use std::fmt::Write;

use crate::geom::{Point, Rect, Size};

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Dash and gap lengths
    pub dash: Option<(f64, f64)>,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &'a str, width: f64, dash: f64, gap: f64) -> Self {
        Self {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

impl Anchor {
    fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
        }
    }
}

/// Text style. Text is vertically centered on its anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font_size: f64,
    pub color: &'a str,
    pub anchor: Anchor,
    pub bold: bool,
}

/// A drawing session, exclusively owned by one render
pub trait Canvas {
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn rect(&mut self, rect: Rect, stroke: &Stroke, fill: Option<&str>);

    /// Closed polygon through `points`
    fn polygon(&mut self, points: &[Point], stroke: Option<&Stroke>, fill: Option<&str>);

    /// Circular arc. Angles are in degrees, clockwise on screen from the +x axis.
    fn arc(&mut self, center: Point, radius: f64, start_deg: f64, end_deg: f64, stroke: &Stroke);

    fn text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// Canvas that writes an SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    svg: String,
    font_family: String,
}

impl SvgCanvas {
    /// Start a document of `size` filled with `background`
    pub fn new(size: Size, background: &str, font_family: &str) -> Self {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = size.width,
            h = size.height
        );
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
            w = size.width,
            h = size.height,
            fill = escape_xml(background)
        );
        Self {
            svg,
            font_family: escape_xml(font_family),
        }
    }

    /// Close the document and return it
    pub fn finish(mut self) -> String {
        self.svg.push_str("</svg>\n");
        self.svg
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"stroke="{c}" stroke-width="{w}""#,
        c = escape_xml(stroke.color),
        w = stroke.width
    );
    if let Some((dash, gap)) = stroke.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash},{gap}""#);
    }
    attrs
}

fn polar(center: Point, radius: f64, deg: f64) -> Point {
    let rad = deg.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let _ = writeln!(
            self.svg,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" {s}/>"#,
            x1 = from.x,
            y1 = from.y,
            x2 = to.x,
            y2 = to.y,
            s = stroke_attrs(stroke)
        );
    }

    fn rect(&mut self, rect: Rect, stroke: &Stroke, fill: Option<&str>) {
        let _ = writeln!(
            self.svg,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{f}" {s}/>"#,
            x = rect.min.x,
            y = rect.min.y,
            w = rect.width(),
            h = rect.height(),
            f = escape_xml(fill.unwrap_or("none")),
            s = stroke_attrs(stroke)
        );
    }

    fn polygon(&mut self, points: &[Point], stroke: Option<&Stroke>, fill: Option<&str>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = format!("M {} {}", first.x, first.y);
        for p in rest {
            let _ = write!(path, " L {} {}", p.x, p.y);
        }
        path.push_str(" Z");

        let _ = writeln!(
            self.svg,
            r#"<path d="{path}" fill="{f}" {s}/>"#,
            f = escape_xml(fill.unwrap_or("none")),
            s = stroke.map_or_else(|| r#"stroke="none""#.to_string(), stroke_attrs)
        );
    }

    fn arc(&mut self, center: Point, radius: f64, start_deg: f64, end_deg: f64, stroke: &Stroke) {
        let from = polar(center, radius, start_deg);
        let to = polar(center, radius, end_deg);
        let large = u8::from((end_deg - start_deg).abs() > 180.0);
        let sweep = u8::from(end_deg > start_deg);
        let _ = writeln!(
            self.svg,
            r#"<path d="M {x0} {y0} A {r} {r} 0 {large} {sweep} {x1} {y1}" fill="none" {s}/>"#,
            x0 = from.x,
            y0 = from.y,
            r = radius,
            x1 = to.x,
            y1 = to.y,
            s = stroke_attrs(stroke)
        );
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let _ = writeln!(
            self.svg,
            r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="{c}" text-anchor="{a}" dominant-baseline="central"{weight}>{t}</text>"#,
            x = at.x,
            y = at.y,
            family = self.font_family,
            size = style.font_size,
            c = escape_xml(style.color),
            a = style.anchor.as_svg(),
            t = escape_xml(text)
        );
    }
}

/// Escape text for use in SVG content and attributes
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
