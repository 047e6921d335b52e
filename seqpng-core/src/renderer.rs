//! Draws a laid-out diagram onto a [`Canvas`]

use crate::ast::{EventKind, LineStyle};
use crate::canvas::{Anchor, Canvas, Stroke, SvgCanvas, TextStyle};
use crate::config::Config;
use crate::diagram::{Block, Diagram, Event};
use crate::geom::{Point, Rect};

const LINE_WIDTH: f64 = 1.0;
const LIFELINE_DASH: (f64, f64) = (5.0, 5.0);
const MESSAGE_DASH: (f64, f64) = (5.0, 5.0);

/// Render a laid-out diagram to an SVG document
pub fn render_svg(diagram: &Diagram, config: &Config) -> String {
    let mut canvas = SvgCanvas::new(
        diagram.layout().canvas,
        &config.colors.background,
        &config.font_family,
    );
    render(diagram, config, &mut canvas);
    canvas.finish()
}

/// Draw a laid-out diagram.
///
/// Order is fixed: actors and lifelines, activation bars, messages and notes, block frames.
pub fn render(diagram: &Diagram, config: &Config, canvas: &mut dyn Canvas) {
    for actor in diagram.actors() {
        render_actor(diagram, config, canvas, actor.bounds, &actor.name);
    }

    let colors = &config.colors;
    for activation in diagram.activations() {
        canvas.rect(
            activation.bounds,
            &Stroke::solid(&colors.activation_stroke, LINE_WIDTH),
            Some(&colors.activation_fill),
        );
    }

    for event in diagram.events() {
        match event.kind {
            EventKind::Message
            | EventKind::DashedMessage
            | EventKind::ActivationStart
            | EventKind::ActivationEnd
            | EventKind::DashedActivationStart
            | EventKind::DashedActivationEnd => {
                if event.is_self_message() {
                    render_self_message(diagram, config, canvas, event);
                } else {
                    render_message(diagram, config, canvas, event);
                }
            }
            EventKind::NoteOver | EventKind::NoteLeft | EventKind::NoteRight => {
                render_note(config, canvas, event);
            }
            // frames are drawn from the resolved blocks
            EventKind::BlockStart(_) | EventKind::BlockEnd => {}
        }
    }

    for block in diagram.blocks() {
        render_block(config, canvas, block);
    }
}

/// Top label, bottom label and the dashed lifeline between them
fn render_actor(diagram: &Diagram, config: &Config, canvas: &mut dyn Canvas, top: Rect, name: &str) {
    let colors = &config.colors;
    let terminal_y = diagram.layout().terminal_y;
    let bottom = top.offset(0.0, terminal_y);
    let label = TextStyle {
        font_size: config.actor_font_size,
        color: &colors.actor_text,
        anchor: Anchor::Middle,
        bold: false,
    };

    for rect in [top, bottom] {
        canvas.rect(
            rect,
            &Stroke::solid(&colors.actor_stroke, LINE_WIDTH),
            Some(&colors.background),
        );
        canvas.text(name, Point::new(rect.mid_x(), rect.mid_y()), &label);
    }

    let (dash, gap) = LIFELINE_DASH;
    canvas.line(
        Point::new(top.mid_x(), top.max.y),
        Point::new(top.mid_x(), terminal_y),
        &Stroke::dashed(&colors.lifeline, LINE_WIDTH, dash, gap),
    );
}

fn message_stroke(config: &Config, kind: EventKind) -> Stroke<'_> {
    let color = &config.colors.message_line;
    match kind.line_style() {
        LineStyle::Solid => Stroke::solid(color, LINE_WIDTH),
        LineStyle::Dashed => Stroke::dashed(color, LINE_WIDTH, MESSAGE_DASH.0, MESSAGE_DASH.1),
    }
}

/// Arrowhead with its tip at `tip`, pointing right when `rightward`
fn arrow_head(tip: Point, rightward: bool, config: &Config) -> [Point; 3] {
    let base_x = if rightward {
        tip.x - config.arrow_width
    } else {
        tip.x + config.arrow_width
    };
    let half = config.arrow_height / 2.0;
    [
        tip,
        Point::new(base_x, tip.y - half),
        Point::new(base_x, tip.y + half),
    ]
}

fn message_text_style(config: &Config) -> TextStyle<'_> {
    TextStyle {
        font_size: config.message_font_size,
        color: &config.colors.message_text,
        anchor: Anchor::Middle,
        bold: false,
    }
}

/// Height of the text part of a message box
fn message_text_height(event: &Event, config: &Config) -> f64 {
    let mut h = event.bounds.height() - config.text_padding_y * 2.0;
    if event.is_self_message() {
        h -= config.self_diameter;
    }
    h.max(0.0)
}

fn render_message(diagram: &Diagram, config: &Config, canvas: &mut dyn Canvas, event: &Event) {
    let (Some(source), Some(destination)) = (event.source, event.destination) else {
        return;
    };
    let y = event.bounds.mid_y();
    let mut x1 = diagram.actor(source).bounds.mid_x();
    let mut x2 = diagram.actor(destination).bounds.mid_x();
    let reverse = x1 > x2;

    // endpoints stop at the edge of an active bar
    if let Some(bar) = diagram.activation_at(source, event.id) {
        x1 = if reverse { bar.bounds.min.x } else { bar.bounds.max.x };
    }
    if let Some(bar) = diagram.activation_at(destination, event.id) {
        x2 = if reverse { bar.bounds.max.x } else { bar.bounds.min.x };
    }

    canvas.line(
        Point::new(x1, y),
        Point::new(x2, y),
        &message_stroke(config, event.kind),
    );
    canvas.polygon(
        &arrow_head(Point::new(x2, y), !reverse, config),
        None,
        Some(&config.colors.arrow_head),
    );

    let text_height = message_text_height(event, config);
    canvas.text(
        &event.text,
        Point::new(
            (x1 + x2) / 2.0,
            y - text_height / 2.0 - config.text_padding_y / 2.0,
        ),
        &message_text_style(config),
    );
}

/// Line out, half-circle back, return line and an arrowhead pointing at the lifeline
fn render_self_message(diagram: &Diagram, config: &Config, canvas: &mut dyn Canvas, event: &Event) {
    let Some(actor) = event.source else {
        return;
    };
    let x1 = diagram
        .activation_at(actor, event.id)
        .map_or(diagram.actor(actor).bounds.mid_x(), |bar| bar.bounds.max.x);
    let x2 = x1 + event.bounds.width() / 2.0;
    let radius = config.self_diameter / 2.0;
    let top = event.bounds.max.y - config.self_diameter;
    let bottom = event.bounds.max.y;
    let stroke = message_stroke(config, event.kind);

    canvas.line(Point::new(x1, top), Point::new(x2, top), &stroke);
    canvas.arc(Point::new(x2, top + radius), radius, -90.0, 90.0, &stroke);
    canvas.line(Point::new(x2, bottom), Point::new(x1, bottom), &stroke);
    canvas.polygon(
        &arrow_head(Point::new(x1, bottom), false, config),
        None,
        Some(&config.colors.arrow_head),
    );

    let text_height = message_text_height(event, config);
    canvas.text(
        &event.text,
        Point::new(x2, event.bounds.min.y + config.text_padding_y + text_height / 2.0),
        &message_text_style(config),
    );
}

/// Box with a folded top-right corner
fn render_note(config: &Config, canvas: &mut dyn Canvas, event: &Event) {
    let colors = &config.colors;
    let r = event.bounds;
    let fold = config.fold_size.min(r.width() / 2.0).min(r.height() / 2.0);
    let stroke = Stroke::solid(&colors.note_stroke, LINE_WIDTH);

    canvas.polygon(
        &[
            r.min,
            Point::new(r.max.x - fold, r.min.y),
            Point::new(r.max.x, r.min.y + fold),
            r.max,
            Point::new(r.min.x, r.max.y),
        ],
        Some(&stroke),
        Some(&colors.note_fill),
    );
    canvas.polygon(
        &[
            Point::new(r.max.x - fold, r.min.y),
            Point::new(r.max.x - fold, r.min.y + fold),
            Point::new(r.max.x, r.min.y + fold),
        ],
        Some(&stroke),
        Some(&colors.note_fill),
    );
    canvas.text(
        &event.text,
        Point::new(r.mid_x(), r.mid_y()),
        &message_text_style(config),
    );
}

/// Frame, keyword tab at the top-left corner, label lines below the tab
fn render_block(config: &Config, canvas: &mut dyn Canvas, block: &Block) {
    let colors = &config.colors;
    let frame = block.bounds;
    let stroke = Stroke::solid(&colors.group_line, LINE_WIDTH);
    canvas.rect(frame, &stroke, None);

    let tab_w = block.tab_width.min(frame.width());
    let tab_h = config.group_tab_height.min(frame.height());
    let notch = config.fold_size.min(tab_w).min(tab_h);
    let (x, y) = (frame.min.x, frame.min.y);
    canvas.polygon(
        &[
            Point::new(x, y),
            Point::new(x + tab_w, y),
            Point::new(x + tab_w, y + tab_h - notch),
            Point::new(x + tab_w - notch, y + tab_h),
            Point::new(x, y + tab_h),
        ],
        Some(&stroke),
        Some(&colors.group_fill),
    );

    let label = TextStyle {
        font_size: config.message_font_size,
        color: &colors.group_text,
        anchor: Anchor::Start,
        bold: true,
    };
    canvas.text(
        block.kind.as_str(),
        Point::new(x + config.text_padding_x / 2.0, y + tab_h / 2.0),
        &label,
    );

    let line_height = if block.label_lines.is_empty() {
        0.0
    } else {
        ((block.header_height - tab_h
            - config.line_spacing * (block.label_lines.len() - 1) as f64)
            / block.label_lines.len() as f64)
            .max(0.0)
    };
    let text = TextStyle {
        bold: false,
        ..label
    };
    for (i, line) in block.label_lines.iter().enumerate() {
        let line_y = y + tab_h + i as f64 * (line_height + config.line_spacing) + line_height / 2.0;
        canvas.text(line, Point::new(x + config.text_padding_x, line_y), &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::metrics::FixedMetrics;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Line {
            from: Point,
            to: Point,
            color: String,
            dashed: bool,
        },
        Rect {
            rect: Rect,
            color: String,
        },
        Polygon {
            points: Vec<Point>,
            stroked: bool,
            fill: Option<String>,
        },
        Arc {
            center: Point,
            radius: f64,
        },
        Text {
            text: String,
            at: Point,
        },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
            self.ops.push(Op::Line {
                from,
                to,
                color: stroke.color.to_string(),
                dashed: stroke.dash.is_some(),
            });
        }

        fn rect(&mut self, rect: Rect, stroke: &Stroke, _fill: Option<&str>) {
            self.ops.push(Op::Rect {
                rect,
                color: stroke.color.to_string(),
            });
        }

        fn polygon(&mut self, points: &[Point], stroke: Option<&Stroke>, fill: Option<&str>) {
            self.ops.push(Op::Polygon {
                points: points.to_vec(),
                stroked: stroke.is_some(),
                fill: fill.map(str::to_string),
            });
        }

        fn arc(&mut self, center: Point, radius: f64, _start: f64, _end: f64, _stroke: &Stroke) {
            self.ops.push(Op::Arc { center, radius });
        }

        fn text(&mut self, text: &str, at: Point, _style: &TextStyle) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                at,
            });
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.colors.actor_stroke = "#111111".into();
        config.colors.activation_stroke = "#222222".into();
        config.colors.message_line = "#333333".into();
        config.colors.group_line = "#444444".into();
        config.colors.arrow_head = "#555555".into();
        config
    }

    fn draw(input: &str) -> (Diagram, Vec<Op>) {
        let config = config();
        let mut diagram = Diagram::parse(input).unwrap();
        layout(&mut diagram, &config, &FixedMetrics::default());
        let mut canvas = RecordingCanvas::default();
        render(&diagram, &config, &mut canvas);
        (diagram, canvas.ops)
    }

    fn arrow_heads(ops: &[Op]) -> Vec<Vec<Point>> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Polygon {
                    points,
                    fill: Some(fill),
                    ..
                } if fill == "#555555" => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    fn message_lines(ops: &[Op]) -> Vec<(Point, Point, bool)> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Line {
                    from,
                    to,
                    color,
                    dashed,
                } if color == "#333333" => Some((*from, *to, *dashed)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_arrow_points_at_destination() {
        let (d, ops) = draw("A->B: right\nB->A: left");
        let a = d.actors()[0].bounds.mid_x();
        let b = d.actors()[1].bounds.mid_x();
        let heads = arrow_heads(&ops);
        assert_eq!(heads.len(), 2);

        // tip first, base behind it
        assert_eq!(heads[0][0].x, b);
        assert!(heads[0][1].x < b);
        assert_eq!(heads[1][0].x, a);
        assert!(heads[1][1].x > a);
    }

    #[test]
    fn test_dashed_line_solid_head() {
        let (_, ops) = draw("A-->B: dashed\nA->B: solid");
        let lines = message_lines(&ops);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].2);
        assert!(!lines[1].2);
        assert!(ops.iter().any(|op| matches!(
            op,
            Op::Polygon { stroked: false, fill: Some(f), .. } if f == "#555555"
        )));
    }

    #[test]
    fn test_endpoints_attach_to_activation_bar() {
        let (d, ops) = draw("A->+B: go\nB->-A: done");
        let bar = d.activations()[0].bounds;
        let lines = message_lines(&ops);
        // A -> B stops at the bar's left edge
        assert_eq!(lines[0].1.x, bar.min.x);
        // B -> A leaves from the same edge
        assert_eq!(lines[1].0.x, bar.min.x);
    }

    #[test]
    fn test_self_message_shape() {
        let config = config();
        let (d, ops) = draw("A->A: think");
        let event = &d.events()[0];
        let x1 = d.actors()[0].bounds.mid_x();

        let lines = message_lines(&ops);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0.x, x1);
        assert_eq!(lines[1].0.y - lines[0].0.y, config.self_diameter);

        let arc = ops
            .iter()
            .find_map(|op| match op {
                Op::Arc { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .unwrap();
        assert_eq!(arc.1, config.self_diameter / 2.0);
        assert_eq!(arc.0.x, x1 + event.bounds.width() / 2.0);

        let heads = arrow_heads(&ops);
        assert_eq!(heads[0][0].x, x1);
        assert!(heads[0][1].x > x1);

        let label = ops
            .iter()
            .find_map(|op| match op {
                Op::Text { text, at } if text == "think" => Some(*at),
                _ => None,
            })
            .unwrap();
        assert!(label.y < lines[0].0.y);
    }

    #[test]
    fn test_draw_order() {
        let (_, ops) = draw("A->+B: x\nloop again\nB->-A: y\nend");
        let first = |pred: &dyn Fn(&Op) -> bool| ops.iter().position(pred).unwrap();

        let actor = first(&|op| matches!(op, Op::Rect { color, .. } if color == "#111111"));
        let span = first(&|op| matches!(op, Op::Rect { color, .. } if color == "#222222"));
        let message = first(&|op| matches!(op, Op::Line { color, .. } if color == "#333333"));
        let block = first(&|op| matches!(op, Op::Rect { color, .. } if color == "#444444"));
        assert!(actor < span && span < message && message < block);

        let last_actor = ops
            .iter()
            .rposition(|op| matches!(op, Op::Rect { color, .. } if color == "#111111"))
            .unwrap();
        assert!(last_actor < span);
    }

    #[test]
    fn test_actor_rows_and_lifeline() {
        let (d, ops) = draw("A->B: x");
        let terminal = d.layout().terminal_y;
        let rects: Vec<Rect> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect { rect, color } if color == "#111111" => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[1], rects[0].offset(0.0, terminal));

        let lifeline = ops
            .iter()
            .find_map(|op| match op {
                Op::Line { from, to, dashed: true, color } if color != "#333333" => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        assert_eq!(lifeline.0.y, rects[0].max.y);
        assert_eq!(lifeline.1.y, terminal);
    }

    #[test]
    fn test_block_tab_and_label() {
        let (d, ops) = draw("alt the happy path\nA->B: x\nend");
        let frame = d.blocks()[0].bounds;
        let texts: Vec<(String, Point)> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, at } => Some((text.clone(), *at)),
                _ => None,
            })
            .collect();

        let keyword = texts.iter().find(|(t, _)| t == "alt").unwrap();
        assert!(keyword.1.x > frame.min.x && keyword.1.y > frame.min.y);
        let label = texts.iter().find(|(t, _)| t == "the happy path").unwrap();
        assert!(label.1.y > keyword.1.y);
        assert!(label.1.y < frame.min.y + d.blocks()[0].header_height);
    }

    #[test]
    fn test_notes_are_drawn() {
        let (_, ops) = draw("A->B: x\nnote over A, B: shared");
        assert!(ops.iter().any(|op| matches!(op, Op::Text { text, .. } if text == "shared")));
        let folded = ops
            .iter()
            .filter(|op| matches!(op, Op::Polygon { points, stroked: true, .. } if points.len() == 5))
            .count();
        assert_eq!(folded, 1);
    }

    #[test]
    fn test_render_svg_document() {
        let config = Config::default();
        let mut diagram = Diagram::parse("Alice->Bob: Hello <world>").unwrap();
        layout(&mut diagram, &config, &FixedMetrics::default());
        let svg = render_svg(&diagram, &config);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(&format!(
            r#"width="{}" height="{}""#,
            diagram.layout().canvas.width,
            diagram.layout().canvas.height
        )));
        assert!(svg.contains("Hello &lt;world&gt;"));
        assert_eq!(svg.matches(">Alice</text>").count(), 2);
        assert!(svg.contains(r#"font-family="DejaVu Sans, sans-serif""#));

        let mono = config.with_font_family("DejaVu Sans Mono");
        let svg = render_svg(&diagram, &mono);
        assert!(svg.contains(r#"font-family="DejaVu Sans Mono""#));
        assert!(!svg.contains("sans-serif"));
    }
}
