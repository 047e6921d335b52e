//! Multi-phase layout.
//!
//! Phases run in a fixed order, each over the whole diagram:
//!
//! 1. [`size_actors`]: measure actor labels, reset spacing
//! 2. [`place_events`]: measure events, stack them vertically, widen actor gaps
//! 3. [`place_actors`]: fix actor X positions, anchor event boxes horizontally
//! 4. [`place_activations`]: position activation bars
//! 5. [`resolve_blocks`]: compute `alt` / `loop` frames, inner first
//! 6. [`size_canvas`]: final image size
//!
//! Every phase is public so it can be exercised on its own; [`layout`] runs them all.

use crate::ast::{BlockKind, EventKind};
use crate::config::Config;
use crate::diagram::{Actor, ActorId, Diagram, Event};
use crate::geom::{Rect, Size};
use crate::metrics::TextMetrics;

/// Run every layout phase in order
pub fn layout(diagram: &mut Diagram, config: &Config, metrics: &dyn TextMetrics) {
    let _span = tracing::debug_span!("layout").entered();

    size_actors(diagram, config, metrics);
    place_events(diagram, config, metrics);
    place_actors(diagram, config);
    place_activations(diagram, config);
    resolve_blocks(diagram, config, metrics);
    size_canvas(diagram, config);
}

/// Measure every actor label and reset the minimum gaps
pub fn size_actors(diagram: &mut Diagram, config: &Config, metrics: &dyn TextMetrics) {
    let mut header: f64 = 0.0;

    for (i, actor) in diagram.actors.iter_mut().enumerate() {
        let text = metrics.measure(&actor.name, config.actor_font_size);
        actor.bounds = Rect::from_size(Size::new(
            text.width + config.text_padding_x * 2.0,
            text.height + config.text_padding_y * 2.0,
        ));
        header = header.max(actor.bounds.height());
        actor.delta = if i == 0 { 0.0 } else { config.min_padding_x };
    }

    diagram.layout.header_height = header;
    tracing::debug!(actors = diagram.actors.len(), header, "actors sized");
}

/// Wrapped block label and the header band it needs
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLabel {
    pub lines: Vec<String>,
    /// Keyword tab width
    pub tab_width: f64,
    /// Width the frame needs to show the tab and every label line
    pub width: f64,
    pub header_height: f64,
}

/// Lay out the keyword tab and wrapped label of a block
pub fn block_label(
    kind: BlockKind,
    text: &str,
    config: &Config,
    metrics: &dyn TextMetrics,
) -> BlockLabel {
    let font = config.message_font_size;
    let tab_width =
        metrics.measure(kind.as_str(), font).width + config.text_padding_x + config.fold_size;

    let lines = metrics.wrap(text, font, config.group_max_width);
    let widest = lines
        .iter()
        .map(|l| metrics.measure(l, font).width)
        .fold(0.0, f64::max);
    let text_height = text_block_height(lines.len(), config, metrics);

    BlockLabel {
        tab_width,
        width: tab_width.max(widest + config.text_padding_x * 2.0),
        header_height: config
            .group_base_height
            .max(config.group_tab_height + text_height),
        lines,
    }
}

/// Height of `count` wrapped lines including the spacing between them
pub(crate) fn text_block_height(count: usize, config: &Config, metrics: &dyn TextMetrics) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let line = metrics.line_height(config.message_font_size);
    count as f64 * line + (count - 1) as f64 * config.line_spacing
}

/// Unplaced size of an event, dispatched on its kind
pub fn measure_event(event: &Event, config: &Config, metrics: &dyn TextMetrics) -> Size {
    let font = config.message_font_size;
    match event.kind {
        EventKind::Message
        | EventKind::DashedMessage
        | EventKind::ActivationStart
        | EventKind::ActivationEnd
        | EventKind::DashedActivationStart
        | EventKind::DashedActivationEnd => {
            let text = metrics.measure(&event.text, font);
            let mut height = text.height + config.text_padding_y * 2.0;
            if event.is_self_message() {
                height += config.self_diameter;
            }
            Size::new(
                text.width + config.text_padding_x * 2.0 + config.arrow_width,
                height,
            )
        }
        EventKind::NoteOver | EventKind::NoteLeft | EventKind::NoteRight => {
            let text = metrics.measure(&event.text, font);
            Size::new(
                text.width + config.text_padding_x * 2.0,
                text.height + config.text_padding_y * 2.0,
            )
        }
        EventKind::BlockStart(kind) => {
            let label = block_label(kind, &event.text, config, metrics);
            Size::new(label.width, label.header_height)
        }
        EventKind::BlockEnd => Size::new(0.0, config.group_base_height),
    }
}

/// Measure events, stack them top to bottom and widen actor gaps to fit messages
pub fn place_events(diagram: &mut Diagram, config: &Config, metrics: &dyn TextMetrics) {
    let mut y = diagram.layout.header_height + config.min_padding_y;

    for i in 0..diagram.events.len() {
        let size = measure_event(&diagram.events[i], config, metrics);
        let event = &mut diagram.events[i];
        event.bounds = Rect::from_size(size).offset(0.0, y);
        y += size.height + config.min_padding_y;

        if let Some((lo, hi)) = widening_range(event, diagram.actors.len()) {
            widen(&mut diagram.actors, lo, hi, size.width);
        }
    }

    diagram.layout.terminal_y = y;
    tracing::debug!(
        events = diagram.events.len(),
        terminal_y = y,
        "events placed"
    );
}

/// Gap range a message must fit in, as actor indices `lo < hi`
fn widening_range(event: &Event, actor_count: usize) -> Option<(usize, usize)> {
    if !event.kind.is_message() {
        return None;
    }
    if let Some((s, d)) = event.actor_pair() {
        return Some((s.0.min(d.0), s.0.max(d.0)));
    }
    // self-messages take the gap to the next actor, when there is one
    let s = event.source?.0;
    (s + 1 < actor_count).then_some((s, s + 1))
}

/// Make sure the gaps between actors `lo` and `hi` add up to at least `width`.
///
/// When they do not, every gap below the even share is raised to it.
/// Gaps never shrink.
pub fn widen(actors: &mut [Actor], lo: usize, hi: usize, width: f64) {
    if hi <= lo || hi >= actors.len() {
        return;
    }
    let gaps = &mut actors[lo + 1..=hi];
    let total: f64 = gaps.iter().map(|a| a.delta).sum();
    if total >= width {
        return;
    }

    let share = width / (hi - lo) as f64;
    for actor in gaps.iter_mut() {
        if actor.delta < share {
            actor.delta = share;
        }
    }
}

/// Place actors left to right, then anchor event boxes to their actors
pub fn place_actors(diagram: &mut Diagram, config: &Config) {
    let mut prev: Option<Rect> = None;
    for actor in diagram.actors.iter_mut() {
        let width = actor.bounds.width();
        let x = match prev {
            None => config.min_padding_x,
            Some(p) => {
                let gap = actor
                    .delta
                    .max(p.width() / 2.0 + width / 2.0 + config.min_padding_x);
                p.mid_x() + gap - width / 2.0
            }
        };
        actor.bounds = actor.bounds.with_min_x(x);
        prev = Some(actor.bounds);
    }

    let centers: Vec<f64> = diagram.actors.iter().map(|a| a.bounds.mid_x()).collect();
    for event in diagram.events.iter_mut() {
        event.bounds = anchor_event(event, &centers, config);
    }

    tracing::debug!(
        right = prev.map_or(0.0, |r| r.max.x),
        "actors placed"
    );
}

fn anchor_event(event: &Event, centers: &[f64], config: &Config) -> Rect {
    let b = event.bounds;
    let w = b.width();
    let center = |id: Option<ActorId>| id.map_or(0.0, |id| centers[id.0]);

    match event.kind {
        EventKind::Message
        | EventKind::DashedMessage
        | EventKind::ActivationStart
        | EventKind::ActivationEnd
        | EventKind::DashedActivationStart
        | EventKind::DashedActivationEnd => {
            if event.is_self_message() {
                b.with_min_x(center(event.source))
            } else {
                let mid = (center(event.source) + center(event.destination)) / 2.0;
                b.with_min_x(mid - w / 2.0)
            }
        }
        EventKind::NoteOver => {
            let (lo, hi) = event
                .note_actors
                .iter()
                .map(|a| centers[a.0])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                    (lo.min(x), hi.max(x))
                });
            if lo > hi {
                return b.with_min_x(config.min_padding_x);
            }
            let mid = (lo + hi) / 2.0;
            let half = w.max(hi - lo) / 2.0;
            Rect::new(mid - half, b.min.y, mid + half, b.max.y)
        }
        EventKind::NoteLeft => b.with_min_x(center(event.source) - config.note_gap - w),
        EventKind::NoteRight => b.with_min_x(center(event.source) + config.note_gap),
        EventKind::BlockStart(_) | EventKind::BlockEnd => b.with_min_x(config.min_padding_x),
    }
}

/// Position activation bars beside their lifelines
pub fn place_activations(diagram: &mut Diagram, config: &Config) {
    let width = config.activation_width;

    // parents are always created before their children
    for i in 0..diagram.activations.len() {
        let act = &diagram.activations[i];
        let x = match act.parent {
            Some(parent) => diagram.activations[parent.0].bounds.min.x + width / 2.0,
            None => diagram.actors[act.actor.0].bounds.mid_x() - width / 2.0,
        };
        let top = diagram.events[act.start.0].bounds.mid_y();
        let bottom = act
            .end
            .map_or(diagram.layout.terminal_y, |e| diagram.events[e.0].bounds.mid_y());

        diagram.activations[i].bounds = Rect::new(x, top, x + width, bottom);
    }
}

/// Running min/max along one axis
#[derive(Debug, Clone, Copy, Default)]
struct Extent(Option<(f64, f64)>);

impl Extent {
    fn include(&mut self, lo: f64, hi: f64) {
        self.0 = Some(match self.0 {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        });
    }
}

/// Compute block frames, innermost first
pub fn resolve_blocks(diagram: &mut Diagram, config: &Config, metrics: &dyn TextMetrics) {
    let pad = config.group_padding;

    for bi in 0..diagram.blocks.len() {
        let block = &diagram.blocks[bi];
        let events = &diagram.events[block.start.0..block.end.0];

        let mut xs = Extent::default();
        let mut ys = Extent::default();
        let mut referenced: Option<(usize, usize)> = None;

        for event in events {
            ys.include(event.bounds.min.y, event.bounds.max.y);
            if !event.kind.is_block_marker() {
                xs.include(event.bounds.min.x, event.bounds.max.x);
            }
            for actor in event.referenced_actors() {
                referenced = Some(match referenced {
                    Some((lo, hi)) => (lo.min(actor.0), hi.max(actor.0)),
                    None => (actor.0, actor.0),
                });
            }
        }

        let span = referenced.or_else(|| {
            (!diagram.actors.is_empty()).then(|| (0, diagram.actors.len() - 1))
        });
        if let Some((lo, hi)) = span {
            xs.include(
                diagram.actors[lo].bounds.min.x,
                diagram.actors[hi].bounds.max.x,
            );
        }

        let marker = diagram.events[block.start.0].bounds;
        let (x0, x1) = xs.0.unwrap_or((marker.min.x, marker.max.x));
        let (y0, y1) = ys.0.unwrap_or((marker.min.y, marker.max.y));
        let mut frame = Rect::new(x0 - pad, y0 - pad, x1 + pad, y1 + pad);

        for inner in &diagram.blocks[..bi] {
            if inner.start > block.start && inner.end < block.end {
                frame = frame.union(&inner.bounds.inflate(config.block_margin));
            }
        }

        let label = block_label(block.kind, &block.text, config, metrics);
        if frame.height() < label.header_height + pad {
            frame.max.y = frame.min.y + label.header_height + pad;
        }
        if frame.width() < label.width {
            frame.max.x = frame.min.x + label.width;
        }

        let block = &mut diagram.blocks[bi];
        block.bounds = frame;
        block.header_height = label.header_height;
        block.tab_width = label.tab_width;
        block.label_lines = label.lines;
    }

    tracing::debug!(blocks = diagram.blocks.len(), "blocks resolved");
}

/// Size the canvas to fit every actor, event and block frame.
///
/// Left notes and deeply nested frames can start left of the first actor; the
/// whole diagram is first shifted right so nothing sits closer than
/// `group_padding` to the left edge.
pub fn size_canvas(diagram: &mut Diagram, config: &Config) {
    let left = diagram
        .actors
        .iter()
        .map(|a| a.bounds.min.x)
        .chain(diagram.events.iter().map(|e| e.bounds.min.x))
        .chain(diagram.blocks.iter().map(|b| b.bounds.min.x))
        .fold(f64::INFINITY, f64::min);
    if left < config.group_padding {
        shift_right(diagram, config.group_padding - left);
    }

    let last = diagram.actors.last().map(|a| a.bounds);
    let actor_height = last.map_or(diagram.layout.header_height, |r| r.height());

    let mut width = last.map_or(config.min_padding_x * 2.0, |r| r.max.x + config.min_padding_x);
    let mut height = diagram.layout.terminal_y + actor_height * 2.0;

    // notes and self-messages can reach past the last actor
    let overhang = diagram
        .blocks
        .iter()
        .map(|b| b.bounds)
        .chain(diagram.events.iter().map(|e| e.bounds));
    for r in overhang {
        width = width.max(r.max.x + config.group_padding);
        height = height.max(r.max.y + config.group_padding);
    }

    diagram.layout.canvas = Size::new(width.ceil(), height.ceil());
    tracing::debug!(
        width = diagram.layout.canvas.width,
        height = diagram.layout.canvas.height,
        "canvas sized"
    );
}

/// Move every placed box `dx` to the right
fn shift_right(diagram: &mut Diagram, dx: f64) {
    for actor in diagram.actors.iter_mut() {
        actor.bounds = actor.bounds.offset(dx, 0.0);
    }
    for event in diagram.events.iter_mut() {
        event.bounds = event.bounds.offset(dx, 0.0);
    }
    for activation in diagram.activations.iter_mut() {
        activation.bounds = activation.bounds.offset(dx, 0.0);
    }
    for block in diagram.blocks.iter_mut() {
        block.bounds = block.bounds.offset(dx, 0.0);
    }
    tracing::debug!(dx, "diagram shifted right");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{ActivationId, EventId};
    use crate::metrics::{EstimatedMetrics, FixedMetrics};
    use pretty_assertions::assert_eq;

    const METRICS: FixedMetrics = FixedMetrics::new(8.0, 16.0);

    fn laid_out(input: &str) -> Diagram {
        let mut d = Diagram::parse(input).unwrap();
        layout(&mut d, &Config::default(), &METRICS);
        d
    }

    #[test]
    fn test_actor_box_height_is_line_plus_padding() {
        let config = Config::default();
        let mut d = Diagram::parse("A->Bob: x\nBob->C: y").unwrap();
        size_actors(&mut d, &config, &METRICS);
        for actor in d.actors() {
            assert_eq!(actor.bounds.height(), 16.0 + config.text_padding_y * 2.0);
        }
        assert_eq!(d.actor(ActorId(0)).bounds.width(), 8.0 + 30.0);
        assert_eq!(d.actor(ActorId(1)).bounds.width(), 24.0 + 30.0);
        assert_eq!(d.layout().header_height, 26.0);
        assert_eq!(d.actor(ActorId(0)).delta, 0.0);
        assert_eq!(d.actor(ActorId(1)).delta, config.min_padding_x);
    }

    #[test]
    fn test_larger_fonts_grow_boxes() {
        let measure = |config: &Config| {
            let mut d = Diagram::parse("Alice->Bob: hello").unwrap();
            layout(&mut d, config, &EstimatedMetrics);
            (d.actor(ActorId(0)).bounds, d.events()[0].bounds)
        };
        let (actor, message) = measure(&Config::default());
        let (big_actor, big_message) = measure(&Config::default().with_font_sizes(28.0, 24.0));

        assert!(big_actor.width() > actor.width());
        assert!(big_actor.height() > actor.height());
        assert!(big_message.width() > message.width());
    }

    #[test]
    fn test_simple_exchange_geometry() {
        let d = laid_out("A->B:Hello\nB->A:World");

        // text 40 + padding 30 + arrow 20
        assert_eq!(d.events()[0].bounds, Rect::new(49.0, 51.0, 139.0, 77.0));
        assert_eq!(d.events()[1].bounds.min.y, 102.0);
        assert_eq!(d.actor(ActorId(1)).delta, 90.0);
        assert_eq!(d.actor(ActorId(0)).bounds, Rect::new(30.0, 0.0, 68.0, 26.0));
        assert_eq!(d.actor(ActorId(1)).bounds, Rect::new(120.0, 0.0, 158.0, 26.0));
        assert_eq!(d.layout().terminal_y, 153.0);
        assert_eq!(d.layout().canvas, Size::new(188.0, 205.0));
    }

    #[test]
    fn test_self_message_is_taller_by_diameter() {
        let config = Config::default();
        let pair = laid_out("a->b:loop");
        let own = laid_out("a->a:loop");
        assert_eq!(
            own.events()[0].bounds.height(),
            pair.events()[0].bounds.height() + config.self_diameter
        );
        // anchored at the lifeline
        assert_eq!(own.events()[0].bounds.min.x, own.actor(ActorId(0)).bounds.mid_x());
    }

    #[test]
    fn test_self_message_reserves_gap_to_next_actor() {
        let d = laid_out("A->B: x\nA->A: a much longer self message");
        let width = d.events()[1].bounds.width();
        assert!(d.actor(ActorId(1)).delta >= width);
    }

    #[test]
    fn test_widen_shares_evenly_and_never_shrinks() {
        let mut d = Diagram::parse("A->B: x\nB->C: y\nC->D: z").unwrap();
        size_actors(&mut d, &Config::default(), &METRICS);
        d.actors[2].delta = 200.0;

        widen(&mut d.actors, 0, 3, 300.0);
        let deltas: Vec<f64> = d.actors().iter().map(|a| a.delta).collect();
        // 30 + 200 + 30 < 300, share is 100
        assert_eq!(deltas, vec![0.0, 100.0, 200.0, 100.0]);

        widen(&mut d.actors, 0, 3, 300.0);
        let again: Vec<f64> = d.actors().iter().map(|a| a.delta).collect();
        assert_eq!(deltas, again);

        widen(&mut d.actors, 1, 2, 50.0);
        assert_eq!(d.actor(ActorId(2)).delta, 200.0);
    }

    #[test]
    fn test_widen_is_direction_independent() {
        let forward = laid_out("A->B: x\nB->C: y\nA->C: a rather long message");
        let backward = laid_out("A->B: x\nB->C: y\nC->A: a rather long message");
        let deltas = |d: &Diagram| d.actors().iter().map(|a| a.delta).collect::<Vec<_>>();
        assert_eq!(deltas(&forward), deltas(&backward));
    }

    #[test]
    fn test_place_events_is_idempotent() {
        let config = Config::default();
        let mut d = Diagram::parse("A->B: hello there\nB->C: hi\nA->C: across everything").unwrap();
        size_actors(&mut d, &config, &METRICS);
        place_events(&mut d, &config, &METRICS);
        let first: Vec<f64> = d.actors().iter().map(|a| a.delta).collect();
        place_events(&mut d, &config, &METRICS);
        let second: Vec<f64> = d.actors().iter().map(|a| a.delta).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_actors_never_overlap() {
        let d = laid_out("Alexander->B: x\nB->Christopher: y");
        for pair in d.actors().windows(2) {
            assert!(pair[1].bounds.min.x - pair[0].bounds.max.x >= 30.0);
        }
    }

    #[test]
    fn test_notes_anchor_to_lifelines() {
        let config = Config::default();
        let d = laid_out("A->B: message\nnote left of B: l\nnote right of A: r\nnote over A, B: o");
        let a = d.actor(ActorId(0)).bounds.mid_x();
        let b = d.actor(ActorId(1)).bounds.mid_x();

        assert_eq!(d.events()[1].bounds.max.x, b - config.note_gap);
        assert_eq!(d.events()[2].bounds.min.x, a + config.note_gap);
        let over = d.events()[3].bounds;
        assert!(over.min.x <= a && over.max.x >= b);
        assert_eq!(over.mid_x(), (a + b) / 2.0);
    }

    #[test]
    fn test_activation_bars() {
        let config = Config::default();
        let d = laid_out("A->+B: one\nA->+B: two\nB->-A: back\nA->B: four");
        let b = d.actor(ActorId(1)).bounds.mid_x();

        let outer = d.activation(ActivationId(0)).bounds;
        let inner = d.activation(ActivationId(1)).bounds;
        assert_eq!(outer.min.x, b - config.activation_width / 2.0);
        assert_eq!(inner.min.x, outer.min.x + config.activation_width / 2.0);
        assert_eq!(inner.width(), config.activation_width);
        assert_eq!(inner.min.y, d.event(EventId(1)).bounds.mid_y());
        assert_eq!(inner.max.y, d.event(EventId(2)).bounds.mid_y());
        // never closed
        assert_eq!(outer.max.y, d.layout().terminal_y);
    }

    #[test]
    fn test_block_covers_referenced_actors() {
        let d = laid_out("A->B: x\nloop again\nB->C: y\nnote over D: z\nend\nC->E: w");
        let frame = d.blocks()[0].bounds;
        for name in ["B", "C", "D"] {
            let actor = d.actor(d.actor_id(name).unwrap()).bounds;
            assert!(frame.min.x <= actor.min.x, "{name}");
            assert!(frame.max.x >= actor.max.x, "{name}");
        }
        let inside = d.event(EventId(2)).bounds;
        assert!(frame.min.y < inside.min.y && frame.max.y > inside.max.y);
    }

    #[test]
    fn test_nested_blocks_contain_inner_frames() {
        let config = Config::default();
        let d = laid_out("alt outer\nloop inner\nA->B: x\nend\nB->C: y\nend");
        let inner = d.blocks()[0].bounds.inflate(config.block_margin);
        let outer = d.blocks()[1].bounds;
        assert_eq!(outer.union(&inner), outer);
    }

    #[test]
    fn test_deep_nesting_stays_on_canvas() {
        let config = Config::default();
        let input = "loop a\nloop b\nloop c\nloop d\nloop e\nloop f\nloop g\nA->B: x\nend\nend\nend\nend\nend\nend\nend";
        let d = laid_out(input);
        let canvas = d.layout().canvas;

        let outer = d.blocks().last().unwrap().bounds;
        assert_eq!(outer.min.x, config.group_padding);
        for block in d.blocks() {
            assert!(block.bounds.min.x >= config.group_padding, "{:?}", block.bounds);
            assert!(block.bounds.max.x <= canvas.width);
        }
        for pair in d.blocks().windows(2) {
            let inner = pair[0].bounds.inflate(config.block_margin);
            assert_eq!(pair[1].bounds.union(&inner), pair[1].bounds);
        }
        // the shift moves lifelines with the frames
        let event = d.events()[7].bounds;
        let a = d.actor(ActorId(0)).bounds.mid_x();
        let b = d.actor(ActorId(1)).bounds.mid_x();
        assert_eq!(event.mid_x(), (a + b) / 2.0);
    }

    #[test]
    fn test_left_note_on_first_actor_is_shifted_on_canvas() {
        let config = Config::default();
        let d = laid_out("A->B: x\nnote left of A: a note far wider than the margin");
        let note = d.events()[1].bounds;
        let a = d.actor(ActorId(0)).bounds;

        assert_eq!(note.min.x, config.group_padding);
        assert_eq!(note.max.x, a.mid_x() - config.note_gap);
        assert!(a.min.x > config.min_padding_x);
        assert!(d.layout().canvas.width >= d.actor(ActorId(1)).bounds.max.x);
    }

    #[test]
    fn test_empty_block_spans_all_actors() {
        let d = laid_out("A->B: x\nB->C: y\nalt nothing here\nend");
        let frame = d.blocks()[0].bounds;
        assert!(frame.min.x <= d.actor(ActorId(0)).bounds.min.x);
        assert!(frame.max.x >= d.actor(ActorId(2)).bounds.max.x);
    }

    #[test]
    fn test_block_label_wraps() {
        let config = Config::default().with_group_max_width(100.0);
        let label = block_label(BlockKind::Loop, "one two three four five six", &config, &METRICS);
        assert!(label.lines.len() > 1);
        assert!(label.header_height >= config.group_tab_height + 16.0 * label.lines.len() as f64);

        let d = {
            let mut d = Diagram::parse("loop one two three four five six\nA->B: x\nend").unwrap();
            layout(&mut d, &config, &METRICS);
            d
        };
        let block = &d.blocks()[0];
        assert_eq!(block.label_lines, label.lines);
        assert!(block.bounds.height() >= block.header_height + config.group_padding);
        assert!(block.bounds.width() >= label.width);
    }

    #[test]
    fn test_canvas_covers_blocks_and_notes() {
        let d = laid_out("A->B: x\nnote right of B: a fairly wide note on the right");
        let note = d.events()[1].bounds;
        assert!(d.layout().canvas.width >= note.max.x);
    }

    #[test]
    fn test_diagram_without_actors() {
        let d = laid_out("loop idle\nend");
        assert!(d.actors().is_empty());
        assert!(d.layout().canvas.width > 0.0);
        assert!(d.layout().canvas.height > d.blocks()[0].bounds.max.y);
    }
}
