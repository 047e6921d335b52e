//! Linked diagram model and the builder that produces it from parsed lines

use std::collections::HashMap;

use crate::ast::{ActivationMark, BlockKind, EventKind, NotePosition, Statement};
use crate::geom::{Rect, Size};
use crate::parser::ParsedLine;
use crate::stack::Stack;

/// Index of an actor in first-seen order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub usize);

/// Source-order index of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

/// Index of an activation span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(pub usize);

/// Errors raised while linking statements into a diagram
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("end without matching block at line {line}")]
    UnmatchedBlockEnd { line: usize },
    #[error("internal error: actor #{actor} is not registered")]
    InternalLookupFailure { actor: usize },
}

/// A named lifeline
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    /// Label box; the top-row position once layout has run
    pub bounds: Rect,
    /// Minimum center-to-center distance from the previous actor
    pub delta: f64,
    /// Currently open activations, innermost on top
    pub stack: Stack<ActivationId>,
    /// Every activation owned by this actor, in creation order
    pub activations: Vec<ActivationId>,
}

/// One statement bound to actors
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
    /// Source line, for diagnostics
    pub line: usize,
    pub source: Option<ActorId>,
    pub destination: Option<ActorId>,
    /// Actors covered by a note, in written order
    pub note_actors: Vec<ActorId>,
    pub text: String,
    /// Activation opened or closed by this event
    pub activation: Option<ActivationId>,
    pub bounds: Rect,
}

impl Event {
    pub fn is_self_message(&self) -> bool {
        self.destination.is_some() && self.source == self.destination
    }

    /// Both endpoints when they are different actors
    pub fn actor_pair(&self) -> Option<(ActorId, ActorId)> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) if s != d => Some((s, d)),
            _ => None,
        }
    }

    /// Every actor this event mentions
    pub fn referenced_actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.source
            .into_iter()
            .chain(self.destination)
            .chain(self.note_actors.iter().copied())
    }
}

/// An activation bar on an actor's lifeline
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub id: ActivationId,
    pub actor: ActorId,
    pub start: EventId,
    pub end: Option<EventId>,
    /// Activation open on the same actor when this one started
    pub parent: Option<ActivationId>,
    pub bounds: Rect,
}

/// A finalized `alt` / `loop` region
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub start: EventId,
    pub end: EventId,
    pub bounds: Rect,
    /// Height of the band holding the tab and the wrapped label
    pub header_height: f64,
    pub tab_width: f64,
    pub label_lines: Vec<String>,
}

/// Diagram-wide layout results
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutState {
    /// Tallest actor label box
    pub header_height: f64,
    /// Vertical cursor after the last event; lifelines end here
    pub terminal_y: f64,
    pub canvas: Size,
}

/// A fully linked sequence diagram
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagram {
    pub(crate) actors: Vec<Actor>,
    pub(crate) actor_index: HashMap<String, ActorId>,
    pub(crate) events: Vec<Event>,
    pub(crate) activations: Vec<Activation>,
    pub(crate) blocks: Vec<Block>,
    pub(crate) layout: LayoutState,
}

impl Diagram {
    /// Parse and link a document
    pub fn parse(input: &str) -> Result<Diagram, crate::Error> {
        let lines = crate::parser::parse(input)?;
        Ok(Diagram::build(lines)?)
    }

    /// Link already-parsed lines
    pub fn build(lines: impl IntoIterator<Item = ParsedLine>) -> Result<Diagram, BuildError> {
        let mut builder = DiagramBuilder::default();
        for line in lines {
            builder.push(line)?;
        }
        Ok(builder.finish())
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.0]
    }

    pub fn actor_id(&self, name: &str) -> Option<ActorId> {
        self.actor_index.get(name).copied()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    pub fn activation(&self, id: ActivationId) -> &Activation {
        &self.activations[id.0]
    }

    /// Blocks in the order their end markers appear
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// The most recently started activation of `actor` that covers `event`.
    ///
    /// Open activations cover every event after their start.
    pub fn activation_at(&self, actor: ActorId, event: EventId) -> Option<&Activation> {
        self.actor(actor)
            .activations
            .iter()
            .rev()
            .map(|id| self.activation(*id))
            .find(|a| {
                let end = a.end.map_or(self.events.len(), |e| e.0);
                a.start.0 <= event.0 && event.0 <= end
            })
    }

    /// Resolve a name to an actor, registering it on first sight
    pub(crate) fn get_or_create(&mut self, name: &str) -> ActorId {
        if let Some(id) = self.actor_index.get(name) {
            return *id;
        }
        let id = ActorId(self.actors.len());
        self.actors.push(Actor {
            id,
            name: name.to_string(),
            bounds: Rect::default(),
            delta: 0.0,
            stack: Stack::new(),
            activations: Vec::new(),
        });
        self.actor_index.insert(name.to_string(), id);
        id
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, BuildError> {
        self.actors
            .get_mut(id.0)
            .ok_or(BuildError::InternalLookupFailure { actor: id.0 })
    }
}

/// A block whose end marker has not been seen yet
#[derive(Debug, Clone)]
struct OpenBlock {
    kind: BlockKind,
    text: String,
    start: EventId,
}

/// Incremental diagram construction from parsed lines
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    diagram: Diagram,
    open_blocks: Stack<OpenBlock>,
}

impl DiagramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link one statement
    pub fn push(&mut self, parsed: ParsedLine) -> Result<(), BuildError> {
        let ParsedLine { line, statement } = parsed;
        let Some(kind) = statement.event_kind() else {
            tracing::warn!(line, "else branches are not supported; marker ignored");
            return Ok(());
        };

        match statement {
            Statement::Message {
                from,
                to,
                text,
                arrow,
            } => {
                let source = self.diagram.get_or_create(&from);
                let destination = self.diagram.get_or_create(&to);
                let id = self.push_event(Event {
                    source: Some(source),
                    destination: Some(destination),
                    text,
                    ..self.blank_event(kind, line)
                });
                match arrow.activation {
                    Some(ActivationMark::Start) => self.start_activation(destination, id)?,
                    Some(ActivationMark::End) => self.end_activation(source, id)?,
                    None => {}
                }
            }
            Statement::Note {
                position,
                actors,
                text,
            } => {
                let note_actors: Vec<ActorId> = actors
                    .iter()
                    .map(|name| self.diagram.get_or_create(name))
                    .collect();
                debug_assert!(position == NotePosition::Over || note_actors.len() == 1);
                self.push_event(Event {
                    source: note_actors.first().copied(),
                    note_actors,
                    text,
                    ..self.blank_event(kind, line)
                });
            }
            Statement::BlockStart { kind: block, text } => {
                let start = self.push_event(Event {
                    text: text.clone(),
                    ..self.blank_event(kind, line)
                });
                self.open_blocks.push(OpenBlock {
                    kind: block,
                    text,
                    start,
                });
            }
            Statement::End => {
                let open = self
                    .open_blocks
                    .pop()
                    .ok_or(BuildError::UnmatchedBlockEnd { line })?;
                let end = self.push_event(self.blank_event(kind, line));
                self.diagram.blocks.push(Block {
                    kind: open.kind,
                    text: open.text,
                    start: open.start,
                    end,
                    bounds: Rect::default(),
                    header_height: 0.0,
                    tab_width: 0.0,
                    label_lines: Vec::new(),
                });
            }
            Statement::Else { .. } => {}
        }
        Ok(())
    }

    /// Close out the build. Blocks still open are dropped.
    pub fn finish(mut self) -> Diagram {
        for open in self.open_blocks.drain() {
            let line = self.diagram.events[open.start.0].line;
            tracing::warn!(line, kind = open.kind.as_str(), "block never closed; frame dropped");
        }
        tracing::debug!(
            actors = self.diagram.actors.len(),
            events = self.diagram.events.len(),
            blocks = self.diagram.blocks.len(),
            activations = self.diagram.activations.len(),
            "diagram built"
        );
        self.diagram
    }

    fn blank_event(&self, kind: EventKind, line: usize) -> Event {
        Event {
            id: EventId(self.diagram.events.len()),
            kind,
            line,
            source: None,
            destination: None,
            note_actors: Vec::new(),
            text: String::new(),
            activation: None,
            bounds: Rect::default(),
        }
    }

    fn push_event(&mut self, event: Event) -> EventId {
        let id = event.id;
        self.diagram.events.push(event);
        id
    }

    /// Open a span on the receiving actor
    fn start_activation(&mut self, owner: ActorId, event: EventId) -> Result<(), BuildError> {
        let id = ActivationId(self.diagram.activations.len());
        let actor = self.diagram.actor_mut(owner)?;
        let parent = actor.stack.peek().copied();
        actor.stack.push(id);
        actor.activations.push(id);

        self.diagram.activations.push(Activation {
            id,
            actor: owner,
            start: event,
            end: None,
            parent,
            bounds: Rect::default(),
        });
        self.diagram.events[event.0].activation = Some(id);
        Ok(())
    }

    /// Close the sending actor's innermost span; a no-op when nothing is open
    fn end_activation(&mut self, owner: ActorId, event: EventId) -> Result<(), BuildError> {
        let actor = self.diagram.actor_mut(owner)?;
        let Some(id) = actor.stack.pop() else {
            tracing::debug!(
                line = self.diagram.events[event.0].line,
                "activation end without an open activation; ignored"
            );
            return Ok(());
        };
        self.diagram.activations[id.0].end = Some(event);
        self.diagram.events[event.0].activation = Some(id);
        Ok(())
    }
}
