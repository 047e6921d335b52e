//! Statement definitions produced by the line parser

/// One parsed line, not yet bound to a diagram
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Message between two actors (or an actor and itself)
    Message {
        from: String,
        to: String,
        text: String,
        arrow: Arrow,
    },
    /// Note attached to one or more actors
    Note {
        position: NotePosition,
        actors: Vec<String>,
        text: String,
    },
    /// Start of an `alt` / `loop` block
    BlockStart { kind: BlockKind, text: String },
    /// `else` branch marker (recognized, not wired into blocks)
    Else { text: String },
    /// End of the innermost open block
    End,
}

impl Statement {
    /// Event kind this statement turns into, if any
    pub fn event_kind(&self) -> Option<EventKind> {
        match self {
            Statement::Message { arrow, .. } => Some(arrow.event_kind()),
            Statement::Note { position, .. } => Some(match position {
                NotePosition::Over => EventKind::NoteOver,
                NotePosition::Left => EventKind::NoteLeft,
                NotePosition::Right => EventKind::NoteRight,
            }),
            Statement::BlockStart { kind, .. } => Some(EventKind::BlockStart(*kind)),
            Statement::End => Some(EventKind::BlockEnd),
            Statement::Else { .. } => None,
        }
    }
}

/// Arrow style of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    /// Line style
    pub line: LineStyle,
    /// Activation change carried by the arrow (`+` / `-` suffix)
    pub activation: Option<ActivationMark>,
}

impl Arrow {
    pub const SOLID: Arrow = Arrow {
        line: LineStyle::Solid,
        activation: None,
    };

    pub const DASHED: Arrow = Arrow {
        line: LineStyle::Dashed,
        activation: None,
    };

    pub const SOLID_ACTIVATE: Arrow = Arrow {
        line: LineStyle::Solid,
        activation: Some(ActivationMark::Start),
    };

    pub const SOLID_DEACTIVATE: Arrow = Arrow {
        line: LineStyle::Solid,
        activation: Some(ActivationMark::End),
    };

    pub const DASHED_ACTIVATE: Arrow = Arrow {
        line: LineStyle::Dashed,
        activation: Some(ActivationMark::Start),
    };

    pub const DASHED_DEACTIVATE: Arrow = Arrow {
        line: LineStyle::Dashed,
        activation: Some(ActivationMark::End),
    };

    pub fn event_kind(&self) -> EventKind {
        match (self.line, self.activation) {
            (LineStyle::Solid, None) => EventKind::Message,
            (LineStyle::Dashed, None) => EventKind::DashedMessage,
            (LineStyle::Solid, Some(ActivationMark::Start)) => EventKind::ActivationStart,
            (LineStyle::Solid, Some(ActivationMark::End)) => EventKind::ActivationEnd,
            (LineStyle::Dashed, Some(ActivationMark::Start)) => EventKind::DashedActivationStart,
            (LineStyle::Dashed, Some(ActivationMark::End)) => EventKind::DashedActivationEnd,
        }
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid line (`->`)
    Solid,
    /// Dashed line (`-->`)
    Dashed,
}

/// Activation suffix on an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMark {
    /// `+`: activate the destination
    Start,
    /// `-`: deactivate the source
    End,
}

/// Note position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePosition {
    /// Left of an actor
    Left,
    /// Right of an actor
    Right,
    /// Over one or more actors
    Over,
}

/// Block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Alternative
    Alt,
    /// Loop
    Loop,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Alt => "alt",
            BlockKind::Loop => "loop",
        }
    }
}

/// Closed set of event kinds in a diagram.
///
/// Layout and rendering dispatch on this with exhaustive matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Message,
    DashedMessage,
    ActivationStart,
    ActivationEnd,
    DashedActivationStart,
    DashedActivationEnd,
    NoteOver,
    NoteLeft,
    NoteRight,
    /// Opening marker, carrying the block keyword
    BlockStart(BlockKind),
    BlockEnd,
}

impl EventKind {
    /// Whether the event is drawn as an arrow between actors
    pub fn is_message(&self) -> bool {
        matches!(
            self,
            EventKind::Message
                | EventKind::DashedMessage
                | EventKind::ActivationStart
                | EventKind::ActivationEnd
                | EventKind::DashedActivationStart
                | EventKind::DashedActivationEnd
        )
    }

    pub fn is_note(&self) -> bool {
        matches!(
            self,
            EventKind::NoteOver | EventKind::NoteLeft | EventKind::NoteRight
        )
    }

    pub fn is_block_marker(&self) -> bool {
        matches!(self, EventKind::BlockStart(_) | EventKind::BlockEnd)
    }

    pub fn line_style(&self) -> LineStyle {
        match self {
            EventKind::DashedMessage
            | EventKind::DashedActivationStart
            | EventKind::DashedActivationEnd => LineStyle::Dashed,
            _ => LineStyle::Solid,
        }
    }

    pub fn activation(&self) -> Option<ActivationMark> {
        match self {
            EventKind::ActivationStart | EventKind::DashedActivationStart => {
                Some(ActivationMark::Start)
            }
            EventKind::ActivationEnd | EventKind::DashedActivationEnd => Some(ActivationMark::End),
            _ => None,
        }
    }
}
