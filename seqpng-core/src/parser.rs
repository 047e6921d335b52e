//! Line-level parser for the sequence diagram grammar

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, eof, rest, value},
    multi::separated_list1,
    sequence::preceded,
    IResult, Parser,
};

use crate::ast::*;

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty sequence")]
    EmptyInput,
    #[error("unsupported line {line}: {text:?}")]
    UnrecognizedLine { line: usize, text: String },
}

/// A statement together with the 1-based line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub line: usize,
    pub statement: Statement,
}

/// Parse a complete document, one statement per line.
///
/// Blank lines and `#` comments are skipped.
pub fn parse(input: &str) -> Result<Vec<ParsedLine>, ParseError> {
    let mut lines = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let statement = parse_line(i + 1, trimmed)?;
        lines.push(ParsedLine {
            line: i + 1,
            statement,
        });
    }

    if lines.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(lines)
}

/// Parse a single line. `line` is only used to label the error.
pub fn parse_line(line: usize, input: &str) -> Result<Statement, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    match all_consuming(statement).parse(trimmed) {
        Ok((_, statement)) => Ok(statement),
        Err(_) => Err(ParseError::UnrecognizedLine {
            line,
            text: trimmed.to_string(),
        }),
    }
}

fn statement(input: &str) -> IResult<&str, Statement> {
    alt((parse_message, parse_note, parse_block_keyword)).parse(input)
}

/// Actor names are runs of alphanumerics
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric()).parse(input)
}

/// Remainder of the line after a `:`, trimmed
fn parse_text(input: &str) -> IResult<&str, String> {
    let (input, _) = space0.parse(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, text) = rest.parse(input)?;
    Ok((input, text.trim().to_string()))
}

/// Parse arrow tokens longest-first so `-->+` never reads as `-->`
fn parse_arrow(input: &str) -> IResult<&str, Arrow> {
    alt((
        value(Arrow::DASHED_ACTIVATE, tag("-->+")),
        value(Arrow::DASHED_DEACTIVATE, tag("-->-")),
        value(Arrow::DASHED, tag("-->")),
        value(Arrow::SOLID_ACTIVATE, tag("->+")),
        value(Arrow::SOLID_DEACTIVATE, tag("->-")),
        value(Arrow::SOLID, tag("->")),
    ))
    .parse(input)
}

/// Parse a message: `A->B: text`, `A-->B: text`, `A->+B: text` and friends
fn parse_message(input: &str) -> IResult<&str, Statement> {
    let (input, from) = parse_identifier(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, arrow) = parse_arrow(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, to) = parse_identifier(input)?;
    let (input, text) = parse_text(input)?;

    Ok((
        input,
        Statement::Message {
            from: from.to_string(),
            to: to.to_string(),
            text,
            arrow,
        },
    ))
}

/// Parse note: `note over A, B: text`, `note right of A: text`, `note left of A: text`
fn parse_note(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("note").parse(input)?;
    let (input, _) = space1.parse(input)?;

    let (input, position) = alt((
        value(NotePosition::Over, tag_no_case("over")),
        value(
            NotePosition::Right,
            (tag_no_case("right"), space1, tag_no_case("of")),
        ),
        value(
            NotePosition::Left,
            (tag_no_case("left"), space1, tag_no_case("of")),
        ),
    ))
    .parse(input)?;

    let (input, _) = space1.parse(input)?;

    let (after, actors) =
        separated_list1((space0, char(','), space0), parse_identifier).parse(input)?;

    // left/right notes belong to exactly one actor
    if position != NotePosition::Over && actors.len() != 1 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let (input, text) = parse_text(after)?;

    Ok((
        input,
        Statement::Note {
            position,
            actors: actors.into_iter().map(|s| s.to_string()).collect(),
            text,
        },
    ))
}

/// Parse block keywords: alt, loop, else, end
fn parse_block_keyword(input: &str) -> IResult<&str, Statement> {
    alt((parse_block_start, parse_else, parse_end)).parse(input)
}

/// A keyword must be followed by whitespace and free text, or end the line
fn parse_keyword_tail(input: &str) -> IResult<&str, &str> {
    alt((preceded(space1, rest), eof)).parse(input)
}

/// Parse block start: `alt condition`, `loop condition`
fn parse_block_start(input: &str) -> IResult<&str, Statement> {
    let (input, kind) = alt((
        value(BlockKind::Alt, tag_no_case("alt")),
        value(BlockKind::Loop, tag_no_case("loop")),
    ))
    .parse(input)?;
    let (input, text) = parse_keyword_tail(input)?;

    Ok((
        input,
        Statement::BlockStart {
            kind,
            text: text.trim().to_string(),
        },
    ))
}

/// Parse else: `else condition`
fn parse_else(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("else").parse(input)?;
    let (input, text) = parse_keyword_tail(input)?;
    Ok((
        input,
        Statement::Else {
            text: text.trim().to_string(),
        },
    ))
}

/// Parse `end` (nothing may follow it)
fn parse_end(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("end").parse(input)?;
    let (input, _) = eof.parse(input)?;
    Ok((input, Statement::End))
}
