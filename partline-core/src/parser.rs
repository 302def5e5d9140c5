//! Lenient line parser for LDraw part files
//!
//! Only comment/meta lines (type 0), sub-file references (type 1) and edge
//! lines (type 2) are consumed. Everything else is skipped without failing
//! the file.
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till1, take_while},
    character::complete::{char, digit0, digit1, hex_digit1, one_of},
    combinator::{opt, recognize},
    multi::count,
    sequence::{pair, preceded, tuple},
    IResult,
};
use tracing::debug;

use crate::geometry::{Edge, ParsedPart, SubfileReference};
use crate::transform::Placement;

/// Minimum token count for a type 1 line, filename included.
pub const REFERENCE_MIN_TOKENS: usize = 15;
/// Minimum token count for a type 2 line.
pub const EDGE_MIN_TOKENS: usize = 8;

/// Line type of a record that was only partly usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Reference,
    Edge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line had fewer fields than its type requires and was skipped.
    TooFewFields { record: RecordKind, found: usize },
    /// A numeric field had no numeric prefix and was read as NaN (or no color).
    NonNumeric { record: RecordKind, token: String },
}

/// A non-fatal anomaly found while parsing. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

/// Parse the text of one part file.
///
/// Never fails: short lines are skipped and unparseable numbers become NaN,
/// with each case recorded in [`ParsedPart::diagnostics`].
pub fn parse_part(input: &str) -> ParsedPart {
    let mut part = ParsedPart::new();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Ok((rest, line_type)) = token(line) else {
            continue;
        };

        match line_type {
            "0" => {
                let meta = rest.trim();
                if part.name.is_empty() && !meta.is_empty() {
                    part.name = meta.to_string();
                }
            }
            "1" => match parse_reference(rest, line_no, &mut part.diagnostics) {
                Some(reference) => part.references.push(reference),
                None => skip(&mut part.diagnostics, line_no, RecordKind::Reference, line),
            },
            "2" => match parse_edge(rest, line_no, &mut part.diagnostics) {
                Some(edge) => part.edges.push(edge),
                None => skip(&mut part.diagnostics, line_no, RecordKind::Edge, line),
            },
            _ => {}
        }
    }

    if !part.diagnostics.is_empty() {
        debug!(
            name = %part.name,
            count = part.diagnostics.len(),
            "Part parsed with diagnostics"
        );
    }

    part
}

fn skip(diagnostics: &mut Vec<LineDiagnostic>, line: usize, record: RecordKind, text: &str) {
    let found = text.split_whitespace().count();
    debug!(line, ?record, found, "Skipping short line");
    diagnostics.push(LineDiagnostic {
        line,
        kind: DiagnosticKind::TooFewFields { record, found },
    });
}

/// One whitespace-delimited field.
fn token(input: &str) -> IResult<&str, &str> {
    preceded(take_while(char::is_whitespace), take_till1(char::is_whitespace))(input)
}

/// `1 <colour> x y z a b c d e f g h i <file>` minus the leading type token.
fn parse_reference(
    input: &str,
    line: usize,
    diagnostics: &mut Vec<LineDiagnostic>,
) -> Option<SubfileReference> {
    let (rest, fields) = count(token, REFERENCE_MIN_TOKENS - 2)(input).ok()?;
    let filename = rest.trim();
    if filename.is_empty() {
        return None;
    }

    let mut fields = fields.into_iter();
    let color = color_field(fields.next()?, line, RecordKind::Reference, diagnostics);
    let mut numbers = fields.map(|tok| number_field(tok, line, RecordKind::Reference, diagnostics));

    let mut translation = [0.0; 3];
    for slot in &mut translation {
        *slot = numbers.next()?;
    }
    let mut rows = [0.0; 9];
    for slot in &mut rows {
        *slot = numbers.next()?;
    }

    Some(SubfileReference::new(
        color,
        Placement::from_row_major(translation, rows),
        filename,
    ))
}

/// `2 <colour> x1 y1 z1 x2 y2 z2` minus the leading type token.
fn parse_edge(input: &str, line: usize, diagnostics: &mut Vec<LineDiagnostic>) -> Option<Edge> {
    let (_, fields) = count(token, EDGE_MIN_TOKENS - 1)(input).ok()?;

    let mut fields = fields.into_iter();
    let color = color_field(fields.next()?, line, RecordKind::Edge, diagnostics);
    let mut coords = [0.0; 6];
    for slot in &mut coords {
        *slot = number_field(fields.next()?, line, RecordKind::Edge, diagnostics);
    }

    Some(Edge::from_coords(color, coords))
}

fn number_field(
    tok: &str,
    line: usize,
    record: RecordKind,
    diagnostics: &mut Vec<LineDiagnostic>,
) -> f64 {
    let value = parse_number(tok);
    if value.is_nan() {
        diagnostics.push(LineDiagnostic {
            line,
            kind: DiagnosticKind::NonNumeric {
                record,
                token: tok.to_string(),
            },
        });
    }
    value
}

fn color_field(
    tok: &str,
    line: usize,
    record: RecordKind,
    diagnostics: &mut Vec<LineDiagnostic>,
) -> Option<i32> {
    let color = parse_color(tok);
    if color.is_none() {
        diagnostics.push(LineDiagnostic {
            line,
            kind: DiagnosticKind::NonNumeric {
                record,
                token: tok.to_string(),
            },
        });
    }
    color
}

/// Longest numeric prefix of `tok`, or NaN when there is none.
///
/// A dangling exponent marker is left out of the prefix (`"1e"` is 1), and
/// words such as `inf` or `nan` are not numbers.
pub fn parse_number(tok: &str) -> f64 {
    numeric_prefix(tok)
        .ok()
        .and_then(|(_, digits)| digits.parse().ok())
        .unwrap_or(f64::NAN)
}

/// `[+-]digits[.digits]` or `[+-].digits`, then an optional exponent.
fn numeric_prefix(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(exponent),
    )))(input)
}

/// Only taken when digits follow the marker.
fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

/// Decimal color code, or a `0x`-prefixed direct color.
pub fn parse_color(tok: &str) -> Option<i32> {
    if let Ok((_, digits)) = hex_color(tok) {
        return i32::from_str_radix(digits, 16).ok();
    }

    let (_, digits) = recognize(pair(
        opt(one_of::<_, _, nom::error::Error<&str>>("+-")),
        digit1,
    ))(tok)
    .ok()?;
    digits.parse().ok()
}

fn hex_color(input: &str) -> IResult<&str, &str> {
    preceded(tag_no_case("0x"), hex_digit1)(input)
}
