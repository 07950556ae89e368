//! Front-matter extraction
//!
//! A content file opens with a line that is exactly `---` at byte zero,
//! followed by YAML key-value metadata, followed by a second `---` line.
//! Everything after the closing delimiter is Markdown body text and is
//! handed downstream unmodified.
//!
//! Parsing is a pure function over the raw text: no I/O, no panics, every
//! failure returned as a [`ParseError`].

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Front-matter delimiter line
const DELIMITER: &str = "---";

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The file does not start with a `---` line (empty input included)
    #[error("Missing front matter: file must start with '---'")]
    MissingFrontMatter,

    /// An opening `---` was found but no closing delimiter exists
    #[error("Unterminated front matter: no closing '---' found")]
    UnterminatedFrontMatter,

    /// The block is delimited but is not parseable as YAML key-value data
    #[error("Malformed YAML in front matter: {0}")]
    MalformedYaml(String),
}

impl ParseError {
    /// Stable machine-readable name for reports
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MissingFrontMatter => "missing_front_matter",
            ParseError::UnterminatedFrontMatter => "unterminated_front_matter",
            ParseError::MalformedYaml(_) => "malformed_yaml",
        }
    }
}

/// A split content file: raw metadata plus untouched body text
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Front-matter keys and raw YAML values
    pub fields: Mapping,

    /// Body text after the closing delimiter
    pub body: String,

    /// Byte offset into the original text where the body begins
    pub body_offset: usize,
}

/// Splits raw file text into front matter and body.
///
/// The opening delimiter must sit at position zero and the closing
/// delimiter must be a whole line; `---` inside the body is plain text.
/// CRLF line endings are tolerated.
pub fn parse(text: &str) -> Result<RawDocument, ParseError> {
    let mut lines = line_spans(text);

    match lines.next() {
        Some((line, _, _)) if is_delimiter(line) => {}
        _ => return Err(ParseError::MissingFrontMatter),
    }

    let mut header_start = None;
    let mut header_end = None;
    let mut body_offset = None;

    for (line, start, end) in lines {
        if is_delimiter(line) {
            header_end = Some(start);
            body_offset = Some(end);
            break;
        }
        if header_start.is_none() {
            header_start = Some(start);
        }
    }

    let Some(body_offset) = body_offset else {
        return Err(ParseError::UnterminatedFrontMatter);
    };

    let header = match (header_start, header_end) {
        (Some(start), Some(end)) if start < end => &text[start..end],
        _ => "",
    };

    let fields = parse_mapping(header)?;
    let body = text[body_offset..].to_string();

    Ok(RawDocument {
        fields,
        body,
        body_offset,
    })
}

/// Parses the header block into a YAML mapping.
///
/// An empty block is a valid, empty mapping. A block that parses to
/// anything other than a mapping (a bare scalar, a list) is malformed:
/// front matter is key-value data by contract.
fn parse_mapping(header: &str) -> Result<Mapping, ParseError> {
    if header.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value =
        serde_yaml::from_str(header).map_err(|e| ParseError::MalformedYaml(e.to_string()))?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(ParseError::MalformedYaml(format!(
            "expected key-value mapping, got {}",
            yaml_type_name(&other)
        ))),
    }
}

/// Human-readable YAML type name for diagnostics
pub fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// True if a line is exactly the `---` delimiter (CRLF tolerated)
fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

/// Iterates lines with their (content, start, end-including-newline) spans
fn line_spans(text: &str) -> impl Iterator<Item = (&str, usize, usize)> {
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos >= text.len() {
            return None;
        }
        let start = pos;
        let rest = &text[start..];
        let (content_len, line_len) = match rest.find('\n') {
            Some(i) => (i, i + 1),
            None => (rest.len(), rest.len()),
        };
        pos = start + line_len;
        Some((&rest[..content_len], start, start + line_len))
    })
}
