use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;

/// Parse a JSON string into an unvalidated pattern document.
///
/// Performs JSON deserialization only; structural conformance is the job of
/// [`crate::validate::validate`], which reports problems as diagnostics
/// rather than refusing the document.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    serde_json::from_str(input).map_err(|e| {
        let line = e.line();
        let column = e.column();
        ParseError {
            kind: classify_json_error(&e),
            message: e.to_string(),
            line: (line > 0).then_some(line),
            column: (column > 0).then_some(column),
        }
    })
}

fn classify_json_error(e: &serde_json::Error) -> ParseErrorKind {
    match e.classify() {
        serde_json::error::Category::Eof => ParseErrorKind::UnexpectedEof,
        serde_json::error::Category::Data => ParseErrorKind::TypeMismatch,
        _ => ParseErrorKind::Syntax,
    }
}
