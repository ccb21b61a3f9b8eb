//! Readers for the DIMACS CNF format and its equality-atom variant.
//!
//! Both formats share the comment and header conventions: lines starting with `c`
//! are comments, `p cnf <count> <clauses>` is the header, and a line starting with
//! `%` ends the input.

use snafu::{OptionExt, Snafu};

pub mod dimacs;
pub mod smt;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("Could not read input: {}", source))]
    Io { source: std::io::Error },

    #[snafu(display("Line {}, SyntaxError: missing 'p cnf' header", line))]
    MissingHeader { line: usize },

    #[snafu(display("Line {}, SyntaxError: invalid header '{}'", line, text))]
    InvalidHeader { line: usize, text: String },

    #[snafu(display("Line {}, SyntaxError: invalid literal '{}'", line, token))]
    InvalidLiteral { line: usize, token: String },

    #[snafu(display("Line {}, SyntaxError: variable {} exceeds the declared {} variables", line, var, num_vars))]
    VariableOutOfRange { line: usize, var: u32, num_vars: usize },

    #[snafu(display("Line {}, SyntaxError: invalid atom '{}'", line, text))]
    InvalidAtom { line: usize, text: String },
}

impl ParseError {
    /// 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io { .. } => None,
            ParseError::MissingHeader { line }
            | ParseError::InvalidHeader { line, .. }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::VariableOutOfRange { line, .. }
            | ParseError::InvalidAtom { line, .. } => Some(*line),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Header {
    pub(crate) count: usize,
    pub(crate) num_clauses: usize,
}

/// Classification of a single input line.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Line<'a> {
    Skip,
    End,
    Header(Header),
    Body(&'a str),
}

pub(crate) fn classify(text: &str, line: usize) -> Result<Line<'_>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('c') {
        Ok(Line::Skip)
    } else if text.starts_with('%') {
        Ok(Line::End)
    } else if text.starts_with('p') {
        parse_header(text, line).map(Line::Header)
    } else {
        Ok(Line::Body(text))
    }
}

fn parse_header(text: &str, line: usize) -> Result<Header> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let header = match parts.as_slice() {
        ["p", "cnf", count, num_clauses] => count
            .parse()
            .ok()
            .zip(num_clauses.parse().ok())
            .map(|(count, num_clauses)| Header { count, num_clauses }),
        _ => None,
    };
    header.context(InvalidHeaderSnafu { line, text })
}
