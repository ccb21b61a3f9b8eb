use std::io::BufRead;
use std::mem;

use snafu::{ensure, OptionExt, ResultExt};
use tracing::{debug, warn};

use super::{classify, Header, Line, Result};
use super::{InvalidLiteralSnafu, IoSnafu, MissingHeaderSnafu, VariableOutOfRangeSnafu};
use crate::cnf::{Clause, Cnf};
use crate::lit::Lit;

/// Parses a DIMACS CNF formula.
///
/// Clauses are terminated by `0` and may span several lines. A final clause with
/// a missing terminator is accepted.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut header: Option<Header> = None;
    let mut clauses = Vec::new();
    let mut current = Vec::new();
    let mut line = 0;

    for text in reader.lines() {
        line += 1;
        let text = text.context(IoSnafu)?;
        let body = match classify(&text, line)? {
            Line::Skip => continue,
            Line::End => break,
            Line::Header(h) => {
                header = Some(h);
                continue;
            }
            Line::Body(body) => body,
        };
        let num_vars = header.context(MissingHeaderSnafu { line })?.count;

        for token in body.split_whitespace() {
            let lit: i32 = token.parse().ok().context(InvalidLiteralSnafu { line, token })?;
            if lit == 0 {
                clauses.push(Clause::new(mem::take(&mut current)));
            } else {
                let var = lit.unsigned_abs();
                ensure!(var as usize <= num_vars, VariableOutOfRangeSnafu { line, var, num_vars });
                current.push(Lit::from_external(lit));
            }
        }
    }

    if !current.is_empty() {
        debug!("Accepting the last clause without terminating zero");
        clauses.push(Clause::new(current));
    }

    let header = header.context(MissingHeaderSnafu { line })?;
    if header.num_clauses != clauses.len() {
        warn!("Header declares {} clauses, but {} were read", header.num_clauses, clauses.len());
    }

    Ok(Cnf {
        num_vars: header.count,
        clauses,
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parsing::ParseError;

    fn parse(s: &str) -> Result<Cnf> {
        parse_dimacs(s.as_bytes())
    }

    #[test]
    fn test_parse_simple() {
        let cnf = parse("c example\np cnf 3 2\n1 2 0\n-1 -2 0\n").unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf, Cnf { num_vars: 3, clauses: vec![Clause::from([1, 2]), Clause::from([-1, -2])] });
    }

    #[test]
    fn test_parse_clause_spanning_lines() {
        let cnf = parse("p cnf 4 2\n1 2\n 3 0 -4\n0\n").unwrap();
        assert_eq!(cnf.clauses, vec![Clause::from([1, 2, 3]), Clause::from([-4])]);
    }

    #[test]
    fn test_parse_missing_terminator_and_percent() {
        let cnf = parse("p cnf 2 2\n1 0\n-2\n%\n0\n").unwrap();
        assert_eq!(cnf.clauses, vec![Clause::from([1]), Clause::from([-2])]);
    }

    #[test]
    fn test_parse_empty_clause() {
        let cnf = parse("p cnf 1 1\n0\n").unwrap();
        assert_eq!(cnf.clauses.len(), 1);
        assert!(cnf.clauses[0].is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let cnf = parse("p cnf 5 0\n").unwrap();
        assert_eq!(cnf, Cnf::with_vars(5));
    }

    #[test]
    fn test_missing_header() {
        let err = parse("c nothing\n1 2 0\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader { line: 2 }));
        let err = parse("").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader { line: 0 }));
    }

    #[test]
    fn test_invalid_literal() {
        let err = parse("p cnf 2 1\n1 x 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidLiteral { line: 2, ref token } if token == "x"));
    }

    #[test]
    fn test_variable_out_of_range() {
        let err = parse("p cnf 2 1\n\n1 -3 0\n").unwrap_err();
        assert!(matches!(err, ParseError::VariableOutOfRange { line: 3, var: 3, num_vars: 2 }));
        assert_eq!(err.to_string(), "Line 3, SyntaxError: variable 3 exceeds the declared 2 variables");
    }
}
