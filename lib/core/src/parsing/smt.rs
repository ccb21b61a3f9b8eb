use std::io::BufRead;

use snafu::{OptionExt, ResultExt};
use tracing::warn;

use super::{classify, Header, Line, Result};
use super::{InvalidAtomSnafu, IoSnafu, MissingHeaderSnafu};
use crate::smt::{EqAtom, Relation, SmtClause, SmtCnf, Term};

/// Parses an equality CNF: one clause per line, atoms `a=b` or `a<>b`.
///
/// The header count is the number of terms; a term id beyond it extends the term range.
pub fn parse_smt<R: BufRead>(reader: R) -> Result<SmtCnf> {
    let mut header: Option<Header> = None;
    let mut clauses = Vec::new();
    let mut max_term = None;
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
        header.context(MissingHeaderSnafu { line })?;

        let clause = parse_clause(body, line)?;
        max_term = clause.iter().map(|atom| atom.lhs.max(atom.rhs)).chain(max_term).max();
        clauses.push(clause);
    }

    let header = header.context(MissingHeaderSnafu { line })?;
    if header.num_clauses != clauses.len() {
        warn!("Header declares {} clauses, but {} were read", header.num_clauses, clauses.len());
    }

    let num_terms = max_term.map_or(header.count, |t| header.count.max(t + 1));
    Ok(SmtCnf { num_terms, clauses })
}

fn parse_clause(body: &str, line: usize) -> Result<SmtClause> {
    let mut atoms = Vec::new();
    let mut rest = body.trim_start();

    while !rest.is_empty() {
        let invalid = || InvalidAtomSnafu {
            line,
            text: rest.split_whitespace().next().unwrap_or(rest),
        };

        let (lhs, after) = split_term(rest).with_context(invalid)?;
        let after = after.trim_start();
        let (relation, after) = if let Some(after) = after.strip_prefix("<>") {
            (Relation::NotEqual, after)
        } else if let Some(after) = after.strip_prefix('=') {
            (Relation::Equal, after)
        } else if lhs == 0 && after.is_empty() {
            // DIMACS-style terminating zero.
            break;
        } else {
            return invalid().fail();
        };
        let (rhs, after) = split_term(after.trim_start()).with_context(invalid)?;

        atoms.push(EqAtom::new(lhs, rhs, relation));
        rest = after.trim_start();
    }

    Ok(SmtClause::new(atoms))
}

/// Splits a leading decimal term id off `s`.
fn split_term(s: &str) -> Option<(Term, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let term = s[..end].parse().ok()?;
    Some((term, &s[end..]))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parsing::ParseError;

    fn parse(s: &str) -> Result<SmtCnf> {
        parse_smt(s.as_bytes())
    }

    #[test]
    fn test_parse_compact_atoms() {
        let cnf = parse("c generated\np cnf 4 2\n1=2 3<>4 \n2<>3\n").unwrap();
        assert_eq!(cnf.num_terms, 5);
        assert_eq!(
            cnf.clauses,
            vec![
                SmtClause::from([EqAtom::equal(1, 2), EqAtom::not_equal(3, 4)]),
                SmtClause::from([EqAtom::not_equal(2, 3)]),
            ]
        );
    }

    #[test]
    fn test_parse_spaced_atoms() {
        let cnf = parse("p cnf 3 1\n0 = 1   1 <> 2 0\n").unwrap();
        assert_eq!(cnf.num_terms, 3);
        assert_eq!(
            cnf.clauses,
            vec![SmtClause::from([EqAtom::equal(0, 1), EqAtom::not_equal(1, 2)])]
        );
    }

    #[test]
    fn test_header_count_bounds_terms() {
        let cnf = parse("p cnf 10 1\n0=1\n").unwrap();
        assert_eq!(cnf.num_terms, 10);
    }

    #[test]
    fn test_missing_header() {
        let err = parse("0=1\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader { line: 1 }));
    }

    #[test]
    fn test_invalid_atoms() {
        let err = parse("p cnf 3 1\n0=1 1<2\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAtom { line: 2, ref text } if text == "1<2"));
        let err = parse("p cnf 3 2\n0=1\nx=1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAtom { line: 3, .. }));
        let err = parse("p cnf 3 1\n0=\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAtom { line: 2, .. }));
        let err = parse("p cnf 3 1\n1 2\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAtom { line: 2, .. }));
    }
}
