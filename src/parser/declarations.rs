//! Schema resolver: turns declaration files into a [`ParameterSet`]
//!
//! Each non-blank line declares one parameter:
//!
//! ```text
//! max_step           integer      1
//! small_dt           real         1.d-10
//! xlo_boundary_type  character    ""
//! octant             logical      .false.     # comment
//! max_step           integer      5           10
//! ```
//!
//! The optional fourth column is a priority used to settle duplicate
//! names across the whole file list.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::ast::{DataType, Parameter, ParameterSet, Resolution, Span};
use super::lexer::{lex, Token};
use crate::error::DeclarationError;

/// Read every declaration file in order and resolve them into one set
///
/// Resolution is cumulative: a later file overrides an earlier one only
/// with a strictly higher priority. The first unreadable or malformed
/// file aborts the whole run.
pub fn resolve_files<P: AsRef<Path>>(paths: &[P]) -> Result<ParameterSet, DeclarationError> {
    let mut params = ParameterSet::new();
    for path in paths {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DeclarationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("working on parameter file {}", path.display());
        parse_declarations(&contents, path, &mut params)?;
    }
    Ok(params)
}

/// Parse one declaration file's contents into `params`
///
/// `path` is only used for diagnostics.
pub fn parse_declarations(
    contents: &str,
    path: &Path,
    params: &mut ParameterSet,
) -> Result<(), DeclarationError> {
    let mut fields: Vec<String> = Vec::new();
    let mut comment_at = None;
    let mut line = 1;
    let mut line_start = 0;

    for (token, span) in lex(contents) {
        match token {
            Token::Field(text) => fields.push(text),
            Token::Comment => comment_at = Some(span.start),
            Token::Newline => {
                let line_span = line_start..span.start;
                let skip = is_skippable(&fields, comment_at, line_start);
                finish_line(&mut fields, skip, line, line_span, contents, path, params)?;
                comment_at = None;
                line += 1;
                line_start = span.end;
            }
        }
    }
    let line_span = line_start..contents.len();
    let skip = is_skippable(&fields, comment_at, line_start);
    finish_line(&mut fields, skip, line, line_span, contents, path, params)
}

/// Blank lines and comments starting in column 0 carry no declaration;
/// an indented comment-only line is still a (malformed) declaration line.
fn is_skippable(fields: &[String], comment_at: Option<usize>, line_start: usize) -> bool {
    fields.is_empty() && comment_at.map_or(true, |at| at == line_start)
}

fn finish_line(
    fields: &mut Vec<String>,
    skip: bool,
    line: usize,
    span: Span,
    contents: &str,
    path: &Path,
    params: &mut ParameterSet,
) -> Result<(), DeclarationError> {
    if skip {
        return Ok(());
    }
    if fields.len() < 3 {
        return Err(DeclarationError::MissingFields {
            path: path.to_path_buf(),
            line,
            span,
            found: fields.len(),
            contents: contents.to_string(),
        });
    }

    // Anything past the priority column is ignored
    let priority = match fields.get(3) {
        None => 0,
        Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
            debug!(
                "{}:{}: priority '{}' is not an integer, using 0",
                path.display(),
                line,
                raw
            );
            0
        }),
    };
    let param = Parameter::new(
        fields[0].as_str(),
        DataType::parse(&fields[1]),
        fields[2].as_str(),
        priority,
    );
    fields.clear();

    let name = param.name.clone();
    match params.insert(param) {
        Resolution::Added => {}
        Resolution::Replaced => debug!(
            "{}:{}: '{}' overrides an earlier declaration (priority {})",
            path.display(),
            line,
            name,
            priority
        ),
        Resolution::Discarded => debug!(
            "{}:{}: '{}' already declared with equal or higher priority, skipping",
            path.display(),
            line,
            name
        ),
    }
    Ok(())
}

/// Split a whitespace-separated list of paths, as passed on a command line
pub fn split_path_list(list: &str) -> Vec<PathBuf> {
    list.split_whitespace().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<ParameterSet, DeclarationError> {
        let mut params = ParameterSet::new();
        parse_declarations(src, Path::new("_parameters"), &mut params)?;
        Ok(params)
    }

    #[test]
    fn test_basic_declarations() {
        let params = parse(
            "max_step integer 1\n\
             small_dt real 1.d-10\n\
             octant logical .false.\n",
        )
        .expect("Should parse");
        assert_eq!(params.names(), vec!["max_step", "small_dt", "octant"]);
        let small_dt = params.get("small_dt").expect("small_dt present");
        assert_eq!(small_dt.dtype, DataType::Real);
        assert_eq!(small_dt.default_value, "1.d-10");
        assert_eq!(small_dt.priority, 0);
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        let params = parse(
            "# header comment\n\
             \n\
             \t  \n\
             a integer 1 # trailing\n\
             #b integer 2\n",
        )
        .expect("Should parse");
        assert_eq!(params.names(), vec!["a"]);
        assert_eq!(params.get("a").map(|p| p.default_value.as_str()), Some("1"));
    }

    #[test]
    fn test_indented_comment_line_is_error() {
        let err = parse("a integer 1\n   # indented note\n").unwrap_err();
        match err {
            DeclarationError::MissingFields {
                line, span, found, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(found, 0);
                assert_eq!(span, 12..30);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_last_line_without_newline() {
        let params = parse("a integer 1\nb real 2.0").expect("Should parse");
        assert_eq!(params.get("b").map(|p| p.default_value.as_str()), Some("2.0"));
    }

    #[test]
    fn test_priority_field() {
        let params = parse("a integer 1 7\nb integer 1 high\n").expect("Should parse");
        assert_eq!(params.get("a").map(|p| p.priority), Some(7));
        assert_eq!(params.get("b").map(|p| p.priority), Some(0));
    }

    #[test]
    fn test_missing_fields_is_error() {
        let err = parse("a integer 1\n\nb real\n").unwrap_err();
        match err {
            DeclarationError::MissingFields {
                line, span, found, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(found, 2);
                assert_eq!(span, 13..19);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_in_one_file() {
        let params = parse("a integer 1\nb integer 2\na integer 3 1\n").expect("Should parse");
        assert_eq!(params.names(), vec!["b", "a"]);
        assert_eq!(params.get("a").map(|p| p.default_value.as_str()), Some("3"));
    }

    #[test]
    fn test_unknown_type_accepted() {
        let params = parse("a double 1.0\n").expect("Should parse");
        assert_eq!(
            params.get("a").map(|p| p.dtype.clone()),
            Some(DataType::Other("double".to_string()))
        );
    }

    #[test]
    fn test_split_path_list() {
        assert_eq!(
            split_path_list("  a/_parameters\tb/_parameters "),
            vec![PathBuf::from("a/_parameters"), PathBuf::from("b/_parameters")]
        );
    }
}
