//! Lexer for runtime parameter declaration files using logos

use logos::Logos;

pub use super::ast::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f\x0B]+")]
pub enum Token {
    #[token("\n")]
    Newline,

    /// Everything from '#' to the end of the line, wherever it starts
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[^ \t\r\f\x0B\n#]+", |lex| lex.slice().to_string())]
    Field(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Token {
        Token::Field(s.to_string())
    }

    #[test]
    fn test_fields_split_on_whitespace() {
        let tokens: Vec<_> = lex("max_step   integer\t1").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![field("max_step"), field("integer"), field("1")]);
    }

    #[test]
    fn test_comment_truncates_line() {
        let tokens: Vec<_> = lex("octant logical .false. # mirror\nnext")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                field("octant"),
                field("logical"),
                field(".false."),
                Token::Comment,
                Token::Newline,
                field("next")
            ]
        );
    }

    #[test]
    fn test_comment_glued_to_field() {
        let tokens: Vec<_> = lex("a real 1.0#trailing").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![field("a"), field("real"), field("1.0"), Token::Comment]
        );
    }

    #[test]
    fn test_vertical_tab_separates_fields() {
        let tokens: Vec<_> = lex("a\x0Binteger\x0B 1").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![field("a"), field("integer"), field("1")]);
    }

    #[test]
    fn test_comment_span_starts_at_marker() {
        let spans: Vec<_> = lex("   # note")
            .filter(|(t, _)| *t == Token::Comment)
            .map(|(_, s)| s)
            .collect();
        assert_eq!(spans, vec![3..9]);
    }

    #[test]
    fn test_quoted_default_is_one_field() {
        let tokens: Vec<_> = lex(r#"xlo_boundary_type character """#)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                field("xlo_boundary_type"),
                field("character"),
                field("\"\"")
            ]
        );
    }

    #[test]
    fn test_spans_cover_fields() {
        let spans: Vec<_> = lex("ab  cd").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..2, 4..6]);
    }
}
