use std::{collections::HashMap, str::CharIndices, sync::OnceLock};

use thiserror::Error;

use crate::{
    compiler::SourceId,
    token::{self, Token, TokenKind},
    util::{Peek, Peekable},
};

/// State for converting a source string into a token stream, with a single
/// token of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Iterator over all chars in the file
    chars: Peekable<CharIndices<'a>>,

    /// The original source text
    source: &'a str,

    /// Source ID to use for all returned tokens
    id: SourceId,

    /// The lexed but not yet consumed token
    peeked: Option<Token<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum LexerError {
    /// The source text is not in unicode normalisation form C
    #[error("source text is not in unicode normalization form C")]
    NotNormalized { id: SourceId },
}

pub type Result<T, E = LexerError> = std::result::Result<T, E>;

impl<'a> Lexer<'a> {
    /// Create a new Lexer for a given source file.  `id` will be returned with
    /// each token.
    pub fn new(id: SourceId, source: &'a str) -> Result<Self> {
        // reject non-nfc source code
        if !unicode_normalization::is_nfc(source) {
            return Err(LexerError::NotNormalized { id });
        }

        let mut chars = source.char_indices().n_peekable();

        // skip byte order mark, offsets still index the original string
        if let Some(&(_, '\u{FEFF}')) = chars.peek(0) {
            chars.next();
        }

        Ok(Self {
            chars,
            source,
            id,
            peeked: None,
        })
    }

    /// Return the next token without consuming it.  Once the end of the source
    /// is reached, an `Eof` token is returned on every call.
    pub fn peek(&mut self) -> Token<'a> {
        if let Some(tok) = self.peeked {
            return tok;
        }

        let tok = self.lex();
        self.peeked = Some(tok);
        tok
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Token<'a> {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.lex(),
        }
    }

    /// Returns true if the lexer is at the end of its source file
    pub fn is_eof(&mut self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Byte offset of the next token in the source text
    pub fn offset(&mut self) -> usize {
        self.peek().offset
    }

    /// The source this lexer is reading from
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Lex a single token, skipping all whitespace and comments before it.
    fn lex(&mut self) -> Token<'a> {
        while let Some(&(offset, c)) = self.chars.peek(0) {
            match c {
                '-' | '\u{2011}' => {
                    if !self.single_comment(offset) {
                        break;
                    }
                }
                _ if is_whitespace(c) => {
                    self.chars.next();
                }
                _ => break,
            }
        }

        let Some(&(offset, c)) = self.chars.peek(0) else {
            return Token {
                kind: TokenKind::Eof,
                value: "",
                offset: self.source.len(),
                id: self.id,
            };
        };

        let (kind, len) = match c {
            '{' => (TokenKind::LeftCurly, 1),
            '}' => (TokenKind::RightCurly, 1),
            '(' => (TokenKind::LeftParen, 1),
            ')' => (TokenKind::RightParen, 1),
            '[' => (TokenKind::LeftSquare, 1),
            ']' => (TokenKind::RightSquare, 1),
            ',' => (TokenKind::Comma, 1),
            ':' => self.multi_token(offset, "::=", TokenKind::Assignment),
            '=' => self.multi_token(offset, "==", TokenKind::Equal),
            '!' => self.multi_token(offset, "!=", TokenKind::NotEqual),
            '<' if self.source[offset..].starts_with("<=") => (TokenKind::LessEqual, 2),
            '<' => (TokenKind::Less, 1),
            '>' if self.source[offset..].starts_with(">=") => (TokenKind::GreaterEqual, 2),
            '>' => (TokenKind::Greater, 1),
            '_' => self.width(),
            '0'..='9' => self.number(),
            _ if c.is_ascii_alphabetic() => self.identifier(offset),
            _ => (TokenKind::Unrecognised, c.len_utf8()),
        };

        let value = &self.source[offset..offset + len];
        for _ in value.chars() {
            self.chars.next();
        }

        Token {
            kind,
            value,
            offset,
            id: self.id,
        }
    }

    /// Try to match a multi-character token, if it does not match then the
    /// first character is unrecognised.
    fn multi_token(&self, offset: usize, value: &str, kind: TokenKind) -> (TokenKind, usize) {
        if self.source[offset..].starts_with(value) {
            (kind, value.len())
        } else {
            (TokenKind::Unrecognised, 1)
        }
    }

    /// Parse a single line comment which is text between pairs of two hyphens,
    /// or from two hyphens to the end of the line.  Non-breaking hyphens are
    /// also accepted instead of hyphens.  Returns false if the hyphen at the
    /// current position does not start a comment.
    fn single_comment(&mut self, offset: usize) -> bool {
        let Some(&(_, second)) = self.chars.peek(1) else {
            return false;
        };
        if !matches!(second, '-' | '\u{2011}') {
            return false;
        }
        self.chars.next(); // Consume the first hyphen
        self.chars.next(); // Consume the second hyphen

        while let Some(&(_, next)) = self.chars.peek(0) {
            if is_newline(next) {
                break;
            }

            if matches!(next, '-' | '\u{2011}') {
                if let Some(&(_, '-' | '\u{2011}')) = self.chars.peek(1) {
                    self.chars.next();
                    self.chars.next();
                    break;
                }
            }

            self.chars.next();
        }

        tracing::trace!(offset, "skipped comment");
        true
    }

    /// Parse an identifier or keyword.  Hyphens are allowed inside the
    /// identifier when followed by an alphanumeric character.
    fn identifier(&mut self, offset: usize) -> (TokenKind, usize) {
        let mut len = 1;
        while let Some(&(_, c)) = self.chars.peek(len) {
            if c.is_ascii_alphanumeric() {
                len += 1;
                continue;
            }

            if c == '-' {
                if let Some(&(_, c)) = self.chars.peek(len + 1) {
                    if c.is_ascii_alphanumeric() {
                        len += 2;
                        continue;
                    }
                }
            }

            break;
        }

        let value = &self.source[offset..offset + len];
        let kind = keywords()
            .get(value)
            .copied()
            .unwrap_or(TokenKind::Identifier);

        (kind, len)
    }

    /// Parse a number ([1-9][0-9]*)|0, a number with leading zeros is
    /// unrecognised.
    fn number(&mut self) -> (TokenKind, usize) {
        let len = self.digits(0);

        let leading_zero = matches!(self.chars.peek(0), Some((_, '0')));
        if leading_zero && len > 1 {
            (TokenKind::Unrecognised, len)
        } else {
            (TokenKind::Number, len)
        }
    }

    /// Parse a bit width suffix `_[0-9]+`
    fn width(&mut self) -> (TokenKind, usize) {
        let len = self.digits(1);

        if len == 0 {
            (TokenKind::Unrecognised, 1)
        } else {
            (TokenKind::Width, len + 1)
        }
    }

    /// Count the ascii digits starting `skip` characters ahead
    fn digits(&mut self, skip: usize) -> usize {
        let mut len = 0;
        while let Some(&(_, ch)) = self.chars.peek(skip + len) {
            if !ch.is_ascii_digit() {
                break;
            }

            len += 1;
        }

        len
    }
}

/// Is the character any valid whitespace
fn is_whitespace(c: char) -> bool {
    // A0 = Non breaking space
    "\t \u{A0}".contains(c) || is_newline(c)
}

/// Is the character a valid newline character
fn is_newline(c: char) -> bool {
    // 0B = Vertical Tab
    // 0C = Form Feed
    "\n\x0B\x0C\r".contains(c)
}

/// Get a mapping from keyword strings to their token kind
fn keywords() -> &'static HashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| HashMap::from(token::KEYWORD_DATA))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
        let mut lexer = Lexer::new(SourceId::default(), source).unwrap();
        let mut result = vec![];
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            result.push((tok.kind, tok.value));
        }
        result
    }

    #[test]
    fn simple_declaration() {
        assert_eq!(
            kinds("int16 ::= UINT_16"),
            vec![
                (TokenKind::Identifier, "int16"),
                (TokenKind::Assignment, "::="),
                (TokenKind::KwUint, "UINT"),
                (TokenKind::Width, "_16"),
            ]
        );
    }

    #[test]
    fn relational_operators() {
        assert_eq!(
            kinds("< <= > >= == !="),
            vec![
                (TokenKind::Less, "<"),
                (TokenKind::LessEqual, "<="),
                (TokenKind::Greater, ">"),
                (TokenKind::GreaterEqual, ">="),
                (TokenKind::Equal, "=="),
                (TokenKind::NotEqual, "!="),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a -- first -- b -- to end of line\nc"),
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Identifier, "c"),
            ]
        );
    }

    #[test]
    fn hyphenated_identifier() {
        assert_eq!(
            kinds("my-type-"),
            vec![
                (TokenKind::Identifier, "my-type"),
                (TokenKind::Unrecognised, "-"),
            ]
        );
    }

    #[test]
    fn lowercase_logic_keywords() {
        assert_eq!(
            kinds("and AND or OR And"),
            vec![
                (TokenKind::KwAnd, "and"),
                (TokenKind::KwAnd, "AND"),
                (TokenKind::KwOr, "or"),
                (TokenKind::KwOr, "OR"),
                (TokenKind::Identifier, "And"),
            ]
        );
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(
            kinds("007 _ = :"),
            vec![
                (TokenKind::Unrecognised, "007"),
                (TokenKind::Unrecognised, "_"),
                (TokenKind::Unrecognised, "="),
                (TokenKind::Unrecognised, ":"),
            ]
        );
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new(SourceId::default(), "a b").unwrap();
        assert_eq!(lexer.peek().value, "a");
        assert_eq!(lexer.peek().value, "a");
        assert_eq!(lexer.next_token().value, "a");
        assert_eq!(lexer.next_token().value, "b");
        assert!(lexer.is_eof());
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.offset(), 3);
    }

    #[test]
    fn rejects_non_nfc() {
        // "e" followed by a combining acute accent
        let err = Lexer::new(SourceId::default(), "e\u{301}").unwrap_err();
        assert_eq!(err, LexerError::NotNormalized { id: SourceId::default() });
    }
}
