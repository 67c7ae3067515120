use std::fmt::Display;

use crate::compiler::SourceId;

/// The kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    // Single Character tokens
    LeftCurly,
    RightCurly,
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    Comma,
    Less,
    Greater,

    // Compound Tokens
    Identifier,
    Number,
    Width,
    Assignment,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,

    // Keywords
    KwSequence,
    KwArray,
    KwChoice,
    KwUint,
    KwBitString,
    KwBool,
    KwDefault,
    KwAnd,
    KwOr,

    // End of the source text, returned forever once reached
    Eof,

    // Errors
    Unrecognised,
}

/// Data relating to a single lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token<'a> {
    /// The type of this token
    pub kind: TokenKind,

    /// The string value of the token, will be a valid string for the token kind
    /// so it can be parsed further, e.g. into a number.
    pub value: &'a str,

    /// Byte offset into the file that the token starts at.  The end location
    /// can be derived from this offset + the length of the value string.
    pub offset: usize,

    /// The ID of the source the token was lexed from
    pub id: SourceId,
}

impl Token<'_> {
    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }
}

/// String/Enum mapping for keywords
pub const KEYWORD_DATA: [(&str, TokenKind); 11] = [
    ("SEQUENCE", TokenKind::KwSequence),
    ("ARRAY", TokenKind::KwArray),
    ("CHOICE", TokenKind::KwChoice),
    ("UINT", TokenKind::KwUint),
    ("BITSTRING", TokenKind::KwBitString),
    ("BOOL", TokenKind::KwBool),
    ("DEFAULT", TokenKind::KwDefault),
    ("AND", TokenKind::KwAnd),
    ("and", TokenKind::KwAnd),
    ("OR", TokenKind::KwOr),
    ("or", TokenKind::KwOr),
];

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::LeftCurly => "`{`",
            TokenKind::RightCurly => "`}`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftSquare => "`[`",
            TokenKind::RightSquare => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Width => "bit width",
            TokenKind::Assignment => "`::=`",
            TokenKind::Equal => "`==`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::KwSequence => "`SEQUENCE`",
            TokenKind::KwArray => "`ARRAY`",
            TokenKind::KwChoice => "`CHOICE`",
            TokenKind::KwUint => "`UINT`",
            TokenKind::KwBitString => "`BITSTRING`",
            TokenKind::KwBool => "`BOOL`",
            TokenKind::KwDefault => "`DEFAULT`",
            TokenKind::KwAnd => "`AND`",
            TokenKind::KwOr => "`OR`",
            TokenKind::Eof => "end of input",
            TokenKind::Unrecognised => "unrecognised character",
        };

        write!(f, "{s}")
    }
}
