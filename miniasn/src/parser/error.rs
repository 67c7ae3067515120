use std::ops::Range;

use thiserror::Error;

use crate::{compiler::SourceId, lexer::LexerError, token::TokenKind, util::CowVec};

use super::Rule;

/// Any error that can be emitted by the parser.  The first error found aborts
/// the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// The next token could not start any of the acceptable constructs
    #[error("expected {expected}, found {got}")]
    Syntax {
        expected: CowVec<TokenKind>,
        got: TokenKind,
        offset: usize,
        length: usize,
        id: SourceId,
    },

    /// A number or bit width that does not fit, or a zero bit width
    #[error("invalid number `{value}`")]
    InvalidNumber {
        value: String,
        offset: usize,
        id: SourceId,
    },

    /// A declaration has the wrong number of parameters for its kind
    #[error("`{name}` must declare exactly {expected} parameter, found {got}")]
    ArgumentsLoad {
        name: String,
        expected: usize,
        got: usize,
        offset: usize,
        id: SourceId,
    },

    /// A name was declared twice in the same namespace
    #[error("name `{name}` is already in use")]
    NameInUse {
        name: String,
        offset: usize,
        first: usize,
        id: SourceId,
    },

    /// Reference to a type that is not built in and not declared earlier
    #[error("type `{name}` has not been declared")]
    NotDeclaredType {
        name: String,
        offset: usize,
        id: SourceId,
    },

    /// A type was instantiated with the wrong number of values
    #[error("type `{name}` expects {expected} argument(s), found {got}")]
    ParametersLoad {
        name: String,
        expected: usize,
        got: usize,
        offset: usize,
        id: SourceId,
    },

    /// A structural rule of a declaration was broken
    #[error("{fault} in `{name}`")]
    Semantic {
        fault: SemanticFault,
        name: String,
        offset: usize,
        id: SourceId,
    },

    /// A value or condition operand names something that is not a parameter
    /// or an earlier field
    #[error("name `{name}` has not been declared")]
    NotDeclaredName {
        name: String,
        offset: usize,
        id: SourceId,
    },

    /// Recursion depth limit reached in the parser (try to avoid stack overflow)
    #[error("expression nesting is too deep")]
    ParserDepthExceeded { offset: usize, id: SourceId },

    /// A rule builder returned a node for a different rule.  If shown to the
    /// user, this is a bug in the parser, not in the schema.
    #[error("internal error: rule {rule:?} produced an unexpected node")]
    WrongNode {
        rule: Rule,
        offset: usize,
        id: SourceId,
    },

    /// An error occurred within the lexer
    #[error(transparent)]
    Lexer(#[from] LexerError),
}

/// Structural faults reported through [`ParserError::Semantic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum SemanticFault {
    #[error("choice has no DEFAULT branch")]
    MissingDefault,

    /// `first` is the offset of the earlier DEFAULT branch
    #[error("choice has more than one DEFAULT branch")]
    DuplicateDefault { first: usize },
}

pub type Result<T = (), E = ParserError> = std::result::Result<T, E>;

impl ParserError {
    /// The source the error was found in
    pub fn id(&self) -> SourceId {
        match *self {
            ParserError::Syntax { id, .. }
            | ParserError::InvalidNumber { id, .. }
            | ParserError::ArgumentsLoad { id, .. }
            | ParserError::NameInUse { id, .. }
            | ParserError::NotDeclaredType { id, .. }
            | ParserError::ParametersLoad { id, .. }
            | ParserError::Semantic { id, .. }
            | ParserError::NotDeclaredName { id, .. }
            | ParserError::ParserDepthExceeded { id, .. }
            | ParserError::WrongNode { id, .. } => id,
            ParserError::Lexer(LexerError::NotNormalized { id }) => id,
        }
    }

    /// Byte range within the source that the error refers to
    pub fn span(&self) -> Range<usize> {
        match self {
            ParserError::Syntax { offset, length, .. } => *offset..offset + length,
            ParserError::InvalidNumber { value, offset, .. } => *offset..offset + value.len(),
            ParserError::ArgumentsLoad { name, offset, .. }
            | ParserError::NameInUse { name, offset, .. }
            | ParserError::NotDeclaredType { name, offset, .. }
            | ParserError::ParametersLoad { name, offset, .. }
            | ParserError::Semantic { name, offset, .. }
            | ParserError::NotDeclaredName { name, offset, .. } => *offset..offset + name.len(),
            ParserError::ParserDepthExceeded { offset, .. }
            | ParserError::WrongNode { offset, .. } => *offset..*offset,
            ParserError::Lexer(_) => 0..0,
        }
    }
}
