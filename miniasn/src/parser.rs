mod declaration;
mod error;
mod expression;
mod reference;
mod rule;
mod scope;

use tracing::{debug, trace};

use crate::{
    ast::{Name, Program},
    compiler::SourceId,
    lexer::Lexer,
    token::{Token, TokenKind},
    util::CowVec,
};

pub use self::error::{ParserError, Result, SemanticFault};
pub use self::rule::Rule;

use self::{
    rule::Node,
    scope::{Scope, TypeRegistry},
};

/// Maximum nesting of rules, reached in practice only through parenthesized
/// expressions
const MAX_DEPTH: usize = 256;

/// Parser for MiniASN schema files
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    /// Lexer to get tokens from a source file
    lexer: Lexer<'a>,

    /// Names local to the declaration currently being parsed
    scope: Scope,

    /// All types declared before the current declaration
    types: TypeRegistry,

    /// Name of the declaration currently being parsed
    declaring: Name,

    /// Current recursion depth of the parser, as measured by parse_node.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a lexer
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            scope: Scope::default(),
            types: TypeRegistry::default(),
            declaring: Name::default(),
            depth: 0,
        }
    }

    /// Run the parser to produce the list of type declarations.  Stops at the
    /// first error found.
    pub fn run(mut self) -> Result<Program> {
        let mut declarations = vec![];

        while !self.lexer.is_eof() {
            match self.type_declaration() {
                Ok(decl) => declarations.push(decl),
                Err(err) => {
                    debug!(%err, offset = err.span().start, "parse aborted");
                    return Err(err);
                }
            }
        }

        debug!(
            types = ?self.types.names().collect::<Vec<_>>(),
            "parse finished"
        );

        Ok(Program { declarations })
    }

    /// The source currently being parsed
    fn id(&self) -> SourceId {
        self.lexer.id()
    }

    /// Consume a token of the given kind or return an error.  If an empty
    /// list is given, returns any token.
    fn next(&mut self, kind: impl Into<CowVec<TokenKind>>) -> Result<Token<'a>> {
        self.peek(kind)?;
        Ok(self.lexer.next_token())
    }

    /// Peek a token without consuming it or return an error if the token is not
    /// of one of the provided kinds. If an empty list is given, returns any token.
    fn peek(&mut self, kind: impl Into<CowVec<TokenKind>>) -> Result<Token<'a>> {
        let kind = kind.into();

        let peek = self.lexer.peek();

        if kind.contains(&peek.kind) || kind.is_empty() {
            Ok(peek)
        } else {
            Err(self.unexpected(kind, peek))
        }
    }

    /// Is the next token of the given kind
    fn at(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().kind == kind
    }

    /// Consume the next token if it is of the given kind
    fn eat(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.at(kind) {
            Some(self.lexer.next_token())
        } else {
            None
        }
    }

    /// Consume an identifier token as a name
    fn name(&mut self) -> Result<Name> {
        let tok = self.next(&[TokenKind::Identifier])?;

        Ok(Name {
            value: tok.value.to_string(),
            offset: tok.offset,
        })
    }

    /// Can the given rule start at the current position
    fn can_start(&mut self, rule: Rule) -> bool {
        rule.can_start(self.lexer.peek().kind)
    }

    /// Parse the given rule, erroring if the next token is not in the rule's
    /// FIRST set.
    fn parse_node(&mut self, rule: Rule) -> Result<Node> {
        if !self.can_start(rule) {
            let peek = self.lexer.peek();
            return Err(self.unexpected(rule.first_tokens().into(), peek));
        }

        if self.depth >= MAX_DEPTH {
            return Err(ParserError::ParserDepthExceeded {
                offset: self.lexer.offset(),
                id: self.id(),
            });
        }

        let entry = rule.entry();
        trace!(rule = ?entry.rule, offset = self.lexer.offset(), "parse rule");

        self.depth += 1;
        let node = (entry.build)(self);
        self.depth -= 1;

        node
    }

    /// Parse whichever one of the alternative rules can start at the current
    /// position.
    fn dispatch(&mut self, alternatives: &[Rule]) -> Result<Node> {
        let kind = self.lexer.peek().kind;

        match alternatives.iter().find(|rule| rule.can_start(kind)) {
            Some(&rule) => self.parse_node(rule),
            None => {
                let mut expected = vec![];
                for rule in alternatives {
                    for tok in rule.first_tokens() {
                        if !expected.contains(&tok) {
                            expected.push(tok);
                        }
                    }
                }

                let peek = self.lexer.peek();
                Err(self.unexpected(expected.into(), peek))
            }
        }
    }

    /// Create a syntax error for an unexpected token
    fn unexpected(&self, expected: CowVec<TokenKind>, got: Token) -> ParserError {
        ParserError::Syntax {
            expected,
            got: got.kind,
            offset: got.offset,
            length: got.value.len(),
            id: got.id,
        }
    }

    /// Create the error for a builder returning the wrong node kind
    fn wrong_node(&mut self, rule: Rule) -> ParserError {
        ParserError::WrongNode {
            rule,
            offset: self.lexer.offset(),
            id: self.id(),
        }
    }
}
