//! The grammar rule registry used for predictive dispatch.
//!
//! Every rule has a FIRST set, the tokens (or other rules) that can begin it,
//! and a builder that parses the rule once the lookahead is known to match.
//! At any decision point at most one of the alternatives can match the
//! lookahead, so the parser never backtracks.

use crate::{
    ast::{
        AndExpression, ArrayDeclaration, Arguments, Attribute, ChoiceBranch, ChoiceDeclaration,
        Comparison, Condition, Operand, OrExpression, SequenceDeclaration, SimpleExpression,
        SimpleType, TypeDeclaration, TypeReference, Values,
    },
    token::TokenKind,
};

use super::{declaration, expression, reference, Parser, Result};

/// Identifier for each grammar construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    TypeDeclaration,
    SimpleType,
    SequenceDeclaration,
    ArrayDeclaration,
    ChoiceDeclaration,
    Arguments,
    Attribute,
    TypeReference,
    Values,
    ChoiceBranch,
    Condition,
    OrExpression,
    AndExpression,
    SimpleExpression,
    Comparison,
    Operand,
}

/// One member of a FIRST set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum First {
    Token(TokenKind),

    /// Anything that can start the given rule
    Rule(Rule),
}

/// The output of a rule builder, one variant per rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    TypeDeclaration(TypeDeclaration),
    SimpleType(SimpleType),
    SequenceDeclaration(SequenceDeclaration),
    ArrayDeclaration(ArrayDeclaration),
    ChoiceDeclaration(ChoiceDeclaration),
    Arguments(Arguments),
    Attribute(Attribute),
    TypeReference(TypeReference),
    Values(Values),
    ChoiceBranch(ChoiceBranch),
    Condition(Condition),
    OrExpression(OrExpression),
    AndExpression(AndExpression),
    SimpleExpression(SimpleExpression),
    Comparison(Comparison),
    Operand(Operand),
}

/// Parsing routine for a rule
pub(super) type Builder = fn(&mut Parser<'_>) -> Result<Node>;

/// Registry entry of a single rule
pub(super) struct RuleEntry {
    pub(super) rule: Rule,
    pub(super) first: &'static [First],
    pub(super) build: Builder,
}

use self::First::Token as T;

/// All rules, indexed by `Rule as usize`
static RULES: [RuleEntry; 16] = [
    RuleEntry {
        rule: Rule::TypeDeclaration,
        first: &[T(TokenKind::Identifier)],
        build: declaration::type_declaration,
    },
    RuleEntry {
        rule: Rule::SimpleType,
        first: &[
            T(TokenKind::KwUint),
            T(TokenKind::KwBitString),
            T(TokenKind::KwBool),
        ],
        build: declaration::simple_type,
    },
    RuleEntry {
        rule: Rule::SequenceDeclaration,
        first: &[T(TokenKind::KwSequence)],
        build: declaration::sequence_declaration,
    },
    RuleEntry {
        rule: Rule::ArrayDeclaration,
        first: &[T(TokenKind::KwArray)],
        build: declaration::array_declaration,
    },
    RuleEntry {
        rule: Rule::ChoiceDeclaration,
        first: &[T(TokenKind::KwChoice)],
        build: declaration::choice_declaration,
    },
    RuleEntry {
        rule: Rule::Arguments,
        first: &[T(TokenKind::LeftSquare)],
        build: declaration::arguments,
    },
    RuleEntry {
        rule: Rule::Attribute,
        first: &[T(TokenKind::Identifier)],
        build: reference::attribute,
    },
    RuleEntry {
        rule: Rule::TypeReference,
        first: &[First::Rule(Rule::SimpleType), T(TokenKind::Identifier)],
        build: reference::type_reference,
    },
    RuleEntry {
        rule: Rule::Values,
        first: &[T(TokenKind::LeftSquare)],
        build: reference::values,
    },
    RuleEntry {
        rule: Rule::ChoiceBranch,
        first: &[First::Rule(Rule::TypeReference)],
        build: reference::choice_branch,
    },
    RuleEntry {
        rule: Rule::Condition,
        first: &[T(TokenKind::KwDefault), First::Rule(Rule::OrExpression)],
        build: expression::condition,
    },
    RuleEntry {
        rule: Rule::OrExpression,
        first: &[First::Rule(Rule::AndExpression)],
        build: expression::or_expression,
    },
    RuleEntry {
        rule: Rule::AndExpression,
        first: &[First::Rule(Rule::SimpleExpression)],
        build: expression::and_expression,
    },
    RuleEntry {
        rule: Rule::SimpleExpression,
        first: &[T(TokenKind::LeftParen), First::Rule(Rule::Comparison)],
        build: expression::simple_expression,
    },
    RuleEntry {
        rule: Rule::Comparison,
        first: &[First::Rule(Rule::Operand)],
        build: expression::comparison,
    },
    RuleEntry {
        rule: Rule::Operand,
        first: &[T(TokenKind::Identifier), T(TokenKind::Number)],
        build: expression::operand,
    },
];

impl Rule {
    /// The registry entry for this rule
    pub(super) fn entry(self) -> &'static RuleEntry {
        &RULES[self as usize]
    }

    /// Can the given token kind begin this rule
    pub fn can_start(self, kind: TokenKind) -> bool {
        self.entry().first.iter().any(|first| match *first {
            First::Token(tok) => tok == kind,
            First::Rule(rule) => rule.can_start(kind),
        })
    }

    /// All token kinds that can begin this rule, in registry order
    pub fn first_tokens(self) -> Vec<TokenKind> {
        let mut tokens = vec![];
        self.collect_first(&mut tokens);
        tokens
    }

    fn collect_first(self, tokens: &mut Vec<TokenKind>) {
        for first in self.entry().first {
            match *first {
                First::Token(tok) if !tokens.contains(&tok) => tokens.push(tok),
                First::Token(_) => (),
                First::Rule(rule) => rule.collect_first(tokens),
            }
        }
    }
}

/// Generate typed wrappers around [`Parser::parse_node`] for each rule
macro_rules! typed_rules {
    ($($fn:ident: $rule:ident -> $ty:ty;)*) => {
        impl Parser<'_> {
            $(
                #[doc = concat!("Parse a `", stringify!($rule), "` rule")]
                pub(super) fn $fn(&mut self) -> Result<$ty> {
                    match self.parse_node(Rule::$rule)? {
                        Node::$rule(node) => Ok(node),
                        _ => Err(self.wrong_node(Rule::$rule)),
                    }
                }
            )*
        }
    };
}

typed_rules! {
    type_declaration: TypeDeclaration -> TypeDeclaration;
    simple_type: SimpleType -> SimpleType;
    arguments: Arguments -> Arguments;
    attribute: Attribute -> Attribute;
    type_reference: TypeReference -> TypeReference;
    values: Values -> Values;
    choice_branch: ChoiceBranch -> ChoiceBranch;
    condition: Condition -> Condition;
    or_expression: OrExpression -> OrExpression;
    and_expression: AndExpression -> AndExpression;
    simple_expression: SimpleExpression -> SimpleExpression;
    comparison: Comparison -> Comparison;
    operand: Operand -> Operand;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Rule; 16] = [
        Rule::TypeDeclaration,
        Rule::SimpleType,
        Rule::SequenceDeclaration,
        Rule::ArrayDeclaration,
        Rule::ChoiceDeclaration,
        Rule::Arguments,
        Rule::Attribute,
        Rule::TypeReference,
        Rule::Values,
        Rule::ChoiceBranch,
        Rule::Condition,
        Rule::OrExpression,
        Rule::AndExpression,
        Rule::SimpleExpression,
        Rule::Comparison,
        Rule::Operand,
    ];

    #[test]
    fn registry_is_indexed_by_rule() {
        for rule in ALL {
            assert_eq!(rule.entry().rule, rule);
            assert!(!rule.entry().first.is_empty(), "{rule:?} has no FIRST set");
        }
    }

    #[test]
    fn nested_first_sets() {
        assert_eq!(
            Rule::ChoiceBranch.first_tokens(),
            vec![
                TokenKind::KwUint,
                TokenKind::KwBitString,
                TokenKind::KwBool,
                TokenKind::Identifier
            ]
        );
        assert_eq!(
            Rule::Condition.first_tokens(),
            vec![
                TokenKind::KwDefault,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Number
            ]
        );
    }

    #[test]
    fn declaration_bodies_are_unambiguous() {
        let bodies = [
            Rule::SimpleType,
            Rule::SequenceDeclaration,
            Rule::ArrayDeclaration,
            Rule::ChoiceDeclaration,
        ];

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                for tok in a.first_tokens() {
                    assert!(!b.can_start(tok), "{a:?} and {b:?} both start with {tok:?}");
                }
            }
        }
    }

    #[test]
    fn can_start() {
        assert!(Rule::SimpleExpression.can_start(TokenKind::Number));
        assert!(Rule::SimpleExpression.can_start(TokenKind::LeftParen));
        assert!(!Rule::SimpleExpression.can_start(TokenKind::KwDefault));
        assert!(Rule::TypeReference.can_start(TokenKind::KwBool));
    }
}
