//! Conditions guarding the branches of a choice.  `and` binds tighter than
//! `or`, parentheses can be used to group.

use crate::{
    ast::{
        AndExpression, Comparison, Condition, Name, Operand, OrExpression, Relation,
        SimpleExpression,
    },
    token::TokenKind,
};

use super::{rule::Node, Parser, ParserError, Result};

/// `DEFAULT` or an expression
pub(super) fn condition(p: &mut Parser<'_>) -> Result<Node> {
    let condition = if p.eat(TokenKind::KwDefault).is_some() {
        Condition::Default
    } else {
        Condition::Expression(p.or_expression()?)
    };

    Ok(Node::Condition(condition))
}

pub(super) fn or_expression(p: &mut Parser<'_>) -> Result<Node> {
    let mut terms = vec![p.and_expression()?];
    while p.eat(TokenKind::KwOr).is_some() {
        terms.push(p.and_expression()?);
    }

    Ok(Node::OrExpression(OrExpression { terms }))
}

pub(super) fn and_expression(p: &mut Parser<'_>) -> Result<Node> {
    let mut terms = vec![p.simple_expression()?];
    while p.eat(TokenKind::KwAnd).is_some() {
        terms.push(p.simple_expression()?);
    }

    Ok(Node::AndExpression(AndExpression { terms }))
}

/// A comparison or a parenthesized expression
pub(super) fn simple_expression(p: &mut Parser<'_>) -> Result<Node> {
    let expr = if p.eat(TokenKind::LeftParen).is_some() {
        let inner = p.or_expression()?;
        p.next(&[TokenKind::KwAnd, TokenKind::KwOr, TokenKind::RightParen])?;
        SimpleExpression::Parenthesized(Box::new(inner))
    } else {
        SimpleExpression::Comparison(p.comparison()?)
    };

    Ok(Node::SimpleExpression(expr))
}

/// `left op right`
pub(super) fn comparison(p: &mut Parser<'_>) -> Result<Node> {
    let left = p.operand()?;

    let tok = p.next(&[
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
    ])?;
    let relation = match tok.kind {
        TokenKind::Equal => Relation::Equal,
        TokenKind::NotEqual => Relation::NotEqual,
        TokenKind::Less => Relation::Less,
        TokenKind::LessEqual => Relation::LessEqual,
        TokenKind::Greater => Relation::Greater,
        _ => Relation::GreaterEqual,
    };

    let right = p.operand()?;

    Ok(Node::Comparison(Comparison {
        left,
        relation,
        right,
    }))
}

/// A name in the current declaration's scope or an integer
pub(super) fn operand(p: &mut Parser<'_>) -> Result<Node> {
    let tok = p.next(&[TokenKind::Identifier, TokenKind::Number])?;

    let operand = match tok.kind {
        TokenKind::Identifier => {
            let name = Name {
                value: tok.value.to_string(),
                offset: tok.offset,
            };
            p.scope.resolve(&name, tok.id)?;
            Operand::Name(name)
        }
        _ => match tok.value.parse() {
            Ok(value) => Operand::Integer(value),
            Err(_) => {
                return Err(ParserError::InvalidNumber {
                    value: tok.value.to_string(),
                    offset: tok.offset,
                    id: tok.id,
                })
            }
        },
    };

    Ok(Node::Operand(operand))
}
