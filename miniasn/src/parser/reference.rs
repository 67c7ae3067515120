//! Uses of types: attributes, type references with their values and the
//! branches of a choice.

use crate::{
    ast::{Attribute, ChoiceBranch, Name, TypeReference, TypeTarget, Values},
    token::TokenKind,
};

use super::{rule::Node, scope::NameKind, Parser, ParserError, Result, Rule};

/// `name type`.  The field is only added to the scope once its type has been
/// resolved.
pub(super) fn attribute(p: &mut Parser<'_>) -> Result<Node> {
    let name = p.name()?;
    let ty = p.type_reference()?;

    let id = p.id();
    p.scope.declare(&name, NameKind::Field, id)?;

    Ok(Node::Attribute(Attribute { name, ty }))
}

/// A built-in type or the name of an earlier declaration, optionally followed
/// by the values for its parameters
pub(super) fn type_reference(p: &mut Parser<'_>) -> Result<Node> {
    let (name, target, parameters) = if p.can_start(Rule::SimpleType) {
        let offset = p.lexer.offset();
        let simple = p.simple_type()?;
        let name = Name {
            value: simple.builtin.to_string(),
            offset,
        };

        (name, TypeTarget::Builtin(simple), 0)
    } else {
        let name = p.name()?;
        let Some(ty) = p.types.get(&name.value) else {
            return Err(ParserError::NotDeclaredType {
                name: name.value,
                offset: name.offset,
                id: p.id(),
            });
        };

        (name, TypeTarget::Declared(ty.id), ty.parameters)
    };

    let values = if p.can_start(Rule::Values) {
        let values = p.values()?;

        if values.values.len() != parameters {
            return Err(ParserError::ParametersLoad {
                name: name.value,
                expected: parameters,
                got: values.values.len(),
                offset: name.offset,
                id: p.id(),
            });
        }

        Some(values)
    } else {
        None
    };

    Ok(Node::TypeReference(TypeReference {
        name,
        target,
        values,
    }))
}

/// `[a, 2]` at an instantiation site
pub(super) fn values(p: &mut Parser<'_>) -> Result<Node> {
    p.next(&[TokenKind::LeftSquare])?;

    let mut values = vec![p.operand()?];
    loop {
        if p.eat(TokenKind::Comma).is_some() {
            values.push(p.operand()?);
        } else if p.can_start(Rule::Operand) {
            values.push(p.operand()?);
        } else {
            break;
        }
    }

    p.next(&[
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::Comma,
        TokenKind::RightSquare,
    ])?;

    Ok(Node::Values(Values { values }))
}

/// `type(condition)`
pub(super) fn choice_branch(p: &mut Parser<'_>) -> Result<Node> {
    let ty = p.type_reference()?;

    p.next(&[TokenKind::LeftParen])?;
    let condition = p.condition()?;
    p.next(&[TokenKind::RightParen])?;

    Ok(Node::ChoiceBranch(ChoiceBranch { ty, condition }))
}
