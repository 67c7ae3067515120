//! Top level declarations and their bodies

use tracing::debug;

use crate::{
    ast::{
        ArrayDeclaration, Arguments, Attribute, Builtin, ChoiceDeclaration, SequenceDeclaration,
        SimpleType, TypeBody, TypeDeclaration,
    },
    token::{Token, TokenKind},
};

use super::{
    rule::Node,
    scope::{NameKind, Scope},
    Parser, ParserError, Result, Rule, SemanticFault,
};

/// `name ::= body`
pub(super) fn type_declaration(p: &mut Parser<'_>) -> Result<Node> {
    let id = p.id();
    let name = p.name()?;
    p.types.ensure_unused(&name, id)?;
    p.next(&[TokenKind::Assignment])?;

    p.scope = Scope::default();
    p.declaring = name.clone();

    let body = match p.dispatch(&[
        Rule::SimpleType,
        Rule::SequenceDeclaration,
        Rule::ArrayDeclaration,
        Rule::ChoiceDeclaration,
    ])? {
        Node::SimpleType(ty) => TypeBody::Simple(ty),
        Node::SequenceDeclaration(seq) => TypeBody::Sequence(seq),
        Node::ArrayDeclaration(arr) => TypeBody::Array(arr),
        Node::ChoiceDeclaration(choice) => TypeBody::Choice(choice),
        _ => return Err(p.wrong_node(Rule::TypeDeclaration)),
    };

    p.scope = Scope::default();

    let parameters = body.parameters().len();
    let ty = p.types.register(&name, parameters, id)?;
    debug!(name = %name, id = ty.index(), parameters, "type declared");

    Ok(Node::TypeDeclaration(TypeDeclaration { name, body }))
}

/// `UINT`, `BITSTRING` or `BOOL`, with an optional `_width` for the first two
pub(super) fn simple_type(p: &mut Parser<'_>) -> Result<Node> {
    let tok = p.next(&[TokenKind::KwUint, TokenKind::KwBitString, TokenKind::KwBool])?;

    let builtin = match tok.kind {
        TokenKind::KwUint => Builtin::Uint,
        TokenKind::KwBitString => Builtin::BitString,
        _ => Builtin::Bool,
    };

    // the width has to be directly attached to the keyword, `UINT _8` is not
    // a width
    let mut width = None;
    let peek = p.lexer.peek();
    if builtin.takes_width() && peek.kind == TokenKind::Width && peek.offset == tok.end() {
        let tok = p.lexer.next_token();
        width = Some(parse_width(tok)?);
    }

    Ok(Node::SimpleType(SimpleType { builtin, width }))
}

/// Width tokens include their leading underscore
fn parse_width(tok: Token) -> Result<u32> {
    let digits = tok.value.trim_start_matches('_');

    match digits.parse::<u32>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(ParserError::InvalidNumber {
            value: tok.value.to_string(),
            offset: tok.offset,
            id: tok.id,
        }),
    }
}

/// `[a b c]` at a declaration site, with optional commas between names.
/// Every name is added to the declaration's scope.
pub(super) fn arguments(p: &mut Parser<'_>) -> Result<Node> {
    p.next(&[TokenKind::LeftSquare])?;

    let id = p.id();
    let mut names = vec![];

    loop {
        let name = p.name()?;
        p.scope.declare(&name, NameKind::Parameter, id)?;
        names.push(name);

        if p.eat(TokenKind::Comma).is_some() {
            continue;
        }

        let tok = p.peek(&[
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::RightSquare,
        ])?;
        if tok.kind == TokenKind::RightSquare {
            break;
        }
    }

    p.next(&[TokenKind::RightSquare])?;

    Ok(Node::Arguments(Arguments { names }))
}

/// `SEQUENCE[params] { attributes }`, the parameters are optional
pub(super) fn sequence_declaration(p: &mut Parser<'_>) -> Result<Node> {
    p.next(&[TokenKind::KwSequence])?;

    let arguments = if p.can_start(Rule::Arguments) {
        p.arguments()?
    } else {
        Arguments::default()
    };

    let attributes = attribute_list(p)?;

    Ok(Node::SequenceDeclaration(SequenceDeclaration {
        arguments,
        attributes,
    }))
}

/// `ARRAY[count] { attributes }`, exactly one parameter
pub(super) fn array_declaration(p: &mut Parser<'_>) -> Result<Node> {
    p.next(&[TokenKind::KwArray])?;

    let arguments = p.arguments()?;
    let [count]: [_; 1] = arguments.names.try_into().map_err(|names: Vec<_>| {
        ParserError::ArgumentsLoad {
            name: p.declaring.value.clone(),
            expected: 1,
            got: names.len(),
            offset: p.declaring.offset,
            id: p.id(),
        }
    })?;

    let attributes = attribute_list(p)?;

    Ok(Node::ArrayDeclaration(ArrayDeclaration { count, attributes }))
}

/// `CHOICE[params] { branches }`, exactly one branch must have the `DEFAULT`
/// condition
pub(super) fn choice_declaration(p: &mut Parser<'_>) -> Result<Node> {
    p.next(&[TokenKind::KwChoice])?;

    let arguments = p.arguments()?;
    p.next(&[TokenKind::LeftCurly])?;

    let mut branches = vec![];
    let mut default = None;

    loop {
        let branch = p.choice_branch()?;

        if branch.condition.is_default() {
            if let Some(first) = default {
                return Err(ParserError::Semantic {
                    fault: SemanticFault::DuplicateDefault { first },
                    name: p.declaring.value.clone(),
                    offset: p.declaring.offset,
                    id: p.id(),
                });
            }
            default = Some(branch.ty.name.offset);
        }

        branches.push(branch);

        if !p.can_start(Rule::ChoiceBranch) {
            break;
        }
    }

    let mut expected = Rule::ChoiceBranch.first_tokens();
    expected.push(TokenKind::RightCurly);
    p.next(expected)?;

    if default.is_none() {
        return Err(ParserError::Semantic {
            fault: SemanticFault::MissingDefault,
            name: p.declaring.value.clone(),
            offset: p.declaring.offset,
            id: p.id(),
        });
    }

    Ok(Node::ChoiceDeclaration(ChoiceDeclaration {
        arguments,
        branches,
    }))
}

/// `{ attribute+ }` shared by sequences and arrays
fn attribute_list(p: &mut Parser<'_>) -> Result<Vec<Attribute>> {
    p.next(&[TokenKind::LeftCurly])?;

    let mut attributes = vec![p.attribute()?];
    while p.can_start(Rule::Attribute) {
        attributes.push(p.attribute()?);
    }

    p.next(&[TokenKind::Identifier, TokenKind::RightCurly])?;

    Ok(attributes)
}
