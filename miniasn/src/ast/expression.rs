//! Boolean conditions guarding choice branches

use std::fmt::Display;

use super::Name;

/// The guard of a choice branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Selected when no other branch matches
    Default,
    Expression(OrExpression),
}

/// One or more and-expressions joined by `OR`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrExpression {
    pub terms: Vec<AndExpression>,
}

/// One or more simple expressions joined by `AND`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndExpression {
    pub terms: Vec<SimpleExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleExpression {
    Comparison(Comparison),
    Parenthesized(Box<OrExpression>),
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub left: Operand,
    pub relation: Relation,
    pub right: Operand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

/// A parameter or field name, or an integer literal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operand {
    Name(Name),
    Integer(u64),
}

impl Condition {
    pub fn is_default(&self) -> bool {
        matches!(self, Condition::Default)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Default => write!(f, "DEFAULT"),
            Condition::Expression(e) => write!(f, "{e}"),
        }
    }
}

impl Display for OrExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i != 0 {
                write!(f, " or ")?;
            }
            write!(f, "{term}")?;
        }

        Ok(())
    }
}

impl Display for AndExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i != 0 {
                write!(f, " and ")?;
            }
            write!(f, "{term}")?;
        }

        Ok(())
    }
}

impl Display for SimpleExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimpleExpression::Comparison(c) => write!(f, "{c}"),
            SimpleExpression::Parenthesized(e) => write!(f, "({e})"),
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation, self.right)
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Relation::Equal => "==",
            Relation::NotEqual => "!=",
            Relation::Less => "<",
            Relation::LessEqual => "<=",
            Relation::Greater => ">",
            Relation::GreaterEqual => ">=",
        };

        write!(f, "{s}")
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Name(n) => write!(f, "{n}"),
            Operand::Integer(i) => write!(f, "{i}"),
        }
    }
}
