//! Representation of a parsed and validated MiniASN schema (NOT an encoded message)
//!
//! Every node implements [`Display`], producing the canonical rendering of the
//! node.  Rendering never fails and does not re-validate anything.

mod expression;

use std::fmt::Display;

pub use self::expression::{
    AndExpression, Comparison, Condition, Operand, OrExpression, Relation, SimpleExpression,
};

/// A whole schema document: all type declarations in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub declarations: Vec<TypeDeclaration>,
}

/// Handle to a declaration within a [`Program`], the index of the declaration
/// in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) usize);

/// A name as written in the source, with the byte offset it was found at
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Name {
    pub value: String,
    pub offset: usize,
}

/// A top level `name ::= body` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: Name,
    pub body: TypeBody,
}

/// The right hand side of a type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    Simple(SimpleType),
    Sequence(SequenceDeclaration),
    Array(ArrayDeclaration),
    Choice(ChoiceDeclaration),
}

/// The scalar types built into the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Builtin {
    Uint,
    BitString,
    Bool,
}

/// A built-in scalar, optionally with a bit width, `UINT_16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleType {
    pub builtin: Builtin,
    pub width: Option<u32>,
}

/// Parameter names declared in brackets at a declaration site.  Empty when
/// the brackets were omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Arguments {
    pub names: Vec<Name>,
}

/// `SEQUENCE[params] { attributes }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDeclaration {
    pub arguments: Arguments,
    pub attributes: Vec<Attribute>,
}

/// `ARRAY[count] { attributes }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDeclaration {
    /// The single parameter binding the element count
    pub count: Name,
    pub attributes: Vec<Attribute>,
}

/// `CHOICE[params] { branches }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceDeclaration {
    pub arguments: Arguments,
    pub branches: Vec<ChoiceBranch>,
}

/// A named field of a sequence or array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub ty: TypeReference,
}

/// A use of a type, with the values given for its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// The name as written, for built-ins this is the keyword
    pub name: Name,
    pub target: TypeTarget,
    pub values: Option<Values>,
}

/// What a type reference was resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTarget {
    Builtin(SimpleType),
    Declared(TypeId),
}

/// Values supplied when instantiating a parameterized type, `[a 2]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    pub values: Vec<Operand>,
}

/// One alternative of a choice, selected when its condition holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceBranch {
    pub ty: TypeReference,
    pub condition: Condition,
}

impl Program {
    /// Get the declaration a handle refers to
    pub fn get(&self, id: TypeId) -> Option<&TypeDeclaration> {
        self.declarations.get(id.0)
    }

    /// Find a declaration by its name
    pub fn find(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.iter().find(|d| d.name.value == name)
    }
}

impl TypeId {
    /// Position of the declaration in document order
    pub fn index(self) -> usize {
        self.0
    }
}

impl TypeBody {
    /// The parameters declared by this type, in order
    pub fn parameters(&self) -> &[Name] {
        match self {
            TypeBody::Simple(_) => &[],
            TypeBody::Sequence(s) => &s.arguments.names,
            TypeBody::Array(a) => std::slice::from_ref(&a.count),
            TypeBody::Choice(c) => &c.arguments.names,
        }
    }
}

impl Builtin {
    /// Can this type have a bit width suffix
    pub fn takes_width(self) -> bool {
        matches!(self, Builtin::Uint | Builtin::BitString)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for decl in &self.declarations {
            writeln!(f, "{decl}")?;
        }

        Ok(())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for TypeDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::= {}", self.name, self.body)
    }
}

impl Display for TypeBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeBody::Simple(s) => write!(f, "{s}"),
            TypeBody::Sequence(s) => write!(f, "{s}"),
            TypeBody::Array(a) => write!(f, "{a}"),
            TypeBody::Choice(c) => write!(f, "{c}"),
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Builtin::Uint => "UINT",
            Builtin::BitString => "BITSTRING",
            Builtin::Bool => "BOOL",
        };

        write!(f, "{s}")
    }
}

impl Display for SimpleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.builtin)?;

        if let Some(width) = self.width {
            write!(f, "_{width}")?;
        }

        Ok(())
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.names.is_empty() {
            return Ok(());
        }

        write!(f, "[")?;
        for (i, name) in self.names.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "]")
    }
}

impl Display for SequenceDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SEQUENCE{}", self.arguments)?;
        for attribute in &self.attributes {
            write!(f, "\n\t{attribute}")?;
        }

        Ok(())
    }
}

impl Display for ArrayDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARRAY[{}]", self.count)?;
        for attribute in &self.attributes {
            write!(f, "\n\t{attribute}")?;
        }

        Ok(())
    }
}

impl Display for ChoiceDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CHOICE{}", self.arguments)?;
        for branch in &self.branches {
            write!(f, "\n\t{branch}")?;
        }

        Ok(())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl Display for TypeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target {
            TypeTarget::Builtin(simple) => write!(f, "{simple}")?,
            TypeTarget::Declared(_) => write!(f, "{}", self.name)?,
        }

        if let Some(values) = &self.values {
            write!(f, "{values}")?;
        }

        Ok(())
    }
}

impl Display for Values {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl Display for ChoiceBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.ty, self.condition)
    }
}
