//! Symbol tables used while parsing: the names local to one declaration and
//! the global list of declared types.

use std::collections::HashMap;

use crate::{
    ast::{Name, TypeId},
    compiler::SourceId,
};

use super::{ParserError, Result};

/// What a name within a declaration refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) enum NameKind {
    Parameter,
    Field,
}

/// The names declared within a single declaration.  Parameters and fields
/// share one namespace.
#[derive(Debug, Clone, Default)]
pub(super) struct Scope {
    /// Name to (kind, offset of the declaration of the name)
    names: HashMap<String, (NameKind, usize)>,
}

/// A type that has been declared so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) struct RegisteredType {
    pub(super) id: TypeId,

    /// Number of parameters the type declares
    pub(super) parameters: usize,

    /// Offset of the declaration's name
    pub(super) offset: usize,
}

/// All types declared earlier in the document, in declaration order
#[derive(Debug, Clone, Default)]
pub(super) struct TypeRegistry {
    names: HashMap<String, RegisteredType>,
    order: Vec<String>,
}

impl Scope {
    /// Add a name to the scope, erroring if it is already declared
    pub(super) fn declare(&mut self, name: &Name, kind: NameKind, id: SourceId) -> Result {
        if let Some(&(_, first)) = self.names.get(&name.value) {
            return Err(ParserError::NameInUse {
                name: name.value.clone(),
                offset: name.offset,
                first,
                id,
            });
        }

        self.names.insert(name.value.clone(), (kind, name.offset));
        Ok(())
    }

    /// What kind of thing a name in scope refers to, if it is in scope
    pub(super) fn get(&self, name: &str) -> Option<NameKind> {
        self.names.get(name).map(|&(kind, _)| kind)
    }

    /// Check that a name used as a value refers to something in scope
    pub(super) fn resolve(&self, name: &Name, id: SourceId) -> Result<NameKind> {
        self.get(&name.value).ok_or_else(|| ParserError::NotDeclaredName {
            name: name.value.clone(),
            offset: name.offset,
            id,
        })
    }
}

impl TypeRegistry {
    /// Find a previously declared type
    pub(super) fn get(&self, name: &str) -> Option<RegisteredType> {
        self.names.get(name).copied()
    }

    /// Error if the name is already used by a declared type
    pub(super) fn ensure_unused(&self, name: &Name, id: SourceId) -> Result {
        match self.get(&name.value) {
            Some(existing) => Err(ParserError::NameInUse {
                name: name.value.clone(),
                offset: name.offset,
                first: existing.offset,
                id,
            }),
            None => Ok(()),
        }
    }

    /// Add a validated declaration, returning the handle it was given
    pub(super) fn register(&mut self, name: &Name, parameters: usize, id: SourceId) -> Result<TypeId> {
        self.ensure_unused(name, id)?;

        let ty = RegisteredType {
            id: TypeId(self.order.len()),
            parameters,
            offset: name.offset,
        };
        self.names.insert(name.value.clone(), ty);
        self.order.push(name.value.clone());

        Ok(ty.id)
    }

    /// Names of all declared types, in declaration order
    pub(super) fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str, offset: usize) -> Name {
        Name {
            value: value.to_string(),
            offset,
        }
    }

    #[test]
    fn parameters_and_fields_share_a_namespace() {
        let id = SourceId::default();
        let mut scope = Scope::default();

        scope.declare(&name("a", 1), NameKind::Parameter, id).unwrap();
        scope.declare(&name("b", 3), NameKind::Field, id).unwrap();

        let err = scope.declare(&name("a", 7), NameKind::Field, id).unwrap_err();
        assert_eq!(
            err,
            ParserError::NameInUse {
                name: "a".to_string(),
                offset: 7,
                first: 1,
                id,
            }
        );

        assert_eq!(scope.get("a"), Some(NameKind::Parameter));
        assert_eq!(scope.resolve(&name("b", 9), id).unwrap(), NameKind::Field);
        assert!(matches!(
            scope.resolve(&name("c", 9), id),
            Err(ParserError::NotDeclaredName { .. })
        ));
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let id = SourceId::default();
        let mut types = TypeRegistry::default();

        let first = types.register(&name("z", 0), 0, id).unwrap();
        let second = types.register(&name("a", 10), 2, id).unwrap();

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(types.get("a").map(|t| t.parameters), Some(2));
        assert_eq!(types.names().collect::<Vec<_>>(), vec!["z", "a"]);

        assert!(matches!(
            types.register(&name("z", 20), 0, id),
            Err(ParserError::NameInUse { first: 0, .. })
        ));
    }
}
