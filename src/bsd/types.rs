use indexmap::{map::Entry, IndexMap};
use log::warn;

use super::builtins::BUILTIN_TYPES;
use crate::naming::protect_identifier;

/// A type assumed to be declared by the IDL prelude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinType {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationType {
    pub name: String,
    pub description: Option<String>,
    /// Qualified element name (`Type_Element`) to the schema's integer literal, in declaration
    /// order.
    pub elements: IndexMap<String, String>,
}

impl EnumerationType {
    pub fn new<'a>(
        name: &str,
        description: Option<String>,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let elements = values
            .into_iter()
            .map(|(element, value)| {
                let qualified = format!("{name}_{element}");
                (protect_identifier(&qualified).into_owned(), value.to_string())
            })
            .collect();
        Self {
            name: protect_identifier(name).into_owned(),
            description,
            elements,
        }
    }

    /// Whether the literal values are exactly the declaration ordinals `0, 1, 2, ...`.
    pub fn is_ordinal(&self) -> bool {
        self.elements
            .values()
            .enumerate()
            .all(|(index, value)| value.trim().parse::<usize>() == Ok(index))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueType {
    pub name: String,
    pub description: Option<String>,
}

impl OpaqueType {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Self {
            name: protect_identifier(name).into_owned(),
            description,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructMember {
    pub name: String,
    /// Registry key of the member's type.
    pub member_type: String,
    pub is_array: bool,
}

impl StructMember {
    pub fn new(name: &str, member_type: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: protect_identifier(name).into_owned(),
            member_type: member_type.into(),
            is_array,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructType {
    pub name: String,
    pub description: Option<String>,
    pub members: IndexMap<String, StructMember>,
}

impl StructType {
    /// Members whose sanitized names collide (`string` and `_string`) keep the first one; the
    /// others are dropped with a warning.
    pub fn new(
        name: &str,
        description: Option<String>,
        members: impl IntoIterator<Item = StructMember>,
    ) -> Self {
        let name = protect_identifier(name).into_owned();
        let mut by_name = IndexMap::new();
        for member in members {
            match by_name.entry(member.name.clone()) {
                Entry::Occupied(_) => warn!(
                    "struct {name}: dropping member {} of type {}, the name is already taken",
                    member.name, member.member_type
                ),
                Entry::Vacant(entry) => {
                    entry.insert(member);
                }
            }
        }
        Self {
            name,
            description,
            members: by_name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Builtin(BuiltinType),
    Enumeration(EnumerationType),
    Opaque(OpaqueType),
    Structured(StructType),
}

impl Type {
    /// The IDL identifier of this type.
    pub fn name(&self) -> &str {
        match self {
            Type::Builtin(t) => &t.name,
            Type::Enumeration(t) => &t.name,
            Type::Opaque(t) => &t.name,
            Type::Structured(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Type::Builtin(_) => None,
            Type::Enumeration(t) => t.description.as_deref(),
            Type::Opaque(t) => t.description.as_deref(),
            Type::Structured(t) => t.description.as_deref(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Type::Builtin(_))
    }
}

/// Insertion-ordered map from schema type name to resolved type.
///
/// Entries are only ever appended; an existing entry is never replaced.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: IndexMap<String, Type>,
}

impl TypeRegistry {
    /// Creates a registry seeded with every builtin type of the prelude.
    pub fn new() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|(schema_name, idl_name)| {
                (
                    schema_name.to_string(),
                    Type::Builtin(BuiltinType {
                        name: idl_name.to_string(),
                    }),
                )
            })
            .collect();
        Self { types }
    }

    /// Appends `type_` under `name`. Returns `false` and leaves the registry untouched if the name
    /// is already taken.
    pub fn insert(&mut self, name: impl Into<String>, type_: Type) -> bool {
        match self.types.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(type_);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[cfg(test)]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.types.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().map(|(name, type_)| (name.as_str(), type_))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
