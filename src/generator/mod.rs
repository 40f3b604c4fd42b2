use std::fmt;

use log::warn;

use crate::bsd::types::{EnumerationType, OpaqueType, StructType, Type, TypeRegistry};

/// Builtin scalar aliases, their list wrappers and the hand-written cyclic containers
/// (Variant, DataValue, ExtensionObject, NodeId, DiagnosticInfo).
pub const PRELUDE: &str = include_str!("prelude.idl");

/// Closes the module opened by the prelude.
pub const CLOSING: &str = "};";

#[derive(Copy, Clone, Debug, Default)]
pub struct GeneratorOptions {
    /// Emit schema documentation as comments above each declaration.
    pub emit_docs: bool,
}

/// The complete IDL module for a resolved registry.
pub struct IdlDocument<'a> {
    registry: &'a TypeRegistry,
    options: GeneratorOptions,
}

impl<'a> IdlDocument<'a> {
    pub fn new(registry: &'a TypeRegistry, options: GeneratorOptions) -> Self {
        Self { registry, options }
    }

    fn write_docs(&self, f: &mut fmt::Formatter<'_>, type_: &Type) -> fmt::Result {
        if !self.options.emit_docs {
            return Ok(());
        }
        if let Some(description) = type_.description() {
            for line in description.lines() {
                writeln!(f, "\t// {}", line.trim())?;
            }
        }
        Ok(())
    }

    fn write_enumeration(f: &mut fmt::Formatter<'_>, enumeration: &EnumerationType) -> fmt::Result {
        writeln!(f, "\tenum {} {{", enumeration.name)?;
        let labels: Vec<String> = enumeration
            .elements
            .keys()
            .map(|label| format!("\t\t{label}"))
            .collect();
        writeln!(f, "{}", labels.join(",\n"))?;
        write!(f, "\t}};")
    }

    fn write_opaque(f: &mut fmt::Formatter<'_>, opaque: &OpaqueType) -> fmt::Result {
        write!(f, "\ttypedef ByteString {};", opaque.name)
    }

    fn write_struct(&self, f: &mut fmt::Formatter<'_>, struct_: &StructType) -> fmt::Result {
        writeln!(f, "\tstruct {} {{", struct_.name)?;
        for member in struct_.members.values() {
            if member.is_array {
                writeln!(f, "\t\tListOf{} {};", member.member_type, member.name)?;
            } else {
                let type_name = self
                    .registry
                    .get(&member.member_type)
                    .map_or(member.member_type.as_str(), Type::name);
                writeln!(f, "\t\t{} {};", type_name, member.name)?;
            }
        }
        write!(f, "\t}};")
    }

    fn write_list_wrapper(f: &mut fmt::Formatter<'_>, key: &str, type_: &Type) -> fmt::Result {
        writeln!(
            f,
            "\tunion ListOf{key} switch(boolean) {{ case true: sequence<{}> Content; }};",
            type_.name()
        )
    }
}

impl fmt::Display for IdlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PRELUDE}")?;
        let generated = self.registry.iter().filter(|(_, type_)| !type_.is_builtin());
        for (key, type_) in generated {
            self.write_docs(f, type_)?;
            match type_ {
                Type::Builtin(_) => continue,
                Type::Enumeration(enumeration) => Self::write_enumeration(f, enumeration)?,
                Type::Opaque(opaque) => Self::write_opaque(f, opaque)?,
                Type::Structured(struct_) => self.write_struct(f, struct_)?,
            }
            writeln!(f)?;
            Self::write_list_wrapper(f, key, type_)?;
            writeln!(f)?;
        }
        writeln!(f, "{CLOSING}")
    }
}

/// Renders the prelude, one declaration plus `ListOf` wrapper per generated type, and the
/// closing marker.
pub fn generate_idl(registry: &TypeRegistry, options: GeneratorOptions) -> String {
    for enumeration in non_ordinal_enumerations(registry) {
        // IDL enumerators are implicitly numbered by position.
        warn!(
            "values of enumeration {} are not 0, 1, 2, ...; they are lost in the IDL output",
            enumeration.name
        );
    }
    IdlDocument::new(registry, options).to_string()
}

/// Enumerations whose schema values cannot be reproduced by IDL's positional numbering.
fn non_ordinal_enumerations(registry: &TypeRegistry) -> impl Iterator<Item = &EnumerationType> {
    registry.iter().filter_map(|(_, type_)| match type_ {
        Type::Enumeration(enumeration) if !enumeration.is_ordinal() => Some(enumeration),
        _ => None,
    })
}
