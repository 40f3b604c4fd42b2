use std::borrow::Cow;
use std::collections::HashSet;

use lazy_static::lazy_static;

/// Prefix that moves an identifier out of the reserved-word space.
pub const ESCAPE_PREFIX: char = '_';

lazy_static! {
    /// OMG IDL reserved words. The match is case-sensitive.
    static ref IDL_KEYWORDS: HashSet<&'static str> = [
        "abstract", "any", "attribute", "boolean", "case", "char", "component", "const",
        "consumes", "context", "custom", "default", "double", "emits", "enum", "eventtype",
        "exception", "factory", "FALSE", "finder", "fixed", "float", "getraises", "home",
        "import", "in", "inout", "interface", "local", "long", "module", "multiple", "native",
        "Object", "octet", "oneway", "out", "primarykey", "private", "provides", "public",
        "publishes", "raises", "readonly", "sequence", "setraises", "short", "string",
        "struct", "supports", "switch", "TRUE", "truncatable", "typedef", "typeid",
        "typeprefix", "union", "unsigned", "uses", "ValueBase", "valuetype", "void", "wchar",
        "wstring",
    ]
    .into_iter()
    .collect();
}

pub fn is_reserved(name: &str) -> bool {
    IDL_KEYWORDS.contains(name)
}

/// Returns `name` unchanged unless it is an IDL keyword, in which case it gets the
/// [`ESCAPE_PREFIX`].
pub fn protect_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved(name) {
        Cow::Owned(format!("{ESCAPE_PREFIX}{name}"))
    } else {
        Cow::Borrowed(name)
    }
}
