use std::collections::HashSet;

use lazy_static::lazy_static;

/// Namespace of the OPC UA binary schema vocabulary.
pub const BSD_NAMESPACE: &str = "http://opcfoundation.org/BinarySchema/";

/// Types declared by the IDL prelude, as `(schema name, IDL identifier)`.
///
/// The prelude escapes a few names that clash with IDL keywords when compared
/// case-insensitively, so the identifiers are listed explicitly.
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("Boolean", "_Boolean"),
    ("SByte", "SByte"),
    ("Byte", "Byte"),
    ("Int16", "Int16"),
    ("UInt16", "UInt16"),
    ("Int32", "Int32"),
    ("UInt32", "UInt32"),
    ("Int64", "Int64"),
    ("UInt64", "UInt64"),
    ("Float", "_Float"),
    ("Double", "_Double"),
    ("String", "_String"),
    ("DateTime", "DateTime"),
    ("Guid", "Guid"),
    ("ByteString", "ByteString"),
    ("XmlElement", "XmlElement"),
    ("NodeId", "NodeId"),
    ("ExpandedNodeId", "ExpandedNodeId"),
    ("StatusCode", "StatusCode"),
    ("QualifiedName", "QualifiedName"),
    ("LocalizedText", "LocalizedText"),
    ("ExtensionObject", "ExtensionObject"),
    ("DataValue", "DataValue"),
    ("Variant", "Variant"),
    ("DiagnosticInfo", "DiagnosticInfo"),
];

/// Types that would produce an empty struct, which IDL does not allow.
pub const SKIPPED_TYPES: &[&str] = &[
    "FilterOperand",
    "HistoryReadDetails",
    "MonitoringFilter",
    "MonitoringFilterResult",
    "NotificationData",
];

lazy_static! {
    static ref BUILTIN_NAMES: HashSet<&'static str> =
        BUILTIN_TYPES.iter().map(|(name, _)| *name).collect();
}

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(name)
}

/// Why a schema record is left out of the generated output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exclusion {
    Builtin,
    Listed,
    Test,
    ReferenceIdentifier,
}

/// Skip predicate applied to every record name before resolution.
pub fn exclusion(name: &str) -> Option<Exclusion> {
    if is_builtin(name) {
        Some(Exclusion::Builtin)
    } else if SKIPPED_TYPES.contains(&name) {
        Some(Exclusion::Listed)
    } else if name.contains("Test") {
        Some(Exclusion::Test)
    } else if name.ends_with("NodeId") {
        Some(Exclusion::ReferenceIdentifier)
    } else {
        None
    }
}
