use std::collections::HashSet;

use log::{debug, info, warn};
use thiserror::Error;

use super::builtins::exclusion;
use super::reader::{RecordKind, SchemaRecord};
use super::types::{EnumerationType, OpaqueType, StructMember, StructType, Type, TypeRegistry};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("type {type_name:?} referenced by {record:?} is not defined by the schema or is excluded from generation")]
    UnresolvedReference { record: String, type_name: String },
    #[error("type {record:?} depends on {type_name:?}, which never resolves (cyclic definition)")]
    CyclicReference { record: String, type_name: String },
}

/// Strips a namespace prefix (`opc:Int32` -> `Int32`).
pub fn local_type_name(type_name: &str) -> &str {
    type_name
        .split_once(':')
        .map_or(type_name, |(_, local)| local)
}

/// Fields of a structured record that only hold another field's element count.
fn length_fields(record: &SchemaRecord) -> HashSet<&str> {
    record
        .fields
        .iter()
        .filter_map(|field| field.length_field.as_deref())
        .collect()
}

fn is_empty_declaration(record: &SchemaRecord) -> bool {
    match record.kind {
        RecordKind::Enumeration => record.values.is_empty(),
        RecordKind::Structured => {
            let length_fields = length_fields(record);
            record
                .fields
                .iter()
                .all(|field| length_fields.contains(field.name.as_str()))
        }
        RecordKind::Opaque | RecordKind::Unsupported(_) => false,
    }
}

/// Removes every record that must not be generated, logging why.
fn pending_records(records: &[SchemaRecord]) -> Vec<&SchemaRecord> {
    let mut seen = HashSet::new();
    let mut pending = Vec::new();
    for record in records {
        if let Some(reason) = exclusion(&record.name) {
            debug!("skipping {:?} ({reason:?})", record.name);
            continue;
        }
        if let RecordKind::Unsupported(tag) = &record.kind {
            warn!("skipping {:?}: unsupported type kind <{tag}>", record.name);
            continue;
        }
        if is_empty_declaration(record) {
            warn!(
                "skipping {:?}: it has no members and IDL does not allow empty declarations",
                record.name
            );
            continue;
        }
        if !seen.insert(record.name.as_str()) {
            warn!("skipping duplicate definition of {:?}", record.name);
            continue;
        }
        pending.push(record);
    }
    pending
}

/// Builds the type for `record`, or `None` if one of its member types is not registered yet.
fn try_resolve(record: &SchemaRecord, registry: &TypeRegistry) -> Option<Type> {
    let description = record.documentation.clone();
    match record.kind {
        RecordKind::Enumeration => Some(Type::Enumeration(EnumerationType::new(
            &record.name,
            description,
            record
                .values
                .iter()
                .map(|v| (v.name.as_str(), v.value.as_str())),
        ))),
        RecordKind::Opaque => Some(Type::Opaque(OpaqueType::new(&record.name, description))),
        RecordKind::Structured => {
            let length_fields = length_fields(record);
            let mut members = Vec::new();
            for field in &record.fields {
                if length_fields.contains(field.name.as_str()) {
                    continue;
                }
                let member_type = local_type_name(&field.type_name);
                if !registry.contains(member_type) {
                    return None;
                }
                members.push(StructMember::new(
                    &field.name,
                    member_type,
                    field.length_field.is_some(),
                ));
            }
            Some(Type::Structured(StructType::new(
                &record.name,
                description,
                members,
            )))
        }
        RecordKind::Unsupported(_) => None,
    }
}

/// Member types of `record` that are not registered yet.
fn missing_types<'r>(
    record: &'r SchemaRecord,
    registry: &'r TypeRegistry,
) -> impl Iterator<Item = &'r str> + 'r {
    let length_fields = length_fields(record);
    record
        .fields
        .iter()
        .filter(move |field| !length_fields.contains(field.name.as_str()))
        .map(|field| local_type_name(&field.type_name))
        .filter(move |type_name| !registry.contains(type_name))
}

/// Explains why none of the `stalled` records could be resolved.
///
/// A missing type that is not itself stalled is the root cause and is reported first, whatever
/// the record order. Only when every missing type is stalled too are the records cyclic.
fn stall_error(stalled: &[&SchemaRecord], registry: &TypeRegistry) -> ResolveError {
    let pending: HashSet<&str> = stalled.iter().map(|r| r.name.as_str()).collect();
    let unresolved = stalled.iter().find_map(|record| {
        missing_types(record, registry)
            .find(|type_name| !pending.contains(type_name))
            .map(|type_name| (record, type_name))
    });
    if let Some((record, type_name)) = unresolved {
        return ResolveError::UnresolvedReference {
            record: record.name.clone(),
            type_name: type_name.to_string(),
        };
    }

    let record = stalled[0];
    let type_name = missing_types(record, registry)
        .next()
        .unwrap_or_default()
        .to_string();
    ResolveError::CyclicReference {
        record: record.name.clone(),
        type_name,
    }
}

/// Resolves `records` into a registry where every type comes after the types it depends on.
///
/// Repeats passes over the unresolved records until all of them are registered. A pass that
/// registers nothing means the remaining records reference something that never resolves.
pub fn resolve(records: &[SchemaRecord]) -> Result<TypeRegistry, ResolveError> {
    let mut registry = TypeRegistry::new();
    let mut pending = pending_records(records);

    let mut pass = 0;
    while !pending.is_empty() {
        pass += 1;
        let mut deferred = Vec::new();
        for record in pending.iter().copied() {
            match try_resolve(record, &registry) {
                Some(type_) => {
                    registry.insert(record.name.as_str(), type_);
                }
                None => deferred.push(record),
            }
        }
        debug!(
            "pass {pass}: resolved {}, deferred {}",
            pending.len() - deferred.len(),
            deferred.len()
        );
        if deferred.len() == pending.len() {
            return Err(stall_error(&deferred, &registry));
        }
        pending = deferred;
    }

    info!("resolved {} types in {pass} passes", registry.len());
    Ok(registry)
}
