//! Model and reader for OPC UA binary schema type dictionaries.

pub mod builtins;
pub mod error;
pub mod reader;
pub mod resolver;
pub mod types;

pub use resolver::resolve;

use reader::read_type_dictionary;
use types::TypeRegistry;

/// Reads the dictionary and resolves it into a registry in definition order.
pub fn read_schema(document: &roxmltree::Document) -> anyhow::Result<TypeRegistry> {
    let records = read_type_dictionary(document)?;
    log::info!("read {} type descriptions", records.len());
    Ok(resolve(&records)?)
}
