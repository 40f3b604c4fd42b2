use roxmltree::TextPos;
use thiserror::Error;

/// Errors raised while mapping a type dictionary document to schema records.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
    #[error("expected a TypeDictionary root element, found {found:?}")]
    UnexpectedRoot { found: String },
    #[error("<{element}> at {pos} is missing the {attribute:?} attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        pos: TextPos,
    },
}
