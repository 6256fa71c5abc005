use mongodb::bson::{self, Bson, Document};
use serde::Serialize;

use crate::errors::AccessorError;

/// Serializes a caller-supplied argument into a BSON document.
///
/// `Ok(None)` means the argument was null (`None`, `Value::Null`, `()`); each operation
/// decides whether that is allowed. Anything that serializes to a non-document value is
/// rejected because it cannot be used as a record or a filter.
pub fn to_document<T>(value: &T, what: &str) -> Result<Option<Document>, AccessorError>
where
    T: Serialize + ?Sized,
{
    let bson = bson::to_bson(value).map_err(|e| {
        AccessorError::invalid_argument(format!(
            "{} cannot be converted to a document: {}",
            what, e
        ))
    })?;

    match bson {
        Bson::Document(document) => Ok(Some(document)),
        Bson::Null | Bson::Undefined => Ok(None),
        other => Err(AccessorError::invalid_argument(format!(
            "{} must be a mapping of field names to values, got {:?}",
            what,
            other.element_type()
        ))),
    }
}

/// Like [`to_document`], but null is an error.
pub fn require_document<T>(
    value: &T,
    what: &str,
    empty_message: &str,
) -> Result<Document, AccessorError>
where
    T: Serialize + ?Sized,
{
    to_document(value, what)?.ok_or_else(|| AccessorError::invalid_argument(empty_message))
}
