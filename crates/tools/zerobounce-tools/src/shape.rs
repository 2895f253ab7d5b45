//! Normalization of vendor results into flat mappings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, ToolFailure};

/// Result mapping returned by every tool.
pub type Mapping = Map<String, Value>;

/// Field used to wrap scalar results unless an operation names its own.
pub const RESULT_FIELD: &str = "result";

/// Shapes a vendor value: records expand to their fields, anything else is
/// wrapped as `{scalar_field: value}`.
pub fn shape<T: Serialize>(value: &T, scalar_field: &str) -> Result<Mapping, ToolFailure> {
    let value = serde_json::to_value(value).map_err(|e| {
        ToolFailure::new(
            ErrorKind::Unknown,
            format!("could not encode provider response: {e}"),
        )
    })?;

    Ok(match value {
        Value::Object(fields) => fields,
        scalar @ (Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Array(_)) => {
            let mut wrapped = Mapping::new();
            wrapped.insert(scalar_field.to_string(), scalar);
            wrapped
        }
    })
}
