use crate::{ExchangeError, record::Record};

/// Serializes records into pretty-printed JSON.
///
/// Native types survive: numbers stay numbers, booleans stay booleans,
/// nulls stay null, dates render as `YYYY-MM-DD` strings. Unlike CSV and
/// XML there is no shared-field-set requirement; each record serializes
/// with its own fields.
pub fn to_json(records: &[Record]) -> Result<String, ExchangeError> {
    serde_json::to_string_pretty(records).map_err(|e| ExchangeError::Export(e.to_string()))
}
