use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    ExchangeError,
    record::{Record, Value},
};

/// Serializes records into CSV text.
///
/// The header row carries the first record's field names in insertion
/// order; every record contributes one newline-terminated data row. Cell
/// formatting follows the dashboard's download convention:
///
/// - null → empty cell
/// - date → bare `YYYY-MM-DD`
/// - nested object → its compact JSON text, quoted
/// - any other primitive → its string form, quoted
///
/// Quoting doubles embedded double-quotes and wraps the whole cell. Row
/// assembly runs through the `csv` crate with quoting disabled, since the
/// cells are already in their final shape.
///
/// An empty batch yields the empty string, without even a header.
///
/// # Examples
///
/// ```
/// use hv_exchange::export::to_csv;
/// use hv_exchange::record::Record;
///
/// let mut record = Record::new();
/// record.push("meterId", "M-EL-001");
/// record.push("meterCount", 45720);
/// record.push("comment", Option::<&str>::None);
///
/// let csv = to_csv(&[record]).unwrap();
/// assert_eq!(csv, "meterId,meterCount,comment\n\"M-EL-001\",\"45720\",\n");
/// ```
pub fn to_csv(records: &[Record]) -> Result<String, ExchangeError> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(first.field_names())
        .map_err(|e| ExchangeError::Export(format!("failed to write CSV header: {e}")))?;

    for record in records {
        let row = record
            .iter()
            .map(|(_, value)| format_cell(value))
            .collect::<Result<Vec<String>, ExchangeError>>()?;
        writer
            .write_record(&row)
            .map_err(|e| ExchangeError::Export(format!("failed to write CSV row: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExchangeError::Export(format!("failed to flush CSV writer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ExchangeError::Export(e.to_string()))
}

fn format_cell(value: &Value) -> Result<String, ExchangeError> {
    let cell = match value {
        Value::Null => String::new(),
        Value::Date(date) => date.format("%Y-%m-%d").to_string(),
        Value::Object(record) => {
            let json = serde_json::to_string(record)
                .map_err(|e| ExchangeError::Export(e.to_string()))?;
            quote(&json)
        }
        Value::Bool(flag) => quote(&flag.to_string()),
        Value::Number(number) => quote(&number.to_string()),
        Value::String(text) => quote(text),
    };
    Ok(cell)
}

fn quote(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}
