use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    ExchangeError,
    record::{Record, Value},
};

/// Serializes records into an XML document.
///
/// The output starts with an XML declaration, then a single root element
/// wrapping one item element per record; each record field becomes a child
/// element named after the field. Tag names are supplied by the caller
/// (the [`Exporter`](crate::export::Exporter) derives them from the
/// dataset).
///
/// Field text formatting:
///
/// - null → empty element
/// - date → bare `YYYY-MM-DD`
/// - nested object → its compact JSON text
/// - other primitives → their string form
///
/// All text goes through the same `&`/`<`/`>` entity escaping, ampersand
/// first so entities introduced by the angle-bracket substitutions are not
/// escaped twice. Nested JSON keeps its quote characters verbatim.
///
/// An empty batch still yields the declaration and the root element pair.
pub fn to_xml(records: &[Record], root_tag: &str, item_tag: &str) -> Result<String, ExchangeError> {
    let mut writer = Writer::new(Vec::new());

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new(root_tag)))?;

    for record in records {
        write_event(&mut writer, Event::Start(BytesStart::new(item_tag)))?;
        for (name, value) in record.iter() {
            write_event(&mut writer, Event::Start(BytesStart::new(name)))?;
            if let Some(text) = element_text(value)? {
                write_event(&mut writer, Event::Text(BytesText::from_escaped(text)))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(name)))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new(item_tag)))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(root_tag)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| ExchangeError::Export(e.to_string()))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ExchangeError> {
    writer
        .write_event(event)
        .map_err(|e| ExchangeError::Export(format!("failed to write XML event: {e}")))
}

fn element_text(value: &Value) -> Result<Option<String>, ExchangeError> {
    let text = match value {
        Value::Null => None,
        Value::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        Value::Object(record) => {
            let json = serde_json::to_string(record)
                .map_err(|e| ExchangeError::Export(e.to_string()))?;
            Some(partial_escape(json.as_str()).into_owned())
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(partial_escape(text.as_str()).into_owned()),
    };
    Ok(text)
}
