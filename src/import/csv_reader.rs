use csv::{ReaderBuilder, Trim};
use log::{debug, warn};

/// An ordered field-name to string-value mapping produced by [`parse`].
///
/// Values are always strings; coercing them into dates, numbers or enum
/// codes is the model adapters' job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecord {
    fields: Vec<(String, String)>,
}

impl ParsedRecord {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses uploaded CSV text into string-valued records.
///
/// The first non-empty line is the header; every later line is split on
/// commas and zipped against the header by position, with surrounding
/// whitespace trimmed on both sides. A field is only materialized when a
/// non-empty value exists at its index, so short rows yield sparse records
/// and rows without any value (stray blank lines included) are dropped.
///
/// This is deliberately a naive splitter, not a full CSV grammar: quote
/// characters carry no meaning, so cells containing embedded commas or
/// newlines are outside the supported subset. The function never fails;
/// degraded rows are logged and skipped.
///
/// # Examples
///
/// ```
/// use hv_exchange::import::parse;
///
/// let records = parse("a,b\n1,2\n\n3,4\n");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get("a"), Some("1"));
/// assert_eq!(records[1].get("b"), Some("4"));
/// ```
pub fn parse(text: &str) -> Vec<ParsedRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(error) => {
                warn!("skipping unreadable CSV row: {error}");
                continue;
            }
        };

        match &headers {
            None => {
                let names: Vec<String> = row.iter().map(str::to_string).collect();
                if names.iter().all(|name| name.is_empty()) {
                    continue;
                }
                headers = Some(names);
            }
            Some(names) => {
                let mut record = ParsedRecord::new();
                for (index, name) in names.iter().enumerate() {
                    if let Some(value) = row.get(index) {
                        if !value.is_empty() {
                            record.push(name.as_str(), value);
                        }
                    }
                }
                if record.is_empty() {
                    dropped += 1;
                    continue;
                }
                records.push(record);
            }
        }
    }

    if dropped > 0 {
        debug!("dropped {dropped} rows without any value");
    }

    records
}
