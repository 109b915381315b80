use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use log::debug;

use crate::{ExchangeError, model::KindOfMeter, record::Record};

/// CSV document generation
pub mod csv_writer;

/// JSON document generation
pub mod json_writer;

/// XML document generation
pub mod xml_writer;

pub use csv_writer::to_csv;
pub use json_writer::to_json;
pub use xml_writer::to_xml;

/// Target format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xml => "text/xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExchangeError;

    /// Parses the format string coming from the UI selector. Anything
    /// outside `csv`/`json`/`xml` is a caller contract violation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            _ => Err(ExchangeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// The entity category being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Customers,
    Readings,
}

impl Dataset {
    pub fn root_tag(&self) -> &'static str {
        match self {
            Dataset::Customers => "customers",
            Dataset::Readings => "readings",
        }
    }

    pub fn item_tag(&self) -> &'static str {
        match self {
            Dataset::Customers => "customer",
            Dataset::Readings => "reading",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

/// The serialized artifact handed to the download trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: String,
    pub filename: String,
    pub mime_type: &'static str,
}

/// Serializes record batches into downloadable [`Document`]s.
///
/// Configured once per export action with the dataset, target format and
/// the filters the caller applied, which only feed filename derivation:
/// `<dataset>[_<meterType>]_<start>[_to_<end>].<ext>`. The meter-type
/// segment appears only for reading exports, the date segments only when a
/// start date was supplied.
pub struct Exporter {
    dataset: Dataset,
    format: ExportFormat,
    meter_type: Option<KindOfMeter>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    root_tag: Option<String>,
    item_tag: Option<String>,
}

impl Exporter {
    /// Serializes the records and derives filename and MIME type.
    ///
    /// Input records are only borrowed; nothing is mutated. An empty batch
    /// is valid for every format.
    pub fn export(&self, records: &[Record]) -> Result<Document, ExchangeError> {
        let content = match self.format {
            ExportFormat::Csv => csv_writer::to_csv(records)?,
            ExportFormat::Json => json_writer::to_json(records)?,
            ExportFormat::Xml => xml_writer::to_xml(
                records,
                self.root_tag.as_deref().unwrap_or(self.dataset.root_tag()),
                self.item_tag.as_deref().unwrap_or(self.dataset.item_tag()),
            )?,
        };

        debug!(
            "serialized {} {} records as {}",
            records.len(),
            self.dataset,
            self.format
        );

        Ok(Document {
            content,
            filename: self.filename(),
            mime_type: self.format.mime_type(),
        })
    }

    fn filename(&self) -> String {
        let mut stem = self.dataset.to_string();

        if self.dataset == Dataset::Readings {
            if let Some(kind) = self.meter_type {
                stem.push('_');
                stem.push_str(kind.as_str());
            }
        }

        // An end date without a start date contributes nothing.
        if let Some(start) = self.start_date {
            stem.push('_');
            stem.push_str(&start.format("%Y-%m-%d").to_string());
            if let Some(end) = self.end_date {
                stem.push_str("_to_");
                stem.push_str(&end.format("%Y-%m-%d").to_string());
            }
        }

        format!("{}.{}", stem, self.format.extension())
    }
}

/// Builder for [`Exporter`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hv_exchange::export::{Dataset, ExportFormat, ExporterBuilder};
/// use hv_exchange::model::KindOfMeter;
///
/// let exporter = ExporterBuilder::new(Dataset::Readings)
///     .format(ExportFormat::Json)
///     .meter_type(KindOfMeter::Strom)
///     .start_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
///     .build();
///
/// let document = exporter.export(&[]).unwrap();
/// assert_eq!(document.filename, "readings_STROM_2025-01-01_to_2025-01-31.json");
/// ```
pub struct ExporterBuilder {
    dataset: Dataset,
    format: ExportFormat,
    meter_type: Option<KindOfMeter>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    root_tag: Option<String>,
    item_tag: Option<String>,
}

impl ExporterBuilder {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            format: ExportFormat::Json,
            meter_type: None,
            start_date: None,
            end_date: None,
            root_tag: None,
            item_tag: None,
        }
    }

    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn meter_type(mut self, kind: KindOfMeter) -> Self {
        self.meter_type = Some(kind);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Overrides the XML root element name derived from the dataset.
    pub fn root_tag(mut self, tag: &str) -> Self {
        self.root_tag = Some(tag.to_string());
        self
    }

    /// Overrides the XML item element name derived from the dataset.
    pub fn item_tag(mut self, tag: &str) -> Self {
        self.item_tag = Some(tag.to_string());
        self
    }

    pub fn build(self) -> Exporter {
        Exporter {
            dataset: self.dataset,
            format: self.format,
            meter_type: self.meter_type,
            start_date: self.start_date,
            end_date: self.end_date,
            root_tag: self.root_tag,
            item_tag: self.item_tag,
        }
    }
}
