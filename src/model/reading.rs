use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ExchangeError, import::csv_reader::ParsedRecord, record::Record};

use super::{Customer, CustomerLookup, required};

/// Meter category code as the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KindOfMeter {
    Heizung,
    Strom,
    Wasser,
    Unbekannt,
}

impl KindOfMeter {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindOfMeter::Heizung => "HEIZUNG",
            KindOfMeter::Strom => "STROM",
            KindOfMeter::Wasser => "WASSER",
            KindOfMeter::Unbekannt => "UNBEKANNT",
        }
    }

    pub fn label(self) -> MeterLabel {
        match self {
            KindOfMeter::Heizung => MeterLabel::Heating,
            KindOfMeter::Strom => MeterLabel::Electricity,
            KindOfMeter::Wasser => MeterLabel::Water,
            KindOfMeter::Unbekannt => MeterLabel::Unknown,
        }
    }

    /// Maps a dashboard label (`electricity`, `water`, `heating`) to its
    /// code. Anything unrecognized lands on `Unbekannt`.
    pub fn from_label(label: &str) -> KindOfMeter {
        match label.to_ascii_lowercase().as_str() {
            "electricity" => KindOfMeter::Strom,
            "water" => KindOfMeter::Wasser,
            "heating" => KindOfMeter::Heizung,
            _ => KindOfMeter::Unbekannt,
        }
    }
}

impl fmt::Display for KindOfMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindOfMeter {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEIZUNG" => Ok(KindOfMeter::Heizung),
            "STROM" => Ok(KindOfMeter::Strom),
            "WASSER" => Ok(KindOfMeter::Wasser),
            "UNBEKANNT" => Ok(KindOfMeter::Unbekannt),
            other => Err(ExchangeError::Import(format!(
                "unknown meter kind: {other}"
            ))),
        }
    }
}

/// Meter category as the dashboard displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterLabel {
    Electricity,
    Water,
    Heating,
    Unknown,
}

impl MeterLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeterLabel::Electricity => "electricity",
            MeterLabel::Water => "water",
            MeterLabel::Heating => "heating",
            MeterLabel::Unknown => "unknown",
        }
    }

    pub fn code(self) -> KindOfMeter {
        match self {
            MeterLabel::Electricity => KindOfMeter::Strom,
            MeterLabel::Water => KindOfMeter::Wasser,
            MeterLabel::Heating => KindOfMeter::Heizung,
            MeterLabel::Unknown => KindOfMeter::Unbekannt,
        }
    }
}

impl fmt::Display for MeterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meter reading as it travels over the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub customer: Option<Customer>,
    pub date_of_reading: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub meter_id: String,
    pub substitute: bool,
    pub meter_count: f64,
    pub kind_of_meter: KindOfMeter,
}

/// The `{"reading": {...}}` request/response body shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingEnvelope {
    pub reading: Reading,
}

impl Reading {
    /// Flattens the reading into an export [`Record`]. The customer stays
    /// a one-level nested record so the serializers can render it as a
    /// JSON object, a quoted JSON cell or escaped JSON element text.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.push("id", self.id);
        record.push("customer", self.customer.as_ref().map(Customer::to_record));
        record.push("dateOfReading", self.date_of_reading);
        record.push("comment", self.comment.as_deref());
        record.push("meterId", self.meter_id.as_str());
        record.push("substitute", self.substitute);
        record.push("meterCount", self.meter_count);
        record.push("kindOfMeter", self.kind_of_meter.as_str());
        record
    }

    /// Coerces a parsed CSV row back into a typed reading.
    ///
    /// The `customer` column carries a customer id; resolution goes
    /// through the supplied lookup and an unknown id yields `None`.
    pub fn from_record(
        record: &ParsedRecord,
        customers: &dyn CustomerLookup,
    ) -> Result<Self, ExchangeError> {
        let id = record
            .get("id")
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| ExchangeError::Import(format!("invalid reading id: {e}")))?;

        let customer = record
            .get("customer")
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| ExchangeError::Import(format!("invalid customer id: {e}")))?
            .and_then(|customer_id| customers.find(customer_id));

        let date_of_reading =
            NaiveDate::parse_from_str(required(record, "dateOfReading")?, "%Y-%m-%d")
                .map_err(|e| ExchangeError::Import(format!("invalid reading date: {e}")))?;

        let substitute = required(record, "substitute")?
            .parse::<bool>()
            .map_err(|e| ExchangeError::Import(format!("invalid substitute flag: {e}")))?;

        let meter_count = required(record, "meterCount")?
            .parse::<f64>()
            .map_err(|e| ExchangeError::Import(format!("invalid meter count: {e}")))?;

        Ok(Reading {
            id,
            customer,
            date_of_reading,
            comment: record.get("comment").map(str::to_string),
            meter_id: required(record, "meterId")?.to_string(),
            substitute,
            meter_count,
            kind_of_meter: required(record, "kindOfMeter")?.parse()?,
        })
    }
}
