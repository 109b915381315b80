use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ExchangeError, import::csv_reader::ParsedRecord, record::Record};

use super::required;

/// Gender code as the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    W,
    D,
    U,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::W => "W",
            Gender::D => "D",
            Gender::U => "U",
        }
    }

    /// The label shown in the dashboard. `D` and `U` both collapse to
    /// [`GenderLabel::Other`], so this direction is lossy.
    pub fn label(self) -> GenderLabel {
        match self {
            Gender::M => GenderLabel::Male,
            Gender::W => GenderLabel::Female,
            Gender::D | Gender::U => GenderLabel::Other,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::M),
            "W" => Ok(Gender::W),
            "D" => Ok(Gender::D),
            "U" => Ok(Gender::U),
            other => Err(ExchangeError::Import(format!(
                "unknown gender code: {other}"
            ))),
        }
    }
}

/// Gender as the dashboard displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenderLabel {
    Male,
    Female,
    Other,
}

impl GenderLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderLabel::Male => "MALE",
            GenderLabel::Female => "FEMALE",
            GenderLabel::Other => "OTHER",
        }
    }

    /// The backend code for this label. `Other` maps to `D`.
    pub fn code(self) -> Gender {
        match self {
            GenderLabel::Male => Gender::M,
            GenderLabel::Female => Gender::W,
            GenderLabel::Other => Gender::D,
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer as it travels over the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
}

/// The `{"customer": {...}}` request/response body shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerEnvelope {
    pub customer: Customer,
}

impl Customer {
    /// Flattens the customer into an export [`Record`] with wire field
    /// names and plain string enum codes.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.push("id", self.id);
        record.push("firstName", self.first_name.as_str());
        record.push("lastName", self.last_name.as_str());
        record.push("birthDate", self.birth_date);
        record.push("gender", self.gender.as_str());
        record
    }

    /// Coerces a parsed CSV row back into a typed customer.
    ///
    /// `firstName`, `lastName` and `gender` are required; `id` and
    /// `birthDate` may be absent.
    pub fn from_record(record: &ParsedRecord) -> Result<Self, ExchangeError> {
        let id = record
            .get("id")
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| ExchangeError::Import(format!("invalid customer id: {e}")))?;

        let birth_date = record
            .get("birthDate")
            .map(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| ExchangeError::Import(format!("invalid birth date: {e}")))?;

        Ok(Customer {
            id,
            first_name: required(record, "firstName")?.to_string(),
            last_name: required(record, "lastName")?.to_string(),
            birth_date,
            gender: required(record, "gender")?.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    fn anna() -> Customer {
        Customer {
            id: Some(Uuid::parse_str("ec617965-88b4-4721-8158-ee36c38e4db3").unwrap()),
            first_name: "Anna".to_string(),
            last_name: "Schmidt".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1962, 2, 21),
            gender: Gender::W,
        }
    }

    #[test]
    fn label_table_round_trips_for_m_and_w() {
        assert_eq!(Gender::M.label().code(), Gender::M);
        assert_eq!(Gender::W.label().code(), Gender::W);
        // D and U both collapse to Other, which maps back to D
        assert_eq!(Gender::D.label(), GenderLabel::Other);
        assert_eq!(Gender::U.label(), GenderLabel::Other);
        assert_eq!(GenderLabel::Other.code(), Gender::D);
    }

    #[test]
    fn envelope_matches_wire_shape() {
        let json = serde_json::to_value(CustomerEnvelope { customer: anna() }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "customer": {
                    "id": "ec617965-88b4-4721-8158-ee36c38e4db3",
                    "firstName": "Anna",
                    "lastName": "Schmidt",
                    "birthDate": "1962-02-21",
                    "gender": "W"
                }
            })
        );
    }

    #[test]
    fn to_record_uses_wire_field_names() {
        let record = anna().to_record();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(
            names,
            vec!["id", "firstName", "lastName", "birthDate", "gender"]
        );
        assert_eq!(record.get("gender"), Some(&Value::String("W".into())));
        assert_eq!(
            record.get("birthDate"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1962, 2, 21).unwrap()))
        );
    }

    #[test]
    fn from_record_coerces_strings() {
        let mut record = ParsedRecord::new();
        record.push("firstName", "Hans");
        record.push("lastName", "Meier");
        record.push("birthDate", "1970-01-31");
        record.push("gender", "M");

        let customer = Customer::from_record(&record).unwrap();
        assert_eq!(customer.id, None);
        assert_eq!(customer.first_name, "Hans");
        assert_eq!(customer.birth_date, NaiveDate::from_ymd_opt(1970, 1, 31));
        assert_eq!(customer.gender, Gender::M);
    }

    #[test]
    fn from_record_rejects_unknown_gender() {
        let mut record = ParsedRecord::new();
        record.push("firstName", "Hans");
        record.push("lastName", "Meier");
        record.push("gender", "X");

        let error = Customer::from_record(&record).unwrap_err();
        assert!(matches!(error, ExchangeError::Import(_)));
    }
}
