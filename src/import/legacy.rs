use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::{
    ExchangeError,
    model::{Customer, CustomerLookup, Gender, KindOfMeter, Reading},
};

/// Comment convention marking a meter replacement; the fourth token is the
/// replacement meter id, effective from the row carrying the comment.
const METER_SWAP_MARKER: &str = "Zählertausch: neue Nummer ";

/// Parses a legacy customer sheet.
///
/// Comma separated with a `UUID,...` header row; quote characters are
/// stripped before splitting. Columns: id, salutation, first name, last
/// name, optional `dd.MM.yyyy` birth date. Salutations map `Herr` to `M`
/// and `Frau` to `D`; anything else is `U`.
pub fn parse_customers(text: &str) -> Result<Vec<Customer>, ExchangeError> {
    let mut customers = Vec::new();

    for raw in text.lines() {
        let line = raw.replace('"', "");
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells[0] == "UUID" {
            continue;
        }
        if cells.len() < 4 {
            return Err(ExchangeError::Import(format!(
                "customer row has too few columns: {line}"
            )));
        }

        let id = Uuid::parse_str(cells[0])
            .map_err(|e| ExchangeError::Import(format!("invalid customer id: {e}")))?;

        let gender = match cells[1] {
            "Herr" => Gender::M,
            "Frau" => Gender::D,
            _ => Gender::U,
        };

        let birth_date = match cells.get(4) {
            Some(cell) if !cell.is_empty() => Some(
                NaiveDate::parse_from_str(cell, "%d.%m.%Y")
                    .map_err(|e| ExchangeError::Import(format!("invalid birth date: {e}")))?,
            ),
            _ => None,
        };

        customers.push(Customer {
            id: Some(id),
            first_name: cells[2].to_string(),
            last_name: cells[3].to_string(),
            birth_date,
            gender,
        });
    }

    Ok(customers)
}

/// Parses a legacy meter-reading sheet.
///
/// Semicolon separated, three columns per row, the third being free text
/// that may itself contain semicolons. The sheet opens with preamble rows
/// that set the file-wide context:
///
/// - `Kunde;<uuid>;` sets the customer all readings belong to, resolved
///   through the supplied lookup
/// - `Zählernummer;<meter id>;` sets the meter id
/// - `Datum;Zählerstand in <unit>;Kommentar` selects the meter kind from
///   the unit (`kWh` electricity, `m³` water, `MWh` heating)
///
/// Data rows carry a `dd.MM.yyyy` date, a count with a comma decimal
/// separator and an optional comment. A comment containing the meter-swap
/// marker switches the meter id from that row on.
pub fn parse_readings(
    text: &str,
    customers: &dyn CustomerLookup,
) -> Result<Vec<Reading>, ExchangeError> {
    let mut readings = Vec::new();

    let mut customer: Option<Customer> = None;
    let mut meter_id = String::new();
    let mut kind_of_meter = KindOfMeter::Unbekannt;

    for raw in text.lines() {
        let line = raw.replace('"', "");

        let mut cells = line.splitn(3, ';').map(str::trim);
        let first = cells.next().unwrap_or("");
        if first.is_empty() {
            continue;
        }
        let second = cells.next().unwrap_or("");
        let third = cells.next().unwrap_or("");

        if third.contains(METER_SWAP_MARKER) {
            if let Some(replacement) = third.split(' ').nth(3) {
                debug!("meter replaced: {meter_id} -> {replacement}");
                meter_id = replacement.to_string();
            }
        }

        match first {
            "Kunde" => {
                let id = Uuid::parse_str(second)
                    .map_err(|e| ExchangeError::Import(format!("invalid customer id: {e}")))?;
                customer = customers.find(id);
            }
            "Zählernummer" => {
                meter_id = second.to_string();
            }
            "Datum" => {
                kind_of_meter = match second {
                    "Zählerstand in MWh" => KindOfMeter::Heizung,
                    "Zählerstand in m³" => KindOfMeter::Wasser,
                    "Zählerstand in kWh" => KindOfMeter::Strom,
                    _ => KindOfMeter::Unbekannt,
                };
            }
            _ => {
                let date_of_reading = NaiveDate::parse_from_str(first, "%d.%m.%Y")
                    .map_err(|e| ExchangeError::Import(format!("invalid reading date: {e}")))?;

                let meter_count = second
                    .replace(',', ".")
                    .parse::<f64>()
                    .map_err(|e| ExchangeError::Import(format!("invalid meter count: {e}")))?;

                readings.push(Reading {
                    id: None,
                    customer: customer.clone(),
                    date_of_reading,
                    comment: (!third.is_empty()).then(|| third.to_string()),
                    meter_id: meter_id.clone(),
                    substitute: false,
                    meter_count,
                    kind_of_meter,
                });
            }
        }
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use indoc::indoc;

    use super::*;

    #[test]
    fn salutations_map_to_gender_codes() {
        let text = indoc! {"
            UUID,Anrede,Vorname,Nachname,Geburtsdatum
            ec617965-88b4-4721-8158-ee36c38e4db3,Herr,Pumukel,Kobold,21.02.1962
            848c39a1-0cbb-427a-ac6f-a88941943dc8,Frau,Erna,Kruemel,12.10.1955
            1680f84f-0b6d-4bc4-b9e8-e0f1a0a1d329,Firma,Hausverwaltung,Schmidt,
        "};

        let customers = parse_customers(text).unwrap();
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].gender, Gender::M);
        assert_eq!(customers[1].gender, Gender::D);
        assert_eq!(customers[2].gender, Gender::U);
        assert_eq!(
            customers[0].birth_date,
            NaiveDate::from_ymd_opt(1962, 2, 21)
        );
        assert_eq!(customers[2].birth_date, None);
    }

    #[test]
    fn four_column_rows_have_no_birth_date() {
        let text = "ec617965-88b4-4721-8158-ee36c38e4db3,Herr,Pumukel,Kobold\n";
        let customers = parse_customers(text).unwrap();
        assert_eq!(customers[0].birth_date, None);
    }

    #[test]
    fn invalid_dates_are_errors() {
        let text = "ec617965-88b4-4721-8158-ee36c38e4db3,Herr,Pumukel,Kobold,1962-02-21\n";
        assert!(parse_customers(text).is_err());
    }

    #[test]
    fn unit_row_selects_the_meter_kind() {
        let customers: HashMap<Uuid, Customer> = HashMap::new();
        let text = indoc! {r#"
            "Kunde";"ec617965-88b4-4721-8158-ee36c38e4db3";
            "Zählernummer";"786523123";

            "Datum";"Zählerstand in kWh";"Kommentar"
            01.02.2018;565,89;
        "#};

        let readings = parse_readings(text, &customers).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].kind_of_meter, KindOfMeter::Strom);
        assert_eq!(readings[0].meter_id, "786523123");
        assert_eq!(readings[0].meter_count, 565.89);
        assert_eq!(readings[0].customer, None);
        assert_eq!(readings[0].comment, None);
    }

    #[test]
    fn swap_comment_switches_the_meter_id() {
        let customers: HashMap<Uuid, Customer> = HashMap::new();
        let text = indoc! {"
            Zählernummer;MST-af34569;
            Datum;Zählerstand in m³;Kommentar
            01.02.2018;5,965;
            25.06.2018;6,805;Zählertausch: neue Nummer X1234
            01.08.2018;7,125;
        "};

        let readings = parse_readings(text, &customers).unwrap();
        assert_eq!(readings[0].meter_id, "MST-af34569");
        // The row carrying the swap comment already uses the new number
        assert_eq!(readings[1].meter_id, "X1234");
        assert_eq!(readings[2].meter_id, "X1234");
    }
}
