use std::collections::HashMap;

use chrono::NaiveDate;
use indoc::indoc;
use uuid::Uuid;

use hv_exchange::{
    export::to_csv,
    import::{legacy, parse},
    model::{Customer, Gender, KindOfMeter, Reading},
    record::{Record, Value},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn blank_lines_are_dropped_between_rows() {
    let records = parse("a,b\n1,2\n\n3,4\n");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("a"), Some("1"));
    assert_eq!(records[0].get("b"), Some("2"));
    assert_eq!(records[1].get("a"), Some("3"));
    assert_eq!(records[1].get("b"), Some("4"));
}

#[test]
fn parsed_values_match_the_formatted_cells() {
    // Round trip through the serializer for the supported subset: no
    // embedded commas, quotes or newlines in any value.
    let mut record = Record::new();
    record.push("meterId", "M-EL-001");
    record.push("dateOfReading", date(2025, 5, 1));
    record.push("comment", Value::Null);
    record.push("meterCount", 45720);
    record.push("substitute", false);

    let csv = to_csv(&[record]).unwrap();
    let parsed = parse(&csv);

    assert_eq!(parsed.len(), 1);
    // Primitive cells keep the wrapping quotes the serializer added
    assert_eq!(parsed[0].get("meterId"), Some("\"M-EL-001\""));
    assert_eq!(parsed[0].get("meterCount"), Some("\"45720\""));
    assert_eq!(parsed[0].get("substitute"), Some("\"false\""));
    // Date cells are bare
    assert_eq!(parsed[0].get("dateOfReading"), Some("2025-05-01"));
    // Null cells are empty and therefore omitted from the sparse record
    assert_eq!(parsed[0].get("comment"), None);
}

#[test]
fn customer_upload_flows_into_typed_models() {
    let text = indoc! {"
        firstName,lastName,birthDate,gender
        Anna,Schmidt,1962-02-21,W
        Hans,Meier,,M
    "};

    let customers: Vec<Customer> = parse(text)
        .iter()
        .map(Customer::from_record)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].first_name, "Anna");
    assert_eq!(customers[0].birth_date, Some(date(1962, 2, 21)));
    assert_eq!(customers[0].gender, Gender::W);
    assert_eq!(customers[1].birth_date, None);
    assert_eq!(customers[1].id, None);
}

#[test]
fn reading_upload_resolves_customers_by_id() {
    let customer_id = Uuid::parse_str("ec617965-88b4-4721-8158-ee36c38e4db3").unwrap();
    let anna = Customer {
        id: Some(customer_id),
        first_name: "Anna".to_string(),
        last_name: "Schmidt".to_string(),
        birth_date: None,
        gender: Gender::W,
    };
    let mut known = HashMap::new();
    known.insert(customer_id, anna.clone());

    let text = indoc! {"
        customer,dateOfReading,meterId,substitute,meterCount,kindOfMeter
        ec617965-88b4-4721-8158-ee36c38e4db3,2025-05-01,M-WA-001,false,3250.5,WASSER
    "};

    let readings: Vec<Reading> = parse(text)
        .iter()
        .map(|record| Reading::from_record(record, &known))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].customer, Some(anna));
    assert_eq!(readings[0].date_of_reading, date(2025, 5, 1));
    assert_eq!(readings[0].kind_of_meter, KindOfMeter::Wasser);
    assert_eq!(readings[0].meter_count, 3250.5);
}

#[test]
fn legacy_sheets_combine_into_resolved_readings() {
    let customer_sheet = indoc! {"
        UUID,Anrede,Vorname,Nachname,Geburtsdatum
        ec617965-88b4-4721-8158-ee36c38e4db3,Herr,Pumukel,Kobold,21.02.1962
    "};

    let customers = legacy::parse_customers(customer_sheet).unwrap();
    let known: HashMap<Uuid, Customer> = customers
        .iter()
        .filter_map(|customer| customer.id.map(|id| (id, customer.clone())))
        .collect();

    let reading_sheet = indoc! {r#"
        "Kunde";"ec617965-88b4-4721-8158-ee36c38e4db3";
        "Zählernummer";"MST-af34569";

        "Datum";"Zählerstand in m³";"Kommentar"
        01.02.2018;5,965;
        01.04.2018;6,597;
        25.06.2018;6,805;Zählertausch: neue Nummer X1234
        01.08.2018;7,125;
    "#};

    let readings = legacy::parse_readings(reading_sheet, &known).unwrap();

    assert_eq!(readings.len(), 4);
    assert!(
        readings
            .iter()
            .all(|reading| reading.kind_of_meter == KindOfMeter::Wasser)
    );
    assert_eq!(
        readings[0].customer.as_ref().map(|c| c.first_name.as_str()),
        Some("Pumukel")
    );
    assert_eq!(readings[0].date_of_reading, date(2018, 2, 1));
    assert_eq!(readings[0].meter_count, 5.965);
    assert_eq!(readings[0].meter_id, "MST-af34569");
    assert_eq!(readings[1].meter_id, "MST-af34569");
    assert_eq!(readings[2].meter_id, "X1234");
    assert_eq!(
        readings[2].comment.as_deref(),
        Some("Zählertausch: neue Nummer X1234")
    );
    assert_eq!(readings[3].meter_id, "X1234");
    assert!(readings.iter().all(|reading| !reading.substitute));
}

#[test]
fn malformed_rows_degrade_to_partial_records() {
    let text = indoc! {"
        firstName,lastName,gender
        Anna
        Hans,Meier,M
    "};

    let records = parse(text);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].len(), 1);
    assert_eq!(records[0].get("lastName"), None);
    assert_eq!(records[1].len(), 3);

    // The sparse first row is missing required fields, which surfaces as
    // an import error only once typed coercion is attempted.
    assert!(Customer::from_record(&records[0]).is_err());
    assert!(Customer::from_record(&records[1]).is_ok());
}
