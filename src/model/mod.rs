use std::collections::HashMap;

use uuid::Uuid;

use crate::{ExchangeError, import::csv_reader::ParsedRecord};

/// Customer entity and gender tables
pub mod customer;

/// Meter-reading entity and meter-kind tables
pub mod reading;

pub use customer::{Customer, CustomerEnvelope, Gender, GenderLabel};
pub use reading::{KindOfMeter, MeterLabel, Reading, ReadingEnvelope};

/// Resolves a customer reference found in imported data.
///
/// Imports only carry a customer id; whoever owns the customer cache (the
/// query layer in the dashboard, a plain map in tests) supplies the entity.
pub trait CustomerLookup {
    fn find(&self, id: Uuid) -> Option<Customer>;
}

impl CustomerLookup for HashMap<Uuid, Customer> {
    fn find(&self, id: Uuid) -> Option<Customer> {
        self.get(&id).cloned()
    }
}

pub(crate) fn required<'a>(
    record: &'a ParsedRecord,
    field: &str,
) -> Result<&'a str, ExchangeError> {
    record
        .get(field)
        .ok_or_else(|| ExchangeError::Import(format!("missing field: {field}")))
}
