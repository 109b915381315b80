/// Tolerant parsing of uploaded CSV text into string-valued records
pub mod csv_reader;

/// Import of the legacy office-export sheets (semicolon readings,
/// salutation-based customer lists)
pub mod legacy;

pub use csv_reader::{ParsedRecord, parse};
