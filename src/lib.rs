/*!
 # hv-exchange

 Export and import toolkit for a utility-management (Hausverwaltung)
 dashboard: customers and meter readings go out as CSV, JSON or XML
 documents ready for download, and tabular CSV uploads come back in as
 string-keyed records ready for the REST layer.

 The crate is a pure, synchronous text transform. It performs no I/O of
 its own: reading uploaded files, triggering browser downloads and talking
 to the REST API are the caller's business. Because every call allocates
 only call-scoped data, the functions are safe to use concurrently without
 any synchronization.

 ## Core Concepts

 - **Record:** an ordered mapping from field name to value (null, string,
   number, boolean, calendar date, or a one-level nested record). Records
   are handed to the serializer and never mutated by it.
 - **Document:** the serialized text plus the suggested filename and MIME
   type for the download trigger.
 - **Exporter:** configures a dataset, target format and the optional
   meter-type/date-range filters that feed filename derivation.
 - **ParsedRecord:** the import side's counterpart, with every value kept
   as a string; type coercion belongs to the model adapters.

 ## Getting Started

```rust
use hv_exchange::export::{Dataset, ExportFormat, ExporterBuilder};
use hv_exchange::record::Record;

fn main() -> Result<(), hv_exchange::ExchangeError> {
    let mut record = Record::new();
    record.push("firstName", "Anna");
    record.push("lastName", "Schmidt");

    let document = ExporterBuilder::new(Dataset::Customers)
        .format(ExportFormat::Csv)
        .build()
        .export(&[record])?;

    assert_eq!(document.filename, "customers.csv");
    assert_eq!(document.mime_type, "text/csv");
    assert_eq!(
        document.content,
        "firstName,lastName\n\"Anna\",\"Schmidt\"\n"
    );

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Error types for export and import operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Ordered record model shared by the serializers
pub mod record;

/// Domain model: customers, readings and their enum tables
pub mod model;

/// Serializers producing downloadable CSV / JSON / XML documents
pub mod export;

/// Parsers turning uploaded text back into records
pub mod import;
