use thiserror::Error;

#[derive(Error, Debug)]
/// Exchange error
pub enum ExchangeError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("import failed: {0}")]
    Import(String),
}
