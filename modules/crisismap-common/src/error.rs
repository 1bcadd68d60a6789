use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrisisMapError {
    /// The post source could not be reached or authorized. Fatal to the
    /// run; everything downstream of ingestion degrades per record instead.
    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
