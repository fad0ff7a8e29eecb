/// Errors raised while assembling the tool catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("invalid tool definition: {0}")]
    Definition(#[from] xentral_core::Error),
}
