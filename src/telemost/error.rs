use thiserror::Error;

/// Error taxonomy for the Telemost client.
///
/// `Validation` is always raised locally, before any network call.
/// `Auth` covers a missing token at construction and 401 responses.
/// Everything else the provider or the network produces is `Api`,
/// carrying the provider's message when one is available.
#[derive(Debug, Error)]
pub enum TelemostError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),
}
