use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a usable body (connect/DNS/timeout,
    /// or the body read itself failed).
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The remote answered with an error payload instead of the resource.
    /// Carries the raw decoded body (bad key, unknown resource, throttling).
    #[error("api rejected the request: {0}")]
    Api(Value),

    /// The body was not valid JSON, or did not match the expected record
    /// shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
