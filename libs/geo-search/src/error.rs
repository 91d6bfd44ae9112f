use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every variant is an invalid-input failure; the engine performs no I/O.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
}
