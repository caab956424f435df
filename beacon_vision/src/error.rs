// THEORY:
// The locator distinguishes exactly two outcomes that are not a found light:
// "could not run" and "ran, found nothing". Only the first is an error. Every
// variant below is a reason the pipeline refused to run (or a reason the
// surrounding plumbing could not deliver a frame); a frame with no qualifying
// blob is reported through `LightSourceResult::NOT_FOUND`, never through here.
//
// Label-table exhaustion is deliberately absent: a noisy frame that runs out of
// labels is an expected steady-state condition and degrades silently.

use thiserror::Error;

/// Errors raised by the localization pipeline and its plumbing.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The frame has no pixels (zero width, zero height, or an empty buffer).
    #[error("empty frame: {width}x{height} with {len} bytes")]
    EmptyFrame { width: u32, height: u32, len: usize },

    /// The frame was declared in an encoding the pipeline does not process.
    #[error("unsupported pixel encoding {0}, expected packed RGB565")]
    UnsupportedEncoding(String),

    /// The buffer length disagrees with the declared dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The background locator task is gone; no more frames can be submitted.
    #[error("locator service is closed")]
    ServiceClosed,
}

pub type LocateResult<T> = Result<T, LocateError>;
