use thiserror::Error;

/// Setup-time failures when registering a ROM overlay on the [`Bus`](crate::bus::Bus).
///
/// These are the only fallible operation in the core (see the error handling
/// design): everything that runs once the system is wired up is infallible by
/// construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RomError {
    #[error("ROM image is empty")]
    Empty,

    #[error("ROM of length {len} at base {base:#06x} would cross $10000")]
    OutOfRange { base: u16, len: usize },
}
