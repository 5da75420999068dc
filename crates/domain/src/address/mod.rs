//! Mailing address value object and its parts.

mod state;
mod value_objects;

pub use state::UsState;
pub use value_objects::{Address, ZipCode};

use thiserror::Error;

/// Errors that can occur while constructing an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// First street line is blank.
    #[error("Street address is required")]
    Street1Required,

    /// City is blank.
    #[error("City is required")]
    CityRequired,

    /// State code is not a known two-letter code.
    #[error("Unknown state code: {0}")]
    UnknownState(String),

    /// ZIP code is not in `NNNNN` or `NNNNN-NNNN` form.
    #[error("Invalid ZIP code: {0}")]
    InvalidZipCode(String),
}
