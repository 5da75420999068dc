//! Address and ZIP code value objects.

use serde::{Deserialize, Serialize};

use super::{AddressError, UsState};

/// US ZIP code in five-digit (`12345`) or ZIP+4 (`12345-6789`) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Parses and validates a ZIP code.
    pub fn new(value: impl Into<String>) -> Result<Self, AddressError> {
        let value = value.into();
        let trimmed = value.trim();

        let valid = match trimmed.len() {
            5 => trimmed.bytes().all(|b| b.is_ascii_digit()),
            10 => trimmed.bytes().enumerate().all(|(i, b)| {
                if i == 5 {
                    b == b'-'
                } else {
                    b.is_ascii_digit()
                }
            }),
            _ => false,
        };

        if !valid {
            return Err(AddressError::InvalidZipCode(value));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ZIP code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the five-digit portion.
    pub fn base(&self) -> &str {
        &self.0[..5]
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ZipCode {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

/// A mailing address.
///
/// Immutable: every `with_*` method builds and revalidates a new address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    street1: String,
    street2: Option<String>,
    city: String,
    state: UsState,
    zip_code: ZipCode,
}

impl Address {
    /// Creates a validated address.
    ///
    /// Text fields are trimmed; a blank second street line is treated as absent.
    pub fn new(
        street1: impl Into<String>,
        street2: Option<String>,
        city: impl Into<String>,
        state: UsState,
        zip_code: ZipCode,
    ) -> Result<Self, AddressError> {
        let street1 = street1.into().trim().to_string();
        if street1.is_empty() {
            return Err(AddressError::Street1Required);
        }

        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(AddressError::CityRequired);
        }

        let street2 = street2
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            street1,
            street2,
            city,
            state,
            zip_code,
        })
    }

    pub fn street1(&self) -> &str {
        &self.street1
    }

    pub fn street2(&self) -> Option<&str> {
        self.street2.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> UsState {
        self.state
    }

    pub fn zip_code(&self) -> &ZipCode {
        &self.zip_code
    }

    /// Returns a copy with a different first street line.
    pub fn with_street1(&self, street1: impl Into<String>) -> Result<Self, AddressError> {
        Self::new(
            street1,
            self.street2.clone(),
            self.city.clone(),
            self.state,
            self.zip_code.clone(),
        )
    }

    /// Returns a copy with a different (or no) second street line.
    pub fn with_street2(&self, street2: Option<String>) -> Result<Self, AddressError> {
        Self::new(
            self.street1.clone(),
            street2,
            self.city.clone(),
            self.state,
            self.zip_code.clone(),
        )
    }

    /// Returns a copy with a different city.
    pub fn with_city(&self, city: impl Into<String>) -> Result<Self, AddressError> {
        Self::new(
            self.street1.clone(),
            self.street2.clone(),
            city,
            self.state,
            self.zip_code.clone(),
        )
    }

    /// Returns a copy with a different state.
    pub fn with_state(&self, state: UsState) -> Result<Self, AddressError> {
        Self::new(
            self.street1.clone(),
            self.street2.clone(),
            self.city.clone(),
            state,
            self.zip_code.clone(),
        )
    }

    /// Returns a copy with a different ZIP code.
    pub fn with_zip_code(&self, zip_code: ZipCode) -> Result<Self, AddressError> {
        Self::new(
            self.street1.clone(),
            self.street2.clone(),
            self.city.clone(),
            self.state,
            zip_code,
        )
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.street1)?;
        if let Some(street2) = &self.street2 {
            write!(f, " {street2}")?;
        }
        write!(f, ", {}, {} {}", self.city, self.state, self.zip_code)
    }
}
