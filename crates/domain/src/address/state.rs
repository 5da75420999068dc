//! US state codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AddressError;

macro_rules! us_states {
    ($($code:ident => $name:literal),+ $(,)?) => {
        /// Two-letter US state (and district) code used in mailing addresses.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum UsState {
            $(
                #[doc = $name]
                $code,
            )+
        }

        impl UsState {
            /// Every state, in alphabetical code order.
            pub const ALL: &'static [UsState] = &[$(UsState::$code),+];

            /// Returns the two-letter postal code.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(UsState::$code => stringify!($code),)+
                }
            }

            /// Returns the full state name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(UsState::$code => $name,)+
                }
            }
        }

        impl FromStr for UsState {
            type Err = AddressError;

            /// Parses a two-letter code, ignoring case and surrounding whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $(stringify!($code) => Ok(UsState::$code),)+
                    _ => Err(AddressError::UnknownState(s.to_string())),
                }
            }
        }
    };
}

us_states! {
    AK => "Alaska",
    AL => "Alabama",
    AR => "Arkansas",
    AZ => "Arizona",
    CA => "California",
    CO => "Colorado",
    CT => "Connecticut",
    DC => "District of Columbia",
    DE => "Delaware",
    FL => "Florida",
    GA => "Georgia",
    HI => "Hawaii",
    IA => "Iowa",
    ID => "Idaho",
    IL => "Illinois",
    IN => "Indiana",
    KS => "Kansas",
    KY => "Kentucky",
    LA => "Louisiana",
    MA => "Massachusetts",
    MD => "Maryland",
    ME => "Maine",
    MI => "Michigan",
    MN => "Minnesota",
    MO => "Missouri",
    MS => "Mississippi",
    MT => "Montana",
    NC => "North Carolina",
    ND => "North Dakota",
    NE => "Nebraska",
    NH => "New Hampshire",
    NJ => "New Jersey",
    NM => "New Mexico",
    NV => "Nevada",
    NY => "New York",
    OH => "Ohio",
    OK => "Oklahoma",
    OR => "Oregon",
    PA => "Pennsylvania",
    RI => "Rhode Island",
    SC => "South Carolina",
    SD => "South Dakota",
    TN => "Tennessee",
    TX => "Texas",
    UT => "Utah",
    VA => "Virginia",
    VT => "Vermont",
    WA => "Washington",
    WI => "Wisconsin",
    WV => "West Virginia",
    WY => "Wyoming",
}

impl std::fmt::Display for UsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("tx".parse::<UsState>().unwrap(), UsState::TX);
        assert_eq!(" Ny ".parse::<UsState>().unwrap(), UsState::NY);
    }

    #[test]
    fn test_parse_unknown_code() {
        let result = "ZZ".parse::<UsState>();
        assert_eq!(result, Err(AddressError::UnknownState("ZZ".to_string())));
    }

    #[test]
    fn test_every_code_round_trips() {
        assert_eq!(UsState::ALL.len(), 51);
        for state in UsState::ALL {
            assert_eq!(state.as_str().parse::<UsState>().unwrap(), *state);
        }
    }

    #[test]
    fn test_display_and_name() {
        assert_eq!(UsState::DC.to_string(), "DC");
        assert_eq!(UsState::DC.name(), "District of Columbia");
    }
}
