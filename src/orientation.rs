// Copyright 2024 The smitten developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Strand orientation of a range within a Smitten identifier.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thiserror::Error;

/// Orientation of a range relative to its enclosing sequence or range.
///
/// Every range in a Smitten identifier has a known orientation, so
/// unlike general strand annotations there is no "unknown" state.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Forward
    }
}

impl Orientation {
    /// Returns the `Orientation` for the given char.
    ///
    /// The mapping is as follows:
    ///     * '+' becomes `Orientation::Forward`
    ///     * '-' or 'R' becomes `Orientation::Reverse`
    ///     * Any other inputs will return an `Err(OrientationError::InvalidChar)`
    pub fn from_char(orientation_char: char) -> Result<Orientation, OrientationError> {
        match orientation_char {
            '+' => Ok(Orientation::Forward),
            '-' | 'R' => Ok(Orientation::Reverse),
            invalid => Err(OrientationError::InvalidChar(invalid)),
        }
    }

    /// Symbol used in the canonical identifier form, `'+'` or `'-'`.
    pub fn symbol(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Orientation::Reverse
    }

    /// Opposite orientation.
    pub fn reverse(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    /// Orientation of a range with orientation `inner` once it is placed
    /// inside a range with orientation `self`.
    ///
    /// Reversals compose like an exclusive-or: two reverse layers cancel.
    ///
    /// ```
    /// use smitten::orientation::Orientation;
    /// assert_eq!(Orientation::Reverse.product(Orientation::Reverse), Orientation::Forward);
    /// assert_eq!(Orientation::Forward.product(Orientation::Reverse), Orientation::Reverse);
    /// ```
    pub fn product(self, inner: Orientation) -> Orientation {
        match self {
            Orientation::Forward => inner,
            Orientation::Reverse => inner.reverse(),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Orientation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::from_char(c),
            _ => Err(OrientationError::InvalidString(s.to_owned())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrientationError {
    #[error("character {0:?} can not be converted to an Orientation")]
    InvalidChar(char),
    #[error("string {0:?} can not be converted to an Orientation")]
    InvalidString(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::from_char('+').unwrap(), Orientation::Forward);
        assert_eq!(Orientation::from_char('-').unwrap(), Orientation::Reverse);
        assert_eq!(Orientation::from_char('R').unwrap(), Orientation::Reverse);
        assert!(Orientation::from_char('.').is_err());
        assert_eq!("-".parse::<Orientation>().unwrap(), Orientation::Reverse);
        assert!("+-".parse::<Orientation>().is_err());
        assert!("".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_product() {
        use Orientation::*;
        assert_eq!(Forward.product(Forward), Forward);
        assert_eq!(Forward.product(Reverse), Reverse);
        assert_eq!(Reverse.product(Forward), Reverse);
        assert_eq!(Reverse.product(Reverse), Forward);
    }

    #[test]
    fn test_display() {
        assert_eq!(Orientation::Forward.to_string(), "+");
        assert_eq!(Orientation::Reverse.to_string(), "-");
        assert_eq!(Orientation::default(), Orientation::Forward);
    }
}
