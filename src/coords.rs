// Copyright 2024 The smitten developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Coordinate conventions accepted when parsing identifier ranges.
//!
//! Smitten identifiers are written in 1-based, fully-closed
//! coordinates. Some producers emit zero-based, half-open ranges (the
//! BED convention) instead; parsing with
//! [`CoordinateSystem::ZeroBasedHalfOpen`] re-expresses those as 1-based
//! closed by advancing each range start by one.

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Coordinate convention of the ranges in an identifier.
///
/// ```
/// use smitten::coords::CoordinateSystem;
/// let coords: CoordinateSystem = "zero-based-half-open".parse().unwrap();
/// assert!(coords.is_zero_based_half_open());
/// assert_eq!(CoordinateSystem::default().as_ref(), "one-based-closed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CoordinateSystem {
    OneBasedClosed,
    ZeroBasedHalfOpen,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        CoordinateSystem::OneBasedClosed
    }
}

impl CoordinateSystem {
    pub fn is_zero_based_half_open(self) -> bool {
        self == CoordinateSystem::ZeroBasedHalfOpen
    }

    /// Smallest coordinate value accepted on input, before any
    /// conversion to 1-based closed.
    pub fn min_coordinate(self) -> u64 {
        match self {
            CoordinateSystem::OneBasedClosed => 1,
            CoordinateSystem::ZeroBasedHalfOpen => 0,
        }
    }

    /// Convert a parsed start position into a 1-based closed start.
    /// End positions are identical in both conventions.
    ///
    /// Returns `None` when the converted start does not fit in a `u64`.
    pub fn to_one_based_start(self, start: u64) -> Option<u64> {
        match self {
            CoordinateSystem::OneBasedClosed => Some(start),
            CoordinateSystem::ZeroBasedHalfOpen => start.checked_add(1),
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = CoordinateSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            CoordinateSystem::OneBasedClosed,
            CoordinateSystem::ZeroBasedHalfOpen,
        ]
        .iter()
        .copied()
        .find(|coords| {
            let name: &str = coords.as_ref();
            name == s
        })
        .ok_or_else(|| CoordinateSystemError::Unknown(s.to_owned()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateSystemError {
    #[error("unknown coordinate system {0:?}, expected one-based-closed or zero-based-half-open")]
    Unknown(String),
}

impl From<bool> for CoordinateSystem {
    /// `true` selects zero-based half-open coordinates.
    fn from(zero_based_half_open: bool) -> Self {
        if zero_based_half_open {
            CoordinateSystem::ZeroBasedHalfOpen
        } else {
            CoordinateSystem::OneBasedClosed
        }
    }
}
