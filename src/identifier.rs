// Copyright 2024 The smitten developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of Smitten identifiers in any of the three grammars.
//!
//! An identifier is an optional assembly name, a sequence name, and a
//! chain of zero or more range tokens. Each range token is a separator
//! (`:` or `_`), a start position, a middle separator (`-` or `_`), an
//! end position and an optional orientation suffix (`_R`, `_+`, `_-`).
//! The separators decide the grammar of each token:
//!
//! | Token            | Grammar  | Example               |
//! |------------------|----------|-----------------------|
//! | `:s-e_±` / `:s-e_R` | `V2`  | `hg38:chr1:100-200_-` |
//! | `_s_e` / `_s_e_R`   | `V1`  | `hg38:chr1_100_200_R` |
//! | anything else       | `Legacy` | `chr1:200-100`     |
//!
//! Later tokens are relative to the span of the token written before
//! them. The parsed ranges are stored innermost first.
//!
//! ```
//! use smitten::identifier::{Identifier, Version};
//! use smitten::orientation::Orientation;
//! use smitten::range::Range;
//!
//! let id: Identifier = "chr1:100-200_+:10-30_-".parse().unwrap();
//! assert_eq!(id.assembly_id(), None);
//! assert_eq!(id.sequence_id(), "chr1");
//! assert_eq!(
//!     id.ranges(),
//!     &[
//!         Range::new(10, 30, Orientation::Reverse),
//!         Range::new(100, 200, Orientation::Forward),
//!     ]
//! );
//! assert_eq!(id.version(), Some(Version::V2));
//! ```

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use thiserror::Error;
use tracing::{debug, trace};

use crate::coords::CoordinateSystem;
use crate::orientation::Orientation;
use crate::range::{Length, Position, Range};

lazy_static! {
    static ref RANGE_RE: Regex =
        Regex::new(r"([:_])([0-9]+)([-_])([0-9]+)(?:_([R+\-]))?").unwrap();
}

/// Grammar of a range token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, strum_macros::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Version {
    /// `seq:start-end`, where a descending range denotes the reverse strand.
    Legacy,
    /// `seq_start_end`, optionally followed by `_R`.
    V1,
    /// `seq:start-end_+` or `seq:start-end_-`.
    V2,
}

impl Version {
    fn classify(separator: &str, middle: &str, has_suffix: bool) -> Self {
        match (separator, middle) {
            (":", "-") if has_suffix => Version::V2,
            ("_", "_") => Version::V1,
            _ => Version::Legacy,
        }
    }

    /// Whether a descending range is read as a reverse-strand range
    /// rather than rejected.
    fn allows_descending(self) -> bool {
        self == Version::Legacy
    }
}

/// Errors that arise in parsing identifiers. Every variant carries the
/// identifier text as it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("identifier '{id}' contains a space or a line termination character")]
    MalformedIdentifier { id: String },
    #[error("{version} identifier '{id}' must have increasing range order, found {start}-{end}")]
    OutOfOrderRange {
        id: String,
        version: Version,
        start: Position,
        end: Position,
    },
    #[error("range {start}-{end} in identifier '{id}' is less than 1 in a one-based, fully-closed coordinate system")]
    InvalidCoordinate {
        id: String,
        start: Position,
        end: Position,
    },
    #[error("sub-range {start}-{end} in identifier '{id}' is outside the bounds of the parent range length {parent_len}")]
    SubRangeOutOfBounds {
        id: String,
        start: Position,
        end: Position,
        parent_len: Length,
    },
    #[error("identifier '{id}' has a non-standard suffix '{suffix}'")]
    UnexpectedSuffix { id: String, suffix: String },
    #[error("identifier '{id}' does not have a sequence identifier")]
    MissingSequenceIdentifier { id: String },
    #[error("identifier '{id}' has a range position that is not a valid number")]
    InvalidNumber { id: String, source: ParseIntError },
    #[error("zero-based start {start} in identifier '{id}' has no one-based equivalent")]
    CoordinateOverflow { id: String, start: Position },
    #[error("identifier '{id}' has a {found} range where only {expected} is accepted")]
    UnexpectedVersion {
        id: String,
        expected: Version,
        found: Version,
    },
}

impl ParseIdError {
    /// The identifier text that failed to parse.
    pub fn id(&self) -> &str {
        match self {
            ParseIdError::MalformedIdentifier { id }
            | ParseIdError::OutOfOrderRange { id, .. }
            | ParseIdError::InvalidCoordinate { id, .. }
            | ParseIdError::SubRangeOutOfBounds { id, .. }
            | ParseIdError::UnexpectedSuffix { id, .. }
            | ParseIdError::MissingSequenceIdentifier { id }
            | ParseIdError::InvalidNumber { id, .. }
            | ParseIdError::CoordinateOverflow { id, .. }
            | ParseIdError::UnexpectedVersion { id, .. } => id,
        }
    }
}

/// A parsed Smitten identifier.
///
/// `ranges` holds the range chain innermost first: the last range
/// written in the identifier comes first, the range directly on the
/// sequence comes last. `version` is the grammar of the last range token
/// in the text, or `None` for an identifier without ranges.
///
/// The display format is the canonical V2 chain, outermost range first,
/// so displaying a parsed `Legacy` or `V1` identifier converts it:
///
/// ```
/// use smitten::identifier::{Identifier, Version};
/// let id: Identifier = "hg38:chr1_100_200_R".parse().unwrap();
/// assert_eq!(id.version(), Some(Version::V1));
/// assert_eq!(id.to_string(), "hg38:chr1:100-200_-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identifier {
    pub(crate) assembly_id: Option<String>,
    pub(crate) sequence_id: String,
    pub(crate) ranges: Vec<Range>,
    pub(crate) version: Option<Version>,
}

impl Identifier {
    /// Parse an identifier whose ranges use the given coordinate
    /// convention.
    pub fn parse_with(id: &str, coords: CoordinateSystem) -> Result<Self, ParseIdError> {
        Self::parse_id(id, coords, None).map_err(|err| {
            debug!(id, error = %err, "rejected identifier");
            err
        })
    }

    /// Parse an identifier that must be in the current V2 grammar. Any
    /// Legacy or V1 range token is rejected with
    /// `ParseIdError::UnexpectedVersion`.
    ///
    /// ```
    /// use smitten::identifier::{Identifier, ParseIdError};
    /// let id = Identifier::parse_v2("hg38:chr1:100-200_+:10-50_-").unwrap();
    /// assert_eq!(id.ranges().len(), 2);
    /// assert!(matches!(
    ///     Identifier::parse_v2("hg38:chr1_100_200_R"),
    ///     Err(ParseIdError::UnexpectedVersion { .. })
    /// ));
    /// ```
    pub fn parse_v2(id: &str) -> Result<Self, ParseIdError> {
        Self::parse_id(id, CoordinateSystem::OneBasedClosed, Some(Version::V2)).map_err(|err| {
            debug!(id, error = %err, "rejected V2 identifier");
            err
        })
    }

    /// Assembly qualifier, e.g. `hg38`.
    pub fn assembly_id(&self) -> Option<&str> {
        self.assembly_id.as_deref()
    }

    /// Name of the sequence, e.g. `chr1`.
    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    /// Range chain, innermost first.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Grammar of the last range token, `None` when there are no ranges.
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    fn parse_id(
        id: &str,
        coords: CoordinateSystem,
        required: Option<Version>,
    ) -> Result<Self, ParseIdError> {
        if id.contains(|c: char| c == ' ' || c == '\n' || c == '\r') {
            return Err(ParseIdError::MalformedIdentifier { id: id.to_owned() });
        }

        // Ranges in the order they are written, outermost first.
        let mut ranges: Vec<Range> = Vec::new();
        let mut version = None;
        let mut prefix_end = None;
        let mut cursor = 0;

        for cap in RANGE_RE.captures_iter(id) {
            let token = cap.get_match();
            match prefix_end {
                None => prefix_end = Some(token.start()),
                Some(_) if token.start() != cursor => {
                    return Err(ParseIdError::UnexpectedSuffix {
                        id: id.to_owned(),
                        suffix: id[cursor..].to_owned(),
                    });
                }
                Some(_) => {}
            }
            cursor = token.end();

            let (range, token_version) = parse_range(id, &cap, ranges.last(), coords)?;
            if let Some(expected) = required.filter(|v| *v != token_version) {
                return Err(ParseIdError::UnexpectedVersion {
                    id: id.to_owned(),
                    expected,
                    found: token_version,
                });
            }
            trace!(token = token.as_str(), version = %token_version, range = %range, "parsed range token");
            ranges.push(range);
            version = Some(token_version);
        }

        let prefix = match prefix_end {
            Some(end) => {
                if cursor < id.len() {
                    return Err(ParseIdError::UnexpectedSuffix {
                        id: id.to_owned(),
                        suffix: id[cursor..].to_owned(),
                    });
                }
                &id[..end]
            }
            None => id,
        };

        let (assembly_id, sequence_id) = break_prefix(prefix).ok_or_else(|| {
            ParseIdError::MissingSequenceIdentifier { id: id.to_owned() }
        })?;

        ranges.reverse();
        Ok(Identifier {
            assembly_id: assembly_id.map(str::to_owned),
            sequence_id: sequence_id.to_owned(),
            ranges,
            version,
        })
    }
}

// Turn one matched range token into a 1-based closed range, applying the
// ordering, coordinate floor and parent containment rules.
fn parse_range(
    id: &str,
    cap: &Captures,
    parent: Option<&Range>,
    coords: CoordinateSystem,
) -> Result<(Range, Version), ParseIdError> {
    let number = |s: &str| {
        s.parse::<Position>()
            .map_err(|source| ParseIdError::InvalidNumber {
                id: id.to_owned(),
                source,
            })
    };
    let start = number(&cap[2])?;
    let end = number(&cap[4])?;
    let suffix = cap.get(5).map(|m| m.as_str());
    let version = Version::classify(&cap[1], &cap[3], suffix.is_some());

    let (start, end, swapped) = if start > end {
        if !version.allows_descending() {
            return Err(ParseIdError::OutOfOrderRange {
                id: id.to_owned(),
                version,
                start,
                end,
            });
        }
        (end, start, true)
    } else {
        (start, end, false)
    };

    let orientation = match (suffix, swapped) {
        (Some("R"), _) | (Some("-"), false) | (_, true) => Orientation::Reverse,
        _ => Orientation::Forward,
    };

    let min = coords.min_coordinate();
    if start < min || end < min {
        return Err(ParseIdError::InvalidCoordinate {
            id: id.to_owned(),
            start,
            end,
        });
    }

    let mut range = Range::new(start, end, orientation);
    if let Some(parent) = parent {
        if !range.fits_within(parent) {
            return Err(ParseIdError::SubRangeOutOfBounds {
                id: id.to_owned(),
                start,
                end,
                parent_len: parent.len(),
            });
        }
    }
    range.start = coords
        .to_one_based_start(range.start)
        .ok_or_else(|| ParseIdError::CoordinateOverflow {
            id: id.to_owned(),
            start,
        })?;

    Ok((range, version))
}

// Break the text before the range chain into an assembly and a sequence
// name. An empty assembly is treated as absent.
fn break_prefix(prefix: &str) -> Option<(Option<&str>, &str)> {
    let mut fields = prefix.split(':');
    let (assembly_id, sequence_id) = match (fields.next(), fields.next(), fields.next()) {
        (Some(sequence_id), None, None) => (None, sequence_id),
        (Some(assembly_id), Some(sequence_id), None) => {
            (Some(assembly_id).filter(|a| !a.is_empty()), sequence_id)
        }
        _ => return None,
    };
    if sequence_id.is_empty() {
        None
    } else {
        Some((assembly_id, sequence_id))
    }
}

/// Parse an identifier, reading its ranges as zero-based half-open
/// coordinates when `zero_based_half_open` is set.
///
/// ```
/// use smitten::identifier::Version;
/// let id = smitten::parse("hg38:chr1:100-200_+", false).unwrap();
/// assert_eq!(id.assembly_id(), Some("hg38"));
/// assert_eq!(id.sequence_id(), "chr1");
/// assert_eq!(id.ranges()[0].to_string(), "100-200_+");
/// assert_eq!(id.version(), Some(Version::V2));
/// ```
pub fn parse(id: &str, zero_based_half_open: bool) -> Result<Identifier, ParseIdError> {
    Identifier::parse_with(id, CoordinateSystem::from(zero_based_half_open))
}

impl FromStr for Identifier {
    type Err = ParseIdError;

    /// Parse an identifier in 1-based, fully-closed coordinates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse_with(s, CoordinateSystem::OneBasedClosed)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(assembly_id) = &self.assembly_id {
            write!(f, "{}:", assembly_id)?;
        }
        write!(f, "{}", self.sequence_id)?;
        for range in self.ranges.iter().rev() {
            write!(f, ":{}", range)?;
        }
        Ok(())
    }
}
