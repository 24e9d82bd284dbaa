// Copyright 2024 The smitten developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Normalization of chained identifiers.
//!
//! A chain such as `hg38:chr1:100-200_+:10-50_-:1-5_+` describes
//! positions 1-5 of the reverse strand of positions 10-50 of positions
//! 100-200 of `chr1`. Normalizing collapses the chain into the single
//! absolute range those positions occupy on `chr1`, together with the
//! orientation obtained by composing every layer:
//!
//! ```
//! let normalized = smitten::normalize("hg38:chr1:100-200_+:10-50_-:1-5_+").unwrap();
//! assert_eq!(normalized, "hg38:chr1:145-149_-");
//! ```

use std::cmp::{max, min};

use thiserror::Error;
use tracing::debug;

use crate::coords::CoordinateSystem;
use crate::identifier::{Identifier, ParseIdError, Version};
use crate::range::Range;

/// Errors that arise in normalizing identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error(transparent)]
    Parse(#[from] ParseIdError),
    #[error("range {range} of identifier '{id}' falls outside the sequence once mapped out of {enclosing}")]
    CoordinateOutOfBounds {
        id: String,
        range: Range,
        enclosing: Range,
    },
}

impl Identifier {
    /// The single absolute range described by the range chain, or
    /// `None` for an identifier without ranges.
    ///
    /// The innermost range is mapped out of each enclosing range in
    /// turn, up to the range that lies directly on the sequence.
    pub fn normalized_range(&self) -> Result<Option<Range>, NormalizeError> {
        let mut ranges = self.ranges.iter();
        let innermost = match ranges.next() {
            Some(range) => Range::new(
                min(range.start, range.end),
                max(range.start, range.end),
                range.orientation,
            ),
            None => return Ok(None),
        };

        ranges
            .try_fold(innermost, |current, enclosing| {
                enclosing
                    .map_outof(&current)
                    .ok_or_else(|| NormalizeError::CoordinateOutOfBounds {
                        id: self.to_string(),
                        range: current,
                        enclosing: *enclosing,
                    })
            })
            .map(Some)
    }

    /// A new identifier on the same sequence with the range chain
    /// collapsed into one absolute range. An identifier without ranges
    /// is returned as is.
    ///
    /// ```
    /// use smitten::identifier::Identifier;
    /// let id: Identifier = "chr1:100-200_-:10-20_+".parse().unwrap();
    /// let normalized = id.normalized().unwrap();
    /// assert_eq!(normalized.ranges().len(), 1);
    /// assert_eq!(normalized.to_string(), "chr1:181-191_-");
    /// ```
    pub fn normalized(&self) -> Result<Identifier, NormalizeError> {
        let range = self.normalized_range()?;
        Ok(Identifier {
            assembly_id: self.assembly_id.clone(),
            sequence_id: self.sequence_id.clone(),
            ranges: range.into_iter().collect(),
            version: range.map(|_| Version::V2).or(self.version),
        })
    }

    /// Canonical string of the normalized identifier.
    pub fn to_normalized_string(&self) -> Result<String, NormalizeError> {
        self.normalized().map(|id| id.to_string())
    }
}

/// Normalize an identifier in any grammar to a single absolute range in
/// canonical form, `[assembly:]sequence:start-end_±`.
///
/// Identifiers without ranges have nothing to normalize and are
/// returned unchanged.
///
/// ```
/// assert_eq!(smitten::normalize("hg38:chr1:100-200_-:10-20_+").unwrap(), "hg38:chr1:181-191_-");
/// assert_eq!(smitten::normalize("chr1:200-100").unwrap(), "chr1:100-200_-");
/// assert_eq!(smitten::normalize("hg38:chr1").unwrap(), "hg38:chr1");
/// ```
pub fn normalize(id: &str) -> Result<String, NormalizeError> {
    let identifier = Identifier::parse_with(id, CoordinateSystem::OneBasedClosed)?;
    if identifier.ranges().is_empty() {
        return Ok(id.to_owned());
    }

    let normalized = identifier.to_normalized_string()?;
    debug!(id, normalized = normalized.as_str(), "normalized identifier");
    Ok(normalized)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sign(reverse: bool) -> char {
        if reverse {
            '-'
        } else {
            '+'
        }
    }

    proptest! {
        #[test]
        fn orientation_is_parity_of_reversals(layers in prop::collection::vec(any::<bool>(), 1..8)) {
            let mut id = String::from("chr1:1000-2000_");
            id.push(sign(layers[0]));
            for reverse in &layers[1..] {
                id.push_str(":1-10_");
                id.push(sign(*reverse));
            }
            let reversals = layers.iter().filter(|r| **r).count();
            let expected = if reversals % 2 == 1 { '-' } else { '+' };
            let normalized = normalize(&id).unwrap();
            prop_assert!(normalized.ends_with(expected), "{} -> {}", id, normalized);
        }

        #[test]
        fn normalized_range_lies_within_outermost(
            start in 1u64..10_000,
            len in 1u64..10_000,
            a in 1u64..10_000,
            b in 1u64..10_000,
            outer_reverse in any::<bool>(),
            inner_reverse in any::<bool>(),
        ) {
            let (a, b) = (a.min(len), b.min(len));
            let (a, b) = (a.min(b), a.max(b));
            let end = start + len - 1;
            let id = format!(
                "hg38:chr1:{}-{}_{}:{}-{}_{}",
                start, end, sign(outer_reverse), a, b, sign(inner_reverse)
            );
            let parsed: Identifier = id.parse().unwrap();
            let range = parsed.normalized_range().unwrap().unwrap();
            prop_assert!(range.start >= start && range.end <= end);
            prop_assert_eq!(range.len(), b - a + 1);
            prop_assert_eq!(range.orientation.is_reverse(), outer_reverse != inner_reverse);
        }
    }
}
