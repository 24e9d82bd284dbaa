// Copyright 2024 The smitten developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! A single range restriction, e.g. `100-200_-`.

use std::cmp::{max, min};
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// Sequence position, 1-based.
pub type Position = u64;
/// Number of positions spanned by a range.
pub type Length = u64;

/// A range on a sequence, or on an enclosing range when it is part of a
/// chain. Coordinates are 1-based and fully closed.
///
/// The display format is the canonical one, _start-end_±_:
///
/// ```
/// use smitten::orientation::Orientation;
/// use smitten::range::Range;
/// let range = Range::new(100, 200, Orientation::Reverse);
/// assert_eq!(range.to_string(), "100-200_-");
/// assert_eq!(range.len(), 101);
/// ```
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    pub start: Position,
    pub end: Position,
    pub orientation: Orientation,
}

impl Range {
    /// Number of positions covered, `end - start + 1`.
    ///
    /// A range whose start lies past its end (possible only after a
    /// zero-based conversion of an empty range) has length zero.
    pub fn len(&self) -> Length {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both bounds of `self`, read as positions relative to a
    /// parent range, fall within `parent`'s length.
    pub fn fits_within(&self, parent: &Range) -> bool {
        let parent_len = parent.len();
        self.start <= parent_len && self.end <= parent_len
    }

    /// Map a range expressed relative to `self` _out of_ `self` onto the
    /// sequence `self` lies on.
    ///
    /// Position 1 of a forward range is its `start`; position 1 of a
    /// reverse range is its `end`, counting towards lower coordinates.
    /// The orientation of the result is the composition of both
    /// orientations. Bounds are returned lowest first.
    ///
    /// Returns `None` when a mapped coordinate would drop below 1 or
    /// overflow.
    ///
    /// ```
    /// use smitten::orientation::Orientation;
    /// use smitten::range::Range;
    /// let outer = Range::new(100, 200, Orientation::Reverse);
    /// let inner = Range::new(10, 20, Orientation::Forward);
    /// let mapped = outer.map_outof(&inner).unwrap();
    /// assert_eq!(mapped, Range::new(181, 191, Orientation::Reverse));
    /// ```
    pub fn map_outof(&self, inner: &Range) -> Option<Range> {
        let map = |pos: Position| -> Option<Position> {
            let mapped = match self.orientation {
                Orientation::Forward => self.start.checked_add(pos)?.checked_sub(1)?,
                Orientation::Reverse => self.end.checked_add(1)?.checked_sub(pos)?,
            };
            if mapped == 0 {
                None
            } else {
                Some(mapped)
            }
        };

        let start = map(inner.start)?;
        let end = map(inner.end)?;
        Some(Range {
            start: min(start, end),
            end: max(start, end),
            orientation: self.orientation.product(inner.orientation),
        })
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}-{}_{}", self.start, self.end, self.orientation)
    }
}
