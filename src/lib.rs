//! Parsing and normalization of Smitten sequence identifiers.
//!
//! A Smitten identifier names a sequence, optionally qualified by an
//! assembly, and optionally restricted to a chain of stranded ranges,
//! each relative to the one before it:
//!
//! ```text
//! hg38:chr1:100-200_+:10-50_-:1-5_+
//! ```
//!
//! Three grammars are understood ([`Version`]): the current `V2` form
//! shown above, the underscore-separated `V1` form (`chr1_100_200_R`) and
//! the `Legacy` form (`chr1:200-100`), where a descending range denotes the
//! reverse strand. Chains are collapsed into a single absolute range by
//! [`normalize`].
//!
//! ```
//! use smitten::{Identifier, Version};
//!
//! let id = smitten::parse("hg38:chr1:100-200_+", false).unwrap();
//! assert_eq!(id.assembly_id(), Some("hg38"));
//! assert_eq!(id.sequence_id(), "chr1");
//! assert_eq!(id.version(), Some(Version::V2));
//!
//! // Legacy and V1 identifiers display in the V2 form.
//! let id: Identifier = "chr1_100_200".parse().unwrap();
//! assert_eq!(id.to_string(), "chr1:100-200_+");
//!
//! assert_eq!(
//!     smitten::normalize("hg38:chr1:100-200_+:10-50_-:1-5_+").unwrap(),
//!     "hg38:chr1:145-149_-"
//! );
//! ```

#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate lazy_static;

pub mod coords;
pub mod identifier;
pub mod normalize;
pub mod orientation;
pub mod range;

pub use crate::coords::CoordinateSystem;
pub use crate::identifier::{parse, Identifier, ParseIdError, Version};
pub use crate::normalize::{normalize, NormalizeError};
pub use crate::orientation::Orientation;
pub use crate::range::Range;
