//! DoS prevention constants.
//!
//! These limits keep pathological inputs from causing deep recursion
//! or unbounded output amplification.

/// Maximum nesting depth for lists.
///
/// A list item deeper than this is treated as content of the current item.
pub const MAX_LIST_NESTING: usize = 32;

/// Largest heading level; longer `=` runs are clamped to it.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Maximum colspan produced by merging consecutive cell delimiters.
pub const MAX_TABLE_COLSPAN: u32 = 1000;
