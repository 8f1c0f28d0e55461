//! Three-way merge
//!
//! - `split_point`: the common ancestor both sides are compared against
//! - `resolution`: the per-file decision table and conflict content

pub mod resolution;
pub mod split_point;
