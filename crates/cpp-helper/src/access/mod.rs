//! Line-based recovery of a class's public section.

mod region;

pub use region::{PublicRegion, class_body_start, public_region};
