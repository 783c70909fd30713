//! Shared version model for gdvm.
//!
//! Everything in this crate is pure: parsing user input into a
//! [`VersionSpec`], binding it to a resolved [`Semver`], and rendering that
//! `Semver` into the upstream asset naming convention or the on-disk
//! directory name.

pub mod error;
pub mod release;
pub mod semver;
pub mod version;

pub use error::SpecError;
pub use release::{Channel, ReleaseTag, parse_upstream_tag};
pub use semver::{ListEntry, Semver};
pub use version::{Version, VersionSpec};

/// Product prefix used in every upstream asset filename.
pub const PRODUCT_PREFIX: &str = "Godot";
