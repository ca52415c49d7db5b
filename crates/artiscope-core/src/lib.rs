//! Content-based introspection of binary application artifacts.
//!
//! `artiscope-core` classifies files by content rather than extension,
//! computes MD5/SHA-1/SHA-256 in a single streaming pass, extracts structural
//! facts from native executable containers and zip-based application
//! packages, scans directories, and compares or verifies files. Untrusted
//! input never causes an error at the public boundary: unreadable or
//! undecodable content degrades to well-defined default records.
//!
//! Platform tooling (signature checks, structure dumps, unpacking) is
//! reached through the traits in [`tools`], wired by an [`Inspector`].
//!
//! # Examples
//!
//! ```no_run
//! use artiscope_core::InspectConfig;
//! use artiscope_core::Inspector;
//!
//! let inspector = Inspector::new(&InspectConfig::default());
//! let kind = inspector.classify("Demo.ipa");
//! let package = inspector.analyze_package("Demo.ipa");
//! println!("{kind}: {} {}", package.bundle_id, package.version);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod compare;
pub mod config;
pub mod detect;
pub mod digest;
pub mod error;
pub mod inspector;
pub mod integrity;
pub mod probe;
pub mod scan;
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
pub mod tools;
pub mod types;

// Re-export main API types
pub use compare::Comparison;
pub use config::ExtractionLimits;
pub use config::InspectConfig;
pub use config::UnpackStrategy;
pub use error::InspectError;
pub use error::Result;
pub use inspector::Capabilities;
pub use inspector::Inspector;
pub use inspector::InspectorBuilder;
pub use scan::ScanMode;

// Re-export types module for easier access
pub use types::ContainerRecord;
pub use types::DigestSet;
pub use types::FileKind;
pub use types::FileRecord;
pub use types::PackageRecord;
