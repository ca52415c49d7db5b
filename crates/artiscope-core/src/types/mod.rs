//! Value records produced by the inspection engine.
//!
//! Every record is created on demand by the component that computes it and
//! is owned by the caller. Nothing here is cached or persisted.

pub mod container_record;
pub mod digest_set;
pub mod file_kind;
pub mod file_record;
pub mod package_record;

pub use container_record::ContainerRecord;
pub use digest_set::DigestSet;
pub use file_kind::FileKind;
pub use file_record::FileRecord;
pub use package_record::PackageRecord;
