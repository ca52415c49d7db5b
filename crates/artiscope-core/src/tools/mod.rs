//! Injectable strategies for platform tooling.
//!
//! Every external capability the engine relies on sits behind a trait with a
//! production implementation and a no-op fallback. Which one is used is
//! decided once, when an [`Inspector`](crate::Inspector) is built.

pub mod dump;
pub mod manifest;
pub mod process;
pub mod quota;
pub mod signature;
pub mod unpack;

pub use dump::NoStructureDumper;
pub use dump::OtoolDumper;
pub use dump::StructureDumper;
pub use manifest::PlistParser;
pub use manifest::PropertyListParser;
pub use manifest::PropertyMap;
pub use process::ProcessOutput;
pub use process::ProcessRunner;
pub use process::SystemProcessRunner;
pub use quota::QuotaTracker;
pub use signature::CodesignChecker;
pub use signature::NoSignatureChecker;
pub use signature::SignatureChecker;
pub use unpack::CommandUnpacker;
pub use unpack::NoUnpacker;
pub use unpack::Unpacker;
pub use unpack::ZipUnpacker;
