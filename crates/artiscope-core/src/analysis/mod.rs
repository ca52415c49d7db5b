//! Structural analysis of executable containers and application packages.

pub mod container;
pub mod package;

pub use container::StructureFacts;
pub use container::analyze_container;
pub use container::parse_structure_dump;
pub use package::PackageTools;
pub use package::analyze_package;
