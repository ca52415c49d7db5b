//! Command implementations.

pub mod classify;
pub mod compare;
pub mod completion;
pub mod container;
pub mod hash;
pub mod info;
pub mod package;
pub mod scan;
pub mod verify;
