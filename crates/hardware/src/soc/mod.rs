//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory side of a simulation instance: the
//! physical memory implementation and the capability traits the processor
//! and the bridge program against.

/// Sparse physical memory.
pub mod memory;

/// Collaborator traits for memory and processor models.
pub mod traits;
