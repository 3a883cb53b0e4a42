//! Simulation utilities and program loading.
//!
//! Provides the program-image loader used to populate memory before the
//! processor is reset.

/// Raw and ELF image loading.
pub mod loader;

pub use loader::{ImageFormat, LoadedImage, ProgramImage, load_image};
