//! Bridge error taxonomy.
//!
//! Every operation of the bridge reports failure through [`BridgeError`]. The
//! variants fall into four classes:
//! 1. **Configuration:** The machine shape or memory geometry was rejected; no instance exists.
//! 2. **Resource:** The program image could not be read, parsed or placed; the instance exists.
//! 3. **Precondition:** No instance, or an unusable caller buffer; nothing happened.
//! 4. **Collaborator fault:** The processor faulted while stepping; the instance is left as is.

use simx_core::common::error::{ConfigError, LoadError, MemoryError, SimError};
use thiserror::Error;

/// C status: success.
pub const STATUS_OK: i32 = 0;
/// C status: configuration rejected.
pub const STATUS_CONFIG: i32 = 1;
/// C status: program image could not be loaded.
pub const STATUS_IMAGE: i32 = 2;
/// C status: invalid handle, precondition violation or simulation fault.
pub const STATUS_ERROR: i32 = -1;

/// Failure of a bridge operation.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The operation needs an instance and the session has none.
    #[error("no simulation instance; initialize the session first")]
    NotInitialized,

    /// The machine configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The program image could not be loaded; the instance remains usable.
    #[error("cannot load program image: {0}")]
    Image(#[from] LoadError),

    /// The caller passed a zero-length transfer.
    #[error("transfer buffer is empty")]
    EmptyBuffer,

    /// The caller's buffer holds fewer bytes than the requested length.
    #[error("buffer of {available} bytes is shorter than the requested {requested}")]
    BufferTooShort {
        /// Requested transfer length.
        requested: usize,
        /// Length of the caller's buffer.
        available: usize,
    },

    /// The requested range is not inside the instance's memory.
    #[error(transparent)]
    OutOfRange(#[from] MemoryError),

    /// The processor faulted while stepping.
    #[error("simulation fault: {0}")]
    Sim(#[from] SimError),
}

impl BridgeError {
    /// Status code reported across the C boundary.
    ///
    /// # Returns
    ///
    /// [`STATUS_CONFIG`] for configuration errors, [`STATUS_IMAGE`] for image
    /// errors, and [`STATUS_ERROR`] for everything else.
    pub fn status(&self) -> i32 {
        match self {
            Self::Config(_) => STATUS_CONFIG,
            Self::Image(_) => STATUS_IMAGE,
            Self::NotInitialized
            | Self::EmptyBuffer
            | Self::BufferTooShort { .. }
            | Self::OutOfRange(_)
            | Self::Sim(_) => STATUS_ERROR,
        }
    }
}

/// Result alias for bridge operations.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
