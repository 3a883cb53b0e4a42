//! CSR Addresses.
//!
//! Every CSR the model exposes is read-only: writes are accepted and
//! discarded so that `csrr` pseudo-instructions and stray `csrw`s both work.

/// Hart id; the global thread id `(core * warps + warp) * threads + thread`.
pub const MHARTID: u32 = 0xF14;

/// Cycle counter, low 32 bits.
pub const CYCLE: u32 = 0xC00;
/// Cycle counter, high 32 bits.
pub const CYCLEH: u32 = 0xC80;
/// Retired warp instructions, low 32 bits.
pub const INSTRET: u32 = 0xC02;
/// Retired warp instructions, high 32 bits.
pub const INSTRETH: u32 = 0xC82;

/// Lane index of the thread within its warp.
pub const THREAD_ID: u32 = 0xCC0;
/// Index of the warp within its core.
pub const WARP_ID: u32 = 0xCC1;
/// Index of the core.
pub const CORE_ID: u32 = 0xCC2;
/// Active thread mask of the issuing warp.
pub const THREAD_MASK: u32 = 0xCC4;
/// Global warp id `core * warps + warp`.
pub const GLOBAL_WARP_ID: u32 = 0xCC5;

/// Threads per warp.
pub const NUM_THREADS: u32 = 0xFC0;
/// Warps per core.
pub const NUM_WARPS: u32 = 0xFC1;
/// Cores in the machine.
pub const NUM_CORES: u32 = 0xFC2;
