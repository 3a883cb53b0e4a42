//! Global System Constants.
//!
//! This module defines machine-wide constants. It includes:
//! 1. **Address Space:** Capacity of the physical memory and its page granularity.
//! 2. **Startup Layout:** The well-known load address and per-thread stack carving.
//! 3. **Instruction Constants:** Instruction width and register-file shape.

/// Size of the full 32-bit physical address space (4 GiB).
pub const ADDRESS_SPACE_SIZE: u64 = 1 << 32;

/// Default page size of the sparse memory in bytes (4 KiB).
pub const PAGE_SIZE: u64 = 4096;

/// Well-known load address for program images and the reset program counter.
pub const STARTUP_ADDR: u64 = 0x8000_0000;

/// Top of the stack region; thread stacks are carved downward from here.
pub const STACK_BASE_ADDR: u64 = 0xFF00_0000;

/// log2 of the stack size reserved for each hardware thread (1 KiB).
pub const STACK_LOG2_SIZE: u32 = 10;

/// Size of a standard (32-bit) instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of architectural integer registers per thread.
pub const NUM_REGS: usize = 32;

/// Maximum threads per warp; the thread mask is a `u32`.
pub const MAX_THREADS_PER_WARP: usize = 32;

/// Maximum warps per core; the active-warp mask is a `u64`.
pub const MAX_WARPS_PER_CORE: usize = 64;
