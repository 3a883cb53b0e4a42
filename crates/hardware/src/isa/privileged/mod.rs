//! System Instruction Definitions.
//!
//! Defines the system opcode space the SIMT model implements: environment
//! calls, breakpoints, and read access to the identity and counter CSRs.
//!
//! # Modules
//!
//! - `csr`: CSR addresses (thread/warp/core identity, machine shape, counters).
//! - `opcodes`: System instruction encodings (ECALL, EBREAK, CSR access).

/// Control and status register addresses.
pub mod csr;

/// System instruction opcodes (ECALL, EBREAK, CSR access).
pub mod opcodes;
