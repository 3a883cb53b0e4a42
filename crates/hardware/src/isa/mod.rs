//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic, organized
//! by extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `gpu`: Warp control (thread mask, warp spawn, barrier) in the custom-0 space.
//! * `privileged`: System instructions and the identity CSRs.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RISC-V instruction formats.
pub mod decode;

/// GPU control extension (TMC, WSPAWN, BAR).
pub mod gpu;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// System instructions and CSR addresses.
pub mod privileged;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;
