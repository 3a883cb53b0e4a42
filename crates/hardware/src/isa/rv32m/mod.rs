//! RISC-V Multiply/Divide Extension (RV32M).
//!
//! The M extension shares the `OP_REG` opcode with base integer instructions
//! and is selected by `funct7 == M_EXTENSION`; `funct3` picks the operation.
//! All operations act on 32-bit registers, the `MULH*` forms returning the
//! upper half of the 64-bit product.

/// funct7 selector for multiply/divide under `OP_REG`.
pub const M_EXTENSION: u32 = 0b0000001;

/// Multiply, lower 32 bits.
pub const MUL: u32 = 0b000;
/// Multiply High (signed * signed).
pub const MULH: u32 = 0b001;
/// Multiply High (signed * unsigned).
pub const MULHSU: u32 = 0b010;
/// Multiply High (unsigned * unsigned).
pub const MULHU: u32 = 0b011;
/// Divide (signed).
pub const DIV: u32 = 0b100;
/// Divide Unsigned.
pub const DIVU: u32 = 0b101;
/// Remainder (signed).
pub const REM: u32 = 0b110;
/// Remainder Unsigned.
pub const REMU: u32 = 0b111;
