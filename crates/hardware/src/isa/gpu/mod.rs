//! GPU Control Extension.
//!
//! Warp-level control instructions encoded in the `custom-0` opcode space as
//! R-type instructions, `funct7 == 0`, distinguished by `funct3`:
//!
//! | Instruction | funct3 | Operands   | Effect                                              |
//! |-------------|--------|------------|-----------------------------------------------------|
//! | `TMC`       | 0      | `rs1`      | Replace the thread mask; a zero mask retires the warp |
//! | `WSPAWN`    | 1      | `rs1, rs2` | Activate warps `1..rs1` of the core at pc `rs2`      |
//! | `BAR`       | 4      | `rs1, rs2` | Barrier `rs1` for `rs2` warps (no-op in this model)  |
//!
//! Operand values are taken from the lowest active thread of the issuing warp.

/// Custom-0 opcode carrying the GPU control instructions.
pub const OP_GPU: u32 = 0b0001011;

/// Thread Mask Control.
pub const TMC: u32 = 0b000;
/// Warp Spawn.
pub const WSPAWN: u32 = 0b001;
/// Barrier.
pub const BAR: u32 = 0b100;
