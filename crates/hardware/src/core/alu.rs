//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU every lane of a warp uses.
//! It covers the base integer operations and the Multiply/Divide (M)
//! extension, including the architecturally defined results for division
//! by zero and signed overflow.

use crate::isa::rv32i::{funct3, funct7};
use crate::isa::rv32m;

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than (unsigned).
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Multiply, low word.
    Mul,
    /// Multiply high, signed × signed.
    Mulh,
    /// Multiply high, signed × unsigned.
    Mulhsu,
    /// Multiply high, unsigned × unsigned.
    Mulhu,
    /// Divide (signed).
    Div,
    /// Divide (unsigned).
    Divu,
    /// Remainder (signed).
    Rem,
    /// Remainder (unsigned).
    Remu,
}

impl AluOp {
    /// Maps an `OP_REG` instruction to its operation.
    ///
    /// # Returns
    ///
    /// `None` for reserved `funct7`/`funct3` combinations.
    pub fn from_reg(f3: u32, f7: u32) -> Option<Self> {
        let op = match (f7, f3) {
            (funct7::DEFAULT, funct3::ADD_SUB) => Self::Add,
            (funct7::SUB, funct3::ADD_SUB) => Self::Sub,
            (funct7::DEFAULT, funct3::SLL) => Self::Sll,
            (funct7::DEFAULT, funct3::SLT) => Self::Slt,
            (funct7::DEFAULT, funct3::SLTU) => Self::Sltu,
            (funct7::DEFAULT, funct3::XOR) => Self::Xor,
            (funct7::DEFAULT, funct3::SRL_SRA) => Self::Srl,
            (funct7::SRA, funct3::SRL_SRA) => Self::Sra,
            (funct7::DEFAULT, funct3::OR) => Self::Or,
            (funct7::DEFAULT, funct3::AND) => Self::And,
            (rv32m::M_EXTENSION, rv32m::MUL) => Self::Mul,
            (rv32m::M_EXTENSION, rv32m::MULH) => Self::Mulh,
            (rv32m::M_EXTENSION, rv32m::MULHSU) => Self::Mulhsu,
            (rv32m::M_EXTENSION, rv32m::MULHU) => Self::Mulhu,
            (rv32m::M_EXTENSION, rv32m::DIV) => Self::Div,
            (rv32m::M_EXTENSION, rv32m::DIVU) => Self::Divu,
            (rv32m::M_EXTENSION, rv32m::REM) => Self::Rem,
            (rv32m::M_EXTENSION, rv32m::REMU) => Self::Remu,
            _ => return None,
        };
        Some(op)
    }

    /// Maps an `OP_IMM` instruction to its operation.
    ///
    /// Shifts take their kind from `funct7`; the other operations ignore it
    /// since those bits belong to the immediate.
    ///
    /// # Returns
    ///
    /// `None` for reserved shift encodings.
    pub fn from_imm(f3: u32, f7: u32) -> Option<Self> {
        let op = match f3 {
            funct3::ADD_SUB => Self::Add,
            funct3::SLT => Self::Slt,
            funct3::SLTU => Self::Sltu,
            funct3::XOR => Self::Xor,
            funct3::OR => Self::Or,
            funct3::AND => Self::And,
            funct3::SLL if f7 == funct7::DEFAULT => Self::Sll,
            funct3::SRL_SRA if f7 == funct7::DEFAULT => Self::Srl,
            funct3::SRL_SRA if f7 == funct7::SRA => Self::Sra,
            _ => return None,
        };
        Some(op)
    }

    /// Whether the operation belongs to the M extension.
    pub fn is_mul_div(self) -> bool {
        matches!(
            self,
            Self::Mul
                | Self::Mulh
                | Self::Mulhsu
                | Self::Mulhu
                | Self::Div
                | Self::Divu
                | Self::Rem
                | Self::Remu
        )
    }
}

/// Stateless 32-bit integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (its low five bits for shifts)
    ///
    /// # Examples
    ///
    /// ```
    /// use simx_core::core::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 0), u32::MAX);
    /// assert_eq!(Alu::execute(AluOp::Rem, i32::MIN as u32, -1_i32 as u32), 0);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        let (sa, sb) = (a as i32, b as i32);
        let shamt = b & 0x1F;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a << shamt,
            AluOp::Slt => u32::from(sa < sb),
            AluOp::Sltu => u32::from(a < b),
            AluOp::Xor => a ^ b,
            AluOp::Srl => a >> shamt,
            AluOp::Sra => (sa >> shamt) as u32,
            AluOp::Or => a | b,
            AluOp::And => a & b,
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Mulh => ((i64::from(sa) * i64::from(sb)) >> 32) as u32,
            AluOp::Mulhsu => ((i64::from(sa) * i64::from(b)) >> 32) as u32,
            AluOp::Mulhu => ((u64::from(a) * u64::from(b)) >> 32) as u32,
            AluOp::Div if b == 0 => u32::MAX,
            AluOp::Div => sa.wrapping_div(sb) as u32,
            AluOp::Divu if b == 0 => u32::MAX,
            AluOp::Divu => a / b,
            AluOp::Rem if b == 0 => a,
            AluOp::Rem => sa.wrapping_rem(sb) as u32,
            AluOp::Remu if b == 0 => a,
            AluOp::Remu => a % b,
        }
    }
}
