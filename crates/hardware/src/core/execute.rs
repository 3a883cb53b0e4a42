//! Warp instruction execution.
//!
//! Executes one decoded instruction across the active lanes of a warp. It handles:
//! 1. **Lane-parallel work:** ALU, loads, stores, CSR reads, and link-register writes
//!    run once per active lane against that lane's registers.
//! 2. **Warp-uniform control:** Branch and jump targets, the GPU control operands, and
//!    the ECALL exit code come from the lowest active lane. Lanes never diverge.
//! 3. **Machine control:** Termination, thread-mask changes, and warp spawns are
//!    reported to the core as an [`Effect`] rather than applied here.

use crate::common::data::AccessType;
use crate::common::error::MemoryError;
use crate::core::alu::{Alu, AluOp};
use crate::core::csr::CsrView;
use crate::core::warp::Warp;
use crate::isa::abi;
use crate::isa::gpu;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys;
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::soc::memory::check_range;
use crate::soc::traits::PhysicalMemory;
use crate::stats::InstClass;

const INST_SIZE: u32 = crate::common::constants::INSTRUCTION_SIZE;
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Machine-level side effect of an executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// None beyond register and memory updates.
    None,
    /// `ECALL`: the program terminated with this exit code.
    Exit(u32),
    /// `EBREAK`: the program halted without an exit code.
    Halt,
    /// `TMC`: the warp's new thread mask.
    ThreadMask(u32),
    /// `WSPAWN`: activate warps `1..count` at `pc`.
    Spawn {
        /// Number of warps the core should have running.
        count: u32,
        /// Entry point of the spawned warps.
        pc: u32,
    },
}

/// Result of executing one warp instruction.
#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    /// Program counter of the next instruction.
    pub next_pc: u32,
    /// Machine-level side effect.
    pub effect: Effect,
    /// Category for statistics.
    pub class: InstClass,
}

/// Reason an instruction could not complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Unsupported or reserved encoding.
    Illegal,
    /// Load or store outside physical memory.
    Memory(MemoryError),
}

impl From<MemoryError> for Fault {
    fn from(err: MemoryError) -> Self {
        Self::Memory(err)
    }
}

/// Executes `inst`, fetched at `pc`, on the active lanes of `warp`.
///
/// Register and memory updates are applied directly; the returned [`Outcome`]
/// carries the next program counter and any machine-level effect.
///
/// # Arguments
///
/// * `warp` - Issuing warp; must have at least one active lane
/// * `inst` - Decoded instruction
/// * `pc` - Address the instruction was fetched from
/// * `memory` - Physical memory for loads and stores
/// * `csrs` - CSR values visible to this instruction
///
/// # Errors
///
/// Returns [`Fault::Illegal`] for unsupported encodings and
/// [`Fault::Memory`] when any lane accesses memory out of range. Lanes
/// before the faulting one have already been updated.
pub fn execute(
    warp: &mut Warp,
    inst: &Decoded,
    pc: u32,
    memory: &mut dyn PhysicalMemory,
    csrs: &CsrView,
) -> Result<Outcome, Fault> {
    let leader = warp.leader().ok_or(Fault::Illegal)?;
    let fallthrough = pc.wrapping_add(INST_SIZE);
    let imm = inst.imm as u32;
    let lanes: Vec<usize> = warp.active_lanes().collect();

    let mut outcome = Outcome {
        next_pc: fallthrough,
        effect: Effect::None,
        class: InstClass::Alu,
    };

    match inst.opcode {
        opcodes::OP_LUI => {
            for &t in &lanes {
                warp.set_reg(t, inst.rd, imm);
            }
        }
        opcodes::OP_AUIPC => {
            for &t in &lanes {
                warp.set_reg(t, inst.rd, pc.wrapping_add(imm));
            }
        }
        opcodes::OP_IMM => {
            let op = AluOp::from_imm(inst.funct3, inst.funct7).ok_or(Fault::Illegal)?;
            for &t in &lanes {
                let val = Alu::execute(op, warp.reg(t, inst.rs1), imm);
                warp.set_reg(t, inst.rd, val);
            }
        }
        opcodes::OP_REG => {
            let op = AluOp::from_reg(inst.funct3, inst.funct7).ok_or(Fault::Illegal)?;
            if op.is_mul_div() {
                outcome.class = InstClass::MulDiv;
            }
            for &t in &lanes {
                let val = Alu::execute(op, warp.reg(t, inst.rs1), warp.reg(t, inst.rs2));
                warp.set_reg(t, inst.rd, val);
            }
        }
        opcodes::OP_LOAD => {
            outcome.class = InstClass::Load;
            let width = load_width(inst.funct3).ok_or(Fault::Illegal)?;
            for &t in &lanes {
                let addr = u64::from(warp.reg(t, inst.rs1).wrapping_add(imm));
                let val = load(memory, addr, inst.funct3, width)?;
                warp.set_reg(t, inst.rd, val);
            }
        }
        opcodes::OP_STORE => {
            outcome.class = InstClass::Store;
            let width = match inst.funct3 {
                funct3::SB => 1,
                funct3::SH => 2,
                funct3::SW => 4,
                _ => return Err(Fault::Illegal),
            };
            // Validate every lane first so a faulting store writes nothing.
            for &t in &lanes {
                let addr = u64::from(warp.reg(t, inst.rs1).wrapping_add(imm));
                check_range(AccessType::Write, addr, width as u64, memory.capacity())?;
            }
            for &t in &lanes {
                let addr = u64::from(warp.reg(t, inst.rs1).wrapping_add(imm));
                let bytes = warp.reg(t, inst.rs2).to_le_bytes();
                memory.write(addr, &bytes[..width])?;
            }
        }
        opcodes::OP_BRANCH => {
            outcome.class = InstClass::Branch;
            let a = warp.reg(leader, inst.rs1);
            let b = warp.reg(leader, inst.rs2);
            let taken = match inst.funct3 {
                funct3::BEQ => a == b,
                funct3::BNE => a != b,
                funct3::BLT => (a as i32) < (b as i32),
                funct3::BGE => (a as i32) >= (b as i32),
                funct3::BLTU => a < b,
                funct3::BGEU => a >= b,
                _ => return Err(Fault::Illegal),
            };
            if taken {
                outcome.next_pc = pc.wrapping_add(imm);
            }
        }
        opcodes::OP_JAL => {
            outcome.class = InstClass::Jump;
            outcome.next_pc = pc.wrapping_add(imm);
            for &t in &lanes {
                warp.set_reg(t, inst.rd, fallthrough);
            }
        }
        opcodes::OP_JALR => {
            if inst.funct3 != 0 {
                return Err(Fault::Illegal);
            }
            outcome.class = InstClass::Jump;
            // Target is read before rd is written; rd may equal rs1.
            outcome.next_pc = warp.reg(leader, inst.rs1).wrapping_add(imm) & JALR_ALIGNMENT_MASK;
            for &t in &lanes {
                warp.set_reg(t, inst.rd, fallthrough);
            }
        }
        opcodes::OP_MISC_MEM => match inst.funct3 {
            funct3::FENCE | funct3::FENCE_I => {}
            _ => return Err(Fault::Illegal),
        },
        sys::OP_SYSTEM => {
            outcome.class = InstClass::System;
            outcome.effect = execute_system(warp, inst, &lanes, leader, csrs)?;
        }
        gpu::OP_GPU => {
            outcome.class = InstClass::Gpu;
            outcome.effect = execute_gpu(warp, inst, leader)?;
        }
        _ => return Err(Fault::Illegal),
    }

    Ok(outcome)
}

fn load_width(f3: u32) -> Option<usize> {
    match f3 {
        funct3::LB | funct3::LBU => Some(1),
        funct3::LH | funct3::LHU => Some(2),
        funct3::LW => Some(4),
        _ => None,
    }
}

fn load(memory: &dyn PhysicalMemory, addr: u64, f3: u32, width: usize) -> Result<u32, MemoryError> {
    let mut bytes = [0u8; 4];
    memory.read(addr, &mut bytes[..width])?;
    let raw = u32::from_le_bytes(bytes);
    Ok(match f3 {
        funct3::LB => raw as u8 as i8 as i32 as u32,
        funct3::LH => raw as u16 as i16 as i32 as u32,
        _ => raw,
    })
}

fn execute_system(
    warp: &mut Warp,
    inst: &Decoded,
    lanes: &[usize],
    leader: usize,
    csrs: &CsrView,
) -> Result<Effect, Fault> {
    match inst.funct3 {
        sys::PRIV => match inst.raw {
            sys::ECALL => Ok(Effect::Exit(warp.reg(leader, abi::REG_A0))),
            sys::EBREAK => Ok(Effect::Halt),
            _ => Err(Fault::Illegal),
        },
        sys::CSRRW | sys::CSRRS | sys::CSRRC | sys::CSRRWI | sys::CSRRSI | sys::CSRRCI => {
            let addr = inst.csr();
            for &t in lanes {
                let val = csrs.read(addr, t).ok_or(Fault::Illegal)?;
                warp.set_reg(t, inst.rd, val);
            }
            Ok(Effect::None)
        }
        _ => Err(Fault::Illegal),
    }
}

fn execute_gpu(warp: &Warp, inst: &Decoded, leader: usize) -> Result<Effect, Fault> {
    if inst.funct7 != funct7::DEFAULT {
        return Err(Fault::Illegal);
    }
    let rs1 = warp.reg(leader, inst.rs1);
    match inst.funct3 {
        gpu::TMC => Ok(Effect::ThreadMask(rs1)),
        gpu::WSPAWN => Ok(Effect::Spawn {
            count: rs1,
            pc: warp.reg(leader, inst.rs2),
        }),
        gpu::BAR => Ok(Effect::None),
        _ => Err(Fault::Illegal),
    }
}
