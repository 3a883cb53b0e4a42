use pretty_assertions::assert_eq;
use simx_core::isa::decode::decode;
use simx_core::isa::gpu;
use simx_core::isa::privileged::csr;
use simx_core::isa::rv32i::opcodes;

use crate::common::builder::instruction::inst;

#[test]
fn test_i_type_negative_immediate() {
    let d = decode(inst().addi(5, 6, -2048).build());
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 5);
    assert_eq!(d.rs1, 6);
    assert_eq!(d.imm, -2048);
}

#[test]
fn test_s_type_immediate() {
    let d = decode(inst().sw(2, 10, -4).build());
    assert_eq!(d.opcode, opcodes::OP_STORE);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.rs2, 10);
    assert_eq!(d.imm, -4);

    assert_eq!(decode(inst().sw(2, 10, 2047).build()).imm, 2047);
}

#[test]
fn test_b_type_immediate() {
    assert_eq!(decode(inst().beq(1, 2, -8).build()).imm, -8);
    assert_eq!(decode(inst().bne(1, 2, 4094).build()).imm, 4094);
    assert_eq!(decode(inst().blt(1, 2, -4096).build()).imm, -4096);
}

#[test]
fn test_u_and_j_type_immediates() {
    let d = decode(inst().lui(7, 0x8001_0000_u32 as i32).build());
    assert_eq!(d.opcode, opcodes::OP_LUI);
    assert_eq!(d.imm as u32, 0x8001_0000);

    assert_eq!(decode(inst().jal(1, 2048).build()).imm, 2048);
    assert_eq!(decode(inst().jal(0, -1_048_576).build()).imm, -1_048_576);
}

#[test]
fn test_csr_address_is_unsigned() {
    let d = decode(inst().csrr(11, csr::THREAD_ID).build());
    assert_eq!(d.csr(), csr::THREAD_ID);
    assert_eq!(d.rd, 11);
}

#[test]
fn test_shift_amount() {
    let d = decode(inst().srai(5, 5, 31).build());
    assert_eq!(d.shamt(), 31);
    assert_eq!(d.funct7, 0b0100000);
}

#[test]
fn test_gpu_fields() {
    let d = decode(inst().wspawn(5, 6).build());
    assert_eq!(d.opcode, gpu::OP_GPU);
    assert_eq!(d.funct3, gpu::WSPAWN);
    assert_eq!(d.rs1, 5);
    assert_eq!(d.rs2, 6);
    assert_eq!(d.imm, 0);
}
