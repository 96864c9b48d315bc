//! Address map and opcode byte constants for the NANDPU memory and decoder.

/// 32 KiB ROM, mapped at the bottom of the address space.
pub const ADDR_ROM_START: u16 = 0x0000;
pub const ADDR_ROM_END: u16 = 0x7FFF;

/// 32 KiB RAM, mapped at the top of the address space. The stack lives at the
/// top of this region and grows downward from `0xFFFF`.
pub const ADDR_RAM_START: u16 = 0x8000;
pub const ADDR_RAM_END: u16 = 0xFFFF;

pub const ROM_SIZE: usize = 0x8000;
pub const RAM_SIZE: usize = 0x8000;

/// Value returned for reads that fall outside every mapped region.
pub const UNMAPPED_READ_VALUE: u8 = 0xFF;

pub const INITIAL_SP: u16 = 0xFFFF;

// Opcode bytes, kept here as named constants rather than embedded in the
// decoder match so the encoding is grep-able in one place.
pub const OP_NOP: u8 = 0x00;

pub const OP_CMP: u8 = 0x10;
pub const OP_ADD: u8 = 0x11;
pub const OP_SUB: u8 = 0x12;
pub const OP_INC: u8 = 0x13;
pub const OP_DEC: u8 = 0x14;
pub const OP_NAND: u8 = 0x15;
pub const OP_SHR: u8 = 0x16;
pub const OP_SHL: u8 = 0x17;

pub const OP_LDI: u8 = 0x20;
pub const OP_LDMI: u8 = 0x21;
pub const OP_LDM: u8 = 0x22;
pub const OP_STOI: u8 = 0x23;
pub const OP_STO: u8 = 0x24;
pub const OP_PUSH: u8 = 0x25;
pub const OP_POP: u8 = 0x26;

pub const OP_MOV8: u8 = 0x30;
pub const OP_MOV16: u8 = 0x31;

pub const OP_JMPI: u8 = 0x40;
pub const OP_CALI: u8 = 0x41;
pub const OP_JMP: u8 = 0x42;
pub const OP_CALL: u8 = 0x43;
pub const OP_RET: u8 = 0x44;

/// Branch-immediate block: 0x50..=0x57, low nibble selects the condition.
pub const OP_BRANCH_IMM_BASE: u8 = 0x50;
/// Branch-register block: 0x60..=0x67, low nibble selects the condition.
pub const OP_BRANCH_REG_BASE: u8 = 0x60;

/// HALT is fixed at 0xFF; the original source's opcode constants never
/// assign a byte to it, so this picks the unused top byte.
pub const OP_HALT: u8 = 0xFF;
