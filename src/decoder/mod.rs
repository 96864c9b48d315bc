//! Decoder tables: opcode mnemonics and branch conditions.
//!
//! The mnemonic table below is trace-only — it never drives dispatch, which
//! lives in `engine::Engine::step` as a direct match on the opcode byte. The
//! register index tables live in the `register` module, next to the
//! registers they name, since `Reg8Id::from_index`/`Reg16Id::from_index`
//! *are* part of decode.

use crate::constants::*;

/// The eight branch conditions, in the order the low nibble of a branch
/// opcode selects them (0..7): Z set, Z clear, C set, C clear, S set, S
/// clear, LT set, LT clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BranchCondition {
    ZeroSet,
    ZeroClear,
    CarrySet,
    CarryClear,
    SignSet,
    SignClear,
    LessThanSet,
    LessThanClear,
}

impl BranchCondition {
    /// Decodes the low nibble of a branch-immediate (0x50-0x57) or
    /// branch-register (0x60-0x67) opcode. Returns `None` for any other
    /// opcode.
    pub fn from_opcode(opcode: u8) -> Option<BranchCondition> {
        let nibble = if (OP_BRANCH_IMM_BASE..=OP_BRANCH_IMM_BASE + 7).contains(&opcode) {
            opcode - OP_BRANCH_IMM_BASE
        } else if (OP_BRANCH_REG_BASE..=OP_BRANCH_REG_BASE + 7).contains(&opcode) {
            opcode - OP_BRANCH_REG_BASE
        } else {
            return None;
        };

        Some(match nibble {
            0 => BranchCondition::ZeroSet,
            1 => BranchCondition::ZeroClear,
            2 => BranchCondition::CarrySet,
            3 => BranchCondition::CarryClear,
            4 => BranchCondition::SignSet,
            5 => BranchCondition::SignClear,
            6 => BranchCondition::LessThanSet,
            7 => BranchCondition::LessThanClear,
            _ => unreachable!("nibble is masked to 0..=7 by the range checks above"),
        })
    }
}

/// Mnemonic for a given opcode byte, for trace output only. Anything not
/// named here (including gaps between the listed opcodes) is treated as a
/// NOP by the engine, so it is reported as `"NOP"` here too.
pub fn opcode_name(opcode: u8) -> &'static str {
    match opcode {
        OP_NOP => "NOP",
        OP_CMP => "CMP",
        OP_ADD => "ADD",
        OP_SUB => "SUB",
        OP_INC => "INC",
        OP_DEC => "DEC",
        OP_NAND => "NAND",
        OP_SHR => "SHR",
        OP_SHL => "SHL",
        OP_LDI => "LDI",
        OP_LDMI => "LDMI",
        OP_LDM => "LDM",
        OP_STOI => "STOI",
        OP_STO => "STO",
        OP_PUSH => "PUSH",
        OP_POP => "POP",
        OP_MOV8 => "MOV8",
        OP_MOV16 => "MOV16",
        OP_JMPI => "JMPI",
        OP_CALI => "CALI",
        OP_JMP => "JMP",
        OP_CALL => "CALL",
        OP_RET => "RET",
        OP_HALT => "HALT",
        0x50 => "BZSI",
        0x51 => "BZCI",
        0x52 => "BCSI",
        0x53 => "BCCI",
        0x54 => "BSSI",
        0x55 => "BSCI",
        0x56 => "BLSI",
        0x57 => "BLCI",
        0x60 => "BZS",
        0x61 => "BZC",
        0x62 => "BCS",
        0x63 => "BCC",
        0x64 => "BSS",
        0x65 => "BSC",
        0x66 => "BLS",
        0x67 => "BLC",
        _ => "NOP",
    }
}
