//! The execution engine: fetch-decode-execute-advance, one instruction per
//! `step()` call. This module owns the only mutating entry point into
//! processor state; everything else in the crate is read or constructed
//! through it.

mod alu;

use log::{debug, trace};

use crate::constants::*;
use crate::decoder::{opcode_name, BranchCondition};
use crate::memory::MemoryMap;
use crate::register::{Reg16Id, Reg8Id, RegisterFile};

/// Owns the register file and memory map and drives `step()`. Constructed
/// once per run; there is no in-place reset, matching the source's "reset is
/// destruction + reconstruction" model.
pub struct Engine {
    regs: RegisterFile,
    mem: MemoryMap,
}

impl Engine {
    /// Builds a fresh engine with ROM initialized from `rom_bytes` (truncated
    /// or zero-padded to the fixed ROM size), zeroed RAM, PC at `0x0000`, and
    /// SP at `0xFFFF`.
    pub fn new(rom_bytes: &[u8]) -> Self {
        Engine {
            regs: RegisterFile::new(),
            mem: MemoryMap::new(rom_bytes),
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn memory(&self) -> &MemoryMap {
        &self.mem
    }

    /// Executes one instruction. Returns `false` after HALT, `true` otherwise.
    pub fn step(&mut self) -> bool {
        let pc_at_fetch = self.regs.get16(Reg16Id::Pc);
        let opcode = self.mem.read(pc_at_fetch);
        self.regs.set_inst_raw(opcode);
        trace!(
            "fetch PC:{:#06X} opcode:{:#04X} ({})",
            pc_at_fetch,
            opcode,
            opcode_name(opcode)
        );

        let keep_running = match opcode {
            OP_NOP => {
                self.bump_pc();
                true
            }
            OP_CMP => {
                let b = self.regs.get8(Reg8Id::B);
                let c = self.regs.get8(Reg8Id::C);
                self.regs.flags.update(b, b, c);
                self.regs.flags.carry = b & 1 == 1;
                debug!("CMP B:{:#04X} C:{:#04X}", b, c);
                self.bump_pc();
                true
            }
            OP_ADD => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::add(b, c);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("ADD -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_SUB => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::sub(b, c);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("SUB -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_INC => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::inc(b);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("INC -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_DEC => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::dec(b);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("DEC -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_NAND => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::nand(b, c);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("NAND -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_SHR => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::shr(b, self.regs.flags.carry);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("SHR -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_SHL => {
                let dst = self.reg8_from_operand();
                let (b, c) = self.bc();
                let (result, carry) = alu::shl(b, self.regs.flags.carry);
                self.regs.set8(dst, result);
                self.update_flags(result, b, c, carry);
                debug!("SHL -> {dst} = {result:#04X}");
                self.bump_pc();
                true
            }
            OP_LDI => {
                let imm = self.fetch_operand();
                let dst = self.reg8_from_operand();
                self.regs.set8(dst, imm);
                debug!("LDI {imm:#04X} -> {dst}");
                self.bump_pc();
                true
            }
            OP_LDMI => {
                let lo = self.fetch_operand();
                let hi = self.fetch_operand();
                let dst = self.reg8_from_operand();
                self.write_m(hi, lo);
                let addr = self.regs.get16(Reg16Id::M);
                let value = self.mem.read(addr);
                self.regs.set8(dst, value);
                debug!("LDMI [{addr:#06X}] -> {dst} = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_LDM => {
                let dst = self.reg8_from_operand();
                let addr = self.regs.get16(Reg16Id::M);
                let value = self.mem.read(addr);
                self.regs.set8(dst, value);
                debug!("LDM [{addr:#06X}] -> {dst} = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_STOI => {
                let src = self.reg8_from_operand();
                let lo = self.fetch_operand();
                let hi = self.fetch_operand();
                self.write_m(hi, lo);
                let addr = self.regs.get16(Reg16Id::M);
                let value = self.regs.get8(src);
                self.mem.write(addr, value);
                debug!("STOI {src} -> [{addr:#06X}] = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_STO => {
                let src = self.reg8_from_operand();
                let addr = self.regs.get16(Reg16Id::M);
                let value = self.regs.get8(src);
                self.mem.write(addr, value);
                debug!("STO {src} -> [{addr:#06X}] = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_PUSH => {
                let src = self.reg8_from_operand();
                let value = self.regs.get8(src);
                self.push_byte(value);
                debug!("PUSH {src} = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_POP => {
                let dst = self.reg8_from_operand();
                let value = self.pop_byte();
                self.regs.set8(dst, value);
                debug!("POP -> {dst} = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_MOV8 => {
                let src = self.reg8_from_operand();
                let dst = self.reg8_from_operand();
                let value = self.regs.get8(src);
                self.regs.set8(dst, value);
                debug!("MOV8 {src} -> {dst} = {value:#04X}");
                self.bump_pc();
                true
            }
            OP_MOV16 => {
                let src = self.reg16_from_operand();
                let dst = self.reg16_from_operand();
                let value = self.regs.get16(src);
                self.regs.set16(dst, value);
                debug!("MOV16 {src} -> {dst} = {value:#06X}");
                self.bump_pc();
                true
            }
            OP_JMPI => {
                let lo = self.fetch_operand();
                let hi = self.fetch_operand();
                self.write_j(hi, lo);
                self.jump_to_j();
                debug!("JMPI -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            OP_CALI => {
                let return_pc = self.regs.get16(Reg16Id::Pc);
                let lo = self.fetch_operand();
                let hi = self.fetch_operand();
                self.push_return_address(return_pc);
                self.write_j(hi, lo);
                self.jump_to_j();
                debug!("CALI return:{return_pc:#06X} -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            OP_JMP => {
                self.jump_to_j();
                debug!("JMP -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            OP_CALL => {
                let return_pc = self.regs.get16(Reg16Id::Pc);
                self.regs.set16(Reg16Id::XY, return_pc);
                self.push_return_address(return_pc);
                self.jump_to_j();
                debug!("CALL return:{return_pc:#06X} -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            OP_RET => {
                let hi = self.pop_byte();
                let lo = self.pop_byte();
                self.write_j(hi, lo);
                self.jump_to_j();
                debug!("RET -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            OP_HALT => {
                self.bump_pc();
                debug!("HALT");
                false
            }
            op if (OP_BRANCH_IMM_BASE..=OP_BRANCH_IMM_BASE + 7).contains(&op) => {
                let cond = BranchCondition::from_opcode(op).expect("range guard matches from_opcode's immediate block");
                let lo = self.fetch_operand();
                let hi = self.fetch_operand();
                self.write_j(hi, lo);
                if self.condition_met(cond) {
                    self.jump_to_j();
                } else {
                    self.bump_pc();
                }
                debug!("B*I {cond:?} -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            op if (OP_BRANCH_REG_BASE..=OP_BRANCH_REG_BASE + 7).contains(&op) => {
                let cond = BranchCondition::from_opcode(op).expect("range guard matches from_opcode's register block");
                if self.condition_met(cond) {
                    self.jump_to_j();
                } else {
                    self.bump_pc();
                }
                debug!("B* {cond:?} -> PC:{:#06X}", self.regs.get16(Reg16Id::Pc));
                true
            }
            _ => {
                self.bump_pc();
                true
            }
        };

        debug!("{}", self.regs);
        keep_running
    }

    fn bc(&self) -> (u8, u8) {
        (self.regs.get8(Reg8Id::B), self.regs.get8(Reg8Id::C))
    }

    fn update_flags(&mut self, result: u8, b: u8, c: u8, carry: bool) {
        self.regs.flags.update(result, b, c);
        self.regs.flags.carry = carry;
    }

    /// Advances PC by one, routing the new value through the INC latch, and
    /// returns the new value.
    fn bump_pc(&mut self) -> u16 {
        let new_pc = self.regs.get16(Reg16Id::Pc).wrapping_add(1);
        self.regs.set_inc_raw(new_pc);
        self.regs.set16(Reg16Id::Pc, new_pc);
        new_pc
    }

    /// Consumes one operand byte: bumps PC, then reads the byte at the new PC.
    fn fetch_operand(&mut self) -> u8 {
        let addr = self.bump_pc();
        self.mem.read(addr)
    }

    /// A ROM that encodes an out-of-range register-index byte is malformed;
    /// this crashes rather than silently picking a different register.
    fn reg8_from_operand(&mut self) -> Reg8Id {
        let index = self.fetch_operand();
        Reg8Id::from_index(index).unwrap_or_else(|| panic!("invalid 8-bit register index {index} in ROM"))
    }

    fn reg16_from_operand(&mut self) -> Reg16Id {
        let index = self.fetch_operand();
        Reg16Id::from_index(index).unwrap_or_else(|| panic!("invalid 16-bit register index {index} in ROM"))
    }

    /// Writes M's halves directly; M's whole-register view is read-only so
    /// this is the only legal way for the engine to change it.
    fn write_m(&mut self, hi: u8, lo: u8) {
        self.regs.set8(Reg8Id::MHi, hi);
        self.regs.set8(Reg8Id::MLo, lo);
    }

    /// Writes J's halves directly; same reasoning as `write_m`.
    fn write_j(&mut self, hi: u8, lo: u8) {
        self.regs.set8(Reg8Id::JHi, hi);
        self.regs.set8(Reg8Id::JLo, lo);
    }

    fn jump_to_j(&mut self) {
        let target = self.regs.get16(Reg16Id::J);
        self.regs.set16(Reg16Id::Pc, target);
    }

    fn condition_met(&self, cond: BranchCondition) -> bool {
        match cond {
            BranchCondition::ZeroSet => self.regs.flags.zero,
            BranchCondition::ZeroClear => !self.regs.flags.zero,
            BranchCondition::CarrySet => self.regs.flags.carry,
            BranchCondition::CarryClear => !self.regs.flags.carry,
            BranchCondition::SignSet => self.regs.flags.sign,
            BranchCondition::SignClear => !self.regs.flags.sign,
            BranchCondition::LessThanSet => self.regs.flags.less_than,
            BranchCondition::LessThanClear => !self.regs.flags.less_than,
        }
    }

    fn push_byte(&mut self, value: u8) {
        let sp = self.regs.get16(Reg16Id::Sp);
        self.mem.write(sp, value);
        self.regs.set16(Reg16Id::Sp, sp.wrapping_sub(1));
    }

    fn pop_byte(&mut self) -> u8 {
        let sp = self.regs.get16(Reg16Id::Sp).wrapping_add(1);
        self.regs.set16(Reg16Id::Sp, sp);
        self.mem.read(sp)
    }

    /// Pushes a two-byte return address low-byte first, so the high byte
    /// ends up at the lower (more recently pushed) address.
    fn push_return_address(&mut self, address: u16) {
        let bytes = address.to_be_bytes();
        self.push_byte(bytes[1]);
        self.push_byte(bytes[0]);
    }
}
