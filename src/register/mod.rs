//! The register file: the fixed set of 8-bit and 16-bit registers, each
//! carrying a declared access-capability pair enforced on every access.
//!
//! A capability violation is a bug in the engine itself, never a guest
//! program's fault — it is reported as a fatal panic, matching the source's
//! own `Logger.Panic` calls on the same condition.

mod flags;

pub use flags::Flags;

use std::fmt;

use crate::constants::INITIAL_SP;

/// Declared access capability for a single register or register view.
#[derive(Copy, Clone, Debug)]
pub struct Capability {
    pub can_read: bool,
    pub can_write: bool,
}

impl Capability {
    const RW: Capability = Capability { can_read: true, can_write: true };
    const READ_ONLY: Capability = Capability { can_read: true, can_write: false };
    const WRITE_ONLY: Capability = Capability { can_read: false, can_write: true };
}

/// Index into the 8-bit register table (`0..=9`). The identity of each
/// variant is part of the decoder ABI and must not be reordered; this is the
/// deduplicated table (an earlier revision of the register index table
/// repeated `M.Lo` at index 7, where `XY.Lo` belongs).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reg8Id {
    A,
    B,
    C,
    D,
    MHi,
    MLo,
    XYHi,
    XYLo,
    JHi,
    JLo,
}

impl Reg8Id {
    pub const TABLE: [Reg8Id; 10] = [
        Reg8Id::A,
        Reg8Id::B,
        Reg8Id::C,
        Reg8Id::D,
        Reg8Id::MHi,
        Reg8Id::MLo,
        Reg8Id::XYHi,
        Reg8Id::XYLo,
        Reg8Id::JHi,
        Reg8Id::JLo,
    ];

    pub fn from_index(index: u8) -> Option<Reg8Id> {
        Self::TABLE.get(index as usize).copied()
    }

    fn capability(self) -> Capability {
        match self {
            Reg8Id::A | Reg8Id::B | Reg8Id::C | Reg8Id::D => Capability::RW,
            Reg8Id::MHi | Reg8Id::MLo => Capability::RW,
            Reg8Id::XYHi | Reg8Id::XYLo => Capability::RW,
            Reg8Id::JHi | Reg8Id::JLo => Capability::WRITE_ONLY,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Reg8Id::A => "A",
            Reg8Id::B => "B",
            Reg8Id::C => "C",
            Reg8Id::D => "D",
            Reg8Id::MHi => "M.Hi",
            Reg8Id::MLo => "M.Lo",
            Reg8Id::XYHi => "XY.Hi",
            Reg8Id::XYLo => "XY.Lo",
            Reg8Id::JHi => "J.Hi",
            Reg8Id::JLo => "J.Lo",
        }
    }
}

impl fmt::Display for Reg8Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Index into the 16-bit register table (`0..=5`), final-revision layout
/// with SP included.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reg16Id {
    M,
    XY,
    J,
    Pc,
    Inc,
    Sp,
}

impl Reg16Id {
    pub const TABLE: [Reg16Id; 6] = [
        Reg16Id::M,
        Reg16Id::XY,
        Reg16Id::J,
        Reg16Id::Pc,
        Reg16Id::Inc,
        Reg16Id::Sp,
    ];

    pub fn from_index(index: u8) -> Option<Reg16Id> {
        Self::TABLE.get(index as usize).copied()
    }

    fn capability(self) -> Capability {
        match self {
            Reg16Id::M => Capability::READ_ONLY,
            Reg16Id::XY => Capability::RW,
            Reg16Id::J => Capability::READ_ONLY,
            Reg16Id::Pc => Capability::RW,
            Reg16Id::Inc => Capability::READ_ONLY,
            Reg16Id::Sp => Capability::RW,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Reg16Id::M => "M",
            Reg16Id::XY => "XY",
            Reg16Id::J => "J",
            Reg16Id::Pc => "PC",
            Reg16Id::Inc => "INC",
            Reg16Id::Sp => "SP",
        }
    }
}

impl fmt::Display for Reg16Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn capability_violation(register: &str, attempted: &str) -> ! {
    panic!("capability violation: attempted to {attempted} register {register} without the declared capability");
}

/// The full NANDPU register file. `M`, `XY`, and `J` are "split" 16-bit
/// registers: each is stored as a pair of bytes and exposed three ways (the
/// combined 16-bit value, and the independently-capability-checked high and
/// low halves) rather than as aliased shared storage, which gives the same
/// observable semantics without reaching for `Rc<RefCell<_>>` or `unsafe`.
pub struct RegisterFile {
    pub(crate) a: u8,
    pub(crate) b: u8,
    pub(crate) c: u8,
    pub(crate) d: u8,

    m_hi: u8,
    m_lo: u8,
    xy_hi: u8,
    xy_lo: u8,
    j_hi: u8,
    j_lo: u8,

    pub(crate) pc: u16,
    pub(crate) sp: u16,
    pub(crate) inst: u8,
    inc: u16,

    pub flags: Flags,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            m_hi: 0,
            m_lo: 0,
            xy_hi: 0,
            xy_lo: 0,
            j_hi: 0,
            j_lo: 0,
            pc: 0,
            sp: INITIAL_SP,
            inst: 0,
            inc: 0,
            flags: Flags::new(),
        }
    }

    pub fn get8(&self, id: Reg8Id) -> u8 {
        if !id.capability().can_read {
            capability_violation(id.name(), "read");
        }
        match id {
            Reg8Id::A => self.a,
            Reg8Id::B => self.b,
            Reg8Id::C => self.c,
            Reg8Id::D => self.d,
            Reg8Id::MHi => self.m_hi,
            Reg8Id::MLo => self.m_lo,
            Reg8Id::XYHi => self.xy_hi,
            Reg8Id::XYLo => self.xy_lo,
            Reg8Id::JHi => self.j_hi,
            Reg8Id::JLo => self.j_lo,
        }
    }

    pub fn set8(&mut self, id: Reg8Id, value: u8) {
        if !id.capability().can_write {
            capability_violation(id.name(), "write");
        }
        match id {
            Reg8Id::A => self.a = value,
            Reg8Id::B => self.b = value,
            Reg8Id::C => self.c = value,
            Reg8Id::D => self.d = value,
            Reg8Id::MHi => self.m_hi = value,
            Reg8Id::MLo => self.m_lo = value,
            Reg8Id::XYHi => self.xy_hi = value,
            Reg8Id::XYLo => self.xy_lo = value,
            Reg8Id::JHi => self.j_hi = value,
            Reg8Id::JLo => self.j_lo = value,
        }
    }

    pub fn get16(&self, id: Reg16Id) -> u16 {
        if !id.capability().can_read {
            capability_violation(id.name(), "read");
        }
        match id {
            Reg16Id::M => u16::from_be_bytes([self.m_hi, self.m_lo]),
            Reg16Id::XY => u16::from_be_bytes([self.xy_hi, self.xy_lo]),
            Reg16Id::J => u16::from_be_bytes([self.j_hi, self.j_lo]),
            Reg16Id::Pc => self.pc,
            Reg16Id::Inc => self.inc,
            Reg16Id::Sp => self.sp,
        }
    }

    pub fn set16(&mut self, id: Reg16Id, value: u16) {
        if !id.capability().can_write {
            capability_violation(id.name(), "write");
        }
        let bytes = value.to_be_bytes();
        match id {
            Reg16Id::M => {
                self.m_hi = bytes[0];
                self.m_lo = bytes[1];
            }
            Reg16Id::XY => {
                self.xy_hi = bytes[0];
                self.xy_lo = bytes[1];
            }
            Reg16Id::J => {
                self.j_hi = bytes[0];
                self.j_lo = bytes[1];
            }
            Reg16Id::Pc => self.pc = value,
            Reg16Id::Inc => self.inc = value,
            Reg16Id::Sp => self.sp = value,
        }
    }

    /// Writes INC directly, bypassing its read-only capability. Only the
    /// engine's internal increment/decrement helpers may call this.
    pub(crate) fn set_inc_raw(&mut self, value: u16) {
        self.inc = value;
    }

    pub fn inst(&self) -> u8 {
        self.inst
    }

    pub(crate) fn set_inst_raw(&mut self, value: u8) {
        self.inst = value;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:{:04X} A:{:02X} B:{:02X} C:{:02X} D:{:02X} M:{:04X} XY:{:04X} J:{:04X} SP:{:04X} INC:{:04X} Flags:[{}]",
            self.pc,
            self.a,
            self.b,
            self.c,
            self.d,
            u16::from_be_bytes([self.m_hi, self.m_lo]),
            u16::from_be_bytes([self.xy_hi, self.xy_lo]),
            u16::from_be_bytes([self.j_hi, self.j_lo]),
            self.sp,
            self.inc,
            self.flags,
        )
    }
}
