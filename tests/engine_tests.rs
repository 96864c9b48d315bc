use nandpu_rs::constants::*;
use nandpu_rs::register::{Reg16Id, Reg8Id};
use nandpu_rs::Engine;

fn bootstrap(rom: &[u8]) -> Engine {
    Engine::new(rom)
}

fn run_to_halt(engine: &mut Engine, step_cap: u32) {
    for _ in 0..step_cap {
        if !engine.step() {
            return;
        }
    }
    panic!("program did not halt within {step_cap} steps");
}

#[test]
fn s1_nop_then_halt() {
    let mut engine = bootstrap(&[OP_NOP, OP_HALT]);
    run_to_halt(&mut engine, 4);
    let regs = engine.registers();
    assert_eq!(regs.get16(Reg16Id::Pc), 0x0002);
    assert_eq!(regs.get8(Reg8Id::A), 0);
    assert!(!regs.flags.zero && !regs.flags.carry && !regs.flags.sign);
}

#[test]
fn rom_is_immutable_across_any_number_of_steps() {
    let rom: Vec<u8> = vec![OP_NOP; 20].into_iter().chain([OP_HALT]).collect();
    let mut engine = bootstrap(&rom);
    for (i, &byte) in rom.iter().enumerate() {
        assert_eq!(engine.memory().read(i as u16), byte);
    }
    run_to_halt(&mut engine, 64);
    for (i, &byte) in rom.iter().enumerate() {
        assert_eq!(engine.memory().read(i as u16), byte);
    }
}

#[test]
fn ldi_sto_ldm_round_trip_through_a_constructed_address() {
    // Build M = 0x8000 via its halves (MOV8 into M.Hi/M.Lo), then STO A
    // there and LDM it back into B.
    let rom = [
        OP_LDI, 0x42, 0, // A := 0x42
        OP_LDI, 0x80, 4, // M.Hi := 0x80   (reg index 4 = M.Hi)
        OP_LDI, 0x00, 5, // M.Lo := 0x00   (reg index 5 = M.Lo)
        OP_STO, 0, // mem[M] := A
        OP_LDM, 1, // B := mem[M]
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 16);
    assert_eq!(engine.memory().read(0x8000), 0x42);
    assert_eq!(engine.registers().get8(Reg8Id::B), 0x42);
}

#[test]
fn branch_immediate_taken_when_zero_flag_set() {
    // CMP with B=C=0 sets Zero, then BZSI jumps to the HALT at 0x0006.
    let rom = [
        OP_CMP, // sets Zero = true (B=C=0)
        0x50, 0x06, 0x00, // BZSI -> 0x0006
        OP_LDI, 0xAA, 0, // skipped: A would become 0xAA
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    // Landing address 0x0006 is LDI's trailing operand byte, which happens
    // to equal OP_NOP, so one more step reaches the HALT at 0x0007.
    assert_eq!(engine.registers().get16(Reg16Id::Pc), 0x0008);
    assert_eq!(engine.registers().get8(Reg8Id::A), 0);
}

#[test]
fn branch_immediate_falls_through_when_condition_is_not_met() {
    // B starts at 0, so INC B makes B=1, CMP makes Zero=false, BZSI not taken.
    let rom = [
        OP_INC, 1, // B := 1
        OP_CMP, // Zero = false
        0x50, 0x07, 0x00, // BZSI -> 0x0007, not taken
        OP_LDI, 0xAA, 0, // A := 0xAA (falls through into this)
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    assert_eq!(engine.registers().get8(Reg8Id::A), 0xAA);
}

#[test]
fn less_than_flag_tracks_current_b_and_c_after_any_op() {
    let rom = [
        OP_LDI, 2, 1, // B := 2
        OP_LDI, 3, 2, // C := 3
        OP_CMP, // any flag update recomputes LessThan from current B, C
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    assert!(engine.registers().flags.less_than);
}

#[test]
fn add_carry_iff_sum_overflows_a_byte() {
    let rom = [
        OP_LDI, 0xFF, 1, // B := 0xFF
        OP_LDI, 0x01, 2, // C := 0x01
        OP_ADD, 0, // A := B+C, Carry := true
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    assert_eq!(engine.registers().get8(Reg8Id::A), 0x00);
    assert!(engine.registers().flags.carry);
    assert!(engine.registers().flags.zero);
}

#[test]
fn sub_carry_iff_c_exceeds_b() {
    let rom = [
        OP_LDI, 0x01, 1, // B := 1
        OP_LDI, 0x02, 2, // C := 2
        OP_SUB, 0, // A := B-C, Carry := true since C > B
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    assert!(engine.registers().flags.carry);
}

#[test]
fn call_pushes_its_own_address_and_ret_restores_it() {
    // J.Hi/J.Lo are write-only registers (indices 8, 9), set directly via
    // MOV-style LDI without disturbing PC, so CALL's target (0x0008, a bare
    // RET) is independent from the CALL site itself (0x0006).
    let rom = [
        OP_LDI, 0x00, 8, // J.Hi := 0x00
        OP_LDI, 0x08, 9, // J.Lo := 0x08
        OP_CALL, // 0x0006: P = 0x0006
        OP_HALT, // 0x0007: never reached
        OP_RET, // 0x0008: T
    ];
    let mut engine = bootstrap(&rom);
    engine.step(); // LDI J.Hi
    engine.step(); // LDI J.Lo
    engine.step(); // CALL
    assert_eq!(engine.registers().get16(Reg16Id::Pc), 0x0008);
    assert_eq!(engine.registers().get16(Reg16Id::Sp), 0xFFFD);

    engine.step(); // RET
    assert_eq!(engine.registers().get16(Reg16Id::Pc), 0x0006);
    assert_eq!(engine.registers().get16(Reg16Id::J), 0x0006);
    assert_eq!(engine.registers().get16(Reg16Id::Sp), 0xFFFF);
}

#[test]
fn push_then_pop_round_trips_and_restores_sp() {
    let rom = [
        OP_LDI, 0x99, 0, // A := 0x99
        OP_PUSH, 0, // push A
        OP_POP, 1, // pop into B
        OP_HALT,
    ];
    let mut engine = bootstrap(&rom);
    run_to_halt(&mut engine, 8);
    assert_eq!(engine.registers().get8(Reg8Id::B), 0x99);
    assert_eq!(engine.registers().get16(Reg16Id::Sp), 0xFFFF);
}

#[test]
fn unknown_opcode_behaves_as_a_single_byte_nop() {
    let rom = [0x05, OP_HALT];
    let mut engine = bootstrap(&rom);
    assert!(engine.step());
    assert_eq!(engine.registers().get16(Reg16Id::Pc), 0x0001);
    assert!(!engine.step());
}
