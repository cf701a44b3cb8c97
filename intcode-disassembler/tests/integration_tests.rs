//! Integration tests for the Intcode disassembler
//!
//! Listings are checked against the assembler: whatever the disassembler
//! prints must assemble back to the same words.

use intcode_assembler::{assemble, load};
use intcode_disassembler::{decode, disassemble, format, listing, DisassemblerError};
use intcode_spec::{Instruction, Opcode, Param, Program};

// ============================================================================
// Round Trip Through the Assembler
// ============================================================================

fn assert_round_trip(program: &Program) {
    let asm = disassemble(program);
    let reassembled = assemble(&asm).unwrap_or_else(|e| panic!("{}\n{}", e, asm));
    assert_eq!(&reassembled, program, "listing:\n{}", asm);
}

#[test]
fn test_round_trip_quine() {
    let program =
        load("109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99").unwrap();
    assert_round_trip(&program);
}

#[test]
fn test_round_trip_with_data() {
    // Compare-to-8 example: trailing data words after the code
    let program = load("3,9,8,9,10,9,4,9,99,-1,8").unwrap();
    assert_round_trip(&program);
}

#[test]
fn test_round_trip_non_canonical_words() {
    // 10004 and 1199 execute fine but are not what the assembler emits
    let program = Program::new(vec![10004, 0, 1199, 7, -5]);
    assert_round_trip(&program);
    let lines = listing(program.words());
    assert!(lines.iter().all(|l| l.instruction.is_none()));
}

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_every_opcode() {
    for opcode in Opcode::ALL {
        let mut words = vec![opcode.to_u8() as i64];
        words.extend(std::iter::repeat(0).take(opcode.param_count()));
        let instr = decode(&words).unwrap();
        assert_eq!(instr.opcode(), opcode);
        assert_eq!(instr.width(), words.len());
    }
}

#[test]
fn test_decode_error_display() {
    let err = decode(&[1104, 0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Non-canonical instruction word 1104 (canonical form is 104)"
    );
    assert!(matches!(decode(&[0]).unwrap_err(), DisassemblerError::Decode(_)));
}

// ============================================================================
// Formatting Tests
// ============================================================================

#[test]
fn test_format_matches_assembler_syntax() {
    let instr = Instruction::LessThan {
        a: Param::relative(-2),
        b: Param::immediate(8),
        dest: Param::position(100),
    };
    let text = format(&instr);
    assert_eq!(text, "lt [rb-2], 8, [100]");
    assert_eq!(assemble(&text).unwrap().words(), &[1207, -2, 8, 100]);
}

#[test]
fn test_listing_of_day_two_sample() {
    let program = load("1,9,10,3,2,3,11,0,99,30,40,50").unwrap();
    let texts: Vec<String> = listing(program.words()).iter().map(|l| l.text()).collect();
    assert_eq!(
        texts,
        vec![
            "add [9], [10], [3]",
            "mul [3], [11], [0]",
            "hlt",
            ".word 30",
            ".word 40",
            ".word 50",
        ]
    );
}
