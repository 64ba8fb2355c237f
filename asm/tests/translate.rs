use arch::{
    op::{Format, Opcode},
    reg::Reg,
};
use r16asm::{
    inst::{Body, CellKind, Imm, ImmMode, Immediate, Inst, Word},
    Diag, Error, Session,
};

fn assemble(code: &str) -> Session {
    let mut session = Session::new();
    for (idx, line) in code.lines().enumerate() {
        println!("{:>2}: {}", idx + 1, line);
    }
    session.translate("test.s", code).unwrap();
    session
}

fn fail(code: &str) -> Diag {
    let mut session = Session::new();
    let diag = session.translate("test.s", code).unwrap_err();
    println!("{}", diag);
    diag
}

fn inst(session: &Session, addr: u16) -> &Inst {
    session.cell(addr).and_then(|cell| cell.inst()).unwrap()
}

macro_rules! fails {
    ($name:ident, $code:expr, $line:expr, $err:pat) => {
        #[test]
        fn $name() {
            let diag = fail($code);
            assert_eq!(diag.loc.line, $line);
            assert!(matches!(diag.error, $err), "{:?}", diag.error);
        }
    };
}

#[test]
fn format1() {
    let session = assemble("ADD R1, R2, R3");
    assert_eq!(session.pc(), 1);
    let add = inst(&session, 0);
    assert_eq!(add.opcode, Opcode::ADD);
    assert_eq!(add.format, Format::Format1);
    assert_eq!((add.rd, add.rs, add.rt), (Some(Reg::R1), Some(Reg::R2), Some(Reg::R3)));
    assert_eq!(add.imm, None);
}

#[test]
fn format1_without_rs() {
    let session = assemble("LDR R1, R13\nSTR R2,R13");
    assert_eq!(
        inst(&session, 0),
        &Inst::format1(Opcode::LDR, Reg::R1, Reg::R0, Reg::R13)
    );
    assert_eq!(
        inst(&session, 1),
        &Inst::format1(Opcode::STR, Reg::R2, Reg::R0, Reg::R13)
    );
}

#[test]
fn format2_deferred() {
    let session = assemble("LOAD R4,未definedLabel");
    let load = inst(&session, 0);
    assert_eq!(load.format, Format::Format2);
    assert_eq!(load.rd, Some(Reg::R4));
    assert!(!load.is_resolved());
    assert_eq!(load.deferred_label(), Some("未definedLabel"));
    assert_eq!(load.imm.as_ref().map(|imm| imm.mode), Some(ImmMode::Direct));
}

#[test]
fn addressing_modes() {
    let session = assemble(
        "LOAD R4, OFFSET someLabel\n\
         LOAD R4, 0x10\n\
         LI R1, SEGMENT 'A",
    );
    assert_eq!(
        inst(&session, 0).imm,
        Some(Immediate {
            mode: ImmMode::Offset,
            value: Imm::Deferred("someLabel".to_string()),
        })
    );
    assert_eq!(inst(&session, 1).imm, Some(Immediate::direct(16)));
    assert!(inst(&session, 1).is_resolved());
    assert_eq!(
        inst(&session, 2).imm,
        Some(Immediate {
            mode: ImmMode::Segment,
            value: Imm::Resolved(65),
        })
    );
}

#[test]
fn jump_and_halt() {
    let session = assemble("JR R7\nHALT");
    assert_eq!(inst(&session, 0), &Inst::jump(Opcode::JR, Reg::R7));
    assert_eq!(inst(&session, 1).format, Format::Halt);
    assert_eq!(inst(&session, 1).rd, None);
}

#[test]
fn push_pop() {
    let session = assemble("PUSH R5\nPOP R5");
    assert_eq!(session.pc(), 4);

    let dec = inst(&session, 0);
    assert_eq!((dec.opcode, dec.rd), (Opcode::SUBI, Some(Reg::R13)));
    assert_eq!(dec.imm, Some(Immediate::direct(1)));
    assert_eq!(
        inst(&session, 1),
        &Inst::format1(Opcode::STR, Reg::R5, Reg::R0, Reg::R13)
    );

    assert_eq!(
        inst(&session, 2),
        &Inst::format1(Opcode::LDR, Reg::R5, Reg::R0, Reg::R13)
    );
    let inc = inst(&session, 3);
    assert_eq!((inc.opcode, inc.rd), (Opcode::ADDI, Some(Reg::R13)));
    assert_eq!(inc.imm, Some(Immediate::direct(1)));

    // Every expanded cell points back at its macro line
    let lines: Vec<usize> = session.image().iter().map(|c| c.loc.line).collect();
    assert_eq!(lines, vec![1, 1, 2, 2]);
}

#[test]
fn inc_dec() {
    let session = assemble("INC R3\nDEC R3");
    assert_eq!(inst(&session, 0).opcode, Opcode::ADDI);
    assert_eq!(inst(&session, 1).opcode, Opcode::SUBI);
    assert_eq!(session.pc(), 2);
}

#[test]
fn data() {
    let session = assemble("DW 1 0x20 'c\nDW 4, 5, table");
    let words: Vec<&Word> = session.image().iter().filter_map(|c| c.data()).collect();
    assert_eq!(
        words,
        vec![
            &Word::Value(1),
            &Word::Value(0x20),
            &Word::Value(99),
            &Word::Value(4),
            &Word::Value(5),
            &Word::Label("table".to_string()),
        ]
    );
    assert!(session
        .image()
        .iter()
        .all(|cell| cell.kind() == CellKind::Data));
}

#[test]
fn comma_literal() {
    let session = assemble("DW ',\nDW ',', 'a\nDW ',, 7");
    let words: Vec<&Word> = session.image().iter().filter_map(|c| c.data()).collect();
    assert_eq!(
        words,
        vec![
            &Word::Value(44),
            &Word::Value(44),
            &Word::Value(97),
            &Word::Value(44),
            &Word::Value(7),
        ]
    );

    let session = assemble("LI R1, ',\nLI R2,','");
    assert_eq!(inst(&session, 0).imm, Some(Immediate::direct(44)));
    assert_eq!(inst(&session, 1).imm, Some(Immediate::direct(44)));
}

#[test]
fn dense_addresses() {
    let mut session = Session::with_origin(0x100);
    session
        .translate(
            "test.s",
            "DW 1 2 3\n\
             start: PUSH R1\n\
             POP R2\n\
             # comment\n\
             \n\
             INC R3\n\
             HALT",
        )
        .unwrap();
    assert_eq!(session.pc(), 0x109);
    for (idx, cell) in session.image().iter().enumerate() {
        assert_eq!(cell.addr, 0x100 + idx as u16);
    }
    assert_eq!(session.labels().get_val("start"), Some(0x103));
    assert!(session.cell(0xFF).is_none());
    assert!(matches!(
        session.cell(0x108).map(|c| &c.body),
        Some(Body::Inst(Inst { opcode: Opcode::HALT, .. }))
    ));
}

#[test]
fn labels() {
    let session = assemble(
        "start: ADD R1, R2, R3\n\
         loop:\n\
         \tJR R1\n\
         end: HALT",
    );
    let labels: Vec<(&str, u16)> = session
        .labels()
        .iter()
        .map(|(name, label)| (name, label.addr))
        .collect();
    assert_eq!(labels, vec![("start", 0), ("loop", 1), ("end", 2)]);
    assert_eq!(session.labels().get("loop").map(|l| l.loc.line), Some(2));
}

#[test]
fn no_op_lines() {
    let session = assemble("# comment ADD R1, R2, R3\n\n   \t\n   # indented: DW 1\n");
    assert_eq!(session.pc(), 0);
    assert!(session.image().is_empty());
    assert!(session.labels().is_empty());
}

#[test]
fn trailing_tokens_are_ignored() {
    let session = assemble("HALT now\nJR R1 R2");
    assert_eq!(session.pc(), 2);
}

#[test]
fn unknown_mnemonic_appends_nothing() {
    let mut session = Session::new();
    session.translate_line("ADD R1, R2, R3", 1, "test.s").unwrap();
    let diag = session.translate_line("x: MOV R1, R2", 2, "test.s").unwrap_err();
    assert!(matches!(diag.error, Error::UnknownMnemonic(ref m) if m == "MOV"));
    assert_eq!(
        diag.to_string(),
        "In file test.s, at line 2: unknown instruction \"MOV\""
    );
    assert_eq!(session.pc(), 1);
    assert_eq!(session.image().len(), 1);
    assert!(session.labels().get("x").is_none());
}

#[test]
fn address_overflow() {
    let mut session = Session::with_origin(0xFFFE);
    session.translate_line("HALT", 1, "test.s").unwrap();
    let diag = session.translate_line("PUSH R1", 2, "test.s").unwrap_err();
    assert!(matches!(diag.error, Error::AddressOverflow));
    session.translate_line("HALT", 3, "test.s").unwrap();
    assert_eq!(session.image().last().map(|c| c.addr), Some(0xFFFF));
    let diag = session.translate_line("end:", 4, "test.s").unwrap_err();
    assert!(matches!(diag.error, Error::AddressOverflow));
}

#[test]
fn diagnostic_format() {
    let diag = fail("HALT\nADD R1, R2 R3");
    assert_eq!(
        diag.to_string(),
        "In file test.s, at line 2: expected comma after register name \"R2\""
    );
    assert_eq!(diag.raw.as_deref(), Some("ADD R1, R2 R3"));
}

#[test]
fn invalid_register_reference() {
    let err: Error = Reg::try_from(16u8).unwrap_err().into();
    assert!(matches!(err, Error::InvalidRegisterReference(16)));
    assert_eq!(err.to_string(), "invalid register R16");
}

fails!(unknown_mnemonic, "HALT\nhalt", 2, Error::UnknownMnemonic(_));
fails!(expected_comma, "ADD R1 R2, R3", 1, Error::ExpectedComma(_));
fails!(expected_register, "ADD R1, X2, R3", 1, Error::ExpectedRegisterName(_));
fails!(lowercase_register, "JR r1", 1, Error::ExpectedRegisterName(_));
fails!(comma_on_last_register, "JR R1,", 1, Error::ExpectedRegisterName(_));
fails!(missing_register, "ADD R1, R2,", 1, Error::MissingOperand);
fails!(missing_immediate, "LOAD R1,", 1, Error::MissingOperand);
fails!(missing_offset_target, "LOAD R1, OFFSET", 1, Error::MissingOperand);
fails!(missing_macro_operand, "PUSH", 1, Error::MissingOperand);
fails!(macro_operand_comma, "POP R1,", 1, Error::ExpectedRegisterName(_));
fails!(bad_hex, "LI R1, 0xG", 1, Error::InvalidLiteral(_));
fails!(wide_literal, "DW 1 70000", 1, Error::LiteralOutOfRange(_));
fails!(empty_label, ": HALT", 1, Error::InvalidLabel);
fails!(redefined_label, "a: HALT\n\na: HALT", 3, Error::RedefinedLabel(_));
