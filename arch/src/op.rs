use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumCount,
    Display,
)]
#[repr(u8)]
pub enum Opcode {
    HALT = 0x0,
    ADD = 0x1,
    SUB = 0x2,
    AND = 0x3,
    OR = 0x4,
    XOR = 0x5,
    SLT = 0x6,
    ADDI = 0x7,
    SUBI = 0x8,
    LOAD = 0x9,
    LDR = 0xA,
    STR = 0xB,
    STORE = 0xC,
    JZ = 0xD,
    JR = 0xE,
    LI = 0xF,
}

impl Opcode {
    /// Mnemonic lookup, case-sensitive.
    pub fn parse(s: &str) -> Option<Opcode> {
        s.parse::<Opcode>().ok()
    }

    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn format(self) -> Format {
        Format::of(self.code())
    }

    /// LDR / STR address memory through `rt` and have no `rs` operand.
    pub fn omits_rs(self) -> bool {
        matches!(self, Opcode::LDR | Opcode::STR)
    }
}

// ----------------------------------------------------------------------------
// Encoding shape

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Format {
    Format1,
    Format2,
    FormatJump,
    Halt,
}

impl Format {
    pub fn of(opcode: u8) -> Format {
        match opcode {
            0x0 => Format::Halt,
            0x1..=0x6 | 0xA | 0xB => Format::Format1,
            0xE => Format::FormatJump,
            _ => Format::Format2,
        }
    }
}

#[test]
fn test() {
    assert_eq!(Opcode::COUNT, 16);
    for code in 0..Opcode::COUNT as u8 {
        let op = Opcode::try_from(code).unwrap();
        assert_eq!(op.code(), code);
        assert_eq!(Opcode::parse(&op.to_string()), Some(op));
    }
    assert_eq!(Opcode::parse("add"), None);
    assert_eq!(Opcode::parse("PUSH"), None);

    assert_eq!(Format::of(0x0), Format::Halt);
    assert_eq!(Format::of(0x6), Format::Format1);
    assert_eq!(Format::of(0x7), Format::Format2);
    assert_eq!(Format::of(0xA), Format::Format1);
    assert_eq!(Format::of(0xB), Format::Format1);
    assert_eq!(Format::of(0xD), Format::Format2);
    assert_eq!(Format::of(0xE), Format::FormatJump);
    assert_eq!(Format::of(0xF), Format::Format2);
    assert_eq!(Opcode::STR.format(), Format::Format1);
    assert!(Opcode::LDR.omits_rs());
    assert!(!Opcode::ADD.omits_rs());
}
