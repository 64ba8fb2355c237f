use arch::{
    op::{Format, Opcode},
    reg::Reg,
};
use color_print::cformat;
use std::fmt;

use crate::error::Loc;

// ----------------------------------------------------------------------------
// Immediate

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmMode {
    Direct,
    Offset,
    Segment,
}

impl ImmMode {
    /// Qualifier keyword preceding the value, if any.
    pub fn from_keyword(s: &str) -> Option<ImmMode> {
        match s {
            "OFFSET" => Some(ImmMode::Offset),
            "SEGMENT" => Some(ImmMode::Segment),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            ImmMode::Direct => "",
            ImmMode::Offset => "OFFSET ",
            ImmMode::Segment => "SEGMENT ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Resolved(u16),
    /// Label name, filled in by `Session::resolve`
    Deferred(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Immediate {
    pub mode: ImmMode,
    pub value: Imm,
}

impl Immediate {
    pub fn direct(value: u16) -> Self {
        Immediate {
            mode: ImmMode::Direct,
            value: Imm::Resolved(value),
        }
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Imm::Resolved(v) => write!(f, "{}0x{:04X}", self.mode.keyword(), v),
            Imm::Deferred(label) => write!(f, "{}{}", self.mode.keyword(), label),
        }
    }
}

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inst {
    pub opcode: Opcode,
    pub format: Format,
    pub rd: Option<Reg>,
    pub rs: Option<Reg>,
    pub rt: Option<Reg>,
    pub imm: Option<Immediate>,
}

impl Inst {
    pub fn halt(opcode: Opcode) -> Self {
        Inst {
            opcode,
            format: Format::Halt,
            rd: None,
            rs: None,
            rt: None,
            imm: None,
        }
    }

    pub fn format1(opcode: Opcode, rd: Reg, rs: Reg, rt: Reg) -> Self {
        Inst {
            opcode,
            format: Format::Format1,
            rd: Some(rd),
            rs: Some(rs),
            rt: Some(rt),
            imm: None,
        }
    }

    pub fn format2(opcode: Opcode, rd: Reg, imm: Immediate) -> Self {
        Inst {
            opcode,
            format: Format::Format2,
            rd: Some(rd),
            rs: None,
            rt: None,
            imm: Some(imm),
        }
    }

    pub fn jump(opcode: Opcode, rd: Reg) -> Self {
        Inst {
            opcode,
            format: Format::FormatJump,
            rd: Some(rd),
            rs: None,
            rt: None,
            imm: None,
        }
    }

    /// True unless the immediate still names an unresolved label.
    pub fn is_resolved(&self) -> bool {
        !matches!(
            self.imm,
            Some(Immediate {
                value: Imm::Deferred(_),
                ..
            })
        )
    }

    pub fn deferred_label(&self) -> Option<&str> {
        match &self.imm {
            Some(Immediate {
                value: Imm::Deferred(label),
                ..
            }) => Some(label),
            _ => None,
        }
    }

    pub fn cformat(&self) -> String {
        let reg = |r: &Option<Reg>| r.map(|r| r.to_string()).unwrap_or_default();
        let imm = match &self.imm {
            Some(imm @ Immediate {
                value: Imm::Resolved(_),
                ..
            }) => cformat!("<yellow>{}</>", imm),
            Some(imm) => cformat!("<underline>{}</>", imm),
            None => String::new(),
        };
        let args = match self.format {
            Format::Halt => String::new(),
            Format::Format1 if self.opcode.omits_rs() => {
                format!("{}, {}", reg(&self.rd), reg(&self.rt))
            }
            Format::Format1 => format!(
                "{}, {}, {}",
                reg(&self.rd),
                reg(&self.rs),
                reg(&self.rt)
            ),
            Format::Format2 => format!("{}, {}", reg(&self.rd), imm),
            Format::FormatJump => reg(&self.rd),
        };
        cformat!("<red>{:<6}</><blue>{}</>", self.opcode.to_string(), args)
    }
}

// ----------------------------------------------------------------------------
// Program image

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    Value(u16),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Inst(Inst),
    Data(Word),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Instruction,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub addr: u16,
    pub loc: Loc,
    pub body: Body,
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self.body {
            Body::Inst(_) => CellKind::Instruction,
            Body::Data(_) => CellKind::Data,
        }
    }

    pub fn inst(&self) -> Option<&Inst> {
        match &self.body {
            Body::Inst(inst) => Some(inst),
            Body::Data(_) => None,
        }
    }

    pub fn data(&self) -> Option<&Word> {
        match &self.body {
            Body::Data(word) => Some(word),
            Body::Inst(_) => None,
        }
    }
}
