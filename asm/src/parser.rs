use arch::{
    op::{Format, Opcode},
    psudo::Psudo,
    reg::Reg,
};

use crate::{
    error::Error,
    expand::expand,
    inst::{Body, Imm, ImmMode, Immediate, Inst, Word},
};

pub const COMMENT: char = '#';
pub const LABEL_END: char = ':';
pub const SEPARATOR: char = ',';
pub const DATA_DIRECTIVE: &str = "DW";

// ----------------------------------------------------------------------------
// Statement

/// Everything a single source line contributes to the session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub label: Option<String>,
    pub body: Vec<Body>,
    /// Tokens after the last operand, which carry no meaning
    pub ignored: Vec<String>,
}

impl Stmt {
    pub fn parse(code: &str) -> Result<Stmt, Error> {
        let mut stmt = Stmt::default();

        if code.trim_start().starts_with(COMMENT) {
            return Ok(stmt);
        }

        let words = tokenize(code);
        let mut words = words.as_slice();

        // main:
        if let Some((head, rest)) = words.split_first() {
            if let Some(label) = head.strip_suffix(LABEL_END) {
                if label.is_empty() {
                    return Err(Error::InvalidLabel);
                }
                stmt.label = Some(label.to_string());
                words = rest;
            }
        }

        let Some((head, rest)) = words.split_first() else {
            return Ok(stmt);
        };

        let mut args = Operands::new(rest);
        match Mnemonic::classify(head)? {
            Mnemonic::Op(op) => stmt.body.push(Body::Inst(parse_op(op, &mut args)?)),
            Mnemonic::Psudo(psudo) => {
                let reg = parse_reg(args.operand()?, false)?;
                stmt.body.extend(expand(psudo, reg).into_iter().map(Body::Inst));
            }
            Mnemonic::Data => {
                for token in args.by_ref() {
                    stmt.body.push(Body::Data(parse_word(token)?));
                }
            }
        }
        stmt.ignored = args.map(str::to_string).collect();

        Ok(stmt)
    }
}

/// Split on whitespace; a comma also ends a token and stays attached to it.
/// The character after a leading `'` is never a separator, so `',` stays whole.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = vec![];
    for word in line.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let skip = char_literal_head(rest);
            let end = rest[skip..]
                .find(SEPARATOR)
                .map_or(rest.len(), |pos| skip + pos + 1);
            let (token, tail) = rest.split_at(end);
            tokens.push(token);
            rest = tail;
        }
    }
    tokens
}

/// Byte length of `'c` at the start of `token`, or 0
fn char_literal_head(token: &str) -> usize {
    token
        .strip_prefix('\'')
        .and_then(|rest| rest.chars().next())
        .map_or(0, |c| 1 + c.len_utf8())
}

// ----------------------------------------------------------------------------
// Operands

pub struct Operands<'a> {
    iter: std::slice::Iter<'a, &'a str>,
}

impl<'a> Operands<'a> {
    pub fn new(words: &'a [&'a str]) -> Self {
        Operands { iter: words.iter() }
    }

    pub fn operand(&mut self) -> Result<&'a str, Error> {
        self.iter.next().copied().ok_or(Error::MissingOperand)
    }
}

impl<'a> Iterator for Operands<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.iter.next().copied()
    }
}

// ----------------------------------------------------------------------------
// Mnemonic

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Op(Opcode),
    Psudo(Psudo),
    Data,
}

impl Mnemonic {
    pub fn classify(token: &str) -> Result<Mnemonic, Error> {
        if let Some(op) = Opcode::parse(token) {
            return Ok(Mnemonic::Op(op));
        }
        if let Some(psudo) = Psudo::parse(token) {
            return Ok(Mnemonic::Psudo(psudo));
        }
        if token == DATA_DIRECTIVE {
            return Ok(Mnemonic::Data);
        }
        Err(Error::UnknownMnemonic(token.to_string()))
    }
}

fn parse_op(op: Opcode, args: &mut Operands) -> Result<Inst, Error> {
    match op.format() {
        Format::Halt => Ok(Inst::halt(op)),
        Format::Format1 => {
            let rd = parse_reg(args.operand()?, true)?;
            let rs = if op.omits_rs() {
                Reg::R0
            } else {
                parse_reg(args.operand()?, true)?
            };
            let rt = parse_reg(args.operand()?, false)?;
            Ok(Inst::format1(op, rd, rs, rt))
        }
        Format::Format2 => {
            let rd = parse_reg(args.operand()?, true)?;
            let imm = parse_imm(args)?;
            Ok(Inst::format2(op, rd, imm))
        }
        Format::FormatJump => {
            let rd = parse_reg(args.operand()?, false)?;
            Ok(Inst::jump(op, rd))
        }
    }
}

// ----------------------------------------------------------------------------
// Register

pub fn parse_reg(token: &str, comma: bool) -> Result<Reg, Error> {
    let name = if comma {
        token
            .strip_suffix(SEPARATOR)
            .ok_or_else(|| Error::ExpectedComma(token.to_string()))?
    } else {
        token
    };
    Reg::parse(name).ok_or_else(|| Error::ExpectedRegisterName(name.to_string()))
}

// ----------------------------------------------------------------------------
// Immediate

pub fn parse_imm(args: &mut Operands) -> Result<Immediate, Error> {
    let first = args.operand()?;
    let (mode, token) = match ImmMode::from_keyword(first) {
        Some(mode) => (mode, args.operand()?),
        None => (ImmMode::Direct, first),
    };
    let value = match parse_literal(token)? {
        Literal::Value(v) => Imm::Resolved(v),
        Literal::NotALiteral => Imm::Deferred(token.to_string()),
    };
    Ok(Immediate { mode, value })
}

/// A `DW` value. A trailing comma is accepted so lists may be written `DW 1, 2, 3`.
fn parse_word(token: &str) -> Result<Word, Error> {
    let token = match token.strip_suffix(SEPARATOR) {
        Some(value) if char_literal_head(token) < token.len() => value,
        _ => token,
    };
    match parse_literal(token)? {
        Literal::Value(v) => Ok(Word::Value(v)),
        Literal::NotALiteral => Ok(Word::Label(token.to_string())),
    }
}

// ----------------------------------------------------------------------------
// Literal

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Value(u16),
    /// The token should be read as a label instead
    NotALiteral,
}

pub fn parse_literal(token: &str) -> Result<Literal, Error> {
    let invalid = || Error::InvalidLiteral(token.to_string());
    let out_of_range = |_| Error::LiteralOutOfRange(token.to_string());

    // 0x1F
    if let Some(hex) = token.strip_prefix("0x") {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        return u16::from_str_radix(hex, 16)
            .map(Literal::Value)
            .map_err(out_of_range);
    }

    // 'A
    if let Some(rest) = token.strip_prefix('\'') {
        let c = rest.chars().next().ok_or_else(invalid)?;
        return u16::try_from(u32::from(c))
            .map(Literal::Value)
            .map_err(|_| Error::LiteralOutOfRange(token.to_string()));
    }

    // 42
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<u16>()
            .map(Literal::Value)
            .map_err(out_of_range);
    }

    Ok(Literal::NotALiteral)
}
