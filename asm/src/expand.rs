use arch::{op::Opcode, psudo::Psudo, reg::Reg};

use crate::inst::{Immediate, Inst};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Inc,
    Dec,
}

/// `ADDI rd, 1` or `SUBI rd, 1`
pub fn step(dir: Step, rd: Reg) -> Inst {
    let op = match dir {
        Step::Inc => Opcode::ADDI,
        Step::Dec => Opcode::SUBI,
    };
    Inst::format2(op, rd, Immediate::direct(1))
}

/// Expand a pseudo instruction. The stack grows downward through `Reg::SP`:
/// PUSH pre-decrements, POP post-increments.
pub fn expand(psudo: Psudo, reg: Reg) -> Vec<Inst> {
    let insts = match psudo {
        Psudo::INC => vec![step(Step::Inc, reg)],
        Psudo::DEC => vec![step(Step::Dec, reg)],
        Psudo::PUSH => vec![
            step(Step::Dec, Reg::SP),
            Inst::format1(Opcode::STR, reg, Reg::R0, Reg::SP),
        ],
        Psudo::POP => vec![
            Inst::format1(Opcode::LDR, reg, Reg::R0, Reg::SP),
            step(Step::Inc, Reg::SP),
        ],
    };
    log::debug!("{} {} -> {} instruction(s)", psudo, reg, insts.len());
    insts
}
