use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

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
)]
#[repr(u8)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Reg {
    /// Stack pointer used by PUSH / POP.
    pub const SP: Reg = Reg::R13;
}

static REG_MAP: Lazy<BiMap<&'static str, Reg>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Reg> = BiMap::new();
    map.insert("R0", Reg::R0);
    map.insert("R1", Reg::R1);
    map.insert("R2", Reg::R2);
    map.insert("R3", Reg::R3);
    map.insert("R4", Reg::R4);
    map.insert("R5", Reg::R5);
    map.insert("R6", Reg::R6);
    map.insert("R7", Reg::R7);
    map.insert("R8", Reg::R8);
    map.insert("R9", Reg::R9);
    map.insert("R10", Reg::R10);
    map.insert("R11", Reg::R11);
    map.insert("R12", Reg::R12);
    map.insert("R13", Reg::R13);
    map.insert("R14", Reg::R14);
    map.insert("R15", Reg::R15);
    map
});

impl Reg {
    /// Exact, case-sensitive lookup in the register table.
    pub fn parse(s: &str) -> Option<Reg> {
        REG_MAP.get_by_left(s).copied()
    }

    pub fn name(&self) -> &'static str {
        REG_MAP.get_by_right(self).copied().unwrap_or("R?")
    }

    pub fn id(self) -> u8 {
        self.into()
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[test]
fn test() {
    assert_eq!(REG_MAP.len(), 16);
    assert_eq!(Reg::parse("R0"), Some(Reg::R0));
    assert_eq!(Reg::parse("R13"), Some(Reg::SP));
    assert_eq!(Reg::parse("r13"), None);
    assert_eq!(Reg::parse("R16"), None);
    assert_eq!(Reg::parse("R5").map(Reg::id), Some(5));
    assert_eq!(Reg::try_from(15u8).ok(), Some(Reg::R15));
    assert!(Reg::try_from(16u8).is_err());
    assert_eq!(Reg::R11.to_string(), "R11");
}
