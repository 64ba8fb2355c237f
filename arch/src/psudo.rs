use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumString};

/// Pseudo instructions. Each takes exactly one register operand.
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
pub enum Psudo {
    INC,
    DEC,
    PUSH,
    POP,
}

impl Psudo {
    pub fn parse(s: &str) -> Option<Psudo> {
        s.parse::<Psudo>().ok()
    }
}

#[test]
fn test() {
    assert_eq!(Psudo::COUNT, 4);
    assert_eq!(Psudo::parse("PUSH"), Some(Psudo::PUSH));
    assert_eq!(Psudo::parse("push"), None);
    assert_eq!(Psudo::parse("ADD"), None);
    assert_eq!(u8::from(Psudo::DEC), 1);
}
