//! Fixed-width text fields.
use cstruct::{Ascii, Schema, Text};

type Name = Text<5, Ascii>;

fn main() -> cstruct::Result<()> {
    let s = Name::unpack(&[0x31, 0x32, 0x33, 0x34, 0x35])?;
    println!("{s}");
    assert_eq!(s, "12345");

    let s2 = <Text<4>>::unpack(&[0x41, 0x42, 0x43, 0x44])?;
    println!("{s2}");
    assert_eq!(s2, "ABCD");

    let padded = Name::pack(&"ab".into())?;
    let decoded = Name::unpack(&padded)?;
    println!("{decoded:?} -> {:?}", Name::trimmed(&decoded));
    Ok(())
}
