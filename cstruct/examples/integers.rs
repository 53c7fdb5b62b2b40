//! Integers narrower than their native type.
use cstruct::{BigEndian, Int, Schema};

/// 3-byte integer in big-endian.
type SmallInteger = Int<u32, 3, BigEndian>;

fn main() -> cstruct::Result<()> {
    let k1 = SmallInteger::unpack(&[0x01, 0x02, 0x03])?;
    let k2: u32 = 1;
    println!("{k1} {k2}");
    println!("{}", k1 & 0x1);
    println!("{}", k1 ^ k2);
    assert_eq!(k1, 0x010203);
    assert_eq!(k2, k1 & k2);

    println!("{:02x?}", SmallInteger::pack(&k2)?);
    if let Err(e) = SmallInteger::pack(&0x0100_0000) {
        println!("{e}");
    }
    Ok(())
}
