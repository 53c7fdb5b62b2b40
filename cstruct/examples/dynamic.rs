//! Layouts assembled at runtime.
use cstruct::dynamic::{
    array, integer, text, Endian, Layout, Record, RecordLayout, Signedness, TextEncoding, Value,
};

fn main() -> cstruct::Result<()> {
    let point = RecordLayout::builder("Point")
        .field("x", integer(1, Endian::Little, Signedness::Signed)?)
        .field("y", integer(1, Endian::Little, Signedness::Signed)?)
        .build()?;
    let triangle = array(point.clone(), 3)?;

    let bytes = [0x00, 0x00, 0x00, 0x02, 0x03, 0x00];
    let value = triangle.unpack(&bytes)?;
    println!("Triangle {} {value:?}", triangle.size());
    assert_eq!(triangle.pack(&value)?, bytes);

    let packet = Layout::from(
        RecordLayout::builder("Packet")
            .field("kind", integer(1, Endian::Big, Signedness::Unsigned)?)
            .field("length", integer(3, Endian::Big, Signedness::Unsigned)?)
            .field("origin", point)
            .field("label", text(4, TextEncoding::Ascii))
            .build()?,
    );
    let record = Record::new()
        .with("kind", 2u8)
        .with("length", 0x010203u32)
        .with("origin", Record::new().with("x", -1i8).with("y", 1i8))
        .with("label", "abc");
    let bytes = packet.pack(&Value::from(record))?;
    println!("{} {bytes:02x?}", packet.size());

    for value in packet.iter_unpack(&bytes)? {
        let value = value?;
        if let Some(record) = value.as_record() {
            for (name, field) in record.iter() {
                println!("  {name}: {field:?}");
            }
        }
    }
    Ok(())
}
