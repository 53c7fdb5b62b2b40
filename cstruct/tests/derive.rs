#![cfg(feature = "derive")]
use {
    cstruct::{
        Ascii, BigEndian, Error, FieldInfo, Int, Packable, Packed, Record, Schema, Text, U16Be,
    },
    proptest::prelude::*,
    serde::{Deserialize, Serialize},
};

#[derive(Packable, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    x: i8,
    y: i8,
}

#[derive(Packable, Debug, Clone, Copy, PartialEq, Eq)]
struct Line {
    p1: Point,
    p2: Point,
}

#[derive(Packable, Debug, PartialEq, Eq)]
struct Header {
    magic: u16,
    #[cstruct(with = "Int<u32, 3, BigEndian>")]
    length: u32,
    #[cstruct(with = "Text<4, Ascii>")]
    tag: String,
    #[cstruct(with = "[U16Be; 2]")]
    ports: [u16; 2],
}

#[derive(Packable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Mixed {
    tag: u8,
    value: u32,
    wide: i64,
    points: [Point; 3],
}

#[derive(Packable, Debug, PartialEq, Eq)]
struct Keywords {
    r#type: u8,
    r#loop: u8,
}

mod renamed {
    pub use cstruct as codec;

    #[derive(codec::Packable, Debug, PartialEq, Eq)]
    #[cstruct(crate = "codec")]
    pub struct Tiny {
        pub value: u8,
    }
}

#[test]
fn two_signed_bytes() {
    let point = Point::from_bytes(&[0x0f, 0x20]).unwrap();
    assert_eq!(point, Point { x: 15, y: 32 });
    assert_eq!(point.to_bytes().unwrap(), [0x0f, 0x20]);
}

#[test]
fn nested_records() {
    let line = Line::from_bytes(&[0x00, 0x00, 0x10, 0x09]).unwrap();
    assert_eq!(line.p1, Point { x: 0, y: 0 });
    assert_eq!(line.p2, Point { x: 16, y: 9 });
    assert_eq!(Line::SIZE, 2 * Point::SIZE);
}

#[test]
fn with_overrides_field_schema() {
    assert_eq!(Header::SIZE, 2 + 3 + 4 + 4);
    let header = Header {
        magic: 0xcafe,
        length: 0x010203,
        tag: "AB".into(),
        ports: [80, 443],
    };
    let bytes = header.to_bytes().unwrap();
    assert_eq!(
        bytes,
        [0xfe, 0xca, 0x01, 0x02, 0x03, b'A', b'B', 0, 0, 0x00, 0x50, 0x01, 0xbb]
    );
    let decoded = Header::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.tag, "AB\0\0");
    assert_eq!(decoded.ports, [80, 443]);

    let too_long = Header {
        length: 1 << 24,
        ..decoded
    };
    assert_eq!(
        too_long.to_bytes(),
        Err(Error::ValueOutOfRange {
            width: 3,
            signed: false
        })
    );
}

#[test]
fn field_layout() {
    assert_eq!(Header::MAGIC_OFFSET, 0);
    assert_eq!(Header::LENGTH_OFFSET, 2);
    assert_eq!(Header::TAG_OFFSET, 5);
    assert_eq!(Header::PORTS_OFFSET, 9);
    assert_eq!(
        Header::FIELDS[1],
        FieldInfo {
            name: "length",
            offset: 2,
            size: 3
        }
    );
    assert_eq!(
        Header::field_names().collect::<Vec<_>>(),
        ["magic", "length", "tag", "ports"]
    );
}

#[test]
fn raw_identifiers() {
    assert_eq!(
        Keywords::field_names().collect::<Vec<_>>(),
        ["type", "loop"]
    );
    assert_eq!(Keywords::LOOP_OFFSET, 1);
    let keywords = Keywords::from_bytes(&[1, 2]).unwrap();
    assert_eq!(keywords.r#type, 1);
    assert_eq!(format!("{:?}", Keywords::view(&keywords).get("loop").unwrap()), "2");
}

#[test]
fn crate_path_override() {
    let tiny = renamed::Tiny::from_bytes(&[7]).unwrap();
    assert_eq!(tiny, renamed::Tiny { value: 7 });
    assert_eq!(renamed::Tiny::VALUE_OFFSET, 0);
}

#[test]
fn view() {
    let point = Point { x: 1, y: -1 };
    let view = Point::view(&point);
    assert_eq!(format!("{view:?}"), "{\"x\": 1, \"y\": -1}");
    assert!(view.get("size").is_none());
}

#[test]
fn iter_unpack() {
    let bytes = [1, 2, 3, 4, 5, 6];
    let points = Point::iter_unpack(&bytes)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[2], Point { x: 5, y: 6 });
    assert!(matches!(
        Point::iter_unpack(&bytes[..5]),
        Err(Error::MisalignedBuffer { len: 5, size: 2 })
    ));
}

fn strat_point() -> impl Strategy<Value = Point> {
    (any::<i8>(), any::<i8>()).prop_map(|(x, y)| Point { x, y })
}

proptest! {
    #[test]
    fn test_matches_bincode(
        tag in any::<u8>(),
        value in any::<u32>(),
        wide in any::<i64>(),
        points in proptest::array::uniform3(strat_point()),
    ) {
        let mixed = Mixed { tag, value, wide, points };
        let bincode_serialized = bincode::serialize(&mixed).unwrap();
        let schema_serialized = mixed.to_bytes().unwrap();
        prop_assert_eq!(&bincode_serialized, &schema_serialized);
        prop_assert_eq!(Mixed::from_bytes(&bincode_serialized).unwrap(), mixed);
    }

    #[test]
    fn test_pack_unpack_idempotent(bytes in any::<[u8; 13]>()) {
        // Text is ascii; restrict the tag bytes to valid ascii.
        let mut bytes = bytes;
        for b in &mut bytes[5..9] {
            *b &= 0x7f;
        }
        let header = Header::from_bytes(&bytes).unwrap();
        let packed = header.to_bytes().unwrap();
        prop_assert_eq!(&packed[..], &bytes[..]);
        prop_assert_eq!(Header::from_bytes(&packed).unwrap(), header);
    }
}
