//! Nested records and arrays of records.
use {
    cstruct::{Array, Packable, Packed, Schema},
    std::fmt,
};

#[derive(Packable, Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    x: i8,
    y: i8,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point(x={}, y={})", self.x, self.y)
    }
}

#[derive(Packable, Debug, Clone, Copy, PartialEq, Eq)]
struct Line {
    p1: Point,
    p2: Point,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line(p1={}, p2={})", self.p1, self.p2)
    }
}

#[derive(Packable, Debug, Clone, Copy, PartialEq, Eq)]
struct Rectangle {
    p1: Point,
    p2: Point,
}

impl Rectangle {
    fn area(&self) -> i32 {
        let width = (i32::from(self.p1.x) - i32::from(self.p2.x)).abs();
        let height = (i32::from(self.p1.y) - i32::from(self.p2.y)).abs();
        width * height
    }

    fn valid(&self) -> bool {
        self.area() != 0
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rectangle(p1={}, p2={})", self.p1, self.p2)
    }
}

type Triangle = Array<Point, 3>;

fn geometry<T>(name: &str, buffer: &[u8]) -> cstruct::Result<T>
where
    T: Packed + Schema + fmt::Display,
{
    let value = T::from_bytes(buffer)?;
    println!("{name} {} {value}", T::SIZE);
    assert_eq!(buffer, value.to_bytes()?);
    Ok(value)
}

fn main() -> cstruct::Result<()> {
    geometry::<Point>("Point", &[0x00, 0x00])?;
    geometry::<Point>("Point", &[0x0f, 0x20])?;
    geometry::<Line>("Line", &[0x00, 0x00, 0x10, 0x09])?;

    let rectangle = geometry::<Rectangle>("Rectangle", &[0x00, 0x00, 0xff, 0xff])?;
    println!("area {} valid {}", rectangle.area(), rectangle.valid());
    let flat = geometry::<Rectangle>("Rectangle", &[0x00, 0x00, 0x00, 0xff])?;
    println!("area {} valid {}", flat.area(), flat.valid());

    let bytes = [0x00, 0x00, 0x00, 0x02, 0x03, 0x00];
    let triangle = Triangle::unpack(&bytes)?;
    println!(
        "Triangle {} Triangle({}, {}, {})",
        Triangle::SIZE,
        triangle[0],
        triangle[1],
        triangle[2]
    );
    assert_eq!(Triangle::pack(&triangle)?, bytes);
    Ok(())
}
