use memoproxy::*;

pub trait Shape {
    type Unit;
    const SIDES: u32;

    fn area(&self, scale: u32) -> u64;
    fn sides(&self) -> u32;
    fn unit_name() -> &'static str;
    fn into_label(self, prefix: &str) -> String;
}

#[derive(Debug, Default)]
pub struct Square {
    side: u64,
}

#[memoized]
impl Shape for Square {
    type Unit = f64;
    const SIDES: u32 = 4;

    #[memoize]
    fn area(&self, scale: u32) -> u64 {
        self.side * self.side * scale as u64 * Self::SIDES as u64 / 4
    }

    fn sides(&self) -> u32 {
        Self::SIDES
    }

    fn unit_name() -> &'static str {
        "cm"
    }

    fn into_label(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.side)
    }
}

fn main() {
    let square = wrap(Square { side: 3 }).unwrap();
    assert_eq!(square.area(2), 18);
    assert_eq!(square.area(2), 18);
    assert_eq!(Memoized::cached(&square, "area"), 1);
    assert_eq!(square.sides(), 4);
    assert_eq!(<Memoized<Square> as Shape>::SIDES, 4);
    assert_eq!(<Memoized<Square> as Shape>::unit_name(), "cm");
    let unit: <Memoized<Square> as Shape>::Unit = 1.5;
    assert_eq!(unit, 1.5);
    assert_eq!(square.into_label("side "), "side 3");
}
