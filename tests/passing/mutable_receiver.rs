use memoproxy::*;

pub trait Accumulator {
    fn add(&mut self, amount: u64) -> u64;
    fn total(&self) -> u64;
    fn reset(&mut self);
}

#[derive(Debug, Default)]
pub struct Sum {
    total: u64,
}

#[memoized]
impl Accumulator for Sum {
    #[memoize]
    fn add(&mut self, amount: u64) -> u64 {
        self.total += amount;
        self.total
    }

    fn total(&self) -> u64 {
        self.total
    }

    fn reset(&mut self) {
        self.total = 0;
    }
}

fn main() {
    let mut sum = create::<Sum, _>(()).unwrap();
    assert_eq!(sum.add(5), 5);
    assert_eq!(sum.add(5), 5);
    assert_eq!(sum.total(), 5);
    sum.reset();
    assert_eq!(sum.total(), 0);
    assert_eq!(sum.add(5), 5);
    assert_eq!(sum.add(1), 1);
}
