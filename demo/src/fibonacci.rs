use memoproxy::{info, memoized};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FibonacciError {
    #[error("index must not be negative, got {0}")]
    NegativeIndex(i64),
    #[error("fibonacci number at index {0} does not fit into u64")]
    Overflow(i64),
}

pub trait Fibonacci {
    fn fibonacci(&self, index: i64) -> Result<u64, FibonacciError>;

    /// How many times the fibonacci body itself has run.
    fn base_calls(&self) -> usize;
}

/// Naive recursive Fibonacci that counts its own evaluations.
#[derive(Debug, Default)]
pub struct HakaseMemo {
    calls: AtomicUsize,
}

#[memoized]
impl Fibonacci for HakaseMemo {
    #[memoize]
    fn fibonacci(&self, index: i64) -> Result<u64, FibonacciError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if index < 0 {
            return Err(FibonacciError::NegativeIndex(index));
        }
        if index < 2 {
            return Ok(index as u64);
        }
        let sum = self.fibonacci(index - 1)?.checked_add(self.fibonacci(index - 2)?);
        sum.ok_or(FibonacciError::Overflow(index))
    }

    fn base_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct Measurement {
    pub title: String,
    pub index: i64,
    pub answer: u64,
    pub elapsed: Duration,
    pub base_calls: usize,
}

pub fn measure_time<F: Fibonacci + ?Sized>(title: &str, fib: &F, index: i64) -> Result<Measurement, FibonacciError> {
    let calls_before = fib.base_calls();
    let start = Instant::now();
    let answer = fib.fibonacci(index)?;
    let elapsed = start.elapsed();
    let measurement = Measurement {
        title: title.to_string(),
        index,
        answer,
        elapsed,
        base_calls: fib.base_calls() - calls_before,
    };
    info!(
        "[{}] index: {}, answer: {}, time: {:?}, base calls: {}",
        measurement.title, measurement.index, measurement.answer, measurement.elapsed, measurement.base_calls
    );
    Ok(measurement)
}
