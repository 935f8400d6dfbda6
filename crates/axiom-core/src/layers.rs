use serde::{Deserialize, Serialize};

/// Upper bound for the iteration index `n`.
pub const MAX_N: u32 = 100;

/// Largest integer exactly representable in `f64` (2^53 - 1).
/// `F_n` saturates here.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Saturation ceiling for the real-valued growth terms.
pub const MAX_SAFE_VALUE: f64 = f64::MAX / 2.0;

pub const MIN_PRESSURE: f64 = 0.01;
pub const MIN_PURPOSE: f64 = 0.01;
pub const DEFAULT_BASE_EXPONENTIAL: f64 = 3.0;

/// Caps overflowed or NaN terms at [`MAX_SAFE_VALUE`].
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() || value > MAX_SAFE_VALUE {
        MAX_SAFE_VALUE
    } else if value < -MAX_SAFE_VALUE {
        -MAX_SAFE_VALUE
    } else {
        value
    }
}

/// Product of `factors` under the saturation policy.
///
/// Any exact zero factor yields 0, so an overflowed partial product never
/// meets a zero and turns into NaN. Otherwise the product saturates.
pub(crate) fn saturating_product(factors: &[f64]) -> f64 {
    if factors.iter().any(|f| *f == 0.0) {
        return 0.0;
    }
    saturate(factors.iter().product())
}

/// Foundation layer: A · B · C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationLayer {
    pub impulses: f64,
    pub elements: f64,
    pub pressure: f64,
}

impl FoundationLayer {
    pub fn new(impulses: f64, elements: f64, pressure: f64) -> Self {
        Self {
            impulses,
            elements,
            pressure,
        }
    }

    pub fn compute(&self) -> f64 {
        saturating_product(&[self.impulses, self.elements, self.pressure])
    }
}

/// Dynamic layer: E_n · (1 + F_n)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicLayer {
    pub n: u32,
    pub base_exponential: f64,
}

impl DynamicLayer {
    pub fn new(n: u32) -> Self {
        Self {
            n,
            base_exponential: DEFAULT_BASE_EXPONENTIAL,
        }
    }

    /// E_n = 2 · base^n − 1, saturated at [`MAX_SAFE_VALUE`].
    pub fn exponential_growth(&self) -> f64 {
        let exponent = i32::try_from(self.n).unwrap_or(i32::MAX);
        saturate(2.0 * self.base_exponential.powi(exponent) - 1.0)
    }

    /// F_n: 1 for n <= 1, then the (1, 1) recurrence advanced n - 1 times,
    /// so F_2 = 2 and F_10 = 89. Saturates at [`MAX_SAFE_INTEGER`].
    pub fn fibonacci(&self) -> u64 {
        if self.n <= 1 {
            return 1;
        }

        let mut a = 1u64;
        let mut b = 1u64;
        for _ in 2..=self.n {
            let next = a + b;
            if next > MAX_SAFE_INTEGER {
                return MAX_SAFE_INTEGER;
            }
            a = b;
            b = next;
        }
        b
    }

    pub fn compute(&self) -> f64 {
        let e_n = self.exponential_growth();
        let f_n = self.fibonacci() as f64;
        saturating_product(&[e_n, 1.0 + f_n])
    }
}

/// Cognitive layer: (1 − X) · Y · Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveLayer {
    /// 0 = fully objective, 1 = fully subjective.
    pub subjectivity: f64,
    pub purpose: f64,
    pub time: f64,
}

impl CognitiveLayer {
    pub fn new(subjectivity: f64, purpose: f64, time: f64) -> Self {
        Self {
            subjectivity,
            purpose,
            time,
        }
    }

    pub fn objectivity(&self) -> f64 {
        1.0 - self.subjectivity
    }

    pub fn compute(&self) -> f64 {
        saturating_product(&[self.objectivity(), self.purpose, self.time])
    }
}

/// The first `count` Fibonacci numbers, `[1, 1, 2, 3, 5, ...]`.
pub fn fibonacci_sequence(count: usize) -> Vec<u64> {
    match count {
        0 => Vec::new(),
        1 => vec![1],
        _ => {
            let mut sequence = Vec::with_capacity(count);
            sequence.extend([1u64, 1]);
            for i in 2..count {
                let next = (sequence[i - 1] + sequence[i - 2]).min(MAX_SAFE_INTEGER);
                sequence.push(next);
            }
            sequence
        }
    }
}
