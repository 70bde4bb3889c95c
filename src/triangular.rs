use std::fmt;
use std::ops::{Add, Mul, RangeInclusive};

use num::Zero;
use serde::Serialize;

use crate::error::{FuzzyNumberError, FuzzyNumberResult};
use crate::terms::State;

/// A triangular fuzzy number `(a, m, b)` with finite components and `a <= m <= b`.
///
/// Used both as a fuzzy degree of support inside a distribution and as a quantity with
/// uncertainty. Values are immutable; arithmetic produces new numbers. Operators between two
/// fuzzy numbers saturate at `f64::MAX` instead of overflowing. Arithmetic with a scalar operand
/// goes through the `try_*` methods, which reject non-finite scalars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TriangularFuzzyNumber {
    a: f64,
    m: f64,
    b: f64,
}

/// Right hand side of a fuzzy arithmetic operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Fuzzy(TriangularFuzzyNumber),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<TriangularFuzzyNumber> for Operand {
    fn from(value: TriangularFuzzyNumber) -> Self {
        Operand::Fuzzy(value)
    }
}

impl TriangularFuzzyNumber {
    pub fn new(a: f64, m: f64, b: f64) -> FuzzyNumberResult<Self> {
        let finite = a.is_finite() && m.is_finite() && b.is_finite();

        if !finite || a > m || m > b {
            return Err(FuzzyNumberError::Unordered { a, m, b });
        }

        Ok(Self { a, m, b })
    }

    /// A crisp value as a degenerate fuzzy number.
    pub fn point(value: f64) -> FuzzyNumberResult<Self> {
        Self::new(value, value, value)
    }

    // Callers pass ordered, NaN free components; infinities from overflow are saturated.
    fn from_ordered(a: f64, m: f64, b: f64) -> Self {
        debug_assert!(a <= m && m <= b, "unordered fuzzy number ({a}, {m}, {b})");

        Self {
            a: saturate(a),
            m: saturate(m),
            b: saturate(b),
        }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Triangular membership degree of `x`.
    ///
    /// Zero outside `[a, b]`, one at `m`. A vertical side (`a == m` or `m == b`) has no ramp, so
    /// the whole half between the bound and the peak has membership one.
    pub fn membership(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            return 0.;
        }

        if x == self.m {
            1.
        } else if x < self.m {
            (x - self.a) / (self.m - self.a)
        } else {
            (self.b - x) / (self.b - self.m)
        }
    }

    pub fn centroid(&self) -> f64 {
        (self.a + self.m + self.b) / 3.
    }

    /// Mean of the maximum of a single triangle, which is its modal value.
    pub fn mean_of_max(&self) -> f64 {
        self.m
    }

    /// Interval of values whose membership is at least `alpha`. `alpha` is clamped to `[0, 1]`.
    pub fn alpha_cut(&self, alpha: f64) -> (f64, f64) {
        let alpha = alpha.clamp(0., 1.);

        if alpha == 0. {
            return (self.a, self.b);
        }

        if alpha == 1. {
            return (self.m, self.m);
        }

        (
            self.a + alpha * (self.m - self.a),
            self.b - alpha * (self.b - self.m),
        )
    }

    /// Rescales so the modal value becomes one. A zero modal value yields the zero triple.
    pub fn normalize(&self) -> Self {
        if self.m == 0. {
            return Self::zero();
        }

        let (a, b) = if self.m > 0. {
            (self.a / self.m, self.b / self.m)
        } else {
            (self.b / self.m, self.a / self.m)
        };

        Self::from_ordered(a.min(1.), 1., b.max(1.))
    }

    /// Scalar multiplication. A negative factor swaps the bounds so `a <= m <= b` still holds.
    pub fn scale(&self, factor: f64) -> FuzzyNumberResult<Self> {
        if !factor.is_finite() {
            return Err(FuzzyNumberError::NonFinite(factor));
        }

        Ok(self.map_monotone(|x| x * factor, factor < 0.))
    }

    /// Adds a scalar or another fuzzy number.
    pub fn try_add(&self, rhs: impl Into<Operand>) -> FuzzyNumberResult<Self> {
        match rhs.into() {
            Operand::Scalar(offset) if !offset.is_finite() => Err(FuzzyNumberError::NonFinite(offset)),
            Operand::Scalar(offset) => Ok(self.map_monotone(|x| x + offset, false)),
            Operand::Fuzzy(other) => Ok(*self + other),
        }
    }

    /// Multiplies by a scalar or another fuzzy number.
    pub fn try_mul(&self, rhs: impl Into<Operand>) -> FuzzyNumberResult<Self> {
        match rhs.into() {
            Operand::Scalar(factor) => self.scale(factor),
            Operand::Fuzzy(other) => Ok(self.product(&other)),
        }
    }

    // `f` must be monotone; a decreasing `f` swaps the bounds.
    fn map_monotone(&self, f: impl Fn(f64) -> f64, decreasing: bool) -> Self {
        let (a, m, b) = (f(self.a), f(self.m), f(self.b));

        if decreasing {
            Self::from_ordered(b, m, a)
        } else {
            Self::from_ordered(a, m, b)
        }
    }

    /// Fuzzy product.
    ///
    /// The support is the min/max of the corner products together with the modal product. This
    /// bounds the exact product for any sign, but the product of two triangles is not itself
    /// triangular, so the shape in between is an approximation.
    pub fn product(&self, rhs: &Self) -> Self {
        let m = self.m * rhs.m;
        let candidates = [
            self.a * rhs.a,
            self.a * rhs.b,
            self.b * rhs.a,
            self.b * rhs.b,
            m,
        ];
        let a = candidates.iter().copied().fold(f64::INFINITY, f64::min);
        let b = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self::from_ordered(a, m, b)
    }

    /// Division by a scalar or, unsupported, by another fuzzy number.
    pub fn try_div(&self, rhs: impl Into<Operand>) -> FuzzyNumberResult<Self> {
        match rhs.into() {
            Operand::Scalar(divisor) if divisor == 0. => Err(FuzzyNumberError::DivisionByZero),
            Operand::Scalar(divisor) if !divisor.is_finite() => Err(FuzzyNumberError::NonFinite(divisor)),
            Operand::Scalar(divisor) => Ok(self.map_monotone(|x| x / divisor, divisor < 0.)),
            Operand::Fuzzy(_) => Err(FuzzyNumberError::FuzzyDivision),
        }
    }

    /// Widens the support by `spread` on both sides, clamped to `[0, 1]`. The modal value is kept.
    pub fn widen(&self, spread: f64) -> Self {
        Self::from_ordered(
            f64::max(0., self.a - spread).min(self.m),
            self.m,
            f64::min(1., self.b + spread).max(self.m),
        )
    }

    /// Preset fuzzy number describing a linguistic label over `range`.
    ///
    /// Fails when the range is reversed or not finite.
    pub fn from_linguistic(state: State, range: RangeInclusive<f64>) -> FuzzyNumberResult<Self> {
        let low = *range.start();
        let high = *range.end();
        let span = high - low;
        let at = |ratio: f64| low + span * ratio;

        match state {
            State::MuyBajo | State::MuyBaja => Self::new(low, low, at(0.2)),
            State::Bajo | State::Baja => Self::new(low, at(0.1), at(0.3)),
            State::Medio | State::Media => Self::new(at(0.2), at(0.5), at(0.8)),
            State::Alto | State::Alta => Self::new(at(0.7), at(0.9), high),
            State::MuyAlto | State::MuyAlta => Self::new(at(0.8), high, high),
            _ => Self::new(at(0.3), at(0.5), at(0.7)),
        }
    }
}

fn saturate(x: f64) -> f64 {
    x.clamp(f64::MIN, f64::MAX)
}

impl fmt::Display for TriangularFuzzyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.a, self.m, self.b)
    }
}

impl Zero for TriangularFuzzyNumber {
    fn zero() -> Self {
        Self::from_ordered(0., 0., 0.)
    }

    fn is_zero(&self) -> bool {
        self.a == 0. && self.m == 0. && self.b == 0.
    }
}

impl Default for TriangularFuzzyNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for TriangularFuzzyNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_ordered(self.a + rhs.a, self.m + rhs.m, self.b + rhs.b)
    }
}

impl Mul for TriangularFuzzyNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.product(&rhs)
    }
}

impl std::iter::Sum for TriangularFuzzyNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
