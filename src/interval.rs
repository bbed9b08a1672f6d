//! Closed intervals over scalar kinds.
//!
//! An [`Interval<T>`] is a pair `(lo, hi)` bounding an unknown scalar. Every
//! operation returns a conservative superset of the true result range: the
//! transpose of min/max over the operand box, with explicit handling of the
//! IEEE special cases (`∞ − ∞`, `0 · ∞`, division by an interval containing
//! zero, the `atan2` branch cut). Operations whose result is undefined on
//! part of the input box return the NaN sentinel `(NaN, NaN)`, observable
//! through [`is_nan`](Interval::is_nan).
//!
//! Intervals accumulate like sets: they are mutated only through the
//! [`Assign`](crate::merge::Assign) operators and [`reset`](Interval::reset).
//! They are clonable but deliberately neither `Copy` nor `PartialEq` — a
//! silent copy-assignment would discard accumulated branch results, and
//! two-valued equality would bypass the four-valued comparison protocol.
//!
//! Every interval value carries a unique [`Identity`] issued from a global
//! monotonic counter. Identities let the constraint algebra recognize that a
//! relational term was built from *this* interval rather than from an
//! arithmetic derivative of it; they are the one piece of non-local state in
//! the crate.

use core::ops::{Add, Div, Mul, Neg, Sub};
use core::sync::atomic::{AtomicU64, Ordering};

use num_traits::{Float, FloatConst, Zero};

use crate::error::{Error, InvariantError};
use crate::logic::Logical;
use crate::math;
use crate::numeric::Element;
use crate::set::ValueSet;
use crate::sign::Sign;

/// Opaque identity of an interval value, unique for the program's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(u64);

impl Identity {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Identity(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

// std::cmp semantics are wrong here: an unordered comparison must fall
// through to the first operand, and float NaN handling must not renormalize.
pub(crate) fn emin<T: PartialOrd>(x: T, y: T) -> T {
    if y < x {
        y
    } else {
        x
    }
}

pub(crate) fn emax<T: PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y
    } else {
        x
    }
}

/// A scalar, interval, or constrained interval usable as an operand.
///
/// Plain scalars act as singleton intervals and carry no identity; intervals
/// carry their own identity and constrained intervals the identity of the
/// interval they descend from.
pub trait IntervalArg<T: Element> {
    /// The operand's lower bound.
    fn lo(&self) -> T;

    /// The operand's upper bound.
    fn hi(&self) -> T;

    /// Whether the operand holds at least one value.
    fn is_assigned(&self) -> bool {
        !(self.lo() > self.hi())
    }

    /// The identity the operand contributes to a constraint term.
    fn identity(&self) -> Option<Identity> {
        None
    }
}

impl<T: Element> IntervalArg<T> for T {
    fn lo(&self) -> T {
        *self
    }

    fn hi(&self) -> T {
        *self
    }
}

impl<T: Element> IntervalArg<T> for Interval<T> {
    fn lo(&self) -> T {
        self.lo
    }

    fn hi(&self) -> T {
        self.hi
    }

    fn identity(&self) -> Option<Identity> {
        Some(self.id)
    }
}

impl<T: Element> IntervalArg<T> for &Interval<T> {
    fn lo(&self) -> T {
        self.lo
    }

    fn hi(&self) -> T {
        self.hi
    }

    fn identity(&self) -> Option<Identity> {
        Some(self.id)
    }
}

/// Algebraic type representing a bounded scalar.
#[derive(Debug)]
pub struct Interval<T: Element> {
    pub(crate) lo: T,
    pub(crate) hi: T,
    pub(crate) id: Identity,
}

/// A clone is a distinct value and receives a fresh identity.
impl<T: Element> Clone for Interval<T> {
    fn clone(&self) -> Self {
        Self::make(self.lo, self.hi)
    }
}

impl<T: Element> Default for Interval<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> From<T> for Interval<T> {
    fn from(value: T) -> Self {
        Self::make(value, value)
    }
}

impl<T: Element> Interval<T> {
    pub(crate) fn make(lo: T, hi: T) -> Self {
        debug_assert!(!(lo > hi));
        Self {
            lo,
            hi,
            id: Identity::fresh(),
        }
    }

    pub(crate) fn nan_interval() -> Self {
        match T::nan_value() {
            Some(nan) => Self {
                lo: nan,
                hi: nan,
                id: Identity::fresh(),
            },
            None => Self::empty(),
        }
    }

    /// Creates an empty (unassigned) interval.
    pub fn empty() -> Self {
        Self::make(T::empty_lower(), T::empty_upper())
    }

    /// Creates the interval `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi` (NaN bounds pass the check).
    pub fn new(lo: T, hi: T) -> Self {
        assert!(!(lo > hi), "interval bounds out of order");
        Self {
            lo,
            hi,
            id: Identity::fresh(),
        }
    }

    /// Creates the interval `[lo, hi]`, or an error if `lo > hi`.
    pub fn new_strict(lo: T, hi: T) -> Result<Self, Error> {
        if lo > hi {
            Err(InvariantError::new("interval bounds out of order").into())
        } else {
            Ok(Self {
                lo,
                hi,
                id: Identity::fresh(),
            })
        }
    }

    /// The unique identity of this interval value.
    pub fn identity(&self) -> Identity {
        self.id
    }

    /// Whether the interval holds at least one value. The NaN sentinel
    /// counts as assigned; inspect it with [`is_nan`](Self::is_nan).
    pub fn assigned(&self) -> bool {
        !(self.lo > self.hi)
    }

    /// The lower bound without the assignedness check.
    pub fn lower_unchecked(&self) -> T {
        self.lo
    }

    /// The upper bound without the assignedness check.
    pub fn upper_unchecked(&self) -> T {
        self.hi
    }

    /// The lower bound. The interval must be assigned.
    pub fn lower(&self) -> T {
        debug_assert!(self.assigned());
        self.lo
    }

    /// The upper bound. The interval must be assigned.
    pub fn upper(&self) -> T {
        debug_assert!(self.assigned());
        self.hi
    }

    /// The sole contained value.
    ///
    /// # Panics
    ///
    /// Panics unless the interval is a singleton.
    pub fn value(&self) -> T {
        if self.lo == self.hi {
            self.lo
        } else {
            panic!("interval does not hold exactly one value")
        }
    }

    /// Whether every value of `rhs` lies within this interval.
    pub fn contains(&self, rhs: impl IntervalArg<T>) -> bool {
        self.assigned() && rhs.lo() >= self.lo && rhs.hi() <= self.hi
    }

    /// Whether every value of `rhs` lies strictly within this interval.
    pub fn encloses(&self, rhs: impl IntervalArg<T>) -> bool {
        rhs.lo() > self.lo && rhs.hi() < self.hi
    }

    /// Whether this interval has exactly the bounds of `rhs`.
    pub fn matches(&self, rhs: impl IntervalArg<T>) -> bool {
        self.lo == rhs.lo() && self.hi == rhs.hi()
    }

    /// Clears the interval back to the unassigned state, keeping its
    /// identity.
    pub fn reset(&mut self) -> &mut Self {
        self.lo = T::empty_lower();
        self.hi = T::empty_upper();
        self
    }

    pub(crate) fn union_in(&mut self, lo: T, hi: T) {
        self.lo = emin(self.lo, lo);
        self.hi = emax(self.hi, hi);
    }

    pub(crate) fn set_bounds(&mut self, lo: T, hi: T) {
        self.lo = lo;
        self.hi = hi;
    }

    /// Componentwise minimum: `[min(lo, rhs.lo), min(hi, rhs.hi)]`.
    pub fn min(&self, rhs: impl IntervalArg<T>) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        Interval::make(emin(self.lo, rhs.lo()), emin(self.hi, rhs.hi()))
    }

    /// Componentwise maximum: `[max(lo, rhs.lo), max(hi, rhs.hi)]`.
    pub fn max(&self, rhs: impl IntervalArg<T>) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        Interval::make(emax(self.lo, rhs.lo()), emax(self.hi, rhs.hi()))
    }
}

pub(crate) mod kernel {
    use super::*;

    pub(crate) fn neg<T>(lo: T, hi: T) -> Interval<T>
    where
        T: Element + Neg<Output = T>,
    {
        Interval::make(-hi, -lo)
    }

    pub(crate) fn add<T>(alo: T, ahi: T, blo: T, bhi: T) -> Interval<T>
    where
        T: Element + Add<Output = T>,
    {
        if (alo.is_neg_infinity() && bhi.is_pos_infinity())
            || (blo.is_neg_infinity() && ahi.is_pos_infinity())
        {
            return Interval::nan_interval();
        }
        Interval::make(alo + blo, ahi + bhi)
    }

    pub(crate) fn sub<T>(alo: T, ahi: T, blo: T, bhi: T) -> Interval<T>
    where
        T: Element + Sub<Output = T>,
    {
        if (alo.is_neg_infinity() && blo.is_neg_infinity())
            || (ahi.is_pos_infinity() && bhi.is_pos_infinity())
        {
            return Interval::nan_interval();
        }
        Interval::make(alo - bhi, ahi - blo)
    }

    pub(crate) fn mul<T>(alo: T, ahi: T, blo: T, bhi: T) -> Interval<T>
    where
        T: Element + Mul<Output = T> + Zero,
    {
        let zero = T::zero();
        let a_unbounded = alo.is_neg_infinity() || ahi.is_pos_infinity();
        let b_unbounded = blo.is_neg_infinity() || bhi.is_pos_infinity();
        let a_has_zero = alo <= zero && zero <= ahi;
        let b_has_zero = blo <= zero && zero <= bhi;
        if (a_unbounded && b_has_zero) || (a_has_zero && b_unbounded) {
            return Interval::nan_interval();
        }
        let v1 = alo * blo;
        let v2 = alo * bhi;
        let v3 = ahi * blo;
        let v4 = ahi * bhi;
        Interval::make(emin(emin(v1, v2), emin(v3, v4)), emax(emax(v1, v2), emax(v3, v4)))
    }

    // Division follows Hickey et al. (2001), specialized to the three
    // degenerate cases ∞/∞, 0/0 and x/(interval enclosing 0).
    pub(crate) fn div<T>(alo: T, ahi: T, blo: T, bhi: T) -> Interval<T>
    where
        T: Element + Float,
    {
        let zero = T::zero();
        if (alo.is_neg_infinity() || ahi.is_pos_infinity())
            && (blo.is_neg_infinity() || bhi.is_pos_infinity())
        {
            return Interval::nan_interval();
        }
        if alo <= zero && zero <= ahi && blo <= zero && zero <= bhi {
            return Interval::nan_interval();
        }
        if (zero < alo || ahi < zero) && blo < zero && zero < bhi {
            return Interval::make(T::neg_infinity(), T::infinity());
        }
        let v1 = alo / blo;
        let v2 = alo / bhi;
        let v3 = ahi / blo;
        let v4 = ahi / bhi;
        Interval::make(emin(emin(v1, v2), emin(v3, v4)), emax(emax(v1, v2), emax(v3, v4)))
    }
}

impl<T, R> Add<R> for Interval<T>
where
    T: Element + Add<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn add(self, rhs: R) -> Interval<T> {
        &self + rhs
    }
}

impl<T, R> Add<R> for &Interval<T>
where
    T: Element + Add<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn add(self, rhs: R) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        kernel::add(self.lo, self.hi, rhs.lo(), rhs.hi())
    }
}

impl<T, R> Sub<R> for Interval<T>
where
    T: Element + Sub<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn sub(self, rhs: R) -> Interval<T> {
        &self - rhs
    }
}

impl<T, R> Sub<R> for &Interval<T>
where
    T: Element + Sub<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn sub(self, rhs: R) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        kernel::sub(self.lo, self.hi, rhs.lo(), rhs.hi())
    }
}

impl<T, R> Mul<R> for Interval<T>
where
    T: Element + Mul<Output = T> + Zero,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn mul(self, rhs: R) -> Interval<T> {
        &self * rhs
    }
}

impl<T, R> Mul<R> for &Interval<T>
where
    T: Element + Mul<Output = T> + Zero,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn mul(self, rhs: R) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        kernel::mul(self.lo, self.hi, rhs.lo(), rhs.hi())
    }
}

impl<T, R> Div<R> for Interval<T>
where
    T: Element + Float,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn div(self, rhs: R) -> Interval<T> {
        &self / rhs
    }
}

impl<T, R> Div<R> for &Interval<T>
where
    T: Element + Float,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn div(self, rhs: R) -> Interval<T> {
        debug_assert!(self.assigned() && rhs.is_assigned());
        kernel::div(self.lo, self.hi, rhs.lo(), rhs.hi())
    }
}

impl<T> Neg for &Interval<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Interval<T>;

    fn neg(self) -> Interval<T> {
        debug_assert!(self.assigned());
        kernel::neg(self.lo, self.hi)
    }
}

impl<T> Neg for Interval<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Interval<T>;

    fn neg(self) -> Interval<T> {
        -&self
    }
}

macro_rules! scalar_lhs_ops_impl {
    ($($t:ty), +) => {
        $(
            impl Add<&Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn add(self, rhs: &Interval<$t>) -> Interval<$t> {
                    rhs + self
                }
            }

            impl Add<Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn add(self, rhs: Interval<$t>) -> Interval<$t> {
                    &rhs + self
                }
            }

            impl Sub<&Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn sub(self, rhs: &Interval<$t>) -> Interval<$t> {
                    debug_assert!(rhs.assigned());
                    kernel::sub(self, self, rhs.lo, rhs.hi)
                }
            }

            impl Sub<Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn sub(self, rhs: Interval<$t>) -> Interval<$t> {
                    self - &rhs
                }
            }

            impl Mul<&Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn mul(self, rhs: &Interval<$t>) -> Interval<$t> {
                    rhs * self
                }
            }

            impl Mul<Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn mul(self, rhs: Interval<$t>) -> Interval<$t> {
                    &rhs * self
                }
            }
        )+
    }
}

scalar_lhs_ops_impl!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! scalar_lhs_float_ops_impl {
    ($($t:ty), +) => {
        $(
            impl Div<&Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn div(self, rhs: &Interval<$t>) -> Interval<$t> {
                    debug_assert!(rhs.assigned());
                    kernel::div(self, self, rhs.lo, rhs.hi)
                }
            }

            impl Div<Interval<$t>> for $t {
                type Output = Interval<$t>;

                fn div(self, rhs: Interval<$t>) -> Interval<$t> {
                    self / &rhs
                }
            }

            impl Mul<ValueSet<Sign>> for $t {
                type Output = Interval<$t>;

                fn mul(self, rhs: ValueSet<Sign>) -> Interval<$t> {
                    rhs * Interval::from(self)
                }
            }
        )+
    }
}

scalar_lhs_float_ops_impl!(f32, f64);

// Sign factors multiply from the left; the interval-receiver direction would
// collide with the generic operand impls above.
impl<T> Mul<&Interval<T>> for Sign
where
    T: Element + Neg<Output = T> + Zero,
{
    type Output = Interval<T>;

    fn mul(self, rhs: &Interval<T>) -> Interval<T> {
        debug_assert!(rhs.assigned());
        match self {
            Sign::Positive => Interval::make(rhs.lo, rhs.hi),
            Sign::Zero => Interval::from(T::zero()),
            Sign::Negative => kernel::neg(rhs.lo, rhs.hi),
        }
    }
}

impl<T> Mul<Interval<T>> for Sign
where
    T: Element + Neg<Output = T> + Zero,
{
    type Output = Interval<T>;

    fn mul(self, rhs: Interval<T>) -> Interval<T> {
        self * &rhs
    }
}

impl<T> Mul<&Interval<T>> for ValueSet<Sign>
where
    T: Element + Neg<Output = T> + Zero,
{
    type Output = Interval<T>;

    fn mul(self, rhs: &Interval<T>) -> Interval<T> {
        debug_assert!(rhs.assigned());
        let mut result = Interval::empty();
        if self.contains(Sign::Positive) {
            result.union_in(rhs.lo, rhs.hi);
        }
        if self.contains(Sign::Negative) {
            let negated = kernel::neg(rhs.lo, rhs.hi);
            result.union_in(negated.lo, negated.hi);
        }
        if self.contains(Sign::Zero) {
            result.union_in(T::zero(), T::zero());
        }
        result
    }
}

impl<T> Mul<Interval<T>> for ValueSet<Sign>
where
    T: Element + Neg<Output = T> + Zero,
{
    type Output = Interval<T>;

    fn mul(self, rhs: Interval<T>) -> Interval<T> {
        self * &rhs
    }
}

impl<T> Interval<T>
where
    T: Element + Mul<Output = T> + Zero,
{
    /// `x²`, with the lower bound clamped to zero when `0 ∈ x`.
    pub fn square(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        let zero = T::zero();
        let lo2 = math::square(self.lo);
        let hi2 = math::square(self.hi);
        let lower = if self.lo <= zero && self.hi >= zero {
            zero
        } else {
            emin(lo2, hi2)
        };
        Interval::make(lower, emax(lo2, hi2))
    }
}

impl<T> Interval<T>
where
    T: Element + Neg<Output = T> + Zero,
{
    /// Absolute value: `[0, max(-lo, hi)]` when `0 ∈ x`, the reflected or
    /// unchanged interval otherwise.
    pub fn abs(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        let zero = T::zero();
        if self.lo <= zero && self.hi >= zero {
            Interval::make(zero, emax(-self.lo, self.hi))
        } else if self.lo < zero {
            Interval::make(-self.hi, -self.lo)
        } else {
            Interval::make(self.lo, self.hi)
        }
    }

    /// The set of signs the contained values may take.
    pub fn sgn(&self) -> ValueSet<Sign> {
        debug_assert!(self.assigned());
        let zero = T::zero();
        let mut result = ValueSet::new();
        if self.hi > zero {
            result.assign(Sign::Positive);
        }
        if self.lo < zero {
            result.assign(Sign::Negative);
        }
        if self.lo <= zero && self.hi >= zero {
            result.assign(Sign::Zero);
        }
        result
    }
}

// Compute x⋅y but impose that 0⋅∞ = 0.
fn multiply_0_scalar<T: Float>(x: T, y: T) -> T {
    let result = x * y;
    if result.is_nan()
        && ((x.is_infinite() && y == T::zero()) || (y.is_infinite() && x == T::zero()))
    {
        return T::zero();
    }
    result
}

fn multiply_0<T: Element + Float>(alo: T, ahi: T, blo: T, bhi: T) -> Interval<T> {
    let v1 = multiply_0_scalar(alo, blo);
    let v2 = multiply_0_scalar(alo, bhi);
    let v3 = multiply_0_scalar(ahi, blo);
    let v4 = multiply_0_scalar(ahi, bhi);
    Interval::make(emin(emin(v1, v2), emin(v3, v4)), emax(emax(v1, v2), emax(v3, v4)))
}

fn as_integer<T: Float>(y: T) -> Option<i64> {
    let yi = y.to_i64()?;
    if T::from(yi) == Some(y) {
        Some(yi)
    } else {
        None
    }
}

impl<T> Interval<T>
where
    T: Element + Float,
{
    /// Square root. Requires `lo ≥ 0`.
    pub fn sqrt(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(math::sqrt(self.lo), math::sqrt(self.hi))
    }

    /// Cube root.
    pub fn cbrt(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(self.lo.cbrt(), self.hi.cbrt())
    }

    /// Natural logarithm. Requires `lo ≥ 0`; `ln(0) = -∞`.
    pub fn ln(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(math::ln(self.lo), math::ln(self.hi))
    }

    /// Natural exponential.
    pub fn exp(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(self.lo.exp(), self.hi.exp())
    }

    /// `x^y`, split on the sign of the base.
    ///
    /// The non-negative part evaluates `exp(y · ln(max(0, x)))` with the
    /// internal convention `0·∞ := 0`; consequently `pow(0, y)` for negative
    /// `y` follows the host library (`ln(0) = -∞`, so the result is `+∞`).
    /// The negative part is defined only for a singleton integer exponent;
    /// any other exponent yields the NaN sentinel.
    pub fn pow(&self, y: impl IntervalArg<T>) -> Interval<T> {
        debug_assert!(self.assigned() && y.is_assigned());
        let zero = T::zero();
        let (ylo, yhi) = (y.lo(), y.hi());
        let mut result = Interval::empty();
        if self.hi >= zero {
            // non-negative part of the base
            let clamped = Interval::make(emax(zero, self.lo), emax(zero, self.hi));
            let ln = clamped.ln();
            let exponent = multiply_0(ylo, yhi, ln.lo, ln.hi);
            let part = exponent.exp();
            result.union_in(part.lo, part.hi);
        }
        if self.lo < zero {
            // negative part of the base
            let Some(yi) = (if ylo == yhi { as_integer(ylo) } else { None }) else {
                return Interval::nan_interval();
            };
            let sign = if yi % 2 == 0 {
                Sign::Positive
            } else {
                Sign::Negative
            };
            let negated = kernel::neg(self.lo, self.hi);
            let clamped = Interval::make(emax(zero, negated.lo), emax(zero, negated.hi));
            let ln = clamped.ln();
            let magnitude = multiply_0(ylo, ylo, ln.lo, ln.hi).exp();
            let part = sign * &magnitude;
            result.union_in(part.lo, part.hi);
        }
        result
    }

    /// Arc sine. Requires `x ⊆ [-1, 1]`.
    pub fn asin(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(math::asin(self.lo), math::asin(self.hi))
    }

    /// Arc cosine. Requires `x ⊆ [-1, 1]`.
    pub fn acos(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(math::acos(self.hi), math::acos(self.lo))
    }

    /// Arc tangent.
    pub fn atan(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(self.lo.atan(), self.hi.atan())
    }

    /// Quadrant-aware arc tangent of `self = y` and `x`.
    ///
    /// Yields the NaN sentinel when the operand box overlaps the branch cut
    /// `x ≤ 0 ∧ y = 0`; otherwise the transpose of min/max over the four
    /// corners.
    pub fn atan2(&self, x: impl IntervalArg<T>) -> Interval<T> {
        debug_assert!(self.assigned() && x.is_assigned());
        let zero = T::zero();
        let (xlo, xhi) = (x.lo(), x.hi());
        if xlo <= zero && self.lo <= zero && zero <= self.hi {
            return Interval::nan_interval();
        }
        // after the branch-cut rejection every corner is a valid point
        let v1 = math::atan2(self.lo, xlo);
        let v2 = math::atan2(self.lo, xhi);
        let v3 = math::atan2(self.hi, xlo);
        let v4 = math::atan2(self.hi, xhi);
        Interval::make(emin(emin(v1, v2), emin(v3, v4)), emax(emax(v1, v2), emax(v3, v4)))
    }

    /// Largest integer-valued bounds not above the operand's.
    pub fn floor(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(self.lo.floor(), self.hi.floor())
    }

    /// Smallest integer-valued bounds not below the operand's.
    pub fn ceil(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        Interval::make(self.lo.ceil(), self.hi.ceil())
    }

    /// Fractional part `x - ⌊x⌋`; collapses to `[0, 1]` when the bounds lie
    /// in different unit cells.
    pub fn frac(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        if self.lo.floor() != self.hi.floor() {
            return Interval::make(T::zero(), T::one());
        }
        Interval::make(math::frac(self.lo), math::frac(self.hi))
    }

    /// Whether the contained values may be infinite.
    pub fn is_infinite(&self) -> Logical {
        debug_assert!(self.assigned());
        let mut result = Logical::new();
        if self.lo.is_infinite() || self.hi.is_infinite() {
            result.assign(true);
        }
        if self.lo < self.hi || (self.lo == self.hi && !self.lo.is_infinite()) {
            result.assign(false);
        }
        result
    }

    /// Whether the contained values may be finite.
    pub fn is_finite(&self) -> Logical {
        !self.is_infinite()
    }

    /// Whether the interval is (partly) the NaN sentinel: `{F, T}` when a
    /// bound is NaN, `{F}` otherwise.
    pub fn is_nan(&self) -> Logical {
        debug_assert!(self.assigned());
        if self.lo.is_nan() || self.hi.is_nan() {
            Logical::of(&[false, true])
        } else {
            Logical::from(false)
        }
    }
}

impl<T> Interval<T>
where
    T: Element + Float + FloatConst,
{
    /// Cosine, via a one-wrap reduction of the lower bound into `[-π, π]`.
    ///
    /// An interval spanning more than one period yields `[-1, 1]`.
    pub fn cos(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        let pi = T::PI();
        let lo = math::wraparound(self.lo, -pi, pi);
        let delta = lo - self.lo;
        let hi = self.hi + delta;
        if lo <= T::zero() {
            if hi <= T::zero() {
                return Interval::make(lo.cos(), hi.cos());
            } else if hi <= pi {
                return Interval::make(emin(lo.cos(), hi.cos()), T::one());
            }
        } else {
            // 0 < lo < π
            if hi <= pi {
                return Interval::make(hi.cos(), lo.cos());
            } else if hi <= pi + pi {
                return Interval::make(-T::one(), emax(lo.cos(), hi.cos()));
            }
        }
        Interval::make(-T::one(), T::one())
    }

    /// Sine: `cos(x - π/2)`.
    pub fn sin(&self) -> Interval<T> {
        let shifted = self - T::FRAC_PI_2();
        shifted.cos()
    }

    /// Tangent, via a one-wrap reduction into `[-π/2, π/2]`; an interval
    /// spanning a full period yields `[-∞, +∞]`.
    pub fn tan(&self) -> Interval<T> {
        debug_assert!(self.assigned());
        let half_pi = T::FRAC_PI_2();
        let lo = math::wraparound(self.lo, -half_pi, half_pi);
        let delta = lo - self.lo;
        let hi = self.hi + delta;
        if hi - lo >= T::PI() {
            return Interval::make(T::neg_infinity(), T::infinity());
        }
        Interval::make(lo.tan(), hi.tan())
    }
}

/// The pair `(a/(a+b), b/(a+b))` with cross bounds, so that the two weights
/// cannot inflate independently.
///
/// Requires `a ≥ 0`, `b ≥ 0` and `a + b > 0` over the whole box.
pub fn fractional_weights<T: Element + Float>(
    a: &Interval<T>,
    b: &Interval<T>,
) -> (Interval<T>, Interval<T>) {
    debug_assert!(a.assigned() && b.assigned());
    debug_assert!(a.lo >= T::zero());
    debug_assert!(b.lo >= T::zero());
    debug_assert!(a.lo + b.lo > T::zero());
    (
        Interval::make(a.lo / (a.lo + b.hi), a.hi / (a.hi + b.lo)),
        Interval::make(b.lo / (a.hi + b.lo), b.hi / (a.lo + b.hi)),
    )
}
