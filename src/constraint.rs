//! Relational constraints and identity-based narrowing.
//!
//! Comparing intervals yields a [`Constraint`]: a relational term that
//! carries its four-valued truth value under the current enclosures together
//! with snapshots of its operands and their identities. Constraints compose
//! with `&`, `|` and `!`, and are consumed by [`constrain`], which narrows an
//! interval to the part on which the constraint can still hold:
//!
//! ```
//! use enclosure::prelude::*;
//!
//! let x = Interval::new(0.0, 4.0);
//! let y = Interval::new(1.0, 2.0);
//! let cond = x.ge(&y);
//! assert!(possibly(&cond));
//! let xc = constrain(&x, &cond);
//! assert!(xc.matches(&Interval::new(1.0, 4.0)));
//! ```
//!
//! An operand matches the narrowed interval only *by identity*: the
//! constraint must have been built from that very interval value, not from
//! an arithmetic derivative of it. `constrain(&x, &(&x + 1.0).ge(0.0))`
//! fails — the temporary `x + 1` has an identity of its own.
//!
//! Narrowing an already-constrained interval is allowed and composes through
//! the origin identity. One obligation remains with the caller: a constraint
//! whose truth value was computed against the *original* enclosure may be
//! applied to a value that was since narrowed, and the library does not
//! re-derive the truth value at application time.

use core::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Sub};

use num_traits::{Float, Zero};

use crate::error::{Error, PreconditionError, UnrelatedConstraintError};
use crate::interval::{emax, emin, kernel, Identity, Interval, IntervalArg};
use crate::logic::{Logical, Truth};
use crate::numeric::Element;

/// Snapshot of a comparison operand: bounds plus the identity of the
/// interval it was taken from, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operand<T> {
    pub(crate) lo: T,
    pub(crate) hi: T,
    pub(crate) id: Option<Identity>,
}

impl<T: Element> Operand<T> {
    pub(crate) fn from_arg<A: IntervalArg<T>>(arg: &A) -> Self {
        Operand {
            lo: arg.lo(),
            hi: arg.hi(),
            id: arg.identity(),
        }
    }
}

#[derive(Debug, Clone)]
enum Node<T: Element> {
    /// A bare truth value with no relational structure.
    Leaf,
    /// lhs ≤ rhs
    Le(Operand<T>, Operand<T>),
    /// lhs < rhs
    Lt(Operand<T>, Operand<T>),
    /// lhs = rhs
    Eq(Operand<T>, Operand<T>),
    /// lhs ≠ rhs
    Ne(Operand<T>, Operand<T>),
    /// lhs ∧ rhs
    All(Box<Constraint<T>>, Box<Constraint<T>>),
    /// lhs ∨ rhs
    Any(Box<Constraint<T>>, Box<Constraint<T>>),
}

/// A relational expression over intervals, with its four-valued truth value
/// cached at construction time.
#[derive(Debug, Clone)]
pub struct Constraint<T: Element> {
    value: Logical,
    node: Node<T>,
}

fn lt_value<T: Element>(l: &Operand<T>, r: &Operand<T>) -> Logical {
    let mut result = Logical::new();
    if l.lo < r.hi {
        result.assign(true);
    }
    if l.hi >= r.lo {
        result.assign(false);
    }
    result
}

fn le_value<T: Element>(l: &Operand<T>, r: &Operand<T>) -> Logical {
    let mut result = Logical::new();
    if l.lo <= r.hi {
        result.assign(true);
    }
    if l.hi > r.lo {
        result.assign(false);
    }
    result
}

fn eq_value<T: Element>(l: &Operand<T>, r: &Operand<T>) -> Logical {
    if l.lo == l.hi && r.lo == r.hi && l.lo == r.lo {
        Logical::from(true)
    } else if r.hi >= l.lo && r.lo <= l.hi {
        Logical::of(&[false, true])
    } else {
        Logical::from(false)
    }
}

impl<T: Element> Constraint<T> {
    fn leaf(value: Logical) -> Self {
        Constraint {
            value,
            node: Node::Leaf,
        }
    }

    pub(crate) fn lt_parts(l: Operand<T>, r: Operand<T>) -> Self {
        Constraint {
            value: lt_value(&l, &r),
            node: Node::Lt(l, r),
        }
    }

    pub(crate) fn le_parts(l: Operand<T>, r: Operand<T>) -> Self {
        Constraint {
            value: le_value(&l, &r),
            node: Node::Le(l, r),
        }
    }

    pub(crate) fn eq_parts(l: Operand<T>, r: Operand<T>) -> Self {
        Constraint {
            value: eq_value(&l, &r),
            node: Node::Eq(l, r),
        }
    }

    pub(crate) fn ne_parts(l: Operand<T>, r: Operand<T>) -> Self {
        Constraint {
            value: !eq_value(&l, &r),
            node: Node::Ne(l, r),
        }
    }

    /// The four-valued truth value of the relation under the enclosures at
    /// the time the constraint was built.
    pub fn value(&self) -> Logical {
        self.value
    }

    fn mentions(&self, origin: Identity) -> bool {
        match &self.node {
            Node::Leaf => false,
            Node::Le(l, r) | Node::Lt(l, r) | Node::Eq(l, r) | Node::Ne(l, r) => {
                l.id == Some(origin) || r.id == Some(origin)
            }
            Node::All(a, b) | Node::Any(a, b) => a.mentions(origin) || b.mentions(origin),
        }
    }

    fn narrow(
        &self,
        xlo: T,
        xhi: T,
        origin: Identity,
        considered: &mut bool,
        optional: bool,
    ) -> (T, T) {
        match &self.node {
            Node::Leaf => (xlo, xhi),
            Node::Le(l, r) => {
                if l.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        // apply x ≤ rhs⁺
                        debug_assert!(!(xlo > r.hi));
                        return (xlo, emin(xhi, r.hi));
                    }
                    assert!(optional, "constraint can never hold");
                }
                if r.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        // apply lhs⁻ ≤ x
                        debug_assert!(!(l.lo > xhi));
                        return (emax(l.lo, xlo), xhi);
                    }
                    assert!(optional, "constraint can never hold");
                }
                (xlo, xhi)
            }
            Node::Lt(l, r) => {
                if l.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        // apply x < rhs⁺
                        debug_assert!(xlo < r.hi);
                        return (xlo, emin(xhi, r.hi.pred()));
                    }
                    assert!(optional, "constraint can never hold");
                }
                if r.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        // apply lhs⁻ < x
                        debug_assert!(l.lo < xhi);
                        return (emax(l.lo.succ(), xlo), xhi);
                    }
                    assert!(optional, "constraint can never hold");
                }
                (xlo, xhi)
            }
            Node::Eq(l, r) => {
                if l.id == Some(origin) || r.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        // the operand ranges must overlap
                        debug_assert!(!(r.hi < l.lo) && !(r.lo > l.hi));
                        return (
                            emax(xlo, emax(l.lo, r.lo)),
                            emin(xhi, emin(l.hi, r.hi)),
                        );
                    }
                    assert!(optional, "constraint can never hold");
                }
                (xlo, xhi)
            }
            Node::Ne(l, r) => {
                if l.id == Some(origin) || r.id == Some(origin) {
                    *considered = true;
                    if self.value.contains(true) {
                        debug_assert!(l.lo != r.hi || l.hi != r.lo);
                        // a discrete endpoint equal to the opposing singleton
                        // can be shaved off
                        if l.id == Some(origin) && l.lo != l.hi && r.lo == r.hi {
                            if l.lo == r.lo {
                                return (emax(xlo, l.lo.succ()), xhi);
                            } else if l.hi == r.lo {
                                return (xlo, emin(xhi, l.hi.pred()));
                            }
                        }
                        if r.id == Some(origin) && r.lo != r.hi && l.lo == l.hi {
                            if r.lo == l.lo {
                                return (emax(xlo, r.lo.succ()), xhi);
                            } else if r.hi == l.lo {
                                return (xlo, emin(xhi, r.hi.pred()));
                            }
                        }
                    } else {
                        assert!(optional, "constraint can never hold");
                    }
                }
                (xlo, xhi)
            }
            Node::All(a, b) => {
                let (l1, h1) = a.narrow(xlo, xhi, origin, considered, optional);
                let (l2, h2) = b.narrow(xlo, xhi, origin, considered, optional);
                if self.value.contains(true) {
                    // the two narrowings must overlap
                    debug_assert!(!(h1 < l2) && !(l1 > h2));
                    return (emax(l1, l2), emin(h1, h2));
                }
                // if the conjunction cannot hold and narrowing was not
                // optional, a nested call has already failed
                (xlo, xhi)
            }
            Node::Any(a, b) => {
                let mut c1 = false;
                let mut c2 = false;
                let (l1, h1) = a.narrow(xlo, xhi, origin, &mut c1, true);
                let (l2, h2) = b.narrow(xlo, xhi, origin, &mut c2, true);
                *considered |= c1 || c2;
                let from_lhs = c1 && a.value.contains(true);
                let from_rhs = c2 && b.value.contains(true);
                assert!(
                    self.value.contains(true) || optional,
                    "constraint can never hold"
                );
                if from_lhs && from_rhs {
                    (emin(l1, l2), emax(h1, h2))
                } else if from_lhs {
                    (l1, h1)
                } else if from_rhs {
                    (l2, h2)
                } else {
                    (xlo, xhi)
                }
            }
        }
    }
}

impl<T: Element> Truth for Constraint<T> {
    fn possibly(&self) -> bool {
        self.value.contains(true)
    }

    fn possibly_not(&self) -> bool {
        self.value.contains(false)
    }

    fn always(&self) -> bool {
        self.value.matches(true)
    }

    fn never(&self) -> bool {
        self.value.matches(false)
    }

    fn contingent(&self) -> bool {
        self.value.matches_set(&Logical::of(&[false, true]))
    }
}

impl<T: Element> Not for Constraint<T> {
    type Output = Constraint<T>;

    fn not(self) -> Constraint<T> {
        let value = !self.value;
        let node = match self.node {
            Node::Leaf => Node::Leaf,
            Node::Le(l, r) => Node::Lt(r, l),
            Node::Lt(l, r) => Node::Le(r, l),
            Node::Eq(l, r) => Node::Ne(l, r),
            Node::Ne(l, r) => Node::Eq(l, r),
            Node::All(a, b) => Node::Any(Box::new(!*a), Box::new(!*b)),
            Node::Any(a, b) => Node::All(Box::new(!*a), Box::new(!*b)),
        };
        Constraint { value, node }
    }
}

impl<T: Element> Not for &Constraint<T> {
    type Output = Constraint<T>;

    fn not(self) -> Constraint<T> {
        !self.clone()
    }
}

impl<T: Element> BitAnd for Constraint<T> {
    type Output = Constraint<T>;

    fn bitand(self, rhs: Constraint<T>) -> Constraint<T> {
        Constraint {
            value: self.value & rhs.value,
            node: Node::All(Box::new(self), Box::new(rhs)),
        }
    }
}

impl<T: Element> BitAnd<bool> for Constraint<T> {
    type Output = Constraint<T>;

    fn bitand(self, rhs: bool) -> Constraint<T> {
        self & Constraint::leaf(Logical::from(rhs))
    }
}

impl<T: Element> BitAnd<Logical> for Constraint<T> {
    type Output = Constraint<T>;

    fn bitand(self, rhs: Logical) -> Constraint<T> {
        self & Constraint::leaf(rhs)
    }
}

impl<T: Element> BitAnd<Constraint<T>> for bool {
    type Output = Constraint<T>;

    fn bitand(self, rhs: Constraint<T>) -> Constraint<T> {
        Constraint::leaf(Logical::from(self)) & rhs
    }
}

impl<T: Element> BitOr for Constraint<T> {
    type Output = Constraint<T>;

    fn bitor(self, rhs: Constraint<T>) -> Constraint<T> {
        Constraint {
            value: self.value | rhs.value,
            node: Node::Any(Box::new(self), Box::new(rhs)),
        }
    }
}

impl<T: Element> BitOr<bool> for Constraint<T> {
    type Output = Constraint<T>;

    fn bitor(self, rhs: bool) -> Constraint<T> {
        self | Constraint::leaf(Logical::from(rhs))
    }
}

impl<T: Element> BitOr<Logical> for Constraint<T> {
    type Output = Constraint<T>;

    fn bitor(self, rhs: Logical) -> Constraint<T> {
        self | Constraint::leaf(rhs)
    }
}

impl<T: Element> BitOr<Constraint<T>> for bool {
    type Output = Constraint<T>;

    fn bitor(self, rhs: Constraint<T>) -> Constraint<T> {
        Constraint::leaf(Logical::from(self)) | rhs
    }
}

/// An interval narrowed by [`constrain`], tagged with the identity of the
/// interval it descends from.
///
/// Behaves like a read-only interval in arithmetic and comparisons; further
/// comparisons capture the *origin's* identity, so a constrained interval
/// can be narrowed again.
#[derive(Debug, Clone, Copy)]
pub struct Constrained<T: Element> {
    lo: T,
    hi: T,
    origin: Identity,
}

impl<T: Element> Constrained<T> {
    /// The identity of the interval this value descends from.
    pub fn identity(&self) -> Identity {
        self.origin
    }

    /// Whether the narrowed interval holds at least one value.
    pub fn assigned(&self) -> bool {
        !(self.lo > self.hi)
    }

    /// The narrowed lower bound.
    pub fn lower(&self) -> T {
        debug_assert!(self.assigned());
        self.lo
    }

    /// The narrowed upper bound.
    pub fn upper(&self) -> T {
        debug_assert!(self.assigned());
        self.hi
    }

    /// The lower bound without the assignedness check.
    pub fn lower_unchecked(&self) -> T {
        self.lo
    }

    /// The upper bound without the assignedness check.
    pub fn upper_unchecked(&self) -> T {
        self.hi
    }

    /// The sole contained value.
    ///
    /// # Panics
    ///
    /// Panics unless the narrowed interval is a singleton.
    pub fn value(&self) -> T {
        if self.lo == self.hi {
            self.lo
        } else {
            panic!("interval does not hold exactly one value")
        }
    }

    /// Whether every value of `rhs` lies within the narrowed interval.
    pub fn contains(&self, rhs: impl IntervalArg<T>) -> bool {
        self.assigned() && rhs.lo() >= self.lo && rhs.hi() <= self.hi
    }

    /// Whether the narrowed interval has exactly the bounds of `rhs`.
    pub fn matches(&self, rhs: impl IntervalArg<T>) -> bool {
        self.lo == rhs.lo() && self.hi == rhs.hi()
    }

    /// A plain interval (with a fresh identity) holding the narrowed bounds.
    pub fn to_interval(&self) -> Interval<T> {
        Interval::make(self.lo, self.hi)
    }
}

impl<T: Element> IntervalArg<T> for Constrained<T> {
    fn lo(&self) -> T {
        self.lo
    }

    fn hi(&self) -> T {
        self.hi
    }

    fn identity(&self) -> Option<Identity> {
        Some(self.origin)
    }
}

impl<T: Element> IntervalArg<T> for &Constrained<T> {
    fn lo(&self) -> T {
        self.lo
    }

    fn hi(&self) -> T {
        self.hi
    }

    fn identity(&self) -> Option<Identity> {
        Some(self.origin)
    }
}

macro_rules! comparison_methods_impl {
    ($ty:ident) => {
        impl<T: Element> $ty<T> {
            /// Captures the relation `self < rhs`.
            pub fn lt(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::lt_parts(Operand::from_arg(self), Operand::from_arg(&rhs))
            }

            /// Captures the relation `self ≤ rhs`.
            pub fn le(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::le_parts(Operand::from_arg(self), Operand::from_arg(&rhs))
            }

            /// Captures the relation `self > rhs`.
            pub fn gt(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::lt_parts(Operand::from_arg(&rhs), Operand::from_arg(self))
            }

            /// Captures the relation `self ≥ rhs`.
            pub fn ge(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::le_parts(Operand::from_arg(&rhs), Operand::from_arg(self))
            }

            /// Captures the relation `self = rhs`.
            ///
            /// `{T}` only when both operands are the same singleton; `{F, T}`
            /// when the enclosures overlap; `{F}` when disjoint.
            pub fn eq(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::eq_parts(Operand::from_arg(self), Operand::from_arg(&rhs))
            }

            /// Captures the relation `self ≠ rhs`.
            pub fn ne(&self, rhs: impl IntervalArg<T>) -> Constraint<T> {
                debug_assert!(self.assigned() && rhs.is_assigned());
                Constraint::ne_parts(Operand::from_arg(self), Operand::from_arg(&rhs))
            }
        }
    };
}

comparison_methods_impl!(Interval);
comparison_methods_impl!(Constrained);

impl<T, R> Add<R> for &Constrained<T>
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

impl<T, R> Add<R> for Constrained<T>
where
    T: Element + Add<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn add(self, rhs: R) -> Interval<T> {
        &self + rhs
    }
}

impl<T, R> Sub<R> for &Constrained<T>
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

impl<T, R> Sub<R> for Constrained<T>
where
    T: Element + Sub<Output = T>,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn sub(self, rhs: R) -> Interval<T> {
        &self - rhs
    }
}

impl<T, R> Mul<R> for &Constrained<T>
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

impl<T, R> Mul<R> for Constrained<T>
where
    T: Element + Mul<Output = T> + Zero,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn mul(self, rhs: R) -> Interval<T> {
        &self * rhs
    }
}

impl<T, R> Div<R> for &Constrained<T>
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

impl<T, R> Div<R> for Constrained<T>
where
    T: Element + Float,
    R: IntervalArg<T>,
{
    type Output = Interval<T>;

    fn div(self, rhs: R) -> Interval<T> {
        &self / rhs
    }
}

impl<T> Neg for &Constrained<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Interval<T>;

    fn neg(self) -> Interval<T> {
        debug_assert!(self.assigned());
        kernel::neg(self.lo, self.hi)
    }
}

impl<T> Neg for Constrained<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Interval<T>;

    fn neg(self) -> Interval<T> {
        -&self
    }
}

/// An interval-valued target of [`constrain`]: a plain interval or one that
/// was already constrained.
pub trait Constrainable<T: Element>: IntervalArg<T> {
    /// The identity constraints are matched against.
    fn origin(&self) -> Identity;
}

impl<T: Element> Constrainable<T> for Interval<T> {
    fn origin(&self) -> Identity {
        self.id
    }
}

impl<T: Element> Constrainable<T> for Constrained<T> {
    fn origin(&self) -> Identity {
        self.origin
    }
}

/// A rule that can narrow an interval: a [`Constraint`] or a
/// [`PartitionConstraint`](crate::algorithm::PartitionConstraint).
pub trait ConstraintRule<T: Element> {
    /// Narrows the bounds `(lo, hi)` of the interval with identity `origin`.
    fn try_narrow(&self, lo: T, hi: T, origin: Identity) -> Result<(T, T), Error>;
}

impl<T: Element> ConstraintRule<T> for Constraint<T> {
    fn try_narrow(&self, lo: T, hi: T, origin: Identity) -> Result<(T, T), Error> {
        if !self.mentions(origin) {
            return Err(UnrelatedConstraintError::new(
                "no operand of the constraint was formed from the interval",
            )
            .into());
        }
        if !self.value.contains(true) {
            return Err(PreconditionError::new("constraint can never hold").into());
        }
        let mut considered = false;
        Ok(self.narrow(lo, hi, origin, &mut considered, false))
    }
}

/// Narrows `x` to the part on which `c` can still hold, or an error when `c`
/// never mentions `x` or can never hold.
pub fn try_constrain<T, X, C>(x: &X, c: &C) -> Result<Constrained<T>, Error>
where
    T: Element,
    X: Constrainable<T>,
    C: ConstraintRule<T>,
{
    debug_assert!(x.is_assigned());
    let (lo, hi) = c.try_narrow(x.lo(), x.hi(), x.origin())?;
    Ok(Constrained {
        lo,
        hi,
        origin: x.origin(),
    })
}

/// Narrows `x` to the part on which `c` can still hold.
///
/// # Panics
///
/// Panics when `c` never mentions `x` by identity, or when `c` can never
/// hold.
pub fn constrain<T, X, C>(x: &X, c: &C) -> Constrained<T>
where
    T: Element,
    X: Constrainable<T>,
    C: ConstraintRule<T>,
{
    match try_constrain(x, c) {
        Ok(narrowed) => narrowed,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{always, contingent, never, possibly, possibly_not};
    use crate::merge::assign_partial;

    fn ival(lo: f64, hi: f64) -> Interval<f64> {
        Interval::new(lo, hi)
    }

    #[test]
    fn test_comparison_values_against_scalars() {
        let x = ival(-1.5, 1.0);
        assert!(always(x.ge(-1.5)));
        assert!(never(x.lt(-1.5)));
        assert!(always(x.le(1.0)));
        assert!(never(x.gt(1.0)));
        assert!(contingent(x.le(0.0)));
        assert!(contingent(x.ge(0.0)));
        assert!(always(x.lt(2.0)));
        assert!(always(x.gt(-2.0)));
        assert!(contingent(x.eq(0.0)));
        assert!(never(x.eq(2.0)));
        assert!(always(Interval::from(1.0).eq(1.0)));
    }

    #[test]
    fn test_comparison_values_between_intervals() {
        let x = ival(-2.0, 1.0);
        let y = ival(1.0, 3.0);
        assert!(contingent(x.lt(&y)));
        assert!(always(x.le(&y)));
        assert!(contingent(y.ge(&ival(1.0, 2.0))));
        assert!(never(y.lt(&x)));
        assert!(contingent(x.eq(&y)));
        assert!(never(ival(4.0, 5.0).eq(&y)));
        assert!(contingent(ival(1.0, 3.0).eq(&ival(1.0, 3.0))));
    }

    // Rows of the x ≤ y narrowing table: x, y, expected x after
    // constrain(x, x ≤ y), expected y after constrain(y, x ≤ y).
    #[test]
    fn test_le_narrowing() {
        let rows: &[((f64, f64), (f64, f64), (f64, f64), (f64, f64))] = &[
            ((-2., -1.), (1., 1.), (-2., -1.), (1., 1.)),
            ((-2., 1.), (1., 1.), (-2., 1.), (1., 1.)),
            ((-2., 3.), (1., 1.), (-2., 1.), (1., 1.)),
            ((1., 3.), (1., 1.), (1., 1.), (1., 1.)),
            ((-2., -1.), (1., 3.), (-2., -1.), (1., 3.)),
            ((-2., 5.), (1., 3.), (-2., 3.), (1., 3.)),
            ((2., 5.), (1., 3.), (2., 3.), (2., 3.)),
            ((3., 5.), (1., 3.), (3., 3.), (3., 3.)),
        ];
        for &((xlo, xhi), (ylo, yhi), xc, yc) in rows {
            let x = ival(xlo, xhi);
            let y = ival(ylo, yhi);

            let cc = x.le(&y);
            assert!(possibly(&cc));
            assert!(constrain(&x, &cc).matches(&ival(xc.0, xc.1)));
            assert!(constrain(&y, &cc).matches(&ival(yc.0, yc.1)));

            // the flipped spelling narrows identically
            let cc = y.ge(&x);
            assert!(constrain(&x, &cc).matches(&ival(xc.0, xc.1)));
            assert!(constrain(&y, &cc).matches(&ival(yc.0, yc.1)));
        }
    }

    #[test]
    fn test_lt_narrowing_on_floats_equals_le() {
        let x = ival(-2.0, 3.0);
        let y = ival(1.0, 1.0);
        let cc = x.lt(&y);
        assert!(contingent(&cc));
        assert!(constrain(&x, &cc).matches(&ival(-2.0, 1.0)));
        assert!(constrain(&y, &cc).matches(&ival(1.0, 1.0)));
    }

    #[test]
    fn test_lt_narrowing_on_discrete_kinds_is_strict() {
        let x = Interval::new(0usize, 3);
        let y = Interval::new(2usize, 2);
        let cc = x.lt(&y);
        assert!(constrain(&x, &cc).matches(&Interval::new(0usize, 1)));
        let cc = x.gt(&Interval::new(1usize, 1));
        assert!(constrain(&x, &cc).matches(&Interval::new(2usize, 3)));
    }

    #[test]
    fn test_eq_narrowing() {
        let rows: &[((f64, f64), (f64, f64), (f64, f64))] = &[
            ((-2., 1.), (1., 3.), (1., 1.)),
            ((-2., 2.), (1., 3.), (1., 2.)),
            ((-2., 5.), (1., 3.), (1., 3.)),
            ((2., 5.), (1., 3.), (2., 3.)),
            ((3., 5.), (1., 3.), (3., 3.)),
        ];
        for &((xlo, xhi), (ylo, yhi), xyc) in rows {
            let x = ival(xlo, xhi);
            let y = ival(ylo, yhi);
            let cc = x.eq(&y);
            assert!(possibly(&cc));
            assert!(constrain(&x, &cc).matches(&ival(xyc.0, xyc.1)));
            assert!(constrain(&y, &cc).matches(&ival(xyc.0, xyc.1)));

            // x ≠ y, negated, narrows the same way
            let cc = x.ne(&y);
            assert!(possibly_not(&cc));
            assert!(constrain(&x, &!(&cc)).matches(&ival(xyc.0, xyc.1)));
        }
    }

    #[test]
    fn test_ne_narrowing_shaves_discrete_endpoints() {
        let x = Interval::new(0usize, 3);
        let cc = x.ne(0usize);
        assert!(constrain(&x, &cc).matches(&Interval::new(1usize, 3)));
        let cc = x.ne(3usize);
        assert!(constrain(&x, &cc).matches(&Interval::new(0usize, 2)));
        // interior values cannot be shaved
        let cc = x.ne(1usize);
        assert!(constrain(&x, &cc).matches(&x));
        // float endpoints cannot be shaved either
        let xf = ival(0., 3.);
        let cc = xf.ne(0.0);
        assert!(constrain(&xf, &cc).matches(&xf));
    }

    #[test]
    fn test_conjunction() {
        let x = ival(0.0, 7.0);
        let a = ival(1.0, 3.0);
        let b = ival(4.0, 6.0);

        let cc = x.ge(&a) & x.le(&b);
        assert!(contingent(&cc));
        assert!(constrain(&x, &cc).matches(&ival(1.0, 6.0)));

        let cc = a.le(&x) & b.ge(&x);
        assert!(constrain(&x, &cc).matches(&ival(1.0, 6.0)));

        // negated disjunction of the complements
        let cc = x.lt(&a) | x.gt(&b);
        assert!(possibly_not(&cc));
        assert!(constrain(&x, &!cc).matches(&ival(1.0, 6.0)));
    }

    #[test]
    fn test_conjunction_with_plain_truth() {
        let x = ival(0.0, 7.0);
        let cc = x.ge(2.0) & true;
        assert!(constrain(&x, &cc).matches(&ival(2.0, 7.0)));
        let cc = false | x.le(5.0);
        assert!(constrain(&x, &cc).matches(&ival(0.0, 5.0)));
    }

    #[test]
    fn test_disjunction() {
        let x = ival(0.0, 7.0);
        let a = ival(1.0, 4.0);
        let b = ival(2.0, 3.0);

        // both sides narrow: union of the narrowings
        let cc = x.ge(&a) | x.ge(&b);
        assert!(constrain(&x, &cc).matches(&ival(1.0, 7.0)));

        // one satisfiable side narrows
        let y = ival(5.0, 7.0);
        let cc = y.le(3.0) | y.ge(6.0);
        assert!(constrain(&y, &cc).matches(&ival(6.0, 7.0)));

        // a side that does not mention x leaves it unchanged
        let z = ival(0.0, 1.0);
        let cc = x.ge(5.0) | z.ge(0.5);
        assert!(constrain(&x, &cc).matches(&ival(5.0, 7.0)));
    }

    #[test]
    fn test_constraint_not_considered() {
        let x = ival(1.0, 1.0);
        let y = ival(2.0, 2.0);
        let a = ival(0.0, 0.0);

        let cx = x.ge(&a);
        assert!(try_constrain(&x, &cx).is_ok());

        // derived expression: x + 1 has its own identity
        let cxp1 = (&x + 1.0).ge(&a);
        assert!(matches!(
            try_constrain(&x, &cxp1),
            Err(Error::UnrelatedConstraintError(_))
        ));

        // constraint over an unrelated interval
        let cy = y.ge(&a);
        assert!(matches!(
            try_constrain(&x, &cy),
            Err(Error::UnrelatedConstraintError(_))
        ));
    }

    #[test]
    fn test_constraint_not_satisfiable() {
        let x = ival(1.0, 1.0);
        let a = ival(3.0, 3.0);
        assert!(matches!(
            try_constrain(&x, &x.eq(&a)),
            Err(Error::PreconditionError(_))
        ));
        assert!(matches!(
            try_constrain(&x, &x.ge(&a)),
            Err(Error::PreconditionError(_))
        ));
        assert!(matches!(
            try_constrain(&x, &a.lt(&x)),
            Err(Error::PreconditionError(_))
        ));
    }

    #[test]
    #[should_panic]
    fn test_constrain_panics_when_never_holds() {
        let x = ival(1.0, 1.0);
        let a = ival(3.0, 3.0);
        let _ = constrain(&x, &x.ge(&a));
    }

    #[test]
    fn test_disjunction_with_unsatisfiable_side() {
        let x = ival(1.0, 1.0);
        let y = ival(2.0, 2.0);
        let a = ival(3.0, 3.0);

        // the satisfiable side mentions y only; x stays unchanged
        let c = x.eq(&a) | y.lt(&a);
        assert!(possibly(&c));
        let xc = try_constrain(&x, &c).unwrap();
        assert!(xc.matches(&x));

        // neither side can hold
        let c = x.eq(&a) | y.eq(&a);
        assert!(matches!(
            try_constrain(&x, &c),
            Err(Error::PreconditionError(_))
        ));
    }

    #[test]
    fn test_constrained_composes() {
        let a = ival(4.0, 5.0);
        let ext = true;
        let c = a.le(3.0) | ext;
        assert!(possibly(&c));
        // the satisfiable side is the external condition: a stays unchanged
        let ac = constrain(&a, &c);
        assert!(ac.matches(&a));

        // a fresh constraint built from the constrained value narrows it
        let cc = ac.gt(4.0);
        assert!(possibly(&cc));
        let ac2 = constrain(&ac, &cc);
        assert!(ac2.matches(&ival(4.0, 5.0)));

        // a fresh constraint against the original also applies through the
        // shared origin identity
        let cc = a.gt(4.0);
        let ac3 = constrain(&ac, &cc);
        assert!(ac3.matches(&ival(4.0, 5.0)));
    }

    #[test]
    fn test_constrained_arithmetic_and_values() {
        let x = ival(0.0, 4.0);
        let xc = constrain(&x, &x.ge(1.0));
        assert!(xc.matches(&ival(1.0, 4.0)));
        assert_eq!(xc.lower(), 1.0);
        assert_eq!(xc.upper(), 4.0);
        assert!(xc.contains(2.0));
        assert!((&xc + 1.0).matches(&ival(2.0, 5.0)));
        assert!((&xc - &ival(1.0, 1.0)).matches(&ival(0.0, 3.0)));
        assert!((&xc * 2.0).matches(&ival(2.0, 8.0)));
        assert!((&xc / 2.0).matches(&ival(0.5, 2.0)));
        assert!((-&xc).matches(&ival(-4.0, -1.0)));
        assert!(xc.to_interval().matches(&ival(1.0, 4.0)));
    }

    // Branch-merge max: without constraints the union is loose; narrowing
    // each branch by its condition recovers the tight hull.
    #[test]
    fn test_branch_merge_max() {
        fn max_naive(x: &Interval<f64>, y: &Interval<f64>) -> Interval<f64> {
            let mut result = Interval::empty();
            let cond = x.ge(y);
            if possibly(&cond) {
                assign_partial(&mut result, x);
            }
            if possibly_not(&cond) {
                assign_partial(&mut result, y);
            }
            result
        }

        fn max_constrained(x: &Interval<f64>, y: &Interval<f64>) -> Interval<f64> {
            let mut result = Interval::empty();
            let cond = x.ge(y);
            if possibly(&cond) {
                assign_partial(&mut result, constrain(x, &cond));
            }
            if possibly_not(&cond) {
                assign_partial(&mut result, constrain(y, &!cond));
            }
            result
        }

        assert!(max_naive(&ival(0., 2.), &ival(3., 4.)).matches(&ival(3., 4.)));
        assert!(max_naive(&ival(3., 4.), &ival(0., 2.)).matches(&ival(3., 4.)));
        assert!(max_naive(&ival(0., 4.), &ival(1., 2.)).matches(&ival(0., 4.)));

        assert!(max_constrained(&ival(0., 2.), &ival(3., 4.)).matches(&ival(3., 4.)));
        assert!(max_constrained(&ival(3., 4.), &ival(0., 2.)).matches(&ival(3., 4.)));
        // the constrained merge is tighter than the naive one
        assert!(max_constrained(&ival(0., 4.), &ival(1., 2.)).matches(&ival(1., 4.)));
        assert!(max_constrained(&ival(0., 2.), &ival(1., 4.)).matches(&ival(1., 4.)));
    }
}
