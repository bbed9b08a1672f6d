//! Branch-merge operators.
//!
//! The pattern served here: evaluate each branch whose condition possibly
//! holds, then union the per-branch results into one output. For interval
//! and set outputs [`assign_partial`] is a set union; for plain scalars it
//! is an overwrite, so the same generic code runs on scalars and on bounded
//! values alike.
//!
//! ```
//! use enclosure::prelude::*;
//!
//! let x = Interval::new(0.0, 4.0);
//! let y = Interval::new(1.0, 2.0);
//! let mut out = Interval::empty();
//! let cond = x.ge(&y);
//! if possibly(&cond) {
//!     assign_partial(&mut out, constrain(&x, &cond));
//! }
//! if possibly_not(&cond) {
//!     assign_partial(&mut out, constrain(&y, &!cond));
//! }
//! assert!(out.matches(&Interval::new(1.0, 4.0)));
//! ```

use crate::interval::{Interval, IntervalArg};
use crate::logic::{Logical, Truth};
use crate::numeric::Element;
use crate::set::{Enumerable, ValueSet};

/// Branch-merge assignment for an output of kind `Self` from a value of
/// kind `R`.
pub trait Assign<R = Self> {
    /// Seeds an output that must not have been assigned yet. Plain scalars
    /// are always overwritten.
    fn assign(&mut self, rhs: R);

    /// Unions a branch result into the output (overwrite for scalars). The
    /// output may be empty.
    fn assign_partial(&mut self, rhs: R);

    /// Overwrites the output unconditionally.
    fn reset_to(&mut self, rhs: R);
}

impl<T, R> Assign<R> for Interval<T>
where
    T: Element,
    R: IntervalArg<T>,
{
    fn assign(&mut self, rhs: R) {
        assert!(!self.assigned(), "output already assigned");
        self.set_bounds(rhs.lo(), rhs.hi());
    }

    fn assign_partial(&mut self, rhs: R) {
        debug_assert!(rhs.is_assigned());
        self.union_in(rhs.lo(), rhs.hi());
    }

    fn reset_to(&mut self, rhs: R) {
        self.set_bounds(rhs.lo(), rhs.hi());
    }
}

impl<T: Enumerable> Assign<T> for ValueSet<T> {
    fn assign(&mut self, rhs: T) {
        assert!(!self.assigned(), "output already assigned");
        ValueSet::assign(self, rhs);
    }

    fn assign_partial(&mut self, rhs: T) {
        ValueSet::assign(self, rhs);
    }

    fn reset_to(&mut self, rhs: T) {
        self.reset();
        ValueSet::assign(self, rhs);
    }
}

impl<T: Enumerable> Assign<ValueSet<T>> for ValueSet<T> {
    fn assign(&mut self, rhs: ValueSet<T>) {
        assert!(!self.assigned(), "output already assigned");
        self.reset_to_set(&rhs);
    }

    fn assign_partial(&mut self, rhs: ValueSet<T>) {
        self.assign_set(&rhs);
    }

    fn reset_to(&mut self, rhs: ValueSet<T>) {
        self.reset_to_set(&rhs);
    }
}

impl<'a, T: Enumerable> Assign<&'a ValueSet<T>> for ValueSet<T> {
    fn assign(&mut self, rhs: &'a ValueSet<T>) {
        assert!(!self.assigned(), "output already assigned");
        self.reset_to_set(rhs);
    }

    fn assign_partial(&mut self, rhs: &'a ValueSet<T>) {
        self.assign_set(rhs);
    }

    fn reset_to(&mut self, rhs: &'a ValueSet<T>) {
        self.reset_to_set(rhs);
    }
}

macro_rules! scalar_assign_impl {
    ($($t:ty), +) => {
        $(
            impl Assign for $t {
                fn assign(&mut self, rhs: $t) {
                    *self = rhs;
                }

                fn assign_partial(&mut self, rhs: $t) {
                    *self = rhs;
                }

                fn reset_to(&mut self, rhs: $t) {
                    *self = rhs;
                }
            }
        )+
    }
}

scalar_assign_impl!(f32, f64, u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);

/// Seeds `out` with a first value; `out` must be empty (scalars are
/// overwritten).
pub fn assign<V: Assign<R>, R>(out: &mut V, rhs: R) {
    out.assign(rhs);
}

/// Unions a branch result into `out` (overwrites scalars).
pub fn assign_partial<V: Assign<R>, R>(out: &mut V, rhs: R) {
    out.assign_partial(rhs);
}

/// Overwrites `out` unconditionally.
pub fn reset<V: Assign<R>, R>(out: &mut V, rhs: R) {
    out.reset_to(rhs);
}

/// Condition kinds usable with [`if_else`].
pub trait IfElse<V> {
    /// Selects or merges the two branch values.
    fn if_else(self, if_true: V, if_false: V) -> V;
}

impl<V> IfElse<V> for bool {
    fn if_else(self, if_true: V, if_false: V) -> V {
        if self {
            if_true
        } else {
            if_false
        }
    }
}

impl<V> IfElse<V> for Logical
where
    V: Default + Assign<V>,
{
    fn if_else(self, if_true: V, if_false: V) -> V {
        let mut result = V::default();
        if self.possibly() {
            result.assign_partial(if_true);
        }
        if self.possibly_not() {
            result.assign_partial(if_false);
        }
        result
    }
}

impl<V, T> IfElse<V> for crate::constraint::Constraint<T>
where
    T: Element,
    V: Default + Assign<V>,
{
    fn if_else(self, if_true: V, if_false: V) -> V {
        let mut result = V::default();
        if self.possibly() {
            result.assign_partial(if_true);
        }
        if self.possibly_not() {
            result.assign_partial(if_false);
        }
        result
    }
}

/// Merges the branch values of a condition: a `bool` picks one branch, a
/// four-valued condition contributes the `true` branch under `possibly` and
/// the `false` branch under `possibly_not`.
pub fn if_else<C: IfElse<V>, V>(cond: C, if_true: V, if_false: V) -> V {
    cond.if_else(if_true, if_false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::possibly;

    fn ival(lo: f64, hi: f64) -> Interval<f64> {
        Interval::new(lo, hi)
    }

    #[test]
    fn test_assign_seeds_an_empty_interval() {
        let mut out = Interval::empty();
        assign(&mut out, &ival(1., 2.));
        assert!(out.matches(&ival(1., 2.)));
    }

    #[test]
    #[should_panic]
    fn test_assign_rejects_an_assigned_interval() {
        let mut out = ival(0., 1.);
        assign(&mut out, 2.0);
    }

    #[test]
    fn test_assign_partial_is_a_union() {
        let mut out = Interval::empty();
        assign_partial(&mut out, 1.5);
        assert!(out.matches(1.5));
        assign_partial(&mut out, &ival(3., 4.));
        assert!(out.matches(&ival(1.5, 4.)));
        assign_partial(&mut out, &ival(0., 2.));
        assert!(out.matches(&ival(0., 4.)));
        // already-covered values change nothing
        assign_partial(&mut out, 2.0);
        assert!(out.matches(&ival(0., 4.)));
    }

    #[test]
    fn test_reset_overwrites() {
        let mut out = ival(0., 4.);
        reset(&mut out, &ival(1., 2.));
        assert!(out.matches(&ival(1., 2.)));
    }

    #[test]
    fn test_scalar_assignment_overwrites() {
        let mut out = 0.0;
        assign(&mut out, 1.0);
        assign_partial(&mut out, 2.0);
        assert_eq!(out, 2.0);
        reset(&mut out, 3.0);
        assert_eq!(out, 3.0);
    }

    #[test]
    fn test_set_assignment() {
        let mut out = Logical::new();
        assign_partial(&mut out, true);
        assert!(out.matches(true));
        assign_partial(&mut out, Logical::from(false));
        assert!(possibly(out) && out.contains(false));
    }

    #[test]
    fn test_if_else_with_bool() {
        assert!(if_else(true, ival(1., 2.), ival(3., 4.)).matches(&ival(1., 2.)));
        assert!(if_else(false, ival(1., 2.), ival(3., 4.)).matches(&ival(3., 4.)));
        assert_eq!(if_else(true, 1.0, 2.0), 1.0);
    }

    #[test]
    fn test_if_else_with_logical() {
        let both = Logical::of(&[false, true]);
        assert!(if_else(both, ival(1., 2.), ival(3., 4.)).matches(&ival(1., 4.)));
        assert!(if_else(Logical::from(true), ival(1., 2.), ival(3., 4.)).matches(&ival(1., 2.)));
        assert!(if_else(Logical::from(false), ival(1., 2.), ival(3., 4.)).matches(&ival(3., 4.)));
        assert!(
            if_else(Logical::from(true), Interval::from(1.), ival(3., 4.)).matches(1.)
        );
    }

    #[test]
    fn test_if_else_with_constraint() {
        let x = ival(0., 4.);
        let cond = x.ge(2.0);
        assert!(if_else(cond, ival(1., 1.), ival(5., 5.)).matches(&ival(1., 5.)));
    }

    #[test]
    fn test_if_else_union_law_on_sets() {
        let both = Logical::of(&[false, true]);
        let merged = if_else(both, Logical::from(true), Logical::from(false));
        assert!(merged.contains(true) && merged.contains(false));
    }
}
