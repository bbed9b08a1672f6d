//! Range algorithms over sorted slices, with four-valued predicates.
//!
//! [`partition_point`] bisects a partitioned range. When the predicate is
//! two-valued the result is a singleton position; when it returns a
//! four-valued truth the result is an *interval of positions* bracketing
//! every index at which the true partition point could lie. Either way the
//! call also returns a [`Partitioning`] witness binding the range and
//! predicate, whose [`at`](Partitioning::at) method recovers the constraint
//! "`range[i-1]` satisfies the predicate and `range[i]` does not" for later
//! use with [`constrain`](crate::constraint::constrain).
//!
//! [`at`] reads a range at an interval of indices, producing the envelope of
//! all reachable elements; [`enumerate`] yields the members of a scalar, a
//! [`ValueSet`], or a discrete interval one by one.

use itertools::Itertools;

use crate::constraint::{Constrained, Constraint, ConstraintRule, Operand};
use crate::error::Error;
use crate::interval::{emax, emin, Identity, Interval};
use crate::logic::Truth;
use crate::numeric::{Discrete, Element, Side};
use crate::set::{Enumerable, ValueSet, ValueSetIter};

/// First index at which `pred` is false, assuming `pred` partitions the
/// range into a true prefix and a false suffix.
fn partition_index<E>(range: &[E], mut pred: impl FnMut(&E) -> bool) -> usize {
    let mut lo = 0;
    let mut hi = range.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(&range[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Witness of a bisection: the range searched and the predicate used.
#[derive(Debug, Clone, Copy)]
pub struct Partitioning<'r, E, P> {
    range: &'r [E],
    predicate: P,
}

impl<'r, E, P> Partitioning<'r, E, P> {
    /// The constraint that position `index` partitions the range:
    /// the predicate holds at `index - 1` and fails at `index` (either side
    /// omitted at the range boundary).
    pub fn at(&self, index: impl Into<Interval<usize>>) -> PartitionConstraint<'_, 'r, E, P> {
        PartitionConstraint {
            partitioning: self,
            index: index.into(),
        }
    }
}

/// The constraint recovered from a [`Partitioning`] at a given insertion
/// position; consumable by [`constrain`](crate::constraint::constrain) when
/// the predicate produces identity-carrying [`Constraint`]s.
#[derive(Debug)]
pub struct PartitionConstraint<'p, 'r, E, P> {
    partitioning: &'p Partitioning<'r, E, P>,
    index: Interval<usize>,
}

impl<'p, 'r, E, S, P> ConstraintRule<S> for PartitionConstraint<'p, 'r, E, P>
where
    S: Element,
    P: Fn(&E) -> Constraint<S>,
{
    fn try_narrow(&self, lo: S, hi: S, origin: Identity) -> Result<(S, S), Error> {
        let range = self.partitioning.range;
        if range.is_empty() {
            return Ok((lo, hi));
        }
        assert!(self.index.assigned());
        let ilo = self.index.lower();
        let ihi = self.index.upper();
        assert!(ihi <= range.len());

        // the element below the lowest position satisfies the predicate
        let (l1, h1) = if ilo > 0 {
            (self.partitioning.predicate)(&range[ilo - 1]).try_narrow(lo, hi, origin)?
        } else {
            (lo, hi)
        };
        // the element at the highest position does not
        let (l2, h2) = if ihi < range.len() {
            (!(self.partitioning.predicate)(&range[ihi])).try_narrow(lo, hi, origin)?
        } else {
            (lo, hi)
        };

        // the two narrowings must overlap
        debug_assert!(!(h1 < l2) && !(l1 > h2));
        Ok((emax(l1, l2), emin(h1, h2)))
    }
}

/// Bisects a range partitioned by `predicate`.
///
/// Returns the interval of insertion positions — `[first index not always
/// satisfying, first index not possibly satisfying]`, a singleton for a
/// two-valued predicate — together with the [`Partitioning`] witness.
///
/// The predicate must partition the range in the `always` and the `possibly`
/// senses; the range must be non-empty.
pub fn partition_point<E, C, P>(range: &[E], predicate: P) -> (Partitioning<'_, E, P>, Interval<usize>)
where
    C: Truth,
    P: Fn(&E) -> C,
{
    assert!(!range.is_empty(), "cannot partition an empty range");
    let lo = partition_index(range, |e| predicate(e).always());
    let hi = partition_index(range, |e| predicate(e).possibly());
    let pos = Interval::new(lo, hi);
    (Partitioning { range, predicate }, pos)
}

/// A search key for [`lower_bound`] / [`upper_bound`]: a plain scalar, an
/// interval, or a constrained interval.
///
/// Interval keys produce identity-carrying constraints, so the key itself
/// can later be narrowed through the partitioning witness.
pub trait SearchKey<E>: Copy {
    /// Truth kind of the derived predicates.
    type Truth: Truth;

    /// The relation `elem < self`.
    fn elem_lt(&self, elem: &E) -> Self::Truth;

    /// The relation `elem ≤ self`.
    fn elem_le(&self, elem: &E) -> Self::Truth;
}

impl<T: Element> SearchKey<T> for T {
    type Truth = bool;

    fn elem_lt(&self, elem: &T) -> bool {
        *elem < *self
    }

    fn elem_le(&self, elem: &T) -> bool {
        *elem <= *self
    }
}

impl<'a, T: Element> SearchKey<T> for &'a Interval<T> {
    type Truth = Constraint<T>;

    fn elem_lt(&self, elem: &T) -> Constraint<T> {
        Constraint::lt_parts(Operand::from_arg(elem), Operand::from_arg(self))
    }

    fn elem_le(&self, elem: &T) -> Constraint<T> {
        Constraint::le_parts(Operand::from_arg(elem), Operand::from_arg(self))
    }
}

impl<'a, T: Element> SearchKey<T> for &'a Constrained<T> {
    type Truth = Constraint<T>;

    fn elem_lt(&self, elem: &T) -> Constraint<T> {
        Constraint::lt_parts(Operand::from_arg(elem), Operand::from_arg(self))
    }

    fn elem_le(&self, elem: &T) -> Constraint<T> {
        Constraint::le_parts(Operand::from_arg(elem), Operand::from_arg(self))
    }
}

/// First position at which `key` could be inserted without breaking the
/// order, together with the partitioning witness.
///
/// The range must be sorted (checked under the `audit` feature).
pub fn lower_bound<'r, E, K>(
    range: &'r [E],
    key: K,
) -> (
    Partitioning<'r, E, impl Fn(&E) -> K::Truth>,
    Interval<usize>,
)
where
    E: PartialOrd,
    K: SearchKey<E>,
{
    crate::audit_assert!(
        range.iter().tuple_windows().all(|(a, b)| a <= b),
        "search range is not sorted"
    );
    partition_point(range, move |elem| key.elem_lt(elem))
}

/// Last position at which `key` could be inserted without breaking the
/// order, together with the partitioning witness.
///
/// The range must be sorted (checked under the `audit` feature).
pub fn upper_bound<'r, E, K>(
    range: &'r [E],
    key: K,
) -> (
    Partitioning<'r, E, impl Fn(&E) -> K::Truth>,
    Interval<usize>,
)
where
    E: PartialOrd,
    K: SearchKey<E>,
{
    crate::audit_assert!(
        range.iter().tuple_windows().all(|(a, b)| a <= b),
        "search range is not sorted"
    );
    partition_point(range, move |elem| key.elem_le(elem))
}

/// Element types with a canonical envelope: an [`Interval`] for numeric
/// kinds, a [`ValueSet`] for enumerable kinds.
pub trait Enclose: Copy {
    /// The envelope accumulated by [`at`].
    type Enclosure: Default;

    /// Unions `self` into the envelope.
    fn accumulate(self, into: &mut Self::Enclosure);
}

macro_rules! numeric_enclose_impl {
    ($($t:ty), +) => {
        $(
            impl Enclose for $t {
                type Enclosure = Interval<$t>;

                fn accumulate(self, into: &mut Interval<$t>) {
                    into.union_in(self, self);
                }
            }
        )+
    }
}

numeric_enclose_impl!(f32, f64, u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);

impl Enclose for bool {
    type Enclosure = ValueSet<bool>;

    fn accumulate(self, into: &mut ValueSet<bool>) {
        into.assign(self);
    }
}

/// The envelope of all elements `range[j]` for `j` in the index interval.
///
/// # Panics
///
/// Panics when the index interval is unassigned or reaches past the range.
pub fn at<E: Enclose>(range: &[E], index: &Interval<usize>) -> E::Enclosure {
    assert!(index.assigned());
    assert!(index.upper_unchecked() < range.len());
    let mut result = E::Enclosure::default();
    for i in index.lower()..=index.upper() {
        range[i].accumulate(&mut result);
    }
    result
}

/// Values whose members can be enumerated one by one: scalars, value sets,
/// and discrete (constrained) intervals.
pub trait Enumerate {
    /// Member type.
    type Item;

    /// Iterator over the members.
    type Iter: Iterator<Item = Self::Item>;

    /// Iterates over the members; the value must be assigned.
    fn enumerate(self) -> Self::Iter;
}

/// Iterates over the members of a scalar, set, or discrete interval.
pub fn enumerate<X: Enumerate>(x: X) -> X::Iter {
    x.enumerate()
}

macro_rules! scalar_enumerate_impl {
    ($($t:ty), +) => {
        $(
            impl Enumerate for $t {
                type Item = $t;
                type Iter = core::iter::Once<$t>;

                fn enumerate(self) -> Self::Iter {
                    core::iter::once(self)
                }
            }
        )+
    }
}

scalar_enumerate_impl!(f32, f64, u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);

impl Enumerate for bool {
    type Item = bool;
    type Iter = core::iter::Once<bool>;

    fn enumerate(self) -> Self::Iter {
        core::iter::once(self)
    }
}

impl<T: Enumerable> Enumerate for ValueSet<T> {
    type Item = T;
    type Iter = ValueSetIter<T>;

    fn enumerate(self) -> Self::Iter {
        assert!(self.assigned());
        self.iter()
    }
}

impl<'a, T: Enumerable> Enumerate for &'a ValueSet<T> {
    type Item = T;
    type Iter = ValueSetIter<T>;

    fn enumerate(self) -> Self::Iter {
        assert!(self.assigned());
        self.iter()
    }
}

/// Iterator over the members of a discrete interval.
#[derive(Debug, Clone)]
pub struct IntervalIter<T> {
    next: Option<T>,
    hi: T,
}

impl<T: Discrete> Iterator for IntervalIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        self.next = if current == self.hi {
            None
        } else {
            current.try_adjacent(Side::Right)
        };
        Some(current)
    }
}

impl<'a, T: Discrete> Enumerate for &'a Interval<T> {
    type Item = T;
    type Iter = IntervalIter<T>;

    fn enumerate(self) -> Self::Iter {
        assert!(self.assigned());
        IntervalIter {
            next: Some(self.lower()),
            hi: self.upper(),
        }
    }
}

impl<'a, T: Discrete> Enumerate for &'a Constrained<T> {
    type Item = T;
    type Iter = IntervalIter<T>;

    fn enumerate(self) -> Self::Iter {
        assert!(self.assigned());
        IntervalIter {
            next: Some(self.lower()),
            hi: self.upper(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::constrain;
    use crate::logic::{possibly, Logical};

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Color {
        Red,
        Green,
        Blue,
    }
    crate::enumerable_impl!(Color { Color::Red, Color::Green, Color::Blue });

    #[test]
    fn test_enumerate_scalars() {
        assert_eq!(enumerate(false).collect::<Vec<_>>(), vec![false]);
        assert_eq!(enumerate(42i32).collect::<Vec<_>>(), vec![42]);
        assert_eq!(enumerate(Color::Red).collect::<Vec<_>>(), vec![Color::Red]);
    }

    #[test]
    fn test_enumerate_sets() {
        assert_eq!(
            enumerate(Logical::of(&[false, true])).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert_eq!(
            enumerate(&ValueSet::of(&[Color::Green, Color::Blue])).collect::<Vec<_>>(),
            vec![Color::Green, Color::Blue]
        );
    }

    #[test]
    #[should_panic]
    fn test_enumerate_empty_set() {
        let _ = enumerate(ValueSet::<Color>::new());
    }

    #[test]
    fn test_enumerate_intervals() {
        assert_eq!(
            enumerate(&Interval::new(3, 5)).collect::<Vec<_>>(),
            vec![3, 4, 5]
        );
        assert_eq!(enumerate(&Interval::from(3)).collect::<Vec<_>>(), vec![3]);
        let x = Interval::new(0usize, 4);
        let xc = constrain(&x, &x.ge(2usize));
        assert_eq!(enumerate(&xc).collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    #[should_panic]
    fn test_enumerate_empty_interval() {
        let _ = enumerate(&Interval::<i32>::empty());
    }

    #[test]
    fn test_at_with_sets() {
        let colors = [Color::Blue, Color::Green, Color::Red];
        assert!(at(&colors, &Interval::new(0, 1)).matches_set(&ValueSet::of(&[Color::Green, Color::Blue])));
        assert!(at(&colors, &Interval::new(1, 2)).matches_set(&ValueSet::of(&[Color::Red, Color::Green])));
        assert!(at(&colors, &Interval::from(1)).matches(Color::Green));
    }

    #[test]
    fn test_at_with_intervals() {
        let numbers = [2i32, 4, 6, 8];
        assert!(at(&numbers, &Interval::new(0, 1)).matches(&Interval::new(2, 4)));
        assert!(at(&numbers, &Interval::new(0, 2)).matches(&Interval::new(2, 6)));
        assert!(at(&numbers, &Interval::from(1)).matches(4));
    }

    #[test]
    #[should_panic]
    fn test_at_out_of_bounds() {
        let numbers = [2, 4, 6, 8];
        let _ = at(&numbers, &Interval::new(1, 4));
    }

    #[test]
    fn test_partition_point_two_valued() {
        let xs = [1.0, 2.0, 4.0, 8.0];
        let (_, pos) = partition_point(&xs, |&x| x < 3.0);
        assert!(pos.matches(2usize));
    }

    #[test]
    fn test_partition_point_four_valued() {
        let xs = [1.0, 2.0, 4.0, 8.0];
        let x = Interval::new(1.5, 5.0);
        let (_, pos) = partition_point(&xs, |&e| Interval::from(e).lt(&x));
        assert!(pos.matches(&Interval::new(1usize, 3)));
    }

    #[test]
    fn test_lower_and_upper_bound() {
        let xs = [1.0, 2.0, 2.0, 4.0];
        let (_, pos) = lower_bound(&xs, 2.0);
        assert!(pos.matches(1usize));
        let (_, pos) = upper_bound(&xs, 2.0);
        assert!(pos.matches(3usize));

        let key = Interval::new(1.5, 5.0);
        let (_, pos) = lower_bound(&xs, &key);
        assert!(pos.matches(&Interval::new(1usize, 4)));
    }

    #[test]
    fn test_partitioning_witness_narrows_the_key() {
        let xs = [1.0, 2.0, 4.0, 8.0];
        let x = Interval::new(1.5, 5.0);
        let (partitioning, pos) = lower_bound(&xs, &x);
        assert!(pos.matches(&Interval::new(1usize, 3)));

        // position 2 imposes xs[1] ≤ x < xs[2]
        let xc = constrain(&x, &partitioning.at(2usize));
        assert!(xc.matches(&Interval::new(2.0, 4.0)));

        // a position sub-interval imposes only its outer elements
        let xc = constrain(&x, &partitioning.at(Interval::new(2usize, 3)));
        assert!(xc.matches(&Interval::new(2.0, 5.0)));

        // the full position interval cannot narrow further
        let xc = constrain(&x, &partitioning.at(pos.clone()));
        assert!(xc.matches(&x));

        // a key without identity in the predicate cannot be narrowed
        let y = Interval::new(1.5, 5.0);
        assert!(possibly(y.ge(0.0)));
        assert!(crate::constraint::try_constrain(&y, &partitioning.at(2usize)).is_err());
    }
}
