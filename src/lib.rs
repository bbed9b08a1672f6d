#![cfg_attr(docsrs, feature(doc_cfg))]

//! # enclosure: verified computation on bounded scalars and discrete sets
//!
//! Write a numeric routine once, then evaluate it on plain scalars or on
//! bounded values: a closed [`Interval`] for floating-point, integer, and
//! index kinds, or a [`ValueSet`] over the enumerated values of a discrete
//! type. In the bounded case every operation returns a conservative
//! enclosure of the true result range.
//!
//! Comparisons of bounded values cannot always be decided, so they produce a
//! four-valued truth ([`Logical`]) queried through [`possibly`],
//! [`possibly_not`], [`always`], [`never`] and [`contingent`]. Branches are
//! evaluated for every possibly-taken side and merged back together with
//! [`assign_partial`] or [`if_else`]:
//!
//! ```
//! use enclosure::prelude::*;
//!
//! let x = Interval::new(0.0, 4.0);
//! let y = Interval::new(1.0, 2.0);
//!
//! let mut max = Interval::empty();
//! let cond = x.ge(&y);
//! if possibly(&cond) {
//!     assign_partial(&mut max, constrain(&x, &cond));
//! }
//! if possibly_not(&cond) {
//!     assign_partial(&mut max, constrain(&y, &!cond));
//! }
//! assert!(max.matches(&Interval::new(1.0, 4.0)));
//! ```
//!
//! The [`constrain`] calls above are what keeps the result tight: a
//! comparison captures its operands *by identity*, and under a condition
//! that was only partially true, each operand can be narrowed to the part on
//! which the condition still holds before the branches are merged. Without
//! them the merge would yield the loose hull `[0, 4]`.
//!
//! Sorted supports are searched with [`lower_bound`](algorithm::lower_bound)
//! / [`upper_bound`](algorithm::upper_bound) /
//! [`partition_point`](algorithm::partition_point), which return an interval
//! of insertion positions plus
//! a partitioning witness that can narrow the search key; see
//! `tests/interpolation.rs` for complete interpolation routines built from
//! these pieces.
//!
//! # Undefined results
//!
//! Arithmetic whose result is undefined on part of the input box (`∞ − ∞`,
//! `0 · ∞`, `0/0`, `∞/∞`, `atan2` on the branch cut, `pow` of a negative
//! base with a fractional exponent) yields the NaN sentinel interval;
//! [`Interval::is_nan`] reports it as `{F, T}`. All other contract
//! violations fail fast with an assertion, or are reported as [`Error`]
//! through the `try_`/`_strict` variants.

pub mod check;
pub mod error;
pub mod numeric;
pub mod sign;

pub mod logic;
pub mod set;

pub mod interval;

pub mod constraint;

pub mod algorithm;
pub mod math;
pub mod merge;

mod display;

pub use crate::constraint::{constrain, try_constrain, Constrained, Constraint};
pub use crate::error::Error;
pub use crate::interval::{Interval, IntervalArg};
pub use crate::logic::{always, contingent, never, possibly, possibly_not, Logical};
pub use crate::merge::{assign, assign_partial, if_else, reset};
pub use crate::set::ValueSet;

#[allow(unused_imports)]
pub mod prelude {
    pub use crate::algorithm::{
        at, enumerate, lower_bound, partition_point, upper_bound, Enclose, Enumerate,
    };
    pub use crate::constraint::{constrain, try_constrain, Constrained, Constraint};
    pub use crate::error::Error;
    pub use crate::interval::{fractional_weights, Identity, Interval, IntervalArg};
    pub use crate::logic::{
        always, contingent, never, possibly, possibly_not, Logical, Truth,
    };
    pub use crate::merge::{assign, assign_partial, if_else, reset, Assign};
    pub use crate::numeric::{Discrete, Element, Side};
    pub use crate::set::{Enumerable, ValueSet};
    pub use crate::sign::{sgn, Sign};
}
