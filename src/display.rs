use core::fmt;

use crate::constraint::Constrained;
use crate::interval::Interval;
use crate::numeric::Element;
use crate::set::{Enumerable, ValueSet};

fn write_bounds<T>(f: &mut fmt::Formatter<'_>, lo: T, hi: T) -> fmt::Result
where
    T: Element + fmt::Display,
{
    if lo == hi {
        write!(f, "{}", lo)
    } else {
        write!(f, "[{}, {}]", lo, hi)
    }
}

impl<T: Element + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(self.assigned());
        write_bounds(f, self.lower_unchecked(), self.upper_unchecked())
    }
}

impl<T: Element + fmt::Display> fmt::Display for Constrained<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(self.assigned());
        write_bounds(f, self.lower_unchecked(), self.upper_unchecked())
    }
}

impl<T> fmt::Display for ValueSet<T>
where
    T: Enumerable + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        let mut first = true;
        for value in self.iter() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(" }")
    }
}
