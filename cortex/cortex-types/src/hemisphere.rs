//! Hemisphere selectors and per-hemisphere containers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cerebral hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    /// Left hemisphere (lower half of any merged index space).
    Left,
    /// Right hemisphere.
    Right,
}

impl Hemisphere {
    /// Both hemispheres, left first.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// Short conventional name ("lh" / "rh").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "lh",
            Self::Right => "rh",
        }
    }

    /// Sign used when labelling voxels by hemisphere: -1 left, +1 right.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per hemisphere.
///
/// # Example
///
/// ```
/// use cortex_types::{Hemisphere, HemispherePair};
///
/// let counts = HemispherePair::new(120, 118);
/// assert_eq!(*counts.get(Hemisphere::Right), 118);
///
/// let doubled = counts.map(|_, c| c * 2);
/// assert_eq!(doubled.left, 240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HemispherePair<T> {
    /// Left hemisphere value.
    pub left: T,
    /// Right hemisphere value.
    pub right: T,
}

impl<T> HemispherePair<T> {
    /// Create a pair from left and right values.
    #[inline]
    pub const fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Borrow the value for one hemisphere.
    #[inline]
    pub const fn get(&self, hemisphere: Hemisphere) -> &T {
        match hemisphere {
            Hemisphere::Left => &self.left,
            Hemisphere::Right => &self.right,
        }
    }

    /// Mutably borrow the value for one hemisphere.
    #[inline]
    pub fn get_mut(&mut self, hemisphere: Hemisphere) -> &mut T {
        match hemisphere {
            Hemisphere::Left => &mut self.left,
            Hemisphere::Right => &mut self.right,
        }
    }

    /// Borrow both values.
    #[inline]
    pub const fn as_ref(&self) -> HemispherePair<&T> {
        HemispherePair {
            left: &self.left,
            right: &self.right,
        }
    }

    /// Apply `f` to each hemisphere, left first.
    pub fn map<U>(self, mut f: impl FnMut(Hemisphere, T) -> U) -> HemispherePair<U> {
        let left = f(Hemisphere::Left, self.left);
        let right = f(Hemisphere::Right, self.right);
        HemispherePair { left, right }
    }

    /// Apply a fallible `f` to each hemisphere, left first, stopping at the
    /// first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(Hemisphere, T) -> Result<U, E>,
    ) -> Result<HemispherePair<U>, E> {
        let left = f(Hemisphere::Left, self.left)?;
        let right = f(Hemisphere::Right, self.right)?;
        Ok(HemispherePair { left, right })
    }

    /// Iterate over `(hemisphere, value)` pairs, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Hemisphere, &T)> {
        [(Hemisphere::Left, &self.left), (Hemisphere::Right, &self.right)].into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_names_and_signs() {
        assert_eq!(Hemisphere::Left.as_str(), "lh");
        assert_eq!(format!("{}", Hemisphere::Right), "rh");
        assert_eq!(Hemisphere::Left.sign(), -1);
        assert_eq!(Hemisphere::Right.sign(), 1);
    }

    #[test]
    fn pair_access() {
        let mut pair = HemispherePair::new(vec![1.0], vec![2.0, 3.0]);
        pair.get_mut(Hemisphere::Left).push(4.0);
        assert_eq!(pair.get(Hemisphere::Left).len(), 2);

        let lens: Vec<_> = pair.iter().map(|(h, v)| (h, v.len())).collect();
        assert_eq!(lens, vec![(Hemisphere::Left, 2), (Hemisphere::Right, 2)]);
    }

    #[test]
    fn try_map_stops_on_error() {
        let pair = HemispherePair::new(1, -1);
        let out: Result<HemispherePair<u32>, String> = pair.try_map(|h, v| {
            u32::try_from(v).map_err(|_| format!("{h} negative"))
        });
        assert_eq!(out.unwrap_err(), "rh negative");
    }
}
