//! Participant identifiers.
//!
//! Both protocols are specialized for exactly two participants, named `p0`
//! and `p1`. The [`Participant`] newtype-like enum keeps the binary id out of
//! raw integers everywhere except at the atomic `turn` cell.
use std::fmt;

/// One of the two parties sharing a mutual-exclusion instance.
///
/// # Invariants
///
/// - `index()` is always `0` or `1`
/// - `p.other().other() == p`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Participant {
    P0,
    P1,
}

impl Participant {
    /// Both participants, in index order.
    pub const ALL: [Participant; 2] = [Participant::P0, Participant::P1];

    /// Returns the raw id (`0` or `1`).
    pub fn index(self) -> usize {
        match self {
            Participant::P0 => 0,
            Participant::P1 => 1,
        }
    }

    /// Returns the peer participant.
    pub fn other(self) -> Self {
        match self {
            Participant::P0 => Participant::P1,
            Participant::P1 => Participant::P0,
        }
    }

    /// Converts a raw id back into a participant, or `None` if `index > 1`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Participant::P0),
            1 => Some(Participant::P1),
            _ => None,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for who in Participant::ALL {
            assert_eq!(Participant::from_index(who.index()), Some(who));
        }
        assert_eq!(Participant::from_index(2), None);
    }

    #[test]
    fn test_other() {
        assert_eq!(Participant::P0.other(), Participant::P1);
        assert_eq!(Participant::P1.other(), Participant::P0);
        assert_ne!(Participant::P0.other().index(), Participant::P0.index());
    }

    #[test]
    fn test_display() {
        assert_eq!(Participant::P0.to_string(), "p0");
        assert_eq!(Participant::P1.to_string(), "p1");
    }
}
