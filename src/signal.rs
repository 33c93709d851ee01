use std::fmt::{Debug, Display, Formatter};
use std::ops::{BitXor, Not};

/// Index of a node in the network arena.
///
/// Index 0 is reserved for the constant node.
pub type Node = u32;

/// A reference to the output of a node, together with a complement bit.
///
/// Ordering and hashing follow the packed form `(index << 1) | complement`,
/// so signals can be used as map keys.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signal {
    index: Node,
    complement: bool,
}

// Constructors
impl Signal {
    pub const fn new(index: Node, complement: bool) -> Self {
        Self { index, complement }
    }

    pub const fn zero() -> Self {
        Self::new(0, false)
    }

    pub const fn one() -> Self {
        Self::new(0, true)
    }

    /// Regular (non-complemented) signal pointing to `index`.
    pub const fn from_node(index: Node) -> Self {
        Self::new(index, false)
    }

    /// Unpack a signal from its `(index << 1) | complement` encoding.
    pub const fn from_raw(raw: u64) -> Self {
        Self::new((raw >> 1) as Node, raw & 1 != 0)
    }
}

// Getters
impl Signal {
    pub const fn node(self) -> Node {
        self.index
    }

    pub const fn is_complemented(self) -> bool {
        self.complement
    }

    /// Packed `(index << 1) | complement` encoding.
    pub const fn raw(self) -> u64 {
        ((self.index as u64) << 1) | self.complement as u64
    }

    pub const fn is_const(self) -> bool {
        self.index == 0
    }

    /// The same node, regular polarity.
    pub const fn positive(self) -> Self {
        Self::new(self.index, false)
    }

    /// The same node, complemented polarity.
    pub const fn negative(self) -> Self {
        Self::new(self.index, true)
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(self.index, !self.complement)
    }
}

impl Not for &Signal {
    type Output = Signal;

    fn not(self) -> Self::Output {
        !*self
    }
}

impl BitXor<bool> for Signal {
    type Output = Self;

    fn bitxor(self, complement: bool) -> Self::Output {
        Self::new(self.index, self.complement ^ complement)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_const() {
            write!(f, "{}", self.complement as u8)
        } else {
            if self.complement {
                write!(f, "!")?;
            }
            write!(f, "n{}", self.index)
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const() {
        let zero = Signal::zero();
        let one = Signal::one();

        assert!(zero.is_const());
        assert!(one.is_const());

        assert_eq!(zero, !one);
        assert_eq!(one, !zero);

        assert!(!zero.is_complemented());
        assert!(one.is_complemented());
        assert_eq!(Signal::from(true), one);
        assert_eq!(Signal::from(false), zero);
    }

    #[test]
    fn test_double_negation() {
        let s = Signal::from_node(7);
        assert_eq!(!!s, s);
        assert_ne!((!s).is_complemented(), s.is_complemented());
        assert_eq!((!s).node(), s.node());
    }

    #[test]
    fn test_raw() {
        let s = Signal::new(5, true);
        assert_eq!(s.raw(), 11);
        assert_eq!(Signal::from_raw(11), s);
        assert_eq!(Signal::from_raw(10), Signal::from_node(5));
    }

    #[test]
    fn test_ordering_follows_packed_form() {
        let mut signals = vec![Signal::new(3, true), Signal::new(1, false), Signal::new(3, false), Signal::new(1, true)];
        signals.sort();
        let raws: Vec<u64> = signals.iter().map(|s| s.raw()).collect();
        assert_eq!(raws, vec![2, 3, 6, 7]);
    }

    #[test]
    fn test_xor_and_polarity() {
        let s = Signal::from_node(4);
        assert_eq!(s ^ true, !s);
        assert_eq!(s ^ false, s);
        assert_eq!((!s).positive(), s);
        assert_eq!(s.negative(), !s);
    }

    #[test]
    fn test_display() {
        assert_eq!(Signal::zero().to_string(), "0");
        assert_eq!(Signal::one().to_string(), "1");
        assert_eq!(Signal::from_node(3).to_string(), "n3");
        assert_eq!((!Signal::from_node(3)).to_string(), "!n3");
    }
}
