use smallvec::SmallVec;

use crate::gate::PI_LITERAL;
use crate::signal::Signal;
use crate::tt_cache::Literal;

/// Inline capacity of a children list. Larger fanins spill to the heap.
pub const INLINE_FANIN: usize = 3;

pub type Children = SmallVec<[Signal; INLINE_FANIN]>;

/// Arena record of a single node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NodeData {
    pub children: Children,
    /// Fanout count in the low 31 bits, dead flag in the high bit.
    fanout: u32,
    /// Scratch word for client algorithms.
    pub value: u32,
    pub function: Literal,
    /// Traversal stamp.
    pub visited: u32,
}

impl NodeData {
    const DEAD_BIT: u32 = 1 << 31;
    const FANOUT_MASK: u32 = !Self::DEAD_BIT;

    pub fn new(function: Literal, children: Children) -> Self {
        Self {
            children,
            fanout: 0,
            value: 0,
            function,
            visited: 0,
        }
    }

    pub fn constant() -> Self {
        Self::new(0, Children::new())
    }

    pub fn input() -> Self {
        Self::new(PI_LITERAL, Children::new())
    }

    pub fn is_input(&self) -> bool {
        self.function == PI_LITERAL
    }

    pub fn fanout(&self) -> u32 {
        self.fanout & Self::FANOUT_MASK
    }

    pub fn incr_fanout(&mut self) -> u32 {
        assert!(self.fanout() < Self::FANOUT_MASK, "Fanout counter overflow");
        self.fanout += 1;
        self.fanout()
    }

    pub fn decr_fanout(&mut self) -> u32 {
        assert!(self.fanout() > 0, "Fanout counter underflow");
        self.fanout -= 1;
        self.fanout()
    }

    pub fn is_dead(&self) -> bool {
        self.fanout & Self::DEAD_BIT != 0
    }

    pub fn set_dead(&mut self) {
        self.fanout |= Self::DEAD_BIT;
    }
}
