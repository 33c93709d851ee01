//! Iteration over nodes, inputs, outputs and fanins.
//!
//! Every `foreach_*` method takes a callback `FnMut(item, index) -> R`, where `index` counts
//! the elements yielded so far and `R` is either `bool` (`false` stops the iteration) or
//! `()` (never stops). Dead nodes are skipped and do not consume an index.
//!
//! The network is not borrowed while the callback runs, so the callback may freely read
//! the network and update scratch fields (`value`, `visited`). Creating nodes from within
//! a callback is not supported: newly appended nodes may or may not be visited.

use crate::network::Network;
use crate::signal::{Node, Signal};

/// Result of a traversal callback.
pub trait Step {
    /// Whether the iteration should continue.
    fn proceed(self) -> bool;
}

impl Step for bool {
    fn proceed(self) -> bool {
        self
    }
}

impl Step for () {
    fn proceed(self) -> bool {
        true
    }
}

impl Network {
    fn foreach_node_if<P, F, R>(&self, start: Node, predicate: P, mut f: F)
    where
        P: Fn(&Self, Node) -> bool,
        F: FnMut(Node, usize) -> R,
        R: Step,
    {
        let mut index = 0;
        let mut node = start;
        while node < self.size() {
            if predicate(self, node) {
                if !f(node, index).proceed() {
                    return;
                }
                index += 1;
            }
            node += 1;
        }
    }

    /// Visit all live nodes in index order, including the constant and inputs.
    pub fn foreach_node<F, R>(&self, f: F)
    where
        F: FnMut(Node, usize) -> R,
        R: Step,
    {
        self.foreach_node_if(0, |network, node| !network.is_dead(node), f)
    }

    /// Visit all live gates in index order.
    pub fn foreach_gate<F, R>(&self, f: F)
    where
        F: FnMut(Node, usize) -> R,
        R: Step,
    {
        self.foreach_node_if(
            1,
            |network, node| !network.is_ci(node) && !network.is_dead(node),
            f,
        )
    }

    pub fn foreach_pi<F, R>(&self, mut f: F)
    where
        F: FnMut(Node, usize) -> R,
        R: Step,
    {
        for index in 0..self.num_pis() as usize {
            if !f(self.pi_at(index), index).proceed() {
                return;
            }
        }
    }

    pub fn foreach_ci<F, R>(&self, f: F)
    where
        F: FnMut(Node, usize) -> R,
        R: Step,
    {
        self.foreach_pi(f)
    }

    pub fn foreach_po<F, R>(&self, mut f: F)
    where
        F: FnMut(Signal, usize) -> R,
        R: Step,
    {
        for index in 0..self.num_pos() as usize {
            if !f(self.po_at(index), index).proceed() {
                return;
            }
        }
    }

    pub fn foreach_co<F, R>(&self, f: F)
    where
        F: FnMut(Signal, usize) -> R,
        R: Step,
    {
        self.foreach_po(f)
    }

    /// Visit the children of `node` in stored order.
    ///
    /// No-op for the constant and primary inputs.
    pub fn foreach_fanin<F, R>(&self, node: Node, mut f: F)
    where
        F: FnMut(Signal, usize) -> R,
        R: Step,
    {
        for (index, child) in self.fanins(node).into_iter().enumerate() {
            if !f(child, index).proceed() {
                return;
            }
        }
    }

    /// Position of the first primary output equal to `signal`.
    pub fn po_index(&self, signal: Signal) -> Option<usize> {
        let mut found = None;
        self.foreach_po(|po, index| {
            if po == signal {
                found = Some(index);
                return false;
            }
            true
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Basis;
    use test_log::test;

    #[test]
    fn test_foreach_node_skips_dead() {
        let network = Network::with_basis(Basis::primary());
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_and(a, b);
        let g = network.create_or(a, b);
        network.take_out_node(f.node());

        let mut nodes = Vec::new();
        network.foreach_node(|n, i| nodes.push((n, i)));
        assert_eq!(nodes, vec![(0, 0), (1, 1), (2, 2), (4, 3)]);
        assert_eq!(network.size(), 5);

        let mut gates = Vec::new();
        network.foreach_gate(|n, _| gates.push(n));
        assert_eq!(gates, vec![g.node()]);
    }

    #[test]
    fn test_early_exit() {
        let network = Network::new();
        for _ in 0..5 {
            network.create_pi();
        }
        let mut seen = 0;
        network.foreach_pi(|_, i| {
            seen += 1;
            i < 2
        });
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_foreach_fanin() {
        let network = Network::new();
        let a = network.create_pi();
        let b = network.create_pi();
        let c = network.create_pi();
        let m = network.create_maj(a, !b, c);

        let mut fanins = Vec::new();
        network.foreach_fanin(m.node(), |s, i| fanins.push((s, i)));
        assert_eq!(fanins, vec![(a, 0), (!b, 1), (c, 2)]);

        let mut calls = 0;
        network.foreach_fanin(a.node(), |_, _| calls += 1);
        network.foreach_fanin(0, |_, _| calls += 1);
        assert_eq!(calls, 0);

        let mut first = None;
        network.foreach_fanin(m.node(), |s, _| {
            first = Some(s);
            false
        });
        assert_eq!(first, Some(a));
    }

    #[test]
    fn test_callback_may_update_scratch() {
        let network = Network::new();
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_xor(a, b);
        network.foreach_node(|n, i| network.set_value(n, i as u32 * 10));
        assert_eq!(network.value(f.node()), 30);
    }

    #[test]
    fn test_po_index() {
        let network = Network::new();
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_and(a, b);
        network.create_po(a, None);
        network.create_po(!f, None);
        assert_eq!(network.po_index(!f), Some(1));
        assert_eq!(network.po_index(f), None);

        let mut pos = Vec::new();
        network.foreach_co(|s, _| pos.push(s));
        assert_eq!(pos, vec![a, !f]);
    }
}
