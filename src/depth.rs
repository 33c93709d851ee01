use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::events::SubscriptionId;
use crate::network::Network;
use crate::signal::Node;

/// Levels of all nodes of a network, kept up to date as gates are added.
///
/// The constant and primary inputs are on level 0, a gate is one level above its
/// highest child. The view listens to the network's `on_add` event and stops doing so
/// when dropped.
#[derive(Debug)]
pub struct DepthView {
    network: Network,
    levels: Rc<RefCell<Vec<u32>>>,
    subscription: SubscriptionId,
}

fn level_of(network: &Network, levels: &[u32], node: Node) -> u32 {
    let mut level = 0;
    network.foreach_fanin(node, |child, _| {
        level = level.max(levels[child.node() as usize] + 1);
    });
    level
}

impl DepthView {
    pub fn new(network: &Network) -> Self {
        let levels = Rc::new(RefCell::new(Vec::new()));

        let listener_network = network.share();
        let listener_levels = Rc::clone(&levels);
        let subscription = network.on_add(move |node| {
            let mut levels = listener_levels.borrow_mut();
            // Inputs created since the last update are on level 0.
            if levels.len() <= node as usize {
                levels.resize(node as usize + 1, 0);
            }
            let level = level_of(&listener_network, &levels, node);
            levels[node as usize] = level;
        });

        let view = Self {
            network: network.share(),
            levels,
            subscription,
        };
        view.update_levels();
        view
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Recompute the levels of all nodes.
    pub fn update_levels(&self) {
        let mut levels = vec![0; self.network.size() as usize];
        for node in 0..self.network.size() {
            levels[node as usize] = level_of(&self.network, &levels, node);
        }
        debug!("update_levels: {} nodes", levels.len());
        *self.levels.borrow_mut() = levels;
    }

    pub fn level(&self, node: Node) -> u32 {
        assert!(
            node < self.network.size(),
            "Node index {} is out of bounds (size {})",
            node,
            self.network.size()
        );
        // Only inputs can be missing: every gate is levelized when added.
        self.levels.borrow().get(node as usize).copied().unwrap_or(0)
    }

    pub fn set_level(&self, node: Node, level: u32) {
        let mut levels = self.levels.borrow_mut();
        assert!((node as usize) < levels.len(), "Node {} has no level", node);
        levels[node as usize] = level;
    }

    /// Maximum level over the primary outputs.
    pub fn depth(&self) -> u32 {
        let mut depth = 0;
        self.network.foreach_po(|signal, _| {
            depth = depth.max(self.level(signal.node()));
        });
        depth
    }
}

impl Drop for DepthView {
    fn drop(&mut self) {
        self.network.unsubscribe(self.subscription);
    }
}
