//! Network to DOT (Graphviz) conversion.
//!
//! The generated graph is drawn bottom-up (`rankdir=BT`):
//! - the **constant** is a box, **primary inputs** are houses, **gates** are ellipses
//!   labelled `<index>-<kind>` (e.g. `5-and2`, `7-maj3`);
//! - **edges** go from a child to its parent; complemented edges are dashed;
//! - nodes on the same level share a rank, and **primary outputs** `po<i>` share the top rank.
//!
//! # Examples
//!
//! ```
//! use gatenet::network::Network;
//!
//! let network = Network::new();
//! let a = network.create_pi();
//! let b = network.create_pi();
//! let f = network.create_and(a, !b);
//! network.create_po(f, None);
//!
//! let dot = network.to_dot().unwrap();
//! assert!(dot.contains("3-and2"));
//! // Render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::depth::DepthView;
use crate::network::Network;
use crate::signal::{Node, Signal};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for the standard look.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape of the constant node (default: "box")
    pub constant_shape: &'static str,
    /// Shape of primary inputs (default: "house")
    pub input_shape: &'static str,
    /// Shape of gates (default: "ellipse")
    pub gate_shape: &'static str,
    /// Shape of primary outputs (default: "invhouse")
    pub output_shape: &'static str,
    /// Fill color of the constant and primary inputs (default: "snow2")
    pub input_fillcolor: &'static str,
    /// Fill color of gates (default: "white")
    pub gate_fillcolor: &'static str,
    /// Fill color of primary outputs (default: "snow2")
    pub output_fillcolor: &'static str,
    /// Style of regular edges (default: "solid")
    pub regular_edge_style: &'static str,
    /// Style of complemented edges (default: "dashed")
    pub complemented_edge_style: &'static str,
    /// Graph caption placed below the drawing (default: none)
    pub caption: Option<&'static str>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            constant_shape: "box",
            input_shape: "house",
            gate_shape: "ellipse",
            output_shape: "invhouse",
            input_fillcolor: "snow2",
            gate_fillcolor: "white",
            output_fillcolor: "snow2",
            regular_edge_style: "solid",
            complemented_edge_style: "dashed",
            caption: None,
        }
    }
}

impl DotConfig {
    fn edge_style(&self, signal: Signal) -> &'static str {
        if signal.is_complemented() {
            self.complemented_edge_style
        } else {
            self.regular_edge_style
        }
    }
}

impl Network {
    fn dot_label(&self, node: Node) -> String {
        let index = self.node_to_index(node);
        match self.gate_kind(node) {
            Some(kind) => format!("{}-{}", index, kind.name()),
            None if self.is_function(node) => format!("{}-lut{}", index, self.fanin_size(node)),
            None => index.to_string(),
        }
    }

    /// Converts the network to DOT (Graphviz) format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the network to DOT format with custom configuration.
    ///
    /// Dead nodes are not drawn.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let depth = DepthView::new(self);

        let mut nodes = String::new();
        let mut edges = String::new();
        let mut levels: Vec<Vec<usize>> = Vec::new();

        let mut live = Vec::new();
        self.foreach_node(|node, _| live.push(node));

        for node in live {
            let index = self.node_to_index(node);
            let (shape, fillcolor) = if self.is_constant(node) {
                (config.constant_shape, config.input_fillcolor)
            } else if self.is_ci(node) {
                (config.input_shape, config.input_fillcolor)
            } else {
                (config.gate_shape, config.gate_fillcolor)
            };
            writeln!(
                nodes,
                "{} [label=\"{}\",shape={},style=filled,fillcolor={}]",
                index,
                self.dot_label(node),
                shape,
                fillcolor
            )?;
            for child in self.fanins(node) {
                writeln!(
                    edges,
                    "{} -> {} [style={}]",
                    self.node_to_index(child.node()),
                    index,
                    config.edge_style(child)
                )?;
            }

            let level = depth.level(node) as usize;
            if levels.len() <= level {
                levels.resize(level + 1, Vec::new());
            }
            levels[level].push(index);
        }

        let mut ranks = String::new();
        for indices in levels.iter() {
            write!(ranks, "{{rank = same; ")?;
            for index in indices {
                write!(ranks, "{}; ", index)?;
            }
            writeln!(ranks, "}}")?;
        }

        write!(ranks, "{{rank = same; ")?;
        for i in 0..self.num_pos() as usize {
            let po = self.po_at(i);
            writeln!(
                nodes,
                "po{} [shape={},style=filled,fillcolor={}]",
                i, config.output_shape, config.output_fillcolor
            )?;
            writeln!(
                edges,
                "{} -> po{} [style={}]",
                self.node_to_index(po.node()),
                i,
                config.edge_style(po)
            )?;
            write!(ranks, "po{}; ", i)?;
        }
        writeln!(ranks, "}}")?;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir=BT;")?;
        if let Some(caption) = config.caption {
            writeln!(dot, "label=\"{}\";", caption)?;
            writeln!(dot, "labelloc=\"b\";")?;
        }
        dot.push_str(&nodes);
        dot.push_str(&edges);
        dot.push_str(&ranks);
        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
