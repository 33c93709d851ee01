//! Evaluation of gates and whole networks.
//!
//! [`Network::compute`] evaluates a single gate from the values of its fanin nodes,
//! either bit-wise (`bool`) or bit-parallel over truth tables (`TruthTable`), where
//! each bit position is one simulation pattern. Complemented child edges invert the
//! corresponding fanin value, and fanin `j` drives variable `j` of the gate function.

use log::debug;

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::signal::Node;
use crate::truth_table::TruthTable;

/// Value type a network can be simulated with.
pub trait SimulationValue: Clone {
    /// Constant value, shaped like `inputs` (e.g. of the same width).
    fn constant(value: bool, inputs: &[Self]) -> Result<Self>;

    fn complement(&self) -> Self;

    /// Apply `function` to `fanins`, where fanin `j` is variable `j`.
    fn evaluate(function: &TruthTable, fanins: &[Self]) -> Result<Self>;
}

impl SimulationValue for bool {
    fn constant(value: bool, _inputs: &[Self]) -> Result<Self> {
        Ok(value)
    }

    fn complement(&self) -> Self {
        !*self
    }

    fn evaluate(function: &TruthTable, fanins: &[Self]) -> Result<Self> {
        let index = fanins
            .iter()
            .rev()
            .fold(0usize, |index, &bit| (index << 1) | bit as usize);
        Ok(function.get_bit(index))
    }
}

fn common_width(tables: &[TruthTable]) -> Result<u32> {
    let width = tables.first().map_or(0, TruthTable::num_vars);
    match tables.iter().find(|table| table.num_vars() != width) {
        Some(table) => Err(NetworkError::WidthMismatch {
            expected: width,
            actual: table.num_vars(),
        }),
        None => Ok(width),
    }
}

impl SimulationValue for TruthTable {
    fn constant(value: bool, inputs: &[Self]) -> Result<Self> {
        let zero = TruthTable::new(common_width(inputs)?);
        Ok(if value { !zero } else { zero })
    }

    fn complement(&self) -> Self {
        !self
    }

    fn evaluate(function: &TruthTable, fanins: &[Self]) -> Result<Self> {
        let width = common_width(fanins)?;
        let mut result = TruthTable::new(width);
        for i in 0..result.num_bits() {
            let pattern = fanins
                .iter()
                .enumerate()
                .fold(0usize, |pattern, (j, fanin)| pattern | (fanin.get_bit(i) as usize) << j);
            if function.get_bit(pattern) {
                result.set_bit(i);
            }
        }
        Ok(result)
    }
}

impl Network {
    /// Evaluate gate `node` given the values of its fanin nodes, in fanin order.
    ///
    /// In scalar mode, fanin 0 is the least significant bit of the truth-table index.
    pub fn compute<V: SimulationValue>(&self, node: Node, fanins: &[V]) -> Result<V> {
        if node >= self.size() || !self.is_function(node) {
            return Err(NetworkError::NotAGate(node));
        }
        let children = self.fanins(node);
        if children.len() != fanins.len() {
            return Err(NetworkError::ArityMismatch {
                node,
                expected: children.len(),
                actual: fanins.len(),
            });
        }

        let values: Vec<V> = children
            .iter()
            .zip(fanins)
            .map(|(child, value)| {
                if child.is_complemented() {
                    value.complement()
                } else {
                    value.clone()
                }
            })
            .collect();
        V::evaluate(&self.node_function(node), &values)
    }

    /// Simulate the network for the given primary input values.
    ///
    /// Returns one value per primary output, with output complements applied.
    pub fn simulate<V: SimulationValue>(&self, inputs: &[V]) -> Result<Vec<V>> {
        let num_pis = self.num_pis() as usize;
        if inputs.len() != num_pis {
            return Err(NetworkError::InputCountMismatch {
                expected: num_pis,
                actual: inputs.len(),
            });
        }
        debug!("simulate: {} inputs, {} nodes", num_pis, self.size());

        let mut values = vec![V::constant(false, inputs)?; self.size() as usize];
        self.foreach_pi(|node, index| values[node as usize] = inputs[index].clone());

        // Children always precede their parents in the arena.
        for node in 1..self.size() {
            if self.is_pi(node) {
                continue;
            }
            let fanins: Vec<V> = self
                .fanins(node)
                .iter()
                .map(|child| values[child.node() as usize].clone())
                .collect();
            values[node as usize] = self.compute(node, &fanins)?;
        }

        let mut outputs = Vec::with_capacity(self.num_pos() as usize);
        self.foreach_po(|signal, _| {
            let value = &values[signal.node() as usize];
            outputs.push(if signal.is_complemented() {
                value.complement()
            } else {
                value.clone()
            });
        });
        Ok(outputs)
    }
}
