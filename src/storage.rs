use log::debug;

use crate::gate::{builtin_functions, Basis};
use crate::node::{Children, NodeData};
use crate::signal::{Node, Signal};
use crate::strash::{StrashKey, StrashTable};
use crate::tt_cache::{Literal, TruthTableCache};

/// Node arena with its truth-table cache, input/output lists and hash-cons table.
///
/// Slots are never reused: a dead node keeps its index for the lifetime of the storage.
#[derive(Debug, Clone)]
pub struct Storage {
    nodes: Vec<NodeData>,
    inputs: Vec<Node>,
    outputs: Vec<Signal>,
    input_names: Vec<Option<String>>,
    output_names: Vec<Option<String>>,
    cache: TruthTableCache,
    strash: Option<StrashTable>,
    basis: Basis,
    trav_id: u32,
    num_dead: usize,
}

impl Storage {
    pub fn new(basis: Basis) -> Self {
        let mut cache = TruthTableCache::new();
        for function in builtin_functions() {
            cache.insert(&function);
        }
        let strash = basis.structural_hashing().then(StrashTable::new);

        Self {
            nodes: vec![NodeData::constant()],
            inputs: Vec::new(),
            outputs: Vec::new(),
            input_names: Vec::new(),
            output_names: Vec::new(),
            cache,
            strash,
            basis,
            trav_id: 0,
            num_dead: 0,
        }
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn cache(&self) -> &TruthTableCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TruthTableCache {
        &mut self.cache
    }

    pub fn strash(&self) -> Option<&StrashTable> {
        self.strash.as_ref()
    }

    /// Total number of slots, including the constant, inputs and dead nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_dead(&self) -> usize {
        self.num_dead
    }

    pub fn node(&self, index: Node) -> &NodeData {
        assert!(
            (index as usize) < self.nodes.len(),
            "Node index {} is out of bounds (size {})",
            index,
            self.nodes.len()
        );
        &self.nodes[index as usize]
    }

    pub fn node_mut(&mut self, index: Node) -> &mut NodeData {
        assert!(
            (index as usize) < self.nodes.len(),
            "Node index {} is out of bounds (size {})",
            index,
            self.nodes.len()
        );
        &mut self.nodes[index as usize]
    }

    pub fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [NodeData] {
        &mut self.nodes
    }

    pub fn inputs(&self) -> &[Node] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn input_name(&self, index: usize) -> Option<&str> {
        self.input_names.get(index).and_then(|name| name.as_deref())
    }

    pub fn output_name(&self, index: usize) -> Option<&str> {
        self.output_names.get(index).and_then(|name| name.as_deref())
    }

    pub fn trav_id(&self) -> u32 {
        self.trav_id
    }

    pub fn incr_trav_id(&mut self) -> u32 {
        self.trav_id += 1;
        self.trav_id
    }

    fn push(&mut self, data: NodeData) -> Node {
        let index = self.nodes.len();
        assert!(index < Node::MAX as usize, "Node arena is full");
        self.nodes.push(data);
        index as Node
    }

    pub fn add_input(&mut self, name: Option<String>) -> Node {
        let index = self.push(NodeData::input());
        self.inputs.push(index);
        self.input_names.push(name);
        index
    }

    /// Register an output and take a reference to its node.
    pub fn add_output(&mut self, signal: Signal, name: Option<String>) -> usize {
        self.node_mut(signal.node()).incr_fanout();
        self.outputs.push(signal);
        self.output_names.push(name);
        self.outputs.len() - 1
    }

    /// Find an existing gate for `(function, children)` in the hash-cons table.
    pub fn find(&self, function: Literal, children: &[Signal]) -> Option<Node> {
        let strash = self.strash.as_ref()?;
        strash.find(&StrashKey::new(function, children))
    }

    /// Put a gate into the arena, reusing an existing one if the hash-cons table has it.
    ///
    /// Returns the node index and whether a new node was created.
    pub fn put(&mut self, function: Literal, children: Children) -> (Node, bool) {
        if let Some(strash) = &self.strash {
            let key = StrashKey::new(function, &children);
            if let Some(index) = strash.find(&key) {
                debug!("strash hit: literal {} {:?} -> n{}", function, children, index);
                return (index, false);
            }
        }

        for child in children.iter() {
            self.node_mut(child.node()).incr_fanout();
        }
        let key = self.strash.is_some().then(|| StrashKey::new(function, &children));
        let index = self.push(NodeData::new(function, children));
        if let (Some(strash), Some(key)) = (self.strash.as_mut(), key) {
            strash.insert(key, index);
        }
        (index, true)
    }

    /// Mark `index` dead, drop it from the hash-cons table and release its children.
    ///
    /// Children whose fanout drops to zero are taken out as well.
    pub fn take_out(&mut self, index: Node) {
        let mut stack = vec![index];
        while let Some(index) = stack.pop() {
            let node = self.node(index);
            if index == 0 || node.is_input() || node.is_dead() {
                continue;
            }
            let function = node.function;
            let children = node.children.clone();

            self.node_mut(index).set_dead();
            self.num_dead += 1;
            if let Some(strash) = self.strash.as_mut() {
                strash.remove(&StrashKey::new(function, &children));
            }
            for child in children {
                if self.node_mut(child.node()).decr_fanout() == 0 {
                    stack.push(child.node());
                }
            }
        }
    }
}
