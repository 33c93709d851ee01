use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use log::debug;

use crate::events::{Events, SubscriptionId};
use crate::gate::{Basis, GateKind, PI_LITERAL};
use crate::node::Children;
use crate::signal::{Node, Signal};
use crate::storage::Storage;
use crate::truth_table::TruthTable;
use crate::tt_cache::Literal;

/// Handle to a combinational gate network.
///
/// The handle is cheap to alias with [`Network::share`]: all aliases observe the same
/// nodes and the same event bus. [`Clone::clone`] makes an independent deep copy with an
/// empty event bus.
///
/// All methods take `&self`; the storage lives behind a [`RefCell`], and borrows never
/// outlive a single call. Event listeners run with no borrow held, so they may read the
/// network (e.g. render it with [`Network::to_dot`]) and subscribe or unsubscribe
/// listeners, but must not create nodes in it.
pub struct Network {
    storage: Rc<RefCell<Storage>>,
    events: Rc<RefCell<Events>>,
}

impl Network {
    /// Create a network over the GTECH basis.
    pub fn new() -> Self {
        Self::with_basis(Basis::gtg())
    }

    pub fn with_basis(basis: Basis) -> Self {
        debug!("Network::with_basis({})", basis.name());
        Self {
            storage: Rc::new(RefCell::new(Storage::new(basis))),
            events: Rc::new(RefCell::new(Events::new())),
        }
    }

    /// Another handle to the same storage and event bus.
    pub fn share(&self) -> Self {
        Self {
            storage: Rc::clone(&self.storage),
            events: Rc::clone(&self.events),
        }
    }

    /// Whether both handles alias the same storage.
    pub fn same_storage(&self, other: &Network) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    pub fn storage(&self) -> Ref<'_, Storage> {
        self.storage.borrow()
    }

    pub fn events(&self) -> RefMut<'_, Events> {
        self.events.borrow_mut()
    }

    /// Register a listener called with the index of every newly created gate.
    pub fn on_add<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(Node) + 'static,
    {
        self.events.borrow_mut().subscribe_add(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.borrow_mut().unsubscribe(id)
    }

    pub fn basis(&self) -> Basis {
        self.storage.borrow().basis().clone()
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::new()
    }
}

impl Clone for Network {
    fn clone(&self) -> Self {
        Self {
            storage: Rc::new(RefCell::new(self.storage.borrow().clone())),
            events: Rc::new(RefCell::new(Events::new())),
        }
    }
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("basis", &self.storage.borrow().basis().name())
            .field("size", &self.size())
            .field("num_pis", &self.num_pis())
            .field("num_pos", &self.num_pos())
            .field("num_gates", &self.num_gates())
            .finish()
    }
}

// Signals
impl Network {
    pub fn get_constant(&self, value: bool) -> Signal {
        Signal::from(value)
    }

    pub fn get_node(&self, signal: Signal) -> Node {
        signal.node()
    }

    pub fn make_signal(&self, node: Node) -> Signal {
        Signal::from_node(node)
    }

    pub fn is_complemented(&self, signal: Signal) -> bool {
        signal.is_complemented()
    }

    pub fn node_to_index(&self, node: Node) -> usize {
        node as usize
    }

    pub fn index_to_node(&self, index: usize) -> Node {
        index as Node
    }
}

// Primary I/O
impl Network {
    pub fn create_pi(&self) -> Signal {
        Signal::from_node(self.storage.borrow_mut().add_input(None))
    }

    pub fn create_pi_named(&self, name: impl Into<String>) -> Signal {
        Signal::from_node(self.storage.borrow_mut().add_input(Some(name.into())))
    }

    /// Register `signal` as a primary output and return its position.
    pub fn create_po(&self, signal: Signal, name: Option<&str>) -> usize {
        self.storage
            .borrow_mut()
            .add_output(signal, name.map(str::to_string))
    }

    pub fn pi_name(&self, index: usize) -> Option<String> {
        self.storage.borrow().input_name(index).map(str::to_string)
    }

    pub fn po_name(&self, index: usize) -> Option<String> {
        self.storage.borrow().output_name(index).map(str::to_string)
    }

    pub fn pi_at(&self, index: usize) -> Node {
        let storage = self.storage.borrow();
        assert!(index < storage.inputs().len(), "Primary input {} does not exist", index);
        storage.inputs()[index]
    }

    pub fn po_at(&self, index: usize) -> Signal {
        let storage = self.storage.borrow();
        assert!(index < storage.outputs().len(), "Primary output {} does not exist", index);
        storage.outputs()[index]
    }

    pub fn ci_at(&self, index: usize) -> Node {
        self.pi_at(index)
    }

    pub fn co_at(&self, index: usize) -> Signal {
        self.po_at(index)
    }

    /// Position of `node` among the primary inputs.
    pub fn pi_index(&self, node: Node) -> usize {
        // Inputs are appended in creation order, so the list is sorted.
        match self.storage.borrow().inputs().binary_search(&node) {
            Ok(index) => index,
            Err(_) => panic!("Node {} is not a primary input", node),
        }
    }
}

// Gate construction
impl Network {
    /// Append (or look up) a gate with the given function literal.
    fn create_gate(&self, literal: Literal, mut children: Children) -> Signal {
        let (index, created) = {
            let mut storage = self.storage.borrow_mut();
            let basis = storage.basis();
            assert!(
                children.len() <= basis.max_fanin(),
                "Gate with {} fanins exceeds the maximum fanin {} of basis '{}'",
                children.len(),
                basis.max_fanin(),
                basis.name()
            );
            if basis.structural_hashing() && GateKind::from_literal(literal).map_or(false, GateKind::is_symmetric) {
                children.sort();
            }
            debug!("create_gate(literal = {}, children = {:?})", literal, children);
            storage.put(literal, children)
        };
        if created {
            Events::dispatch_add(&self.events, index);
        }
        Signal::from_node(index)
    }

    fn create_native(&self, kind: GateKind, children: &[Signal]) -> Signal {
        self.create_gate(kind.literal(), children.iter().copied().collect())
    }

    fn is_native(&self, kind: GateKind) -> bool {
        self.storage.borrow().basis().is_native(kind)
    }

    pub fn create_buf(&self, a: Signal) -> Signal {
        a
    }

    pub fn create_not(&self, a: Signal) -> Signal {
        !a
    }

    pub fn create_and(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::And, &[a, b])
    }

    pub fn create_nand(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::Nand, &[a, b])
    }

    pub fn create_or(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::Or, &[a, b])
    }

    pub fn create_nor(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::Nor, &[a, b])
    }

    pub fn create_xor(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::Xor, &[a, b])
    }

    pub fn create_xnor(&self, a: Signal, b: Signal) -> Signal {
        self.create_native(GateKind::Xnor, &[a, b])
    }

    /// `!a & b`
    pub fn create_lt(&self, a: Signal, b: Signal) -> Signal {
        if self.is_native(GateKind::Lt) {
            return self.create_native(GateKind::Lt, &[a, b]);
        }
        self.create_and(!a, b)
    }

    /// `!a | b`
    pub fn create_le(&self, a: Signal, b: Signal) -> Signal {
        if self.is_native(GateKind::Le) {
            return self.create_native(GateKind::Le, &[a, b]);
        }
        !self.create_and(a, !b)
    }

    pub fn create_maj(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Maj) {
            return self.create_native(GateKind::Maj, &[a, b, c]);
        }
        debug!("create_maj: decomposing into binary gates");
        let ab = self.create_xor(a, b);
        let ac = self.create_xor(a, c);
        let t = self.create_and(ab, ac);
        self.create_xor(a, t)
    }

    /// `cond ? f_then : f_else`
    pub fn create_ite(&self, cond: Signal, f_then: Signal, f_else: Signal) -> Signal {
        if self.is_native(GateKind::Ite) {
            return self.create_native(GateKind::Ite, &[cond, f_then, f_else]);
        }
        debug!("create_ite: decomposing into binary gates");
        let (mut cond, mut f_then, mut f_else) = (cond, f_then, f_else);
        if f_then.node() < f_else.node() {
            std::mem::swap(&mut f_then, &mut f_else);
            cond = !cond;
        }
        let mut complement = false;
        if f_then.is_complemented() {
            f_then = !f_then;
            f_else = !f_else;
            complement = true;
        }
        let e = self.create_and(!cond, f_else);
        let t = self.create_and(cond, f_then);
        self.create_and(!e, !t) ^ !complement
    }

    pub fn create_mux21(&self, cond: Signal, f_then: Signal, f_else: Signal) -> Signal {
        self.create_ite(cond, f_then, f_else)
    }

    pub fn create_nmux21(&self, cond: Signal, f_then: Signal, f_else: Signal) -> Signal {
        !self.create_ite(cond, f_then, f_else)
    }

    pub fn create_xor3(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Xor3) {
            return self.create_native(GateKind::Xor3, &[a, b, c]);
        }
        let ab = self.create_xor(a, b);
        self.create_xor(ab, c)
    }

    /// `!(a & b & c)`
    pub fn create_nand3(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Nand3) {
            return self.create_native(GateKind::Nand3, &[a, b, c]);
        }
        let bc = self.create_and(b, c);
        !self.create_and(a, bc)
    }

    /// `!(a | b | c)`
    pub fn create_nor3(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Nor3) {
            return self.create_native(GateKind::Nor3, &[a, b, c]);
        }
        let bc = self.create_or(b, c);
        !self.create_or(a, bc)
    }

    /// `!((a & b) | c)`
    pub fn create_aoi21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Aoi21) {
            return self.create_native(GateKind::Aoi21, &[a, b, c]);
        }
        let ab = self.create_and(a, b);
        !self.create_or(ab, c)
    }

    /// `!((a | b) & c)`
    pub fn create_oai21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Oai21) {
            return self.create_native(GateKind::Oai21, &[a, b, c]);
        }
        let ab = self.create_or(a, b);
        !self.create_and(ab, c)
    }

    /// `!((a & c) ^ b)`
    pub fn create_axi21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Axi21) {
            return self.create_native(GateKind::Axi21, &[a, b, c]);
        }
        let ac = self.create_and(a, c);
        !self.create_xor(ac, b)
    }

    /// `!((a ^ c) & b)`
    pub fn create_xai21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Xai21) {
            return self.create_native(GateKind::Xai21, &[a, b, c]);
        }
        let ac = self.create_xor(a, c);
        !self.create_and(ac, b)
    }

    /// `!((a | c) ^ b)`
    pub fn create_oxi21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Oxi21) {
            return self.create_native(GateKind::Oxi21, &[a, b, c]);
        }
        let ac = self.create_or(a, c);
        !self.create_xor(ac, b)
    }

    /// `!((a ^ c) | b)`
    pub fn create_xoi21(&self, a: Signal, b: Signal, c: Signal) -> Signal {
        if self.is_native(GateKind::Xoi21) {
            return self.create_native(GateKind::Xoi21, &[a, b, c]);
        }
        let ac = self.create_xor(a, c);
        !self.create_or(ac, b)
    }

    /// Create a gate of the given kind from its operands, in `create_*` order.
    pub fn create_kind(&self, kind: GateKind, children: &[Signal]) -> Signal {
        assert_eq!(
            children.len(),
            kind.arity(),
            "Gate {} needs {} operands",
            kind.name(),
            kind.arity()
        );
        let (a, b) = (children[0], children[1]);
        match kind {
            GateKind::And => self.create_and(a, b),
            GateKind::Nand => self.create_nand(a, b),
            GateKind::Or => self.create_or(a, b),
            GateKind::Nor => self.create_nor(a, b),
            GateKind::Lt => self.create_lt(a, b),
            GateKind::Le => self.create_le(a, b),
            GateKind::Xor => self.create_xor(a, b),
            GateKind::Xnor => self.create_xnor(a, b),
            GateKind::Maj => self.create_maj(a, b, children[2]),
            GateKind::Ite => self.create_ite(a, b, children[2]),
            GateKind::Xor3 => self.create_xor3(a, b, children[2]),
            GateKind::Nand3 => self.create_nand3(a, b, children[2]),
            GateKind::Nor3 => self.create_nor3(a, b, children[2]),
            GateKind::Aoi21 => self.create_aoi21(a, b, children[2]),
            GateKind::Oai21 => self.create_oai21(a, b, children[2]),
            GateKind::Axi21 => self.create_axi21(a, b, children[2]),
            GateKind::Xai21 => self.create_xai21(a, b, children[2]),
            GateKind::Oxi21 => self.create_oxi21(a, b, children[2]),
            GateKind::Xoi21 => self.create_xoi21(a, b, children[2]),
        }
    }

    fn tree_reduce<F>(&self, signals: &[Signal], init: Signal, op: &F) -> Signal
    where
        F: Fn(&Self, Signal, Signal) -> Signal,
    {
        match signals {
            [] => init,
            [a] => *a,
            [a, b] => op(self, *a, *b),
            _ => {
                let (left, right) = signals.split_at(signals.len() / 2);
                let left = self.tree_reduce(left, init, op);
                let right = self.tree_reduce(right, init, op);
                op(self, left, right)
            }
        }
    }

    pub fn create_nary_and(&self, signals: &[Signal]) -> Signal {
        self.tree_reduce(signals, self.get_constant(true), &Self::create_and)
    }

    pub fn create_nary_or(&self, signals: &[Signal]) -> Signal {
        self.tree_reduce(signals, self.get_constant(false), &Self::create_or)
    }

    pub fn create_nary_xor(&self, signals: &[Signal]) -> Signal {
        self.tree_reduce(signals, self.get_constant(false), &Self::create_xor)
    }

    /// Create a node computing `function` over `children`.
    ///
    /// Variable `i` of the function is driven by `children[i]`. Without children, the
    /// function must be a constant and the constant signal is returned.
    pub fn create_node(&self, children: &[Signal], function: &TruthTable) -> Signal {
        assert_eq!(
            function.num_vars() as usize,
            children.len(),
            "Function over {} variables cannot take {} children",
            function.num_vars(),
            children.len()
        );
        if children.is_empty() {
            return self.get_constant(function.get_bit(0));
        }
        let literal = self.storage.borrow_mut().cache_mut().insert(function);
        self.create_gate(literal, children.iter().copied().collect())
    }

    /// Recreate the function of `source` from `other` over `children` in this network.
    pub fn clone_node(&self, other: &Network, source: Node, children: &[Signal]) -> Signal {
        assert!(!children.is_empty(), "Cannot clone node {} without children", source);
        let function = other.node_function(source);
        self.create_node(children, &function)
    }

    /// Look up an existing gate without creating it.
    ///
    /// Always `None` for non-native kinds and for bases without structural hashing.
    pub fn has_node(&self, kind: GateKind, children: &[Signal]) -> Option<Signal> {
        if !self.is_native(kind) || children.len() != kind.arity() {
            return None;
        }
        let mut children: Children = children.iter().copied().collect();
        if kind.is_symmetric() {
            children.sort();
        }
        let storage = self.storage.borrow();
        storage.find(kind.literal(), &children).map(Signal::from_node)
    }

    /// Logically remove gate `node`.
    ///
    /// The node is marked dead and dropped from the hash-cons table, its children lose a
    /// reference, and children left without references are removed too. The constant and
    /// primary inputs are never removed. No event fires.
    pub fn take_out_node(&self, node: Node) {
        debug!("take_out_node({})", node);
        self.storage.borrow_mut().take_out(node);
    }
}

// Structural properties
impl Network {
    /// Number of arena slots, including the constant, inputs and dead nodes.
    pub fn size(&self) -> u32 {
        self.storage.borrow().size() as u32
    }

    pub fn num_pis(&self) -> u32 {
        self.storage.borrow().inputs().len() as u32
    }

    pub fn num_pos(&self) -> u32 {
        self.storage.borrow().outputs().len() as u32
    }

    pub fn num_cis(&self) -> u32 {
        self.num_pis()
    }

    pub fn num_cos(&self) -> u32 {
        self.num_pos()
    }

    /// Number of live gates.
    pub fn num_gates(&self) -> u32 {
        let storage = self.storage.borrow();
        (storage.size() - 1 - storage.inputs().len() - storage.num_dead()) as u32
    }

    pub fn is_constant(&self, node: Node) -> bool {
        node == 0
    }

    pub fn constant_value(&self, node: Node) -> bool {
        assert!(self.is_constant(node), "Node {} is not the constant", node);
        false
    }

    pub fn is_pi(&self, node: Node) -> bool {
        self.storage.borrow().node(node).is_input()
    }

    pub fn is_ci(&self, node: Node) -> bool {
        self.is_pi(node)
    }

    pub fn is_function(&self, node: Node) -> bool {
        !self.is_constant(node) && !self.is_pi(node)
    }

    pub fn is_dead(&self, node: Node) -> bool {
        self.storage.borrow().node(node).is_dead()
    }

    pub fn fanin_size(&self, node: Node) -> usize {
        self.storage.borrow().node(node).children.len()
    }

    pub fn fanout_size(&self, node: Node) -> u32 {
        self.storage.borrow().node(node).fanout()
    }

    pub fn incr_fanout_size(&self, node: Node) -> u32 {
        self.storage.borrow_mut().node_mut(node).incr_fanout()
    }

    pub fn decr_fanout_size(&self, node: Node) -> u32 {
        self.storage.borrow_mut().node_mut(node).decr_fanout()
    }

    /// Children of `node`, in stored order.
    pub fn fanins(&self, node: Node) -> Vec<Signal> {
        self.storage.borrow().node(node).children.to_vec()
    }

    /// Function literal of `node` (the input sentinel for primary inputs).
    pub fn node_literal(&self, node: Node) -> Literal {
        self.storage.borrow().node(node).function
    }

    /// Function of `node` over its fanins.
    ///
    /// The constant node has the 0-variable constant-0 function, a primary input the
    /// 1-variable identity.
    pub fn node_function(&self, node: Node) -> TruthTable {
        let storage = self.storage.borrow();
        let literal = storage.node(node).function;
        let literal = if literal == PI_LITERAL { 2 } else { literal };
        storage.cache().get(literal)
    }

    /// Built-in kind of `node`, if its function is one.
    pub fn gate_kind(&self, node: Node) -> Option<GateKind> {
        if !self.is_function(node) {
            return None;
        }
        GateKind::from_literal(self.node_literal(node))
    }

    pub fn is_kind(&self, node: Node, kind: GateKind) -> bool {
        self.is_function(node) && self.node_literal(node) == kind.literal()
    }
}

macro_rules! gate_predicates {
    ($($name:ident => $kind:ident),* $(,)?) => {
        impl Network {
            $(
                pub fn $name(&self, node: Node) -> bool {
                    self.is_kind(node, GateKind::$kind)
                }
            )*
        }
    };
}

gate_predicates! {
    is_and => And,
    is_nand => Nand,
    is_or => Or,
    is_nor => Nor,
    is_lt => Lt,
    is_le => Le,
    is_xor => Xor,
    is_xnor => Xnor,
    is_maj => Maj,
    is_ite => Ite,
    is_xor3 => Xor3,
    is_nand3 => Nand3,
    is_nor3 => Nor3,
    is_aoi21 => Aoi21,
    is_oai21 => Oai21,
    is_axi21 => Axi21,
    is_xai21 => Xai21,
    is_oxi21 => Oxi21,
    is_xoi21 => Xoi21,
}

// Scratch fields
impl Network {
    pub fn value(&self, node: Node) -> u32 {
        self.storage.borrow().node(node).value
    }

    pub fn set_value(&self, node: Node, value: u32) {
        self.storage.borrow_mut().node_mut(node).value = value;
    }

    /// Increment the value of `node` and return the value it had before.
    pub fn incr_value(&self, node: Node) -> u32 {
        let mut storage = self.storage.borrow_mut();
        let data = storage.node_mut(node);
        let old = data.value;
        data.value += 1;
        old
    }

    /// Decrement the value of `node` and return the new value.
    pub fn decr_value(&self, node: Node) -> u32 {
        let mut storage = self.storage.borrow_mut();
        let data = storage.node_mut(node);
        assert!(data.value > 0, "Value of node {} is already zero", node);
        data.value -= 1;
        data.value
    }

    pub fn clear_values(&self) {
        for data in self.storage.borrow_mut().nodes_mut() {
            data.value = 0;
        }
    }

    pub fn visited(&self, node: Node) -> u32 {
        self.storage.borrow().node(node).visited
    }

    pub fn set_visited(&self, node: Node, visited: u32) {
        self.storage.borrow_mut().node_mut(node).visited = visited;
    }

    pub fn clear_visited(&self) {
        for data in self.storage.borrow_mut().nodes_mut() {
            data.visited = 0;
        }
    }

    pub fn trav_id(&self) -> u32 {
        self.storage.borrow().trav_id()
    }

    pub fn incr_trav_id(&self) -> u32 {
        self.storage.borrow_mut().incr_trav_id()
    }
}
