//! # gatenet: combinational gate networks in Rust
//!
//! **`gatenet`** is the in-memory intermediate representation of a logic-synthesis flow:
//! a bounded fan-in gate graph with complemented edges, a literal-indexed truth-table cache,
//! optional structural hashing, reference-counted fanouts with lazy deletion, an event bus
//! for incremental listeners, and an early-exit traversal protocol.
//!
//! ## Key Features
//!
//! - **One network, many bases**: a single [`Network`][crate::network::Network] type is
//!   configured by a [`Basis`][crate::gate::Basis], which decides which gates are stored
//!   natively and whether identical gates are deduplicated.
//! - **Complemented edges**: a [`Signal`][crate::signal::Signal] is a node index plus a
//!   complement bit, so inverters are free.
//! - **Fixed literals**: built-in gates have the same function literal in every network,
//!   making gate type tests a single comparison.
//! - **Simulation**: bit-level and bit-parallel (truth table) evaluation of gates and whole
//!   networks.
//! - **Writers**: DOT (Graphviz) and LUT-style Verilog output.
//!
//! ## Basic Usage
//!
//! ```rust
//! use gatenet::gate::Basis;
//! use gatenet::network::Network;
//!
//! // 1. Create a structurally hashed network
//! let network = Network::with_basis(Basis::primary());
//!
//! // 2. Add inputs and gates
//! let a = network.create_pi();
//! let b = network.create_pi();
//! let f = network.create_and(a, !b);
//!
//! // Identical gates are shared
//! assert_eq!(network.create_and(!b, a), f);
//!
//! // 3. Register the output and simulate
//! network.create_po(f, None);
//! assert_eq!(network.simulate(&[true, false]).unwrap(), vec![true]);
//! ```
//!
//! ## Core Components
//!
//! - **[`network`]**: construction, introspection and the shared-handle semantics.
//! - **[`traversal`]**: the `foreach_*` family.
//! - **[`compute`]**: evaluation and simulation.
//! - **[`depth`]**: incrementally maintained node levels.
//! - **[`dot`]** and **[`lut`]**: output writers.

pub mod compute;
pub mod depth;
pub mod dot;
pub mod error;
pub mod events;
pub mod gate;
pub mod lut;
pub mod network;
pub mod node;
pub mod signal;
pub mod storage;
pub mod strash;
pub mod traversal;
pub mod truth_table;
pub mod tt_cache;
