use std::cell::RefCell;
use std::rc::Rc;

use test_log::test;

use gatenet::gate::{Basis, GateKind};
use gatenet::network::Network;
use gatenet::signal::Signal;
use gatenet::truth_table::TruthTable;

fn inputs(network: &Network, n: usize) -> Vec<Signal> {
    (0..n).map(|_| network.create_pi()).collect()
}

fn all_bases() -> Vec<Basis> {
    vec![Basis::gtg(), Basis::primary(), Basis::extended()]
}

#[test]
fn constants_live_on_node_zero() {
    for basis in all_bases() {
        let network = Network::with_basis(basis);
        for value in [false, true] {
            assert_eq!(network.get_node(network.get_constant(value)), 0);
        }
        assert_ne!(network.get_constant(false), network.get_constant(true));
    }
}

#[test]
fn negation_is_an_involution() {
    let network = Network::new();
    let x = inputs(&network, 2);
    let f = network.create_xor(x[0], x[1]);
    for s in [x[0], !x[1], f, network.get_constant(true)] {
        assert_eq!(!!s, s);
        assert_ne!(network.is_complemented(!s), network.is_complemented(s));
    }
}

#[test]
fn hashed_and_is_shared_in_either_order() {
    for basis in [Basis::primary(), Basis::extended()] {
        let network = Network::with_basis(basis);
        let x = inputs(&network, 2);
        let f = network.create_and(x[0], !x[1]);
        let gates = network.num_gates();
        assert_eq!(network.create_and(x[0], !x[1]).node(), f.node());
        assert_eq!(network.create_and(!x[1], x[0]).node(), f.node());
        assert_eq!(network.num_gates(), gates);
    }
}

#[test]
fn unhashed_and_is_duplicated() {
    let network = Network::with_basis(Basis::gtg());
    let x = inputs(&network, 2);
    let f = network.create_and(x[0], x[1]);
    let g = network.create_and(x[0], x[1]);
    assert_ne!(f.node(), g.node());
    assert_eq!(network.num_gates(), 2);
}

#[test]
fn fanout_counts_references() {
    for basis in all_bases() {
        let network = Network::with_basis(basis);
        let x = inputs(&network, 3);
        let f = network.create_and(x[0], x[1]);
        let g = network.create_or(f, x[2]);
        let h = network.create_xor(f, !x[0]);
        network.create_po(g, None);
        network.create_po(!f, None);
        network.create_po(h, None);

        assert_eq!(network.fanout_size(x[0].node()), 2);
        assert_eq!(network.fanout_size(x[1].node()), 1);
        assert_eq!(network.fanout_size(x[2].node()), 1);
        assert_eq!(network.fanout_size(f.node()), 3);
        assert_eq!(network.fanout_size(g.node()), 1);
        assert_eq!(network.fanout_size(h.node()), 1);
    }
}

#[test]
fn fanout_counts_match_a_recount() {
    let network = Network::with_basis(Basis::primary());
    let x = inputs(&network, 4);
    let sum = network.create_xor3(x[0], x[1], x[2]);
    let carry = network.create_maj(x[0], x[1], x[2]);
    let mux = network.create_ite(x[3], sum, carry);
    network.create_po(mux, None);
    network.create_po(carry, None);

    let mut counts = vec![0u32; network.size() as usize];
    network.foreach_gate(|n, _| {
        network.foreach_fanin(n, |child, _| counts[child.node() as usize] += 1);
    });
    network.foreach_po(|s, _| counts[s.node() as usize] += 1);
    network.foreach_node(|n, _| assert_eq!(network.fanout_size(n), counts[n as usize], "node {}", n));
}

#[test]
fn dead_nodes_are_never_visited() {
    let network = Network::with_basis(Basis::primary());
    let x = inputs(&network, 3);
    let f = network.create_and(x[0], x[1]);
    let g = network.create_or(f, x[2]);
    let h = network.create_xor(x[1], x[2]);
    network.create_po(h, None);
    network.take_out_node(g.node());

    assert_eq!(network.size(), 7);
    let mut visited = Vec::new();
    network.foreach_node(|n, _| {
        assert!(!network.is_dead(n));
        visited.push(n);
    });
    assert_eq!(visited, vec![0, 1, 2, 3, h.node()]);
    assert_eq!(network.num_gates(), 1);
}

#[test]
fn compute_examples() {
    let network = Network::new();
    let x = inputs(&network, 3);
    let and = network.create_and(x[0], x[1]);
    assert_eq!(network.compute(and.node(), &[true, false]), Ok(false));

    let a = TruthTable::from_words(2, &[0b1010]);
    let b = TruthTable::from_words(2, &[0b0110]);
    assert_eq!(network.compute(and.node(), &[a, b]), Ok(TruthTable::from_words(2, &[0b0010])));

    let maj = network.create_maj(x[0], x[1], x[2]);
    assert_eq!(network.compute(maj.node(), &[true, true, false]), Ok(true));
}

#[test]
fn on_add_fires_once_per_new_gate() {
    for basis in all_bases() {
        let network = Network::with_basis(basis);
        let x = inputs(&network, 3);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let id = network.on_add(move |n| log.borrow_mut().push(n));

        let before = network.size();
        network.create_and(x[0], x[1]);
        network.create_maj(x[0], x[1], x[2]);
        network.create_and(x[0], x[1]);
        network.create_po(x[0], None);
        network.create_pi();
        let created = network.size() - before - 1;
        assert_eq!(seen.borrow().len() as u32, created);

        // Removal never fires an event.
        let f = network.create_or(x[1], x[2]);
        let count = seen.borrow().len();
        network.take_out_node(f.node());
        network.take_out_node(x[2].node());
        assert!(network.is_dead(f.node()));
        assert_eq!(seen.borrow().len(), count);

        let seen = seen.borrow();
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!(seen.iter().all(|&n| n >= before));
        assert!(network.unsubscribe(id));
    }
}

#[test]
fn listeners_may_read_and_unsubscribe() {
    let network = Network::with_basis(Basis::primary());
    let x = inputs(&network, 2);
    network.create_po(x[0], None);

    let renders = Rc::new(RefCell::new(Vec::new()));
    let reader = network.share();
    let out = Rc::clone(&renders);
    network.on_add(move |n| {
        let dot = reader.to_dot().unwrap();
        assert!(dot.contains(&format!("{} [label=", n)));
        out.borrow_mut().push(n);
    });

    let own_id = Rc::new(RefCell::new(None));
    let calls = Rc::new(RefCell::new(0));
    let (handle, id_cell, counter) = (network.share(), Rc::clone(&own_id), Rc::clone(&calls));
    let once = network.on_add(move |_| {
        *counter.borrow_mut() += 1;
        if let Some(id) = *id_cell.borrow() {
            assert!(handle.unsubscribe(id));
        }
    });
    *own_id.borrow_mut() = Some(once);

    let f = network.create_and(x[0], x[1]);
    let g = network.create_xor(f, x[1]);

    assert_eq!(*renders.borrow(), vec![f.node(), g.node()]);
    assert_eq!(*calls.borrow(), 1);
    assert!(!network.unsubscribe(once));
    assert_eq!(network.events().num_listeners(), 1);
}

#[test]
fn nary_reducers_on_empty_input() {
    for basis in all_bases() {
        let network = Network::with_basis(basis);
        assert_eq!(network.create_nary_and(&[]), network.get_constant(true));
        assert_eq!(network.create_nary_or(&[]), network.get_constant(false));
        assert_eq!(network.create_nary_xor(&[]), network.get_constant(false));
    }
}

#[test]
fn every_gate_kind_agrees_across_bases() {
    let a = TruthTable::nth_var(3, 0);
    let b = TruthTable::nth_var(3, 1);
    let c = TruthTable::nth_var(3, 2);
    for kind in GateKind::ALL {
        let mut expected = None;
        for basis in all_bases() {
            let network = Network::with_basis(basis);
            let x = inputs(&network, kind.arity());
            let f = network.create_kind(kind, &x);
            network.create_po(f, None);
            let tables: Vec<TruthTable> = [&a, &b, &c][..kind.arity()]
                .iter()
                .map(|t| (*t).clone())
                .collect();
            let outputs = network.simulate(&tables).unwrap();
            match &expected {
                None => expected = Some(outputs[0].clone()),
                Some(table) => assert_eq!(&outputs[0], table, "{}", kind.name()),
            }
        }
    }
}

#[test]
fn ite_selects_between_branches() {
    for basis in all_bases() {
        let network = Network::with_basis(basis);
        let x = inputs(&network, 3);
        let f = network.create_ite(x[0], !x[1], x[2]);
        network.create_po(f, None);
        for pattern in 0..8u32 {
            let values: Vec<bool> = (0..3).map(|i| pattern >> i & 1 != 0).collect();
            let expected = if values[0] { !values[1] } else { values[2] };
            assert_eq!(network.simulate(&values).unwrap(), vec![expected]);
        }
    }
}

#[test]
fn shared_handles_alias_and_clones_do_not() {
    let network = Network::with_basis(Basis::primary());
    let x = inputs(&network, 2);
    let alias = network.share();
    let copy = network.clone();

    alias.create_and(x[0], x[1]);
    assert_eq!(network.num_gates(), 1);
    assert_eq!(copy.num_gates(), 0);
    assert_eq!(copy.num_pis(), 2);
    assert!(network.same_storage(&alias));
    assert!(!network.same_storage(&copy));
}
