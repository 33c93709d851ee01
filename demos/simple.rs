use gatenet::gate::Basis;
use gatenet::network::Network;
use gatenet::truth_table::TruthTable;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let network = Network::with_basis(Basis::primary());
    println!("network = {:?}", network);

    let a = network.create_pi_named("a");
    let b = network.create_pi_named("b");
    let c = network.create_pi_named("c");
    println!("a = {}, b = {}, c = {}", a, b, c);

    let f = network.create_and(a, !b);
    println!("f = and(a, !b) = {}", f);
    let g = network.create_and(!b, a);
    println!("g = and(!b, a) = {} (shared: {})", g, f == g);

    let m = network.create_maj(a, b, c);
    println!("m = maj(a, b, c) = {}", m);
    network.create_po(f, Some("f"));
    network.create_po(!m, Some("minority"));
    println!("network = {:?}", network);

    let inputs: Vec<_> = (0..3).map(|i| TruthTable::nth_var(3, i)).collect();
    for (i, value) in network.simulate(&inputs)?.iter().enumerate() {
        println!("{} = {}", network.po_name(i).unwrap_or_default(), value);
    }

    println!("{}", network.to_dot()?);

    Ok(())
}
