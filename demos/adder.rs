use clap::Parser;

use gatenet::depth::DepthView;
use gatenet::gate::Basis;
use gatenet::lut::LutConfig;
use gatenet::network::Network;
use gatenet::signal::Signal;
use gatenet::truth_table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Width of the operands.
    #[arg(value_name = "INT", default_value = "4")]
    width: usize,

    /// Gate basis: gtg, primary or extended.
    #[clap(long, value_name = "NAME", default_value = "primary")]
    basis: String,

    /// Print the network in DOT format.
    #[clap(long)]
    dot: bool,

    /// Print the network as LUT-style Verilog.
    #[clap(long)]
    verilog: bool,
}

/// Ripple-carry adder: returns the sum bits and the carry out.
fn ripple_carry(network: &Network, xs: &[Signal], ys: &[Signal]) -> (Vec<Signal>, Signal) {
    let mut carry = network.get_constant(false);
    let mut sum = Vec::with_capacity(xs.len());
    for (&x, &y) in xs.iter().zip(ys) {
        sum.push(network.create_xor3(x, y, carry));
        carry = network.create_maj(x, y, carry);
    }
    (sum, carry)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let basis = match args.basis.as_str() {
        "gtg" => Basis::gtg(),
        "primary" => Basis::primary(),
        "extended" => Basis::extended(),
        other => return Err(color_eyre::eyre::eyre!("unknown basis '{}'", other)),
    };

    let network = Network::with_basis(basis);
    let depth = DepthView::new(&network);

    let n = args.width;
    let xs: Vec<Signal> = (0..n).map(|i| network.create_pi_named(format!("x{}", i))).collect();
    let ys: Vec<Signal> = (0..n).map(|i| network.create_pi_named(format!("y{}", i))).collect();
    let (sum, carry) = ripple_carry(&network, &xs, &ys);
    for (i, &s) in sum.iter().enumerate() {
        network.create_po(s, Some(format!("s{}", i).as_str()));
    }
    network.create_po(carry, Some("cout"));

    println!("network = {:?}", network);
    println!("depth = {}", depth.depth());

    // Exhaustively check small adders.
    if n <= 8 {
        for x in 0..1u64 << n {
            for y in 0..1u64 << n {
                let inputs: Vec<bool> = (0..n)
                    .map(|i| x >> i & 1 != 0)
                    .chain((0..n).map(|i| y >> i & 1 != 0))
                    .collect();
                let outputs = network.simulate(&inputs)?;
                let result = outputs
                    .iter()
                    .enumerate()
                    .fold(0u64, |acc, (i, &bit)| acc | (bit as u64) << i);
                assert_eq!(result, x + y, "{} + {}", x, y);
            }
        }
        println!("Verified all {} additions", 1u64 << (2 * n));

        // Carry-out as a function of all operand bits, simulated bit-parallel.
        let num_vars = 2 * n as u32;
        let tables: Vec<TruthTable> = (0..num_vars).map(|i| TruthTable::nth_var(num_vars, i)).collect();
        let outputs = network.simulate(&tables)?;
        let cout = &outputs[n];
        println!("cout = {} (as integer)", cout.to_biguint());
        println!("cout is set for {} of {} operand pairs", cout.count_ones(), cout.num_bits());
    }

    if args.dot {
        println!("{}", network.to_dot()?);
    }
    if args.verilog {
        let config = LutConfig {
            module_name: format!("adder{}", n),
            input_names: (0..network.num_pis() as usize)
                .filter_map(|i| network.pi_name(i))
                .collect(),
            output_names: (0..network.num_pos() as usize)
                .filter_map(|i| network.po_name(i))
                .collect(),
        };
        println!("{}", network.to_lut_verilog_with_config(&config)?);
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
