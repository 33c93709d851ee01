//! Network to LUT-style structural Verilog.
//!
//! Every gate becomes a `LUT<k>` instance whose `INIT` parameter is the gate function in
//! hexadecimal, with complemented fanins already folded into the function. The output
//! of gate `n` is wire `_w<n>_`; instances are named `_g<i>_` in gate order.
//!
//! ```text
//! module top (_i1_, _i2_, _o0_);
//!     input _i1_ ;
//!     input _i2_ ;
//!     output _o0_ ;
//!     wire _w3_ ;
//!     LUT2 _g0_ (
//!         _w3_,
//!         _i1_,
//!         _i2_
//!     );
//!     defparam _g0_.INIT = 4'h4;
//!
//!     assign _o0_ = ~_w3_ ;
//! endmodule
//! ```

use std::fmt::Write as _;

use log::debug;

use crate::network::Network;
use crate::signal::{Node, Signal};

/// Port naming for [`Network::to_lut_verilog_with_config`].
#[derive(Debug, Clone)]
pub struct LutConfig {
    /// Module name (default: "top")
    pub module_name: String,
    /// One name per primary input; `_i<node>_` names are used when empty
    pub input_names: Vec<String>,
    /// One name per primary output; `_o<i>_` names are used when empty
    pub output_names: Vec<String>,
}

impl Default for LutConfig {
    fn default() -> Self {
        Self {
            module_name: "top".to_string(),
            input_names: Vec::new(),
            output_names: Vec::new(),
        }
    }
}

struct Lut {
    name: String,
    output: Node,
    fanins: Vec<String>,
    init: String,
}

impl Network {
    /// Converts the network to LUT-style Verilog with default port names.
    pub fn to_lut_verilog(&self) -> Result<String, std::fmt::Error> {
        self.to_lut_verilog_with_config(&LutConfig::default())
    }

    pub fn to_lut_verilog_with_config(&self, config: &LutConfig) -> Result<String, std::fmt::Error> {
        let num_pis = self.num_pis() as usize;
        let num_pos = self.num_pos() as usize;
        assert!(
            config.input_names.is_empty() || config.input_names.len() == num_pis,
            "Expected {} input names, got {}",
            num_pis,
            config.input_names.len()
        );
        assert!(
            config.output_names.is_empty() || config.output_names.len() == num_pos,
            "Expected {} output names, got {}",
            num_pos,
            config.output_names.len()
        );

        let mut inputs = Vec::with_capacity(num_pis);
        self.foreach_pi(|node, i| {
            inputs.push(match config.input_names.get(i) {
                Some(name) => name.clone(),
                None => format!("_i{}_", self.node_to_index(node)),
            });
        });
        let outputs: Vec<String> = (0..num_pos)
            .map(|i| match config.output_names.get(i) {
                Some(name) => name.clone(),
                None => format!("_o{}_", i),
            })
            .collect();

        // Name of the net driving `signal`, ignoring its polarity.
        let net = |node: Node| -> String {
            if self.is_pi(node) {
                inputs[self.pi_index(node)].clone()
            } else {
                format!("_w{}_", self.node_to_index(node))
            }
        };
        let constant = |signal: Signal| -> &'static str {
            if signal.is_complemented() {
                "1'b1"
            } else {
                "1'b0"
            }
        };

        let mut luts = Vec::new();
        self.foreach_gate(|node, i| {
            let mut function = self.node_function(node);
            let mut fanins = Vec::new();
            self.foreach_fanin(node, |child, j| {
                if child.is_const() {
                    fanins.push(constant(child).to_string());
                    return;
                }
                if child.is_complemented() {
                    function.flip(j as u32);
                }
                fanins.push(net(child.node()));
            });
            luts.push(Lut {
                name: format!("_g{}_", i),
                output: node,
                fanins,
                init: function.to_hex(),
            });
        });
        debug!("to_lut_verilog: {} LUTs", luts.len());

        let mut verilog = String::new();
        let ports: Vec<&str> = inputs.iter().chain(outputs.iter()).map(String::as_str).collect();
        writeln!(verilog, "module {} ({});", config.module_name, ports.join(", "))?;
        for input in inputs.iter() {
            writeln!(verilog, "\tinput {} ;", input)?;
        }
        for output in outputs.iter() {
            writeln!(verilog, "\toutput {} ;", output)?;
        }
        for lut in luts.iter() {
            writeln!(verilog, "\twire {} ;", net(lut.output))?;
        }
        for lut in luts.iter() {
            writeln!(verilog, "\tLUT{} {} (", lut.fanins.len(), lut.name)?;
            write!(verilog, "\t\t{}", net(lut.output))?;
            for fanin in lut.fanins.iter() {
                write!(verilog, ",\n\t\t{}", fanin)?;
            }
            writeln!(verilog)?;
            writeln!(verilog, "\t);")?;
            writeln!(
                verilog,
                "\tdefparam {}.INIT = {}'h{};\n",
                lut.name,
                1u64 << lut.fanins.len(),
                lut.init
            )?;
        }

        for (i, output) in outputs.iter().enumerate() {
            let po = self.po_at(i);
            if po.is_const() {
                writeln!(verilog, "\tassign {} = {};", output, constant(po))?;
            } else {
                let negation = if po.is_complemented() { "~" } else { "" };
                writeln!(verilog, "\tassign {} = {}{} ;", output, negation, net(po.node()))?;
            }
        }
        writeln!(verilog, "endmodule")?;
        Ok(verilog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Basis;

    #[test]
    fn test_to_lut_verilog_basic() {
        let network = Network::new();
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_and(!a, b);
        network.create_po(!f, None);

        let verilog = network.to_lut_verilog().unwrap();
        let expected = "module top (_i1_, _i2_, _o0_);\n\
                        \tinput _i1_ ;\n\
                        \tinput _i2_ ;\n\
                        \toutput _o0_ ;\n\
                        \twire _w3_ ;\n\
                        \tLUT2 _g0_ (\n\
                        \t\t_w3_,\n\
                        \t\t_i1_,\n\
                        \t\t_i2_\n\
                        \t);\n\
                        \tdefparam _g0_.INIT = 4'h4;\n\
                        \n\
                        \tassign _o0_ = ~_w3_ ;\n\
                        endmodule\n";
        assert_eq!(verilog, expected);
    }

    #[test]
    fn test_to_lut_verilog_names_and_constants() {
        let network = Network::with_basis(Basis::primary());
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_xor(a, b);
        network.create_po(f, None);
        network.create_po(network.get_constant(true), None);
        network.create_po(a, None);

        let config = LutConfig {
            module_name: "half".to_string(),
            input_names: vec!["x".to_string(), "y".to_string()],
            output_names: vec!["s".to_string(), "one".to_string(), "copy".to_string()],
        };
        let verilog = network.to_lut_verilog_with_config(&config).unwrap();
        assert!(verilog.starts_with("module half (x, y, s, one, copy);\n"));
        assert!(verilog.contains("\t\tx,\n\t\ty\n"));
        assert!(verilog.contains("defparam _g0_.INIT = 4'h6;"));
        assert!(verilog.contains("\tassign s = _w3_ ;\n"));
        assert!(verilog.contains("\tassign one = 1'b1;\n"));
        assert!(verilog.contains("\tassign copy = x ;\n"));
    }

    #[test]
    fn test_to_lut_verilog_skips_dead() {
        let network = Network::with_basis(Basis::primary());
        let a = network.create_pi();
        let b = network.create_pi();
        let f = network.create_or(a, b);
        let g = network.create_and(a, b);
        network.create_po(g, None);
        network.take_out_node(f.node());

        let verilog = network.to_lut_verilog().unwrap();
        assert!(!verilog.contains("_w3_"));
        assert!(verilog.contains("LUT2 _g0_"));
        assert!(verilog.contains("INIT = 4'h8;"));
    }

    #[test]
    #[should_panic(expected = "Expected 2 input names")]
    fn test_to_lut_verilog_wrong_names() {
        let network = Network::new();
        network.create_pi();
        network.create_pi();
        let config = LutConfig {
            input_names: vec!["x".to_string()],
            ..LutConfig::default()
        };
        let _ = network.to_lut_verilog_with_config(&config);
    }
}
