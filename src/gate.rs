//! Built-in gate kinds and network bases.
//!
//! Every network pre-registers the same built-in functions in its [`TruthTableCache`],
//! in the same order, so built-in literals are fixed and identical across bases:
//!
//! ```text
//!   slot   even literal        odd literal
//!   ----   ------------        -----------
//!     0     0 const0            1 const1
//!     1     2 buf               3 not
//!     2     4 and               5 nand
//!     3     6 or                7 nor
//!     4     8 lt   (!a & b)     9 ge
//!     5    10 gt   (a & !b)    11 le
//!     6    12 xor              13 xnor
//!     7    14 maj              15 minority
//!     8    16 ite              17 nite
//!     9    18 xor3             19 xnor3
//!    10    20 and3             21 nand3
//!    11    22 or3              23 nor3
//!    12    24 ao21             25 aoi21
//!    13    26 oa21             27 oai21
//!    14    28 ax21             29 axi21
//!    15    30 xa21             31 xai21
//!    16    32 ox21             33 oxi21
//!    17    34 xo21             35 xoi21
//! ```
//!
//! Gate type tests therefore reduce to literal comparisons.
//!
//! [`TruthTableCache`]: crate::tt_cache::TruthTableCache

use crate::truth_table::TruthTable;
use crate::tt_cache::Literal;

/// Sentinel literal marking primary inputs. Never a cache literal.
pub const PI_LITERAL: Literal = u32::MAX;

/// Functions registered at network creation, as `(num_vars, bits)`, in slot order.
pub(crate) const BUILTIN_FUNCTIONS: [(u32, u64); 18] = [
    (0, 0x0),  // const0
    (1, 0x2),  // buf
    (2, 0x8),  // and
    (2, 0xe),  // or
    (2, 0x4),  // lt
    (2, 0x2),  // gt
    (2, 0x6),  // xor
    (3, 0xe8), // maj
    (3, 0xd8), // ite
    (3, 0x96), // xor3
    (3, 0x80), // and3
    (3, 0xfe), // or3
    (3, 0xf8), // ao21
    (3, 0xe0), // oa21
    (3, 0x6c), // ax21
    (3, 0x48), // xa21
    (3, 0x36), // ox21
    (3, 0xde), // xo21
];

pub(crate) fn builtin_functions() -> impl Iterator<Item = TruthTable> {
    BUILTIN_FUNCTIONS
        .iter()
        .map(|&(num_vars, bits)| TruthTable::from_words(num_vars, &[bits]))
}

/// Gates which can be created through the dedicated `create_*` builders.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    And,
    Nand,
    Or,
    Nor,
    Lt,
    Le,
    Xor,
    Xnor,
    Maj,
    Ite,
    Xor3,
    Nand3,
    Nor3,
    Aoi21,
    Oai21,
    Axi21,
    Xai21,
    Oxi21,
    Xoi21,
}

impl GateKind {
    pub const ALL: [GateKind; 19] = [
        GateKind::And,
        GateKind::Nand,
        GateKind::Or,
        GateKind::Nor,
        GateKind::Lt,
        GateKind::Le,
        GateKind::Xor,
        GateKind::Xnor,
        GateKind::Maj,
        GateKind::Ite,
        GateKind::Xor3,
        GateKind::Nand3,
        GateKind::Nor3,
        GateKind::Aoi21,
        GateKind::Oai21,
        GateKind::Axi21,
        GateKind::Xai21,
        GateKind::Oxi21,
        GateKind::Xoi21,
    ];

    pub const fn literal(self) -> Literal {
        match self {
            GateKind::And => 4,
            GateKind::Nand => 5,
            GateKind::Or => 6,
            GateKind::Nor => 7,
            GateKind::Lt => 8,
            GateKind::Le => 11,
            GateKind::Xor => 12,
            GateKind::Xnor => 13,
            GateKind::Maj => 14,
            GateKind::Ite => 16,
            GateKind::Xor3 => 18,
            GateKind::Nand3 => 21,
            GateKind::Nor3 => 23,
            GateKind::Aoi21 => 25,
            GateKind::Oai21 => 27,
            GateKind::Axi21 => 29,
            GateKind::Xai21 => 31,
            GateKind::Oxi21 => 33,
            GateKind::Xoi21 => 35,
        }
    }

    pub fn from_literal(literal: Literal) -> Option<GateKind> {
        GateKind::ALL.into_iter().find(|kind| kind.literal() == literal)
    }

    pub const fn arity(self) -> usize {
        match self {
            GateKind::And
            | GateKind::Nand
            | GateKind::Or
            | GateKind::Nor
            | GateKind::Lt
            | GateKind::Le
            | GateKind::Xor
            | GateKind::Xnor => 2,
            _ => 3,
        }
    }

    /// Whether the function is invariant under any permutation of its inputs.
    pub const fn is_symmetric(self) -> bool {
        matches!(
            self,
            GateKind::And
                | GateKind::Nand
                | GateKind::Or
                | GateKind::Nor
                | GateKind::Xor
                | GateKind::Xnor
                | GateKind::Maj
                | GateKind::Xor3
                | GateKind::Nand3
                | GateKind::Nor3
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            GateKind::And => "and2",
            GateKind::Nand => "nand2",
            GateKind::Or => "or2",
            GateKind::Nor => "nor2",
            GateKind::Lt => "lt2",
            GateKind::Le => "le2",
            GateKind::Xor => "xor2",
            GateKind::Xnor => "xnor2",
            GateKind::Maj => "maj3",
            GateKind::Ite => "mux21",
            GateKind::Xor3 => "xor3",
            GateKind::Nand3 => "nand3",
            GateKind::Nor3 => "nor3",
            GateKind::Aoi21 => "aoi21",
            GateKind::Oai21 => "oai21",
            GateKind::Axi21 => "axi21",
            GateKind::Xai21 => "xai21",
            GateKind::Oxi21 => "oxi21",
            GateKind::Xoi21 => "xoi21",
        }
    }

    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Describes which gates a network stores natively and whether it deduplicates them.
///
/// Built-in gates that are not native are decomposed into native ones by the
/// `create_*` builders. AND, NAND, OR, NOR, XOR and XNOR are native in every basis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    name: &'static str,
    max_fanin: usize,
    structural_hashing: bool,
    native: u32,
}

impl Basis {
    pub fn new(name: &'static str, max_fanin: usize, structural_hashing: bool) -> Self {
        assert!(max_fanin >= 2, "Basis must allow at least two fanins");
        let native = [
            GateKind::And,
            GateKind::Nand,
            GateKind::Or,
            GateKind::Nor,
            GateKind::Xor,
            GateKind::Xnor,
        ]
        .iter()
        .fold(0, |acc, kind| acc | kind.bit());
        Self {
            name,
            max_fanin,
            structural_hashing,
            native,
        }
    }

    /// Make `kind` native.
    pub fn with_native(mut self, kind: GateKind) -> Self {
        assert!(
            kind.arity() <= self.max_fanin,
            "Gate {} needs {} fanins, basis '{}' allows {}",
            kind.name(),
            kind.arity(),
            self.name,
            self.max_fanin
        );
        self.native |= kind.bit();
        self
    }

    /// GTECH gates: binary gates plus MAJ, ITE and XOR3, without structural hashing.
    pub fn gtg() -> Self {
        Self::new("gtg", 3, false)
            .with_native(GateKind::Maj)
            .with_native(GateKind::Ite)
            .with_native(GateKind::Xor3)
    }

    /// Binary gates only, structurally hashed.
    pub fn primary() -> Self {
        Self::new("primary", 2, true)
    }

    /// Every built-in gate native, structurally hashed.
    pub fn extended() -> Self {
        GateKind::ALL
            .into_iter()
            .fold(Self::new("extended", 3, true), |basis, kind| basis.with_native(kind))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn max_fanin(&self) -> usize {
        self.max_fanin
    }

    pub fn structural_hashing(&self) -> bool {
        self.structural_hashing
    }

    pub fn is_native(&self, kind: GateKind) -> bool {
        self.native & kind.bit() != 0
    }
}

impl Default for Basis {
    fn default() -> Self {
        Basis::gtg()
    }
}
