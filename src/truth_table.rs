//! Dynamic truth tables.
//!
//! A [`TruthTable`] over `n` variables stores `2^n` bits packed into `u64` words.
//! Bit `i` holds the function value for the input assignment whose binary encoding is `i`,
//! with variable 0 as the least significant bit of the index.
//!
//! Tables with fewer than 6 variables occupy a single word whose unused high bits are kept
//! cleared, so that equality and hashing can compare words directly.

use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};

use num_bigint::BigUint;

/// Projection masks for the first six variables.
const PROJECTIONS: [u64; 6] = [
    0xaaaa_aaaa_aaaa_aaaa,
    0xcccc_cccc_cccc_cccc,
    0xf0f0_f0f0_f0f0_f0f0,
    0xff00_ff00_ff00_ff00,
    0xffff_0000_ffff_0000,
    0xffff_ffff_0000_0000,
];

/// A Boolean function over a fixed number of variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    words: Vec<u64>,
}

impl TruthTable {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Largest supported number of variables.
    pub const MAX_VARS: u32 = 24;

    /// Creates the constant-0 function over `num_vars` variables.
    pub fn new(num_vars: u32) -> Self {
        assert!(
            num_vars <= Self::MAX_VARS,
            "Truth tables support at most {} variables",
            Self::MAX_VARS
        );
        let num_bits = 1usize << num_vars;
        let num_words = num_bits.div_ceil(Self::BITS_PER_WORD);
        Self {
            num_vars,
            words: vec![0; num_words],
        }
    }

    /// Creates the projection function `x_var` over `num_vars` variables.
    pub fn nth_var(num_vars: u32, var: u32) -> Self {
        assert!(var < num_vars, "Variable {} is out of range for {} variables", var, num_vars);
        let mut tt = Self::new(num_vars);
        if var < 6 {
            tt.words.fill(PROJECTIONS[var as usize]);
        } else {
            let stride = 1usize << (var - 6);
            for (i, word) in tt.words.iter_mut().enumerate() {
                if (i / stride) % 2 == 1 {
                    *word = u64::MAX;
                }
            }
        }
        tt.mask_bits();
        tt
    }

    /// Creates a table from raw words (least significant word first).
    ///
    /// Missing words are zero, superfluous words and bits are ignored.
    pub fn from_words(num_vars: u32, words: &[u64]) -> Self {
        let mut tt = Self::new(num_vars);
        for (dst, &src) in tt.words.iter_mut().zip(words) {
            *dst = src;
        }
        tt.mask_bits();
        tt
    }

    /// Parses a hexadecimal string (most significant digit first).
    ///
    /// The string must contain exactly `max(1, 2^num_vars / 4)` digits.
    pub fn from_hex(num_vars: u32, hex: &str) -> Option<Self> {
        let mut tt = Self::new(num_vars);
        if hex.len() != tt.num_hex_digits() {
            return None;
        }
        for (j, c) in hex.chars().rev().enumerate() {
            let digit = c.to_digit(16)? as u64;
            let bit = j * 4;
            tt.words[bit / Self::BITS_PER_WORD] |= digit << (bit % Self::BITS_PER_WORD);
        }
        if tt.num_vars < 2 && tt.words[0] != (tt.words[0] & tt.word_mask()) {
            return None;
        }
        Some(tt)
    }

    /// Creates the constant-0 function of the same size.
    pub fn construct(&self) -> Self {
        Self::new(self.num_vars)
    }

    fn word_mask(&self) -> u64 {
        if self.num_vars >= 6 {
            u64::MAX
        } else {
            (1u64 << (1u32 << self.num_vars)) - 1
        }
    }

    fn mask_bits(&mut self) {
        let mask = self.word_mask();
        if let Some(word) = self.words.first_mut() {
            *word &= mask;
        }
    }

    fn num_hex_digits(&self) -> usize {
        (self.num_bits() / 4).max(1)
    }
}

// Getters
impl TruthTable {
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn word_and_bit(&self, index: usize) -> (usize, usize) {
        assert!(
            index < self.num_bits(),
            "Bit {} is out of range for a table of {} bits",
            index,
            self.num_bits()
        );
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn get_bit(&self, index: usize) -> bool {
        let (word, bit) = self.word_and_bit(index);
        (self.words[word] >> bit) & 1 != 0
    }

    #[inline]
    pub fn set_bit(&mut self, index: usize) {
        let (word, bit) = self.word_and_bit(index);
        self.words[word] |= 1 << bit;
    }

    #[inline]
    pub fn clear_bit(&mut self, index: usize) {
        let (word, bit) = self.word_and_bit(index);
        self.words[word] &= !(1 << bit);
    }

    pub fn is_const0(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }
}

// Transformations
impl TruthTable {
    /// Swaps the positive and negative cofactors with respect to `var`,
    /// i.e. computes `f(.., !x_var, ..)`.
    pub fn flip(&mut self, var: u32) {
        assert!(var < self.num_vars, "Variable {} is out of range for {} variables", var, self.num_vars);
        if var < 6 {
            let shift = 1u32 << var;
            let mask = PROJECTIONS[var as usize];
            for word in self.words.iter_mut() {
                *word = ((*word & mask) >> shift) | ((*word & !mask) << shift);
            }
            self.mask_bits();
        } else {
            let step = 1usize << (var - 6);
            let mut i = 0;
            while i < self.words.len() {
                for j in i..i + step {
                    self.words.swap(j, j + step);
                }
                i += 2 * step;
            }
        }
    }

    /// Hexadecimal representation, most significant digit first.
    pub fn to_hex(&self) -> String {
        let digits = self.num_hex_digits();
        let mut s = String::with_capacity(digits);
        for j in (0..digits).rev() {
            let bit = j * 4;
            let digit = (self.words[bit / Self::BITS_PER_WORD] >> (bit % Self::BITS_PER_WORD)) & 0xf;
            s.push(std::char::from_digit(digit as u32, 16).unwrap_or('0'));
        }
        s
    }

    /// The table read as an unsigned integer, bit `i` having weight `2^i`.
    pub fn to_biguint(&self) -> BigUint {
        let mut digits = Vec::with_capacity(self.words.len() * 2);
        for &w in &self.words {
            digits.push(w as u32);
            digits.push((w >> 32) as u32);
        }
        BigUint::new(digits)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        assert_eq!(
            self.num_vars, other.num_vars,
            "Truth tables must have the same number of variables"
        );
        let words = self.words.iter().zip(&other.words).map(|(&a, &b)| op(a, b)).collect();
        Self {
            num_vars: self.num_vars,
            words,
        }
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;

    fn not(self) -> Self::Output {
        let mut tt = TruthTable {
            num_vars: self.num_vars,
            words: self.words.iter().map(|w| !w).collect(),
        };
        tt.mask_bits();
        tt
    }
}

impl Not for TruthTable {
    type Output = TruthTable;

    fn not(self) -> Self::Output {
        !&self
    }
}

impl BitAnd for &TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl BitOr for &TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl BitXor for &TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a ^ b)
    }
}

/// Binary representation, most significant bit first.
impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in (0..self.num_bits()).rev() {
            write!(f, "{}", self.get_bit(i) as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_zero() {
        let tt = TruthTable::new(0);
        assert_eq!(tt.num_bits(), 1);
        assert!(tt.is_const0());
        assert_eq!(tt.to_hex(), "0");

        let tt = TruthTable::new(8);
        assert_eq!(tt.words().len(), 4);
        assert!(tt.is_const0());
    }

    #[test]
    fn test_nth_var() {
        let a = TruthTable::nth_var(2, 0);
        let b = TruthTable::nth_var(2, 1);
        assert_eq!(a.words(), &[0b1010]);
        assert_eq!(b.words(), &[0b1100]);

        let x7 = TruthTable::nth_var(8, 7);
        assert_eq!(x7.words(), &[0, 0, u64::MAX, u64::MAX]);
        assert_eq!(x7.count_ones(), 128);
    }

    #[test]
    fn test_operators() {
        let a = TruthTable::nth_var(2, 0);
        let b = TruthTable::nth_var(2, 1);
        assert_eq!((&a & &b).words(), &[0x8]);
        assert_eq!((&a | &b).words(), &[0xe]);
        assert_eq!((&a ^ &b).words(), &[0x6]);
        assert_eq!((!&a).words(), &[0x5]);
    }

    #[test]
    fn test_bits() {
        let mut tt = TruthTable::new(3);
        tt.set_bit(5);
        assert!(tt.get_bit(5));
        assert_eq!(tt.count_ones(), 1);
        tt.clear_bit(5);
        assert!(tt.is_const0());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bit_out_of_range() {
        let tt = TruthTable::new(2);
        tt.get_bit(4);
    }

    #[test]
    fn test_hex() {
        let maj = TruthTable::from_hex(3, "e8").unwrap();
        assert_eq!(maj.words(), &[0xe8]);
        assert_eq!(maj.to_hex(), "e8");

        let and = TruthTable::from_words(2, &[0x8]);
        assert_eq!(and.to_hex(), "8");

        let buf = TruthTable::from_hex(1, "2").unwrap();
        assert_eq!(buf, TruthTable::nth_var(1, 0));

        assert!(TruthTable::from_hex(3, "e").is_none());
        assert!(TruthTable::from_hex(3, "zz").is_none());
        assert!(TruthTable::from_hex(1, "f").is_none());

        let wide = TruthTable::nth_var(7, 6);
        let hex = wide.to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(TruthTable::from_hex(7, &hex), Some(wide));
    }

    #[test]
    fn test_flip() {
        // a & !b
        let mut tt = TruthTable::from_words(2, &[0x2]);
        tt.flip(1);
        assert_eq!(tt.words(), &[0x8]);

        let mut x7 = TruthTable::nth_var(8, 7);
        x7.flip(7);
        assert_eq!(x7, !TruthTable::nth_var(8, 7));

        let mut x0 = TruthTable::nth_var(8, 0);
        x0.flip(0);
        assert_eq!(x0, !TruthTable::nth_var(8, 0));
    }

    #[test]
    fn test_biguint() {
        let and = TruthTable::from_words(2, &[0x8]);
        assert_eq!(and.to_biguint(), BigUint::from(8u32));

        let x6 = TruthTable::nth_var(7, 6);
        assert_eq!(x6.to_biguint(), BigUint::from(u64::MAX) << 64);
    }

    #[test]
    fn test_display() {
        let tt = TruthTable::from_words(2, &[0b0110]);
        assert_eq!(tt.to_string(), "0110");
    }
}
