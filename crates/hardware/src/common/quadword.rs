//! 128-bit SIMD register value.
//!
//! A `Quadword` is the unit of storage for registers, forward-queue entries
//! and local-store lines. Element 0 is the leftmost (most significant) element,
//! matching the big-endian layout of the local store. Word 0 is the
//! *preferred slot* read by scalar consumers such as branches and address
//! generation.

use std::fmt;

/// A 128-bit register value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Quadword(pub u128);

impl Quadword {
    /// All-zero quadword.
    pub const ZERO: Self = Self(0);

    /// Builds a quadword from four words, word 0 leftmost.
    #[inline]
    pub fn from_words(words: [u32; 4]) -> Self {
        Self(words.iter().fold(0u128, |acc, &w| (acc << 32) | w as u128))
    }

    /// Builds a quadword from eight halfwords, halfword 0 leftmost.
    #[inline]
    pub fn from_halfwords(halves: [u16; 8]) -> Self {
        Self(halves.iter().fold(0u128, |acc, &h| (acc << 16) | h as u128))
    }

    /// Builds a quadword from sixteen bytes, byte 0 leftmost.
    #[inline]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Builds a quadword from four single-precision values.
    #[inline]
    pub fn from_floats(values: [f32; 4]) -> Self {
        Self::from_words(values.map(f32::to_bits))
    }

    /// Replicates `word` into all four word slots.
    #[inline]
    pub fn splat_word(word: u32) -> Self {
        Self::from_words([word; 4])
    }

    /// Replicates `half` into all eight halfword slots.
    #[inline]
    pub fn splat_halfword(half: u16) -> Self {
        Self::from_halfwords([half; 8])
    }

    /// Returns the four words, word 0 leftmost.
    #[inline]
    pub fn words(self) -> [u32; 4] {
        std::array::from_fn(|i| self.word(i))
    }

    /// Returns word `i` (0 = leftmost).
    #[inline]
    pub fn word(self, i: usize) -> u32 {
        (self.0 >> (96 - 32 * i)) as u32
    }

    /// Returns the preferred-slot word (word 0).
    #[inline]
    pub fn preferred(self) -> u32 {
        self.word(0)
    }

    /// Returns the preferred-slot halfword (the rightmost halfword of word 0).
    #[inline]
    pub fn preferred_halfword(self) -> u16 {
        self.halfword(1)
    }

    /// Returns the eight halfwords, halfword 0 leftmost.
    #[inline]
    pub fn halfwords(self) -> [u16; 8] {
        std::array::from_fn(|i| self.halfword(i))
    }

    /// Returns halfword `i` (0 = leftmost).
    #[inline]
    pub fn halfword(self, i: usize) -> u16 {
        (self.0 >> (112 - 16 * i)) as u16
    }

    /// Returns the sixteen bytes, byte 0 leftmost.
    #[inline]
    pub fn bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Returns the four words reinterpreted as single-precision values.
    #[inline]
    pub fn floats(self) -> [f32; 4] {
        self.words().map(f32::from_bits)
    }

    /// Applies `f` to each word.
    #[inline]
    pub fn map_words(self, f: impl Fn(u32) -> u32) -> Self {
        Self::from_words(self.words().map(f))
    }

    /// Combines corresponding words of `self` and `other`.
    #[inline]
    pub fn zip_words(self, other: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let (a, b) = (self.words(), other.words());
        Self::from_words(std::array::from_fn(|i| f(a[i], b[i])))
    }

    /// Combines corresponding halfwords of `self` and `other`.
    #[inline]
    pub fn zip_halfwords(self, other: Self, f: impl Fn(u16, u16) -> u16) -> Self {
        let (a, b) = (self.halfwords(), other.halfwords());
        Self::from_halfwords(std::array::from_fn(|i| f(a[i], b[i])))
    }

    /// Combines corresponding bytes of `self` and `other`.
    #[inline]
    pub fn zip_bytes(self, other: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        let (a, b) = (self.bytes(), other.bytes());
        Self::from_bytes(std::array::from_fn(|i| f(a[i], b[i])))
    }

    /// Combines corresponding single-precision lanes of `self` and `other`.
    #[inline]
    pub fn zip_floats(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let (a, b) = (self.floats(), other.floats());
        Self::from_floats(std::array::from_fn(|i| f(a[i], b[i])))
    }
}

impl From<u128> for Quadword {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quadword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w0, w1, w2, w3] = self.words();
        write!(f, "{w0:08x}_{w1:08x}_{w2:08x}_{w3:08x}")
    }
}
