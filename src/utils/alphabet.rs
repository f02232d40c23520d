//! Short code alphabet and the bijective base-N increment.
//!
//! Codes are enumerated like an odometer over an ordered set of symbols:
//! `0, 1, ..., Z, 00, 01, ...`. When every position holds the last symbol the
//! code grows by one character instead of wrapping, so no code is ever issued twice.

use std::cmp::Ordering;

use crate::domain::entities::ShortCode;

/// Default symbol order: digits, `-`, `_`, lowercase, uppercase (64 symbols).
///
/// Position in this string defines increment order. Changing it invalidates
/// every persisted generator state, so treat it as fixed.
pub const DEFAULT_SYMBOLS: &str =
    "0123456789-_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Errors produced while building an alphabet or interpreting a code against it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("Alphabet needs at least 2 symbols, got {0}")]
    TooFewSymbols(usize),

    #[error("Alphabet symbol {0:?} appears more than once")]
    DuplicateSymbol(char),

    #[error("Short code must not be empty")]
    EmptyCode,

    #[error("Symbol {0:?} is not part of the alphabet")]
    ForeignSymbol(char),
}

/// An ordered, immutable set of distinct symbols that short codes are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from an ordered sequence of distinct symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::TooFewSymbols`] for fewer than two symbols and
    /// [`AlphabetError::DuplicateSymbol`] if a symbol repeats.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
        let symbols: Vec<char> = symbols.into_iter().collect();

        if symbols.len() < 2 {
            return Err(AlphabetError::TooFewSymbols(symbols.len()));
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(AlphabetError::DuplicateSymbol(*symbol));
            }
        }

        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; construction rejects alphabets with fewer than two symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn first(&self) -> char {
        self.symbols[0]
    }

    pub fn last(&self) -> char {
        self.symbols[self.symbols.len() - 1]
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// The first code in enumeration order: the single first symbol.
    pub fn first_code(&self) -> ShortCode {
        ShortCode::new_unchecked(self.first().to_string())
    }

    /// Validates that `code` is a non-empty string of alphabet symbols.
    pub fn parse_code(&self, code: &str) -> Result<ShortCode, AlphabetError> {
        self.indexes(code)?;
        Ok(ShortCode::new_unchecked(code))
    }

    /// Returns the code that follows `code` in enumeration order.
    ///
    /// Scans from the rightmost position: the first symbol that is not the last
    /// one is bumped to its successor; last symbols are reset to the first symbol
    /// and the scan carries left. If the carry runs off the leftmost position the
    /// result is the all-first-symbol code one character longer.
    ///
    /// # Errors
    ///
    /// Returns an error if `code` is empty or contains a foreign symbol.
    pub fn successor(&self, code: &ShortCode) -> Result<ShortCode, AlphabetError> {
        let mut digits = self.indexes(code.as_str())?;
        let last = self.symbols.len() - 1;

        for digit in digits.iter_mut().rev() {
            if *digit != last {
                *digit += 1;
                return Ok(self.encode(&digits));
            }
            *digit = 0;
        }

        // Overflow: every position was reset to the first symbol.
        digits.push(0);
        Ok(self.encode(&digits))
    }

    /// Compares two codes in enumeration order (shorter first, then symbol by symbol).
    pub fn compare(&self, a: &ShortCode, b: &ShortCode) -> Result<Ordering, AlphabetError> {
        let a = self.indexes(a.as_str())?;
        let b = self.indexes(b.as_str())?;

        Ok(a.len().cmp(&b.len()).then_with(|| a.cmp(&b)))
    }

    fn indexes(&self, code: &str) -> Result<Vec<usize>, AlphabetError> {
        if code.is_empty() {
            return Err(AlphabetError::EmptyCode);
        }

        code.chars()
            .map(|c| self.index_of(c).ok_or(AlphabetError::ForeignSymbol(c)))
            .collect()
    }

    fn encode(&self, digits: &[usize]) -> ShortCode {
        ShortCode::new_unchecked(digits.iter().map(|&d| self.symbols[d]).collect::<String>())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.chars().collect(),
        }
    }
}
