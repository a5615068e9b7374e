use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the current, next, and held piece kinds.
///
/// Every new piece is drawn uniformly from the 7 kinds (no bag), one piece
/// ahead so the next piece can be previewed.
///
/// # Hold System
///
/// - Can hold one piece at a time
/// - First hold stores the current piece and draws the next one
/// - Subsequent holds swap the current piece with the held piece
///
/// # Example
///
/// ```
/// use autotris_engine::{PieceBuffer, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut buffer = PieceBuffer::with_seed(seed);
///
/// let upcoming = buffer.next_piece();
/// assert_eq!(buffer.pop_next(), upcoming);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    next: PieceKind,
    held: Option<PieceKind>,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator. Using the same seed produces the
/// same piece sequence, which makes games and simulations reproducible.
///
/// Seeds are written as 32 hex digits, both in JSON and on the command line.
///
/// # Example
///
/// ```
/// use autotris_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
/// assert_eq!(session1.next_piece(), session2.next_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParsePieceSeedError {
    #[error(not(source))]
    reason: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParsePieceSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        if let Some(c) = hex_str.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError {
                reason: format!("{hex_str} (unexpected character {c:?})"),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParsePieceSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl std::fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        for byte in self.0 {
            write!(&mut hex_str, "{byte:02x}")?;
        }
        f.write_str(&hex_str)
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceBuffer {
    /// Creates a new piece buffer with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = PieceKind::random(&mut rng);
        Self {
            rng,
            next,
            held: None,
        }
    }

    /// Takes the previewed piece and draws a new one behind it.
    pub fn pop_next(&mut self) -> PieceKind {
        let next = PieceKind::random(&mut self.rng);
        std::mem::replace(&mut self.next, next)
    }

    /// Returns the piece that the next [`Self::pop_next`] will return.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    /// Returns what piece would be received if hold is used now.
    ///
    /// - If a piece is held: returns the held piece
    /// - If no piece is held: returns the next piece
    #[must_use]
    pub fn peek_hold_result(&self) -> PieceKind {
        self.held.unwrap_or(self.next)
    }

    /// Executes a hold operation: stores `current` and returns the piece to play.
    pub fn hold(&mut self, current: PieceKind) -> PieceKind {
        match self.held.replace(current) {
            Some(held) => held,
            None => self.pop_next(),
        }
    }

    /// Returns the currently held piece, if any.
    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed(bytes)
    }

    #[test]
    fn test_seed_known_value_sequential_bytes() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_parse_accepts_uppercase() {
        let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_seed_parse_errors() {
        for bad in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+0123456789abcdef0123456789abcde",
            "-0123456789abcdef0123456789abcde",
            " 0123456789abcdef0123456789abcde",
        ] {
            let err = bad.parse::<PieceSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex"), "{bad:?}: {err}");
        }
        assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = seed_from_bytes([0x5A; 16]);
        let mut buffer1 = PieceBuffer::with_seed(seed);
        let mut buffer2 = PieceBuffer::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(buffer1.next_piece(), buffer2.next_piece());
            assert_eq!(buffer1.pop_next(), buffer2.pop_next());
        }
    }

    #[test]
    fn test_pop_returns_previewed_piece() {
        let mut buffer = PieceBuffer::with_seed(seed_from_bytes([3; 16]));
        for _ in 0..20 {
            let preview = buffer.next_piece();
            assert_eq!(buffer.pop_next(), preview);
        }
    }

    #[test]
    fn test_hold_stores_then_swaps() {
        let mut buffer = PieceBuffer::with_seed(seed_from_bytes([9; 16]));
        assert_eq!(buffer.held_piece(), None);

        let next = buffer.next_piece();
        assert_eq!(buffer.peek_hold_result(), next);
        assert_eq!(buffer.hold(PieceKind::T), next);
        assert_eq!(buffer.held_piece(), Some(PieceKind::T));

        assert_eq!(buffer.peek_hold_result(), PieceKind::T);
        assert_eq!(buffer.hold(PieceKind::I), PieceKind::T);
        assert_eq!(buffer.held_piece(), Some(PieceKind::I));
    }
}
