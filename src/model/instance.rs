//! Game instance parameters shared by the catalog and the board model

use std::fmt;
use std::str::FromStr;

/// How the deck is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PlayType {
    /// The solver chooses the deck
    #[default]
    Free,
    /// The deck is dealt at random before the search
    Known,
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Known => write!(f, "known"),
        }
    }
}

impl FromStr for PlayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "known" => Ok(Self::Known),
            other => Err(format!("unknown play type '{other}', expected free or known")),
        }
    }
}

/// Tile-set and board parameters
///
/// Equality, ordering and hashing cover every field, which makes an instance
/// usable as the key of the catalog cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instance {
    play_type: PlayType,
    max_value: usize,
    copies: usize,
    deck_size: usize,
    grid_size: usize,
}

impl Instance {
    /// Describe an instance
    pub const fn new(
        play_type: PlayType,
        max_value: usize,
        copies: usize,
        deck_size: usize,
        grid_size: usize,
    ) -> Self {
        Self {
            play_type,
            max_value,
            copies,
            deck_size,
            grid_size,
        }
    }

    /// Free or known deck
    pub const fn play_type(&self) -> PlayType {
        self.play_type
    }

    /// Highest tile value in play
    pub const fn max_value(&self) -> usize {
        self.max_value
    }

    /// Copies of each tile value
    pub const fn copies(&self) -> usize {
        self.copies
    }

    /// Number of deck slots
    pub const fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Side length of the square board
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of distinct parts, `(max_value + 1) · copies`
    pub const fn number_of_parts(&self) -> usize {
        (self.max_value + 1) * self.copies
    }

    /// Tile value carried by `part`
    pub const fn value_of_part(&self, part: usize) -> usize {
        part / self.copies
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} play, values 0..={}, {} copies, deck {}, grid {}x{}",
            self.play_type,
            self.max_value,
            self.copies,
            self.deck_size,
            self.grid_size,
            self.grid_size
        )
    }
}
