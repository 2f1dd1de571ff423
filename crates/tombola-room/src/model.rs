//! Room state model: construction, limits, and normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repr::RoomStateRepr;

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Smallest board a room can have.
pub const MIN_CELLS: u32 = 1;
/// Largest board a room can have.
pub const MAX_CELLS: u32 = 500;
/// Board size for rooms created implicitly.
pub const DEFAULT_CELLS: u32 = 20;

/// Smallest fill threshold per cell.
pub const MIN_SHAPES: u32 = 1;
/// Largest fill threshold per cell.
pub const MAX_SHAPES: u32 = 20;
/// Fill threshold for rooms created implicitly.
pub const DEFAULT_SHAPES: u32 = 2;

/// Suggested client draw interval for new rooms.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;
/// Lower bound on the suggested draw interval.
pub const MIN_INTERVAL_MS: u64 = 1000;

/// Prize recorded for a winner once the prize list runs out.
pub const PRIZE_PLACEHOLDER: &str = "Prize";

// ---------------------------------------------------------------------------
// ShapeKind
// ---------------------------------------------------------------------------

/// Cosmetic shape drawn in each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Star,
    Circle,
    Diamond,
}

impl ShapeKind {
    /// Parses a shape name. Matching is exact (`"star"`, not `"Star"`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "star" => Some(Self::Star),
            "circle" => Some(Self::Circle),
            "diamond" => Some(Self::Diamond),
            _ => None,
        }
    }

    /// Reads client input, falling back to [`ShapeKind::Star`] for
    /// anything unrecognized.
    pub fn from_input(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Winner
// ---------------------------------------------------------------------------

/// A cell that reached the fill threshold, with the prize it was paired to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prize: String,
    /// `0` when absent from a stored document; such winners are dropped
    /// by [`RoomState::normalize`].
    #[serde(default)]
    pub number: u32,
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// The full state of one room.
///
/// Invariants (restored by [`RoomState::normalize`], preserved by every
/// transition in [`crate::engine`]):
///
/// - `names.len() == filled_counts.len() == num_cells`
/// - every `filled_counts[i] <= num_shapes`
/// - `n` is in `available_numbers` iff `filled_counts[n - 1] < num_shapes`
/// - winner numbers are unique and never in `available_numbers`
///
/// On the wire the shape is written under both `shapeType` and the
/// legacy `shape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RoomStateRepr", from = "RoomStateRepr")]
pub struct RoomState {
    /// Advisory auto-advance toggle. Draws are never gated on it.
    pub running: bool,
    pub num_cells: u32,
    /// Draws needed before a cell is won.
    pub num_shapes: u32,
    pub shape_kind: ShapeKind,
    pub interval_ms: u64,
    /// Numbers still eligible to be drawn.
    pub available_numbers: Vec<u32>,
    pub names: Vec<String>,
    pub filled_counts: Vec<u32>,
    pub prizes: Vec<String>,
    pub winners: Vec<Winner>,
}

impl RoomState {
    /// Creates a fresh room.
    ///
    /// Dimensions are clamped to [`MIN_CELLS`]..=[`MAX_CELLS`] and
    /// [`MIN_SHAPES`]..=[`MAX_SHAPES`]. They are taken as `i64` so callers
    /// can pass raw client input straight through.
    pub fn create(num_cells: i64, num_shapes: i64, shape_kind: ShapeKind) -> Self {
        let num_cells = clamp_to(num_cells, MIN_CELLS, MAX_CELLS);
        let num_shapes = clamp_to(num_shapes, MIN_SHAPES, MAX_SHAPES);

        Self {
            running: false,
            num_cells,
            num_shapes,
            shape_kind,
            interval_ms: DEFAULT_INTERVAL_MS,
            available_numbers: (1..=num_cells).collect(),
            names: (1..=num_cells).map(default_name).collect(),
            filled_counts: vec![0; num_cells as usize],
            prizes: Vec::new(),
            winners: Vec::new(),
        }
    }

    /// Repairs a state read from storage so every invariant holds.
    ///
    /// A state produced by this crate comes back unchanged. Documents
    /// written by older clients may have short `names`, stale pool
    /// entries, or out-of-range dimensions; those are fixed here.
    /// Idempotent.
    pub fn normalize(mut self) -> Self {
        self.num_cells = clamp_to(i64::from(self.num_cells), MIN_CELLS, MAX_CELLS);
        self.num_shapes = clamp_to(i64::from(self.num_shapes), MIN_SHAPES, MAX_SHAPES);
        self.interval_ms = self.interval_ms.max(MIN_INTERVAL_MS);

        let cells = self.num_cells as usize;
        let threshold = self.num_shapes;

        self.names.truncate(cells);
        while self.names.len() < cells {
            self.names.push(default_name(self.names.len() as u32 + 1));
        }

        self.filled_counts.resize(cells, 0);
        for count in &mut self.filled_counts {
            *count = (*count).min(threshold);
        }

        // Winners are authoritative: one per number, and their cells are
        // complete.
        let mut seen = vec![false; cells];
        self.winners.retain(|w| match w.number.checked_sub(1) {
            Some(i) if (i as usize) < cells && !seen[i as usize] => {
                seen[i as usize] = true;
                true
            }
            _ => false,
        });
        for winner in &self.winners {
            self.filled_counts[winner.number as usize - 1] = threshold;
        }

        // Keep the existing pool order, drop anything ineligible or
        // repeated, then append eligible numbers that went missing.
        let filled = &self.filled_counts;
        let eligible =
            |n: u32| (1..=cells as u32).contains(&n) && filled[n as usize - 1] < threshold;
        let mut pooled = vec![false; cells];
        self.available_numbers.retain(|&n| {
            if eligible(n) && !pooled[n as usize - 1] {
                pooled[n as usize - 1] = true;
                true
            } else {
                false
            }
        });
        for n in 1..=cells as u32 {
            if eligible(n) && !pooled[n as usize - 1] {
                self.available_numbers.push(n);
            }
        }

        self
    }

    /// Returns `true` once every cell has been won.
    pub fn is_exhausted(&self) -> bool {
        self.available_numbers.is_empty()
    }

    /// The prize the next winner will receive. A missing or empty prize
    /// slot yields [`PRIZE_PLACEHOLDER`].
    pub fn next_prize(&self) -> &str {
        self.prizes
            .get(self.winners.len())
            .map(String::as_str)
            .filter(|prize| !prize.is_empty())
            .unwrap_or(PRIZE_PLACEHOLDER)
    }

    /// Display name of the cell for `number`, falling back to `#<number>`
    /// when the name is missing or empty.
    pub fn name_of(&self, number: u32) -> String {
        number
            .checked_sub(1)
            .and_then(|i| self.names.get(i as usize))
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| default_name(number))
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::create(
            i64::from(DEFAULT_CELLS),
            i64::from(DEFAULT_SHAPES),
            ShapeKind::default(),
        )
    }
}

fn clamp_to(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

fn default_name(number: u32) -> String {
    format!("#{number}")
}
