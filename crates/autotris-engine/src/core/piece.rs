use std::fmt;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// A falling piece (tetromino) with kind, rotation, and position.
///
/// Pieces are small `Copy` values. Movement and rotation return new `Piece`
/// instances, so a simulated placement never aliases the piece it was derived from.
///
/// # Coordinate System
///
/// - `(x, y)` is the board cell of the top-left corner of the 4×4 shape matrix
/// - X increases rightward (columns), Y increases downward (rows)
/// - Coordinates are signed: the matrix origin may lie outside the board while
///   the occupied cells are still inside (e.g. a vertical I-piece at the left wall)
///
/// # Example
///
/// ```
/// use autotris_engine::{Piece, PieceKind, PieceRotation};
///
/// let piece = Piece::spawn(PieceKind::T);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let moved = piece.moved(1, 2).rotated_right();
/// assert_eq!((moved.x(), moved.y()), (4, 2));
/// assert_eq!(moved.rotation(), PieceRotation::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        serializer.collect_str(self)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.x,
            self.y
        )
    }
}

impl Piece {
    /// Column of the matrix origin for newly spawned pieces.
    pub const SPAWN_X: i32 = 3;
    /// Row of the matrix origin for newly spawned pieces.
    pub const SPAWN_Y: i32 = 0;

    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Creates a piece at the spawn position in its initial rotation.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, PieceRotation::ZERO, Self::SPAWN_X, Self::SPAWN_Y)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the absolute board coordinates `(x, y)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape()
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.kind, self.rotation, self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn with_rotation(&self, rotation: PieceRotation) -> Self {
        Self::new(self.kind, rotation, self.x, self.y)
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        self.with_rotation(self.rotation.rotated_right())
    }

    #[must_use]
    pub const fn rotated_left(&self) -> Self {
        self.with_rotation(self.rotation.rotated_left())
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PieceRotation(u8);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("rotation must be 0-3, got {_0}")]
pub struct InvalidRotationError(#[error(not(source))] u8);

impl TryFrom<u8> for PieceRotation {
    type Error = InvalidRotationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Self(value))
        } else {
            Err(InvalidRotationError(value))
        }
    }
}

impl From<PieceRotation> for u8 {
    fn from(rotation: PieceRotation) -> Self {
        rotation.0
    }
}

impl PieceRotation {
    pub const ZERO: Self = Self(0);
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Creates a rotation state.
    ///
    /// # Panics
    ///
    /// Panics if `n >= 4`. An out-of-range orientation is a programmer error.
    #[must_use]
    pub const fn new(n: u8) -> Self {
        assert!(n < 4, "rotation must be in 0..4");
        Self(n)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Draws a piece kind uniformly from the 7 kinds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }

    /// Returns the occupancy matrix for this kind in the given rotation.
    #[must_use]
    pub fn shape(self, rotation: PieceRotation) -> &'static Shape {
        &PIECE_SHAPES[self as usize][rotation.as_usize()]
    }

    /// Returns the display color of this kind.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::CYAN,
            PieceKind::O => PieceColor::YELLOW,
            PieceKind::T => PieceColor::PURPLE,
            PieceKind::S => PieceColor::GREEN,
            PieceKind::Z => PieceColor::RED,
            PieceKind::J => PieceColor::BLUE,
            PieceKind::L => PieceColor::ORANGE,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Display color token of a locked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    pub const CYAN: Self = Self::rgb(0, 240, 240);
    pub const YELLOW: Self = Self::rgb(240, 240, 0);
    pub const PURPLE: Self = Self::rgb(160, 0, 240);
    pub const GREEN: Self = Self::rgb(0, 240, 0);
    pub const RED: Self = Self::rgb(240, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 240);
    pub const ORANGE: Self = Self::rgb(240, 160, 0);
    /// Color for cells that do not come from a piece (test fixtures, garbage).
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Occupancy matrix of a piece in one rotation.
///
/// Every shape is stored in a 4×4 matrix, row-major, with `true` for occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: [[bool; 4]; 4],
}

impl Shape {
    pub const SIZE: usize = 4;

    #[must_use]
    pub const fn rows(&self) -> &[[bool; 4]; 4] {
        &self.rows
    }

    #[must_use]
    pub const fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.rows[row][col]
    }

    /// Returns the matrix-relative `(col, row)` of every occupied cell, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().zip(0..).flat_map(|(row, y)| {
            row.iter()
                .zip(0..)
                .filter(|(occupied, _)| **occupied)
                .map(move |(_, x)| (x, y))
        })
    }

    /// Returns `(col, row, width, height)` of the smallest rectangle covering
    /// the occupied cells.
    #[must_use]
    pub fn bounding_box(&self) -> (usize, usize, usize, usize) {
        let cols = (0..Self::SIZE).filter(|&x| self.rows.iter().any(|row| row[x]));
        let rows = (0..Self::SIZE).filter(|&y| self.rows[y].iter().any(|&c| c));
        let (min_x, max_x) = min_max(cols);
        let (min_y, max_y) = min_max(rows);
        (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }
}

fn min_max(mut values: impl Iterator<Item = usize>) -> (usize, usize) {
    let first = values.next().unwrap_or(0);
    values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Generates all 4 rotation states of a shape by rotating 90° clockwise.
///
/// # Arguments
///
/// * `size` - Effective size of the piece (3 for most pieces, 4 for I, 2 for O)
/// * `rows` - Initial matrix at rotation 0
const fn shape_rotations(size: usize, rows: [[bool; 4]; 4]) -> [Shape; 4] {
    let mut rotates = [Shape { rows }; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_rows = [[false; 4]; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                new_rows[y][x] = rotates[i - 1].rows[size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = Shape { rows: new_rows };
        i += 1;
    }
    rotates
}

const PIECE_SHAPES: [[Shape; 4]; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        shape_rotations(4, [EEEE, [X, X, X, X], EEEE, EEEE]),
        // O-piece
        shape_rotations(2, [[X, X, E, E], [X, X, E, E], EEEE, EEEE]),
        // T-piece
        shape_rotations(3, [[E, X, E, E], [X, X, X, E], EEEE, EEEE]),
        // S-piece
        shape_rotations(3, [[E, X, X, E], [X, X, E, E], EEEE, EEEE]),
        // Z-piece
        shape_rotations(3, [[X, X, E, E], [E, X, X, E], EEEE, EEEE]),
        // J-piece
        shape_rotations(3, [[X, E, E, E], [X, X, X, E], EEEE, EEEE]),
        // L-piece
        shape_rotations(3, [[E, E, X, E], [X, X, X, E], EEEE, EEEE]),
    ]
};
