use std::fmt;

use serde::Serialize;

use super::piece::{Piece, PieceColor, PieceKind, PieceRotation};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked cell with the color of the piece that filled it.
    Filled(PieceColor),
}

/// A single row of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    cells: Box<[Cell]>,
}

impl BoardRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Checks if every cell of the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| c.is_filled())
    }

    /// Checks if no cell of the row is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

/// Summary metrics of a board used by the placement heuristic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardMetrics {
    /// Height of the tallest column (0 for an empty board).
    pub height: usize,
    /// Number of empty cells lying below the topmost occupied cell of their column.
    pub holes: usize,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: usize,
}

/// The grid of locked cells.
///
/// Rows are indexed from the top (row `0`) to the bottom (row `height - 1`),
/// columns from the left. Dimensions are fixed at construction.
///
/// `Board` is the single source of truth for legality: live-play movement and
/// placement simulation both go through [`Board::is_valid_position`].
///
/// # Example
///
/// ```
/// use autotris_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::new(10, 20);
/// let piece = Piece::spawn(PieceKind::O).moved(0, 18);
/// assert!(board.is_valid_position(&piece, 0, 0, None));
/// assert!(!board.is_valid_position(&piece, 0, 1, None));
///
/// board.lock(&piece);
/// assert_eq!(board.metrics().height, 2);
/// assert_eq!(board.clear_full_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<BoardRow>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit the signed piece
    /// coordinate space.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        assert!(
            i32::try_from(width).is_ok() && i32::try_from(height).is_ok(),
            "board dimensions too large"
        );
        Self {
            width,
            height,
            rows: vec![BoardRow::empty(width); height],
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` when outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get_mut(y)?.cells.get_mut(x)
    }

    /// Checks if no cell of the board is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(BoardRow::is_empty)
    }

    /// Checks whether `piece`, shifted by `(dx, dy)` and optionally in another
    /// rotation, fits on the board.
    ///
    /// Returns `false` if any occupied cell of the shape lies outside
    /// `[0, width) × [0, height)` or overlaps an occupied cell.
    #[must_use]
    pub fn is_valid_position(
        &self,
        piece: &Piece,
        dx: i32,
        dy: i32,
        rotation: Option<PieceRotation>,
    ) -> bool {
        let rotation = rotation.unwrap_or(piece.rotation());
        let (x0, y0) = (piece.x() + dx, piece.y() + dy);
        piece
            .kind()
            .shape(rotation)
            .occupied_cells()
            .all(|(col, row)| self.cell(x0 + col, y0 + row).is_some_and(|c| c.is_empty()))
    }

    /// Moves `piece` straight down until the next row would be invalid.
    ///
    /// The board is not modified; lock the returned piece to place it.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut piece = *piece;
        while self.is_valid_position(&piece, 0, 1, None) {
            piece = piece.moved(0, 1);
        }
        piece
    }

    /// Locks a piece onto the board by writing its color into its cells.
    ///
    /// Cells above the top of the board are skipped. The piece must have been
    /// checked with [`Self::is_valid_position`] first: locking an invalid piece
    /// leaves the grid content unspecified.
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.kind().color();
        for (x, y) in piece.occupied_cells() {
            if let Some(cell) = self.cell_mut(x, y) {
                *cell = Cell::Filled(color);
            }
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows are scanned from the bottom. Remaining rows keep their relative
    /// order and shift down into the freed slots; empty rows fill the top.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.clear();
        }
        count
    }

    /// Returns the stack height of every column, left to right.
    ///
    /// A column's height is `height - y` for its topmost occupied row `y`,
    /// or `0` when the column is empty.
    #[must_use]
    pub fn column_heights(&self) -> Vec<usize> {
        (0..self.width)
            .map(|x| {
                self.rows
                    .iter()
                    .position(|row| row.cells[x].is_filled())
                    .map_or(0, |y| self.height - y)
            })
            .collect()
    }

    /// Computes height, holes, and bumpiness of the board.
    #[must_use]
    pub fn metrics(&self) -> BoardMetrics {
        let height = self
            .rows
            .iter()
            .position(|row| !row.is_empty())
            .map_or(0, |y| self.height - y);

        let column_heights = self.column_heights();

        let holes = column_heights
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h > 0)
            .map(|(x, &h)| {
                self.rows[self.height - h..]
                    .iter()
                    .filter(|row| row.cells[x].is_empty())
                    .count()
            })
            .sum();

        let bumpiness = column_heights
            .windows(2)
            .map(|w| w[0].abs_diff(w[1]))
            .sum();

        BoardMetrics {
            height,
            holes,
            bumpiness,
        }
    }

    /// Creates a `Board` from ASCII art.
    ///
    /// Rows are given top to bottom. `.` is an empty cell, a piece letter
    /// (`I`, `O`, `T`, `S`, `Z`, `J`, `L`) fills the cell with that piece's color,
    /// and `#` fills it with [`PieceColor::GRAY`]. Whitespace is ignored and blank
    /// lines are skipped. The board height is the number of rows given.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters or rows of differing width.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|line| !line.is_empty())
            .collect();
        assert!(!lines.is_empty(), "ASCII board must have at least one row");

        let width = lines[0].len();
        let mut board = Self::new(width, lines.len());
        for (row, line) in board.rows.iter_mut().zip(&lines) {
            assert_eq!(
                line.len(),
                width,
                "Each row must have exactly {width} cells, got {}",
                line.len()
            );
            for (cell, &ch) in row.cells.iter_mut().zip(line) {
                *cell = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Filled(PieceColor::GRAY),
                    _ => {
                        let kind = PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("invalid board character: {ch:?}"));
                        Cell::Filled(kind.color())
                    }
                };
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells() {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn o_piece(x: i32, y: i32) -> Piece {
        Piece::new(PieceKind::O, PieceRotation::ZERO, x, y)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert!(board.is_empty());
        assert_eq!(board.metrics(), BoardMetrics::default());
        assert_eq!(board.column_heights(), vec![0; 10]);
    }

    #[test]
    fn test_o_piece_right_edge() {
        // A 2×2 block at x=3 would cover column 4 of a 4-wide board.
        let board = Board::new(4, 4);
        assert!(!board.is_valid_position(&o_piece(3, 0), 0, 0, None));
        assert!(board.is_valid_position(&o_piece(2, 0), 0, 0, None));
    }

    #[test]
    fn test_valid_position_bounds() {
        let board = Board::new(4, 4);
        let piece = o_piece(0, 0);
        assert!(!board.is_valid_position(&piece, -1, 0, None));
        assert!(!board.is_valid_position(&piece, 0, -1, None));
        assert!(board.is_valid_position(&piece, 0, 2, None));
        assert!(!board.is_valid_position(&piece, 0, 3, None));
    }

    #[test]
    fn test_valid_position_with_rotation_override() {
        let board = Board::new(4, 4);
        // Horizontal I occupies row 1 columns 0..4 of its matrix.
        let piece = Piece::new(PieceKind::I, PieceRotation::ZERO, 0, 0);
        assert!(board.is_valid_position(&piece, 0, 0, None));
        // Vertical I occupies column 2 rows 0..4.
        assert!(board.is_valid_position(&piece, 0, 0, Some(PieceRotation::new(1))));
        assert!(!board.is_valid_position(&piece, 0, 1, Some(PieceRotation::new(1))));
        // Matrix origin off the board while the cells stay inside.
        assert!(board.is_valid_position(&piece, -2, 0, Some(PieceRotation::new(1))));
        assert!(!board.is_valid_position(&piece, -3, 0, Some(PieceRotation::new(1))));
    }

    #[test]
    fn test_valid_position_overlap() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ..#.
            ....
            ",
        );
        assert!(!board.is_valid_position(&o_piece(1, 1), 0, 0, None));
        assert!(board.is_valid_position(&o_piece(0, 1), 0, 0, None));
        assert!(board.is_valid_position(&o_piece(1, 0), 0, 0, None));
    }

    #[test]
    fn test_lock_writes_piece_color() {
        let mut board = Board::new(4, 4);
        board.lock(&o_piece(1, 2));
        let color = PieceKind::O.color();
        assert_eq!(board.cell(1, 2), Some(Cell::Filled(color)));
        assert_eq!(board.cell(2, 3), Some(Cell::Filled(color)));
        assert_eq!(board.cell(0, 2), Some(Cell::Empty));
        assert_eq!(board.to_string(), "....\n....\n.##.\n.##.\n");
    }

    #[test]
    fn test_drop_position_lands_on_stack() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ....
            .#..
            ....
            ",
        );
        assert_eq!(board.drop_position(&o_piece(0, 0)), o_piece(0, 1));
        assert_eq!(board.drop_position(&o_piece(2, 0)), o_piece(2, 3));
        // A piece that cannot move down stays where it is.
        assert_eq!(board.drop_position(&o_piece(2, 3)), o_piece(2, 3));
    }

    #[test]
    fn test_lock_skips_rows_above_top() {
        let mut board = Board::new(4, 4);
        board.lock(&o_piece(0, -1));
        assert_eq!(board.to_string(), "##..\n....\n....\n....\n");
    }

    #[test]
    fn test_clear_single_full_row() {
        // Full bottom row under an empty top row.
        let mut board = Board::from_ascii(
            "
            ...
            IOT
            ",
        );
        assert_eq!(board.clear_full_lines(), 1);
        assert!(board.is_empty());
        assert_eq!(board.clear_full_lines(), 0);
    }

    #[test]
    fn test_clear_preserves_order_of_remaining_rows() {
        let mut board = Board::from_ascii(
            "
            #...
            ####
            .#..
            ####
            ####
            ..#.
            ",
        );
        assert_eq!(board.clear_full_lines(), 3);
        assert_eq!(board.to_string(), "....\n....\n....\n#...\n.#..\n..#.\n");
        assert_eq!(board.clear_full_lines(), 0);
    }

    #[test]
    fn test_clear_adjacent_full_rows_at_bottom() {
        let mut board = Board::from_ascii(
            "
            .#..
            ####
            ####
            ",
        );
        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.to_string(), "....\n....\n.#..\n");
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::from_ascii(
            "
            ##
            ##
            ",
        );
        assert_eq!(board.clear_full_lines(), 2);
        assert!(board.is_empty());
    }

    #[test]
    fn test_holes_below_single_cell() {
        // Only the top cell of column 0 is filled.
        let board = Board::from_ascii(
            "
            #.
            ..
            ..
            ",
        );
        let metrics = board.metrics();
        assert_eq!(metrics.holes, 2);
        assert_eq!(metrics.height, 3);
        assert_eq!(metrics.bumpiness, 3);
        assert_eq!(board.column_heights(), vec![3, 0]);
    }

    #[test]
    fn test_metrics() {
        let board = Board::from_ascii(
            "
            .....
            .#...
            .#.#.
            ##..#
            ",
        );
        assert_eq!(board.column_heights(), vec![1, 3, 0, 2, 1]);
        assert_eq!(
            board.metrics(),
            BoardMetrics {
                height: 3,
                holes: 1,
                bumpiness: 2 + 3 + 2 + 1,
            }
        );
    }

    #[test]
    fn test_flat_stack_has_no_bumpiness_or_holes() {
        let board = Board::from_ascii(
            "
            ...
            ###
            ##.
            ",
        );
        let metrics = board.metrics();
        assert_eq!(metrics.bumpiness, 0);
        assert_eq!(metrics.holes, 1);
        assert_eq!(metrics.height, 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Board::from_ascii(
            "
            ....
            #...
            ###.
            ",
        );
        let mut clone = original.clone();
        assert_eq!(clone.metrics(), original.metrics());

        clone.lock(&Piece::new(PieceKind::I, PieceRotation::new(1), 1, -1));
        clone.clear_full_lines();
        assert_ne!(clone, original);
        assert_eq!(original.to_string(), "....\n#...\n###.\n");
    }

    #[test]
    #[should_panic(expected = "Each row must have exactly")]
    fn test_from_ascii_rejects_ragged_rows() {
        let _ = Board::from_ascii("...\n..\n");
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        (1usize..8, 1usize..10).prop_flat_map(|(w, h)| {
            proptest::collection::vec(proptest::bool::weighted(0.4), w * h).prop_map(
                move |bits| {
                    let mut board = Board::new(w, h);
                    for (i, bit) in bits.into_iter().enumerate() {
                        if bit {
                            board.rows[i / w].cells[i % w] = Cell::Filled(PieceColor::GRAY);
                        }
                    }
                    board
                },
            )
        })
    }

    fn arb_piece() -> impl Strategy<Value = Piece> {
        (0..PieceKind::LEN, 0u8..4, -4i32..10, -4i32..12).prop_map(|(k, r, x, y)| {
            Piece::new(PieceKind::ALL[k], PieceRotation::new(r), x, y)
        })
    }

    proptest! {
        #[test]
        fn prop_valid_position_matches_cell_check(
            board in arb_board(),
            piece in arb_piece(),
            dx in -3i32..4,
            dy in -3i32..4,
            rotation in proptest::option::of(0u8..4),
        ) {
            let rotation = rotation.map(PieceRotation::new);
            let moved = piece
                .moved(dx, dy)
                .with_rotation(rotation.unwrap_or(piece.rotation()));
            let expected = moved.occupied_cells().all(|(x, y)| {
                (0..board.width() as i32).contains(&x)
                    && (0..board.height() as i32).contains(&y)
                    && board.rows[y as usize].cells[x as usize].is_empty()
            });
            prop_assert_eq!(board.is_valid_position(&piece, dx, dy, rotation), expected);
        }

        #[test]
        fn prop_clone_then_mutate_leaves_original(board in arb_board(), piece in arb_piece()) {
            let before = board.to_string();
            let mut clone = board.clone();
            prop_assert_eq!(clone.metrics(), board.metrics());
            if clone.is_valid_position(&piece, 0, 0, None) {
                clone.lock(&piece);
            }
            clone.clear_full_lines();
            prop_assert_eq!(board.to_string(), before);
        }

        #[test]
        fn prop_clear_full_lines_removes_exactly_full_rows(board in arb_board()) {
            let kept: Vec<String> = board
                .rows()
                .filter(|row| !row.is_filled())
                .map(|row| row.cells().iter().map(|c| if c.is_filled() { '#' } else { '.' }).collect())
                .collect();
            let full = board.height() - kept.len();

            let mut cleared = board.clone();
            prop_assert_eq!(cleared.clear_full_lines(), full);
            prop_assert_eq!(cleared.clear_full_lines(), 0);

            let rows: Vec<String> = cleared
                .rows()
                .map(|row| row.cells().iter().map(|c| if c.is_filled() { '#' } else { '.' }).collect())
                .collect();
            prop_assert!(rows[..full].iter().all(|r| !r.contains('#')));
            prop_assert_eq!(&rows[full..], &kept[..]);
        }
    }
}
