use std::iter;

use autotris_engine::{Board, Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{BlockDisplay, CellView};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn columns(&self) -> u16 {
        u16::try_from(self.board.width()).unwrap_or(u16::MAX)
    }

    fn rows(&self) -> u16 {
        u16::try_from(self.board.height()).unwrap_or(u16::MAX)
    }

    pub fn width(&self) -> u16 {
        self.columns() * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.rows() * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Board cells with the ghost and the falling piece drawn over them.
    fn cell_views(&self) -> Vec<Vec<CellView>> {
        let mut views: Vec<Vec<CellView>> = self
            .board
            .rows()
            .map(|row| row.cells().iter().map(|&c| CellView::Board(c)).collect())
            .collect();
        let mut paint = |piece: &Piece, view: CellView| {
            for (x, y) in piece.occupied_cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if let Some(cell) = views.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = view;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            paint(ghost, CellView::Ghost);
        }
        if let Some(piece) = &self.falling_piece {
            paint(
                piece,
                CellView::Board(Cell::Filled(piece.kind().color())),
            );
        }
        views
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.columns()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..self.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cell_views()) {
            for (grid_cell, view) in iter::zip(grid_row, row) {
                BlockDisplay::from_view(view, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use autotris_engine::{PieceColor, PieceKind, PieceRotation};

    use super::*;

    #[test]
    fn test_falling_piece_drawn_over_ghost() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ....
            #...
            ",
        );
        let piece = Piece::new(PieceKind::O, PieceRotation::ZERO, 1, 0);
        let ghost = Piece::new(PieceKind::O, PieceRotation::ZERO, 1, 2);
        let display = BoardDisplay::new(&board).ghost(ghost).falling_piece(piece);
        let views = display.cell_views();

        let filled = CellView::Board(Cell::Filled(PieceColor::YELLOW));
        assert_eq!(views[0][1], filled);
        assert_eq!(views[1][2], filled);
        assert_eq!(views[2][1], CellView::Ghost);
        assert_eq!(views[3][2], CellView::Ghost);
        assert_eq!(views[3][0], CellView::Board(Cell::Filled(PieceColor::GRAY)));
        assert_eq!(views[0][0], CellView::Board(Cell::Empty));
    }

    #[test]
    fn test_size_follows_board_dimensions() {
        let board = Board::new(6, 12);
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(display.width(), 6 * 2 + 2);
        assert_eq!(display.height(), 12 + 2);
    }
}
