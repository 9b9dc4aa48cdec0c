use std::iter;

use quadfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Block, Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::BlockDisplay;

#[expect(clippy::cast_possible_truncation)]
const GRID_COLS: u16 = BOARD_WIDTH as u16;
#[expect(clippy::cast_possible_truncation)]
const GRID_ROWS: u16 = BOARD_HEIGHT as u16;

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

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        GRID_COLS * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        GRID_ROWS * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Cell contents with the ghost and falling piece overlaid. Cells above
    /// the visible grid are skipped.
    fn cells(&self) -> [[BlockDisplay; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut cells = [[BlockDisplay::from_block(Block::Empty, true); BOARD_WIDTH]; BOARD_HEIGHT];
        for (cell_row, row) in iter::zip(&mut cells, self.board.rows()) {
            for (cell, block) in iter::zip(cell_row, row) {
                *cell = BlockDisplay::from_block(*block, true);
            }
        }
        let mut overlay = |piece: &Piece, display: BlockDisplay| {
            for (row, col) in piece.occupied_cells() {
                if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col))
                    && let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col))
                {
                    *cell = display;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            overlay(ghost, BlockDisplay::ghost());
        }
        if let Some(piece) = &self.falling_piece {
            let display = BlockDisplay::from_block(Block::Piece(piece.kind()), true);
            overlay(piece, display);
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, display) in iter::zip(grid_row, row) {
                display.render(grid_cell, buf);
            }
        }
    }
}
