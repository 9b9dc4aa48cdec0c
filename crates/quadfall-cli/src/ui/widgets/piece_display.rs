use quadfall_engine::{Block, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// A piece in its spawn orientation, centered in a 4×2 box.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
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
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Occupied cells of the spawn shape, shifted to the origin, and the box size.
fn spawn_footprint(kind: PieceKind) -> (Vec<(usize, usize)>, (usize, usize)) {
    let cells = kind.shape(0).cells();
    let top = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let left = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let cells: Vec<_> = cells.iter().map(|&(r, c)| (r - top, c - left)).collect();
    let height = cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
    let width = cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
    (cells, (width, height))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::from_block(Block::Empty, false);
        for y in area.top()..area.bottom() {
            empty_block.render(Rect::new(area.x, y, area.width, 1), buf);
        }

        let Some(piece) = self.piece else {
            return;
        };
        let (cells, (width, height)) = spawn_footprint(piece);
        let (width, height) = (
            u16::try_from(width).unwrap_or(0),
            u16::try_from(height).unwrap_or(0),
        );
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows: Vec<_> = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal))
            .collect();

        let occupied_block = BlockDisplay::from_block(Block::Piece(piece), false);
        for (row, col) in cells {
            if let Some(&grid_cell) = grid_rows.get(row).and_then(|r| r.get(col)) {
                occupied_block.render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_footprints() {
        let (cells, size) = spawn_footprint(PieceKind::I);
        assert_eq!(size, (4, 1));
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(spawn_footprint(PieceKind::O).1, (2, 2));
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z] {
            assert_eq!(spawn_footprint(kind).1, (3, 2), "{kind:?}");
        }
    }
}
