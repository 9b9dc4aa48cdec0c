use quadfall_engine::PieceKind;
use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{BlockDisplay, PieceDisplay};

/// Rows between two previews.
const GAP: u16 = 1;

/// The NEXT column: upcoming pieces, soonest first.
#[derive(Debug)]
pub struct NextPiecesDisplay<'a> {
    upcoming: Vec<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPiecesDisplay<'a> {
    pub fn new(upcoming: Vec<PieceKind>) -> Self {
        Self {
            upcoming,
            block: None,
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
        let count = u16::try_from(self.upcoming.len()).unwrap_or(u16::MAX);
        (slot_height() + GAP)
            .saturating_mul(count)
            .saturating_sub(GAP)
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

fn slot_height() -> u16 {
    2 * BlockDisplay::height()
}

impl Widget for NextPiecesDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let inner = self.block.inner_if_some(area);

        let mut y = inner.top();
        for kind in self.upcoming {
            if y + slot_height() > inner.bottom() {
                break;
            }
            let slot = Rect::new(inner.x, y, inner.width, slot_height());
            PieceDisplay::new().piece(kind).render(slot, buf);
            y += slot_height() + GAP;
        }
    }
}
