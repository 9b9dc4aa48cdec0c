use super::piece::{Piece, PieceKind, Shape};

/// Playfield width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Playfield height in cells.
pub const BOARD_HEIGHT: usize = 20;

/// Row where drop probing starts, one full bounding box above the board.
pub const DROP_PROBE_ROW: i32 = -4;

/// A single playfield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell (color id 0).
    #[default]
    Empty,
    /// Locked piece of a specific type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Color id: 0 for empty, 1..=7 for locked blocks.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.color_id(),
        }
    }
}

/// Classification of a possibly out-of-range board coordinate.
///
/// Rows above the board form the spawn buffer: they are never stored and
/// never count as filled, but they are not out of bounds either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellProbe {
    /// Column outside the board, or row below the floor.
    Outside,
    /// Valid column, row above row 0.
    SpawnBuffer,
    /// Empty in-bounds cell.
    Open,
    /// Filled in-bounds cell.
    Filled,
}

impl CellProbe {
    /// Whether a piece cell at this coordinate collides.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, CellProbe::Outside | CellProbe::Filled)
    }
}

type Row = [Block; BOARD_WIDTH];

const EMPTY_ROW: Row = [Block::Empty; BOARD_WIDTH];

/// The 10×20 playfield.
///
/// Row 0 is the top (spawn side) and rows grow downward. Queries never mutate;
/// only [`Self::place_shape`], [`Self::fill_piece`] and [`Self::clear_lines`]
/// change the grid.
///
/// ```
/// use quadfall_engine::{Board, PieceKind};
///
/// let mut board = Board::new();
/// let shape = PieceKind::O.shape(0);
/// let top = board.drop_position(&shape, 3).unwrap();
/// board.place_shape(&shape, top, 3, PieceKind::O);
/// assert_eq!(board.column_height(4), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    /// Empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    /// Returns the block at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Block> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> + '_ {
        self.rows.iter()
    }

    #[must_use]
    pub fn probe(&self, row: i32, col: i32) -> CellProbe {
        let Some(col) = usize::try_from(col).ok().filter(|&c| c < BOARD_WIDTH) else {
            return CellProbe::Outside;
        };
        let Ok(row) = usize::try_from(row) else {
            return CellProbe::SpawnBuffer;
        };
        match self.rows.get(row) {
            None => CellProbe::Outside,
            Some(line) if line[col].is_empty() => CellProbe::Open,
            Some(_) => CellProbe::Filled,
        }
    }

    /// Whether `shape` with its box at `(top_row, left_col)` overlaps a wall,
    /// the floor, or a filled cell.
    #[must_use]
    pub fn collides(&self, shape: &Shape, top_row: i32, left_col: i32) -> bool {
        shape
            .cells()
            .into_iter()
            .any(|(dr, dc)| self.probe(top_row + to_i32(dr), left_col + to_i32(dc)).is_blocking())
    }

    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        let position = piece.position();
        self.collides(&piece.shape(), position.row, position.col)
    }

    /// Writes `kind` into every occupied in-bounds cell of the shape.
    ///
    /// Cells in the spawn buffer are dropped.
    pub fn place_shape(&mut self, shape: &Shape, top_row: i32, left_col: i32, kind: PieceKind) {
        for (dr, dc) in shape.cells() {
            let (Ok(row), Ok(col)) = (
                usize::try_from(top_row + to_i32(dr)),
                usize::try_from(left_col + to_i32(dc)),
            ) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(row).and_then(|line| line.get_mut(col)) {
                *cell = Block::Piece(kind);
            }
        }
    }

    pub fn fill_piece(&mut self, piece: &Piece) {
        let position = piece.position();
        self.place_shape(&piece.shape(), position.row, position.col, piece.kind());
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Scans bottom to top. Rows above a removed row shift down by one and the
    /// top row is emptied; the same index is then checked again.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT;
        while row > 0 {
            let index = row - 1;
            if self.is_row_full(index) {
                self.rows.copy_within(0..index, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|block| !block.is_empty())
    }

    /// Top row where `shape` comes to rest when dropped in `left_col`.
    ///
    /// Probing starts at [`DROP_PROBE_ROW`]; returns `None` if that probe
    /// already collides.
    #[must_use]
    pub fn drop_position(&self, shape: &Shape, left_col: i32) -> Option<i32> {
        let mut top_row = DROP_PROBE_ROW;
        if self.collides(shape, top_row, left_col) {
            return None;
        }
        while !self.collides(shape, top_row + 1, left_col) {
            top_row += 1;
        }
        Some(top_row)
    }

    /// `BOARD_HEIGHT - topmost filled row`, or 0 for an empty column.
    #[must_use]
    pub fn column_height(&self, col: usize) -> usize {
        self.rows
            .iter()
            .position(|line| !line[col].is_empty())
            .map_or(0, |top| BOARD_HEIGHT - top)
    }

    pub fn column_heights(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BOARD_WIDTH).map(|col| self.column_height(col))
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.column_heights().sum()
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.column_heights().max().unwrap_or(0)
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        let heights: Vec<usize> = self.column_heights().collect();
        heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
    }

    /// Empty cells with at least one filled cell above them in the same column.
    #[must_use]
    pub fn holes(&self) -> usize {
        (0..BOARD_WIDTH)
            .map(|col| {
                let height = self.column_height(col);
                self.rows[BOARD_HEIGHT - height..]
                    .iter()
                    .filter(|line| line[col].is_empty())
                    .count()
            })
            .sum()
    }

    /// Builds a board from ASCII art for tests and fixtures.
    ///
    /// Each line holds 10 cells: a piece letter for a filled cell, `.` for an
    /// empty one. Lines are aligned to the bottom of the board, so the last
    /// line is row 19.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::new();
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );

        let first_row = BOARD_HEIGHT - lines.len();
        for (offset, line) in lines.iter().enumerate() {
            let cells: Vec<Block> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Block::Empty,
                    _ => Block::Piece(
                        PieceKind::from_char(c).unwrap_or_else(|| panic!("invalid cell {c:?}")),
                    ),
                })
                .collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "each row must have exactly {BOARD_WIDTH} cells, got {} at row {}",
                cells.len(),
                first_row + offset
            );
            board.rows[first_row + offset].copy_from_slice(&cells);
        }
        board
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn to_i32(offset: usize) -> i32 {
    offset as i32
}
