use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::board::{BOARD_WIDTH, Board};

/// Occupancy of a tetromino inside its 4×4 bounding box.
///
/// Indexed as `[row][col]`, row 0 at the top. Every catalog shape has exactly
/// four occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape([[bool; 4]; 4]);

impl Shape {
    /// Shape with no occupied cells.
    pub const EMPTY: Self = Self([[false; 4]; 4]);

    #[must_use]
    pub const fn from_rows(rows: [[bool; 4]; 4]) -> Self {
        Self(rows)
    }

    /// Returns this shape rotated 90° clockwise (`r[i][j] = m[3-j][i]`).
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let mut cells = [[false; 4]; 4];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                cells[i][j] = self.0[3 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self(cells)
    }

    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.0[row][col]
    }

    #[must_use]
    pub const fn rows(&self) -> &[[bool; 4]; 4] {
        &self.0
    }

    /// Returns the occupied `(row, col)` offsets in row-major order.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<(usize, usize), 4> {
        let mut cells = ArrayVec::new();
        for (row, line) in self.0.iter().enumerate() {
            for (col, &occupied) in line.iter().enumerate() {
                if occupied {
                    cells.push((row, col));
                }
            }
        }
        cells
    }
}

/// Enum representing the type of piece.
///
/// Discriminants follow the color ids minus one, so `I` renders with color 1
/// and `Z` with color 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types, in color id order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::J,
        Self::L,
        Self::S,
        Self::Z,
    ];

    /// Color id used by the board (1..=7).
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Number of distinct rotation states stored for this type.
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        ROTATION_COUNTS[self as usize]
    }

    /// Distinct rotation states, spawn orientation first.
    ///
    /// Each state is the previous one rotated 90° clockwise.
    #[must_use]
    pub fn rotation_states(self) -> &'static [Shape] {
        &ROTATION_STATES[self as usize][..self.rotation_count()]
    }

    /// Shape for a rotation index, taken modulo the stored count.
    #[must_use]
    pub fn shape(self, rotation: usize) -> Shape {
        ROTATION_STATES[self as usize][rotation % self.rotation_count()]
    }

    /// Spawn-orientation template flattened to 16 cells, row-major.
    #[must_use]
    pub const fn template(self) -> [bool; 16] {
        let rows = SPAWN_SHAPES[self as usize].0;
        let mut flat = [false; 16];
        let mut i = 0;
        while i < 16 {
            flat[i] = rows[i / 4][i % 4];
            i += 1;
        }
        flat
    }

    /// Shape after `quarter` clockwise quarter turns, read directly from the
    /// flattened template.
    ///
    /// This is the four-state encoding: the quarter is taken modulo 4 and each
    /// cell `(i, j)` maps to a template index. For types with fewer stored
    /// states the result matches [`Self::shape`] up to translation.
    #[must_use]
    pub const fn quarter_turn(self, quarter: usize) -> Shape {
        let template = self.template();
        let mut cells = [[false; 4]; 4];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                let index = match quarter % 4 {
                    0 => i * 4 + j,
                    1 => (3 - j) * 4 + i,
                    2 => (3 - i) * 4 + (3 - j),
                    _ => j * 4 + (3 - i),
                };
                cells[i][j] = template[index];
                j += 1;
            }
            i += 1;
        }
        Shape(cells)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use quadfall_engine::PieceKind;
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
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

const ROTATION_COUNTS: [usize; PieceKind::LEN] = [2, 1, 4, 4, 4, 2, 2];

const SPAWN_SHAPES: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    [
        // I-piece
        Shape([EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        Shape([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
        // T-piece
        Shape([[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // J-piece
        Shape([[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        Shape([[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        Shape([[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        Shape([[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    ]
};

/// Generates 4 clockwise rotations; only the first `rotation_count` are used.
const fn rotations(spawn: Shape) -> [Shape; 4] {
    let mut states = [spawn; 4];
    let mut i = 1;
    while i < 4 {
        states[i] = states[i - 1].rotated_cw();
        i += 1;
    }
    states
}

static ROTATION_STATES: [[Shape; 4]; PieceKind::LEN] = {
    let mut table = [[Shape::EMPTY; 4]; PieceKind::LEN];
    let mut kind = 0;
    while kind < PieceKind::LEN {
        table[kind] = rotations(SPAWN_SHAPES[kind]);
        kind += 1;
    }
    table
};

/// Anchor of a piece's 4×4 box: the board row and column of its top-left cell.
///
/// Rows above the board are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiecePosition {
    pub row: i32,
    pub col: i32,
}

impl PiecePosition {
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new(0, (BOARD_WIDTH / 2) as i32 - 2);

    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    const fn shifted(self, rows: i32, cols: i32) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }
}

/// A tetromino at a specific location and rotation.
///
/// Pieces are immutable; movement and rotation return new values.
///
/// ```
/// use quadfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.right().rotated_cw();
/// assert_eq!(moved.rotation(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: usize,
    position: PiecePosition,
}

impl Piece {
    /// Piece in spawn orientation at the spawn anchor.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            position: PiecePosition::SPAWN,
        }
    }

    #[must_use]
    pub fn with_placement(kind: PieceKind, rotation: usize, position: PiecePosition) -> Self {
        Self {
            kind,
            rotation: rotation % kind.rotation_count(),
            position,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Absolute `(row, col)` board coordinates of the four occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { row, col } = self.position;
        self.shape()
            .cells()
            .into_iter()
            .map(move |(dr, dc)| (row + offset(dr), col + offset(dc)))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(0, -1)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(0, 1)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(1, 0)
    }

    const fn moved(&self, rows: i32, cols: i32) -> Self {
        Self {
            position: self.position.shifted(rows, cols),
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let count = self.kind.rotation_count();
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated_ccw(&self) -> Self {
        let count = self.kind.rotation_count();
        Self {
            rotation: (self.rotation + count - 1) % count,
            ..*self
        }
    }

    /// Rotates clockwise, falling back to a one-column wall kick.
    #[must_use]
    pub fn kicked_cw(&self, board: &Board) -> Option<Self> {
        wall_kick(board, self.rotated_cw())
    }

    /// Rotates counter-clockwise, falling back to a one-column wall kick.
    #[must_use]
    pub fn kicked_ccw(&self, board: &Board) -> Option<Self> {
        wall_kick(board, self.rotated_ccw())
    }

    /// Lowest position reachable by moving straight down.
    #[must_use]
    pub fn dropped(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while !board.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

/// Tries the rotated piece in place, then one column left, then one column right.
fn wall_kick(board: &Board, rotated: Piece) -> Option<Piece> {
    [rotated, rotated.left(), rotated.right()]
        .into_iter()
        .find(|piece| !board.is_colliding(piece))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn offset(cell: usize) -> i32 {
    cell as i32
}
