//! Piece identities decoded once from the board text.

use std::fmt;
use std::ops::Not;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Row step a pawn of this side takes when it advances.
    /// White starts on the last rows and moves toward row 0.
    pub fn pawn_advance(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Empty,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase letter used in the board text, `.` for empty.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Empty => '.',
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// One square of the grid. Empty cells carry `Side::White` as filler;
/// use [`Cell::occupant`] instead of reading `side` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub kind: PieceKind,
    pub side: Side,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: PieceKind::Empty,
        side: Side::White,
    };

    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn is_empty(self) -> bool {
        self.kind == PieceKind::Empty
    }

    /// The owning side, or `None` for an empty cell.
    pub fn occupant(self) -> Option<Side> {
        if self.is_empty() {
            None
        } else {
            Some(self.side)
        }
    }

    /// Is this a piece of `side` whose kind is one of `kinds`?
    pub fn is_one_of(self, side: Side, kinds: &[PieceKind]) -> bool {
        self.occupant() == Some(side) && kinds.contains(&self.kind)
    }

    /// Decode a board character: `.` is empty, lowercase is Black,
    /// uppercase is White.
    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Cell::new(kind, side))
    }

    pub fn to_char(self) -> char {
        match self.occupant() {
            None => '.',
            Some(Side::White) => self.kind.letter().to_ascii_uppercase(),
            Some(Side::Black) => self.kind.letter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_every_board_character() {
        for c in ['p', 'n', 'b', 'r', 'q', 'k', 'P', 'N', 'B', 'R', 'Q', 'K', '.'] {
            let cell = Cell::from_char(c).unwrap();
            assert_eq!(cell.to_char(), c);
        }
        assert_eq!(
            Cell::from_char('Q'),
            Some(Cell::new(PieceKind::Queen, Side::White))
        );
        assert_eq!(
            Cell::from_char('n'),
            Some(Cell::new(PieceKind::Knight, Side::Black))
        );
    }

    #[test]
    fn test_unknown_characters_rejected() {
        for c in ['x', 'Z', ' ', '1', '#'] {
            assert_eq!(Cell::from_char(c), None, "char {c:?}");
        }
    }

    #[test]
    fn test_empty_cell_has_no_occupant() {
        assert!(Cell::EMPTY.is_empty());
        assert_eq!(Cell::EMPTY.occupant(), None);
        assert!(!Cell::EMPTY.is_one_of(Side::White, &[PieceKind::Empty]));
    }

    #[test]
    fn test_side_negation() {
        assert_eq!(!Side::White, Side::Black);
        assert_eq!(!Side::Black, Side::White);
        assert_eq!(Side::White.pawn_advance(), -Side::Black.pawn_advance());
    }
}
