//! Immutable 8x8 board with cached king locations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BoardError;
use crate::piece::{Cell, PieceKind, Side};

pub const BOARD_SIZE: usize = 8;

/// A (row, col) coordinate. Row 0 is the first line of the board text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// The square `(dr, dc)` away, or `None` past the edge.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    king_squares: [Option<Square>; 2],
    king_counts: [usize; 2],
}

impl Board {
    /// Build a board from exactly 8 rows of 8 characters each.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::MalformedBoard(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut cells = [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE];
        let mut king_squares = [None; 2];
        let mut king_counts = [0usize; 2];

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != BOARD_SIZE {
                return Err(BoardError::MalformedBoard(format!(
                    "row {row} has {width} characters, expected {BOARD_SIZE}"
                )));
            }

            for (col, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    BoardError::MalformedBoard(format!(
                        "unrecognized character {c:?} at row {row}, column {col}"
                    ))
                })?;

                if cell.kind == PieceKind::King {
                    let idx = cell.side.index();
                    king_counts[idx] += 1;
                    king_squares[idx] = Some(Square {
                        row: row as u8,
                        col: col as u8,
                    });
                }
                cells[row][col] = cell;
            }
        }

        Ok(Self {
            cells,
            king_squares,
            king_counts,
        })
    }

    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square.row as usize][square.col as usize]
    }

    /// True for the all-dots board that ends the input.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_empty())
    }

    pub fn king_count(&self, side: Side) -> usize {
        self.king_counts[side.index()]
    }

    /// The unique king square of `side`.
    pub fn king_square(&self, side: Side) -> Result<Square, BoardError> {
        let count = self.king_count(side);
        match self.king_squares[side.index()] {
            Some(square) if count == 1 => Ok(square),
            _ => Err(BoardError::InvalidKingCount { side, count }),
        }
    }

    /// Piece placement field of a FEN string. Row 0 maps to rank 8.
    pub fn to_board_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                fen.push('/');
            }
            let mut gap = 0;
            for cell in cells {
                if cell.is_empty() {
                    gap += 1;
                    continue;
                }
                if gap > 0 {
                    fen.push_str(&gap.to_string());
                    gap = 0;
                }
                fen.push(cell.to_char());
            }
            if gap > 0 {
                fen.push_str(&gap.to_string());
            }
        }
        fen
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING: &str = "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR";

    #[test]
    fn test_parse_opening_position() {
        let board: Board = OPENING.parse().unwrap();
        assert_eq!(board.king_square(Side::Black), Ok(Square { row: 0, col: 4 }));
        assert_eq!(board.king_square(Side::White), Ok(Square { row: 7, col: 4 }));
        assert_eq!(
            board.cell(Square { row: 7, col: 3 }),
            Cell::new(PieceKind::Queen, Side::White)
        );
        assert!(!board.is_empty());
        assert_eq!(board.to_string(), OPENING);
    }

    #[test]
    fn test_board_fen() {
        let board: Board = OPENING.parse().unwrap();
        assert_eq!(board.to_board_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");

        let sparse: Board = "k.......\n........\n........\n...q....\n........\n........\n......P.\n.......K"
            .parse()
            .unwrap();
        assert_eq!(sparse.to_board_fen(), "k7/8/8/3q4/8/8/6P1/7K");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let mut rows = vec!["........"; 8];
        rows[3] = ".......";
        let err = Board::from_rows(&rows).unwrap_err();
        assert!(matches!(err, BoardError::MalformedBoard(ref msg) if msg.contains("row 3")));
    }

    #[test]
    fn test_long_row_is_malformed() {
        let mut rows = vec!["........"; 8];
        rows[0] = ".........";
        assert!(matches!(Board::from_rows(&rows), Err(BoardError::MalformedBoard(_))));
    }

    #[test]
    fn test_wrong_row_count_is_malformed() {
        let rows = vec!["........"; 7];
        assert!(matches!(Board::from_rows(&rows), Err(BoardError::MalformedBoard(_))));
    }

    #[test]
    fn test_unknown_character_is_malformed() {
        let mut rows = vec!["........"; 8];
        rows[5] = "...x....";
        let err = Board::from_rows(&rows).unwrap_err();
        assert!(matches!(err, BoardError::MalformedBoard(ref msg) if msg.contains("'x'")));
    }

    #[test]
    fn test_missing_and_duplicate_kings() {
        let board: Board = "k.......\n........\n........\n........\n........\n........\n........\n.......k"
            .parse()
            .unwrap();
        assert_eq!(
            board.king_square(Side::Black),
            Err(BoardError::InvalidKingCount { side: Side::Black, count: 2 })
        );
        assert_eq!(
            board.king_square(Side::White),
            Err(BoardError::InvalidKingCount { side: Side::White, count: 0 })
        );
    }

    #[test]
    fn test_all_dots_is_empty() {
        let board = Board::from_rows(&["........"; 8]).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(2, 1), Square::new(2, 1));
        assert_eq!(Square::new(7, 7).unwrap().offset(1, 0), None);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::all().count(), 64);
    }
}
