//! Attack detection, looking outward from the target square.
//!
//! Each probe walks away from the square under test and reports the
//! first piece of the attacking side that could reach it: sliders along
//! open lines, knights by fixed jumps, pawns from the diagonal behind.
//! Kings are never treated as attackers.

use serde::Serialize;

use crate::board::{Board, Square};
use crate::error::BoardError;
use crate::piece::{PieceKind, Side};

/// Rank and file directions.
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal directions.
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ORTHOGONAL_SLIDERS: [PieceKind; 2] = [PieceKind::Rook, PieceKind::Queen];
const DIAGONAL_SLIDERS: [PieceKind; 2] = [PieceKind::Bishop, PieceKind::Queen];

/// A piece that attacks the square under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attack {
    pub kind: PieceKind,
    pub side: Side,
    pub from: Square,
}

/// First attacker of `target` belonging to `attacker`, probing rook
/// lines, then bishop lines, then knight jumps, then pawns.
pub fn find_attacker(board: &Board, target: Square, attacker: Side) -> Option<Attack> {
    slider_attack(board, target, attacker, &ORTHOGONAL_DIRECTIONS, &ORTHOGONAL_SLIDERS)
        .or_else(|| slider_attack(board, target, attacker, &DIAGONAL_DIRECTIONS, &DIAGONAL_SLIDERS))
        .or_else(|| knight_attack(board, target, attacker))
        .or_else(|| pawn_attack(board, target, attacker))
}

/// Is `target` attacked by any piece of `attacker`?
pub fn is_attacked(board: &Board, target: Square, attacker: Side) -> bool {
    find_attacker(board, target, attacker).is_some()
}

/// The enemy piece giving check to `side`'s king, if any.
pub fn checking_piece(board: &Board, side: Side) -> Result<Option<Attack>, BoardError> {
    let king = board.king_square(side)?;
    Ok(find_attacker(board, king, !side))
}

/// Is `side`'s king attacked? Fails unless the side has exactly one king.
pub fn is_king_in_check(board: &Board, side: Side) -> Result<bool, BoardError> {
    Ok(checking_piece(board, side)?.is_some())
}

fn slider_attack(
    board: &Board,
    target: Square,
    attacker: Side,
    directions: &[(i8, i8)],
    sliders: &[PieceKind],
) -> Option<Attack> {
    for &(dr, dc) in directions {
        let mut cursor = target.offset(dr, dc);
        while let Some(square) = cursor {
            let cell = board.cell(square);
            if !cell.is_empty() {
                if cell.is_one_of(attacker, sliders) {
                    return Some(Attack {
                        kind: cell.kind,
                        side: attacker,
                        from: square,
                    });
                }
                // Blocked by the first occupied square in this direction
                break;
            }
            cursor = square.offset(dr, dc);
        }
    }
    None
}

fn knight_attack(board: &Board, target: Square, attacker: Side) -> Option<Attack> {
    KNIGHT_JUMPS
        .iter()
        .filter_map(|&(dr, dc)| target.offset(dr, dc))
        .find(|&square| board.cell(square).is_one_of(attacker, &[PieceKind::Knight]))
        .map(|from| Attack {
            kind: PieceKind::Knight,
            side: attacker,
            from,
        })
}

fn pawn_attack(board: &Board, target: Square, attacker: Side) -> Option<Attack> {
    // An attacking pawn sits one step behind the target, from its own point of view
    let dr = -attacker.pawn_advance();
    [-1, 1]
        .into_iter()
        .filter_map(|dc| target.offset(dr, dc))
        .find(|&square| board.cell(square).is_one_of(attacker, &[PieceKind::Pawn]))
        .map(|from| Attack {
            kind: PieceKind::Pawn,
            side: attacker,
            from,
        })
}
