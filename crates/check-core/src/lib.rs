//! King-in-check detection for plain-text 8x8 boards.
//!
//! A board is decoded once into typed cells, then each king's square is
//! probed outward for enemy sliders, knights and pawns. The game loop
//! drives this over a stream of boards until an all-empty sentinel.

pub mod attacks;
pub mod board;
pub mod error;
pub mod game_loop;
pub mod io;
pub mod piece;

pub use attacks::{find_attacker, is_attacked, is_king_in_check, Attack};
pub use board::{Board, Square};
pub use error::{BoardError, GameLoopError};
pub use game_loop::{
    evaluate, GameLoop, GameReport, LoopOptions, MissingKing, OnMalformed, RunSummary, Verdict,
};
pub use piece::{Cell, PieceKind, Side};
