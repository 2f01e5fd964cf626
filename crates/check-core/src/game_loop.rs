//! Game loop: pull boards from a source, judge both kings, emit verdicts.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::attacks::{checking_piece, Attack};
use crate::board::Board;
use crate::error::{BoardError, GameLoopError};
use crate::piece::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    WhiteInCheck,
    BlackInCheck,
    NoneInCheck,
}

impl Verdict {
    pub fn message(self) -> &'static str {
        match self {
            Verdict::WhiteInCheck => "white king is in check",
            Verdict::BlackInCheck => "black king is in check",
            Verdict::NoneInCheck => "no king is in check",
        }
    }
}

/// What to do with a board that fails to parse or has a bad king count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMalformed {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log the board, drop it and keep reading.
    Skip,
}

/// What to do when a side has no king at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKing {
    /// A side without a king cannot be in check.
    #[default]
    Ignore,
    /// Treat it as `InvalidKingCount`.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopOptions {
    pub on_malformed: OnMalformed,
    pub missing_king: MissingKing,
}

/// Verdict for one evaluated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameReport {
    /// 1-based, counts evaluated games only
    pub game: usize,
    pub verdict: Verdict,
    /// Piece giving the reported check
    pub attacker: Option<Attack>,
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game #{}: {}.", self.game, self.verdict.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub games: usize,
    pub skipped: usize,
}

/// Supplies raw board rows. `None` means the input is exhausted.
pub trait BoardSource {
    fn next_rows(&mut self) -> Result<Option<Vec<String>>, GameLoopError>;
}

/// Receives one report per evaluated game.
pub trait VerdictSink {
    fn emit(&mut self, report: &GameReport) -> Result<(), GameLoopError>;

    /// Called once when the loop terminates normally.
    fn finish(&mut self) -> Result<(), GameLoopError> {
        Ok(())
    }
}

impl VerdictSink for Vec<GameReport> {
    fn emit(&mut self, report: &GameReport) -> Result<(), GameLoopError> {
        self.push(*report);
        Ok(())
    }
}

/// Judge both kings on one board. White in check wins the tie-break.
pub fn evaluate(board: &Board, missing_king: MissingKing) -> Result<(Verdict, Option<Attack>), BoardError> {
    let white = side_in_check(board, Side::White, missing_king)?;
    let black = side_in_check(board, Side::Black, missing_king)?;

    match (white, black) {
        (Some(attack), other) => {
            if other.is_some() {
                warn!(board = %board.to_board_fen(), "Both kings are attacked, reporting white");
            }
            Ok((Verdict::WhiteInCheck, Some(attack)))
        }
        (None, Some(attack)) => Ok((Verdict::BlackInCheck, Some(attack))),
        (None, None) => Ok((Verdict::NoneInCheck, None)),
    }
}

fn side_in_check(board: &Board, side: Side, missing_king: MissingKing) -> Result<Option<Attack>, BoardError> {
    match checking_piece(board, side) {
        Err(BoardError::InvalidKingCount { count: 0, .. }) if missing_king == MissingKing::Ignore => Ok(None),
        other => other,
    }
}

enum LoopState {
    Reading,
    Evaluating(Board),
    Terminated,
}

pub struct GameLoop<S, K> {
    source: S,
    sink: K,
    options: LoopOptions,
    state: LoopState,
    boards_read: usize,
    summary: RunSummary,
}

impl<S: BoardSource, K: VerdictSink> GameLoop<S, K> {
    pub fn new(source: S, sink: K, options: LoopOptions) -> Self {
        Self {
            source,
            sink,
            options,
            state: LoopState::Reading,
            boards_read: 0,
            summary: RunSummary::default(),
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, LoopState::Terminated)
    }

    /// Advance one transition. Returns `false` once terminated.
    pub fn step(&mut self) -> Result<bool, GameLoopError> {
        match std::mem::replace(&mut self.state, LoopState::Terminated) {
            LoopState::Reading => {
                let Some(rows) = self.source.next_rows()? else {
                    return Ok(false);
                };
                self.boards_read += 1;
                match Board::from_rows(&rows) {
                    // Sentinel: all-empty board ends the stream
                    Ok(board) if board.is_empty() => return Ok(false),
                    Ok(board) => self.state = LoopState::Evaluating(board),
                    Err(e) => self.reject(e)?,
                }
            }
            LoopState::Evaluating(board) => match evaluate(&board, self.options.missing_king) {
                Ok((verdict, attacker)) => {
                    self.summary.games += 1;
                    let report = GameReport {
                        game: self.summary.games,
                        verdict,
                        attacker,
                    };
                    debug!(game = report.game, verdict = ?verdict, attacker = ?attacker, "Evaluated board");
                    self.sink.emit(&report)?;
                    self.state = LoopState::Reading;
                }
                Err(e) => self.reject(e)?,
            },
            LoopState::Terminated => return Ok(false),
        }
        Ok(true)
    }

    /// Run until the sentinel, end of input or an aborting error.
    pub fn run(mut self) -> Result<RunSummary, GameLoopError> {
        while self.step()? {}
        self.sink.finish()?;
        info!(games = self.summary.games, skipped = self.summary.skipped, "Game loop finished");
        Ok(self.summary)
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    fn reject(&mut self, source: BoardError) -> Result<(), GameLoopError> {
        match self.options.on_malformed {
            OnMalformed::Abort => Err(GameLoopError::InvalidBoard {
                board: self.boards_read,
                source,
            }),
            OnMalformed::Skip => {
                warn!(board = self.boards_read, error = %source, "Skipping invalid board");
                self.summary.skipped += 1;
                self.state = LoopState::Reading;
                Ok(())
            }
        }
    }
}
