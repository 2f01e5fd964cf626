//! Line-oriented adapters between text streams and the game loop.

use std::io::{BufRead, Split, Write};

use crate::board::BOARD_SIZE;
use crate::error::GameLoopError;
use crate::game_loop::{BoardSource, GameReport, VerdictSink};

/// Reads 8-line blocks. Blank lines between boards are skipped; a block
/// cut short by end of input is returned as-is so parsing rejects it.
/// Invalid UTF-8 decodes to U+FFFD, which the board parser rejects.
pub struct LineBoardSource<R> {
    lines: Split<R>,
}

impl<R: BufRead> LineBoardSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
        }
    }
}

impl<R: BufRead> BoardSource for LineBoardSource<R> {
    fn next_rows(&mut self) -> Result<Option<Vec<String>>, GameLoopError> {
        let mut rows = Vec::with_capacity(BOARD_SIZE);
        while rows.len() < BOARD_SIZE {
            let Some(line) = self.lines.next() else {
                break;
            };
            let bytes = line?;
            let decoded = String::from_utf8_lossy(&bytes);
            let line = decoded.trim_end_matches('\r');
            if rows.is_empty() && line.trim().is_empty() {
                continue;
            }
            rows.push(line.to_string());
        }

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows))
        }
    }
}

/// Writes `Game #<n>: <status>.` lines.
pub struct TextSink<W> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VerdictSink for TextSink<W> {
    fn emit(&mut self, report: &GameReport) -> Result<(), GameLoopError> {
        writeln!(self.out, "{report}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GameLoopError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per game.
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VerdictSink for JsonLinesSink<W> {
    fn emit(&mut self, report: &GameReport) -> Result<(), GameLoopError> {
        serde_json::to_writer(&mut self.out, report)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GameLoopError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_loop::Verdict;

    #[test]
    fn test_blank_lines_between_boards_are_skipped() {
        let input = "\n........\n........\n........\n........\n........\n........\n........\n.......k\n\n\r\nK.......\n";
        let mut source = LineBoardSource::new(input.as_bytes());

        let first = source.next_rows().unwrap().unwrap();
        assert_eq!(first.len(), 8);
        assert_eq!(first[7], ".......k");

        // Truncated block comes back short
        let second = source.next_rows().unwrap().unwrap();
        assert_eq!(second, vec!["K.......".to_string()]);

        assert!(source.next_rows().unwrap().is_none());
    }

    #[test]
    fn test_carriage_returns_stripped() {
        let input = "k.......\r\n".repeat(8);
        let mut source = LineBoardSource::new(input.as_bytes());
        let rows = source.next_rows().unwrap().unwrap();
        assert!(rows.iter().all(|r| r == "k......."));
    }

    #[test]
    fn test_invalid_utf8_row_survives_as_replacement_char() {
        let mut input = b"k.......\n".repeat(7);
        input.extend_from_slice(b"...\xFF....\n");
        let mut source = LineBoardSource::new(input.as_slice());
        let rows = source.next_rows().unwrap().unwrap();
        assert_eq!(rows[7], "...\u{FFFD}....");
        assert!(source.next_rows().unwrap().is_none());
    }

    #[test]
    fn test_text_sink_format() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&GameReport { game: 1, verdict: Verdict::BlackInCheck, attacker: None })
            .unwrap();
        sink.finish().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "Game #1: black king is in check.\n");
    }

    #[test]
    fn test_json_sink_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&GameReport { game: 1, verdict: Verdict::NoneInCheck, attacker: None })
            .unwrap();
        sink.emit(&GameReport { game: 2, verdict: Verdict::WhiteInCheck, attacker: None })
            .unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["verdict"], "none_in_check");
        assert_eq!(lines[1]["game"], 2);
        assert!(lines[1]["attacker"].is_null());
    }
}
