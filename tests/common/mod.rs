use check_core::game_loop::{GameLoop, LoopOptions, RunSummary};
use check_core::io::{LineBoardSource, TextSink};
use check_core::GameLoopError;

/// Run the game loop over `input` and return the summary and printed text.
pub fn run_text(input: &str, options: LoopOptions) -> (Result<RunSummary, GameLoopError>, String) {
    let mut out = Vec::new();
    let result = GameLoop::new(LineBoardSource::new(input.as_bytes()), TextSink::new(&mut out), options).run();
    (result, String::from_utf8(out).unwrap())
}

/// Join board rows into input text, one board after another.
pub fn boards(blocks: &[[&str; 8]]) -> String {
    let mut text = String::new();
    for block in blocks {
        for row in block {
            text.push_str(row);
            text.push('\n');
        }
        text.push('\n');
    }
    text
}
