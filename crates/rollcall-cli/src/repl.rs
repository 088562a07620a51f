//! Read-eval-print loop.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::app::App;
use crate::editor::{LineEditor, ReadResult};

/// Read commands until `QUIT` or end of input, writing each response to `out`.
pub fn run<E: LineEditor, W: Write>(
    app: &mut App,
    editor: &mut E,
    prompt: &str,
    out: &mut W,
) -> Result<()> {
    loop {
        match editor.read_line(prompt)? {
            ReadResult::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history(&line);

                let response = app.execute(&line);
                for text in &response.lines {
                    writeln!(out, "{}", text)?;
                }
                out.flush()?;

                if response.quit {
                    break;
                }
            }
            ReadResult::Interrupted => {
                writeln!(out)?;
            }
            ReadResult::Eof => {
                debug!("End of input");
                writeln!(out, "Thank You!")?;
                break;
            }
        }
    }
    Ok(())
}
