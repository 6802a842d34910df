//! Shell layer - a line-oriented front end over the ledger.
//!
//! Each input line is one request. It is parsed and validated, run against the ledger,
//! and answered with a status line followed by the response body.

/// Command parsing and dispatch
pub mod commands;
/// Status mapping and record rendering
pub mod response;

use crate::{core::Ledger, errors::Result};
use commands::Command;
use response::Response;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Reads commands from `input` until EOF or `quit`, writing a response for each.
///
/// Blank lines and lines starting with `#` are ignored.
pub async fn run<R, W>(ledger: &Ledger, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        debug!(line, "Received command");

        let response = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => commands::execute(ledger, command).await,
            Err(e) => Response::from_error(&e),
        };
        output.write_all(format!("{response}\n").as_bytes()).await?;
        output.flush().await?;
    }
    info!("Input closed, shutting down shell.");
    Ok(())
}
