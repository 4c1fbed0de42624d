//! Read-eval loop over operator input.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use scancheck_invoicing::Presenter;

use crate::command::{Command, HELP};
use crate::session::ScanSession;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Handle a single line of operator input.
pub async fn handle_line<W: Write>(session: &mut ScanSession<W>, line: &str) -> Flow {
    match Command::parse(line) {
        Command::Empty => {}
        Command::Scan { code, quantity } => {
            if session.scan(&code, quantity.as_deref()).is_ok() {
                let status = session.status_line();
                session.presenter_mut().notice(&status);
            }
        }
        Command::Load(paths) => {
            let summary = session.load_files(paths).await;
            let message = format!(
                "Loaded {} invoice(s), {} rejected. {}",
                summary.loaded,
                summary.rejected,
                session.status_line()
            );
            session.presenter_mut().notice(&message);
        }
        Command::Show => {
            session.presenter_mut().render_all();
            let status = session.status_line();
            session.presenter_mut().notice(&status);
        }
        Command::Export(path) => session.export(&path),
        Command::Help => session.presenter_mut().notice(HELP),
        Command::Quit => return Flow::Quit,
        Command::Unknown(input) => session
            .presenter_mut()
            .alert(&format!("Unknown command `{input}`. Type :help for usage.")),
    }
    Flow::Continue
}

/// Read lines from `input` until it ends or the operator quits.
pub async fn run<W, R>(session: &mut ScanSession<W>, input: R) -> std::io::Result<()>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if handle_line(session, &line).await == Flow::Quit {
            break;
        }
    }
    tracing::info!(status = %session.status_line(), "session finished");
    Ok(())
}
