//! Line-delimited JSON transport
//!
//! One panel request per input line, one event per output line. All
//! logging goes to stderr; stdout carries protocol messages only.

use std::io::{BufRead, Write};

use review_core::{DesignHost, OutboundEvent, PageStore, SessionController, SessionPhase};

use crate::config::Args;
use crate::document_host::SnapshotHost;
use crate::error::HarnessError;
use crate::file_store::FilePageStore;

/// Run a session on stdin/stdout with the configured document and store
pub fn run_stdio(args: &Args) -> Result<(), HarnessError> {
    let host = SnapshotHost::load(&args.document, args.actor())?;
    let store = FilePageStore::open(&args.store)?;
    let mut session = SessionController::new(host, store);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())
}

/// Emit the startup events, then serve requests until `close-plugin` or EOF
pub fn run_session<H, S, R, W>(
    session: &mut SessionController<H, S>,
    reader: R,
    mut writer: W,
) -> Result<(), HarnessError>
where
    H: DesignHost,
    S: PageStore,
    R: BufRead,
    W: Write,
{
    for event in session.start() {
        write_event(&mut writer, &event)?;
    }

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(reply) = session.handle_json(line) {
            writeln!(writer, "{}", reply)?;
            writer.flush()?;
        }

        if session.phase() == SessionPhase::Closed {
            tracing::info!("Session closed");
            return Ok(());
        }
    }

    tracing::info!("EOF reached, shutting down");
    Ok(())
}

fn write_event<W: Write>(writer: &mut W, event: &OutboundEvent) -> Result<(), HarnessError> {
    let body = serde_json::to_string(event)?;
    writeln!(writer, "{}", body)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_core::MemoryPageStore;
    use shared_types::{Actor, PageNode, SceneNode};
    use std::io::Cursor;

    fn session() -> TestSession {
        let page = PageNode::new("1:0", "Checkout")
            .with_children(vec![SceneNode::frame("2:1", "Checkout payment step")]);
        SessionController::new(
            SnapshotHost::new(page, Some(Actor::new("Alice", None))),
            MemoryPageStore::new(),
        )
    }

    type TestSession = SessionController<SnapshotHost, MemoryPageStore>;

    fn run(input: &str) -> (Vec<serde_json::Value>, TestSession) {
        let mut session = session();
        let mut output = Vec::new();
        run_session(&mut session, Cursor::new(input), &mut output).unwrap();

        let events = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (events, session)
    }

    #[test]
    fn test_startup_only_on_empty_input() {
        let (events, _) = run("");
        let kinds: Vec<_> = events.iter().map(|e| e["type"].clone()).collect();
        assert_eq!(
            kinds,
            vec![
                "load-saved-checks",
                "load-peer-review",
                "page-info",
                "auto-validation-results"
            ]
        );
    }

    #[test]
    fn test_requests_without_reply_produce_no_output() {
        let input = "\n{\"type\":\"select-frame\",\"frameId\":\"2:1\"}\nnot json\n";
        let (events, session) = run(input);
        assert_eq!(events.len(), 4);
        assert_eq!(session.host().selection(), Some("2:1"));
    }

    #[test]
    fn test_close_stops_reading() {
        let input = "{\"type\":\"close-plugin\"}\n{\"type\":\"get-current-user\"}\n";
        let (events, session) = run(input);
        assert_eq!(events.len(), 4);
        assert!(session.host().is_closed());
    }

    #[test]
    fn test_reply_per_request() {
        let (events, _) = run("{\"type\":\"get-current-user\"}\n");
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[4],
            serde_json::json!({"type": "current-user-info", "currentUser": "Alice"})
        );
    }
}
