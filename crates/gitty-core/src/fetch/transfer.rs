//! curl transfer running on its own thread, forwarding the body as it arrives.

use curl::easy::{Easy2, Handler, WriteError};
use std::str;
use std::sync::mpsc::SyncSender;
use std::time::Duration;

use super::body::Event;

/// Settings for one GET.
#[derive(Debug, Clone)]
pub(crate) struct TransferOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

/// Collects the status line and forwards body chunks over the channel.
struct Forward {
    tx: SyncSender<Event>,
    status: Option<u32>,
    announced: bool,
}

impl Forward {
    fn success(&self) -> bool {
        self.status.is_some_and(|c| (200..300).contains(&c))
    }
}

impl Handler for Forward {
    fn header(&mut self, data: &[u8]) -> bool {
        // With redirects there is one status line per hop; the last one wins.
        if let Some(code) = parse_status_line(data) {
            self.status = Some(code);
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        if !self.announced {
            self.announced = true;
            if self.tx.send(Event::Status(self.status.unwrap_or(0))).is_err() {
                return Ok(0);
            }
        }
        if !self.success() {
            // Abort; the reader already knows the status.
            return Ok(0);
        }
        match self.tx.send(Event::Chunk(data.to_vec())) {
            Ok(()) => Ok(data.len()),
            // Reader dropped the body; stop the transfer.
            Err(_) => Ok(0),
        }
    }
}

/// Performs the GET and reports through `tx`: `Status` first, then chunks,
/// then `Done` or `Failed`. Blocks until the transfer ends.
pub(crate) fn run(url: &str, opts: &TransferOptions, tx: SyncSender<Event>) {
    let mut easy = Easy2::new(Forward {
        tx: tx.clone(),
        status: None,
        announced: false,
    });
    if let Err(e) = configure(&mut easy, url, opts) {
        let _ = tx.send(Event::Failed(format!("curl: {}", e)));
        return;
    }

    let outcome = easy.perform();
    let announced = easy.get_ref().announced;
    let success = easy.get_ref().success();
    match outcome {
        Ok(()) => {
            if !announced {
                let code = easy.response_code().unwrap_or(0);
                let _ = tx.send(Event::Status(code));
            }
            let _ = tx.send(Event::Done);
        }
        Err(e) if !announced || success => {
            tracing::debug!(url, "transfer failed: {}", e);
            let _ = tx.send(Event::Failed(e.to_string()));
        }
        // Non-2xx body was aborted on purpose.
        Err(_) => {}
    }
}

fn configure(easy: &mut Easy2<Forward>, url: &str, opts: &TransferOptions) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(())
}

/// Status code from an `HTTP/x y reason` header line.
fn parse_status_line(data: &[u8]) -> Option<u32> {
    let line = str::from_utf8(data).ok()?;
    let rest = line.strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}
