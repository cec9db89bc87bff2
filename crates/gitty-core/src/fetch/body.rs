//! Streaming response body fed by the transfer thread.

use std::io::{self, Read};
use std::sync::mpsc::Receiver;

/// Message from the transfer thread to the reader.
#[derive(Debug)]
pub(crate) enum Event {
    /// Final HTTP status, sent once before any body chunk.
    Status(u32),
    Chunk(Vec<u8>),
    Done,
    /// The transfer failed after it started (timeout, connection reset, short body).
    Failed(String),
}

/// Body of a raw file GET. Bytes arrive from curl as the reader consumes
/// them; a transfer failure surfaces as a read error.
#[derive(Debug)]
pub struct HttpBody {
    rx: Receiver<Event>,
    chunk: Vec<u8>,
    pos: usize,
    finished: bool,
}

impl HttpBody {
    pub(crate) fn new(rx: Receiver<Event>) -> Self {
        Self {
            rx,
            chunk: Vec::new(),
            pos: 0,
            finished: false,
        }
    }
}

impl Read for HttpBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.chunk.len() {
            if self.finished {
                return Ok(0);
            }
            match self.rx.recv() {
                Ok(Event::Chunk(chunk)) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Ok(Event::Status(_)) => {}
                Ok(Event::Done) => self.finished = true,
                Ok(Event::Failed(msg)) => {
                    self.finished = true;
                    return Err(io::Error::new(io::ErrorKind::Other, msg));
                }
                Err(_) => {
                    self.finished = true;
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "transfer ended before the body was complete",
                    ));
                }
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
