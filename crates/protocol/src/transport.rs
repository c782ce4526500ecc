//! Line transport: newline-framed text to and from the game server.
//!
//! [`SocketTransport`] bridges the synchronous session loop with async TCP,
//! the same way the game loop is kept free of `.await`: a tokio runtime owns
//! one reader task and one writer task, and the loop only touches the two
//! channels between them.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;

/// How long a closing transport waits for queued commands to reach the socket.
const FLUSH_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Message-framed connection to the server.
pub trait LineTransport {
    /// Next complete line if one has already arrived. Never blocks.
    fn try_recv_line(&mut self) -> Result<Option<String>, TransportError>;

    /// Block until a complete line arrives.
    fn recv_line(&mut self) -> Result<String, TransportError>;

    /// Queue one line for the server. The newline is appended here.
    fn send_line(&mut self, line: &str) -> Result<(), TransportError>;
}

/// TCP connection driven by a private tokio runtime.
pub struct SocketTransport {
    rt: Runtime,
    /// Lines from the reader task; a read failure is sent once, then the task ends.
    inbound: mpsc::UnboundedReceiver<io::Result<String>>,
    outbound: Option<mpsc::UnboundedSender<String>>,
    writer: Option<JoinHandle<()>>,
}

impl SocketTransport {
    /// Connect to `addr` (`host:port`, resolved by tokio).
    pub fn connect(addr: &str) -> Result<Self, TransportError> {
        let rt = Runtime::new()?;
        let stream = rt.block_on(TcpStream::connect(addr))?;
        stream.set_nodelay(true)?;
        tracing::info!(%addr, "connected");
        let (read_half, write_half) = stream.into_split();
        Ok(Self::spawn(rt, read_half, write_half))
    }

    /// Drive an already-open byte stream.
    pub fn spawn<R, W>(rt: Runtime, reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (in_tx, inbound) = mpsc::unbounded_channel::<io::Result<String>>();
        let (outbound, out_rx) = mpsc::unbounded_channel::<String>();

        rt.spawn(read_lines(reader, in_tx));
        let writer = rt.spawn(write_lines(writer, out_rx));

        Self {
            rt,
            inbound,
            outbound: Some(outbound),
            writer: Some(writer),
        }
    }

    fn flush_and_close(&mut self) {
        // Dropping the sender ends the writer loop once the queue is drained.
        self.outbound = None;
        if let Some(writer) = self.writer.take() {
            let _ = self
                .rt
                .block_on(async { tokio::time::timeout(FLUSH_GRACE, writer).await });
        }
    }
}

impl LineTransport for SocketTransport {
    fn try_recv_line(&mut self) -> Result<Option<String>, TransportError> {
        match self.inbound.try_recv() {
            Ok(Ok(line)) => Ok(Some(line)),
            Ok(Err(err)) => Err(TransportError::Io(err)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Closed),
        }
    }

    fn recv_line(&mut self) -> Result<String, TransportError> {
        match self.inbound.blocking_recv() {
            Some(line) => Ok(line?),
            None => Err(TransportError::Closed),
        }
    }

    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        let outbound = self.outbound.as_ref().ok_or(TransportError::Closed)?;
        outbound
            .send(line.to_string())
            .map_err(|_| TransportError::Closed)
    }
}

impl Drop for SocketTransport {
    fn drop(&mut self) {
        self.flush_and_close();
    }
}

async fn read_lines<R: AsyncRead + Unpin>(reader: R, tx: mpsc::UnboundedSender<io::Result<String>>) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(Ok(line)).is_err() {
                    break;
                }
            }
            Ok(None) => {
                tracing::debug!("server closed the connection");
                break;
            }
            Err(err) => {
                tracing::warn!(%err, "socket read failed");
                let _ = tx.send(Err(err));
                break;
            }
        }
    }
}

async fn write_lines<W: AsyncWrite + Unpin>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = rx.recv().await {
        if let Err(err) = write_line(&mut writer, &line).await {
            tracing::warn!(%err, "socket write failed");
            break;
        }
    }
    let _ = writer.shutdown().await;
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// Scripted in-memory transport.
///
/// Serves a fixed list of lines and records everything sent. Once the script
/// is exhausted it reports the connection as closed, like a server hanging up.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    /// `None` entries are polls where nothing has arrived yet.
    incoming: VecDeque<Option<String>>,
    sent: Vec<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            incoming: lines.into_iter().map(|l| Some(l.into())).collect(),
            sent: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.incoming.push_back(Some(line.into()));
    }

    /// Make the next non-blocking receive find nothing ready.
    pub fn push_quiet(&mut self) {
        self.incoming.push_back(None);
    }

    /// Lines sent so far, without newlines.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Lines not yet received.
    pub fn pending(&self) -> usize {
        self.incoming.iter().flatten().count()
    }
}

impl LineTransport for MemoryTransport {
    fn try_recv_line(&mut self) -> Result<Option<String>, TransportError> {
        self.incoming.pop_front().ok_or(TransportError::Closed)
    }

    fn recv_line(&mut self) -> Result<String, TransportError> {
        while let Some(next) = self.incoming.pop_front() {
            if let Some(line) = next {
                return Ok(line);
            }
        }
        Err(TransportError::Closed)
    }

    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.sent.push(line.to_string());
        Ok(())
    }
}
