// Newline-delimited JSON-RPC transport

use crate::server::McpServer;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, warn};

/// Upper bound for one incoming message.
const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

/// Pending responses buffered for the writer.
const WRITE_QUEUE: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Writer task failed: {0}")]
    Writer(String),
}

/// Serve requests read line by line from `reader`, writing one response line
/// per request to `writer`.
///
/// Each request runs on its own task; a single writer task owns `writer`, so
/// responses never interleave. Returns once `reader` reaches EOF and every
/// in-flight request has been answered.
pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let (tx, mut rx) = mpsc::channel::<String>(WRITE_QUEUE);

    let writer_task = tokio::spawn(async move {
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        while let Some(line) = rx.recv().await {
            if let Err(e) = sink.send(line).await {
                return Err(codec_to_io(e));
            }
        }
        Ok(())
    });

    while let Some(next) = lines.next().await {
        let line = match next {
            Ok(line) => line,
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!(max = MAX_LINE_LENGTH, "Message too long, discarded");
                let response = crate::protocol::JsonRpcResponse::error(
                    serde_json::Value::Null,
                    crate::protocol::JsonRpcError::parse_error(),
                );
                send(&tx, &response).await;
                continue;
            }
            Err(LinesCodecError::Io(e)) => return Err(e.into()),
        };

        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.handle_line(&line).await {
                send(&tx, &response).await;
            }
        });
    }

    debug!("Input closed, draining responses");
    drop(tx);

    match writer_task.await {
        Ok(result) => result.map_err(TransportError::from),
        Err(e) => Err(TransportError::Writer(e.to_string())),
    }
}

/// Serve on the process's stdin/stdout.
pub async fn serve_stdio(server: Arc<McpServer>) -> Result<(), TransportError> {
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

async fn send(tx: &mpsc::Sender<String>, response: &crate::protocol::JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if tx.send(line).await.is_err() {
                warn!("Writer closed, response dropped");
            }
        }
        Err(e) => error!(error = %e, "Failed to encode response"),
    }
}

fn codec_to_io(error: LinesCodecError) -> std::io::Error {
    match error {
        LinesCodecError::Io(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
    }
}
