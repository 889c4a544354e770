use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::MAX_MESSAGE_SIZE;
use crate::protocol::Message;
use crate::transport::Transport;

/// Length-prefixed `bincode` frames over a TCP stream.
///
/// Each frame is a big-endian `u32` length followed by the payload. Clients
/// bound every operation with a timeout; the server waits indefinitely.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Option<Duration>,
    max_message_size: u32,
}

impl TcpTransport {
    /// Transport without an operation timeout (server side).
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            timeout_duration: None,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            timeout_duration: Some(timeout_duration),
            ..Self::new(stream)
        }
    }

    /// Connect, bounding the connection attempt itself by `timeout_duration`.
    pub async fn connect<A: ToSocketAddrs>(addr: A, timeout_duration: Duration) -> anyhow::Result<Self> {
        let stream = timeout(timeout_duration, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", timeout_duration))??;
        stream.set_nodelay(true)?;
        Ok(Self::with_timeout(stream, timeout_duration))
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data = bincode::serialize(&msg)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() as u64 > self.max_message_size as u64 {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }
        let len = (data.len() as u32).to_be_bytes();
        let timeout_duration = self.timeout_duration;
        let stream = &mut self.stream;
        let send_op = async move {
            stream.write_all(&len).await.map_err(io_error)?;
            stream.write_all(&data).await.map_err(io_error)?;
            stream.flush().await.map_err(io_error)?;
            anyhow::Ok(())
        };
        match timeout_duration {
            Some(d) => timeout(d, send_op)
                .await
                .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", d))?,
            None => send_op.await,
        }
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let timeout_duration = self.timeout_duration;
        let stream = &mut self.stream;
        let recv_op = async move {
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.map_err(io_error)?;
            let len = u32::from_be_bytes(len_buf);
            if len > max {
                return Err(anyhow::anyhow!("Message too large: {} bytes (max: {})", len, max));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }
            let mut buf = vec![0u8; len as usize];
            stream.read_exact(&mut buf).await.map_err(io_error)?;
            let msg: Message = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };
        match timeout_duration {
            Some(d) => timeout(d, recv_op)
                .await
                .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", d))?,
            None => recv_op.await,
        }
    }
}
