//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Every message on the stream is preceded by its length as a 2-byte
//! big-endian integer. One connection is kept open and reused for every
//! query the resolver sends.

use super::DnsTransport;
use async_trait::async_trait;
use dnspipe_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

/// DNS over TCP transport
pub struct TcpTransport {
    server_addr: SocketAddr,
    stream: Option<TcpStream>,
    /// A failed connect is remembered and never retried.
    connect_error: Option<DomainError>,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            stream: None,
            connect_error: None,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn stream(&mut self) -> Result<&mut TcpStream, DomainError> {
        let server = self.server_addr.to_string();
        self.stream
            .as_mut()
            .ok_or(DomainError::TransportConnectionReset { server })
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    fn needs_connect(&self) -> bool {
        self.stream.is_none()
    }

    fn is_stream(&self) -> bool {
        true
    }

    async fn connect(&mut self) -> Result<(), DomainError> {
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }

        let stream = match TcpStream::connect(self.server_addr).await {
            Ok(stream) => stream,
            Err(e) => {
                let err = DomainError::TransportConnectionRefused {
                    server: self.server_addr.to_string(),
                    reason: e.to_string(),
                };
                warn!(server = %self.server_addr, error = %e, "TCP connect failed");
                self.connect_error = Some(err.clone());
                return Err(err);
            }
        };

        stream.set_nodelay(true).map_err(|e| {
            DomainError::IoError(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        debug!(server = %self.server_addr, "TCP connection established");
        self.stream = Some(stream);
        Ok(())
    }

    async fn send(&mut self, message_bytes: &[u8]) -> Result<(), DomainError> {
        if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
            return Err(DomainError::MessageTooLarge(message_bytes.len()));
        }
        let server_addr = self.server_addr;
        let stream = self.stream()?;
        send_with_length_prefix(stream, message_bytes)
            .await
            .map_err(|e| map_io_error(e, server_addr))?;

        debug!(
            server = %server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );
        Ok(())
    }

    async fn read_length(&mut self) -> Result<usize, DomainError> {
        let server_addr = self.server_addr;
        let stream = self.stream()?;
        read_length_prefix(stream)
            .await
            .map_err(|e| map_io_error(e, server_addr))
    }

    async fn read_body(&mut self, length: usize) -> Result<Vec<u8>, DomainError> {
        let server_addr = self.server_addr;
        let stream = self.stream()?;

        let mut response = vec![0u8; length];
        stream
            .read_exact(&mut response)
            .await
            .map_err(|e| map_io_error(e, server_addr))?;

        debug!(
            server = %server_addr,
            response_len = response.len(),
            "TCP response received"
        );
        Ok(response)
    }

    fn reset(&mut self) {
        if self.stream.take().is_some() {
            debug!(server = %self.server_addr, "TCP connection dropped");
        }
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

fn map_io_error(e: io::Error, server_addr: SocketAddr) -> DomainError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe => DomainError::TransportConnectionReset {
            server: server_addr.to_string(),
        },
        _ => DomainError::IoError(format!("TCP exchange with {} failed: {}", server_addr, e)),
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("DNS message of {} bytes exceeds TCP framing", message_bytes.len()),
        )
    })?;

    let mut frame = Vec::with_capacity(2 + message_bytes.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message_bytes);

    stream.write_all(&frame).await?;
    stream.flush().await
}

pub(crate) async fn read_length_prefix<S>(stream: &mut S) -> io::Result<usize>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    Ok(usize::from(u16::from_be_bytes(len_buf)))
}
