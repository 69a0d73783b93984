//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, one per datagram, with no framing. The socket is
//! bound to an ephemeral port on first use and kept for later queries.

use super::DnsTransport;
use async_trait::async_trait;
use dnspipe_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            socket: None,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn socket(&mut self) -> Result<&UdpSocket, DomainError> {
        if self.socket.is_none() {
            // Bind to ephemeral port (0 = OS assigns)
            let bind_addr = if self.server_addr.is_ipv4() {
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
            } else {
                SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
            };
            let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
                DomainError::IoError(format!("Failed to bind UDP socket: {}", e))
            })?;
            self.socket = Some(socket);
        }

        let server = self.server_addr.to_string();
        self.socket
            .as_ref()
            .ok_or(DomainError::TransportConnectionReset { server })
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    fn needs_connect(&self) -> bool {
        false
    }

    fn is_stream(&self) -> bool {
        false
    }

    async fn connect(&mut self) -> Result<(), DomainError> {
        self.socket().await.map(|_| ())
    }

    async fn send(&mut self, message_bytes: &[u8]) -> Result<(), DomainError> {
        let server_addr = self.server_addr;
        let socket = self.socket().await?;

        let bytes_sent = socket
            .send_to(message_bytes, server_addr)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send UDP query to {}: {}",
                    server_addr, e
                ))
            })?;

        debug!(
            server = %server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );
        Ok(())
    }

    /// Datagrams carry no length prefix; the body read is bounded by the
    /// largest response accepted.
    async fn read_length(&mut self) -> Result<usize, DomainError> {
        Ok(MAX_UDP_RESPONSE_SIZE)
    }

    async fn read_body(&mut self, length: usize) -> Result<Vec<u8>, DomainError> {
        let server_addr = self.server_addr;
        let socket = self.socket().await?;
        let mut recv_buf = vec![0u8; length];

        loop {
            let (bytes_received, from_addr) =
                socket.recv_from(&mut recv_buf).await.map_err(|e| {
                    DomainError::IoError(format!(
                        "Failed to receive UDP response from {}: {}",
                        server_addr, e
                    ))
                })?;

            // Validate response came from expected server
            if from_addr != server_addr {
                warn!(
                    expected = %server_addr,
                    received_from = %from_addr,
                    "Ignoring UDP datagram from unexpected source"
                );
                continue;
            }

            if bytes_received == 0 {
                return Err(DomainError::TransportConnectionReset {
                    server: server_addr.to_string(),
                });
            }

            recv_buf.truncate(bytes_received);

            debug!(
                server = %server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );
            return Ok(recv_buf);
        }
    }

    fn reset(&mut self) {
        if self.socket.take().is_some() {
            debug!(server = %self.server_addr, "UDP socket closed");
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
