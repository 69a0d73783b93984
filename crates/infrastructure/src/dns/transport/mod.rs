pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dnspipe_domain::{DnsProtocol, DomainError};

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

/// One connection to one upstream, driven a single exchange at a time.
///
/// A round trip is `send`, then `read_length`, then `read_body` with the
/// length just read. Stream transports read a real length prefix; datagram
/// transports report the largest datagram they accept.
#[async_trait]
pub trait DnsTransport: Send {
    /// True when `connect` must run before the next `send`.
    fn needs_connect(&self) -> bool;

    /// True when messages are length-prefixed on a byte stream.
    fn is_stream(&self) -> bool;

    async fn connect(&mut self) -> Result<(), DomainError>;

    async fn send(&mut self, message_bytes: &[u8]) -> Result<(), DomainError>;

    async fn read_length(&mut self) -> Result<usize, DomainError>;

    async fn read_body(&mut self, length: usize) -> Result<Vec<u8>, DomainError>;

    /// Drops the current connection after a failed or abandoned exchange.
    fn reset(&mut self);

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(UdpTransport),
    Tcp(TcpTransport),
}

#[async_trait]
impl DnsTransport for Transport {
    fn needs_connect(&self) -> bool {
        match self {
            Self::Udp(t) => t.needs_connect(),
            Self::Tcp(t) => t.needs_connect(),
        }
    }

    fn is_stream(&self) -> bool {
        match self {
            Self::Udp(t) => t.is_stream(),
            Self::Tcp(t) => t.is_stream(),
        }
    }

    async fn connect(&mut self) -> Result<(), DomainError> {
        match self {
            Self::Udp(t) => t.connect().await,
            Self::Tcp(t) => t.connect().await,
        }
    }

    async fn send(&mut self, message_bytes: &[u8]) -> Result<(), DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes).await,
            Self::Tcp(t) => t.send(message_bytes).await,
        }
    }

    async fn read_length(&mut self) -> Result<usize, DomainError> {
        match self {
            Self::Udp(t) => t.read_length().await,
            Self::Tcp(t) => t.read_length().await,
        }
    }

    async fn read_body(&mut self, length: usize) -> Result<Vec<u8>, DomainError> {
        match self {
            Self::Udp(t) => t.read_body(length).await,
            Self::Tcp(t) => t.read_body(length).await,
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Udp(t) => t.reset(),
            Self::Tcp(t) => t.reset(),
        }
    }

    fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

pub fn create_transport(protocol: &DnsProtocol) -> Transport {
    match protocol {
        DnsProtocol::Udp { addr } => Transport::Udp(UdpTransport::new(*addr)),
        DnsProtocol::Tcp { addr } => Transport::Tcp(TcpTransport::new(*addr)),
    }
}
