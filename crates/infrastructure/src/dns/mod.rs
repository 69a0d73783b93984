pub mod forwarding;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use forwarding::MessageBuilder;
pub use resolver::{ResolveCallback, Resolver, ResolverOptions, ResolverState};
pub use transport::{create_transport, DnsTransport, TcpTransport, Transport, UdpTransport};
