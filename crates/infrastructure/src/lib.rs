//! dnspipe infrastructure: DNS wire codec, TCP/UDP transports, the
//! pipelining resolver, and logging setup.

pub mod dns;
pub mod logging;

pub use dns::{MessageBuilder, Resolver, ResolverOptions, ResolverState};
pub use logging::init_logging;
