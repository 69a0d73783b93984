//! dnspipe domain layer: message model, endpoints, errors and configuration.
pub mod config;
pub mod dns_header;
pub mod dns_message;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_header::{Header, OpCode, ResponseCode};
pub use dns_message::Message;
pub use dns_protocol::DnsProtocol;
pub use dns_query::Question;
pub use dns_record::{RData, RecordClass, RecordType, ResourceRecord, Soa};
pub use errors::{DomainError, Step, WireError};
