#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{answer_for, DnsServerBuilder, QueryBuilder};
pub use dns_server_mock::{echo_answers, fixed, silent, MockDnsServer, Responder};
