#![allow(dead_code)]
use dnspipe_domain::{DnsProtocol, Message, Question, RData, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};

pub struct DnsServerBuilder;

impl DnsServerBuilder {
    pub fn google_dns() -> SocketAddr {
        "8.8.8.8:53".parse().unwrap()
    }

    pub fn google_dns_ipv6() -> SocketAddr {
        "[2001:4860:4860::8888]:53".parse().unwrap()
    }

    pub fn cloudflare_dns() -> SocketAddr {
        "1.1.1.1:53".parse().unwrap()
    }

    pub fn tcp(addr: SocketAddr) -> DnsProtocol {
        DnsProtocol::Tcp { addr }
    }

    pub fn udp(addr: SocketAddr) -> DnsProtocol {
        DnsProtocol::Udp { addr }
    }

    /// A loopback address nothing is listening on.
    pub fn closed_port() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }
}

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn a(id: u16, name: &str) -> Message {
        Message::query(id, Question::new(name, RecordType::A))
    }

    pub fn of_type(id: u16, name: &str, record_type: RecordType) -> Message {
        Message::query(id, Question::new(name, record_type))
    }
}

/// Answers every A question with `10.0.0.<first label length>` so tests can
/// tell responses apart without a lookup table.
pub fn answer_for(query: &Message) -> Message {
    let mut response = query.clone();
    response.header.qr = true;
    response.header.ra = true;

    for question in &query.questions {
        let first_label = question.name.split('.').next().unwrap_or("");
        let address = Ipv4Addr::new(10, 0, 0, first_label.len() as u8);
        response.add_answer(
            ResourceRecord::from_rdata(question.name.clone(), 60, RData::A(address)).unwrap(),
        );
    }
    response.sync_counts();
    response
}
