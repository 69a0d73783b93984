#![allow(dead_code)]
use dnspipe_domain::{RData, RecordClass, RecordType, ResourceRecord};
use std::net::Ipv4Addr;

pub struct ResourceRecordBuilder {
    name: String,
    record_type: RecordType,
    class: RecordClass,
    ttl: i32,
    rdata: RData,
}

impl ResourceRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 300,
            rdata: RData::A(Ipv4Addr::new(192, 0, 2, 1)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn ttl(mut self, ttl: i32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record_type = RecordType::A;
        self.rdata = RData::A(address.parse().unwrap());
        self
    }

    pub fn cname(mut self, target: &str) -> Self {
        self.record_type = RecordType::CNAME;
        self.rdata = RData::CNAME(target.to_string());
        self
    }

    pub fn mx(mut self, preference: u16, exchange: &str) -> Self {
        self.record_type = RecordType::MX;
        self.rdata = RData::MX {
            preference,
            exchange: exchange.to_string(),
        };
        self
    }

    pub fn opaque(mut self, code: u16, bytes: &[u8]) -> Self {
        self.record_type = RecordType::Unknown(code);
        self.rdata = RData::Opaque(bytes.to_vec());
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord::new(self.name, self.record_type, self.class, self.ttl, self.rdata)
    }
}
