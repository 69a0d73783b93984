use super::{RecordClass, RecordType};
use std::fmt;
use std::net::Ipv4Addr;

/// Start-of-authority payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Typed record payload.
///
/// The variant is chosen by the record's type code when decoding; codes
/// without a typed codec always land in `Opaque` with the raw RDATA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    NS(String),
    CNAME(String),
    MX { preference: u16, exchange: String },
    PTR(String),
    SOA(Soa),
    TXT(Vec<Vec<u8>>),
    Opaque(Vec<u8>),
}

impl RData {
    /// The record type this payload naturally belongs to, if it has one.
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            RData::A(_) => Some(RecordType::A),
            RData::NS(_) => Some(RecordType::NS),
            RData::CNAME(_) => Some(RecordType::CNAME),
            RData::MX { .. } => Some(RecordType::MX),
            RData::PTR(_) => Some(RecordType::PTR),
            RData::SOA(_) => Some(RecordType::SOA),
            RData::TXT(_) => Some(RecordType::TXT),
            RData::Opaque(_) => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(address) => write!(f, "{}", address),
            RData::NS(name) | RData::CNAME(name) | RData::PTR(name) => write!(f, "{}.", name),
            RData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}.", preference, exchange),
            RData::SOA(soa) => write!(
                f,
                "{}. {}. {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
            RData::TXT(chunks) => {
                let rendered: Vec<String> = chunks
                    .iter()
                    .map(|chunk| format!("\"{}\"", String::from_utf8_lossy(chunk)))
                    .collect();
                write!(f, "{}", rendered.join(" "))
            }
            RData::Opaque(bytes) => write!(f, "\\# {}", bytes.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: RecordClass,

    /// Signed by convention; never negative in practice.
    pub ttl: i32,

    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        class: RecordClass,
        ttl: i32,
        rdata: RData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            rdata,
        }
    }

    /// Builds an `IN` record whose type follows from the payload.
    ///
    /// Opaque payloads have no natural type; use [`ResourceRecord::new`] for those.
    pub fn from_rdata(name: impl Into<String>, ttl: i32, rdata: RData) -> Option<Self> {
        let record_type = rdata.record_type()?;
        Some(Self::new(name, record_type, RecordClass::IN, ttl, rdata))
    }

    pub fn ipv4_address(&self) -> Option<Ipv4Addr> {
        match self.rdata {
            RData::A(address) => Some(address),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.class, self.record_type, self.rdata
        )
    }
}
