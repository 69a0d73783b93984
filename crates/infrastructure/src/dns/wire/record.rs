//! Resource records and their typed payloads.
//!
//! Payload dispatch is a plain match over [`RecordType`]: every code outside
//! the typed set decodes to [`RData::Opaque`]. Typed payloads are read from a
//! window bounded by RDLENGTH, so the record cursor always moves by exactly
//! RDLENGTH whatever the payload codec consumed.

use super::labels::{decode_name, encode_name};
use super::offset_tracker::{OffsetTracker, TrackedSlice};
use dnspipe_domain::{RData, RecordClass, RecordType, ResourceRecord, Soa, Step, WireError};
use std::net::Ipv4Addr;

const MAX_RDATA_LEN: usize = u16::MAX as usize;
const MAX_CHARACTER_STRING_LEN: usize = 255;

pub fn encode_record(record: &ResourceRecord, tracker: &mut OffsetTracker) -> Result<(), WireError> {
    encode_name(&record.name, tracker)?;
    tracker.put(record.record_type.to_u16());
    tracker.put(record.class.to_u16());
    tracker.put(record.ttl);

    let length_at = tracker.current_offset();
    tracker.put(0u16);
    encode_rdata(&record.rdata, tracker)?;

    let length = tracker.current_offset() - length_at - 2;
    if length > MAX_RDATA_LEN {
        return Err(WireError::RdataTooLong(length));
    }
    tracker.patch_u16(length_at, length as u16);
    Ok(())
}

fn encode_rdata(rdata: &RData, tracker: &mut OffsetTracker) -> Result<(), WireError> {
    match rdata {
        RData::A(address) => tracker.put(u32::from(*address)),
        RData::NS(name) | RData::CNAME(name) | RData::PTR(name) => encode_name(name, tracker)?,
        RData::MX {
            preference,
            exchange,
        } => {
            tracker.put(*preference);
            encode_name(exchange, tracker)?;
        }
        RData::SOA(soa) => {
            encode_name(&soa.mname, tracker)?;
            encode_name(&soa.rname, tracker)?;
            for value in [soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum] {
                tracker.put(value);
            }
        }
        RData::TXT(chunks) => {
            for chunk in chunks {
                if chunk.len() > MAX_CHARACTER_STRING_LEN {
                    return Err(WireError::CharacterStringTooLong(chunk.len()));
                }
                tracker.save(chunk.len() as u8);
                tracker.save_bytes(chunk);
            }
        }
        RData::Opaque(bytes) => {
            if bytes.len() > MAX_RDATA_LEN {
                return Err(WireError::RdataTooLong(bytes.len()));
            }
            tracker.save_bytes(bytes);
        }
    }
    Ok(())
}

pub fn decode_record(cursor: &mut TrackedSlice<'_>) -> Result<ResourceRecord, WireError> {
    let name = decode_name(cursor)?;
    let record_type = RecordType::from_u16(cursor.read(Step::RecordFields)?);
    let class = RecordClass::from_u16(cursor.read(Step::RecordFields)?);
    let ttl = cursor.read::<i32>(Step::RecordFields)?;
    let length = cursor.read::<u16>(Step::RecordLength)?;

    let mut window = cursor.window(usize::from(length), Step::RecordData)?;
    let rdata = decode_rdata(record_type, &mut window)?;

    Ok(ResourceRecord {
        name,
        record_type,
        class,
        ttl,
        rdata,
    })
}

fn decode_rdata(record_type: RecordType, window: &mut TrackedSlice<'_>) -> Result<RData, WireError> {
    let rdata = match record_type {
        RecordType::A => RData::A(Ipv4Addr::from(window.read::<u32>(Step::RecordData)?)),
        RecordType::NS => RData::NS(decode_name(window)?),
        RecordType::CNAME => RData::CNAME(decode_name(window)?),
        RecordType::PTR => RData::PTR(decode_name(window)?),
        RecordType::MX => RData::MX {
            preference: window.read(Step::RecordData)?,
            exchange: decode_name(window)?,
        },
        RecordType::SOA => RData::SOA(Soa {
            mname: decode_name(window)?,
            rname: decode_name(window)?,
            serial: window.read(Step::RecordData)?,
            refresh: window.read(Step::RecordData)?,
            retry: window.read(Step::RecordData)?,
            expire: window.read(Step::RecordData)?,
            minimum: window.read(Step::RecordData)?,
        }),
        RecordType::TXT => {
            let mut chunks = Vec::new();
            while !window.is_empty() {
                let len = window.read::<u8>(Step::RecordData)?;
                chunks.push(window.take(usize::from(len), Step::RecordData)?.to_vec());
            }
            RData::TXT(chunks)
        }
        RecordType::Unknown(_) => RData::Opaque(window.take_rest().to_vec()),
    };
    Ok(rdata)
}
