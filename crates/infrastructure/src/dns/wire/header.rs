use super::offset_tracker::{OffsetTracker, TrackedSlice};
use super::primitives::BigEndian;
use dnspipe_domain::{Header, OpCode, ResponseCode, Step, WireError};

const QR: u8 = 0b1000_0000;
const AA: u8 = 0b0000_0100;
const TC: u8 = 0b0000_0010;
const RD: u8 = 0b0000_0001;

const RA: u8 = 0b1000_0000;
const Z: u8 = 0b0100_0000;
const AD: u8 = 0b0010_0000;
const CD: u8 = 0b0001_0000;

const OPCODE_SHIFT: u8 = 3;
const NIBBLE: u8 = 0x0F;

fn flag(set: bool, bit: u8) -> u8 {
    if set {
        bit
    } else {
        0
    }
}

pub fn encode_header(header: &Header, tracker: &mut OffsetTracker) {
    let first = flag(header.qr, QR)
        | ((header.opcode.to_u8() & NIBBLE) << OPCODE_SHIFT)
        | flag(header.aa, AA)
        | flag(header.tc, TC)
        | flag(header.rd, RD);
    let second = flag(header.ra, RA)
        | flag(header.z, Z)
        | flag(header.ad, AD)
        | flag(header.cd, CD)
        | (header.rcode.to_u8() & NIBBLE);

    tracker.put(header.id);
    tracker.save(first);
    tracker.save(second);
    tracker.put(header.qd_count);
    tracker.put(header.an_count);
    tracker.put(header.ns_count);
    tracker.put(header.ar_count);
}

/// Reads the fixed 12-byte header. A short buffer consumes nothing.
pub fn decode_header(cursor: &mut TrackedSlice<'_>) -> Result<Header, WireError> {
    let raw = cursor.take(Header::WIRE_LEN, Step::Header)?;
    let word = |at: usize| u16::from_be_slice(&raw[at..at + 2]);
    let (first, second) = (raw[2], raw[3]);

    Ok(Header {
        id: word(0),
        qr: first & QR != 0,
        opcode: OpCode::from_u8((first >> OPCODE_SHIFT) & NIBBLE),
        aa: first & AA != 0,
        tc: first & TC != 0,
        rd: first & RD != 0,
        ra: second & RA != 0,
        z: second & Z != 0,
        ad: second & AD != 0,
        cd: second & CD != 0,
        rcode: ResponseCode::from_u8(second & NIBBLE),
        qd_count: word(4),
        an_count: word(6),
        ns_count: word(8),
        ar_count: word(10),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(header: &Header) -> Vec<u8> {
        let mut tracker = OffsetTracker::new();
        encode_header(header, &mut tracker);
        tracker.as_bytes().to_vec()
    }

    #[test]
    fn test_encode_recursive_query() {
        let header = Header {
            qd_count: 1,
            ..Header::query(0xf9ac)
        };
        assert_eq!(
            encode(&header),
            vec![0xF9, 0xAC, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_flag_positions() {
        let header = Header {
            id: 1,
            qr: true,
            opcode: OpCode::Status,
            aa: true,
            tc: true,
            rd: false,
            ra: true,
            z: false,
            ad: true,
            cd: true,
            rcode: ResponseCode::NXDomain,
            qd_count: 0x0102,
            an_count: 3,
            ns_count: 4,
            ar_count: 0xFFFF,
        };
        let bytes = encode(&header);
        assert_eq!(bytes[2], 0b1001_0110);
        assert_eq!(bytes[3], 0b1011_0011);
        assert_eq!(&bytes[4..6], &[0x01, 0x02]);
        assert_eq!(&bytes[10..12], &[0xFF, 0xFF]);

        let mut cursor = TrackedSlice::new(&bytes);
        assert_eq!(decode_header(&mut cursor).unwrap(), header);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_unknown_codes_survive() {
        let header = Header {
            opcode: OpCode::Unknown(9),
            rcode: ResponseCode::Unknown(11),
            z: true,
            ..Header::default()
        };
        let bytes = encode(&header);
        let decoded = decode_header(&mut TrackedSlice::new(&bytes)).unwrap();
        assert_eq!(decoded.opcode, OpCode::Unknown(9));
        assert_eq!(decoded.rcode, ResponseCode::Unknown(11));
        assert!(decoded.z);
    }

    #[test]
    fn test_decode_short_header() {
        let bytes = [0u8; 11];
        let mut cursor = TrackedSlice::new(&bytes);
        let err = decode_header(&mut cursor).unwrap_err();

        assert_eq!(err, WireError::Truncated { step: Step::Header });
        assert_eq!(err.step().map(Step::code), Some(1));
        assert!(cursor.position() <= 11);
    }
}
