#![allow(dead_code)]

/// Response to `example.com. IN A` (ID 0xbeef, RD RA) with one compressed
/// A answer, `93.184.216.34`, TTL 3600.
pub const EXAMPLE_COM_A: &[u8] = &[
    0xbe, 0xef, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    // question: example.com A IN
    0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    0x00, 0x01, 0x00, 0x01,
    // answer: ptr(12) A IN 3600 4 93.184.216.34
    0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x04,
    93, 184, 216, 34,
];

/// NXDOMAIN for `nope.example.com. IN A` (ID 0x0102) with the zone SOA in
/// the authority section. Both SOA names compress against the question.
pub const NXDOMAIN_WITH_SOA: &[u8] = &[
    0x01, 0x02, 0x81, 0x83, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
    // question at 12: nope.example.com A IN ("example.com" starts at 17)
    0x04, b'n', b'o', b'p', b'e', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
    0x03, b'c', b'o', b'm', 0x00, 0x00, 0x01, 0x00, 0x01,
    // authority: ptr(17) SOA IN 900, RDLENGTH 27
    0xc0, 0x11, 0x00, 0x06, 0x00, 0x01, 0x00, 0x00, 0x03, 0x84, 0x00, 0x1b,
    // mname ns.ptr(17), rname ptr(17)
    0x02, b'n', b's', 0xc0, 0x11, 0xc0, 0x11,
    // serial refresh retry expire minimum
    0x78, 0x8a, 0x2b, 0x35, 0x00, 0x00, 0x1c, 0x20, 0x00, 0x00, 0x0e, 0x10,
    0x00, 0x12, 0x75, 0x00, 0x00, 0x00, 0x01, 0x2c,
];

/// Response to `example.com. IN AAAA` (ID 0x0a0a): the AAAA answer has no
/// typed codec and must come back as 16 opaque bytes.
pub const EXAMPLE_COM_AAAA: &[u8] = &[
    0x0a, 0x0a, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    0x00, 0x1c, 0x00, 0x01,
    0xc0, 0x0c, 0x00, 0x1c, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x10,
    0x26, 0x06, 0x28, 0x00, 0x02, 0x20, 0x00, 0x01, 0x02, 0x48, 0x18, 0x93,
    0x25, 0xc8, 0x19, 0x46,
];

/// A name whose pointer refers to itself.
pub const SELF_POINTER: &[u8] = &[
    0x00, 0x01, 0x81, 0x80, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01,
];
