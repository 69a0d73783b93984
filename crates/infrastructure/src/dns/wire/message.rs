use super::header::{decode_header, encode_header};
use super::offset_tracker::{OffsetTracker, TrackedSlice};
use super::question::{decode_question, encode_question};
use super::record::{decode_record, encode_record};
use bytes::Bytes;
use dnspipe_domain::{Message, ResourceRecord, WireError};

fn section_count(len: usize) -> Result<u16, WireError> {
    u16::try_from(len).map_err(|_| WireError::SectionTooLarge(len))
}

/// Serializes `message` with all names compressed against one tracker.
///
/// The header counts written are the section lengths; whatever the caller
/// left in `message.header` for them is ignored.
pub fn encode_message(message: &Message) -> Result<Bytes, WireError> {
    let mut header = message.header;
    header.qd_count = section_count(message.questions.len())?;
    header.an_count = section_count(message.answers.len())?;
    header.ns_count = section_count(message.authority.len())?;
    header.ar_count = section_count(message.additional.len())?;

    let mut tracker = OffsetTracker::new();
    encode_header(&header, &mut tracker);

    for question in &message.questions {
        encode_question(question, &mut tracker)?;
    }
    for record in message
        .answers
        .iter()
        .chain(&message.authority)
        .chain(&message.additional)
    {
        encode_record(record, &mut tracker)?;
    }

    Ok(tracker.into_bytes())
}

/// Parses a complete message, taking each section's size from the header.
///
/// Bytes after the last additional record are ignored.
pub fn decode_message(bytes: &[u8]) -> Result<Message, WireError> {
    let mut cursor = TrackedSlice::new(bytes);
    let header = decode_header(&mut cursor)?;

    let questions = (0..header.qd_count)
        .map(|_| decode_question(&mut cursor))
        .collect::<Result<Vec<_>, _>>()?;
    let answers = decode_records(&mut cursor, header.an_count)?;
    let authority = decode_records(&mut cursor, header.ns_count)?;
    let additional = decode_records(&mut cursor, header.ar_count)?;

    Ok(Message {
        header,
        questions,
        answers,
        authority,
        additional,
    })
}

fn decode_records(
    cursor: &mut TrackedSlice<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, WireError> {
    (0..count).map(|_| decode_record(cursor)).collect()
}
