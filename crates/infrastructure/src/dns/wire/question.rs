use super::labels::{decode_name, encode_name};
use super::offset_tracker::{OffsetTracker, TrackedSlice};
use dnspipe_domain::{Question, RecordClass, RecordType, Step, WireError};

pub fn encode_question(question: &Question, tracker: &mut OffsetTracker) -> Result<(), WireError> {
    encode_name(&question.name, tracker)?;
    tracker.put(question.record_type.to_u16());
    tracker.put(question.class.to_u16());
    Ok(())
}

pub fn decode_question(cursor: &mut TrackedSlice<'_>) -> Result<Question, WireError> {
    let name = decode_name(cursor)?;
    let record_type = RecordType::from_u16(cursor.read(Step::QuestionFields)?);
    let class = RecordClass::from_u16(cursor.read(Step::QuestionFields)?);

    Ok(Question {
        name,
        record_type,
        class,
    })
}
