//! DNS wire format: binary primitives, the compression-aware name codec, and
//! the header / question / record / message codecs built on top of them.
//!
//! Everything here is synchronous and allocation-bounded by its input.

pub mod header;
pub mod labels;
pub mod message;
pub mod offset_tracker;
pub mod primitives;
pub mod question;
pub mod record;

pub use header::{decode_header, encode_header};
pub use labels::{
    decode_name, encode_name, relative_name, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_HOPS,
};
pub use message::{decode_message, encode_message};
pub use offset_tracker::{OffsetTracker, TrackedSlice, MAX_POINTER_OFFSET};
pub use question::{decode_question, encode_question};
pub use record::{decode_record, encode_record};
