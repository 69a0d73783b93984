mod record;
mod record_type;

pub use record::{RData, ResourceRecord, Soa};
pub use record_type::{RecordClass, RecordType};
