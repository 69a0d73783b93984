use thiserror::Error;

/// Identifies which field a wire codec was working on when it failed.
///
/// The numeric codes are stable and are what [`WireError::step`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Step {
    Header = 1,
    LabelLength = 2,
    LabelBody = 3,
    PointerLow = 4,
    PointerTarget = 5,
    NameEncode = 6,
    QuestionFields = 7,
    RecordFields = 8,
    RecordLength = 9,
    RecordData = 10,
}

impl Step {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Failures raised while encoding or decoding DNS wire format.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    #[error("Truncated DNS message (step {})", .step.code())]
    Truncated { step: Step },

    #[error("DNS label too long (step {})", .step.code())]
    LabelTooLong { step: Step },

    #[error("Malformed domain name (step {})", .step.code())]
    WrongFormat { step: Step },

    #[error("Compression offset does not fit in 14 bits (step {})", .step.code())]
    OffsetTooLong { step: Step },

    #[error("Compression pointer targets an unseen offset (step {})", .step.code())]
    BadPointer { step: Step },

    #[error("Record data too long: {0} bytes")]
    RdataTooLong(usize),

    #[error("Character string too long: {0} bytes")]
    CharacterStringTooLong(usize),

    #[error("Section holds too many entries: {0}")]
    SectionTooLarge(usize),

    #[error("Too many compression pointers in one name")]
    TooManyPointers,
}

impl WireError {
    /// Returns the step code for the kinds that carry one.
    pub fn step(&self) -> Option<Step> {
        match self {
            WireError::Truncated { step }
            | WireError::LabelTooLong { step }
            | WireError::WrongFormat { step }
            | WireError::OffsetTooLong { step }
            | WireError::BadPointer { step } => Some(*step),
            WireError::RdataTooLong(_)
            | WireError::CharacterStringTooLong(_)
            | WireError::SectionTooLarge(_)
            | WireError::TooManyPointers => None,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, WireError::Truncated { .. })
    }
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    Wire(#[from] WireError),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Message too large for transport: {0} bytes")]
    MessageTooLarge(usize),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transaction ID mismatch: expected {expected:#06x}, received {received:#06x}")]
    TransactionIdMismatch { expected: u16, received: u16 },

    #[error("Resolver has shut down")]
    ResolverShutdown,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}: {reason}")]
    TransportConnectionRefused { server: String, reason: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },
}

impl DomainError {
    /// True for failures of the connection itself rather than of a message.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::IoError(_)
                | DomainError::QueryTimeout
                | DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
        )
    }
}
