//! DNS Message Builder
//!
//! Constructs recursive query messages and their wire form using the codec in
//! [`crate::dns::wire`].

use crate::dns::wire::{
    encode_message, encode_name, relative_name, OffsetTracker, MAX_NAME_LEN,
};
use dnspipe_domain::{DomainError, Message, Question, RecordType, WireError};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message and serialize to wire format bytes
    ///
    /// Creates a standard recursive query with:
    /// - Random ID
    /// - RD (Recursion Desired) flag set
    /// - Single question section, class IN
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        let (_, bytes) = Self::build_query_with_id(domain, record_type)?;
        Ok(bytes)
    }

    /// Build a query and return its ID together with the bytes
    ///
    /// Useful when the caller matches responses by ID.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let message = Self::query_message(domain, record_type)?;
        let bytes = encode_message(&message)?;
        Ok((message.id(), bytes.to_vec()))
    }

    /// Build the query as a [`Message`] without serializing it
    pub fn query_message(domain: &str, record_type: &RecordType) -> Result<Message, DomainError> {
        let name = Self::validate_domain(domain)?;
        Ok(Message::query(
            fastrand::u16(..),
            Question::new(name, *record_type),
        ))
    }

    /// Checks `domain` against the name codec and returns it without its root dot.
    fn validate_domain(domain: &str) -> Result<&str, DomainError> {
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Domain name is empty".to_string(),
            ));
        }

        let invalid = |e: WireError| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        };
        let mut scratch = OffsetTracker::with_capacity(MAX_NAME_LEN);
        encode_name(domain, &mut scratch).map_err(invalid)?;

        if scratch.current_offset() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "Invalid domain '{}': {} bytes in wire form (max {})",
                domain,
                scratch.current_offset(),
                MAX_NAME_LEN
            )));
        }

        relative_name(domain).map_err(invalid)
    }
}
