use super::{Header, Question, ResourceRecord};

/// A full DNS message: header plus the four ordered sections.
///
/// The header counts are authoritative when decoding. When encoding, the
/// codec rewrites them from the section lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Message {
    /// A single-question recursive query.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            header: Header {
                qd_count: 1,
                ..Header::query(id)
            },
            questions: vec![question],
            ..Self::default()
        }
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn is_response(&self) -> bool {
        self.header.qr
    }

    pub fn add_answer(&mut self, record: ResourceRecord) -> &mut Self {
        self.answers.push(record);
        self
    }

    pub fn add_authority(&mut self, record: ResourceRecord) -> &mut Self {
        self.authority.push(record);
        self
    }

    pub fn add_additional(&mut self, record: ResourceRecord) -> &mut Self {
        self.additional.push(record);
        self
    }

    /// Copies the section lengths into the header count fields, saturating at `u16::MAX`.
    pub fn sync_counts(&mut self) {
        let count = |len: usize| u16::try_from(len).unwrap_or(u16::MAX);
        self.header.qd_count = count(self.questions.len());
        self.header.an_count = count(self.answers.len());
        self.header.ns_count = count(self.authority.len());
        self.header.ar_count = count(self.additional.len());
    }
}
