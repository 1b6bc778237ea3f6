use super::{Question, RecordType, ResourceRecord};

/// RCODE 3: the queried name does not exist.
pub const RCODE_NXDOMAIN: u8 = 3;

/// Fixed 12-byte DNS message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl DnsHeader {
    pub fn is_response(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & 0x0400 != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & 0x0200 != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & 0x0100 != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & 0x0080 != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }
}

/// A fully parsed response message.
#[derive(Debug, Clone, Default)]
pub struct DnsResponse {
    pub header: DnsHeader,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsResponse {
    pub fn transaction_id(&self) -> u16 {
        self.header.id
    }

    pub fn is_nxdomain(&self) -> bool {
        self.header.rcode() == RCODE_NXDOMAIN
    }

    /// Every record of the answer, authority and additional sections.
    pub fn all_records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }

    /// True when the answer section answers `question` directly, or with a
    /// CNAME for the asked host when the question is not itself for CNAMEs.
    pub fn answers_question(&self, question: &Question) -> bool {
        self.answers.iter().any(|record| {
            let owner = record.question();
            owner.host_name() == question.host_name()
                && owner.record_class() == question.record_class()
                && (owner.record_type() == question.record_type()
                    || (owner.record_type() == RecordType::CNAME
                        && question.record_type() != RecordType::CNAME))
        })
    }

    /// NS records of the authority section, in the order received.
    pub fn referral_name_servers(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.authorities
            .iter()
            .filter(|record| record.record_type() == RecordType::NS)
    }
}
