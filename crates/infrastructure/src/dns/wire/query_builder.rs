//! DNS Query Builder
//!
//! Encodes a single-question query for an iterative walk using
//! `hickory-proto`. The RD bit stays clear so every nameserver answers only
//! from its own data.

use super::name::to_wire_name;
use ferrous_resolve_domain::{DomainError, Question};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// An encoded query and the transaction id written into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Encodes `question` under a fresh random transaction id.
    pub fn build(question: &Question) -> Result<OutboundQuery, DomainError> {
        Self::build_with_id(question, fastrand::u16(..))
    }

    pub fn build_with_id(question: &Question, id: u16) -> Result<OutboundQuery, DomainError> {
        let name = to_wire_name(question.host_name())?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(HickoryRecordType::from(question.record_type().to_u16()));
        query.set_query_class(DNSClass::from(question.record_class().to_u16()));

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.metadata.recursion_desired = false;
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok(OutboundQuery { id, bytes })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS query: {}", e))
        })?;

        Ok(buf)
    }
}
