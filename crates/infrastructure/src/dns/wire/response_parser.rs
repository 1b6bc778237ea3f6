use super::name::to_text;
use super::HEADER_LEN;
use ferrous_resolve_domain::{
    DnsHeader, DnsResponse, DomainError, Question, RecordClass, RecordData, RecordType,
    ResourceRecord,
};
use hickory_proto::op::{Header, MessageType, Metadata};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, DecodeError, Restrict};
use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Instant;
use tracing::debug;

// Root owner, type, class and QD fields.
const MIN_QUESTION_LEN: usize = 5;
// Root owner plus the fixed type, class, TTL and RDLENGTH fields.
const MIN_RECORD_LEN: usize = 11;

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes a complete message. Any structural fault fails the whole
    /// parse; no partially decoded record escapes.
    ///
    /// EDNS OPT pseudo-records are skipped: they describe the transfer, not
    /// the zone.
    pub fn parse(bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        if bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "message of {} bytes is shorter than a header",
                bytes.len()
            )));
        }

        let mut decoder = BinDecoder::new(bytes);
        let header = Self::parse_header(&mut decoder)?;

        // Counts are untrusted: never reserve more than the bytes could hold.
        let question_room = decoder.len() / MIN_QUESTION_LEN;
        let mut questions =
            Vec::with_capacity(usize::from(header.question_count).min(question_room));
        for _ in 0..header.question_count {
            let name = read_name(&mut decoder)?;
            let record_type = read_u16(&mut decoder)?;
            let record_class = read_u16(&mut decoder)?;
            questions.push(Question::new(
                &name,
                RecordType::from_u16(record_type),
                RecordClass::from_u16(record_class),
            ));
        }

        let received_at = Instant::now();
        let answers = Self::parse_section(&mut decoder, header.answer_count, received_at)?;
        let authorities = Self::parse_section(&mut decoder, header.authority_count, received_at)?;
        let additionals =
            Self::parse_section(&mut decoder, header.additional_count, received_at)?;

        debug!(
            id = header.id,
            rcode = header.rcode(),
            answers = answers.len(),
            authorities = authorities.len(),
            additionals = additionals.len(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    fn parse_header(decoder: &mut BinDecoder<'_>) -> Result<DnsHeader, DomainError> {
        let header = Header::read(decoder).map_err(malformed)?;
        Ok(DnsHeader {
            id: header.metadata.id,
            flags: header_flags(&header.metadata),
            question_count: header.counts.queries,
            answer_count: header.counts.answers,
            authority_count: header.counts.authorities,
            additional_count: header.counts.additionals,
        })
    }

    fn parse_section(
        decoder: &mut BinDecoder<'_>,
        count: u16,
        received_at: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let room = decoder.len() / MIN_RECORD_LEN;
        let mut records = Vec::with_capacity(usize::from(count).min(room));
        for _ in 0..count {
            if let Some(record) = Self::parse_record(decoder, received_at)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn parse_record(
        decoder: &mut BinDecoder<'_>,
        received_at: Instant,
    ) -> Result<Option<ResourceRecord>, DomainError> {
        let owner = read_name(decoder)?;
        let record_type = RecordType::from_u16(read_u16(decoder)?);
        let record_class = RecordClass::from_u16(read_u16(decoder)?);
        let ttl = ttl_from_wire(read_u32(decoder)?);
        let rdlength = usize::from(read_u16(decoder)?);

        let rdata_start = decoder.index();
        if rdlength > decoder.len() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "RDATA of {} at offset {} overruns the message",
                owner, rdata_start
            )));
        }
        let rdata_end = rdata_start + rdlength;

        if record_type == RecordType::OPT {
            read_slice(decoder, rdlength)?;
            return Ok(None);
        }

        let data = match record_type {
            RecordType::A => {
                let octets: [u8; 4] = read_slice(decoder, rdlength)?.try_into().map_err(|_| {
                    DomainError::InvalidDnsResponse(format!(
                        "A record for {} has {} bytes of RDATA",
                        owner, rdlength
                    ))
                })?;
                RecordData::Ipv4(Ipv4Addr::from(octets))
            }
            RecordType::AAAA => {
                let octets: [u8; 16] =
                    read_slice(decoder, rdlength)?.try_into().map_err(|_| {
                        DomainError::InvalidDnsResponse(format!(
                            "AAAA record for {} has {} bytes of RDATA",
                            owner, rdlength
                        ))
                    })?;
                RecordData::Ipv6(Ipv6Addr::from(octets))
            }
            RecordType::NS | RecordType::CNAME => {
                RecordData::HostName(read_embedded_name(decoder, rdata_end)?)
            }
            RecordType::MX => {
                if rdlength < 2 {
                    return Err(DomainError::InvalidDnsResponse(format!(
                        "MX record for {} is missing its preference",
                        owner
                    )));
                }
                read_u16(decoder)?;
                RecordData::HostName(read_embedded_name(decoder, rdata_end)?)
            }
            _ => RecordData::Hex(to_hex(read_slice(decoder, rdlength)?)),
        };

        Ok(Some(ResourceRecord::recorded_at(
            Question::new(&owner, record_type, record_class),
            ttl,
            data,
            received_at,
        )))
    }
}

/// TTLs are signed 32-bit on the wire; a set high bit means zero.
fn ttl_from_wire(raw: u32) -> u32 {
    if raw > i32::MAX as u32 {
        0
    } else {
        raw
    }
}

fn header_flags(metadata: &Metadata) -> u16 {
    let mut flags = u16::from(metadata.response_code.low());
    if metadata.message_type == MessageType::Response {
        flags |= 0x8000;
    }
    flags |= u16::from(u8::from(metadata.op_code)) << 11;
    for (set, bit) in [
        (metadata.authoritative, 0x0400),
        (metadata.truncation, 0x0200),
        (metadata.recursion_desired, 0x0100),
        (metadata.recursion_available, 0x0080),
        (metadata.authentic_data, 0x0020),
        (metadata.checking_disabled, 0x0010),
    ] {
        if set {
            flags |= bit;
        }
    }
    flags
}

fn read_name(decoder: &mut BinDecoder<'_>) -> Result<String, DomainError> {
    Name::read(decoder).map(|name| to_text(&name)).map_err(malformed)
}

// A name inside RDATA may point backwards anywhere, but its inline part
// must stay within the record.
fn read_embedded_name(
    decoder: &mut BinDecoder<'_>,
    rdata_end: usize,
) -> Result<String, DomainError> {
    let start = decoder.index();
    let name = read_name(decoder)?;
    if decoder.index() > rdata_end {
        return Err(DomainError::InvalidDnsResponse(format!(
            "name at offset {} overruns its RDATA",
            start
        )));
    }
    read_slice(decoder, rdata_end - decoder.index())?;
    Ok(name)
}

fn read_u16(decoder: &mut BinDecoder<'_>) -> Result<u16, DomainError> {
    decoder.read_u16().map(Restrict::unverified).map_err(malformed)
}

fn read_u32(decoder: &mut BinDecoder<'_>) -> Result<u32, DomainError> {
    decoder.read_u32().map(Restrict::unverified).map_err(malformed)
}

fn read_slice<'a>(decoder: &mut BinDecoder<'a>, len: usize) -> Result<&'a [u8], DomainError> {
    decoder
        .read_slice(len)
        .map(Restrict::unverified)
        .map_err(malformed)
}

fn malformed(error: DecodeError) -> DomainError {
    DomainError::InvalidDnsResponse(error.to_string())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(hex, "{:02x}", b);
    }
    hex
}
