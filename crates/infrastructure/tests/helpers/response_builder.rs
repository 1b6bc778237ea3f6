use std::collections::HashMap;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_OPT: u16 = 41;

/// RDATA for a hand-built record. Names inside RDATA are compressed like
/// owner names.
#[derive(Debug, Clone)]
pub enum Rdata {
    A([u8; 4]),
    Aaaa([u8; 16]),
    Name(String),
    Mx(u16, String),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone)]
struct Rr {
    name: String,
    rtype: u16,
    class: u16,
    ttl: u32,
    rdata: Rdata,
}

/// Builds response datagrams byte by byte, with name compression.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    id: u16,
    flags: u16,
    questions: Vec<(String, u16, u16)>,
    answers: Vec<Rr>,
    authorities: Vec<Rr>,
    additionals: Vec<Rr>,
    compress: bool,
}

impl ResponseBuilder {
    /// Authoritative response (QR=1, AA=1) with the given id.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: 0x8400,
            questions: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
            compress: true,
        }
    }

    /// Response echoing the id and (uncompressed) question of `query`.
    pub fn reply_to(query: &[u8]) -> Self {
        let id = u16::from_be_bytes([query[0], query[1]]);
        let mut builder = Self::new(id);

        let mut pos = 12;
        let mut labels = Vec::new();
        while query[pos] != 0 {
            let len = query[pos] as usize;
            labels.push(String::from_utf8_lossy(&query[pos + 1..pos + 1 + len]).to_string());
            pos += 1 + len;
        }
        pos += 1;
        let rtype = u16::from_be_bytes([query[pos], query[pos + 1]]);
        let class = u16::from_be_bytes([query[pos + 2], query[pos + 3]]);
        builder.questions.push((labels.join("."), rtype, class));
        builder
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & 0xFFF0) | rcode as u16;
        self
    }

    pub fn uncompressed(mut self) -> Self {
        self.compress = false;
        self
    }

    pub fn question(mut self, name: &str, rtype: u16) -> Self {
        self.questions.push((name.to_string(), rtype, 1));
        self
    }

    pub fn answer(mut self, name: &str, rtype: u16, ttl: u32, rdata: Rdata) -> Self {
        self.answers.push(Self::rr(name, rtype, ttl, rdata));
        self
    }

    pub fn authority(mut self, name: &str, rtype: u16, ttl: u32, rdata: Rdata) -> Self {
        self.authorities.push(Self::rr(name, rtype, ttl, rdata));
        self
    }

    pub fn additional(mut self, name: &str, rtype: u16, ttl: u32, rdata: Rdata) -> Self {
        self.additionals.push(Self::rr(name, rtype, ttl, rdata));
        self
    }

    /// EDNS OPT pseudo-record advertising a 4096-byte payload.
    pub fn opt(mut self) -> Self {
        self.additionals.push(Rr {
            name: String::new(),
            rtype: TYPE_OPT,
            class: 4096,
            ttl: 0,
            rdata: Rdata::Raw(Vec::new()),
        });
        self
    }

    fn rr(name: &str, rtype: u16, ttl: u32, rdata: Rdata) -> Rr {
        Rr {
            name: name.to_string(),
            rtype,
            class: 1,
            ttl,
            rdata,
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let mut offsets = HashMap::new();

        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        for count in [
            self.questions.len(),
            self.answers.len(),
            self.authorities.len(),
            self.additionals.len(),
        ] {
            buf.extend_from_slice(&(count as u16).to_be_bytes());
        }

        for (name, rtype, class) in &self.questions {
            self.write_name(&mut buf, &mut offsets, name);
            buf.extend_from_slice(&rtype.to_be_bytes());
            buf.extend_from_slice(&class.to_be_bytes());
        }

        for rr in self
            .answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
        {
            self.write_name(&mut buf, &mut offsets, &rr.name);
            buf.extend_from_slice(&rr.rtype.to_be_bytes());
            buf.extend_from_slice(&rr.class.to_be_bytes());
            buf.extend_from_slice(&rr.ttl.to_be_bytes());

            let len_at = buf.len();
            buf.extend_from_slice(&[0, 0]);
            match &rr.rdata {
                Rdata::A(octets) => buf.extend_from_slice(octets),
                Rdata::Aaaa(octets) => buf.extend_from_slice(octets),
                Rdata::Name(name) => self.write_name(&mut buf, &mut offsets, name),
                Rdata::Mx(preference, name) => {
                    buf.extend_from_slice(&preference.to_be_bytes());
                    self.write_name(&mut buf, &mut offsets, name);
                }
                Rdata::Raw(bytes) => buf.extend_from_slice(bytes),
            }
            let rdlength = (buf.len() - len_at - 2) as u16;
            buf[len_at..len_at + 2].copy_from_slice(&rdlength.to_be_bytes());
        }

        buf
    }

    fn write_name(&self, buf: &mut Vec<u8>, offsets: &mut HashMap<String, usize>, name: &str) {
        let name = name.trim_end_matches('.');
        if name.is_empty() {
            buf.push(0);
            return;
        }

        let labels: Vec<&str> = name.split('.').collect();
        for i in 0..labels.len() {
            let suffix = labels[i..].join(".").to_ascii_lowercase();
            if self.compress {
                if let Some(&offset) = offsets.get(&suffix) {
                    buf.extend_from_slice(&(0xC000u16 | offset as u16).to_be_bytes());
                    return;
                }
            }
            if buf.len() < 0x3FFF {
                offsets.entry(suffix).or_insert(buf.len());
            }
            buf.push(labels[i].len() as u8);
            buf.extend_from_slice(labels[i].as_bytes());
        }
        buf.push(0);
    }
}
