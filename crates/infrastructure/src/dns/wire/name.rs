//! Conversions between textual host names and `hickory_proto` names.
//!
//! Text uses master-file escaping so every wire label survives the trip:
//! `\.` and `\\` for literal dots and backslashes, `\DDD` (decimal) for any
//! byte outside printable ASCII.

use ferrous_resolve_domain::DomainError;
use hickory_proto::rr::Name;

/// Longest name in wire form, length octets and root label included.
const MAX_NAME_WIRE_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Parses `host` into a wire name. The empty name (or ".") is the root.
pub fn to_wire_name(host: &str) -> Result<Name, DomainError> {
    let trimmed = match host.strip_suffix('.') {
        Some(rest) if trailing_backslashes(rest) % 2 == 0 => rest,
        _ => host,
    };
    if trimmed.is_empty() {
        return Ok(Name::root());
    }

    let labels = split_labels(trimmed).map_err(|detail| invalid(host, detail))?;

    let mut wire_len = 1;
    for label in &labels {
        if label.is_empty() {
            return Err(invalid(host, "empty label".to_string()));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid(
                host,
                format!("label longer than {} bytes", MAX_LABEL_LEN),
            ));
        }
        wire_len += label.len() + 1;
    }
    if wire_len > MAX_NAME_WIRE_LEN {
        return Err(invalid(
            host,
            format!("name longer than {} bytes", MAX_NAME_WIRE_LEN),
        ));
    }

    Name::from_labels(labels).map_err(|e| invalid(host, e.to_string()))
}

/// Renders a decoded name as lowercase text, empty for the root.
pub fn to_text(name: &Name) -> String {
    let mut text = String::with_capacity(name.len());
    for (i, label) in name.iter().enumerate() {
        if i > 0 {
            text.push('.');
        }
        escape_label(label, &mut text);
    }
    text
}

fn escape_label(label: &[u8], out: &mut String) {
    for &b in label {
        match b {
            b'.' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x21..=0x7e => out.push(b.to_ascii_lowercase() as char),
            _ => out.push_str(&format!("\\{:03}", b)),
        }
    }
}

fn trailing_backslashes(text: &str) -> usize {
    text.bytes().rev().take_while(|&b| b == b'\\').count()
}

fn split_labels(text: &str) -> Result<Vec<Vec<u8>>, String> {
    let mut labels = Vec::new();
    let mut label = Vec::new();
    let mut bytes = text.bytes();

    while let Some(b) = bytes.next() {
        match b {
            b'.' => labels.push(std::mem::take(&mut label)),
            b'\\' => {
                let first = bytes.next().ok_or("dangling escape")?;
                if first.is_ascii_digit() {
                    let second = bytes.next().filter(u8::is_ascii_digit);
                    let third = bytes.next().filter(u8::is_ascii_digit);
                    let (Some(second), Some(third)) = (second, third) else {
                        return Err("escape needs three decimal digits".to_string());
                    };
                    let value = u16::from(first - b'0') * 100
                        + u16::from(second - b'0') * 10
                        + u16::from(third - b'0');
                    let byte = u8::try_from(value)
                        .map_err(|_| format!("escape \\{} is out of range", value))?;
                    label.push(byte);
                } else {
                    label.push(first);
                }
            }
            _ => label.push(b),
        }
    }
    labels.push(label);
    Ok(labels)
}

fn invalid(host: &str, detail: String) -> DomainError {
    DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", host, detail))
}
