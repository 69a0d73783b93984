//! Domain name codec with message compression (RFC 1035 §4.1.4).

use super::offset_tracker::{OffsetTracker, TrackedSlice, MAX_POINTER_OFFSET};
use dnspipe_domain::{Step, WireError};

pub const MAX_LABEL_LEN: usize = 63;

/// Longest wire form of a name, including the terminating zero byte.
pub const MAX_NAME_LEN: usize = 255;

/// Pointer follows allowed while decoding a single name.
pub const MAX_POINTER_HOPS: usize = 64;

const POINTER_MARK: u8 = 0xC0;

/// Writes `name` as length-prefixed labels, ending in a zero byte or in a
/// pointer to the earliest recorded occurrence of its remaining suffix.
///
/// `name` is in presentation form: `\.` and `\\` stand for a literal dot and
/// backslash inside a label, and `\DDD` for the byte with decimal value DDD.
pub fn encode_name(name: &str, tracker: &mut OffsetTracker) -> Result<(), WireError> {
    let (body, labels) = split_labels(name)?;

    for label in &labels {
        let suffix = &body[label.start..];
        if let Some(offset) = tracker.find_offset(suffix) {
            if offset > MAX_POINTER_OFFSET {
                return Err(WireError::OffsetTooLong {
                    step: Step::NameEncode,
                });
            }
            tracker.put((u16::from(POINTER_MARK) << 8) | offset as u16);
            return Ok(());
        }

        if label.bytes.len() > MAX_LABEL_LEN {
            return Err(WireError::LabelTooLong {
                step: Step::NameEncode,
            });
        }

        tracker.save_offset_of(suffix);
        tracker.save(label.bytes.len() as u8);
        tracker.save_bytes(&label.bytes);
    }

    tracker.save(0);
    Ok(())
}

/// `name` without its root dot, checked the same way [`encode_name`] checks it.
pub fn relative_name(name: &str) -> Result<&str, WireError> {
    split_labels(name).map(|(body, _)| body)
}

struct Label {
    /// Offset of the label's first character in the name text.
    start: usize,
    bytes: Vec<u8>,
}

/// Splits a presentation-form name on unescaped dots. Returns the name
/// without its root dot alongside the unescaped labels.
fn split_labels(name: &str) -> Result<(&str, Vec<Label>), WireError> {
    let wrong_format = WireError::WrongFormat {
        step: Step::NameEncode,
    };
    if name.is_empty() || name == "." {
        return Ok(("", Vec::new()));
    }

    let text = name.as_bytes();
    let mut labels = Vec::new();
    let mut current = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < text.len() {
        match text[i] {
            b'.' => {
                if current.is_empty() {
                    return Err(wrong_format);
                }
                labels.push(Label {
                    start,
                    bytes: std::mem::take(&mut current),
                });
                i += 1;
                start = i;
            }
            b'\\' => {
                let (byte, used) = unescape(&text[i + 1..]).ok_or(wrong_format)?;
                current.push(byte);
                i += 1 + used;
            }
            byte => {
                current.push(byte);
                i += 1;
            }
        }
    }

    // An empty final label means the name ended in its (single) root dot.
    let body_end = if current.is_empty() {
        start - 1
    } else {
        labels.push(Label {
            start,
            bytes: current,
        });
        text.len()
    };
    Ok((&name[..body_end], labels))
}

/// Decodes the escape following a backslash into one byte and the number of
/// characters it used.
fn unescape(rest: &[u8]) -> Option<(u8, usize)> {
    match rest {
        [a, b, c, ..] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            let value = [a, b, c]
                .iter()
                .fold(0u16, |acc, digit| acc * 10 + u16::from(**digit - b'0'));
            u8::try_from(value).ok().map(|byte| (byte, 3))
        }
        [digit, ..] if digit.is_ascii_digit() => None,
        [other, ..] => Some((*other, 1)),
        [] => None,
    }
}

/// Appends label bytes in presentation form, escaping anything that would not
/// read back as the same byte.
fn push_label(name: &mut String, label: &[u8]) {
    for &byte in label {
        match byte {
            b'.' | b'\\' => {
                name.push('\\');
                name.push(char::from(byte));
            }
            0x21..=0x7E => name.push(char::from(byte)),
            _ => name.push_str(&format!("\\{:03}", byte)),
        }
    }
}

/// Reads one name. The cursor ends just past the terminating zero byte or
/// past the first pointer, wherever the name's bytes actually continued.
pub fn decode_name(cursor: &mut TrackedSlice<'_>) -> Result<String, WireError> {
    let mut name = String::new();
    let mut reader = *cursor;
    let mut hops = 0;

    loop {
        let length = reader.read::<u8>(Step::LabelLength)?;
        match length {
            0 => break,
            1..=63 => {
                let label = reader.take(usize::from(length), Step::LabelBody)?;
                if !name.is_empty() {
                    name.push('.');
                }
                push_label(&mut name, label);
            }
            high if high & POINTER_MARK == POINTER_MARK => {
                let low = reader.read::<u8>(Step::PointerLow)?;
                let target = (usize::from(high & !POINTER_MARK) << 8) | usize::from(low);

                if hops == 0 {
                    *cursor = reader;
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(WireError::TooManyPointers);
                }

                reader = reader.slice(target).ok_or(WireError::BadPointer {
                    step: Step::PointerTarget,
                })?;
            }
            _ => {
                return Err(WireError::LabelTooLong {
                    step: Step::LabelLength,
                })
            }
        }
    }

    if hops == 0 {
        *cursor = reader;
    }
    Ok(name)
}
