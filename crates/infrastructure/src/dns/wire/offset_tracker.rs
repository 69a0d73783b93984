//! Position tracking for one message encode or decode.
//!
//! Encoding appends into an [`OffsetTracker`], which also remembers where each
//! name suffix was first written so later names can point back at it.
//! Decoding reads through a [`TrackedSlice`], a bounded view over the whole
//! message that can produce narrower views for following compression pointers.

use super::primitives::BigEndian;
use bytes::{BufMut, Bytes, BytesMut};
use dnspipe_domain::{Step, WireError};
use std::collections::HashMap;

/// Largest offset a compression pointer can express (14 bits).
pub const MAX_POINTER_OFFSET: usize = 0x3FFF;

const DEFAULT_CAPACITY: usize = 512;

#[derive(Debug, Default)]
pub struct OffsetTracker {
    buf: BytesMut,
    suffixes: HashMap<String, usize>,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            suffixes: HashMap::new(),
        }
    }

    /// Appends one byte and returns it.
    pub fn save(&mut self, byte: u8) -> u8 {
        self.buf.put_u8(byte);
        byte
    }

    pub fn save_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn put<T: BigEndian>(&mut self, value: T) {
        value.put_be(&mut self.buf);
    }

    /// Records that `suffix` starts at the current offset. The first
    /// recording of a suffix wins; the root suffix is never recorded.
    pub fn save_offset_of(&mut self, suffix: &str) {
        if suffix.is_empty() {
            return;
        }
        let offset = self.buf.len();
        self.suffixes.entry(suffix.to_string()).or_insert(offset);
    }

    pub fn find_offset(&self, suffix: &str) -> Option<usize> {
        self.suffixes.get(suffix).copied()
    }

    pub fn current_offset(&self) -> usize {
        self.buf.len()
    }

    /// Overwrites two already-written bytes at `offset`.
    pub(crate) fn patch_u16(&mut self, offset: usize, value: u16) {
        self.buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read-only cursor over `buf[pos..end]`.
///
/// Positions are absolute offsets into the full message, so a pointer read
/// anywhere (including inside record data) resolves against the same bytes.
#[derive(Debug, Clone, Copy)]
pub struct TrackedSlice<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> TrackedSlice<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.end
    }

    /// Consumes `len` bytes, or nothing if fewer are available.
    pub fn take(&mut self, len: usize, step: Step) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::Truncated { step });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read<T: BigEndian>(&mut self, step: Step) -> Result<T, WireError> {
        self.take(T::SIZE, step).map(T::from_be_slice)
    }

    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.pos..self.end];
        self.pos = self.end;
        bytes
    }

    /// View for following a pointer whose two bytes were just consumed.
    ///
    /// The view spans `[target, pointer)` where `pointer` is the offset of the
    /// pointer's first byte, and exists only when `target` is strictly
    /// earlier. Every follow therefore shrinks the readable region.
    ///
    /// A target inside the pointer's own two bytes gets no view at all, so the
    /// caller reports a bad pointer rather than a truncated name.
    pub fn slice(&self, target: usize) -> Option<TrackedSlice<'a>> {
        let pointer = self.pos.checked_sub(2)?;
        (target < pointer).then_some(TrackedSlice {
            buf: self.buf,
            pos: target,
            end: pointer,
        })
    }

    /// Splits off the next `len` bytes as their own cursor and skips past them.
    pub fn window(&mut self, len: usize, step: Step) -> Result<TrackedSlice<'a>, WireError> {
        if self.remaining() < len {
            return Err(WireError::Truncated { step });
        }
        let window = TrackedSlice {
            buf: self.buf,
            pos: self.pos,
            end: self.pos + len,
        };
        self.pos += len;
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_returns_byte_and_advances() {
        let mut tracker = OffsetTracker::new();
        assert_eq!(tracker.save(0x2a), 0x2a);
        assert_eq!(tracker.save(0x00), 0x00);
        assert_eq!(tracker.current_offset(), 2);
        assert_eq!(tracker.as_bytes(), &[0x2a, 0x00]);
    }

    #[test]
    fn test_first_recorded_offset_wins() {
        let mut tracker = OffsetTracker::new();
        tracker.save_bytes(&[0; 12]);
        tracker.save_offset_of("example.com");
        tracker.save_bytes(&[0; 20]);
        tracker.save_offset_of("example.com");

        assert_eq!(tracker.find_offset("example.com"), Some(12));
        assert_eq!(tracker.find_offset("com"), None);
    }

    #[test]
    fn test_root_suffix_never_recorded() {
        let mut tracker = OffsetTracker::new();
        tracker.save_offset_of("");
        assert_eq!(tracker.find_offset(""), None);
    }

    #[test]
    fn test_patch_u16() {
        let mut tracker = OffsetTracker::new();
        tracker.put(0u16);
        tracker.save(0xff);
        tracker.patch_u16(0, 0x0102);
        assert_eq!(tracker.as_bytes(), &[0x01, 0x02, 0xff]);
    }

    #[test]
    fn test_take_does_not_consume_on_short_input() {
        let data = [1u8, 2, 3];
        let mut cursor = TrackedSlice::new(&data);
        let err = cursor.take(4, Step::Header).unwrap_err();
        assert_eq!(err, WireError::Truncated { step: Step::Header });
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.take(3, Step::Header).unwrap(), &[1, 2, 3]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_slice_requires_earlier_target() {
        let data = [0u8; 16];
        let mut cursor = TrackedSlice::new(&data);
        cursor.take(10, Step::LabelBody).unwrap();

        // Pointer bytes occupy offsets 8 and 9.
        let view = cursor.slice(3).unwrap();
        assert_eq!(view.position(), 3);
        assert_eq!(view.remaining(), 5);

        assert!(cursor.slice(8).is_none());
        assert!(cursor.slice(9).is_none());
        assert!(cursor.slice(12).is_none());
    }

    #[test]
    fn test_window_is_bounded() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = TrackedSlice::new(&data);
        let mut window = cursor.window(3, Step::RecordData).unwrap();

        assert_eq!(cursor.position(), 3);
        assert_eq!(window.read::<u16>(Step::RecordData).unwrap(), 0x0102);
        assert!(window.read::<u16>(Step::RecordData).unwrap_err().is_truncated());
        assert_eq!(window.take_rest(), &[3]);
    }
}
