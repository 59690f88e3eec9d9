//! Incremental UTF-8 decoding for transport chunks

/// Streaming UTF-8 decoder.
///
/// Transport chunks can end in the middle of a multi-byte sequence; the
/// unfinished suffix is carried over and prepended to the next chunk so a
/// character split across two chunks decodes intact. Genuinely invalid
/// sequences decode lossily to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.carry.extend_from_slice(chunk);
        let split = self.carry.len() - incomplete_suffix_len(&self.carry);
        let ready: Vec<u8> = self.carry.drain(..split).collect();
        String::from_utf8_lossy(&ready).into_owned()
    }

    /// True if the decoder is holding an unfinished multi-byte sequence.
    pub fn has_pending(&self) -> bool {
        !self.carry.is_empty()
    }
}

/// Length of a trailing UTF-8 sequence that is valid so far but incomplete.
///
/// Returns 0 when the buffer ends on a sequence boundary or on bytes that can
/// never become valid (those are left for lossy decoding).
fn incomplete_suffix_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    // A lead byte can sit at most 3 positions from the end and still be
    // waiting for continuations.
    for back in 1..=len.min(4) {
        let b = bytes[len - back];
        if b & 0b1100_0000 == 0b1000_0000 {
            continue; // continuation byte, keep scanning for the lead
        }
        let need = match b {
            b if b & 0b1000_0000 == 0 => 1,
            b if b & 0b1110_0000 == 0b1100_0000 => 2,
            b if b & 0b1111_0000 == 0b1110_0000 => 3,
            b if b & 0b1111_1000 == 0b1111_0000 => 4,
            _ => 1, // invalid lead, not salvageable
        };
        return if need > back { back } else { 0 };
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(b"hello"), "hello");
        assert!(!d.has_pending());
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // "é" = 0xC3 0xA9
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[b'a', 0xC3]), "a");
        assert!(d.has_pending());
        assert_eq!(d.decode(&[0xA9, b'b']), "éb");
        assert!(!d.has_pending());
    }

    #[test]
    fn test_four_byte_char_split_three_ways() {
        // "🎉" = F0 9F 8E 89
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[0xF0]), "");
        assert_eq!(d.decode(&[0x9F, 0x8E]), "");
        assert_eq!(d.decode(&[0x89]), "🎉");
    }

    #[test]
    fn test_complete_multibyte_not_carried() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode("héllo".as_bytes()), "héllo");
        assert!(!d.has_pending());
    }

    #[test]
    fn test_invalid_byte_replaced() {
        let mut d = Utf8Decoder::new();
        // 0xFF can never start a valid sequence
        assert_eq!(d.decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn test_lone_continuation_replaced() {
        let mut d = Utf8Decoder::new();
        assert_eq!(d.decode(&[0x80, b'x']), "\u{FFFD}x");
    }
}
