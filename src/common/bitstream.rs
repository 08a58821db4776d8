use std::fmt::{Display, Formatter};
use std::mem;

use encoding_rs::UTF_8;
use num_traits::PrimInt;
use tracing::debug;

use super::error::{CodecError, CodecResult};

// Bit stream
//------------------------------------------------------------------------------

/// Flat sequence of bits, most significant bit of each byte first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn from_bytes(inp: &[u8]) -> Self {
        Self { data: inp.to_vec(), len: inp.len() << 3 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Complete bytes only; a trailing partial byte is dropped.
    pub fn whole_bytes(&self) -> &[u8] {
        &self.data[..self.len >> 3]
    }

    pub fn get(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len, "Out of bitstream bounds: Len {}, Pos {}", self.len, pos);
        (self.data[pos >> 3] << (pos & 7)) >> 7 != 0
    }

    /// Bit at `pos` with the stream repeated end to end.
    pub fn get_cyclic(&self, pos: usize) -> bool {
        debug_assert!(self.len > 0, "Cannot index an empty bitstream cyclically");
        self.get(pos % self.len)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }
}

impl Display for BitStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.iter().try_for_each(|b| f.write_str(if b { "1" } else { "0" }))
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Size {size} exceeds width of type: {max_bits}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn extend(&mut self, arr: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(arr);
            self.len += arr.len() << 3;
        } else {
            arr.iter().for_each(|&b| self.push_bits(b, 8));
        }
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bs = Self::with_capacity(iter.size_hint().0);
        iter.for_each(|b| bs.push(b));
        bs
    }
}

#[cfg(test)]
mod bit_stream_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new();
        assert_eq!(bs.len(), 0);
        bs.push_bits(0u8, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000u8, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000u8, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1111111u8, 7);
        assert_eq!(bs.len(), 19);
        bs.push_bits(0b111111111111u16, 16);
        assert_eq!(bs.len(), 35);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        bs.push(false);
        assert_eq!(bs.data, vec![0b00000000]);
        bs.push(true);
        assert_eq!(bs.data, vec![0b01000000]);
    }

    #[test]
    fn test_push_bits_unaligned() {
        let mut bs = BitStream::new();
        bs.push_bits(0b101u8, 3);
        bs.push_bits(0b11001100u8, 8);
        assert_eq!(bs.to_string(), "10111001100");
        assert_eq!(bs.whole_bytes(), &[0b10111001]);
    }

    #[test]
    fn test_extend_unaligned() {
        let mut bs = BitStream::new();
        bs.push(true);
        bs.extend(&[0xFF, 0x00]);
        assert_eq!(bs.len(), 17);
        assert_eq!(bs.whole_bytes(), &[0xFF, 0x80]);
    }

    #[test]
    fn test_get_cyclic() {
        let bs = BitStream::from_bytes(&[0b10100000]);
        assert!(bs.get_cyclic(0));
        assert!(!bs.get_cyclic(1));
        assert!(bs.get_cyclic(8));
        assert!(bs.get_cyclic(10));
        assert!(!bs.get_cyclic(11));
    }

    #[test]
    fn test_collect() {
        let bs: BitStream = "0100100001".chars().map(|c| c == '1').collect();
        assert_eq!(bs.len(), 10);
        assert_eq!(bs.whole_bytes(), b"H");
        assert_eq!(bs.to_string(), "0100100001");
    }
}

// Packing & unpacking of text payload
//------------------------------------------------------------------------------

/// Packs `text` followed by `marker` as UTF-8, 8 bits per byte, most significant bit first.
pub fn pack(text: &str, marker: &str) -> BitStream {
    let mut bs = BitStream::with_capacity((text.len() + marker.len()) << 3);
    bs.extend(text.as_bytes());
    bs.extend(marker.as_bytes());
    bs
}

/// Inverse of [`pack`]. Undecodable bytes are replaced rather than rejected; only the absence of
/// the marker fails the unpacking.
pub fn unpack(bits: &BitStream, marker: &str) -> CodecResult<String> {
    let (text, had_errors) = UTF_8.decode_without_bom_handling(bits.whole_bytes());
    if had_errors {
        debug!("Replaced malformed UTF-8 sequences in sampled payload");
    }

    match text.find(marker) {
        Some(end) => Ok(text[..end].to_string()),
        None => Err(CodecError::NoMarkerFound),
    }
}

#[cfg(test)]
mod pack_tests {
    use test_case::test_case;

    use super::{pack, unpack, BitStream};
    use crate::common::error::CodecError;

    #[test]
    fn test_pack_layout() {
        let bs = pack("A", "!");
        assert_eq!(bs.to_string(), "0100000100100001");
    }

    #[test]
    fn test_pack_multibyte() {
        let bs = pack("é", "<END>");
        assert_eq!(bs.len(), (2 + 5) * 8);
        assert_eq!(&bs.to_string()[..16], "1100001110101001");
    }

    #[test_case("HELLO"; "ascii")]
    #[test_case(""; "empty")]
    #[test_case("Hello, world! 🌏"; "emoji")]
    #[test_case("नमस्ते दुनिया"; "devanagari")]
    fn test_unpack(text: &str) {
        let bs = pack(text, "<END>");
        assert_eq!(unpack(&bs, "<END>"), Ok(text.to_string()));
    }

    #[test]
    fn test_unpack_repeated_payload() {
        let mut bs = pack("HELLO", "<END>");
        bs.extend(b"HELLO<END>HEL");
        bs.push(true);
        assert_eq!(unpack(&bs, "<END>"), Ok("HELLO".to_string()));
    }

    #[test]
    fn test_unpack_first_marker_wins() {
        let bs = BitStream::from_bytes(b"a<END>b<END>");
        assert_eq!(unpack(&bs, "<END>"), Ok("a".to_string()));
    }

    #[test]
    fn test_unpack_without_marker() {
        let bs = BitStream::from_bytes(b"HELLO<EN");
        assert_eq!(unpack(&bs, "<END>"), Err(CodecError::NoMarkerFound));
        assert_eq!(unpack(&BitStream::new(), "<END>"), Err(CodecError::NoMarkerFound));
        assert_eq!(unpack(&BitStream::from_bytes(&[0; 64]), "<END>"), Err(CodecError::NoMarkerFound));
    }

    #[test]
    fn test_unpack_replaces_malformed_bytes() {
        let mut bs = BitStream::from_bytes(&[b'o', b'k', 0xFF, b'!']);
        bs.extend(b"<END>");
        assert_eq!(unpack(&bs, "<END>"), Ok("ok\u{FFFD}!".to_string()));
    }

    #[test]
    fn test_unpack_drops_trailing_partial_byte() {
        let mut bs = pack("hi", "<END>");
        bs.push_bits(0b101u8, 3);
        assert_eq!(unpack(&bs, "<END>"), Ok("hi".to_string()));
    }
}
