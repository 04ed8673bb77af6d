/*!
# Memory Images

A [`MemoryImage`] is the exact content of the accelerator's memory before a run: a flat array
of 32-bit little-endian words starting with a [`HEADER_WORDS`]-word header, followed by
sections that each start on a cache line ([`CACHE_LINE_WORDS`] words). All base addresses
stored in the header are word offsets into the image.

Header words shared by all layouts (see [`word`]):

| word | content |
|---|---|
| 0 | [`IMAGE_MAGIC`] |
| 1 | number of vertices |
| 2 | number of edges |
| 3 | edge-offset section base |
| 4 | neighbor section base |
| 6 | ground-truth section base |
| 8 | end of the image (= its length in words) |

The app-specific serializers ([`sssp_image`], [`color_image`], [`flow_image`]) fill in the
remaining words; they are pure functions of the compiled graph and the reference result.
*/

use std::{
    io::Write,
    ops::{Index, Range},
};

use crate::{error::*, prelude::*, utils::round_up_to};

mod color;
pub mod digest;
mod flow;
mod layout;
mod sssp;

pub use color::*;
pub use digest::ImageDigest;
pub use flow::*;
pub use layout::*;
pub use sssp::*;

/// Magic word opening every image
pub const IMAGE_MAGIC: u32 = 0xdead;

/// Number of words reserved for the header
pub const HEADER_WORDS: usize = 16;

/// Section alignment in words (64 byte cache lines)
pub const CACHE_LINE_WORDS: usize = 16;

/// Indices of the header words
pub mod word {
    pub const MAGIC: usize = 0;
    pub const NODES: usize = 1;
    pub const EDGES: usize = 2;
    pub const EDGE_OFFSET_BASE: usize = 3;
    pub const NEIGHBOR_BASE: usize = 4;
    /// Distance section (sssp, flow) or vertex data section (color)
    pub const VERTEX_BASE: usize = 5;
    pub const GROUND_TRUTH_BASE: usize = 6;
    /// Start vertex (sssp, flow) or scratch section base (color)
    pub const START: usize = 7;
    pub const END: usize = 8;
}

/// Word-addressed memory image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryImage {
    words: Vec<u32>,
}

impl MemoryImage {
    /// Creates an image of `len` zero words
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0; len],
        }
    }

    /// Wraps already encoded words
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Decodes little-endian bytes.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the length is not a multiple of four.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::InvalidParameter(format!(
                "image of {} bytes is not word aligned",
                bytes.len()
            )));
        }

        Ok(Self::from_words(
            bytes
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ))
    }

    /// Returns the number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns *true* if the image has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns all words
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns the header (at most [`HEADER_WORDS`] words)
    pub fn header(&self) -> &[u32] {
        &self.words[..HEADER_WORDS.min(self.words.len())]
    }

    /// Returns header word `index` if present
    pub fn header_word(&self, index: usize) -> Option<u32> {
        self.header().get(index).copied()
    }

    /// Returns the magic word
    pub fn magic(&self) -> Option<u32> {
        self.header_word(word::MAGIC)
    }

    /// Returns the number of vertices stored in the header
    pub fn number_of_nodes(&self) -> Option<NumNodes> {
        self.header_word(word::NODES)
    }

    /// Returns the number of edges stored in the header
    pub fn number_of_edges(&self) -> Option<NumEdges> {
        self.header_word(word::EDGES)
    }

    /// Returns the end offset stored in the header
    pub fn end(&self) -> Option<u32> {
        self.header_word(word::END)
    }

    /// Returns the `len` words starting at `base`.
    /// ** Panics if the range exceeds the image **
    pub fn section(&self, base: u32, len: usize) -> &[u32] {
        &self.words[Self::range(base, len)]
    }

    /// Mutable variant of [`MemoryImage::section`]
    pub(crate) fn section_mut(&mut self, base: u32, len: usize) -> &mut [u32] {
        &mut self.words[Self::range(base, len)]
    }

    /// Sets header word `index`
    pub(crate) fn set_header(&mut self, index: usize, value: u32) {
        debug_assert!(index < HEADER_WORDS);
        self.words[index] = value;
    }

    fn range(base: u32, len: usize) -> Range<usize> {
        base as usize..base as usize + len
    }

    /// Encodes the image as little-endian bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Writes the little-endian encoding of the image to `writer`
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for w in &self.words {
            writer.write_all(&w.to_le_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Index<usize> for MemoryImage {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.words[index]
    }
}

/// Fails with [`Error::FieldOverflow`] unless `value < 2^bits`
pub(crate) fn check_field(field: &'static str, value: u32, bits: u32) -> Result<u32> {
    if bits < u32::BITS && value >> bits != 0 {
        return Err(Error::FieldOverflow {
            field,
            value: value as u64,
        });
    }
    Ok(value)
}

/// Copies the CSR offsets (`n + 1` words) to `base`
fn write_offsets(image: &mut MemoryImage, base: u32, graph: &CsrGraph) {
    image
        .section_mut(base, graph.offsets().len())
        .copy_from_slice(graph.offsets());
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn byte_encoding() {
        let image = MemoryImage::from_words(vec![0xdead, 1, 0x0102_0304]);
        let bytes = image.to_bytes();
        assert_eq!(&bytes[..4], &[0xad, 0xde, 0, 0]);
        assert_eq!(&bytes[8..], &[4, 3, 2, 1]);

        let mut written = Vec::new();
        image.write_to(&mut written).unwrap();
        assert_eq!(written, bytes);

        assert_eq!(MemoryImage::from_bytes(&bytes).unwrap(), image);
        assert!(MemoryImage::from_bytes(&bytes[1..]).is_err());
    }

    #[test]
    fn header_access() {
        let image = MemoryImage::from_words((0..20).collect());
        assert_eq!(image.header().len(), HEADER_WORDS);
        assert_eq!(image.magic(), Some(0));
        assert_eq!(image.end(), Some(8));
        assert_eq!(image.header_word(HEADER_WORDS), None);

        let short = MemoryImage::from_words(vec![IMAGE_MAGIC]);
        assert_eq!(short.magic(), Some(IMAGE_MAGIC));
        assert_eq!(short.number_of_nodes(), None);
    }

    #[test]
    fn field_checks() {
        assert_eq!(check_field("x", 255, 8).unwrap(), 255);
        assert!(matches!(
            check_field("x", 256, 8),
            Err(Error::FieldOverflow {
                field: "x",
                value: 256
            })
        ));
        assert!(check_field("x", u32::MAX, 32).is_ok());
    }
}
