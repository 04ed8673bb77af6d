use smallvec::SmallVec;

use super::*;

/// A named, cache-line aligned region of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    /// Word offset of the first word
    pub base: u32,
    /// Words reserved for the section (including the alignment padding)
    pub words: u32,
}

/// Places sections one after another behind the header.
///
/// ```
/// use graph_gen::image::*;
///
/// let mut layout = ImageLayout::new();
/// let dist = layout.push("distance", 3).unwrap();
/// let offsets = layout.push("edge offset", 4).unwrap();
///
/// assert_eq!(dist, 16);
/// assert_eq!(offsets, 32);
/// assert_eq!(layout.end(), 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLayout {
    sections: SmallVec<[Section; 5]>,
    end: u32,
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self {
            sections: SmallVec::new(),
            end: HEADER_WORDS as u32,
        }
    }
}

impl ImageLayout {
    /// Creates a layout containing only the header
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section of `words` words and returns its base.
    ///
    /// # Errors
    /// Returns [`Error::FieldOverflow`] if the image would outgrow 32-bit word offsets.
    pub fn push(&mut self, name: &'static str, words: u64) -> Result<u32> {
        let base = self.end;
        let padded = round_up_to(words, CACHE_LINE_WORDS as u64);
        let end = base as u64 + padded;

        if end > u32::MAX as u64 {
            return Err(Error::FieldOverflow {
                field: "image size",
                value: end,
            });
        }

        self.sections.push(Section {
            name,
            base,
            words: padded as u32,
        });
        self.end = end as u32;

        Ok(base)
    }

    /// Returns the base of the first section called `name`
    pub fn base(&self, name: &str) -> Option<u32> {
        self.sections.iter().find(|s| s.name == name).map(|s| s.base)
    }

    /// Returns all sections in placement order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the total image length in words
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Creates a zeroed image of this layout with the shared header words set
    pub fn allocate(&self, nodes: NumNodes, edges: NumEdges) -> MemoryImage {
        let mut image = MemoryImage::zeroed(self.end as usize);
        image.set_header(word::MAGIC, IMAGE_MAGIC);
        image.set_header(word::NODES, nodes);
        image.set_header(word::EDGES, edges);
        image.set_header(word::END, self.end);
        image
    }
}
