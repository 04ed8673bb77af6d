/*!
# CSR-based Sliced Buffers

A **Compressed Sparse Row (CSR)**-like data structure for storing variable-length slices.

- A contiguous `buffer: Vec<T>` stores all elements.
- A non-decreasing `offsets: Vec<NumEdges>` of length `len + 1` stores slice boundaries,
  where slice `i` is `buffer[offsets[i]..offsets[i+1]]`.

### Invariants
All constructions verify that
1. `offsets` is non-empty and starts at `0`,
2. `offsets` is non-decreasing,
3. the last offset equals `buffer.len()`.

The memory images copy `offsets` verbatim, so the last offset always equals the number of
entries (no trailing slack in `buffer`).
*/

use std::ops::{Index, IndexMut};

use crate::{edge::NumEdges, node::Node};

/// CSR-like structure storing slices of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedBuffer<T> {
    buffer: Vec<T>,
    offsets: Vec<NumEdges>,
}

impl<T> Default for SlicedBuffer<T> {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            offsets: vec![0],
        }
    }
}

impl<T> SlicedBuffer<T> {
    /// Constructs a new `SlicedBuffer`.
    ///
    /// # Panics
    /// Panics if:
    /// - `offsets` is empty or does not start at `0`
    /// - `offsets` is not sorted
    /// - the last offset differs from `buffer.len()`
    ///
    /// # Examples
    /// ```
    /// use graph_gen::utils::sliced_buffer::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::new(vec![1u32, 2, 4, 5, 6, 7, 8], vec![0, 2, 4, 7]);
    /// assert_eq!(sb.len(), 3);
    /// assert_eq!(&sb[2], &[6, 7, 8]);
    /// ```
    pub fn new(buffer: Vec<T>, offsets: Vec<NumEdges>) -> Self {
        assert_eq!(offsets.first(), Some(&0));
        assert!(offsets.is_sorted());
        assert_eq!(*offsets.last().unwrap() as usize, buffer.len());

        Self { buffer, offsets }
    }

    /// Builds a buffer by concatenating `slices` in order
    ///
    /// # Examples
    /// ```
    /// use graph_gen::utils::sliced_buffer::SlicedBuffer;
    ///
    /// let sb = SlicedBuffer::from_slices([&[1u8][..], &[][..], &[2, 3][..]]);
    /// assert_eq!(sb.raw_offset_slice(), &[0, 1, 1, 3]);
    /// ```
    pub fn from_slices<'a, I>(slices: I) -> Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a [T]>,
    {
        let slices = slices.into_iter();
        let mut offsets = Vec::with_capacity(slices.size_hint().0 + 1);
        let mut buffer = Vec::new();

        offsets.push(0);
        for slice in slices {
            buffer.extend_from_slice(slice);
            offsets.push(buffer.len() as NumEdges);
        }

        Self { buffer, offsets }
    }

    /// Returns the number of slices
    #[allow(clippy::len_without_is_empty)]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the total number of entries in the buffer
    #[inline(always)]
    pub fn number_of_entries(&self) -> NumEdges {
        self.buffer.len() as NumEdges
    }

    /// Returns the length of slice `u`
    #[inline(always)]
    pub fn size_of(&self, u: Node) -> NumEdges {
        self.offsets[u as usize + 1] - self.offsets[u as usize]
    }

    /// Returns a reference to the complete buffer
    #[inline(always)]
    pub fn raw_buffer_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Returns a reference to the offsets array (`len() + 1` entries)
    #[inline(always)]
    pub fn raw_offset_slice(&self) -> &[NumEdges] {
        &self.offsets
    }
}

impl<T> Index<Node> for SlicedBuffer<T> {
    type Output = [T];

    #[inline(always)]
    fn index(&self, idx: Node) -> &Self::Output {
        let start = self.offsets[idx as usize] as usize;
        let end = self.offsets[idx as usize + 1] as usize;
        &self.buffer[start..end]
    }
}

impl<T> IndexMut<Node> for SlicedBuffer<T> {
    #[inline(always)]
    fn index_mut(&mut self, idx: Node) -> &mut Self::Output {
        let start = self.offsets[idx as usize] as usize;
        let end = self.offsets[idx as usize + 1] as usize;
        &mut self.buffer[start..end]
    }
}
