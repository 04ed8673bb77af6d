/*!
# Fixed-width color sets

[`ColorSet`] is the bitmask used by greedy coloring to collect the colors of a vertex's
neighbors. Its width is fixed at [`ColorSet::CAPACITY`] bits, which bounds the largest color
that can ever be assigned to [`ColorSet::MAX_COLOR`]. Asking a full set for a free color is a
reported condition, never a silent wrap-around.
*/

/// Capacity-bounded set of colors `0..ColorSet::CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSet(u64);

impl ColorSet {
    /// Number of representable colors
    pub const CAPACITY: u32 = u64::BITS;

    /// Largest representable color
    pub const MAX_COLOR: u32 = Self::CAPACITY - 1;

    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `color` and returns *true* if it was already present.
    ///
    /// # Panics
    /// Panics if `color > ColorSet::MAX_COLOR`.
    pub fn insert(&mut self, color: u32) -> bool {
        assert!(color <= Self::MAX_COLOR, "color {color} exceeds ColorSet");
        let bit = 1u64 << color;
        let present = self.0 & bit != 0;
        self.0 |= bit;
        present
    }

    /// Returns *true* if `color` is in the set
    pub fn contains(&self, color: u32) -> bool {
        color <= Self::MAX_COLOR && self.0 & (1u64 << color) != 0
    }

    /// Returns the number of colors in the set
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Returns *true* if no color is in the set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the smallest color not in the set or `None` if all colors are taken
    ///
    /// # Examples
    /// ```
    /// use graph_gen::utils::ColorSet;
    ///
    /// let mut set = ColorSet::new();
    /// set.insert(0);
    /// set.insert(2);
    /// assert_eq!(set.first_free(), Some(1));
    /// ```
    pub fn first_free(&self) -> Option<u32> {
        let free = self.0.trailing_ones();
        (free < Self::CAPACITY).then_some(free)
    }
}
