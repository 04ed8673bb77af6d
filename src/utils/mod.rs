/*!
# Utilities

Provides helper structs used by the graph representations and solvers:
- [`SlicedBuffer`](self::sliced_buffer::SlicedBuffer): the internal representation for [`CsrGraph`](crate::repr::CsrGraph),
- [`ColorSet`]: the fixed-width bitmask of greedy coloring,
- [`round_up_to`]: the alignment helper of the memory-image layouts.
*/

pub mod color_set;
pub mod sliced_buffer;

pub use color_set::ColorSet;

/// Rounds `value` up to the next multiple of `granularity`.
///
/// # Panics
/// Panics if `granularity == 0`.
///
/// # Examples
/// ```
/// use graph_gen::utils::round_up_to;
///
/// assert_eq!(round_up_to(0, 16), 0);
/// assert_eq!(round_up_to(17, 16), 32);
/// ```
pub fn round_up_to(value: u64, granularity: u64) -> u64 {
    value.div_ceil(granularity) * granularity
}
