/*! Position arithmetic.

This module converts between a bit position *relative to a view* and the
physical location of that bit *in the backing array*: a cell index and a bit
offset within that cell. The conversion is pure arithmetic over the view's
start anchor and the cell width; it allocates nothing, caches nothing, and
returns its result by value on the stack, so it is trivially reentrant.

No bounds checking is performed here. Callers are responsible for supplying
positions in `[0, len_bits)`; the checked operation family in [`field`]
enforces that contract before descending to this level, and the `_unchecked`
family carries only debug assertions.

[`field`]: crate::field
!*/

use crate::cell::BitCell;

/** The physical location of one bit in a backing array.

# Fields

- `index`: The array index of the cell holding the bit.
- `bit`: The offset of the bit within that cell, counted from the most
  significant bit. Always in `0 .. C::WIDTH` for the owning view's cell type.
**/
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellPos {
	/// Array index of the cell holding the addressed bit.
	pub index: usize,
	/// Bit offset within the cell, from the most significant bit.
	pub bit: u8,
}

impl CellPos {
	/// Locates the bit `pos` positions past the anchor `(start_index,
	/// start_offset)` in an array of `C` cells.
	///
	/// The absolute bit position is `start_index * WIDTH + start_offset +
	/// pos`; it is then split into `(abs / WIDTH, abs % WIDTH)`.
	#[inline(always)]
	pub fn locate<C>(start_index: usize, start_offset: u8, pos: usize) -> Self
	where C: BitCell {
		debug_assert!(
			start_offset < C::WIDTH,
			"Start offset {} cannot exceed the cell width {}",
			start_offset,
			C::WIDTH,
		);
		let width = usize::from(C::WIDTH);
		let abs = start_index * width + usize::from(start_offset) + pos;
		Self {
			index: abs / width,
			bit: (abs % width) as u8,
		}
	}

	/// Computes the absolute bit position of `(index, offset)` in an array
	/// of `C` cells, counted from the front of the array.
	#[inline(always)]
	pub fn abs<C>(index: usize, offset: u8) -> usize
	where C: BitCell {
		index * usize::from(C::WIDTH) + usize::from(offset)
	}
}
