/*! Bulk fill and copy.

Filling and copying are the only operations that touch a view's whole range
at once, and they are the reason the crate carries the [`Domain`]
decomposition: both degrade from per-bit traversal to per-cell transfers
wherever alignment allows.

[`copy_to`] dispatches between two strategies. When source and destination
share the same backing kind *and* the same starting offset within their
first cells, and the transfer is at least [`FAST_COPY_THRESHOLD`] bits long,
the copy splits three ways: a partial leading cell merged with shift and
mask, an interior of whole-cell transfers, and a partial trailing cell
merged with shift and mask. Either partial stage vanishes when the
corresponding edge is cell-aligned. This turns an `O(bits)` bit loop into
`O(bits / WIDTH)` cell operations without changing a single result bit.
Everything else falls back to the generic bit-by-bit engine, which is also
available directly as [`copy_to_kind`] for transfers between different
backing kinds.

[`Domain`]: crate::domain::Domain
[`FAST_COPY_THRESHOLD`]: crate::copy::FAST_COPY_THRESHOLD
[`copy_to`]: crate::view::BitView::copy_to
[`copy_to_kind`]: crate::view::BitView::copy_to_kind
!*/

use core::cell::Cell;

use crate::{
	cell::{
		low_mask,
		BitCell,
	},
	domain::Domain,
	view::BitView,
};

/// Bit-length threshold below which [`copy_to`] uses the generic engine
/// even when alignment would allow the bulk path.
///
/// This is a crossover tuning constant, not load-bearing semantics: both
/// paths produce identical results at every length, and the threshold only
/// decides where the bulk path's setup cost stops paying for itself.
///
/// [`copy_to`]: crate::view::BitView::copy_to
pub const FAST_COPY_THRESHOLD: usize = 64;

impl<C> BitView<C>
where C: BitCell {
	/// Sets every live bit of the view to `value`. Bits of the backing
	/// outside the view are untouched.
	pub fn fill(&self, value: bool) {
		let cells = self.cells();
		let fill = if value { !0u64 } else { 0 };
		match self.domain() {
			Domain::Enclave { index, head, tail } => {
				let mask = low_mask::<u64>(tail - head + 1)
					<< u32::from(C::WIDTH - 1 - tail);
				merge(cells, index, mask, fill);
			},
			Domain::Region { head, body, tail } => {
				if let Some((index, head)) = head {
					merge(cells, index, low_mask::<u64>(C::WIDTH - head), fill);
				}
				for index in body {
					cells[index].set(C::from_bits(fill));
				}
				if let Some((index, tail)) = tail {
					let mask = low_mask::<u64>(tail + 1)
						<< u32::from(C::WIDTH - 1 - tail);
					merge(cells, index, mask, fill);
				}
			},
		}
	}

	/// Copies `min(self.len_bits(), dest.len_bits())` bits from the start
	/// of `self` to the start of `dest`, bit for bit, and returns the
	/// number of bits copied.
	///
	/// Takes the alignment-optimized bulk path when both views share a
	/// starting offset and the transfer is at least [`FAST_COPY_THRESHOLD`]
	/// bits; otherwise traverses bit by bit. The two strategies are
	/// result-identical.
	pub fn copy_to(&self, dest: &Self) -> usize {
		let n = self.len_bits().min(dest.len_bits());
		if self.start_offset() == dest.start_offset()
			&& n >= FAST_COPY_THRESHOLD
		{
			self.copy_aligned(dest, n);
		}
		else {
			copy_bitwise(self, dest, n);
		}
		n
	}

	/// Copies `min(self.len_bits(), dest.len_bits())` bits into a view of
	/// any backing kind, through the generic bit-by-bit engine, and returns
	/// the number of bits copied.
	pub fn copy_to_kind<D>(&self, dest: &BitView<D>) -> usize
	where D: BitCell {
		let n = self.len_bits().min(dest.len_bits());
		copy_bitwise(self, dest, n);
		n
	}

	/// Bulk transfer of `n` bits between views whose starting offsets are
	/// equal. Partial edge cells are merged individually; the interior
	/// moves as whole cells.
	fn copy_aligned(&self, dest: &Self, n: usize) {
		let width = usize::from(C::WIDTH);
		let src_cells = self.cells();
		let dst_cells = dest.cells();
		let mut s = self.start_index();
		let mut d = dest.start_index();
		let mut remaining = n;

		let offset = self.start_offset();
		if offset != 0 {
			let lead = usize::from(C::WIDTH - offset).min(remaining) as u8;
			merge_span(src_cells, s, dst_cells, d, offset, lead);
			remaining -= usize::from(lead);
			s += 1;
			d += 1;
		}

		let whole = remaining / width;
		for i in 0 .. whole {
			dst_cells[d + i].set(src_cells[s + i].get());
		}
		s += whole;
		d += whole;
		remaining -= whole * width;

		if remaining > 0 {
			merge_span(src_cells, s, dst_cells, d, 0, remaining as u8);
		}
	}
}

/// Generic copy: one bit at a time through the position arithmetic of each
/// view. Correct for every kind pairing and alignment; slow.
fn copy_bitwise<C, D>(src: &BitView<C>, dest: &BitView<D>, n: usize)
where
	C: BitCell,
	D: BitCell,
{
	for pos in 0 .. n {
		dest.set_unchecked(pos, src.get_unchecked(pos));
	}
}

/// Writes `value` into the bits of `cells[index]` selected by `mask`,
/// preserving the rest.
#[inline]
fn merge<C>(cells: &[Cell<C>], index: usize, mask: u64, value: u64)
where C: BitCell {
	let old = cells[index].get().into_bits();
	cells[index].set(C::from_bits((old & !mask) | (value & mask)));
}

/// Copies bits `[start, start + count)` of one source cell into the same
/// positions of one destination cell.
#[inline]
fn merge_span<C>(
	src_cells: &[Cell<C>],
	s: usize,
	dst_cells: &[Cell<C>],
	d: usize,
	start: u8,
	count: u8,
) where C: BitCell {
	let mask = low_mask::<u64>(count) << u32::from(C::WIDTH - start - count);
	merge(dst_cells, d, mask, src_cells[s].get().into_bits());
}

#[cfg(test)]
mod tests {
	use alloc::vec;

	use super::*;

	#[test]
	fn fill_respects_window_edges() {
		let base = BitView::<u8>::zeroed(32);
		//  Live bits 5 ..= 18 of the backing.
		let narrow = base.shadow_clone(0, 5, 2, 2);
		narrow.fill(true);
		assert_eq!(base.read_bits(0, 32), 0x07FF_E000);

		base.fill(true);
		narrow.fill(false);
		assert_eq!(base.read_bits(0, 32), 0xF800_1FFF);
	}

	#[test]
	fn fill_single_cell_window() {
		let base = BitView::<u64>::zeroed(64);
		let narrow = base.shadow_clone(0, 3, 0, 10);
		narrow.fill(true);
		assert_eq!(base.read_bits(0, 16), 0b0001_1111_1110_0000);
	}

	#[test]
	fn fill_boolean_cells() {
		let view = BitView::<bool>::zeroed(9);
		view.fill(true);
		assert_eq!(view.read_bits(0, 9), 0x1FF);
		view.fill(false);
		assert_eq!(view.read_bits(0, 9), 0);
	}

	#[test]
	fn aligned_copy_matches_generic() {
		let src = BitView::wrap(
			(0 ..= 255u8).map(|b| b.wrapping_mul(37)).collect(),
		);
		let fast = BitView::<u8>::zeroed(src.len_bits());
		let slow = BitView::<u8>::zeroed(src.len_bits());

		assert_eq!(src.copy_to(&fast), src.len_bits());
		assert_eq!(src.copy_to_kind(&slow), src.len_bits());

		for index in 0 .. 256 {
			assert_eq!(
				fast.source_data()[index].get(),
				slow.source_data()[index].get(),
			);
		}
	}

	#[test]
	fn misaligned_heads_still_copy_exactly() {
		let base = BitView::wrap(
			(0 ..= 31u8).map(|b| b.wrapping_mul(73) ^ 0x5A).collect(),
		);
		//  Source starts mid-cell; destination starts at a boundary.
		let src = base.shadow_clone(0, 3, 31, 7);
		let dest = BitView::<u8>::zeroed(src.len_bits());
		assert_eq!(src.copy_to(&dest), src.len_bits());

		for pos in 0 .. src.len_bits() {
			assert_eq!(src.get(pos), dest.get(pos));
		}
	}

	#[test]
	fn shared_offsets_take_the_bulk_path() {
		let base = BitView::wrap(
			(0 .. 64u8).map(|b| b.wrapping_mul(199) ^ 0xC3).collect(),
		);
		let src = base.shadow_clone(1, 5, 63, 2);
		let dest_base = BitView::<u8>::zeroed(512);
		let dest = dest_base.shadow_clone(2, 5, 63, 7);

		let copied = src.copy_to(&dest);
		assert_eq!(copied, src.len_bits().min(dest.len_bits()));
		for pos in 0 .. copied {
			assert_eq!(src.get(pos), dest.get(pos));
		}
	}

	#[test]
	fn short_copies_use_the_generic_path() {
		let src = BitView::wrap(vec![0xDEu8, 0xAD]);
		let dest = BitView::<u8>::zeroed(16);
		assert_eq!(src.copy_to(&dest), 16);
		assert_eq!(dest.read_bits(0, 16), 0xDEAD);
	}

	#[test]
	fn length_mismatch_truncates() {
		let src = BitView::wrap(vec![0xFFu8; 4]);
		let dest = BitView::<u8>::zeroed(9);
		assert_eq!(src.copy_to(&dest), 9);
		assert_eq!(dest.read_bits(0, 9), 0x1FF);

		let wide = BitView::<u64>::zeroed(128);
		let narrow = BitView::wrap(vec![0xA5u8, 0xA5]);
		assert_eq!(narrow.copy_to_kind(&wide), 16);
		assert_eq!(wide.read_bits(0, 16), 0xA5A5);
	}

	#[test]
	fn cross_kind_copies_preserve_bits() {
		let src = BitView::wrap(vec![0x0123_4567_89AB_CDEFu64]);
		let dest = BitView::<bool>::zeroed(64);
		assert_eq!(src.copy_to_kind(&dest), 64);
		assert_eq!(dest.read_bits(0, 64), 0x0123_4567_89AB_CDEF);
	}
}
