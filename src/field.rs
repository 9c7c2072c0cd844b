/*! The generic bit engine.

This module implements every read and write operation of a [`BitView`] in
terms of the bit order convention: bits are addressed left to right, most
significant bit first, within and across cells. Reading back the bits
`[0, width)` of a freshly written value returns the same integer that was
written, and reading any strict sub-range returns the corresponding
contiguous slice of that value's bits.

A span that does not fit inside one cell decomposes into a leading partial
cell, a run of whole middle cells, and a trailing partial cell. The partial
cells are handled with shift-and-mask against the cell's natural width; the
middle cells move through the raw multi-cell codecs of [`BitCell`], as many
per step as fit in a 64-bit container. A span that does fit inside one cell
skips the decomposition entirely.

# Checked and unchecked families

Every operation comes in two forms. The checked form validates the position
and width against the view and panics on violation. The `_unchecked` form
performs no validation in release builds (`debug_assert!` only): this is the
documented performance contract of the hot path, not an oversight. An
out-of-contract call on the `_unchecked` family is still memory-safe – it
reads or writes other live bits of the backing array if the position stays
inside it, and panics on the slice bounds check if it does not – but its
result is meaningless and it can corrupt neighboring views over the same
backing.

[`BitCell`]: crate::cell::BitCell
[`BitView`]: crate::view::BitView
!*/

use crate::{
	cell::{
		low_mask,
		BitCell,
	},
	pos::CellPos,
	view::BitView,
};

impl<C> BitView<C>
where C: BitCell {
	/// Reads one bit.
	///
	/// # Panics
	///
	/// Panics if `pos` is outside `[0, len_bits)`.
	#[inline]
	pub fn get(&self, pos: usize) -> bool {
		self.check_span(pos, 1, 1);
		self.get_unchecked(pos)
	}

	/// Reads one bit without validating `pos`.
	#[inline]
	pub fn get_unchecked(&self, pos: usize) -> bool {
		debug_assert!(
			pos < self.len_bits(),
			"Bit position {} is out of range for a view of {} bits",
			pos,
			self.len_bits(),
		);
		let CellPos { index, bit } = self.locate(pos);
		let elt = self.cells()[index].get().into_bits();
		elt >> u32::from(C::WIDTH - 1 - bit) & 1 != 0
	}

	/// Writes one bit.
	///
	/// # Panics
	///
	/// Panics if `pos` is outside `[0, len_bits)`.
	#[inline]
	pub fn set(&self, pos: usize, value: bool) {
		self.check_span(pos, 1, 1);
		self.set_unchecked(pos, value);
	}

	/// Writes one bit without validating `pos`.
	#[inline]
	pub fn set_unchecked(&self, pos: usize, value: bool) {
		debug_assert!(
			pos < self.len_bits(),
			"Bit position {} is out of range for a view of {} bits",
			pos,
			self.len_bits(),
		);
		let CellPos { index, bit } = self.locate(pos);
		let cells = self.cells();
		let mask = 1u64 << u32::from(C::WIDTH - 1 - bit);
		let old = cells[index].get().into_bits();
		cells[index].set(C::from_bits(if value {
			old | mask
		}
		else {
			old & !mask
		}));
	}

	/// Reads `width` bits starting at `pos`, right-justified in the return
	/// value: the first addressed bit becomes the most significant of the
	/// `width` result bits, and all higher bits are zero.
	///
	/// # Parameters
	///
	/// - `pos`: View-relative position of the first bit to read.
	/// - `width`: Number of bits to read, in `1 ..= 64`.
	///
	/// # Panics
	///
	/// Panics if `width` is outside `1 ..= 64` or if `pos + width` exceeds
	/// the view length.
	#[inline]
	pub fn read_bits(&self, pos: usize, width: u8) -> u64 {
		self.check_span(pos, width, 64);
		self.read_bits_unchecked(pos, width)
	}

	/// Reads up to 32 bits starting at `pos`, as the narrow container form.
	///
	/// # Panics
	///
	/// Panics if `width` is outside `1 ..= 32` or if `pos + width` exceeds
	/// the view length.
	#[inline]
	pub fn read_bits_u32(&self, pos: usize, width: u8) -> u32 {
		self.check_span(pos, width, 32);
		self.read_bits_unchecked(pos, width) as u32
	}

	/// Reads `width` bits starting at `pos` without validating either
	/// argument. See the module documentation for the contract.
	pub fn read_bits_unchecked(&self, pos: usize, width: u8) -> u64 {
		debug_assert!(
			(1 ..= 64).contains(&width),
			"Read width {} must be in 1 ..= 64",
			width,
		);
		debug_assert!(
			pos + usize::from(width) <= self.len_bits(),
			"Bits {} .. {} are out of range for a view of {} bits",
			pos,
			pos + usize::from(width),
			self.len_bits(),
		);
		let cells = self.cells();
		let w = C::WIDTH;
		let CellPos { mut index, bit } = self.locate(pos);

		//  The whole span sits inside one cell.
		if bit + width <= w {
			let elt = cells[index].get().into_bits();
			return (elt >> u32::from(w - bit - width)) & low_mask::<u64>(width);
		}

		//  Leading partial cell: its low `w - bit` bits open the value.
		let lead = w - bit;
		let mut accum = cells[index].get().into_bits() & low_mask::<u64>(lead);
		let mut remaining = width - lead;
		index += 1;

		//  Whole middle cells, concatenated through the raw codec. `lead`
		//  is at least one here, so the shift never reaches 64.
		while remaining >= w {
			let count = (remaining / w).min(C::PACK64);
			accum = (accum << u32::from(count * w))
				| C::read_raw_wide(cells, index, count);
			index += usize::from(count);
			remaining -= count * w;
		}

		//  Trailing partial cell: its top `remaining` bits close the value.
		if remaining > 0 {
			let elt = cells[index].get().into_bits();
			accum = (accum << u32::from(remaining))
				| (elt >> u32::from(w - remaining));
		}
		accum
	}

	/// Writes the low `width` bits of `value` starting at `pos`: the most
	/// significant of those bits lands on the first addressed position. Bits
	/// of the backing outside the span are untouched.
	///
	/// # Parameters
	///
	/// - `pos`: View-relative position of the first bit to write.
	/// - `value`: Source bits, right-justified. Higher bits are ignored.
	/// - `width`: Number of bits to write, in `1 ..= 64`.
	///
	/// # Panics
	///
	/// Panics if `width` is outside `1 ..= 64` or if `pos + width` exceeds
	/// the view length.
	#[inline]
	pub fn write_bits(&self, pos: usize, value: u64, width: u8) {
		self.check_span(pos, width, 64);
		self.write_bits_unchecked(pos, value, width);
	}

	/// Writes `width` bits starting at `pos` without validating the span.
	/// See the module documentation for the contract.
	pub fn write_bits_unchecked(&self, pos: usize, value: u64, width: u8) {
		debug_assert!(
			(1 ..= 64).contains(&width),
			"Write width {} must be in 1 ..= 64",
			width,
		);
		debug_assert!(
			pos + usize::from(width) <= self.len_bits(),
			"Bits {} .. {} are out of range for a view of {} bits",
			pos,
			pos + usize::from(width),
			self.len_bits(),
		);
		let cells = self.cells();
		let w = C::WIDTH;
		let CellPos { mut index, bit } = self.locate(pos);
		let value = value & low_mask::<u64>(width);

		//  The whole span sits inside one cell: one merge.
		if bit + width <= w {
			let shift = u32::from(w - bit - width);
			let mask = low_mask::<u64>(width) << shift;
			let old = cells[index].get().into_bits();
			cells[index].set(C::from_bits((old & !mask) | (value << shift)));
			return;
		}

		//  Leading partial cell: its low `w - bit` bits take the top of the
		//  value.
		let lead = w - bit;
		let mut remaining = width - lead;
		let old = cells[index].get().into_bits();
		cells[index].set(C::from_bits(
			(old & !low_mask::<u64>(lead)) | (value >> u32::from(remaining)),
		));
		index += 1;

		//  Whole middle cells, scattered through the raw codec.
		while remaining >= w {
			let count = (remaining / w).min(C::PACK64);
			remaining -= count * w;
			let chunk =
				(value >> u32::from(remaining)) & low_mask::<u64>(count * w);
			C::write_raw_wide(cells, index, chunk, count);
			index += usize::from(count);
		}

		//  Trailing partial cell: its top `remaining` bits take the low end
		//  of the value.
		if remaining > 0 {
			let shift = u32::from(w - remaining);
			let mask = low_mask::<u64>(remaining) << shift;
			let old = cells[index].get().into_bits();
			cells[index].set(C::from_bits(
				(old & !mask) | ((value & low_mask::<u64>(remaining)) << shift),
			));
		}
	}

	/// Reads eight bits as a byte.
	#[inline]
	pub fn read_u8(&self, pos: usize) -> u8 {
		self.read_bits_u32(pos, 8) as u8
	}

	/// Writes a byte.
	#[inline]
	pub fn write_u8(&self, pos: usize, value: u8) {
		self.write_bits(pos, u64::from(value), 8);
	}

	/// Reads sixteen bits as an unsigned word. This is the load form for
	/// both 16-bit cell kinds.
	#[inline]
	pub fn read_u16(&self, pos: usize) -> u16 {
		self.read_bits_u32(pos, 16) as u16
	}

	/// Writes an unsigned word.
	#[inline]
	pub fn write_u16(&self, pos: usize, value: u16) {
		self.write_bits(pos, u64::from(value), 16);
	}

	/// Reads thirty-two bits.
	#[inline]
	pub fn read_u32(&self, pos: usize) -> u32 {
		self.read_bits_u32(pos, 32)
	}

	/// Writes thirty-two bits.
	#[inline]
	pub fn write_u32(&self, pos: usize, value: u32) {
		self.write_bits(pos, u64::from(value), 32);
	}

	/// Reads sixty-four bits.
	#[inline]
	pub fn read_u64(&self, pos: usize) -> u64 {
		self.read_bits(pos, 64)
	}

	/// Writes sixty-four bits.
	#[inline]
	pub fn write_u64(&self, pos: usize, value: u64) {
		self.write_bits(pos, value, 64);
	}

	/// Reads thirty-two bits and reinterprets their IEEE-754 bit pattern.
	/// This is bit-exact: NaN payloads are preserved.
	#[inline]
	pub fn read_f32(&self, pos: usize) -> f32 {
		f32::from_bits(self.read_bits_u32(pos, 32))
	}

	/// Writes the IEEE-754 bit pattern of `value`, bit-exactly.
	#[inline]
	pub fn write_f32(&self, pos: usize, value: f32) {
		self.write_bits(pos, u64::from(value.to_bits()), 32);
	}

	/// Reads sixty-four bits and reinterprets their IEEE-754 bit pattern.
	/// This is bit-exact: NaN payloads are preserved.
	#[inline]
	pub fn read_f64(&self, pos: usize) -> f64 {
		f64::from_bits(self.read_bits(pos, 64))
	}

	/// Writes the IEEE-754 bit pattern of `value`, bit-exactly.
	#[inline]
	pub fn write_f64(&self, pos: usize, value: f64) {
		self.write_bits(pos, value.to_bits(), 64);
	}

	/// Validates a span against the view. `max` is the width capacity of
	/// the requested container form.
	#[inline]
	fn check_span(&self, pos: usize, width: u8, max: u8) {
		assert!(
			(1 ..= max).contains(&width),
			"Width {} must be in 1 ..= {}",
			width,
			max,
		);
		assert!(
			pos < self.len_bits()
				&& self.len_bits() - pos >= usize::from(width),
			"Bits {} .. {} are out of range for a view of {} bits",
			pos,
			pos + usize::from(width),
			self.len_bits(),
		);
	}
}

#[cfg(test)]
mod tests {
	use alloc::vec;

	use crate::view::BitView;

	#[test]
	fn thirteen_bits_in_wide_cells() {
		let view = BitView::with_bits(13);
		view.write_bits(0, 0b1_0110_1011_1010, 13);
		assert_eq!(view.read_bits(0, 13), 0b1_0110_1011_1010);
		//  The middle eight bits.
		assert_eq!(view.read_bits_u32(4, 8), 0b0101_1101);
	}

	#[test]
	fn spans_cross_cell_boundaries() {
		let view = BitView::<u8>::zeroed(32);
		view.write_bits(4, 0xABCD, 16);
		assert_eq!(view.read_bits(4, 16), 0xABCD);
		//  The merge leaves the surrounding bits untouched.
		assert_eq!(view.read_bits(0, 4), 0);
		assert_eq!(view.read_bits(20, 12), 0);
		//  Physical layout: 0000_1010 1011_1100 1101_0000 0000_0000.
		assert_eq!(view.read_bits(0, 32), 0x0ABC_D000);
	}

	#[test]
	fn full_width_round_trip() {
		let view = BitView::with_bits(130);
		view.write_bits(1, 0xDEAD_BEEF_CAFE_F00D, 64);
		assert_eq!(view.read_bits(1, 64), 0xDEAD_BEEF_CAFE_F00D);
		assert_eq!(view.get(0), false);
		//  The top bit of the written value.
		assert_eq!(view.get(1), true);
	}

	#[test]
	fn single_bits() {
		let view = BitView::<u16>::zeroed(40);
		view.set(17, true);
		assert_eq!(view.read_bits(16, 4), 0b0100);
		view.set(17, false);
		assert_eq!(view.read_bits(16, 4), 0);
	}

	#[test]
	fn boolean_cells() {
		let view = BitView::<bool>::zeroed(70);
		view.write_bits(3, 0x5AA5_5AA5_5AA5_5AA5, 64);
		assert_eq!(view.read_bits(3, 64), 0x5AA5_5AA5_5AA5_5AA5);
		assert_eq!(view.read_bits(3, 4), 0b0101);
		assert_eq!(view.get(4), true);
	}

	#[test]
	fn fixed_width_forms() {
		let view = BitView::with_bits(200);
		view.write_u8(3, 0xA7);
		assert_eq!(view.read_u8(3), 0xA7);
		view.write_u16(60, 0xBEEF);
		assert_eq!(view.read_u16(60), 0xBEEF);
		view.write_u32(90, 0xDEAD_BEEF);
		assert_eq!(view.read_u32(90), 0xDEAD_BEEF);
		view.write_u64(130, 0x0123_4567_89AB_CDEF);
		assert_eq!(view.read_u64(130), 0x0123_4567_89AB_CDEF);
	}

	#[test]
	fn float_forms_are_bit_exact() {
		let view = BitView::with_bits(128);

		let pattern = 0x7FF0_0000_DEAD_BEEFu64;
		view.write_f64(5, f64::from_bits(pattern));
		assert_eq!(view.read_f64(5).to_bits(), pattern);
		assert_eq!(view.read_bits(5, 64), pattern);

		let pattern = 0x7F80_1234u32;
		view.write_f32(70, f32::from_bits(pattern));
		assert_eq!(view.read_f32(70).to_bits(), pattern);
	}

	#[test]
	fn narrowed_views_rebase_positions() {
		let view = BitView::wrap(vec![0x12u8, 0x34, 0x56, 0x78]);
		let narrow = view.shadow_clone(1, 4, 3, 3);
		//  Bits 12 .. 28 of the base array: 0x4567.
		assert_eq!(narrow.read_bits(0, 16), 0x4567);
		narrow.write_bits(0, 0xFEDC, 16);
		assert_eq!(view.read_bits(0, 32), 0x123F_EDC8);
	}

	#[test]
	fn unchecked_forms_agree() {
		let view = BitView::<u32>::zeroed(77);
		view.write_bits_unchecked(13, 0x1_FFFF, 17);
		assert_eq!(view.read_bits(13, 17), 0x1_FFFF);
		assert_eq!(view.read_bits_unchecked(13, 17), 0x1_FFFF);
	}

	#[test]
	#[should_panic(expected = "out of range")]
	fn overlong_reads_are_rejected() {
		let view = BitView::with_bits(16);
		view.read_bits(9, 8);
	}

	#[test]
	#[should_panic(expected = "must be in 1 ..= 32")]
	fn overwide_narrow_reads_are_rejected() {
		let view = BitView::with_bits(64);
		view.read_bits_u32(0, 33);
	}

	#[test]
	#[should_panic(expected = "must be in 1 ..= 64")]
	fn zero_width_reads_are_rejected() {
		let view = BitView::with_bits(64);
		view.read_bits(0, 0);
	}
}
