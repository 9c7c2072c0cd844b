//! Concrete end-to-end scenarios, pinned with literal values.

use bitview::prelude::*;

#[test]
fn thirteen_bits_in_a_wide_cell() {
	//  A 64-bit-cell view of exactly thirteen bits.
	let view = BitView::with_bits(13);
	assert_eq!(view.len_bits(), 13);
	assert_eq!(view.len_bytes(), 2);

	view.write_bits(0, 0b1011010111010, 13);
	assert_eq!(view.read_bits_u32(0, 13), 0b1011010111010);
	//  The middle eight bits, MSB-aligned to position 4.
	assert_eq!(view.read_bits_u32(4, 8), 0b01011101);
}

#[test]
fn kilobyte_aligned_copy() {
	//  Two 8-bit-cell views of one thousand cells each, both starting at
	//  offset zero: `copy_to` takes the fully aligned bulk path, and the
	//  result must be indistinguishable from a plain element copy.
	let source = (0 .. 1000u32)
		.map(|index| (index.wrapping_mul(2_654_435_761) >> 24) as u8)
		.collect::<Vec<u8>>();

	let src = BitView::wrap(source.clone());
	let dest = BitView::<u8>::zeroed(8000);
	assert_eq!(src.copy_to(&dest), 8000);

	let copied = dest
		.source_data()
		.iter()
		.map(|cell| cell.get())
		.collect::<Vec<u8>>();
	assert_eq!(copied, source);
}

#[test]
fn wrapping_each_kind() {
	assert_eq!(BitView::wrap(vec![true; 3]).len_bits(), 3);
	assert_eq!(BitView::wrap(vec![0u8; 3]).len_bits(), 24);
	assert_eq!(BitView::wrap(vec![0u16; 3]).len_bits(), 48);
	assert_eq!(BitView::wrap(vec![0i16; 3]).len_bits(), 48);
	assert_eq!(BitView::wrap(vec![0u32; 3]).len_bits(), 96);
	assert_eq!(BitView::wrap(vec![0.0f32; 3]).len_bits(), 96);
	assert_eq!(BitView::wrap(vec![0u64; 3]).len_bits(), 192);
	assert_eq!(BitView::wrap(vec![0.0f64; 3]).len_bits(), 192);
}

#[test]
fn wrapped_content_is_visible_immediately() {
	//  Wrapping performs no copy or transformation of the content.
	let view = BitView::wrap(vec![-1i16, 0x0123, 0x4567]);
	assert_eq!(view.read_bits(0, 48), 0xFFFF_0123_4567);
	assert_eq!(view.read_u16(16), 0x0123);

	let view = BitView::wrap(vec![1.5f32]);
	assert_eq!(view.read_bits_u32(0, 32), 1.5f32.to_bits());
}
