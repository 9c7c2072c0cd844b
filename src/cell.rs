/*! Backing-cell management.

The [`BitCell`] trait generalizes over the physical cell types that can back
a [`BitView`], and is the constraint on the view's storage parameter. Each
implementor declares its width in bits, converts its values to and from raw
bit patterns, and supplies the raw multi-cell codecs that the generic bit
engine uses to move whole cells at a time.

Eight cell types are supported. The integral types store their two's
complement bit patterns directly; `bool` cells hold exactly one bit each; the
floating-point types store their IEEE-754 bit patterns and are never subject
to numeric rounding.

The trait is sealed: downstream crates cannot add cell types, so every view
in existence obeys the packing rules defined here.

[`BitCell`]: crate::cell::BitCell
[`BitView`]: crate::view::BitView
!*/

use core::{
	cell::Cell,
	fmt::Debug,
	ops::Shl,
};

use funty::Unsigned;

/** Generalizes over the primitive types usable as backing cells.

A backing array is a sequence of cells, each [`WIDTH`] bits wide. The trait
describes a cell type entirely in terms of its raw bit pattern: a value
converts losslessly into the low `WIDTH` bits of a `u64` and back. All
multi-cell packing is expressed through these two conversions, so the
floating-point implementors are bit-exact by construction.

The raw codecs pack consecutive cells into an integer container, most
significant cell first. Each container form has a fixed capacity in cells,
[`PACK32`] and [`PACK64`]; a `count` outside `1 ..= capacity` is a
precondition violation and panics unconditionally, because it can only arise
from a logic error in the engine's span decomposition, never from bad
external input.

[`WIDTH`]: Self::WIDTH
[`PACK32`]: Self::PACK32
[`PACK64`]: Self::PACK64
**/
pub trait BitCell:
	//  Forbid external implementation.
	Sealed
	+ Copy
	+ Debug
	+ Default
	+ PartialEq
	+ Sized
	+ 'static
{
	/// The width, in bits, of one cell of this type.
	const WIDTH: u8;

	/// How many cells of this type fit in a 32-bit container. Zero for the
	/// 64-bit cell types, which have no legal 32-bit-container count.
	const PACK32: u8 = 32 / Self::WIDTH;

	/// How many cells of this type fit in a 64-bit container.
	const PACK64: u8 = 64 / Self::WIDTH;

	/// Name of the implementing type, for panic messages.
	const TYPENAME: &'static str;

	/// Extracts the raw bit pattern of one cell, in the low `WIDTH` bits of
	/// the return value. All higher bits are zero.
	fn into_bits(self) -> u64;

	/// Builds a cell value from the low `WIDTH` bits of a raw pattern. All
	/// higher bits are ignored.
	fn from_bits(bits: u64) -> Self;

	/// Packs `count` consecutive cells into a 32-bit container, most
	/// significant cell first.
	///
	/// # Parameters
	///
	/// - `cells`: The backing array.
	/// - `index`: Array index of the first cell to pack.
	/// - `count`: Number of cells to pack. Must be in `1 ..= PACK32`.
	///
	/// # Panics
	///
	/// Panics if `count` is outside the legal set for this cell type, or if
	/// `index + count` overruns the backing array.
	fn read_raw(cells: &[Cell<Self>], index: usize, count: u8) -> u32 {
		assert!(
			(1 ..= Self::PACK32).contains(&count),
			"Cannot pack {} `{}` cells into a 32-bit container",
			count,
			Self::TYPENAME,
		);
		pack(cells, index, count) as u32
	}

	/// Packs `count` consecutive cells into a 64-bit container, most
	/// significant cell first.
	///
	/// # Parameters
	///
	/// - `cells`: The backing array.
	/// - `index`: Array index of the first cell to pack.
	/// - `count`: Number of cells to pack. Must be in `1 ..= PACK64`.
	///
	/// # Panics
	///
	/// Panics if `count` is outside the legal set for this cell type, or if
	/// `index + count` overruns the backing array.
	fn read_raw_wide(cells: &[Cell<Self>], index: usize, count: u8) -> u64 {
		assert!(
			(1 ..= Self::PACK64).contains(&count),
			"Cannot pack {} `{}` cells into a 64-bit container",
			count,
			Self::TYPENAME,
		);
		pack(cells, index, count)
	}

	/// Unpacks a 32-bit container into `count` consecutive cells, most
	/// significant cell first. Inverse of [`read_raw`].
	///
	/// # Panics
	///
	/// Panics under the same conditions as [`read_raw`].
	///
	/// [`read_raw`]: Self::read_raw
	fn write_raw(cells: &[Cell<Self>], index: usize, value: u32, count: u8) {
		assert!(
			(1 ..= Self::PACK32).contains(&count),
			"Cannot unpack a 32-bit container into {} `{}` cells",
			count,
			Self::TYPENAME,
		);
		unpack(cells, index, value as u64, count);
	}

	/// Unpacks a 64-bit container into `count` consecutive cells, most
	/// significant cell first. Inverse of [`read_raw_wide`].
	///
	/// # Panics
	///
	/// Panics under the same conditions as [`read_raw_wide`].
	///
	/// [`read_raw_wide`]: Self::read_raw_wide
	fn write_raw_wide(cells: &[Cell<Self>], index: usize, value: u64, count: u8) {
		assert!(
			(1 ..= Self::PACK64).contains(&count),
			"Cannot unpack a 64-bit container into {} `{}` cells",
			count,
			Self::TYPENAME,
		);
		unpack(cells, index, value, count);
	}
}

/// Concatenates `count` cells starting at `index`, most significant first.
pub(crate) fn pack<C>(cells: &[Cell<C>], index: usize, count: u8) -> u64
where C: BitCell {
	let mut accum = 0u64;
	for cell in &cells[index .. index + count as usize] {
		//  `count * WIDTH` never exceeds 64, so the only full-width shift
		//  happens while `accum` is still zero.
		accum = accum.wrapping_shl(u32::from(C::WIDTH)) | cell.get().into_bits();
	}
	accum
}

/// Scatters the low `count * WIDTH` bits of `value` into `count` cells
/// starting at `index`, most significant cell first.
pub(crate) fn unpack<C>(cells: &[Cell<C>], index: usize, mut value: u64, count: u8)
where C: BitCell {
	for cell in cells[index .. index + count as usize].iter().rev() {
		cell.set(C::from_bits(value & low_mask::<u64>(C::WIDTH)));
		value = value.wrapping_shr(u32::from(C::WIDTH));
	}
}

/** Computes a mask of the low `width` bits of an unsigned container.

The shift operators panic when the shift amount equals the type width, but
callers legitimately need a mask for exactly the container width. This
function handles that case.

# Parameters

- `width`: Number of low bits to set. May be `0 ..= I::BITS`.

# Returns

A value with the low `width` bits set and all higher bits zero.
**/
#[inline]
pub(crate) fn low_mask<I>(width: u8) -> I
where I: Unsigned + Shl<u32, Output = I> {
	if u32::from(width) >= I::BITS {
		!I::ZERO
	}
	else {
		(I::ONE << u32::from(width)) - I::ONE
	}
}

/// Implements `BitCell` for the unsigned integral cell types, whose values
/// already are their own bit patterns.
macro_rules! bitcell_uint {
	( $( $t:ty => $w:expr ),* $(,)? ) => { $(
		impl BitCell for $t {
			const TYPENAME: &'static str = stringify!($t);
			const WIDTH: u8 = $w;

			#[inline(always)]
			fn into_bits(self) -> u64 {
				self as u64
			}

			#[inline(always)]
			fn from_bits(bits: u64) -> Self {
				bits as $t
			}
		}

		impl Sealed for $t {
		}
	)* };
}

bitcell_uint! {
	u8 => 8,
	u16 => 16,
	u32 => 32,
	u64 => 64,
}

/// One-bit cells. Each physical element of the backing array holds exactly
/// one live bit.
impl BitCell for bool {
	const TYPENAME: &'static str = "bool";
	const WIDTH: u8 = 1;

	#[inline(always)]
	fn into_bits(self) -> u64 {
		self as u64
	}

	#[inline(always)]
	fn from_bits(bits: u64) -> Self {
		bits & 1 != 0
	}
}

/// The second 16-bit cell kind. The cell value is reinterpreted through its
/// two's complement bit pattern, so negative values round-trip exactly.
impl BitCell for i16 {
	const TYPENAME: &'static str = "i16";
	const WIDTH: u8 = 16;

	#[inline(always)]
	fn into_bits(self) -> u64 {
		//  Widen through `u16` so that the sign bit does not smear across
		//  the high bits of the container.
		u64::from(self as u16)
	}

	#[inline(always)]
	fn from_bits(bits: u64) -> Self {
		bits as u16 as i16
	}
}

/// 32-bit floating-point cells. Conversion is bit-pattern reinterpretation,
/// never numeric rounding: NaN payloads survive unchanged.
impl BitCell for f32 {
	const TYPENAME: &'static str = "f32";
	const WIDTH: u8 = 32;

	#[inline(always)]
	fn into_bits(self) -> u64 {
		u64::from(self.to_bits())
	}

	#[inline(always)]
	fn from_bits(bits: u64) -> Self {
		f32::from_bits(bits as u32)
	}
}

/// 64-bit floating-point cells. Conversion is bit-pattern reinterpretation,
/// never numeric rounding: NaN payloads survive unchanged.
impl BitCell for f64 {
	const TYPENAME: &'static str = "f64";
	const WIDTH: u8 = 64;

	#[inline(always)]
	fn into_bits(self) -> u64 {
		self.to_bits()
	}

	#[inline(always)]
	fn from_bits(bits: u64) -> Self {
		f64::from_bits(bits)
	}
}

impl Sealed for bool {
}

impl Sealed for i16 {
}

impl Sealed for f32 {
}

impl Sealed for f64 {
}

/** Marker trait to seal `BitCell` against downstream implementation.

This trait is public in the module so that other modules in the crate can
name it, but since the crate root does not re-export it, downstream crates
cannot implement `BitCell` on new types.
**/
#[doc(hidden)]
pub trait Sealed {
}
