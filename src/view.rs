/*! The bit-addressable view descriptor.

A [`BitView`] is a window over a backing array of [`BitCell`] cells,
addressable as a flat range of bits. The descriptor records the first and
last cell the window touches and the first and last live bit within those
cells; the bit length is derived from those four fields once, at
construction, and never changes for a given view instance. Re-windowing
produces a *new* view via [`shadow_clone`].

The backing array is held as `Rc<[Cell<C>]>`: `Rc` expresses shared
ownership between aliasing views, and [`Cell`] expresses single-threaded
shared mutability. Both are `!Sync`, so the single-writer contract of this
crate is enforced by the compiler rather than by documentation alone.

[`BitCell`]: crate::cell::BitCell
[`BitView`]: crate::view::BitView
[`Cell`]: core::cell::Cell
[`shadow_clone`]: crate::view::BitView::shadow_clone
!*/

use alloc::{
	rc::Rc,
	vec::Vec,
};
use core::{
	cell::Cell,
	fmt::{
		self,
		Debug,
		Formatter,
	},
	iter,
};

use tap::{
	Pipe,
	Tap,
};

use crate::{
	cell::BitCell,
	domain::Domain,
	pos::CellPos,
};

/** A view over a backing array, addressable as a flat range of bits.

The view is an inclusive window: `start_index`/`start_offset` locate the
first live bit and `end_index`/`end_offset` locate the last. A view can
never be empty; every constructor rejects zero-length windows.

Views alias freely. [`shadow_clone`] and [`wrap_cells`] produce new
descriptors over the *same* backing array, and mutation through any aliasing
view is immediately visible through all others. [`deep_clone`] is the
opposite: it copies the content into a fresh, minimally sized backing array,
realigned to offset zero.

# Type Parameters

- `C`: The backing cell type. Defaults to `u64`, the kind used by the
  allocating factory functions.

[`deep_clone`]: Self::deep_clone
[`shadow_clone`]: Self::shadow_clone
[`wrap_cells`]: Self::wrap_cells
**/
#[derive(Clone)]
pub struct BitView<C = u64>
where C: BitCell {
	/// The backing array, shared with every aliasing view.
	cells: Rc<[Cell<C>]>,
	/// Array index of the first cell touched by the view.
	start_index: usize,
	/// First live bit within the first cell, from the most significant bit.
	start_offset: u8,
	/// Array index of the last cell touched by the view.
	end_index: usize,
	/// Last live bit within the last cell, from the most significant bit.
	end_offset: u8,
	/// Cached bit length. Computed at construction; always at least one.
	len_bits: usize,
}

impl<C> BitView<C>
where C: BitCell {
	/// Allocates a zero-filled backing array of the smallest whole number of
	/// `C` cells covering `len_bits`, and returns a view spanning exactly
	/// `len_bits` bits starting at offset zero.
	///
	/// # Panics
	///
	/// Panics if `len_bits` is zero; a view can never be empty.
	pub fn zeroed(len_bits: usize) -> Self {
		assert!(len_bits > 0, "A view cannot be empty");
		let width = usize::from(C::WIDTH);
		let cells = iter::repeat_with(|| Cell::new(C::default()))
			.take((len_bits + width - 1) / width)
			.collect::<Rc<[Cell<C>]>>();
		Self {
			cells,
			start_index: 0,
			start_offset: 0,
			end_index: (len_bits - 1) / width,
			end_offset: ((len_bits - 1) % width) as u8,
			len_bits,
		}
	}

	/// Wraps a caller-supplied array in a view spanning all of it. The
	/// buffer is moved into the shared backing allocation; no per-element
	/// transformation takes place.
	///
	/// For `bool` cells each array element is one bit, so the view's offsets
	/// are always zero.
	///
	/// # Panics
	///
	/// Panics if `source` is empty.
	pub fn wrap(source: Vec<C>) -> Self {
		assert!(!source.is_empty(), "Cannot wrap an empty array");
		let last = source.len() - 1;
		source
			.into_iter()
			.map(Cell::new)
			.collect::<Rc<[Cell<C>]>>()
			.pipe(|cells| Self::wrap_cells(cells, 0, 0, last, C::WIDTH - 1))
	}

	/// Wraps a shared backing array in a view over the window from
	/// `(start_index, start_offset)` through `(end_index, end_offset)`,
	/// inclusive. No data is copied; the new view aliases every other view
	/// over the same backing.
	///
	/// # Panics
	///
	/// Panics if the backing is empty, if either offset is not below the
	/// cell width, if the window ends before it starts, or if it overruns
	/// the backing array.
	pub fn wrap_cells(
		cells: Rc<[Cell<C>]>,
		start_index: usize,
		start_offset: u8,
		end_index: usize,
		end_offset: u8,
	) -> Self {
		assert!(!cells.is_empty(), "Cannot wrap an empty array");
		assert!(
			start_offset < C::WIDTH && end_offset < C::WIDTH,
			"Offsets ({}, {}) must be below the cell width {}",
			start_offset,
			end_offset,
			C::WIDTH,
		);
		assert!(
			end_index < cells.len(),
			"Window end {} overruns the backing array of {} cells",
			end_index,
			cells.len(),
		);
		let start = CellPos::abs::<C>(start_index, start_offset);
		let end = CellPos::abs::<C>(end_index, end_offset);
		assert!(
			start <= end,
			"Window end {} cannot precede window start {}",
			end,
			start,
		);
		Self {
			cells,
			start_index,
			start_offset,
			end_index,
			end_offset,
			len_bits: end - start + 1,
		}
	}

	/// Produces a new view over the *same* backing array, re-windowed to the
	/// given descriptor. No data is copied; mutations through either view
	/// are visible through the other.
	///
	/// # Panics
	///
	/// Panics under the same conditions as [`wrap_cells`].
	///
	/// [`wrap_cells`]: Self::wrap_cells
	pub fn shadow_clone(
		&self,
		start_index: usize,
		start_offset: u8,
		end_index: usize,
		end_offset: u8,
	) -> Self {
		Self::wrap_cells(
			self.cells.clone(),
			start_index,
			start_offset,
			end_index,
			end_offset,
		)
	}

	/// Copies the view's content into a freshly allocated backing array of
	/// minimal size, realigned so that the clone starts at offset zero.
	/// Mutations of either view after the clone do not affect the other.
	///
	/// When the view already starts at a cell boundary this is a straight
	/// cell-range copy; otherwise the content is shifted down through the
	/// copy engine.
	pub fn deep_clone(&self) -> Self {
		if self.start_offset == 0 {
			let cells = self.cells[self.start_index ..= self.end_index]
				.iter()
				.map(|cell| Cell::new(cell.get()))
				.collect::<Rc<[Cell<C>]>>();
			Self {
				cells,
				start_index: 0,
				start_offset: 0,
				end_index: self.end_index - self.start_index,
				end_offset: self.end_offset,
				len_bits: self.len_bits,
			}
		}
		else {
			Self::zeroed(self.len_bits).tap(|clone| {
				self.copy_to(clone);
			})
		}
	}

	/// The number of live bits in the view. Always at least one.
	#[inline(always)]
	pub fn len_bits(&self) -> usize {
		self.len_bits
	}

	/// The number of live bits in the view, rounded up to whole bytes.
	#[inline]
	pub fn len_bytes(&self) -> usize {
		(self.len_bits + 7) / 8
	}

	/// The width, in bits, of one backing cell.
	#[inline(always)]
	pub fn cell_width(&self) -> u8 {
		C::WIDTH
	}

	/// Array index of the first cell touched by the view.
	#[inline(always)]
	pub fn start_index(&self) -> usize {
		self.start_index
	}

	/// First live bit within the first cell.
	#[inline(always)]
	pub fn start_offset(&self) -> u8 {
		self.start_offset
	}

	/// Array index of the last cell touched by the view.
	#[inline(always)]
	pub fn end_index(&self) -> usize {
		self.end_index
	}

	/// Last live bit within the last cell.
	#[inline(always)]
	pub fn end_offset(&self) -> u8 {
		self.end_offset
	}

	/// Exposes the raw backing array.
	///
	/// This is an intentional escape hatch for callers that need direct
	/// access to the physical cells, and it is **not** encapsulation-safe:
	/// the backing may hold live bits of other views outside this view's
	/// window, and writes through the returned handle bypass every contract
	/// this crate maintains. Cloning the `Rc` and re-wrapping it with
	/// [`wrap_cells`] is the supported way to build further aliasing views.
	///
	/// [`wrap_cells`]: Self::wrap_cells
	#[inline]
	pub fn source_data(&self) -> &Rc<[Cell<C>]> {
		&self.cells
	}

	/// View of the backing cells, for engine-internal addressing.
	#[inline(always)]
	pub(crate) fn cells(&self) -> &[Cell<C>] {
		&self.cells
	}

	/// Locates a view-relative bit position in the backing array.
	#[inline(always)]
	pub(crate) fn locate(&self, pos: usize) -> CellPos {
		CellPos::locate::<C>(self.start_index, self.start_offset, pos)
	}

	/// Classifies the view's occupancy shape over its backing cells.
	#[inline]
	pub(crate) fn domain(&self) -> Domain {
		Domain::new(self)
	}
}

impl BitView<u64> {
	/// Allocates a zero-filled view of `len_bits` bits over the default
	/// 64-bit cell kind.
	///
	/// # Panics
	///
	/// Panics if `len_bits` is zero.
	#[inline]
	pub fn with_bits(len_bits: usize) -> Self {
		Self::zeroed(len_bits)
	}

	/// Allocates a zero-filled view of `len_bytes * 8` bits over the default
	/// 64-bit cell kind.
	///
	/// # Panics
	///
	/// Panics if `len_bytes` is zero.
	#[inline]
	pub fn with_bytes(len_bytes: usize) -> Self {
		Self::zeroed(len_bytes * 8)
	}
}

impl<C> Debug for BitView<C>
where C: BitCell {
	fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
		fmt.debug_struct("BitView")
			.field("cell", &C::TYPENAME)
			.field("start", &(self.start_index, self.start_offset))
			.field("end", &(self.end_index, self.end_offset))
			.field("bits", &self.len_bits)
			.finish()
	}
}
