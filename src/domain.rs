/*! Cell-span decomposition of a view.

A view's live bit range occupies its backing cells in one of a small number
of shapes: either every live bit sits inside one cell that the view does not
fully cover, or the range is a run of wholly covered cells with at most one
partially covered cell on each end.

This module names those shapes. Bulk operations – filling, cloning, and the
alignment-optimized copy – branch on the shape once, up front, instead of
re-deriving edge conditions per cell.
!*/

use core::ops::Range;

use crate::{
	cell::BitCell,
	view::BitView,
};

/** The shape of a view's occupancy of its backing cells.

The `head`/`tail` offsets use the same conventions as the view descriptor:
`head` is the first live bit of a partially covered leading cell, counted
from the most significant bit, and `tail` is the *last* live bit of a
partially covered trailing cell.
**/
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Domain {
	/// All live bits sit inside a single cell which the view does not fully
	/// cover.
	///
	/// # Members
	///
	/// - `index`: Array index of the cell.
	/// - `head`: First live bit in the cell.
	/// - `tail`: Last live bit in the cell. `head <= tail < WIDTH`, and the
	///   pair never covers the whole cell.
	Enclave {
		index: usize,
		head: u8,
		tail: u8,
	},
	/// The live range covers a run of whole cells, bracketed by up to one
	/// partially covered cell on each end.
	///
	/// # Members
	///
	/// - `head`: The partially covered leading cell, as `(index, first live
	///   bit)`, if the view does not begin at a cell boundary.
	/// - `body`: The range of wholly covered cells. May be empty.
	/// - `tail`: The partially covered trailing cell, as `(index, last live
	///   bit)`, if the view does not end at a cell boundary.
	Region {
		head: Option<(usize, u8)>,
		body: Range<usize>,
		tail: Option<(usize, u8)>,
	},
}

impl Domain {
	/// Classifies a view descriptor.
	pub(crate) fn new<C>(view: &BitView<C>) -> Self
	where C: BitCell {
		let (si, so) = (view.start_index(), view.start_offset());
		let (ei, eo) = (view.end_index(), view.end_offset());
		let last = C::WIDTH - 1;

		if si == ei && !(so == 0 && eo == last) {
			return Domain::Enclave {
				index: si,
				head: so,
				tail: eo,
			};
		}

		let head = (so != 0).then(|| (si, so));
		let tail = (eo != last).then(|| (ei, eo));
		let body_start = if so == 0 { si } else { si + 1 };
		let body_end = if eo == last { ei + 1 } else { ei };
		Domain::Region {
			head,
			body: body_start .. body_end,
			tail,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn enclave() {
		let view = BitView::<u64>::zeroed(128).shadow_clone(1, 3, 1, 40);
		assert_eq!(view.domain(), Domain::Enclave {
			index: 1,
			head: 3,
			tail: 40,
		});
	}

	#[test]
	fn spanning() {
		let view = BitView::<u8>::zeroed(24);
		assert_eq!(view.domain(), Domain::Region {
			head: None,
			body: 0 .. 3,
			tail: None,
		});

		//  A single wholly covered cell is a region, not an enclave.
		let view = BitView::<u8>::zeroed(8);
		assert_eq!(view.domain(), Domain::Region {
			head: None,
			body: 0 .. 1,
			tail: None,
		});
	}

	#[test]
	fn partial_edges() {
		let base = BitView::<u8>::zeroed(32);

		//  Unaligned head, aligned tail.
		assert_eq!(base.shadow_clone(0, 5, 1, 7).domain(), Domain::Region {
			head: Some((0, 5)),
			body: 1 .. 2,
			tail: None,
		});

		//  Aligned head, unaligned tail.
		assert_eq!(base.shadow_clone(1, 0, 3, 2).domain(), Domain::Region {
			head: None,
			body: 1 .. 3,
			tail: Some((3, 2)),
		});

		//  Unaligned on both ends, empty body.
		assert_eq!(base.shadow_clone(1, 6, 2, 1).domain(), Domain::Region {
			head: Some((1, 6)),
			body: 2 .. 2,
			tail: Some((2, 1)),
		});
	}

	#[test]
	fn boolean_cells_are_always_aligned() {
		let view = BitView::<bool>::zeroed(5);
		assert_eq!(view.domain(), Domain::Region {
			head: None,
			body: 0 .. 5,
			tail: None,
		});
	}
}
