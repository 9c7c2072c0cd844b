/*! `bitview` – address arrays of primitive cells as flat ranges of bits.

This crate provides a view abstraction that lets a contiguous run of bits,
physically stored inside an array of some fixed-width primitive cell type, be
read and written as arbitrary-width integers (one to sixty-four bits) at
arbitrary bit offsets, independently of the physical width of the backing
cells.

A [`BitView`] is a descriptor over a backing array: it records the first and
last cell it touches, and the first and last live bit within those cells. The
backing array may be allocated by the view factory, or supplied by the caller
and wrapped without per-bit transformation. Several views may alias one
backing array, and mutation through any of them is visible through all of
them; this aliasing is a feature (it is how narrowed sub-views are made) and
a hazard the caller must manage.

Bits are addressed left to right, most significant bit first, within and
across cells: reading back the bits `[0, width)` of a freshly written value
returns the same integer that was written, and reading any strict sub-range
returns the corresponding contiguous slice of that value's bits.

Five cell widths are supported, across eight physical cell types:

| width | cell types   |
|------:|--------------|
|     1 | `bool`       |
|     8 | `u8`         |
|    16 | `u16`, `i16` |
|    32 | `u32`, `f32` |
|    64 | `u64`, `f64` |

The floating-point cell types store and load IEEE-754 *bit patterns*, never
rounded values: a NaN payload written through an `f64`-cell view reads back
bit-identical.

The view is a single-threaded value type. The backing array is held as
`Rc<[Cell<C>]>`, so the compiler itself forbids sending a view across
threads; there is no locking and no atomic access anywhere in the crate.

# Performance contract

Every hot-path operation has two forms: a checked form that panics on
contract violation, and an `_unchecked` form that performs no validation in
release builds. The `_unchecked` family is still memory-safe – an
out-of-contract position reads or writes other live bits of the backing
array, or panics on a slice-bounds overrun, but can never touch unowned
memory. See the [`field`] module documentation for the exact contract.

[`BitView`]: crate::view::BitView
[`field`]: crate::field
!*/

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate core;

pub mod cell;
pub mod copy;
mod domain;
pub mod field;
pub mod pos;
pub mod prelude;
pub mod view;

pub use crate::{
	cell::BitCell,
	view::BitView,
};
