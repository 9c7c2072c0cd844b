/*! `bitview` symbol export.

This module collects the general public API of the crate into a single glob
import:

```rust
use bitview::prelude::*;
```
!*/

pub use crate::{
	cell::BitCell,
	copy::FAST_COPY_THRESHOLD,
	pos::CellPos,
	view::BitView,
};
