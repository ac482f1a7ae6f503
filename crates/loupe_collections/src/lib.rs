//! Generic iteration utilities over ordered sequences and key-value mappings.
//!
//! Every operation works through the [`Collection`] trait, so the same
//! function can walk a `Vec`, a slice, or a map. Absent inputs are modelled
//! with [`Option`], where [`None`] is an empty collection.
//!
//! ```
//! use loupe_collections::{filter, reject, size};
//!
//! let list = [1, 2, 3, 4];
//! assert_eq!(filter(&list, |n, _, _| n % 2 == 0), [&2, &4]);
//! assert_eq!(reject(&list, |n, _, _| n % 2 == 0), [&1, &3]);
//! assert_eq!(size(&None::<Vec<u8>>), 0);
//! ```

mod collection;
mod iter;
mod kind;
mod merge;

pub use collection::Collection;
pub use iter::{all, any, each, filter, includes, reject, size};
pub use kind::{is_function, is_string, Kind};
pub use merge::{extend, Source};
