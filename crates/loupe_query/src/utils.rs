//! Collection utilities, available alongside the document operations.
//!
//! ```
//! use loupe_query::utils::{includes, size};
//!
//! assert!(includes(&[1, 2, 3], &2));
//! assert_eq!(size(&None::<Vec<u8>>), 0);
//! ```
pub use loupe_collections::{
    all, any, each, extend, filter, includes, is_function, is_string, reject, size, Collection,
    Kind, Source,
};
