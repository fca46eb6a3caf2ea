#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod error;
pub mod list;
mod repeat;

#[doc(inline)]
pub use error::InvalidArgument;
#[doc(inline)]
pub use list::{Cursor, CursorMut, List};
pub use repeat::Repeat;
