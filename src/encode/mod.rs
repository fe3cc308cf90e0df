//! Text encodings of a blob.
//!
//! Both encodings are pure: the same blob always renders to the same string,
//! and each has an inverse that rejects malformed text with
//! [`BlobError::ErrInvalidInput`](crate::blob::BlobError).

mod c_array;
mod ds_hex;

pub use c_array::{from_c_array, to_c_array};
pub use ds_hex::{from_ds_hex_literal, to_ds_hex_literal};
