//! The model blob shipped with the crate: a gesture model with five actions
//! recorded from a 3-axis accelerometer.

use crate::blob::{to_blob, Blob, BlobError, BlobSource};

const MODEL_HEX: &str = include_str!("../fixtures/model.hex");

pub fn bundled_source() -> BlobSource<'static> {
    BlobSource::Hex(MODEL_HEX)
}

pub fn bundled_blob() -> Result<Blob, BlobError> {
    to_blob(Some(bundled_source()))
}
