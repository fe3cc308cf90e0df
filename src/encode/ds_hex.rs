use crate::blob::{Blob, BlobError};

/// renders a blob as uppercase hex digit pairs, ready to sit inside a
/// DeviceScript `` hex`...` `` literal
pub fn to_ds_hex_literal(blob: &Blob) -> String {
    hex::encode_upper(blob.as_bytes())
}

pub fn from_ds_hex_literal(text: &str) -> Result<Blob, BlobError> {
    let data = hex::decode(text)
        .map_err(|err| BlobError::ErrInvalidInput(format!("malformed hex literal: {}", err)))?;

    Ok(Blob::new(data))
}
