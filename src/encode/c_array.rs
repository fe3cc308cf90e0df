use crate::blob::{Blob, BlobError};

/// renders a blob as a single line C initializer: `{0x4c, 0x00, 0xff}`
pub fn to_c_array(blob: &Blob) -> String {
    let values = blob
        .iter()
        .map(|byte| format!("0x{:02x}", byte))
        .collect::<Vec<String>>()
        .join(", ");

    format!("{{{}}}", values)
}

/// parses an initializer produced by `to_c_array` back into a blob.
/// Either hex case is accepted, whitespace around values is ignored.
pub fn from_c_array(text: &str) -> Result<Blob, BlobError> {
    let inner = text
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or(BlobError::ErrInvalidInput(
            "C array must be enclosed in braces".to_string(),
        ))?;

    if inner.trim().is_empty() {
        return Ok(Blob::default());
    }

    let data = inner
        .split(',')
        .map(parse_c_byte)
        .collect::<Result<Vec<u8>, BlobError>>()?;

    Ok(Blob::new(data))
}

fn parse_c_byte(item: &str) -> Result<u8, BlobError> {
    let item = item.trim();
    let digits = item
        .strip_prefix("0x")
        .or_else(|| item.strip_prefix("0X"))
        .ok_or(BlobError::ErrInvalidInput(format!(
            "expected 0x prefix: '{}'",
            item
        )))?;

    if digits.len() != 2 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(BlobError::ErrInvalidInput(format!(
            "expected two hex digits: '{}'",
            item
        )));
    }

    u8::from_str_radix(digits, 16).map_err(|err| BlobError::ErrInvalidInput(err.to_string()))
}
