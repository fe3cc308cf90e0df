use core::fmt;
use std::{
    fs,
    ops::Deref,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{encode::from_ds_hex_literal, header::ModelHeader};

#[derive(Debug, PartialEq, Eq)]
pub enum BlobError {
    /// indicates a missing, unreadable or malformed byte source
    ErrInvalidInput(String),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::ErrInvalidInput(err) => write!(f, "invalid input: {}", err),
        }
    }
}

impl std::error::Error for BlobError {}

/// an immutable sequence of bytes, compared by value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn new(data: Vec<u8>) -> Blob {
        Blob(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Blob {
    fn from(value: &[u8]) -> Self {
        Blob(value.to_vec())
    }
}

impl From<Blob> for Vec<u8> {
    fn from(value: Blob) -> Self {
        value.0
    }
}

/// renders the raw bytes as a decimal list, e.g. `[76, 68, 79]`
impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// where the bytes of a blob come from
pub enum BlobSource<'a> {
    Bytes(&'a [u8]),
    /// hex digit pairs, whitespace between them is ignored
    Hex(&'a str),
    File(PathBuf),
    /// a file holding hex text, decoded like `Hex`
    HexFile(PathBuf),
    /// a model header description followed by the raw model bytes
    Header {
        header: &'a ModelHeader,
        model: &'a [u8],
    },
}

/// resolves a byte source into a blob. Byte sources are passed through
/// unchanged, the other variants are decoded or read first.
pub fn to_blob(source: Option<BlobSource>) -> Result<Blob, BlobError> {
    let source =
        source.ok_or_else(|| BlobError::ErrInvalidInput("no byte source given".to_string()))?;

    let blob = match source {
        BlobSource::Bytes(data) => Blob::from(data),
        BlobSource::Hex(text) => decode_hex_text(text)?,
        BlobSource::File(path) => Blob::new(read_file(&path)?),
        BlobSource::HexFile(path) => {
            let data = read_file(&path)?;
            let text = std::str::from_utf8(&data).map_err(|err| {
                BlobError::ErrInvalidInput(format!("{} is not text: {}", path.display(), err))
            })?;
            decode_hex_text(text)?
        }
        BlobSource::Header { header, model } => {
            let mut data = header
                .to_bytes()
                .map_err(|err| BlobError::ErrInvalidInput(err.to_string()))?;
            data.extend_from_slice(model);
            Blob::new(data)
        }
    };

    debug!("resolved blob of {} bytes", blob.len());
    Ok(blob)
}

fn read_file(path: &Path) -> Result<Vec<u8>, BlobError> {
    fs::read(path).map_err(|err| {
        BlobError::ErrInvalidInput(format!("failed to read {}: {}", path.display(), err))
    })
}

fn decode_hex_text(text: &str) -> Result<Blob, BlobError> {
    let compact = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    from_ds_hex_literal(&compact)
}
