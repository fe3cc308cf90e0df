use bytes::Buf;

use super::{HeaderError, ModelHeader};

pub const ML4F_MAGIC0: u32 = 0x3047_0F62;
pub const ML4F_MAGIC1: u32 = 0x4634_4C4D;

/// a model header together with the ML4F model that follows it
#[derive(Debug)]
pub struct ModelBlob<'a> {
    pub header: ModelHeader,
    pub model: &'a [u8],
}

impl<'a> ModelBlob<'a> {
    /// parses the header and checks that an ML4F model starts at header_size
    pub fn parse(data: &'a [u8]) -> Result<ModelBlob<'a>, HeaderError> {
        let (header, header_size) = ModelHeader::parse_with_size(data)?;
        let model = &data[header_size..];

        if model.len() < 8 {
            return Err(HeaderError::ErrInvalidModel(format!(
                "expected ML4F magic at offset {}, found {} bytes",
                header_size,
                model.len()
            )));
        }

        let mut buf = model;
        let magic0 = buf.get_u32_le();
        let magic1 = buf.get_u32_le();
        if magic0 != ML4F_MAGIC0 || magic1 != ML4F_MAGIC1 {
            return Err(HeaderError::ErrInvalidModel(format!(
                "bad magic {:#010x} {:#010x}",
                magic0, magic1
            )));
        }

        Ok(ModelBlob { header, model })
    }
}
