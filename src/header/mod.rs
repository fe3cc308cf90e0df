//! Model header that precedes an ML4F model in a model blob.
//!
//! Layout, little-endian:
//!
//! ```text
//! 0   u32  magic0 ("LDOM")
//! 4   u16  header_size, offset of the ML4F model
//! 6   u16  samples_period (ms)
//! 8   u16  samples_length
//! 10  u8   sample_dimensions
//! 11  [u8; 8] reserved
//! 19  u8   number_of_actions
//! 20  actions, each 4-byte aligned
//! ```

mod action;
mod model;

use std::{error::Error, fmt::Display};

use bytes::{Buf, BufMut};

pub use action::Action;
pub use model::{ModelBlob, ML4F_MAGIC0, ML4F_MAGIC1};

pub const MODEL_HEADER_MAGIC0: u32 = 0x4D4F_444C;

const RESERVED_LEN: usize = 8;
const HEADER_BASE_LEN: usize = 20;

#[derive(Debug, PartialEq)]
pub enum HeaderError {
    /// indicates the data ends before the header does
    ErrTruncated(String),
    /// indicates a wrong magic value
    ErrInvalidMagic(u32),
    /// indicates a zero or out of range header field
    ErrInvalidField(String),
    /// indicates a malformed action label
    ErrInvalidLabel(String),
    /// indicates a missing or malformed ML4F model after the header
    ErrInvalidModel(String),
}

impl Error for HeaderError {}

impl Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ErrTruncated(err) => write!(f, "truncated model header: {}", err),
            Self::ErrInvalidMagic(magic) => write!(f, "invalid header magic: {:#010x}", magic),
            Self::ErrInvalidField(err) => write!(f, "invalid header field: {}", err),
            Self::ErrInvalidLabel(err) => write!(f, "invalid action label: {}", err),
            Self::ErrInvalidModel(err) => write!(f, "invalid ML4F model: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelHeader {
    pub samples_period: u16,
    pub samples_length: u16,
    pub sample_dimensions: u8,
    pub actions: Vec<Action>,
}

impl ModelHeader {
    /// serialises the header, including the padding after each action.
    /// The returned length is the header_size field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HeaderError> {
        let number_of_actions = u8::try_from(self.actions.len()).map_err(|_| {
            HeaderError::ErrInvalidField(format!("too many actions: {}", self.actions.len()))
        })?;

        let mut buf = Vec::with_capacity(HEADER_BASE_LEN);
        buf.put_u32_le(MODEL_HEADER_MAGIC0);
        // header_size, patched once the actions are written
        buf.put_u16_le(0);
        buf.put_u16_le(self.samples_period);
        buf.put_u16_le(self.samples_length);
        buf.put_u8(self.sample_dimensions);
        buf.put_bytes(0, RESERVED_LEN);
        buf.put_u8(number_of_actions);

        for action in &self.actions {
            action.write_to(&mut buf)?;
            buf.put_bytes(0, align4(buf.len()) - buf.len());
        }

        let header_size = u16::try_from(buf.len()).map_err(|_| {
            HeaderError::ErrInvalidField(format!("header too large: {} bytes", buf.len()))
        })?;
        buf[4..6].copy_from_slice(&header_size.to_le_bytes());

        Ok(buf)
    }

    pub fn parse(data: &[u8]) -> Result<ModelHeader, HeaderError> {
        let (header, _) = Self::parse_with_size(data)?;
        Ok(header)
    }

    /// parses the header and returns it along with its header_size field
    fn parse_with_size(data: &[u8]) -> Result<(ModelHeader, usize), HeaderError> {
        if data.len() < HEADER_BASE_LEN {
            return Err(HeaderError::ErrTruncated(format!(
                "expected at least {} bytes, found {}",
                HEADER_BASE_LEN,
                data.len()
            )));
        }

        let mut buf = data;
        let magic = buf.get_u32_le();
        if magic != MODEL_HEADER_MAGIC0 {
            return Err(HeaderError::ErrInvalidMagic(magic));
        }

        let header_size = buf.get_u16_le() as usize;
        let samples_period = buf.get_u16_le();
        let samples_length = buf.get_u16_le();
        let sample_dimensions = buf.get_u8();
        buf.advance(RESERVED_LEN);
        let number_of_actions = buf.get_u8();

        if samples_period == 0
            || samples_length == 0
            || sample_dimensions == 0
            || number_of_actions == 0
        {
            return Err(HeaderError::ErrInvalidField(format!(
                "period {}, length {}, dimensions {} and actions {} must all be non-zero",
                samples_period, samples_length, sample_dimensions, number_of_actions
            )));
        }

        if header_size > data.len() {
            return Err(HeaderError::ErrTruncated(format!(
                "header size is {} but only {} bytes are available",
                header_size,
                data.len()
            )));
        }

        let mut actions = Vec::with_capacity(number_of_actions as usize);
        let mut offset = HEADER_BASE_LEN;
        for _ in 0..number_of_actions {
            if offset > header_size {
                return Err(HeaderError::ErrTruncated(format!(
                    "action at offset {} is past the header size {}",
                    offset, header_size
                )));
            }
            let (action, read_bytes) = Action::read_from(&data[offset..header_size])?;
            actions.push(action);
            offset = align4(offset + read_bytes);
        }

        let header = ModelHeader {
            samples_period,
            samples_length,
            sample_dimensions,
            actions,
        };

        Ok((header, header_size))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|action| action.label.as_str())
    }
}

impl Display for ModelHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} samples of {} dimensions every {}ms, actions: ",
            self.samples_length, self.sample_dimensions, self.samples_period
        )?;
        let actions = self
            .actions
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", actions.join(", "))
    }
}

fn align4(offset: usize) -> usize {
    (offset + 3) & !3
}

#[cfg(test)]
mod test {
    use super::{align4, Action, HeaderError, ModelHeader, MODEL_HEADER_MAGIC0};
    use crate::fixture::bundled_blob;

    fn sample_header() -> ModelHeader {
        ModelHeader {
            samples_period: 20,
            samples_length: 42,
            sample_dimensions: 3,
            actions: vec![
                Action::new("Not a spell", 0.35),
                Action::new("flick-and-wait", 0.37),
                Action::new("waggle", 0.76),
                Action::new("Poke", 0.8),
                Action::new("circle", 0.8),
            ],
        }
    }

    #[test]
    fn align_test() {
        assert_eq!(align4(0), 0);
        assert_eq!(align4(37), 40);
        assert_eq!(align4(40), 40);
        assert_eq!(align4(82), 84);
    }

    #[test]
    fn to_bytes_matches_bundled_blob_test() {
        let blob = bundled_blob().unwrap();
        let bytes = sample_header().to_bytes().unwrap();

        assert_eq!(bytes.len(), 96);
        assert_eq!(&blob[..96], bytes.as_slice());
    }

    #[test]
    fn parse_bundled_blob_test() {
        let blob = bundled_blob().unwrap();
        let header = ModelHeader::parse(&blob).unwrap();

        assert_eq!(header, sample_header());
        assert_eq!(
            header.labels().collect::<Vec<&str>>(),
            vec!["Not a spell", "flick-and-wait", "waggle", "Poke", "circle"]
        );
    }

    #[test]
    fn parse_own_output_test() {
        let header = ModelHeader {
            samples_period: 25,
            samples_length: 80,
            sample_dimensions: 3,
            actions: vec![Action::new("shake", 0.5), Action::new("still", 0.25)],
        };
        let bytes = header.to_bytes().unwrap();

        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(ModelHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn truncated_test() {
        let res = ModelHeader::parse(&MODEL_HEADER_MAGIC0.to_le_bytes());
        assert!(matches!(res, Err(HeaderError::ErrTruncated(_))));

        let bytes = sample_header().to_bytes().unwrap();
        let res = ModelHeader::parse(&bytes[..bytes.len() - 1]);
        assert!(matches!(res, Err(HeaderError::ErrTruncated(_))));
    }

    #[test]
    fn invalid_magic_test() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[0] = b'X';

        assert!(matches!(
            ModelHeader::parse(&bytes),
            Err(HeaderError::ErrInvalidMagic(_))
        ));
    }

    #[test]
    fn zero_field_test() {
        let mut header = sample_header();
        header.samples_period = 0;
        let bytes = header.to_bytes().unwrap();
        assert!(matches!(
            ModelHeader::parse(&bytes),
            Err(HeaderError::ErrInvalidField(_))
        ));

        let mut header = sample_header();
        header.actions.clear();
        let bytes = header.to_bytes().unwrap();
        assert!(matches!(
            ModelHeader::parse(&bytes),
            Err(HeaderError::ErrInvalidField(_))
        ));
    }

    #[test]
    fn too_many_actions_test() {
        let mut header = sample_header();
        header.actions = (0..256).map(|i| Action::new(&i.to_string(), 0.1)).collect();

        assert!(matches!(
            header.to_bytes(),
            Err(HeaderError::ErrInvalidField(_))
        ));
    }

    #[test]
    fn display_test() {
        let header = ModelHeader {
            samples_period: 20,
            samples_length: 42,
            sample_dimensions: 3,
            actions: vec![Action::new("Poke", 0.8)],
        };

        assert_eq!(
            header.to_string(),
            "42 samples of 3 dimensions every 20ms, actions: Poke (0.8)"
        );
    }
}
