use std::fmt::Display;

use bytes::{Buf, BufMut};

use super::HeaderError;

/// threshold (f32) + label_length (u8)
const ACTION_BASE_LEN: usize = 5;

/// a label the model can predict, with the minimum score that counts as a hit
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub label: String,
    pub threshold: f32,
}

impl Action {
    pub fn new(label: &str, threshold: f32) -> Action {
        Action {
            label: label.to_string(),
            threshold,
        }
    }

    /// writes the action without trailing padding
    pub(super) fn write_to(&self, buf: &mut Vec<u8>) -> Result<(), HeaderError> {
        if self.label.as_bytes().contains(&0) {
            return Err(HeaderError::ErrInvalidLabel(format!(
                "label {:?} contains a NUL byte",
                self.label
            )));
        }

        // label_length counts the NUL terminator
        let label_length = u8::try_from(self.label.len() + 1).map_err(|_| {
            HeaderError::ErrInvalidLabel(format!("label {:?} is too long", self.label))
        })?;

        buf.put_f32_le(self.threshold);
        buf.put_u8(label_length);
        buf.put_slice(self.label.as_bytes());
        buf.put_u8(0);

        Ok(())
    }

    /// reads one action from the start of data, returning it with the number
    /// of bytes read (padding excluded)
    pub(super) fn read_from(data: &[u8]) -> Result<(Action, usize), HeaderError> {
        if data.len() < ACTION_BASE_LEN {
            return Err(HeaderError::ErrTruncated(format!(
                "action needs {} bytes, {} left",
                ACTION_BASE_LEN,
                data.len()
            )));
        }

        let mut buf = data;
        let threshold = buf.get_f32_le();
        let label_length = buf.get_u8() as usize;

        if label_length == 0 {
            return Err(HeaderError::ErrInvalidLabel(
                "label length is zero".to_string(),
            ));
        }
        if label_length > buf.remaining() {
            return Err(HeaderError::ErrTruncated(format!(
                "label needs {} bytes, {} left",
                label_length,
                buf.remaining()
            )));
        }

        let (label, terminator) = buf[..label_length].split_at(label_length - 1);
        if terminator[0] != 0 {
            return Err(HeaderError::ErrInvalidLabel(
                "label is not NUL terminated".to_string(),
            ));
        }
        if label.contains(&0) {
            return Err(HeaderError::ErrInvalidLabel(
                "label contains a NUL byte before its end".to_string(),
            ));
        }

        let label = std::str::from_utf8(label)
            .map_err(|err| HeaderError::ErrInvalidLabel(format!("label is not UTF-8: {}", err)))?;

        Ok((
            Action::new(label, threshold),
            ACTION_BASE_LEN + label_length,
        ))
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.threshold)
    }
}
