//! Text encodings accepted for the input dataset.

use depthsweep_error::{StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};

/// Encoding of the dataset file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte is the code point of the same value
    #[default]
    #[serde(alias = "8859", alias = "iso-8859-1", alias = "latin-1")]
    #[strum(serialize = "latin1")]
    Latin1,
    /// UTF-8
    #[serde(alias = "utf-8")]
    #[strum(serialize = "utf8")]
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, StorageError> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            TextEncoding::Utf8 => String::from_utf8(bytes)
                .map_err(|e| StorageError::new(StorageErrorKind::Decoding(e.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_maps_high_bytes() {
        let text = TextEncoding::Latin1.decode(vec![b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        assert!(TextEncoding::Utf8.decode(vec![0xE9]).is_err());
    }
}
