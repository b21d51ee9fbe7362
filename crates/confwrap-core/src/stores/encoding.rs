//! Text encoding of file-backed stores.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Character encoding a store file is decoded with.
///
/// Labels follow the WHATWG Encoding Standard, so `"latin1"`, `"iso-8859-1"`
/// and `"ascii"` all name windows-1252. A byte order mark in the file wins over
/// the configured encoding.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf8() -> Self {
        TextEncoding(encoding_rs::UTF_8)
    }

    /// windows-1252, the WHATWG reading of ISO-8859-1.
    pub fn latin1() -> Self {
        TextEncoding(encoding_rs::WINDOWS_1252)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(TextEncoding)
    }

    /// Canonical name, e.g. `UTF-8` or `windows-1252`.
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decodes `bytes`, returning `None` on a malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        let (encoding, body) = match Encoding::for_bom(bytes) {
            Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
            None => (self.0, bytes),
        };
        encoding.decode_without_bom_handling_and_without_replacement(body)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::from_label(&label).ok_or_else(|| format!("unknown text encoding '{}'", label))
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(TextEncoding::from_label("utf8"), Some(TextEncoding::utf8()));
        assert_eq!(TextEncoding::from_label("Latin1"), Some(TextEncoding::latin1()));
        assert_eq!(TextEncoding::from_label(" iso-8859-1 "), Some(TextEncoding::latin1()));
        assert_eq!(TextEncoding::from_label("klingon"), None);
        assert_eq!(TextEncoding::default().name(), "UTF-8");
    }

    #[test]
    fn test_decode_latin1_byte() {
        let bytes = b"name=Caf\xe9";
        assert_eq!(TextEncoding::utf8().decode(bytes), None);
        assert_eq!(
            TextEncoding::latin1().decode(bytes).as_deref(),
            Some("name=Caf\u{e9}")
        );
    }

    #[test]
    fn test_byte_order_mark_wins() {
        let bytes = b"\xef\xbb\xbfkey=value";
        assert_eq!(TextEncoding::latin1().decode(bytes).as_deref(), Some("key=value"));
    }

    #[test]
    fn test_serde_uses_labels() {
        let encoding: TextEncoding = serde_json::from_str(r#""latin1""#).unwrap();
        assert_eq!(encoding, TextEncoding::latin1());
        assert_eq!(serde_json::to_string(&encoding).unwrap(), r#""windows-1252""#);
        assert!(serde_json::from_str::<TextEncoding>(r#""klingon""#).is_err());
    }
}
