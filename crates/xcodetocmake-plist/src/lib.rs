pub mod openstep;

use plist::Value;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlistError {
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),
    #[error("manifest is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("unknown plist format")]
    UnknownFormat,
}

/// Plist encodings Xcode may use for a project manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Xml,
    Binary,
    Ascii,
}

impl PlistFormat {
    pub fn name(&self) -> &'static str {
        match self {
            PlistFormat::Xml => "xml1",
            PlistFormat::Binary => "binary1",
            PlistFormat::Ascii => "openstep1",
        }
    }
}

const BINARY_MAGIC: &[u8] = b"bplist00";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const XML_PREFIXES: [&[u8]; 3] = [b"<?xml", b"<plist", b"<!DOCTYPE"];

/// Guess a manifest's encoding from its first significant bytes.
pub fn identify_format(data: &[u8]) -> Option<PlistFormat> {
    if data.starts_with(BINARY_MAGIC) {
        return Some(PlistFormat::Binary);
    }

    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = body.iter().position(|b| !b.is_ascii_whitespace())?;
    let body = &body[start..];

    if XML_PREFIXES.iter().any(|prefix| body.starts_with(prefix)) {
        return Some(PlistFormat::Xml);
    }

    // Xcode writes `// !$*UTF8*$!` ahead of the root dictionary
    match body[0] {
        b'{' | b'(' | b'/' | b'"' => Some(PlistFormat::Ascii),
        c if c.is_ascii_alphanumeric() => Some(PlistFormat::Ascii),
        _ => None,
    }
}

/// Turn manifest bytes of any supported format into OpenStep text.
///
/// OpenStep input is passed through untouched. XML and binary input is
/// decoded and re-emitted with [`openstep::write`], so callers can scan every
/// manifest for `key = value;` assignments the same way.
pub fn to_openstep_text(data: &[u8]) -> Result<(String, PlistFormat), PlistError> {
    let format = identify_format(data).ok_or(PlistError::UnknownFormat)?;
    let text = match format {
        PlistFormat::Ascii => std::str::from_utf8(data)?.to_string(),
        PlistFormat::Xml | PlistFormat::Binary => {
            let value = Value::from_reader(Cursor::new(data))?;
            openstep::write(&value)
        }
    };
    Ok((text, format))
}
