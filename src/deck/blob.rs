//! Normalization of writer output into one binary blob.
//!
//! A [`DocumentWriter`](crate::deck::writer::DocumentWriter) may hand back a
//! byte buffer, base64 text or an opaque handle. [`normalize`] turns any of
//! these into a [`Blob`]; a representation with no binary reading is fatal.

use crate::common::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use std::any::Any;
use std::fmt;

/// MIME type of every blob this crate produces.
pub const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// The forms a serialized document may take before normalization.
pub enum RawDocument {
    Buffer(Vec<u8>),
    Shared(Bytes),
    /// Base64 text, optionally with a `data:` URL prefix
    Base64(String),
    /// Writer-specific value; `Vec<u8>`, `Bytes`, `Box<[u8]>` and base64 `String` are understood
    Handle(Box<dyn Any + Send>),
}

impl fmt::Debug for RawDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDocument::Buffer(buf) => f.debug_tuple("Buffer").field(&buf.len()).finish(),
            RawDocument::Shared(buf) => f.debug_tuple("Shared").field(&buf.len()).finish(),
            RawDocument::Base64(text) => f.debug_tuple("Base64").field(&text.len()).finish(),
            RawDocument::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

/// A finished document tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Bytes,
    mime: &'static str,
}

impl Blob {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Coerce a writer's output into a [`Blob`].
#[tracing::instrument(level = "debug", skip_all, fields(repr = ?raw))]
pub fn normalize(raw: RawDocument) -> Result<Blob> {
    let bytes = match raw {
        RawDocument::Buffer(buf) => Bytes::from(buf),
        RawDocument::Shared(buf) => buf,
        RawDocument::Base64(text) => decode_base64(&text)?,
        RawDocument::Handle(handle) => from_handle(handle)?,
    };
    if bytes.is_empty() {
        return Err(Error::UnsupportedBlob(
            "writer produced an empty document".to_string(),
        ));
    }
    Ok(Blob {
        bytes,
        mime: PPTX_MIME,
    })
}

fn decode_base64(text: &str) -> Result<Bytes> {
    let payload = match text.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => text,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .map(Bytes::from)
        .map_err(|err| Error::UnsupportedBlob(format!("invalid base64 payload: {err}")))
}

fn from_handle(handle: Box<dyn Any + Send>) -> Result<Bytes> {
    let handle = match handle.downcast::<Vec<u8>>() {
        Ok(buf) => return Ok(Bytes::from(*buf)),
        Err(other) => other,
    };
    let handle = match handle.downcast::<Bytes>() {
        Ok(buf) => return Ok(*buf),
        Err(other) => other,
    };
    let handle = match handle.downcast::<Box<[u8]>>() {
        Ok(buf) => return Ok(Bytes::from(*buf)),
        Err(other) => other,
    };
    match handle.downcast::<String>() {
        Ok(text) => decode_base64(&text),
        Err(_) => Err(Error::UnsupportedBlob(
            "opaque handle of an unknown type".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PK: &[u8] = b"PK\x03\x04";

    #[test]
    fn test_every_binary_form_normalizes() {
        let forms = vec![
            RawDocument::Buffer(PK.to_vec()),
            RawDocument::Shared(Bytes::from_static(PK)),
            RawDocument::Base64(STANDARD.encode(PK)),
            RawDocument::Base64(format!("data:{PPTX_MIME};base64,{}", STANDARD.encode(PK))),
            RawDocument::Handle(Box::new(PK.to_vec())),
            RawDocument::Handle(Box::new(Bytes::from_static(PK))),
            RawDocument::Handle(Box::new(PK.to_vec().into_boxed_slice())),
            RawDocument::Handle(Box::new(STANDARD.encode(PK))),
        ];
        for raw in forms {
            let blob = normalize(raw).unwrap();
            assert_eq!(blob.bytes().as_ref(), PK);
            assert_eq!(blob.mime(), PPTX_MIME);
        }
    }

    #[test]
    fn test_unknown_handle_is_fatal() {
        let err = normalize(RawDocument::Handle(Box::new(42_u32))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBlob(_)));
    }

    #[test]
    fn test_bad_base64_and_empty_are_fatal() {
        assert!(matches!(
            normalize(RawDocument::Base64("***".into())),
            Err(Error::UnsupportedBlob(_))
        ));
        assert!(matches!(
            normalize(RawDocument::Buffer(Vec::new())),
            Err(Error::UnsupportedBlob(_))
        ));
    }
}
