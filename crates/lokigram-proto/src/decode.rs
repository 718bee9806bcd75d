//! Push payload decoding.
//!
//! Decoding is all-or-nothing: a payload that fails decompression or
//! deserialization yields a [`DecodeError`] and no partial streams.

use prost::Message;
use snap::raw::{Decoder, Encoder, decompress_len, max_compress_len};
use thiserror::Error;

use crate::wire::PushRequest;

/// Errors produced while decoding a push payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid raw-snappy compressed data.
    #[error("snappy decompression failed: {0}")]
    Decompression(#[from] snap::Error),

    /// The decompressed bytes are not a valid push request.
    #[error("protobuf deserialization failed: {0}")]
    Deserialization(#[from] prost::DecodeError),
}

/// Decodes raw request bytes into a [`PushRequest`].
///
/// The body must be raw-snappy compressed (the frame-less block format
/// the push protocol uses, not the framed stream format) and contain a
/// protobuf-encoded push request.
///
/// # Errors
///
/// Returns [`DecodeError::Decompression`] if the bytes are not valid
/// snappy data, or [`DecodeError::Deserialization`] if the decompressed
/// bytes do not match the push schema.
pub fn decode_push(body: &[u8]) -> Result<PushRequest, DecodeError> {
    let len = decompress_len(body)?;
    let mut raw = vec![0u8; len];
    let written = Decoder::new().decompress(body, &mut raw)?;
    raw.truncate(written);

    Ok(PushRequest::decode(raw.as_slice())?)
}

/// Encodes a [`PushRequest`] into the on-the-wire body format.
///
/// The inverse of [`decode_push`]: protobuf-encode then raw-snappy
/// compress. Used by tests and tooling that synthesize push bodies.
///
/// # Errors
///
/// Returns [`DecodeError::Decompression`] if compression fails.
pub fn encode_push(request: &PushRequest) -> Result<Vec<u8>, DecodeError> {
    let raw = request.encode_to_vec();
    let mut body = vec![0u8; max_compress_len(raw.len())];
    let written = Encoder::new().compress(&raw, &mut body)?;
    body.truncate(written);
    Ok(body)
}
