//! Pedigree certificates.
//!
//! A certificate is a pedigree's compact JSON, hex encoded, so papers can be
//! handed between stables as a single copy-pasteable token.

use crate::error::{IoError, Result};
use crate::json::{from_json, to_json};
use studbook_data::Pedigree;

pub fn issue_certificate(pedigree: &Pedigree) -> Result<String> {
    Ok(hex::encode(to_json(pedigree)?))
}

pub fn read_certificate(certificate: &str) -> Result<Pedigree> {
    let token = certificate.trim();
    if token.is_empty() {
        return Err(IoError::Empty("certificate"));
    }
    let bytes = hex::decode(token).map_err(|e| IoError::Certificate(format!("not hex: {e}")))?;
    let json =
        String::from_utf8(bytes).map_err(|e| IoError::Certificate(format!("not UTF-8: {e}")))?;
    from_json(&json).map_err(|e| e.with_context("decoding certificate"))
}
