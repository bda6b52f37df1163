mod base64_url;

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD};

pub use self::base64_url::Base64Url;

/// Decodes URL-safe unpadded base64 text (the form used by the relying party) into raw bytes.
pub fn decode<T: AsRef<str>>(text: T) -> anyhow::Result<Vec<u8>> {
    let mut base64 = text.as_ref().replace('-', "+").replace('_', "/");

    let padding = base64.len() % 4;
    if padding > 0 {
        base64.push_str(&"=".repeat(4 - padding));
    }

    STANDARD
        .decode(&base64)
        .with_context(|| format!("Cannot decode base64url value ({}).", text.as_ref()))
}

/// Encodes raw bytes as URL-safe unpadded base64 text.
pub fn encode<T: AsRef<[u8]>>(bytes: T) -> String {
    STANDARD
        .encode(bytes)
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string()
}
