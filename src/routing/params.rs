//! Captured path parameters.

use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Parameter name → decoded value.
pub type Params = HashMap<String, String>;

/// Percent-decode one captured value.
///
/// Values that do not decode to UTF-8 are kept raw and logged; a bad
/// parameter never fails the match.
pub fn decode_param(raw: &str) -> Cow<'_, str> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(param = %raw, error = %e, "Failed to unescape path param");
            Cow::Borrowed(raw)
        }
    }
}

pub(crate) fn decode_params(captures: Vec<(&str, &str)>) -> Params {
    captures
        .into_iter()
        .map(|(name, raw)| (name.to_string(), decode_param(raw).into_owned()))
        .collect()
}
