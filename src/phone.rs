use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Russian phone number with optional `+`, a `7`/`8` country digit, loose
/// separators and an optional `abc.` extension label with up to 4 digits.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\+?[78][ \-(]*",
        r"(?P<code>\d{3})[ \-)]*",
        r"(?P<tel1>\d{3})[ \-]*",
        r"(?P<tel2>\d{2})[ \-]*",
        r"(?P<tel3>\d{2})[ (]*",
        r"(?P<pref>\w{3}\.)? *",
        r"(?P<ext>\d{1,4})?\)*$",
    ))
    .expect("phone pattern is valid")
});

const CANONICAL_TEMPLATE: &str = "+7${code}${tel1}${tel2}${tel3} ${pref}${ext}";

/// Whether `raw` has the shape the canonicalizer rewrites
pub fn is_recognized_phone(raw: &str) -> bool {
    PHONE_PATTERN.is_match(raw)
}

/// Recast a phone number to `+7XXXXXXXXXX` or `+7XXXXXXXXXX доп.XXXX`.
///
/// Values that do not match are returned untouched, byte for byte.
pub fn canonicalize_phone(raw: &str) -> Cow<'_, str> {
    match PHONE_PATTERN.captures(raw) {
        Some(caps) => Cow::Owned(render(&caps)),
        None => Cow::Borrowed(raw),
    }
}

fn render(caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(24);
    caps.expand(CANONICAL_TEMPLATE, &mut out);
    out.truncate(out.trim_end().len());
    out
}
