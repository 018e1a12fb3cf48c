//! Named string-shape matchers for the `format` keyword.
//!
//! Two tables exist: the core formats (`email`, `ip-address`, `ipv6`,
//! `date-time`, `date`, `time`, `color`, `host-name`, `utc-millisec`,
//! `regex`) and the extended formats (`url`, `android_url`). Both live in a
//! [`Registry`](super::Registry) and can be extended or overridden there.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Predicate form of a format matcher.
pub type FormatPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// How a named format decides whether a value conforms.
#[derive(Clone)]
pub enum FormatMatcher {
    /// Unanchored regular-expression search over the value's text
    Pattern(Regex),
    /// Arbitrary predicate over the raw value
    Predicate(FormatPredicate),
}

impl FormatMatcher {
    /// Compile a pattern matcher.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Wrap a predicate.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Whether `value` conforms.
    ///
    /// Patterns see strings as-is and numbers or booleans in their textual
    /// form; arrays and objects never match a pattern.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Self::Pattern(regex) => value_text(value).is_some_and(|text| regex.is_match(&text)),
            Self::Predicate(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for FormatMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether `name` is one of the URL formats that also reject unsafe characters.
pub fn is_url_format(name: &str) -> bool {
    name == "url" || name == "android_url"
}

/// Whether `value` contains characters that are unsafe in a URL even when the
/// URL pattern matched: `{`, `}`, `|`, `\` or `^`.
pub fn has_unsafe_url_chars(value: &Value) -> bool {
    value_text(value)
        .is_some_and(|text| text.contains(['{', '}', '|', '\\', '^']))
}

// Characters outside ASCII allowed in email atoms and domains.
const EMAIL_UNICODE: &str = r"\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}";

fn email_pattern() -> String {
    let u = EMAIL_UNICODE;
    let atom = format!(r"(?:[a-z]|\d|[!#\$%&'\*\+\-/=\?\^_`{{\|}}~]|[{u}])");
    let quoted_char = format!(
        r"(?:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x7f]|\x21|[\x23-\x5b]|[\x5d-\x7e]|[{u}])|(?:\\(?:[\x01-\x09\x0b\x0c\x0d-\x7f]|[{u}])))"
    );
    let fws = r"(?:(?:(?:\x20|\x09)*(?:\x0d\x0a))?(?:\x20|\x09)+)";
    let local = format!(
        r"(?:(?:{atom}+(?:\.{atom}+)*)|(?:\x22(?:{fws}?{quoted_char})*{fws}?\x22))"
    );
    let alnum = format!(r"(?:[a-z]|\d|[{u}])");
    let alpha = format!(r"(?:[a-z]|[{u}])");
    let inner = format!(r"(?:[a-z]|\d|-|\.|_|~|[{u}])");
    let label = format!(r"(?:{alnum}|(?:{alnum}{inner}*{alnum}))");
    let tld = format!(r"(?:{alpha}|(?:{alpha}{inner}*{alpha}))");
    format!(r"(?i)^{local}@(?:{label}\.)+{tld}\.?$")
}

const IP_ADDRESS_PATTERN: &str = r"(?i)^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

const IPV6_PATTERN: &str = r"^([0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}$";

// ISO 8601: calendar, week and ordinal dates with an optional time and zone.
const DATE_TIME_PATTERN: &str = concat!(
    r"^[+-]?\d{4}(?:",
    r"-(?:(?:0[1-9]|1[0-2])(?:-(?:[12]\d|0[1-9]|3[01]))?|W(?:[0-4]\d|5[0-2])(?:-[1-7])?|(?:00[1-9]|0[1-9]\d|[12]\d{2}|3(?:[0-5]\d|6[1-6])))",
    r"|(?:(?:0[1-9]|1[0-2])(?:[12]\d|0[1-9]|3[01])|W(?:[0-4]\d|5[0-2])[1-7]?|(?:00[1-9]|0[1-9]\d|[12]\d{2}|3(?:[0-5]\d|6[1-6])))",
    r")(?:[T\s](?:(?:[01]\d|2[0-3])(?::?[0-5]\d)?|24:?00)(?:[.,]\d+)?(?::?[0-5]\d(?:[.,]\d+)?)?",
    r"(?:[zZ]|[+-](?:[01]\d|2[0-3]):?(?:[0-5]\d)?)?)?$|^[+-]?\d{4}$"
);

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

const TIME_PATTERN: &str = r"^\d{2}:\d{2}:\d{2}$";

const COLOR_PATTERN: &str = concat!(
    r"(?i)^(?:#[a-z0-9]{6}|#[a-z0-9]{3}",
    r"|rgb\(\s*[+-]?\d+%?\s*,\s*[+-]?\d+%?\s*,\s*[+-]?\d+%?\s*\)",
    r"|aqua|black|blue|fuchsia|gray|green|lime|maroon|navy|olive|orange|purple|red|silver|teal|white|yellow)$"
);

const HOST_NAME_PATTERN: &str = r"^(([a-zA-Z]|[a-zA-Z][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z]|[A-Za-z][A-Za-z0-9\-]*[A-Za-z0-9])$";

const URL_PATTERN: &str = concat!(
    r"^(?:(?:https?|ftp)://)(?:\S+(?::\S*)?@)?(?P<host>",
    r"(?:[1-9]\d?|1\d\d|2[01]\d|22[0-3])(?:\.(?:1?\d{1,2}|2[0-4]\d|25[0-5])){2}(?:\.(?:[1-9]\d?|1\d\d|2[0-4]\d|25[0-4]))",
    r"|(?:(?:[a-z\u{00a1}-\u{ffff}0-9]+-?)*[a-z\u{00a1}-\u{ffff}0-9]+)(?:\.(?:[a-z\u{00a1}-\u{ffff}0-9]+-?)*[a-z\u{00a1}-\u{ffff}0-9]+)*(?:\.[a-z\u{00a1}-\u{ffff}]{2,})",
    r")(?::\d{2,5})?(?:[/?]\S*)?$"
);

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("built-in url pattern is valid"));

/// Public web URL: http, https or ftp, with a public IPv4 address or a
/// dotted host name ending in an alphabetic top-level label.
pub fn is_public_url(value: &Value) -> bool {
    let Some(text) = value_text(value) else {
        return false;
    };
    let Some(captures) = URL_REGEX.captures(&text) else {
        return false;
    };
    match captures.name("host").map(|m| m.as_str().parse::<Ipv4Addr>()) {
        Some(Ok(addr)) => !(addr.is_private() || addr.is_loopback() || addr.is_link_local()),
        _ => true,
    }
}

/// A public URL or a `market://` link.
pub fn is_android_url(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.starts_with("market://")) || is_public_url(value)
}

fn compiled(pattern: &str) -> FormatMatcher {
    FormatMatcher::pattern(pattern).expect("built-in format pattern is valid")
}

/// The core format table.
pub fn core_formats() -> HashMap<String, FormatMatcher> {
    let mut formats = HashMap::new();
    formats.insert("email".to_string(), compiled(&email_pattern()));
    formats.insert("ip-address".to_string(), compiled(IP_ADDRESS_PATTERN));
    formats.insert("ipv6".to_string(), compiled(IPV6_PATTERN));
    formats.insert("date-time".to_string(), compiled(DATE_TIME_PATTERN));
    formats.insert("date".to_string(), compiled(DATE_PATTERN));
    formats.insert("time".to_string(), compiled(TIME_PATTERN));
    formats.insert("color".to_string(), compiled(COLOR_PATTERN));
    formats.insert("host-name".to_string(), compiled(HOST_NAME_PATTERN));
    formats.insert(
        "utc-millisec".to_string(),
        FormatMatcher::predicate(|value| value.as_f64().is_some_and(|n| n >= 0.0)),
    );
    formats.insert(
        "regex".to_string(),
        FormatMatcher::predicate(|value| {
            value_text(value).is_some_and(|text| Regex::new(&text).is_ok())
        }),
    );
    formats
}

/// The extended format table.
pub fn extended_formats() -> HashMap<String, FormatMatcher> {
    let mut formats = HashMap::new();
    formats.insert("url".to_string(), FormatMatcher::predicate(is_public_url));
    formats.insert("android_url".to_string(), FormatMatcher::predicate(is_android_url));
    formats
}
