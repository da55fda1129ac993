//! Values accepted by the `@connect` directive.
//!
//! `@connect` takes a domain (which also covers its subdomains), an IP
//! address, or one of the keywords `self`, `localhost` and `*`.

use super::item::Constraint;
use super::messages as msg;
use std::net::IpAddr;

/// Keywords accepted in place of a domain or address.
pub const CONNECT_KEYWORDS: [&str; 3] = ["self", "localhost", "*"];

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

fn is_valid_label(label: &str) -> bool {
    (1..=MAX_LABEL_LENGTH).contains(&label.len())
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// Returns true if `s` is a fully qualified domain name such as
/// `safari.tampermonkey.net`.
pub fn is_valid_domain(s: &str) -> bool {
    if s.len() > MAX_DOMAIN_LENGTH {
        return false;
    }
    let labels: Vec<&str> = s.split('.').collect();
    let Some(top) = labels.last() else {
        return false;
    };
    labels.len() >= 2
        && labels.iter().all(|label| is_valid_label(label))
        && !top.chars().all(|c| c.is_ascii_digit())
}

/// Returns true if `s` is an IPv4 or IPv6 address.
pub fn is_ip_address(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Returns true if `s` is an acceptable `@connect` value.
pub fn is_valid_connect_value(s: &str) -> bool {
    CONNECT_KEYWORDS.iter().any(|&keyword| keyword == s) || is_valid_domain(s) || is_ip_address(s)
}

/// A constraint that restricts a text item to valid `@connect` values.
pub fn connect_constraint() -> Constraint {
    Constraint::new(is_valid_connect_value, msg::VALID_CONNECT_VALUE_REQUIRED)
}
