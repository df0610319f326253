//! Business contact helpers.
//!
//! The WhatsApp floating button links to a `wa.me` chat with a prefilled
//! message for the first configured phone. Phone numbers are shown in the
//! Chilean mobile grouping (`+56 9 9186 4681`).

use crate::config::ContactConfig;
use crate::page::Page;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";

static CHILEAN_MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+56)(\d)(\d{4})(\d{4})").expect("phone regex should compile")
});
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// `wa.me` deep link for `phone` with a prefilled `message`.
///
/// Only the digits of `phone` are kept.
pub fn whatsapp_url(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let mut url = Url::parse(WHATSAPP_BASE)?.join(&digits)?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

/// Point `.whatsapp-btn` at the chat link, opening in a new tab.
///
/// Returns false if the page has no such button.
pub fn wire_whatsapp_button(
    page: &mut Page,
    contact: &ContactConfig,
) -> Result<bool, url::ParseError> {
    let Some(button) = page.first_with_class("whatsapp-btn") else {
        return Ok(false);
    };
    let Some(phone) = contact.phones.first() else {
        return Ok(false);
    };
    let url = whatsapp_url(phone, &contact.whatsapp_message)?;
    page.set_attr(button, "href", url.as_str());
    page.set_attr(button, "target", "_blank");
    page.set_attr(button, "rel", "noopener noreferrer");
    Ok(true)
}

/// Group the first `+56` mobile number in `phone` as `+56 9 XXXX XXXX`.
///
/// Text around the number is kept; input without a match is returned as is.
pub fn format_phone(phone: &str) -> String {
    CHILEAN_MOBILE_PATTERN
        .replacen(phone, 1, "$1 $2 $3 $4")
        .into_owned()
}

/// Loose email shape check: `local@domain.tld` with no whitespace and a
/// single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
