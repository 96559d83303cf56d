//! Shared HTML extraction helpers.
//!
//! Each connector walks a container element full of repeated "tile" children
//! and reads string attributes off nodes inside each tile. Attributes arrive
//! as raw strings; the typed readers here make the coercion explicit and
//! return `None` for anything absent or malformed, which callers treat as a
//! per-field "skip this tile" decision. Nothing in this module errors: a
//! document that does not match the expected shape simply yields no records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

/// Date formats observed on sale tiles: US-style on the live site, ISO on
/// some cached renderings.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Compiles a selector literal. The selectors in this crate are fixed
/// strings, so a parse failure is a programming error.
pub(crate) fn selector(src: &str) -> Selector {
    Selector::parse(src).expect("valid selector")
}

/// Parses a response body into a queryable document.
pub(crate) fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// The first element matching `sel`, scoped to `node`.
pub(crate) fn first_match<'a>(node: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    node.select(sel).next()
}

/// The concatenated, trimmed text content of the first element matching
/// `sel` within `node`. Empty text reads as `None`.
pub(crate) fn text_of(node: ElementRef<'_>, sel: &Selector) -> Option<String> {
    let text = first_match(node, sel)?
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A non-empty string attribute, trimmed.
pub(crate) fn attr_str(node: ElementRef<'_>, name: &str) -> Option<String> {
    let value = node.value().attr(name)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// An attribute parsed as a signed integer.
pub(crate) fn attr_i64(node: ElementRef<'_>, name: &str) -> Option<i64> {
    attr_str(node, name)?.parse().ok()
}

/// An attribute parsed as a decimal number.
pub(crate) fn attr_decimal(node: ElementRef<'_>, name: &str) -> Option<Decimal> {
    attr_str(node, name)?.parse().ok()
}

/// An attribute parsed as a calendar date, trying each of [`DATE_FORMATS`].
pub(crate) fn attr_date(node: ElementRef<'_>, name: &str) -> Option<NaiveDate> {
    let raw = attr_str(node, name)?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&raw, format).ok())
}
