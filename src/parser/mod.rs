//! XML normalization for BGG collection exports and thing lookups

pub mod collection;
pub mod poll;
pub mod things;
pub mod xml;

use crate::error::ParseError;
use xml::XmlElement;

pub use collection::parse_collection;
pub use poll::{best_at_player_counts, VoteTally, SUGGESTED_PLAYERS_POLL};
pub use things::parse_things;

/// Reject documents whose root is an error payload rather than `<items>`.
///
/// BGG answers with a bare `<message>` (rejections, "request queued")
/// or with `<errors><error><message>`.
pub(crate) fn check_error_root(root: &XmlElement) -> Result<(), ParseError> {
    let message = match root.name.as_str() {
        "message" => Some(root.text_content()),
        "errors" | "error" => Some(
            root.find("message")
                .map(XmlElement::text_content)
                .unwrap_or_else(|| root.text_content()),
        ),
        _ => None,
    };

    match message {
        Some(text) => Err(ParseError::ApiError(text.trim().to_string())),
        None => Ok(()),
    }
}

/// Trimmed text content, `None` when blank
pub(crate) fn element_text(element: &XmlElement) -> Option<String> {
    let text = element.text_content();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Text content, or the `value` attribute when there is no text
pub(crate) fn text_or_value(element: &XmlElement) -> Option<String> {
    element_text(element).or_else(|| {
        value_attr(element)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}

pub(crate) fn value_attr(element: &XmlElement) -> Option<&str> {
    element.attr("value")
}

pub(crate) fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// `"N/A"` and other non-numeric text yield `None`
pub(crate) fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xml::parse_document;

    #[test]
    fn test_error_message_passes_through_verbatim() {
        let root = parse_document(
            "<errors><error><message>Invalid <b>username</b> specified</message></error></errors>",
        )
        .unwrap();
        assert_eq!(
            check_error_root(&root),
            Err(ParseError::ApiError("Invalid username specified".into()))
        );
    }

    #[test]
    fn test_element_text_trims_and_drops_blank() {
        let root = parse_document("<item><name>  Azul  </name><blank>   </blank></item>").unwrap();
        assert_eq!(element_text(root.find("name").unwrap()), Some("Azul".into()));
        assert_eq!(element_text(root.find("blank").unwrap()), None);
    }
}
