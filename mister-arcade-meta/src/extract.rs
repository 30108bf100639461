//! Scalar extraction from single markup lines.
//!
//! The export and descriptor files put one element per line, so a field can
//! be pulled out with plain string searches instead of a full XML parser:
//!
//! ```text
//! <description>Street Fighter II: The World Warrior (World 910522)</description>
//! <machine name="sf2" sourcefile="capcom/cps1.cpp" cloneof="sf2ce">
//! ```

/// Entities decoded by [`extract_value`], in decode order.
///
/// `&amp;` comes last so that an escaped entity such as `&amp;quot;` decodes
/// to the literal text `&quot;` rather than to a quote.
const ENTITIES: [(&str, &str); 2] = [("&quot;", "\""), ("&amp;", "&")];

/// Return the text content of the element on `line`.
///
/// Takes everything between the first `>` and the following `</`, trims it
/// and decodes `&amp;` and `&quot;`. Returns `None` when either delimiter is
/// missing.
pub fn extract_value(line: &str) -> Option<String> {
    let start = line.find('>')? + 1;
    let len = line[start..].find("</")?;
    Some(unescape_entities(line[start..start + len].trim()))
}

/// Like [`extract_value`], parsed as an integer.
///
/// Missing or non-numeric text yields 0 (the "unknown year" value).
pub fn extract_int(line: &str) -> i64 {
    extract_value(line)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Return the trimmed value of `attr="..."` on `line`, or an empty string.
pub fn extract_attribute(line: &str, attr: &str) -> String {
    let token = format!("{attr}=\"");
    let Some(pos) = line.find(&token) else {
        return String::new();
    };
    let start = pos + token.len();
    match line[start..].find('"') {
        Some(len) => line[start..start + len].trim().to_string(),
        None => String::new(),
    }
}

/// Decode the fixed entity set.
pub fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // Single left-to-right pass so decoded output is never decoded again.
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, decoded)) => {
                out.push_str(decoded);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Encode the fixed entity set. Inverse of [`unescape_entities`].
pub fn escape_entities(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_value() {
        assert_eq!(
            extract_value("<description>Street Fighter II</description>").as_deref(),
            Some("Street Fighter II")
        );
        assert_eq!(
            extract_value("<Name>  Q&amp;A Quiz  </Name>").as_deref(),
            Some("Q&A Quiz")
        );
        assert_eq!(
            extract_value("<description>The &quot;Bad&quot; Guys</description>").as_deref(),
            Some("The \"Bad\" Guys")
        );
    }

    #[test]
    fn test_extract_value_malformed() {
        assert_eq!(extract_value("<description>Unterminated"), None);
        assert_eq!(extract_value("no markup at all"), None);
        assert_eq!(extract_value("<year>1991<year>"), None);
    }

    #[test]
    fn test_extract_value_empty_element() {
        assert_eq!(extract_value("<setname></setname>").as_deref(), Some(""));
    }

    #[test]
    fn test_extract_int() {
        assert_eq!(extract_int("<year>1991</year>"), 1991);
        assert_eq!(extract_int("<year> 1987 </year>"), 1987);
        assert_eq!(extract_int("<year>198?</year>"), 0);
        assert_eq!(extract_int("<year></year>"), 0);
        assert_eq!(extract_int("<year>1991"), 0);
    }

    #[test]
    fn test_extract_attribute() {
        let line = r#"<machine name="sf2" sourcefile="capcom/cps1.cpp" cloneof="sf2ce">"#;
        assert_eq!(extract_attribute(line, "name"), "sf2");
        assert_eq!(extract_attribute(line, "cloneof"), "sf2ce");
        assert_eq!(extract_attribute(line, "romof"), "");
    }

    #[test]
    fn test_extract_attribute_unterminated() {
        assert_eq!(extract_attribute(r#"<machine name="sf2"#, "name"), "");
    }

    #[test]
    fn test_entity_round_trip() {
        for text in [
            "Tom & Jerry",
            "The \"Bad\" Guys",
            "&amp; literally",
            "Q&A \"&quot;\" &&",
            "",
        ] {
            assert_eq!(unescape_entities(&escape_entities(text)), text);
        }
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(unescape_entities("Caf&eacute; &lt;3"), "Caf&eacute; &lt;3");
    }
}
