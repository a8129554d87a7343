use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::models::DescriptionSections;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn description_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)^Overview(?P<overview>.*)Natural Features:(?P<natural_features>.*)Recreation:(?P<recreation>.*)Facilities:(?P<facilities>.*)",
        )
        .unwrap()
    })
}

/// If a bracket is found in the input, strip all HTML tags and decode the
/// common entities. Plain text passes through untouched.
pub fn clean_text(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }

    let stripped = tag_regex().replace_all(text, "");
    decode_entities(&stripped)
}

fn numeric_entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&#(?P<hex>[xX])?(?P<code>[0-9a-fA-F]{1,7});").unwrap())
}

fn decode_entities(text: &str) -> String {
    let decoded = numeric_entity_regex().replace_all(text, |caps: &Captures| {
        let radix = if caps.name("hex").is_some() { 16 } else { 10 };
        u32::from_str_radix(&caps["code"], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            // not a valid code point; leave the reference verbatim
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; last so it cannot re-form other entities
    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Split a standard-layout facility description into its four sections.
/// Descriptions that do not follow the layout land entirely in `overview`.
pub fn split_facility_description(description: &str) -> DescriptionSections {
    match description_regex().captures(description) {
        Some(captures) => DescriptionSections {
            overview: captures["overview"].to_string(),
            natural_features: captures["natural_features"].to_string(),
            recreation: captures["recreation"].to_string(),
            facilities: captures["facilities"].to_string(),
        },
        None => DescriptionSections {
            overview: description.to_string(),
            ..Default::default()
        },
    }
}
