use super::model::ListingStatus;

// ---------------------------------------------------------------------------
// Free-text TYPE classifier
// ---------------------------------------------------------------------------
//
// The source dataset stores transaction state and housing type mashed into a
// single text field ("Condo for sale", "3 BR Co-op Sold", ...). The rules
// below pull the two apart. Keyword precedence, first match wins,
// case-insensitive; phrase matches for "for sale"/"for rent", whole-word
// matches for "sold"/"pending". Everything lives behind this one pure
// function so the heuristics can be extended without touching the filter
// logic.

/// Classify a raw `TYPE` value into `(status, property_type)`.
///
/// Total over every input: a missing field yields
/// `(Unknown, "Unknown")`, text that matches no keyword yields
/// `(Other, <whole text title-cased>)`. The property type is the text
/// preceding the matched keyword, trimmed and title-cased; it may be empty
/// when the field contains nothing but the keyword itself.
pub fn classify(raw: Option<&str>) -> (ListingStatus, String) {
    let Some(text) = raw else {
        return (ListingStatus::Unknown, "Unknown".to_string());
    };

    let text = text.trim();
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    if let Some(at) = lower.find("for sale") {
        return (ListingStatus::ForSale, title_case(lower[..at].trim()));
    }
    if let Some(at) = lower.find("for rent") {
        return (ListingStatus::ForRent, title_case(lower[..at].trim()));
    }
    if words.contains(&"sold") {
        let at = lower.find("sold").unwrap_or(lower.len());
        return (ListingStatus::Sold, title_case(lower[..at].trim()));
    }
    if words.contains(&"pending") {
        let at = lower.find("pending").unwrap_or(lower.len());
        return (ListingStatus::Pending, title_case(lower[..at].trim()));
    }

    (ListingStatus::Other, title_case(text))
}

/// Title-case in the Python `str.title()` sense: every letter that follows
/// a non-letter is uppercased, the rest lowercased ("co-op" → "Co-Op").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}
