//! Small text helpers shared by the correlator and resolver.

/// Title-case a string: an alphabetic character is uppercased when the
/// previous character is not alphabetic, lowercased otherwise.
///
/// This matches the casing rule the resolver's thresholds were tuned
/// against, so `"o'neil"` becomes `"O'Neil"` and `"jean-luc"` becomes
/// `"Jean-Luc"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Normalize a name candidate: trim, lowercase, then title-case each word.
pub fn normalize_name(s: &str) -> String {
    title_case(&s.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title_case() {
        assert_eq!(title_case("john smith"), "John Smith");
        assert_eq!(title_case("JOHN SMITH"), "John Smith");
    }

    #[test]
    fn punctuation_restarts_words() {
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("jean-luc picard"), "Jean-Luc Picard");
        assert_eq!(title_case("j.smith"), "J.Smith");
    }

    #[test]
    fn empty_and_nonalpha() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("123"), "123");
    }

    #[test]
    fn normalize_trims_and_recases() {
        assert_eq!(normalize_name("  jOhN sMiTh  "), "John Smith");
        assert_eq!(normalize_name("JANE DOE"), "Jane Doe");
        assert_eq!(normalize_name("   "), "");
    }
}
