//! Context tokenizer: snippets to a flat, order-preserving word sequence.

/// Lowercase and split the snippets on whitespace, concatenated in the
/// given order. Order is load-bearing: the correlator examines adjacent
/// pairs, and callers deliberately repeat the anchor line after the full
/// window to up-weight its words.
pub fn context_tokens<S: AsRef<str>>(snippets: &[S]) -> Vec<String> {
    let mut tokens = Vec::new();
    for snippet in snippets {
        tokens.extend(
            snippet
                .as_ref()
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string),
        );
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(
            context_tokens(&["John Smith", "Email: J.Smith@X.com"]),
            ["john", "smith", "email:", "j.smith@x.com"]
        );
    }

    #[test]
    fn preserves_snippet_order() {
        let tokens = context_tokens(&["b c", "a", "b c"]);
        assert_eq!(tokens, ["b", "c", "a", "b", "c"]);
    }

    #[test]
    fn multiline_snippets_flatten() {
        assert_eq!(context_tokens(&["one\ntwo  three\n"]), ["one", "two", "three"]);
    }

    #[test]
    fn empty_input() {
        assert!(context_tokens(&[""; 0]).is_empty());
        assert!(context_tokens(&["", "   \n "]).is_empty());
    }
}
