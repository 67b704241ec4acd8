//! Email locator: primary address plus its surrounding context window.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::EmailCandidate;

/// Lines of context kept on each side of the matched line.
pub const CONTEXT_RADIUS: usize = 3;

/// Deliberately permissive (single-letter TLDs allowed): strict RFC
/// validation produces false negatives on real resumes.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]+").unwrap());

/// Find the primary email address of `raw_text`.
///
/// Only the first match in document order is used; resumes list one primary
/// contact address near the top or in a header, and later addresses are
/// overwhelmingly noise (references, hosting providers). The matched line
/// plus up to [`CONTEXT_RADIUS`] lines on each side form the context window
/// for name-email correlation. No match means all email-anchored heuristics
/// are skipped downstream.
pub fn locate_email(raw_text: &str) -> Option<EmailCandidate> {
    let matched = EMAIL_RE.find(raw_text)?;
    let address = matched.as_str().to_string();

    let lines: Vec<&str> = raw_text.split('\n').collect();
    let candidate = match lines.iter().position(|line| line.contains(address.as_str())) {
        Some(anchor) => {
            let start = anchor.saturating_sub(CONTEXT_RADIUS);
            let end = (anchor + CONTEXT_RADIUS + 1).min(lines.len());
            EmailCandidate {
                address,
                context_lines: lines[start..end].iter().map(|l| l.to_string()).collect(),
                anchor_line_index: anchor,
            }
        }
        // Unreachable with the pattern above (it cannot span a newline),
        // but an address without a locatable line still disables
        // correlation rather than inventing context.
        None => EmailCandidate {
            address,
            context_lines: Vec::new(),
            anchor_line_index: 0,
        },
    };
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_email() {
        let text = "John Smith\nEmail: j.smith@example.com\nPhone: 555";
        let c = locate_email(text).unwrap();
        assert_eq!(c.address, "j.smith@example.com");
        assert_eq!(c.anchor_line_index, 1);
        assert_eq!(c.anchor_line(), "Email: j.smith@example.com");
    }

    #[test]
    fn first_match_wins() {
        let text = "primary@a.com\n...\nsecondary@b.org";
        let c = locate_email(text).unwrap();
        assert_eq!(c.address, "primary@a.com");
    }

    #[test]
    fn no_at_sign_means_none() {
        assert!(locate_email("no contact details here").is_none());
        assert!(locate_email("").is_none());
    }

    #[test]
    fn bare_at_sign_is_not_an_email() {
        assert!(locate_email("meet @ noon").is_none());
    }

    #[test]
    fn single_letter_tld_accepted() {
        let c = locate_email("odd but real: a@b.c").unwrap();
        assert_eq!(c.address, "a@b.c");
    }

    #[test]
    fn plus_and_percent_in_local_part() {
        let c = locate_email("j.smith+cv%x@mail.example.co.uk end").unwrap();
        assert_eq!(c.address, "j.smith+cv%x@mail.example.co.uk");
    }

    #[test]
    fn window_clamped_at_top() {
        let text = "top@x.com\nline1\nline2\nline3\nline4";
        let c = locate_email(text).unwrap();
        assert_eq!(c.anchor_line_index, 0);
        // anchor + 3 below, nothing above
        assert_eq!(c.context_lines.len(), 4);
        assert_eq!(c.anchor_line(), "top@x.com");
    }

    #[test]
    fn window_clamped_at_bottom() {
        let text = "line0\nline1\nbottom@x.com";
        let c = locate_email(text).unwrap();
        assert_eq!(c.anchor_line_index, 2);
        assert_eq!(c.context_lines, ["line0", "line1", "bottom@x.com"]);
        assert_eq!(c.anchor_line(), "bottom@x.com");
    }

    #[test]
    fn full_window_mid_document() {
        let text = "l0\nl1\nl2\nl3\nmid@x.com\nl5\nl6\nl7\nl8";
        let c = locate_email(text).unwrap();
        assert_eq!(c.anchor_line_index, 4);
        assert_eq!(c.context_lines.len(), 7);
        assert_eq!(c.context_lines[0], "l1");
        assert_eq!(c.context_lines[6], "l7");
        assert_eq!(c.anchor_line(), "mid@x.com");
    }
}
