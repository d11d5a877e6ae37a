use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\n\u{a0}]+").expect("whitespace regex"));

/// Collapse all interior whitespace (including carriage returns and
/// non-breaking spaces) to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Join paragraphs into the canonical body form: each paragraph on one
/// line, paragraphs separated by exactly one blank line. Whitespace-only
/// paragraphs are dropped, so the result never contains a carriage
/// return, a run of three newlines, or a line of bare whitespace.
pub fn normalize_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .map(|p| collapse_whitespace(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        let body = normalize_paragraphs(["First paragraph.", "Second paragraph."]);
        assert_eq!(body, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let body = normalize_paragraphs(["Line one\r\nstill line one", "Second\r"]);
        assert!(!body.contains('\r'));
        assert_eq!(body, "Line one still line one\n\nSecond");
    }

    #[test]
    fn whitespace_only_paragraphs_are_dropped() {
        let body = normalize_paragraphs(["First.", "   ", "\r\n", " \n ", "Last."]);
        assert_eq!(body, "First.\n\nLast.");
        assert!(!body.contains("\n\n\n"));
        assert!(!body.contains(" \n "));
    }

    #[test]
    fn interior_whitespace_collapses_to_single_spaces() {
        let body = normalize_paragraphs(["Too   many\t\tspaces\n here"]);
        assert_eq!(body, "Too many spaces here");
    }

    #[test]
    fn messy_input_meets_body_invariants() {
        let body = normalize_paragraphs([
            "  Discussions over the budget\r\n        continued this week.  ",
            " ",
            "",
            "The committee\u{a0}meets again\nnext month.",
        ]);
        assert!(!body.contains('\r'));
        assert!(!body.contains("\n\n\n"));
        assert!(!body.contains(" \n "));
        assert_eq!(
            body,
            "Discussions over the budget continued this week.\n\nThe committee meets again next month."
        );
    }

    #[test]
    fn empty_input_produces_empty_body() {
        let body = normalize_paragraphs(Vec::<String>::new());
        assert_eq!(body, "");
    }
}
