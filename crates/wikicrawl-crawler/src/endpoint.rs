//! Internal document references.

/// Path prefix shared by every crawlable article.
pub const WIKI_PREFIX: &str = "/wiki/";

/// Returns true when `href` points at another article of the same site.
///
/// The check is a literal, case-sensitive prefix match. Fragments, queries and non-article
/// namespaces such as `/wiki/File:` are kept as they are.
pub fn is_internal_document(href: &str) -> bool {
    href.starts_with(WIKI_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::is_internal_document;

    #[test]
    fn accepts_wiki_paths() {
        assert!(is_internal_document("/wiki/Programming_language"));
        assert!(is_internal_document("/wiki/"));
        assert!(is_internal_document("/wiki/Java#History"));
        assert!(is_internal_document("/wiki/Special:Random"));
        assert!(is_internal_document("/wiki/File:Duke.png?lang=fr"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_internal_document(""));
        assert!(!is_internal_document("/wiki"));
        assert!(!is_internal_document("/WIKI/Java"));
        assert!(!is_internal_document("wiki/Java"));
        assert!(!is_internal_document(" /wiki/Java"));
        assert!(!is_internal_document("#cite_note-1"));
        assert!(!is_internal_document("/w/index.php?title=Java"));
        assert!(!is_internal_document("https://en.wikipedia.org/wiki/Java"));
        assert!(!is_internal_document("//en.wikipedia.org/wiki/Java"));
    }
}
