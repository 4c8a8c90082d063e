//! Fixed phrase lists. Matching is case-insensitive substring search on visible text.

/// Words that suggest a real business site behind the page.
pub const POSITIVE_KEYWORDS: [&str; 11] = [
    "engineering",
    "services",
    "solutions",
    "projects",
    "clients",
    "contact",
    "about us",
    "industries",
    "management",
    "power",
    "energy",
];

/// Registrar parking, default server pages, control panel logins, browser error pages.
pub const JUNK_PHRASES: [&str; 12] = [
    "expired domain",
    "buy now on godaddy",
    "plesk",
    "web server's default page",
    "index of /",
    "coming soon",
    "this domain is for sale",
    "domain for sale",
    "future home of",
    "this site can’t be reached",
    "no web site at this address",
    "log in to plesk",
];

/// `lowered` must already be lowercase.
pub(crate) fn contains_junk(lowered: &str) -> bool {
    JUNK_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Number of distinct positive keywords present. `lowered` must already be lowercase.
pub(crate) fn count_positive_keywords(lowered: &str) -> usize {
    POSITIVE_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count()
}
