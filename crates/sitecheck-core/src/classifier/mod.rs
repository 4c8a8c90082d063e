//! Site liveness classifier.
//!
//! Decides whether a URL looks like a real, populated site ("yes") or a
//! placeholder, parked, default or broken page ("no"). Best effort only.

mod keywords;

pub use keywords::{JUNK_PHRASES, POSITIVE_KEYWORDS};

use crate::error::ClassificationError;
use crate::fetch::SiteFetcher;
use crate::page::PageSignals;
use crate::url_model::normalize_url;

/// Pages shorter than this (in chars) are "low content" candidates.
pub const MIN_TEXT_LEN: usize = 100;
/// Pages with fewer distinct tags than this are "low content" candidates.
pub const MIN_TAG_COUNT: usize = 8;

pub const JUNK_EXPLANATION: &str = "placeholder / junk content";
pub const LOW_CONTENT_EXPLANATION: &str = "low content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Yes,
    No,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Yes => "yes",
            Label::No => "no",
        }
    }
}

/// Verdict for one site. `explanation` is empty for `Yes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: Label,
    pub explanation: String,
}

impl Verdict {
    pub fn yes() -> Self {
        Self {
            label: Label::Yes,
            explanation: String::new(),
        }
    }

    pub fn no(explanation: impl Into<String>) -> Self {
        Self {
            label: Label::No,
            explanation: explanation.into(),
        }
    }

    /// Downgrade a per-site failure to a "no" verdict.
    pub fn from_error(err: &ClassificationError) -> Self {
        Self::no(format!("error: {err}"))
    }

    pub fn is_error(&self) -> bool {
        self.label == Label::No && self.explanation.starts_with("error: ")
    }
}

/// Pure decision over extracted page signals.
pub fn decide(signals: &PageSignals) -> Verdict {
    let lowered = signals.visible_text.to_lowercase();
    if keywords::contains_junk(&lowered) {
        return Verdict::no(JUNK_EXPLANATION);
    }
    let keyword_count = keywords::count_positive_keywords(&lowered);
    if signals.text_len() < MIN_TEXT_LEN
        && signals.tag_count() < MIN_TAG_COUNT
        && keyword_count == 0
    {
        return Verdict::no(LOW_CONTENT_EXPLANATION);
    }
    Verdict::yes()
}

/// Normalize, fetch, parse and decide. Errors are returned, not downgraded.
pub fn try_classify(url: &str, fetcher: &SiteFetcher) -> Result<Verdict, ClassificationError> {
    let url = normalize_url(url);
    let html = fetcher
        .fetch_text(&url)
        .map_err(|source| ClassificationError::Fetch {
            url: url.clone(),
            source,
        })?;
    let signals = PageSignals::from_html(&html);
    let verdict = decide(&signals);
    tracing::debug!(
        %url,
        tags = signals.tag_count(),
        text_len = signals.text_len(),
        label = verdict.label.as_str(),
        "classified"
    );
    Ok(verdict)
}

/// Classify one URL; any failure becomes `("no", "error: ...")`.
///
/// Blocking; call from `spawn_blocking` if used from async code.
pub fn classify(url: &str, fetcher: &SiteFetcher) -> Verdict {
    match try_classify(url, fetcher) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("classification failed: {e}");
            Verdict::from_error(&e)
        }
    }
}
