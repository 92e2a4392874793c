// ── Text with embedded links ──
//
// Backend free-text fields carry bare URLs ("Book at www.example.org").
// `LinkedText` splits such text into plain and link fragments once, so
// renderers never re-parse strings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

static URL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:https?://|www\.)[^\s<>"]+"#).expect("URL candidate pattern is valid")
});

/// One piece of a [`LinkedText`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fragment {
    Text { text: String },
    Link { text: String, href: String },
}

impl Fragment {
    /// The text a reader sees for this fragment.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Link { text, .. } => text,
        }
    }
}

/// Free text split into plain and link fragments.
///
/// Adjacent plain fragments are always merged, so text without URLs is a
/// single `Text` fragment and empty text has no fragments at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkedText(Vec<Fragment>);

impl LinkedText {
    /// Split `text`, turning bare URLs into links.
    pub fn parse(text: &str) -> Self {
        let mut fragments = Vec::new();
        split_into(text, &mut fragments);
        Self(fragments)
    }

    /// Like [`parse`](Self::parse), with absent text as no fragments.
    pub fn parse_optional(text: Option<&str>) -> Self {
        text.map(Self::parse).unwrap_or_default()
    }

    /// Scan the plain fragments again for URLs.
    ///
    /// Existing links pass through untouched, so relinking already linked
    /// text is a no-op.
    pub fn relink(self) -> Self {
        let mut fragments = Vec::with_capacity(self.0.len());
        for fragment in self.0 {
            match fragment {
                Fragment::Text { text } => split_into(&text, &mut fragments),
                link @ Fragment::Link { .. } => fragments.push(link),
            }
        }
        Self(fragments)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_links(&self) -> bool {
        self.0.iter().any(|f| matches!(f, Fragment::Link { .. }))
    }

    /// Link targets in order of appearance.
    pub fn hrefs(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|f| match f {
            Fragment::Link { href, .. } => Some(href.as_str()),
            Fragment::Text { .. } => None,
        })
    }
}

impl fmt::Display for LinkedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.0 {
            f.write_str(fragment.text())?;
        }
        Ok(())
    }
}

impl From<&str> for LinkedText {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

// ── Splitting ───────────────────────────────────────────────────────

fn split_into(text: &str, out: &mut Vec<Fragment>) {
    let mut cursor = 0;
    for m in URL_CANDIDATE.find_iter(text) {
        if starts_mid_token(text, m.start()) {
            continue;
        }
        let candidate = trim_trailing_punctuation(m.as_str());
        let Some(href) = resolve_href(candidate) else {
            continue;
        };
        push_text(out, &text[cursor..m.start()]);
        out.push(Fragment::Link {
            text: candidate.to_owned(),
            href,
        });
        cursor = m.start() + candidate.len();
    }
    push_text(out, &text[cursor..]);
}

/// A URL never starts inside a word, a host name or an email address.
fn starts_mid_token(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '.' | '@'))
}

fn push_text(out: &mut Vec<Fragment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Fragment::Text { text: last }) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Fragment::Text {
            text: text.to_owned(),
        });
    }
}

/// Drop sentence punctuation a URL is unlikely to end with. Closing
/// brackets are kept when they balance an opening one inside the URL.
fn trim_trailing_punctuation(candidate: &str) -> &str {
    let mut end = candidate.len();
    while let Some(c) = candidate[..end].chars().next_back() {
        let head = &candidate[..end];
        let strip = match c {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' => true,
            ')' => head.matches('(').count() < head.matches(')').count(),
            ']' => head.matches('[').count() < head.matches(']').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        end -= c.len_utf8();
    }
    &candidate[..end]
}

fn resolve_href(candidate: &str) -> Option<String> {
    let bare_www = candidate
        .get(..4)
        .is_some_and(|p| p.eq_ignore_ascii_case("www."));
    let href = if bare_www {
        format!("http://{candidate}")
    } else {
        candidate.to_owned()
    };

    let url = Url::parse(&href).ok()?;
    let host = url.host_str()?;
    if bare_www && !host.trim_start_matches("www.").contains('.') {
        return None;
    }
    Some(href)
}
