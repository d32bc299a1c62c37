//! In-process classifier driven by host and keyword rules.
//!
//! Classification runs in two passes:
//!
//! 1. **Host rules** – if the URL's host equals, or is a subdomain of, a known
//!    domain, that domain's category wins outright with confidence `1.0`.
//! 2. **Keyword scoring** – otherwise every category's keywords are counted in
//!    the URL, the HTML `<title>`, the meta description and the visible text.
//!    Hits are weighted by where they occur and the highest-scoring category
//!    wins.  Confidence is that category's share of all hits.
//!
//! A page with no hits at all is [`Category::Other`].

use async_trait::async_trait;
use tracing::debug;

use crate::{Category, Classification, Classifier, ClassifierError};

/// Only the head of very large documents is scanned.
const MAX_HTML_CHARS: usize = 200_000;

const TITLE_WEIGHT: usize = 3;
const META_WEIGHT: usize = 2;
const URL_WEIGHT: usize = 2;
const BODY_WEIGHT: usize = 1;

const HOST_RULES: &[(&str, Category)] = &[
    ("youtube.com", Category::Streaming),
    ("youtu.be", Category::Streaming),
    ("netflix.com", Category::Streaming),
    ("twitch.tv", Category::Streaming),
    ("hulu.com", Category::Streaming),
    ("spotify.com", Category::Streaming),
    ("facebook.com", Category::Social),
    ("instagram.com", Category::Social),
    ("tiktok.com", Category::Social),
    ("twitter.com", Category::Social),
    ("x.com", Category::Social),
    ("snapchat.com", Category::Social),
    ("reddit.com", Category::Social),
    ("discord.com", Category::Social),
    ("roblox.com", Category::Games),
    ("minecraft.net", Category::Games),
    ("steampowered.com", Category::Games),
    ("epicgames.com", Category::Games),
    ("coolmathgames.com", Category::Games),
    ("poki.com", Category::Games),
    ("amazon.com", Category::Shopping),
    ("ebay.com", Category::Shopping),
    ("etsy.com", Category::Shopping),
    ("walmart.com", Category::Shopping),
    ("aliexpress.com", Category::Shopping),
    ("khanacademy.org", Category::Education),
    ("wikipedia.org", Category::Education),
    ("quizlet.com", Category::Education),
    ("coursera.org", Category::Education),
    ("edx.org", Category::Education),
    ("classroom.google.com", Category::Education),
    ("bbc.co.uk", Category::News),
    ("cnn.com", Category::News),
    ("nytimes.com", Category::News),
    ("reuters.com", Category::News),
    ("apnews.com", Category::News),
    ("draftkings.com", Category::Gambling),
    ("fanduel.com", Category::Gambling),
    ("pokerstars.com", Category::Gambling),
    ("bet365.com", Category::Gambling),
];

const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Adult,
        &["porn", "xxx", "nsfw", "nude", "explicit content", "adults only", "18+"],
    ),
    (
        Category::Drugs,
        &["cannabis", "marijuana", "weed shop", "vape", "cocaine", "psychedelic", "dispensary"],
    ),
    (
        Category::Education,
        &[
            "homework", "lesson", "lessons", "worksheet", "worksheets", "curriculum", "tutorial",
            "tutorials", "algebra", "science", "history", "school", "course", "courses",
        ],
    ),
    (
        Category::Gambling,
        &["casino", "poker", "slots", "sportsbook", "jackpot", "roulette", "betting odds"],
    ),
    (
        Category::Games,
        &["game", "games", "play now", "multiplayer", "unblocked", "gamer", "arcade", "level up"],
    ),
    (
        Category::News,
        &["breaking news", "headlines", "reporter", "editorial", "newsroom", "live updates"],
    ),
    (
        Category::Shopping,
        &["add to cart", "checkout", "free shipping", "buy now", "discount", "sale price"],
    ),
    (
        Category::Social,
        &["followers", "friend request", "profile", "timeline", "direct message", "share post"],
    ),
    (
        Category::Streaming,
        &[
            "watch online", "stream", "streaming", "episodes", "livestream", "subscribe to watch",
            "movies online",
        ],
    ),
    (
        Category::Violence,
        &["gore", "weapon", "weapons", "shooting", "fight video", "brutal", "massacre"],
    ),
];

/// Rule-based [`Classifier`] that needs no network access.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of [`Classifier::classify`].
    pub fn classify_page(&self, url: &str, html: Option<&str>) -> Classification {
        let host = host_of(url);
        if let Some(category) = match_host(&host) {
            debug!(%host, %category, "host rule matched");
            let mut result = Classification::new(category.to_string(), Some(1.0));
            result.extra.insert("matched".into(), "host".into());
            return result;
        }

        let url_text = url.to_ascii_lowercase();
        let (title, meta, body) = match html {
            Some(html) => {
                let html: String = html.chars().take(MAX_HTML_CHARS).collect();
                let lower = html.to_ascii_lowercase();
                (
                    title_of(&lower).unwrap_or_default(),
                    meta_description_of(&lower).unwrap_or_default(),
                    visible_text(&lower),
                )
            }
            None => Default::default(),
        };

        let mut best: Option<(Category, usize)> = None;
        let mut total = 0usize;
        for (category, words) in KEYWORDS {
            let score: usize = words
                .iter()
                .map(|w| {
                    count(&title, w) * TITLE_WEIGHT
                        + count(&meta, w) * META_WEIGHT
                        + count(&url_text, w) * URL_WEIGHT
                        + count(&body, w) * BODY_WEIGHT
                })
                .sum();
            total += score;
            // Strictly greater keeps the earlier category on ties.
            if score > 0 && best.is_none_or(|(_, s)| score > s) {
                best = Some((*category, score));
            }
        }

        match best {
            Some((category, score)) => {
                let mut result =
                    Classification::new(category.to_string(), Some(score as f32 / total as f32));
                result.extra.insert("matched".into(), "keywords".into());
                result
            }
            None => Classification::new(Category::Other.to_string(), None),
        }
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn categories(&self) -> Vec<String> {
        Category::names()
    }

    async fn classify(
        &self,
        url: &str,
        html: Option<&str>,
    ) -> Result<Classification, ClassifierError> {
        Ok(self.classify_page(url, html))
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

/// Occurrences of `needle` in `haystack` that start and end on a word boundary.
fn count(haystack: &str, needle: &str) -> usize {
    if haystack.is_empty() || needle.is_empty() {
        return 0;
    }
    haystack
        .match_indices(needle)
        .filter(|(pos, _)| {
            let before = haystack[..*pos].chars().next_back();
            let after = haystack[pos + needle.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn match_host(host: &str) -> Option<Category> {
    HOST_RULES.iter().find_map(|(domain, category)| {
        let is_match = host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'));
        is_match.then_some(*category)
    })
}

/// Lower-cased host of `url`, without scheme, credentials or port.
fn host_of(url: &str) -> String {
    let rest = url.trim();
    let rest = rest.split_once("://").map_or(rest, |(_, r)| r);
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = authority.split(':').next().unwrap_or_default().to_ascii_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_owned()
}

fn title_of(html: &str) -> Option<String> {
    let start = find_tag(html, "<title")?;
    let open_end = start + html[start..].find('>')? + 1;
    let close = open_end + html[open_end..].find("</title")?;
    Some(html[open_end..close].trim().to_owned())
}

/// Byte offset of the first `tag` opener whose name ends there, so `<title`
/// does not match `<titlebar`.
fn find_tag(html: &str, tag: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = html[from..].find(tag) {
        let start = from + pos;
        let end = start + tag.len();
        match html[end..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            Some(_) => from = end,
            None => return None,
        }
    }
    None
}

fn meta_description_of(html: &str) -> Option<String> {
    let mut rest = html;
    while let Some(pos) = rest.find("<meta") {
        let tag_end = rest[pos..].find('>').map_or(rest.len(), |e| pos + e);
        let tag = &rest[pos..tag_end];
        if tag.contains("name=\"description\"") || tag.contains("property=\"og:description\"") {
            if let Some(c) = tag.find("content=\"") {
                let value = &tag[c + "content=\"".len()..];
                return Some(value.split('"').next().unwrap_or_default().to_owned());
            }
        }
        rest = &rest[tag_end..];
    }
    None
}

/// Text outside of tags, with `<script>` and `<style>` blocks removed.
///
/// Expects lower-cased input.
fn visible_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut i = 0;
    while i < html.len() {
        let rest = &html[i..];
        if rest.starts_with('<') {
            let close = if rest.starts_with("<script") {
                Some("</script>")
            } else if rest.starts_with("<style") {
                Some("</style>")
            } else {
                None
            };
            let end = match close {
                Some(close) => rest.find(close).map(|p| p + close.len()),
                None => rest.find('>').map(|p| p + 1),
            };
            match end {
                Some(end) => {
                    i += end;
                    out.push(' ');
                }
                None => break,
            }
        } else {
            let next = rest.find('<').unwrap_or(rest.len());
            out.push_str(&rest[..next]);
            i += next;
        }
    }
    out
}
