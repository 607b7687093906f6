//! Video URL parsing. Extracts a [`VideoId`] from the URL shapes users paste.
//!
//! The input is scanned for places where a URL can begin (a scheme or a known
//! host). Each candidate is parsed and handed to every matcher; the token that
//! sits earliest in the URL wins. Candidates are tried left to right.

use super::entities::VideoId;
use url::{Position, Url};

/// A token found by a matcher, with its byte offset in the serialized URL.
struct Hit {
    at: usize,
    id: VideoId,
}

impl Hit {
    fn new(at: usize, candidate: &str) -> Option<Self> {
        VideoId::from_prefix(candidate).map(|id| Self { at, id })
    }
}

/// A matcher inspects an already-parsed URL with a canonical host.
type Matcher = fn(host: &str, url: &Url) -> Option<Hit>;

const MATCHERS: &[Matcher] = &[watch_query, short_link, embed_path, shorts_path];

/// Substrings that can open a URL inside free text. Matched case-insensitively.
const START_MARKERS: &[&str] = &[
    "https://",
    "http://",
    "www.",
    "m.youtube.",
    "music.youtube.",
    "youtube.com/",
    "youtube-nocookie.com/",
    "youtu.be/",
];

/// Hosts that serve the main site.
const SITE_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com"];
const SHORT_HOST: &str = "youtu.be";

/// Extract the video identifier from `input`.
///
/// Returns `None` when nothing in the input matches a recognised shape.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    input.split_whitespace().find_map(match_chunk)
}

fn match_chunk(chunk: &str) -> Option<VideoId> {
    candidate_starts(chunk)
        .into_iter()
        .find_map(|at| match_candidate(trim_wrappers(&chunk[at..])))
}

fn match_candidate(candidate: &str) -> Option<VideoId> {
    let url = parse_lenient(candidate)?;
    let host = canonical_host(&url)?;
    MATCHERS
        .iter()
        .filter_map(|matcher| matcher(host, &url))
        .min_by_key(|hit| hit.at)
        .map(|hit| hit.id)
}

/// Byte offsets in `chunk` where a URL may begin, ascending.
fn candidate_starts(chunk: &str) -> Vec<usize> {
    // ASCII lowercasing keeps byte offsets valid for `chunk`.
    let lower = chunk.to_ascii_lowercase();
    let mut starts: Vec<usize> = START_MARKERS
        .iter()
        .flat_map(|marker| lower.match_indices(*marker).map(|(at, _)| at))
        .filter(|&at| opens_candidate(&lower, at))
        .collect();
    starts.sort_unstable();
    starts.dedup();
    starts
}

/// A marker glued to a host or path character continues an earlier URL.
fn opens_candidate(lower: &str, at: usize) -> bool {
    lower[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || matches!(c, '.' | '-' | '/')))
}

/// Strip closing brackets, quotes and sentence punctuation around a pasted link.
fn trim_wrappers(candidate: &str) -> &str {
    candidate.trim_end_matches(|c: char| {
        matches!(
            c,
            ')' | ']' | '}' | '>' | '"' | '\'' | ',' | '.' | ';' | ':' | '!'
        )
    })
}

/// Parse with or without a scheme. Only http(s) is accepted.
fn parse_lenient(candidate: &str) -> Option<Url> {
    let lower = candidate.get(..8).unwrap_or(candidate).to_ascii_lowercase();
    let url = if lower.starts_with("http://") || lower.starts_with("https://") {
        Url::parse(candidate).ok()?
    } else {
        Url::parse(&format!("https://{candidate}")).ok()?
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Host with common subdomain prefixes removed (`www.`, `m.`, `music.`).
fn canonical_host(url: &Url) -> Option<&str> {
    let host = url.host_str()?;
    Some(
        ["www.", "m.", "music."]
            .iter()
            .find_map(|prefix| host.strip_prefix(prefix))
            .unwrap_or(host),
    )
}

fn is_site(host: &str) -> bool {
    SITE_HOSTS.iter().any(|site| *site == host)
}

/// Split `s` on `sep`, pairing each piece with its offset shifted by `base`.
fn offsets(s: &str, sep: char, base: usize) -> impl Iterator<Item = (usize, &str)> {
    s.split(sep).scan(base, move |at, piece| {
        let start = *at;
        *at += piece.len() + sep.len_utf8();
        Some((start, piece))
    })
}

/// Non-empty path segments with their offsets in the serialized URL.
fn path_segments(url: &Url) -> impl Iterator<Item = (usize, &str)> {
    let base = url[..Position::BeforePath].len();
    offsets(url.path(), '/', base).filter(|(_, segment)| !segment.is_empty())
}

/// Raw `key=value` pairs with the offset of each value in the serialized URL.
fn query_params(url: &Url) -> impl Iterator<Item = (usize, &str, &str)> {
    let base = url[..Position::BeforeQuery].len();
    offsets(url.query().unwrap_or_default(), '&', base).filter_map(|(at, pair)| {
        let (key, value) = pair.split_once('=')?;
        Some((at + key.len() + 1, key, value))
    })
}

/// `youtube.com/watch?v=<id>` (or any site path carrying a `v` query parameter).
fn watch_query(host: &str, url: &Url) -> Option<Hit> {
    if !is_site(host) {
        return None;
    }
    query_params(url)
        .filter(|(_, key, _)| *key == "v")
        .find_map(|(at, _, value)| Hit::new(at, value))
}

/// `youtu.be/<id>`
fn short_link(host: &str, url: &Url) -> Option<Hit> {
    if host != SHORT_HOST {
        return None;
    }
    path_segments(url)
        .next()
        .and_then(|(at, segment)| Hit::new(at, segment))
}

/// `youtube.com/embed/<id>`, `youtube.com/e/<id>`, `youtube.com/v/<id>`
fn embed_path(host: &str, url: &Url) -> Option<Hit> {
    prefixed_path(host, url, &["embed", "e", "v"])
}

/// `youtube.com/shorts/<id>`, `youtube.com/live/<id>`
fn shorts_path(host: &str, url: &Url) -> Option<Hit> {
    prefixed_path(host, url, &["shorts", "live"])
}

fn prefixed_path(host: &str, url: &Url, prefixes: &[&str]) -> Option<Hit> {
    if !is_site(host) {
        return None;
    }
    let mut segments = path_segments(url);
    let (_, prefix) = segments.next()?;
    if !prefixes.contains(&prefix) {
        return None;
    }
    let (at, id) = segments.next()?;
    Hit::new(at, id)
}
