//! Identifier patterns, normalizers and the URL relevance test

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Profile or company page on the professional network
pub(crate) static PROFILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)https?://(?:www\.)?linkedin\.com/(?:in|company)/([a-zA-Z0-9_-]+)/?(?:\?[^\s]*)?",
    )
    .unwrap()
});

static PROFILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/(in|company)/([a-zA-Z0-9_-]+)").unwrap()
});

/// ASCII word boundaries, so an address glued to accented text still matches
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)").unwrap()
});

/// North American groupings, or `+`-prefixed international groupings
pub(crate) static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
        r"|\+[0-9]{1,4}[-.\s]?(?:\([0-9]{1,4}\)[-.\s]?)?[0-9]{1,4}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,9}",
    ))
    .unwrap()
});

static ANY_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap());

/// Hosts never reported as "other" URLs: social, messaging, video, search.
/// Matched as a prefix of everything after `://`, with or without `www.`.
const DENIED_HOSTS: &[&str] = &[
    "linkedin.com",
    "wa.me",
    "api.whatsapp.com",
    "chat.whatsapp.com",
    "youtube.com",
    "youtu.be",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
    "tiktok.com",
    "google.com",
    "goo.gl",
];

/// Portfolio and professional platforms, accepted regardless of shape
const PORTFOLIO_DOMAINS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "dribbble.com",
    "behance.net",
    "medium.com",
    "dev.to",
    "notion.so",
    "notion.site",
    "substack.com",
    "wordpress.com",
    "wix.com",
    "squarespace.com",
    "about.me",
    "bio.link",
    "linktr.ee",
    "linktree.com",
    "calendly.com",
    "crunchbase.com",
    "angel.co",
    "wellfound.com",
    "pitchbook.com",
    "bloomberg.com",
];

const SHORTENER_DOMAINS: &[&str] = &["bit.ly"];

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Whether a link points at a profile or a company page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    Profile,
    Company,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Profile => "profile",
            ProfileType::Company => "company",
        }
    }

    /// Path segment used in the canonical link
    pub fn path_segment(&self) -> &'static str {
        match self {
            ProfileType::Profile => "in",
            ProfileType::Company => "company",
        }
    }
}

/// Username and page type of a profile link, `None` if it is not one
pub fn parse_profile_link(url: &str) -> Option<(String, ProfileType)> {
    let caps = PROFILE_PATH.captures(url)?;
    let profile_type = if caps[1].eq_ignore_ascii_case("company") {
        ProfileType::Company
    } else {
        ProfileType::Profile
    };
    Some((caps[2].to_string(), profile_type))
}

/// Canonical `https://linkedin.com/<in|company>/<username>` form
pub fn canonical_profile_link(username: &str, profile_type: ProfileType) -> String {
    format!(
        "https://linkedin.com/{}/{}",
        profile_type.path_segment(),
        username
    )
}

/// Strip every character except digits and a leading `+`
pub fn normalize_phone(raw: &str) -> String {
    raw.char_indices()
        .filter(|&(idx, c)| c.is_ascii_digit() || (idx == 0 && c == '+'))
        .map(|(_, c)| c)
        .collect()
}

/// Normalized phone number has an acceptable digit count
pub fn has_valid_phone_length(normalized: &str) -> bool {
    let digits = normalized.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Strip one trailing slash
pub fn normalize_url(raw: &str) -> String {
    raw.strip_suffix('/').unwrap_or(raw).to_string()
}

fn is_denied_host(url: &str) -> bool {
    let Some((_, rest)) = url.split_once("://") else {
        return false;
    };
    let rest = rest.to_ascii_lowercase();
    let bare = rest.strip_prefix("www.");
    DENIED_HOSTS.iter().any(|host| {
        rest.starts_with(host) || bare.is_some_and(|bare| bare.starts_with(host))
    })
}

/// All `http(s)` URLs in `content` whose host is not denied.
///
/// A denied candidate does not consume its text: scanning resumes one
/// character past its start, so a URL embedded in a denied one is found.
pub(crate) fn candidate_urls(content: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(m) = ANY_URL.find_at(content, pos) {
        if is_denied_host(m.as_str()) {
            // match always starts with the ASCII 'h' of the scheme
            pos = m.start() + 1;
            continue;
        }
        found.push(m.as_str());
        pos = m.end();
    }

    found
}

/// Portfolio-style or short personal/company domain.
///
/// Unparseable URLs are not relevant.
pub fn is_relevant_url(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let domain = host.to_lowercase().replacen("www.", "", 1);

    if PORTFOLIO_DOMAINS.iter().any(|d| domain.contains(d)) {
        return true;
    }

    domain.split('.').count() <= 3 && !SHORTENER_DOMAINS.iter().any(|d| domain.contains(d))
}

/// Remove every URL substring from `text`
pub(crate) fn strip_urls(text: &str) -> String {
    static URL_TOKEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());
    URL_TOKEN.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_link() {
        assert_eq!(
            parse_profile_link("https://www.linkedin.com/in/jane-doe/?utm_source=share"),
            Some(("jane-doe".to_string(), ProfileType::Profile))
        );
        assert_eq!(
            parse_profile_link("https://linkedin.com/COMPANY/acme"),
            Some(("acme".to_string(), ProfileType::Company))
        );
        assert_eq!(parse_profile_link("https://example.com/in/jane"), None);
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 (415) 555-0123"), "+14155550123");
        assert_eq!(normalize_phone("415.555.0123"), "4155550123");
        assert_eq!(normalize_phone("1+415"), "1415");
    }

    #[test]
    fn test_phone_length_bounds() {
        assert!(!has_valid_phone_length("12345"));
        assert!(has_valid_phone_length("4155550123"));
        assert!(has_valid_phone_length("+441234567890"));
        assert!(!has_valid_phone_length("1234567890123456"));
    }

    #[test]
    fn test_denied_hosts() {
        assert!(is_denied_host("https://www.youtube.com/watch?v=1"));
        assert!(is_denied_host("http://X.com/someone"));
        assert!(is_denied_host("https://linkedin.com/in/jane"));
        assert!(!is_denied_host("https://janedoe.dev"));
    }

    #[test]
    fn test_candidate_urls_skip_denied_but_keep_embedded() {
        let found = candidate_urls("see https://youtu.be/x?next=https://acme.io/deck and https://jane.dev");
        assert_eq!(found, vec!["https://acme.io/deck", "https://jane.dev"]);
    }

    #[test]
    fn test_relevance() {
        assert!(is_relevant_url("https://github.com/jane"));
        assert!(is_relevant_url("https://jane.notion.site/a/b/c"));
        assert!(is_relevant_url("https://www.acme.io/team"));
        assert!(is_relevant_url("https://acme.co.uk"));
        assert!(!is_relevant_url("https://blog.acme.co.uk"));
        assert!(!is_relevant_url("https://a.b.c.acme.com"));
        assert!(!is_relevant_url("https://bit.ly/abc"));
        assert!(!is_relevant_url("https://"));
    }

    #[test]
    fn test_strip_urls() {
        assert_eq!(
            strip_urls("meet https://jane.dev she is great").trim(),
            "meet  she is great"
        );
    }
}
