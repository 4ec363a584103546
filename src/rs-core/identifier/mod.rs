use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::wasm_bindgen;

/// Matches the URL shapes a YouTube video can be shared with, capturing the video id.
static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
        .expect("invalid YouTube URL pattern")
});

/// A bare YouTube video id.
static YOUTUBE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("invalid YouTube id pattern"));

static TWITCH_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:twitch\.tv/)([A-Za-z0-9_]+)").expect("invalid Twitch URL pattern")
});

/// Platform a `MediaReference` points to.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    YouTube = 0,
    Twitch = 1,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Platform::YouTube => "youtube",
                Platform::Twitch => "twitch",
            }
        )
    }
}

/// Identify the content to embed: a YouTube video or a Twitch channel.
///
/// A `MediaReference` can only be built from an input from which an identifier could be
/// extracted, its `id` is thus never empty. It is never mutated: loading another content means
/// building a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaReference {
    platform: Platform,
    id: String,
}

impl MediaReference {
    /// Build a reference to a YouTube video from a pasted URL or bare video id.
    ///
    /// Returns `None` if no video id could be extracted from `input`.
    pub fn youtube(input: &str) -> Option<Self> {
        extract_youtube_id(input).map(|id| Self {
            platform: Platform::YouTube,
            id,
        })
    }

    /// Build a reference to a Twitch channel from a pasted URL or bare channel name.
    ///
    /// Returns `None` if `input` is empty or only made of whitespace.
    pub fn twitch(input: &str) -> Option<Self> {
        let id = extract_twitch_channel(input);
        if id.is_empty() {
            None
        } else {
            Some(Self {
                platform: Platform::Twitch,
                id,
            })
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.id)
    }
}

/// Extract a YouTube video id from a `youtube.com/watch?v=`, `youtu.be/` or
/// `youtube.com/embed/` URL, or from a bare 11-character id.
///
/// URL shapes are tried first, in that order. Returns `None` when nothing matched, in which
/// case no playback should be attempted.
pub fn extract_youtube_id(input: &str) -> Option<String> {
    let input = input.trim();
    if let Some(caps) = YOUTUBE_URL.captures(input) {
        return Some(caps[1].to_string());
    }
    if YOUTUBE_ID.is_match(input) {
        return Some(input.to_string());
    }
    None
}

/// Extract a Twitch channel name from a `twitch.tv/` URL (case-insensitive).
///
/// Never fails: when no URL is recognized, the trimmed input is considered to already be a
/// channel name. An empty input thus gives an empty channel name.
pub fn extract_twitch_channel(input: &str) -> String {
    let input = input.trim();
    match TWITCH_URL.captures(input) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}
