//! Release channel enumeration.

use std::fmt;

/// Fedora CoreOS release channels ("streams").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Production releases.
    #[default]
    Stable,
    /// Preview of the next stable release.
    Testing,
    /// Preview of the next major release.
    Next,
}

impl Channel {
    /// Build the stream metadata URL for this channel under `base_url`.
    pub fn stream_url(&self, base_url: &str) -> String {
        format!("{}/streams/{}.json", base_url.trim_end_matches('/'), self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Stable => write!(f, "stable"),
            Channel::Testing => write!(f, "testing"),
            Channel::Next => write!(f, "next"),
        }
    }
}
