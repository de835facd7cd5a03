//! Social link icon registry.
//!
//! Social links store a free-text icon key that the client resolves against
//! its icon set. Parsing the key through [`IconName`] makes the lookup
//! explicit: either a [`KnownIcon`] or an `Unknown` variant carrying the raw
//! text, so a missing glyph is a visible state rather than a silent swap.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Icons the client icon set is known to provide.
///
/// Canonical names follow the client's PascalCase convention (`MessageCircle`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownIcon {
    Codepen,
    Dribbble,
    Facebook,
    Figma,
    Github,
    Gitlab,
    Globe,
    Instagram,
    Link,
    Linkedin,
    Mail,
    MessageCircle,
    Phone,
    Rss,
    Send,
    Twitch,
    Twitter,
    Youtube,
}

impl KnownIcon {
    /// Every registered icon, in canonical-name order.
    pub const ALL: [Self; 18] = [
        Self::Codepen,
        Self::Dribbble,
        Self::Facebook,
        Self::Figma,
        Self::Github,
        Self::Gitlab,
        Self::Globe,
        Self::Instagram,
        Self::Link,
        Self::Linkedin,
        Self::Mail,
        Self::MessageCircle,
        Self::Phone,
        Self::Rss,
        Self::Send,
        Self::Twitch,
        Self::Twitter,
        Self::Youtube,
    ];

    /// Glyph a client should draw when the stored name is not registered.
    pub const FALLBACK: Self = Self::Link;

    /// Canonical registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Codepen => "Codepen",
            Self::Dribbble => "Dribbble",
            Self::Facebook => "Facebook",
            Self::Figma => "Figma",
            Self::Github => "Github",
            Self::Gitlab => "Gitlab",
            Self::Globe => "Globe",
            Self::Instagram => "Instagram",
            Self::Link => "Link",
            Self::Linkedin => "Linkedin",
            Self::Mail => "Mail",
            Self::MessageCircle => "MessageCircle",
            Self::Phone => "Phone",
            Self::Rss => "Rss",
            Self::Send => "Send",
            Self::Twitch => "Twitch",
            Self::Twitter => "Twitter",
            Self::Youtube => "Youtube",
        }
    }

    /// Look up an icon by name.
    ///
    /// Matching ignores case and `-`, `_` and space separators, so
    /// `message-circle`, `message_circle` and `MessageCircle` all resolve.
    #[must_use]
    pub fn lookup(raw: &str) -> Option<Self> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|icon| normalize(icon.name()) == wanted)
    }
}

impl fmt::Display for KnownIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for KnownIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A stored icon key, resolved against the registry.
///
/// Known keys serialize under their canonical name; unknown keys keep the raw
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconName {
    /// The key names a registered icon.
    Known(KnownIcon),
    /// The key is not registered; the raw text is kept as-is.
    Unknown(String),
}

impl IconName {
    /// Resolve a raw key against the registry.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        KnownIcon::lookup(raw).map_or_else(|| Self::Unknown(raw.to_owned()), Self::Known)
    }

    /// The icon to draw: the registered icon, or [`KnownIcon::FALLBACK`].
    #[must_use]
    pub const fn resolved(&self) -> KnownIcon {
        match self {
            Self::Known(icon) => *icon,
            Self::Unknown(_) => KnownIcon::FALLBACK,
        }
    }

    /// Whether the key names a registered icon.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The key as it should be stored and shown.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(icon) => icon.name(),
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IconName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IconName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
