//! Avatar URLs for the picture column of the public table.

use sha2::{Digest, Sha256};

/// Maps an attendee email to an avatar image URL.
///
/// Implementations must be pure: the same email always yields the same URL,
/// otherwise cached tables would not be reproducible.
pub trait AvatarResolver: Send + Sync {
    fn avatar_url(&self, email: &str) -> String;
}

/// Resolves avatars through Gravatar.
///
/// Emails are trimmed, lowercased and hashed with SHA-256. Gravatar serves
/// the `default_image` for hashes it does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravatarResolver {
    base_url: String,
    size: u16,
    default_image: String,
}

impl GravatarResolver {
    /// Host serving the images; also the only image source the CSP allows.
    pub const HOST: &'static str = "https://secure.gravatar.com";

    pub const DEFAULT_SIZE: u16 = 24;
    pub const DEFAULT_IMAGE: &'static str = "wavatar";

    /// Creates a resolver for the given pixel size and Gravatar default
    /// image keyword (`wavatar`, `identicon`, `mp`, ...).
    pub fn new(size: u16, default_image: impl Into<String>) -> Self {
        Self {
            base_url: format!("{}/avatar/", Self::HOST),
            size,
            default_image: default_image.into(),
        }
    }

    fn hash(email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        hex::encode(Sha256::digest(normalized.as_bytes()))
    }
}

impl Default for GravatarResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_IMAGE)
    }
}

impl AvatarResolver for GravatarResolver {
    fn avatar_url(&self, email: &str) -> String {
        format!(
            "{}{}?s={}&d={}",
            self.base_url,
            Self::hash(email),
            self.size,
            self.default_image
        )
    }
}
