//! Accepted upload media types.

/// Accepted content types for one upload path and the file extension each maps to.
#[derive(Debug, Clone, Copy)]
pub struct MediaPolicy {
    entries: &'static [(&'static str, &'static str)],
}

/// Video uploads: MP4 only.
pub const VIDEO_POLICY: MediaPolicy = MediaPolicy {
    entries: &[("video/mp4", "mp4")],
};

/// Thumbnail uploads.
pub const THUMBNAIL_POLICY: MediaPolicy = MediaPolicy {
    entries: &[("image/jpeg", "jpg"), ("image/png", "png")],
};

impl MediaPolicy {
    /// Look up a declared `Content-Type` header value.
    ///
    /// Parameters (`; codecs=...`) are ignored and the comparison is
    /// case-insensitive. Returns the canonical media type and its extension.
    pub fn lookup(&self, declared: &str) -> Option<(&'static str, &'static str)> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        self.entries
            .iter()
            .find(|(media_type, _)| media_type.eq_ignore_ascii_case(essence))
            .copied()
    }

    /// Accepted media types, in table order.
    pub fn media_types(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(media_type, _)| *media_type)
    }
}
