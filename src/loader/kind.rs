//! Asset classification and delivery records

/// Asset kind, derived from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Classify a file name by its first `.css` / `.js` occurrence
    ///
    /// Substring match, not suffix: `app.css?v=3` is CSS, and so is the
    /// surprising `style.css.bak`. Kept for compatibility with existing
    /// asset manifests. Names matching neither are not assets.
    pub fn detect(file: &str) -> Option<Self> {
        match (file.find(".css"), file.find(".js")) {
            (Some(css), Some(js)) => Some(if css < js { Self::Css } else { Self::Js }),
            (Some(_), None) => Some(Self::Css),
            (None, Some(_)) => Some(Self::Js),
            (None, None) => None,
        }
    }
}

/// How a resolved asset is applied to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Inline `<style>` with cached or fetched text
    InlineCss,
    /// Inline `<script>` with cached or fetched text
    InlineJs,
    /// `<link>` referencing the original URL (fetch-failure fallback)
    RawCssTag,
    /// `<script src>` referencing the original URL (fetch-failure fallback)
    RawJsTag,
    /// Synchronous document-write of a `<link>` during initial parse
    WriteCssTag,
    /// Synchronous document-write of a `<script>` during initial parse
    WriteJsTag,
}

impl DeliveryMode {
    /// Inline delivery for a kind
    pub fn inline(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Css => Self::InlineCss,
            AssetKind::Js => Self::InlineJs,
        }
    }

    /// Raw-tag fallback for a kind
    pub fn raw(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Css => Self::RawCssTag,
            AssetKind::Js => Self::RawJsTag,
        }
    }

    /// Write-tag fallback for a kind
    pub fn write(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Css => Self::WriteCssTag,
            AssetKind::Js => Self::WriteJsTag,
        }
    }

    /// Whether this is a write-tag delivery
    pub fn is_write(&self) -> bool {
        matches!(self, Self::WriteCssTag | Self::WriteJsTag)
    }
}

/// A sequence slot whose content or fallback is known
///
/// Written once when any resolution path completes, consumed once when
/// the slot is emitted.
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub index: u64,
    pub file: String,
    pub mode: DeliveryMode,
    /// Present only for inline delivery
    pub content: Option<String>,
}

impl ResolvedAsset {
    /// Inline delivery with content
    pub fn inline(index: u64, file: &str, kind: AssetKind, content: String) -> Self {
        Self {
            index,
            file: file.to_string(),
            mode: DeliveryMode::inline(kind),
            content: Some(content),
        }
    }

    /// Raw-tag fallback
    pub fn raw(index: u64, file: &str, kind: AssetKind) -> Self {
        Self {
            index,
            file: file.to_string(),
            mode: DeliveryMode::raw(kind),
            content: None,
        }
    }

    /// Write-tag fallback
    pub fn write(index: u64, file: &str, kind: AssetKind) -> Self {
        Self {
            index,
            file: file.to_string(),
            mode: DeliveryMode::write(kind),
            content: None,
        }
    }
}
