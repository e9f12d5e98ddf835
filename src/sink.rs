//! Asset delivery sink
//!
//! The four side-effecting delivery primitives plus the two write-tag
//! variants used during the initial synchronous parse. Keeping them
//! behind a trait lets the ordered loader run against a real page, a
//! buffer, or a recording double in tests.

use futures_util::future::{ready, BoxFuture};
use futures_util::FutureExt;
use std::sync::Mutex;

/// Completion of a written tag's own load
///
/// Resolves when the tag injected by a write-tag delivery has finished
/// loading; the loader uses it to schedule the lazy cache save.
pub type TagLoad = BoxFuture<'static, ()>;

/// Abstract delivery target for resolved assets
pub trait AssetSink: Send + Sync {
    /// Inject a stylesheet link referencing the original URL
    fn inject_link(&self, file: &str);

    /// Inject a script tag referencing the original URL
    fn inject_script(&self, file: &str);

    /// Apply stylesheet text inline
    fn exec_inline_style(&self, content: &str);

    /// Execute script text inline
    fn exec_inline_script(&self, content: &str);

    /// Synchronously write a stylesheet tag during initial parse
    fn write_style_tag(&self, file: &str) -> TagLoad;

    /// Synchronously write a script tag during initial parse
    fn write_script_tag(&self, file: &str) -> TagLoad;
}

/// Sink that renders every delivery as HTML markup into a buffer
///
/// Tag loads complete immediately: the buffer has no asynchronous load
/// phase to wait for.
pub struct HtmlSink {
    parts: Mutex<Vec<String>>,
}

impl HtmlSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            parts: Mutex::new(Vec::new()),
        }
    }

    /// Render the accumulated fragment, one delivery per line
    pub fn render(&self) -> String {
        self.parts.lock().unwrap().join("\n")
    }

    fn push(&self, part: String) {
        self.parts.lock().unwrap().push(part);
    }
}

impl Default for HtmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSink for HtmlSink {
    fn inject_link(&self, file: &str) {
        self.push(format!(r#"<link href="{}" rel="stylesheet">"#, file));
    }

    fn inject_script(&self, file: &str) {
        self.push(format!(r#"<script src="{}"></script>"#, file));
    }

    fn exec_inline_style(&self, content: &str) {
        self.push(format!("<style>{}</style>", content));
    }

    fn exec_inline_script(&self, content: &str) {
        self.push(format!("<script>{}</script>", content));
    }

    fn write_style_tag(&self, file: &str) -> TagLoad {
        self.inject_link(file);
        ready(()).boxed()
    }

    fn write_script_tag(&self, file: &str) -> TagLoad {
        self.inject_script(file);
        ready(()).boxed()
    }
}
