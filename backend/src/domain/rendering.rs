//! Document rendering by file kind.
//!
//! The extension is resolved once into a closed [`DocumentKind`]; unknown
//! extensions take the explicit [`DocumentKind::Unsupported`] path and are
//! served as opaque bytes.

use pulldown_cmark::{html, Options, Parser};

use super::document::extension_of;

/// Content type used for pages rendered inside the HTML layout.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
/// Content type for plain-text documents served verbatim.
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain";
/// Content type for documents with an unrecognised extension.
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Renderer selected from a document's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.txt`
    PlainText,
    /// `.md`
    Markdown,
    /// Anything else, including names without an extension.
    Unsupported,
}

impl DocumentKind {
    /// Resolve the kind from a file name, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_name("notes.MD"), DocumentKind::Markdown);
    /// assert_eq!(DocumentKind::from_name("about.txt"), DocumentKind::PlainText);
    /// assert_eq!(DocumentKind::from_name("photo.png"), DocumentKind::Unsupported);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match extension_of(name) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => Self::Markdown,
            Some(ext) if ext.eq_ignore_ascii_case("txt") => Self::PlainText,
            _ => Self::Unsupported,
        }
    }
}

/// Displayable form of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedDocument {
    /// HTML fragment meant to be embedded in the page layout.
    Html(String),
    /// Raw bytes served as `text/plain`.
    PlainText(Vec<u8>),
    /// Raw bytes served as `application/octet-stream`.
    Opaque(Vec<u8>),
}

impl RenderedDocument {
    /// Content type the response should carry.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Html(_) => HTML_CONTENT_TYPE,
            Self::PlainText(_) => PLAIN_TEXT_CONTENT_TYPE,
            Self::Opaque(_) => OCTET_STREAM_CONTENT_TYPE,
        }
    }
}

/// Render `content` according to the kind implied by `name`.
pub fn render(name: &str, content: Vec<u8>) -> RenderedDocument {
    match DocumentKind::from_name(name) {
        DocumentKind::Markdown => RenderedDocument::Html(markdown_to_html(&content)),
        DocumentKind::PlainText => RenderedDocument::PlainText(content),
        DocumentKind::Unsupported => RenderedDocument::Opaque(content),
    }
}

fn markdown_to_html(content: &[u8]) -> String {
    let source = String::from_utf8_lossy(content);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(&source, options);
    let mut out = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut out, parser);
    out
}
