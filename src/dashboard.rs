use crate::logging::log_warning;
use std::borrow::Cow;
use std::path::PathBuf;

pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// Where the `/` page comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dashboard {
    Embedded,
    /// A file on the mounted flash filesystem.
    File(PathBuf),
}

impl Dashboard {
    /// Page body. An unreadable file falls back to the embedded copy so `/`
    /// never answers empty.
    pub fn render(&self) -> Cow<'static, [u8]> {
        match self {
            Self::Embedded => Cow::Borrowed(INDEX_HTML.as_bytes()),
            Self::File(path) => match std::fs::read(path) {
                Ok(bytes) if !bytes.is_empty() => Cow::Owned(bytes),
                Ok(_) => {
                    log_warning(&format!("{} is empty, serving built-in page", path.display()));
                    Cow::Borrowed(INDEX_HTML.as_bytes())
                }
                Err(e) => {
                    log_warning(&format!(
                        "Failed to read {}: {}, serving built-in page",
                        path.display(),
                        e
                    ));
                    Cow::Borrowed(INDEX_HTML.as_bytes())
                }
            },
        }
    }
}
