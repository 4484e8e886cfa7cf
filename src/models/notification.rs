use std::fmt;

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    NewFile,
    NewDirectory,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewFile => "new-file",
            NotificationKind::NewDirectory => "new-directory",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink-agnostic notification, built by the router and consumed once by
/// a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub kind: NotificationKind,
    pub basename: String,
    pub directory: String,
    /// Tail of the file content; only present for new-file notifications
    pub snippet: Option<String>,
}

impl NotificationPayload {
    pub fn new_file(
        basename: impl Into<String>,
        directory: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::NewFile,
            basename: basename.into(),
            directory: directory.into(),
            snippet: Some(snippet.into()),
        }
    }

    pub fn new_directory(basename: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::NewDirectory,
            basename: basename.into(),
            directory: directory.into(),
            snippet: None,
        }
    }

    /// One-line summary shared by every sink.
    pub fn headline(&self) -> String {
        match self.kind {
            NotificationKind::NewFile => {
                format!("📄 *New file* `{}` in `{}`", self.basename, self.directory)
            }
            NotificationKind::NewDirectory => format!(
                "📂 *New directory created* `{}` in `{}`",
                self.basename, self.directory
            ),
        }
    }
}
