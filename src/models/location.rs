/// Where an event happened, split the way the router needs it.
///
/// Built from the API's root-relative path by prefixing `/`, so the
/// directory of a top-level entry is `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocation {
    /// Parent directory of the absolute path, trailing separators removed
    pub directory: String,
    /// Final path component
    pub basename: String,
    /// Lowercased extension including the dot, or empty
    pub extension: String,
}

impl EventLocation {
    pub fn from_relative(path: &str) -> Self {
        let full = format!("/{}", path);
        // `full` always contains a separator
        let split = full.rfind('/').map_or(0, |i| i + 1);
        let (head, tail) = full.split_at(split);

        let trimmed = head.trim_end_matches('/');
        let directory = if trimmed.is_empty() { head } else { trimmed };

        Self {
            directory: directory.to_string(),
            basename: tail.to_string(),
            extension: extension_of(tail),
        }
    }
}

/// Extension of a single path component. Leading dots do not start an
/// extension, so `.bashrc` has none while `a.tar.gz` has `.gz`.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name[dot..].to_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_file() {
        let loc = EventLocation::from_relative("proj/out/report.csv");
        assert_eq!(loc.directory, "/proj/out");
        assert_eq!(loc.basename, "report.csv");
        assert_eq!(loc.extension, ".csv");
    }

    #[test]
    fn test_top_level_entry_lives_in_root() {
        let loc = EventLocation::from_relative("notes.txt");
        assert_eq!(loc.directory, "/");
        assert_eq!(loc.basename, "notes.txt");
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(EventLocation::from_relative("a/REPORT.CSV").extension, ".csv");
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(EventLocation::from_relative("a/b.tar.gz").extension, ".gz");
    }

    #[test]
    fn test_dotfiles_have_no_extension() {
        assert_eq!(EventLocation::from_relative("home/.bashrc").extension, "");
        assert_eq!(EventLocation::from_relative("home/..").extension, "");
        assert_eq!(EventLocation::from_relative("home/.config.bak").extension, ".bak");
    }

    #[test]
    fn test_dot_in_directory_is_not_an_extension() {
        let loc = EventLocation::from_relative("conf.d/README");
        assert_eq!(loc.directory, "/conf.d");
        assert_eq!(loc.extension, "");
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(EventLocation::from_relative("a/file.").extension, ".");
    }
}
