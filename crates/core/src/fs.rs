use relative_path::RelativePath;
use relative_path::RelativePathBuf;

/// A discovered content file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePath {
    pub abs_path: std::path::PathBuf,
    pub rel_path: RelativePathBuf,
}

impl SourcePath {
    pub fn from_root(root: &std::path::Path, path: &std::path::Path) -> Option<Self> {
        let abs_path = path.to_owned();
        let rel_path = path.strip_prefix(root).ok()?;
        let rel_path = RelativePathBuf::from_path(rel_path).ok()?;
        Some(Self { abs_path, rel_path })
    }

    /// First directory under the content root, `None` for files at the root.
    pub fn section(&self) -> Option<&str> {
        let mut components = self.rel_path.components();
        let first = components.next()?;
        components.next()?;
        Some(first.as_str())
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        self.rel_path.file_stem().unwrap_or_default()
    }

    pub fn is_markdown(&self) -> bool {
        is_markdown(&self.rel_path)
    }
}

fn is_markdown(path: &RelativePath) -> bool {
    path.extension() == Some("md")
}
