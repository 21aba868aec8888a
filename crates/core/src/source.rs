use crate::Result;
use crate::SourcePath;
use crate::Status;

/// Patterns skipped by [`Source::content`].
pub const HIDDEN: [&str; 1] = [".*"];

/// A directory tree of input files.
#[derive(Debug, Clone)]
pub struct Source {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore.add_line(None, line).map_err(|e| {
                Status::new("Invalid ignore entry")
                    .with_source(e)
                    .context_with(|c| c.insert("Entry", line.to_owned()))
            })?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| Status::new("Invalid ignore entry").with_source(e))?;

        let source = Self {
            root: root.to_owned(),
            ignore,
        };
        Ok(source)
    }

    /// Content tree with hidden files and directories skipped.
    pub fn content(root: &std::path::Path) -> Result<Self> {
        Self::new(root, HIDDEN)
    }

    pub fn includes_file(&self, file: &std::path::Path) -> bool {
        let is_dir = false;
        self.includes_path(file, is_dir)
    }

    pub fn includes_dir(&self, dir: &std::path::Path) -> bool {
        let is_dir = true;
        self.includes_path(dir, is_dir)
    }

    /// Every included file, sorted by name within each directory.
    ///
    /// A missing root yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = std::path::PathBuf> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(move |e| e.path().to_path_buf())
    }

    /// The `.md` files of [`Source::iter`], in the same order.
    pub fn markdown_files(&self) -> impl Iterator<Item = SourcePath> + '_ {
        self.iter()
            .filter_map(move |path| SourcePath::from_root(&self.root, &path))
            .filter(|path| path.is_markdown())
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        if path == self.root {
            return true;
        }

        let parent = path.parent();
        if let Some(parent) = parent {
            if parent.starts_with(&self.root) && !self.includes_path(parent, true) {
                return false;
            }
        }

        self.includes_path_leaf(path, is_dir)
    }

    fn includes_path_leaf(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        let file = entry.path();

        // Parents were already filtered by the walk.
        let is_dir = entry.file_type().is_dir();
        self.includes_path_leaf(file, is_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_includes_dir {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores.clone();
            let files = Source::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_dir(std::path::Path::new($test)), $included);
        };
    }
    macro_rules! assert_includes_file {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores.clone();
            let files = Source::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_file(std::path::Path::new($test)), $included);
        };
    }

    fn touch(root: &std::path::Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn includes_root_dir() {
        assert_includes_dir!("/srv/plume/content", &[], "/srv/plume/content", true);
    }

    #[test]
    fn hidden_file_is_skipped() {
        assert_includes_file!(
            "/srv/plume/content",
            &[".*"],
            "/srv/plume/content/.draft.md",
            false
        );
    }

    #[test]
    fn hidden_dir_hides_children() {
        assert_includes_file!(
            "/srv/plume/content",
            &[".*"],
            "/srv/plume/content/.git/notes.md",
            false
        );
        assert_includes_dir!(
            "/srv/plume/content",
            &[".*"],
            "/srv/plume/content/.git",
            false
        );
    }

    #[test]
    fn hidden_ancestor_of_root_is_ignored() {
        assert_includes_file!(
            "/tmp/.cache/site/content",
            &[".*"],
            "/tmp/.cache/site/content/blog/post.md",
            true
        );
    }

    #[test]
    fn markdown_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "blog/b.md");
        touch(root, "blog/a.md");
        touch(root, "blog/.hidden.md");
        touch(root, ".drafts/c.md");
        touch(root, "pages/about.md");
        touch(root, "texts/robots.txt");
        touch(root, "index.md");

        let source = Source::content(root).unwrap();
        let found: Vec<_> = source
            .markdown_files()
            .map(|p| p.rel_path.as_str().to_owned())
            .collect();
        assert_eq!(
            found,
            vec!["blog/a.md", "blog/b.md", "index.md", "pages/about.md"]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::content(&dir.path().join("nope")).unwrap();
        assert_eq!(source.markdown_files().count(), 0);
    }
}
