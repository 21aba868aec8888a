//! Files copied into the output untouched.

use std::path;

use anyhow::Context as _;
use plume_config::Config;

use crate::error::Result;

pub const STATIC_OUTPUT: &str = "static";
pub const TEXTS_DIR: &str = "texts";
pub const CNAME_FILE: &str = "CNAME";

pub fn copy_file(src_file: &path::Path, dest_file: &path::Path) -> Result<()> {
    if let Some(parent) = dest_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    log::debug!("Copying {} to {}", src_file.display(), dest_file.display());
    std::fs::copy(src_file, dest_file).with_context(|| {
        format!(
            "Could not copy {} into {}",
            src_file.display(),
            dest_file.display()
        )
    })?;
    Ok(())
}

/// Merge the static directory into `<output>/static/`.
pub fn copy_static(config: &Config) -> Result<()> {
    let source = config.static_dir();
    let dest = config.output_dir().join(STATIC_OUTPUT);
    if !source.is_dir() {
        log::warn!("No static directory found, skipping");
        return Ok(());
    }

    log::info!("Copying static files to {}", dest.display());
    for entry in walkdir::WalkDir::new(&source)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Could not read {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(&source)
            .with_context(|| format!("{} is outside {}", entry.path().display(), source.display()))?;
        copy_file(entry.path(), &dest.join(rel_path))?;
    }
    Ok(())
}

/// Copy `<content>/texts/*.txt` to the output root.
pub fn copy_texts(config: &Config) -> Result<()> {
    let source = config.content_dir().join(TEXTS_DIR);
    let dest = config.output_dir();
    if !source.is_dir() {
        log::info!("No texts directory found, skipping");
        return Ok(());
    }

    for entry in walkdir::WalkDir::new(&source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Could not read {}", source.display()))?;
        let name = entry.file_name().to_string_lossy();
        let is_text = entry.path().extension().is_some_and(|ext| ext == "txt");
        if !entry.file_type().is_file() || !is_text || name.starts_with('.') {
            continue;
        }
        log::info!("Copying {} to {}", entry.path().display(), dest.display());
        copy_file(entry.path(), &dest.join(entry.file_name()))?;
    }
    Ok(())
}

/// Copy the project's `CNAME` to the output root.
pub fn copy_cname(config: &Config) -> Result<()> {
    let source = config.root.join(CNAME_FILE);
    if !source.is_file() {
        log::info!("No CNAME file found, skipping");
        return Ok(());
    }
    let dest = config.output_dir().join(CNAME_FILE);
    copy_file(&source, &dest)?;
    log::info!("Copied CNAME to {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn site() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            root: dir.path().to_owned(),
            ..Default::default()
        };
        (dir, config)
    }

    fn write(path: path::PathBuf, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn static_is_merged() {
        let (dir, config) = site();
        write(dir.path().join("static/css/site.css"), "body {}");
        write(dir.path().join("docs/static/old.js"), "old");
        write(dir.path().join("docs/static/css/site.css"), "stale");

        copy_static(&config).unwrap();

        let css = std::fs::read_to_string(dir.path().join("docs/static/css/site.css")).unwrap();
        assert_eq!(css, "body {}");
        assert!(dir.path().join("docs/static/old.js").exists());
    }

    #[test]
    fn missing_sources_are_skipped() {
        let (dir, config) = site();
        copy_static(&config).unwrap();
        copy_texts(&config).unwrap();
        copy_cname(&config).unwrap();
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn texts_go_to_root() {
        let (dir, config) = site();
        write(dir.path().join("content/texts/robots.txt"), "User-agent: *");
        write(dir.path().join("content/texts/notes.md"), "skip");
        write(dir.path().join("content/texts/nested/deep.txt"), "skip");

        copy_texts(&config).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/robots.txt")).unwrap(),
            "User-agent: *"
        );
        assert!(!dir.path().join("docs/notes.md").exists());
        assert!(!dir.path().join("docs/deep.txt").exists());
    }

    #[test]
    fn cname_is_copied() {
        let (dir, config) = site();
        write(dir.path().join("CNAME"), "blog.example.com\n");
        copy_cname(&config).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/CNAME")).unwrap(),
            "blog.example.com\n"
        );
    }
}
