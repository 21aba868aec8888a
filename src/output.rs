use std::path;

use anyhow::Context as _;

use crate::error::Result;
use crate::template::TemplateEngine;
use crate::template::TemplateKind;

/// Directory under `root` for a site URL.
///
/// Only plain components are kept, so `.`, `..` and absolute prefixes never leave `root`.
pub fn url_dir(root: &path::Path, url: &str) -> path::PathBuf {
    let mut dir = root.to_path_buf();
    for component in path::Path::new(url.trim_matches('/')).components() {
        if let path::Component::Normal(part) = component {
            dir.push(part);
        }
    }
    dir
}

/// Write `content`, creating parent directories and replacing any previous file.
pub fn write_file(path: &path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Write a rendered page as `index.html` or `index.md` inside `dir`.
pub fn write_page(dir: &path::Path, kind: TemplateKind, content: &str) -> Result<path::PathBuf> {
    let path = dir.join(kind.file_name());
    write_file(&path, content)?;
    Ok(path)
}

/// Render `template` and write it inside `dir`.
pub fn render(
    engine: &dyn TemplateEngine,
    dir: &path::Path,
    template: &str,
    context: &liquid::Object,
) -> Result<path::PathBuf> {
    let content = engine.render(template, context)?;
    write_page(dir, TemplateKind::for_name(template), &content)
}
