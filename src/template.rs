use std::collections::HashMap;
use std::fmt;
use std::path;

use anyhow::Context as _;
use plume_core::Source;
use plume_core::SourcePath;

use crate::error::Result;

pub const PAGE_TEMPLATE: &str = "page.html";
pub const BLOG_TEMPLATE: &str = "blog.html";
pub const INDEX_TEMPLATE: &str = "index.html";
pub const TAGS_TEMPLATE: &str = "tags.html";
pub const DEV_TEMPLATE: &str = "dev.html";
pub const POST_TEMPLATE: &str = "content.md";

/// Renders a named template against a context.
pub trait TemplateEngine {
    fn render(&self, name: &str, context: &liquid::Object) -> Result<String>;
}

/// What a template produces, as declared by its name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Html,
    Markdown,
}

impl TemplateKind {
    pub fn for_name(name: &str) -> Self {
        if name.ends_with("html") {
            Self::Html
        } else {
            Self::Markdown
        }
    }

    /// File written inside each output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Html => "index.html",
            Self::Markdown => "index.md",
        }
    }
}

/// Template for a content file, chosen by its first directory under the content root.
pub fn template_for(source: &SourcePath) -> &'static str {
    match source.section() {
        Some("blog") => BLOG_TEMPLATE,
        Some("pages") => PAGE_TEMPLATE,
        _ => PAGE_TEMPLATE,
    }
}

type Partials = liquid::partials::LazyCompiler<liquid::partials::InMemorySource>;

/// Liquid templates loaded from a directory.
///
/// Every template is also available to `{% include %}` under its path relative to that directory.
pub struct Liquid {
    parser: liquid::Parser,
    templates: HashMap<String, String>,
}

impl Liquid {
    pub fn load(root: &path::Path) -> Result<Self> {
        let mut templates = HashMap::new();
        if root.is_dir() {
            log::debug!("Loading templates from `{}`", root.display());
            let source = Source::content(root)?;
            for file in source.iter() {
                let Some(file) = SourcePath::from_root(root, &file) else {
                    continue;
                };
                log::trace!("Loading template `{}`", file.rel_path);
                let content = std::fs::read_to_string(&file.abs_path).with_context(|| {
                    format!("Failed to read template {}", file.abs_path.display())
                })?;
                templates.insert(file.rel_path.into_string(), content);
            }
        } else {
            log::warn!("No templates directory found at {}", root.display());
        }
        Self::with_templates(templates)
    }

    pub fn with_templates<I, K, V>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let templates: HashMap<String, String> = templates
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut partials = Partials::empty();
        for (name, content) in &templates {
            partials.add(name.clone(), content.clone());
        }
        let parser = liquid::ParserBuilder::with_stdlib()
            .filter(liquid_lib::jekyll::Slugify)
            .filter(liquid_lib::jekyll::Pop)
            .filter(liquid_lib::jekyll::Push)
            .filter(liquid_lib::jekyll::Shift)
            .filter(liquid_lib::jekyll::Unshift)
            .filter(liquid_lib::jekyll::ArrayToSentenceString)
            .filter(liquid_lib::shopify::Pluralize)
            .filter(liquid_lib::extra::DateInTz)
            .partials(partials)
            .build()?;
        Ok(Self { parser, templates })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl TemplateEngine for Liquid {
    fn render(&self, name: &str, context: &liquid::Object) -> Result<String> {
        let source = self
            .templates
            .get(name)
            .with_context(|| format!("Template `{name}` not found"))?;
        let template = self
            .parser
            .parse(source)
            .with_context(|| format!("Failed to parse template `{name}`"))?;
        let rendered = template
            .render(context)
            .with_context(|| format!("Failed to render template `{name}`"))?;
        Ok(rendered)
    }
}

impl fmt::Debug for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Liquid")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn source(rel: &str) -> SourcePath {
        let root = path::Path::new("/site/content");
        SourcePath::from_root(root, &root.join(rel)).unwrap()
    }

    #[test]
    fn template_by_section() {
        assert_eq!(template_for(&source("blog/hello.md")), "blog.html");
        assert_eq!(template_for(&source("blog/hello/index.md")), "blog.html");
        assert_eq!(template_for(&source("pages/about.md")), "page.html");
        assert_eq!(template_for(&source("misc/thing.md")), "page.html");
        assert_eq!(template_for(&source("about.md")), "page.html");
    }

    #[test]
    fn kind_by_name() {
        assert_eq!(TemplateKind::for_name("index.html"), TemplateKind::Html);
        assert_eq!(TemplateKind::for_name("feed.xhtml"), TemplateKind::Html);
        assert_eq!(TemplateKind::for_name("content.md"), TemplateKind::Markdown);
        assert_eq!(TemplateKind::Html.file_name(), "index.html");
        assert_eq!(TemplateKind::Markdown.file_name(), "index.md");
    }

    #[test]
    fn renders_with_include() {
        let engine = Liquid::with_templates([
            ("page.html", "{% include 'header.html' %}<p>{{ title }}</p>"),
            ("header.html", "<h1>{{ site.title }}</h1>"),
        ])
        .unwrap();
        let context = liquid::object!({
            "title": "Hello",
            "site": { "title": "Blog" },
        });
        let rendered = engine.render("page.html", &context).unwrap();
        assert_eq!(rendered, "<h1>Blog</h1><p>Hello</p>");
    }

    #[test]
    fn missing_template_names_it() {
        let engine = Liquid::with_templates(Vec::<(String, String)>::new()).unwrap();
        let err = engine
            .render("blog.html", &liquid::Object::new())
            .unwrap_err();
        assert!(err.to_string().contains("blog.html"), "{err}");
    }

    #[test]
    fn syntax_error_names_template() {
        let engine = Liquid::with_templates([("page.html", "{% if %}")]).unwrap();
        let err = engine
            .render("page.html", &liquid::Object::new())
            .unwrap_err();
        assert!(err.to_string().contains("page.html"), "{err}");
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("partials")).unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "{% include 'partials/nav.html' %}{{ subtitle }}",
        )
        .unwrap();
        std::fs::write(dir.path().join("partials/nav.html"), "nav|").unwrap();

        let engine = Liquid::load(dir.path()).unwrap();
        assert!(engine.has_template("index.html"));
        let context = liquid::object!({ "subtitle": "Latest posts..." });
        assert_eq!(
            engine.render("index.html", &context).unwrap(),
            "nav|Latest posts..."
        );
    }

    #[test]
    fn load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Liquid::load(&dir.path().join("nope")).unwrap();
        assert!(!engine.has_template("index.html"));
    }
}
