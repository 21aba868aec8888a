use std::io::BufRead;
use std::io::Write;
use std::path;

use anyhow::Context as _;
use chrono::Datelike as _;
use liquid::model::Value;
use plume_config::CONFIG_FILE;
use plume_config::Config;
use plume_config::DEFAULT_CONFIG;
use plume_config::DateTime;

use crate::error::Result;
use crate::output;
use crate::slug;
use crate::template::POST_TEMPLATE;
use crate::template::TemplateEngine;
use crate::template::TemplateKind;

/// Write the default `config.yaml` into `dest`.
///
/// An existing configuration is never overwritten.
pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<path::PathBuf> {
    create_new_project_for_path(dest.as_ref())
}

fn create_new_project_for_path(dest: &path::Path) -> Result<path::PathBuf> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    let path = dest.join(CONFIG_FILE);
    create_file(&path, DEFAULT_CONFIG)?;
    log::info!("Created {}", path.display());
    Ok(path)
}

fn create_file(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                anyhow::anyhow!("{} already exists!", path.display())
            }
            _ => anyhow::Error::new(e).context(format!("Failed to create {}", path.display())),
        })?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Answers collected for a new blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub date: DateTime,
    pub title: String,
    pub tags: Vec<String>,
    pub description: String,
    pub draft: bool,
}

impl NewPost {
    /// Ask for each field on `output`, reading answers line by line from `input`.
    pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Self> {
        let date = ask(input, output, "Date (default is now): ")?;
        let date = if date.is_empty() {
            DateTime::now()
        } else {
            DateTime::parse(&date).with_context(|| format!("Invalid date `{date}`"))?
        };
        let title = ask(input, output, "Title: ")?;
        let tags = parse_tags(&ask(input, output, "Tags (comma-separated): ")?);
        let description = ask(input, output, "Description: ")?;
        let draft = ask(input, output, "Draft (false): ")? == "true";

        Ok(Self {
            date,
            title,
            tags,
            description,
            draft,
        })
    }

    pub fn slug(&self) -> String {
        slug::slugify(&self.title)
    }

    pub fn url(&self) -> String {
        format!("/blog/{}/", self.slug())
    }

    /// Dated URL the post is also published under, from the UTC date like the archives.
    pub fn alias(&self) -> String {
        format!(
            "/blog/{:04}/{:02}/{:02}/{}/",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.slug()
        )
    }

    pub fn to_object(&self) -> liquid::Object {
        let tags = self
            .tags
            .iter()
            .map(|tag| Value::scalar(tag.clone()))
            .collect();

        let mut object = liquid::Object::new();
        object.insert("date".into(), Value::scalar(self.date.format()));
        object.insert("title".into(), Value::scalar(self.title.clone()));
        object.insert("slug".into(), Value::scalar(self.slug()));
        object.insert("tags".into(), Value::Array(tags));
        object.insert("description".into(), Value::scalar(self.description.clone()));
        object.insert("draft".into(), Value::scalar(self.draft));
        object.insert("url".into(), Value::scalar(self.url()));
        object.insert("alias".into(), Value::scalar(self.alias()));
        object
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(slug::normalize_tag)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Render `content.md` for `post` into `<content>/blog/<slug>/`.
///
/// Fails rather than replacing an existing post.
pub fn create_post(
    engine: &dyn TemplateEngine,
    config: &Config,
    post: &NewPost,
) -> Result<path::PathBuf> {
    let slug = post.slug();
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title `{}`", post.title);
    }

    let dir = config.content_dir().join("blog").join(&slug);
    let target = dir.join(TemplateKind::for_name(POST_TEMPLATE).file_name());
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }

    output::render(engine, &dir, POST_TEMPLATE, &post.to_object())
}
