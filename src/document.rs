use anyhow::Context as _;
use liquid::model::KString;
use liquid::model::Value;
use plume_config::DateTime;
use plume_config::Document;
use plume_config::Frontmatter;
use plume_config::Site;
use plume_core::SourcePath;

use crate::error::Result;
use crate::mark::Markdown;
use crate::template;

/// One parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub source: SourcePath,
    pub front: Frontmatter,
    /// `None` when the front matter has no `date` or it could not be read.
    pub date: Option<DateTime>,
    pub html_content: String,
    /// Primary URL: `url`, else the first alias, else the file stem.  Always `/`-delimited.
    pub url: String,
}

impl ContentItem {
    pub fn parse(source: SourcePath) -> Result<Self> {
        let text = std::fs::read_to_string(&source.abs_path)
            .with_context(|| format!("Failed to read {}", source.abs_path.display()))?;
        Self::from_text(source, &text)
    }

    pub fn from_text(source: SourcePath, text: &str) -> Result<Self> {
        log::debug!("Building context for {}", source.rel_path);
        let (front, content) = Document::parse(text)
            .with_context(|| format!("Failed to parse {}", source.abs_path.display()))?
            .into_parts();

        let date = front.date.as_ref().and_then(|raw| {
            let date = DateTime::from_yaml(raw);
            if date.is_none() {
                log::error!(
                    "{}: Failed to convert date {}",
                    source.rel_path,
                    yaml_to_text(raw)
                );
            }
            date
        });
        if front.title.is_none() {
            log::warn!("{}: Missing fields: title", source.rel_path);
        }

        let html_content = Markdown::new().parse(&content);
        let url = front
            .url
            .as_deref()
            .or_else(|| front.aliases.first().map(String::as_str))
            .map_or_else(|| url_path(source.stem()), url_path);

        Ok(Self {
            source,
            front,
            date,
            html_content,
            url,
        })
    }

    pub fn title(&self) -> &str {
        self.front.title.as_deref().unwrap_or_default()
    }

    pub fn is_draft(&self) -> bool {
        self.front.draft
    }

    /// Whether the item belongs in the blog index.
    pub fn is_blog(&self) -> bool {
        self.source.section() == Some("blog")
    }

    /// Undated items sort as the Unix epoch.
    pub fn sort_date(&self) -> DateTime {
        self.date.unwrap_or_default()
    }

    pub fn template_name(&self) -> &'static str {
        template::template_for(&self.source)
    }

    /// Where the rendered page is written: `url` and `aliases`, or the file stem.
    pub fn destinations(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self
            .front
            .url
            .iter()
            .chain(self.front.aliases.iter())
            .map(|url| url.trim_matches('/'))
            .collect();
        if urls.is_empty() {
            urls.push(self.source.stem());
        }
        urls
    }

    pub fn absolute_url(&self, site: &Site) -> String {
        format!("{}{}", site.base_url(), self.url)
    }

    /// Template variables: the front matter plus `html_content`, `url` and `site`.
    pub fn to_object(&self, site: &Site) -> Result<liquid::Object> {
        let mut object = liquid::Object::new();
        for (key, value) in &self.front.data {
            object.insert(KString::from_ref(key), liquid::model::to_value(value)?);
        }
        object.insert("title".into(), optional(self.front.title.as_deref()));
        match (self.date, &self.front.date) {
            (Some(date), _) => {
                object.insert("date".into(), Value::scalar(date.format()));
            }
            (None, Some(raw)) => {
                object.insert("date".into(), liquid::model::to_value(raw)?);
            }
            (None, None) => {
                object.insert("date".into(), Value::Nil);
            }
        }
        object.insert("tags".into(), liquid::model::to_value(&self.front.tags)?);
        object.insert("draft".into(), Value::scalar(self.front.draft));
        object.insert(
            "description".into(),
            optional(self.front.description.as_deref()),
        );
        if !self.front.aliases.is_empty() {
            object.insert("aliases".into(), liquid::model::to_value(&self.front.aliases)?);
        }
        object.insert("html_content".into(), Value::scalar(self.html_content.clone()));
        object.insert("url".into(), Value::scalar(self.url.clone()));
        object.insert("site".into(), liquid::model::to_value(site)?);
        Ok(object)
    }
}

/// `/a/b/` for any of `a/b`, `/a/b`, `a/b/`.
pub fn url_path(url: &str) -> String {
    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

/// Standard keys are always present, `nil` when unset.
fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Nil, |v| Value::scalar(v.to_owned()))
}

fn yaml_to_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        value => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}
