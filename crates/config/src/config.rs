use std::collections::BTreeMap;
use std::fmt;
use std::path;

use super::*;

/// Default name of the project configuration file.
pub const CONFIG_FILE: &str = "config.yaml";

/// Configuration written by `plume init`.
///
/// Parses back into [`Config::default`].
pub const DEFAULT_CONFIG: &str = r#"# Site Configuration
site:
  title: "Firstname Lastname"
  author: "Firstname Lastname"
  url: "https://blog.banderson443.me"
  description: "Personal blog and writings"

paths:
  content: "content"
  output: "docs"
  templates: "templates"
  static: "static"

build:
  posts_per_page: 20
  include_drafts: false

feeds:
  enabled: true
  rss_path: "/feed/rss/"
  atom_path: "/feed/atom/"
"#;

/// Site configuration.
///
/// Every section is `#[serde(default)]`: a section present in the user's file only overrides the
/// keys it names, the rest keep their defaults.  Merging stops at the section level.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    #[serde(deserialize_with = "null_as_default")]
    pub site: Site,
    #[serde(deserialize_with = "null_as_default")]
    pub paths: Paths,
    #[serde(deserialize_with = "null_as_default")]
    pub build: Build,
    #[serde(deserialize_with = "null_as_default")]
    pub feeds: Feeds,
    /// Top-level keys outside of the known sections, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: path::Path::new(".").to_owned(),
            site: Default::default(),
            paths: Default::default(),
            build: Default::default(),
            feeds: Default::default(),
            extra: Default::default(),
        }
    }
}

impl Config {
    /// Read and merge `path` over the defaults.
    ///
    /// The project root becomes the directory holding `path`.
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = Self::from_str_internal(&content).map_err(|e| {
            Status::new("Failed to parse config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;
        config.root = project_root(path);

        Ok(config)
    }

    fn from_str_internal(content: &str) -> std::result::Result<Config, serde_yaml::Error> {
        if content.trim().is_empty() {
            Ok(Config::default())
        } else {
            serde_yaml::from_str(content)
        }
    }

    /// Like [`Config::from_file`] but a missing file falls back to the defaults.
    pub fn load<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::load_internal(path.into())
    }

    fn load_internal(path: path::PathBuf) -> Result<Config> {
        if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::from_file(path)
        } else {
            log::warn!("{} not found, using defaults", path.display());
            let config = Config {
                root: project_root(path),
                ..Default::default()
            };
            Ok(config)
        }
    }

    pub fn content_dir(&self) -> path::PathBuf {
        self.root.join(&self.paths.content)
    }

    pub fn output_dir(&self) -> path::PathBuf {
        self.root.join(&self.paths.output)
    }

    pub fn templates_dir(&self) -> path::PathBuf {
        self.root.join(&self.paths.templates)
    }

    pub fn static_dir(&self) -> path::PathBuf {
        self.root.join(&self.paths.static_dir)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct Site {
    pub title: String,
    pub author: String,
    pub url: String,
    pub description: String,
}

impl Site {
    /// `url` without a trailing `/`, ready to have a page URL appended.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            title: "Firstname Lastname".to_owned(),
            author: "Firstname Lastname".to_owned(),
            url: "https://blog.banderson443.me".to_owned(),
            description: "Personal blog and writings".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct Paths {
    pub content: path::PathBuf,
    pub output: path::PathBuf,
    pub templates: path::PathBuf,
    #[serde(rename = "static")]
    pub static_dir: path::PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "docs".into(),
            templates: "templates".into(),
            static_dir: "static".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct Build {
    pub posts_per_page: usize,
    pub include_drafts: bool,
}

impl Default for Build {
    fn default() -> Self {
        Self {
            posts_per_page: 20,
            include_drafts: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct Feeds {
    pub enabled: bool,
    pub rss_path: String,
    pub atom_path: String,
}

impl Default for Feeds {
    fn default() -> Self {
        Self {
            enabled: true,
            rss_path: "/feed/rss/".to_owned(),
            atom_path: "/feed/atom/".to_owned(),
        }
    }
}

/// An empty section (`build:`) keeps every default rather than failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn project_root(mut path: path::PathBuf) -> path::PathBuf {
    path.pop(); // Remove filename
    if path == path::Path::new("") {
        path = path::Path::new(".").to_owned();
    }
    path
}
