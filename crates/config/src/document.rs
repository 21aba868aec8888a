use std::sync::LazyLock;

use crate::Frontmatter;
use crate::Result;
use crate::Status;

/// A content file split into its front matter and markdown body.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Document {
    front: Frontmatter,
    content: String,
}

impl Document {
    pub fn parse(content: &str) -> Result<Self> {
        let (front, content) = split_document(content);
        let front = front
            .map(parse_frontmatter)
            .transpose()?
            .unwrap_or_else(Frontmatter::default);
        let content = content.to_owned();
        Ok(Self { front, content })
    }

    pub fn front(&self) -> &Frontmatter {
        &self.front
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (Frontmatter, String) {
        let Self { front, content } = self;
        (front, content)
    }
}

fn parse_frontmatter(front: &str) -> Result<Frontmatter> {
    if front.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    let front: Frontmatter = serde_yaml::from_str(front)
        .map_err(|e| Status::new("Failed to parse frontmatter").with_source(e))?;
    Ok(front)
}

static FRONT_MATTER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::RegexBuilder::new(r"\A---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)")
        .dot_matches_new_line(true)
        .build()
        .expect("front matter pattern is valid")
});

fn split_document(content: &str) -> (Option<&str>, &str) {
    if let Some(captures) = FRONT_MATTER.captures(content) {
        let front_split = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let content_split = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        if front_split.is_empty() {
            (None, content_split)
        } else {
            (Some(front_split), content_split)
        }
    } else {
        (None, content)
    }
}
