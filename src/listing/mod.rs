//! Listing pages derived from the blog index.

use std::path;

use liquid::model::Value;
use plume_config::Config;

use crate::document::ContentItem;
use crate::error::Result;
use crate::output;
use crate::template::INDEX_TEMPLATE;
use crate::template::TemplateEngine;

mod dates;
mod tags;

pub use dates::*;
pub use tags::*;

/// Newest first.  Equal dates keep index order.
pub fn sort_descending(index: &[ContentItem]) -> Vec<&ContentItem> {
    let mut posts: Vec<_> = index.iter().collect();
    posts.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));
    posts
}

/// Oldest first.  Equal dates keep index order.
pub fn sort_ascending(index: &[ContentItem]) -> Vec<&ContentItem> {
    let mut posts: Vec<_> = index.iter().collect();
    posts.sort_by_key(|post| post.sort_date());
    posts
}

/// Context shared by every listing page.
pub fn listing_context(
    config: &Config,
    subtitle: impl Into<String>,
    posts: &[&ContentItem],
) -> Result<liquid::Object> {
    let posts = posts
        .iter()
        .map(|post| post.to_object(&config.site).map(Value::Object))
        .collect::<Result<Vec<_>>>()?;

    let mut context = liquid::Object::new();
    context.insert("title".into(), Value::scalar(config.site.title.clone()));
    context.insert("subtitle".into(), Value::scalar(subtitle.into()));
    context.insert("posts".into(), Value::Array(posts));
    context.insert("site".into(), liquid::model::to_value(&config.site)?);
    Ok(context)
}

fn render_listing(
    engine: &dyn TemplateEngine,
    dir: &path::Path,
    config: &Config,
    subtitle: impl Into<String>,
    posts: &[&ContentItem],
) -> Result<()> {
    let context = listing_context(config, subtitle, posts)?;
    output::render(engine, dir, INDEX_TEMPLATE, &context)?;
    Ok(())
}

/// Home page with the latest posts and `blog/` with all of them.
pub fn build_index(
    engine: &dyn TemplateEngine,
    config: &Config,
    index: &[ContentItem],
) -> Result<()> {
    let output_dir = config.output_dir();
    let posts = sort_descending(index);

    let latest = &posts[..posts.len().min(config.build.posts_per_page)];
    render_listing(engine, &output_dir, config, "Latest posts...", latest)?;

    let subtitle = format!("{}. All of it.", config.site.title);
    render_listing(engine, &output_dir.join("blog"), config, subtitle, &posts)?;

    Ok(())
}
