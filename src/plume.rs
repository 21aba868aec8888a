use std::time::Instant;

use plume_config::Config;
use plume_core::Source;

use crate::assets;
use crate::document::ContentItem;
use crate::error::Result;
use crate::feed;
use crate::listing;
use crate::output;
use crate::sitemap;
use crate::template::DEV_TEMPLATE;
use crate::template::Liquid;
use crate::template::TemplateEngine;

/// Build the whole site described by `config`.
pub fn build(config: &Config) -> Result<()> {
    let start = Instant::now();
    let engine = Liquid::load(&config.templates_dir())?;
    build_with(&engine, config)?;
    log::info!("Completed in {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

pub(crate) fn build_with(engine: &dyn TemplateEngine, config: &Config) -> Result<()> {
    let index = render_content(engine, config)?;

    listing::build_index(engine, config, &index)?;
    listing::build_tags(engine, config, &index)?;
    listing::build_archives(engine, config, &index)?;
    feed::build_feeds(config, &index)?;
    sitemap::build_sitemap(config, &index)?;
    build_dev_page(engine, config)?;

    assets::copy_static(config)?;
    assets::copy_texts(config)?;
    assets::copy_cname(config)?;

    Ok(())
}

/// Render every content file and return the blog items.
fn render_content(engine: &dyn TemplateEngine, config: &Config) -> Result<Vec<ContentItem>> {
    let content_dir = config.content_dir();
    if !content_dir.is_dir() {
        log::warn!("No content directory found at {}", content_dir.display());
        return Ok(Vec::new());
    }

    let output_dir = config.output_dir();
    let source = Source::content(&content_dir)?;
    let mut index = Vec::new();
    for file in source.markdown_files() {
        let item = ContentItem::parse(file)?;
        if item.is_draft() && !config.build.include_drafts {
            log::debug!("Skipping draft {}", item.source.rel_path);
            continue;
        }

        let context = item.to_object(&config.site)?;
        for url in item.destinations() {
            let dir = output::url_dir(&output_dir, url);
            output::render(engine, &dir, item.template_name(), &context)?;
        }

        if item.is_blog() {
            index.push(item);
        }
    }
    Ok(index)
}

fn build_dev_page(engine: &dyn TemplateEngine, config: &Config) -> Result<()> {
    let dir = config.output_dir().join("dev");
    output::render(engine, &dir, DEV_TEMPLATE, &liquid::Object::new())?;
    Ok(())
}
