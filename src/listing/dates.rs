use std::collections::BTreeMap;

use chrono::Datelike as _;
use plume_config::Config;

use super::render_listing;
use crate::document::ContentItem;
use crate::error::Result;
use crate::template::TemplateEngine;

/// Archive buckets (`2024`, `2024/01`, `2024/01/05`) holding posts in index order.
///
/// Posts without a valid date are not archived.
pub fn group_by_date(index: &[ContentItem]) -> BTreeMap<String, Vec<&ContentItem>> {
    let mut by_date: BTreeMap<String, Vec<&ContentItem>> = BTreeMap::new();
    for post in index {
        let Some(date) = post.date else {
            continue;
        };
        let year = format!("{:04}", date.year());
        let month = format!("{year}/{:02}", date.month());
        let day = format!("{month}/{:02}", date.day());
        for bucket in [year, month, day] {
            by_date.entry(bucket).or_default().push(post);
        }
    }
    by_date
}

/// One `blog/<bucket>/` listing per non-empty bucket.
pub fn build_archives(
    engine: &dyn TemplateEngine,
    config: &Config,
    index: &[ContentItem],
) -> Result<()> {
    let blog_dir = config.output_dir().join("blog");
    for (bucket, posts) in group_by_date(index) {
        render_listing(engine, &blog_dir.join(bucket), config, "Archive", &posts)?;
    }
    Ok(())
}
