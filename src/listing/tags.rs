use std::collections::BTreeMap;

use itertools::Itertools as _;
use liquid::model::Value;
use plume_config::Config;

use super::render_listing;
use crate::document::ContentItem;
use crate::error::Result;
use crate::output;
use crate::slug;
use crate::template::TAGS_TEMPLATE;
use crate::template::TemplateEngine;

pub fn tag_url(tag: &str) -> String {
    format!("/blog/tags/{tag}/")
}

/// Posts per normalized tag, each post at most once per tag, in index order.
///
/// Tags that normalize to nothing are dropped.
pub fn group_by_tag(index: &[ContentItem]) -> BTreeMap<String, Vec<&ContentItem>> {
    let mut by_tag: BTreeMap<String, Vec<&ContentItem>> = BTreeMap::new();
    for post in index {
        let tags = post
            .front
            .tags
            .iter()
            .map(slug::normalize_tag)
            .filter(|tag| !tag.is_empty())
            .unique();
        for tag in tags {
            by_tag.entry(tag).or_default().push(post);
        }
    }
    by_tag
}

/// `blog/tags/` overview plus one listing per tag.
pub fn build_tags(
    engine: &dyn TemplateEngine,
    config: &Config,
    index: &[ContentItem],
) -> Result<()> {
    let tags_dir = config.output_dir().join("blog").join("tags");
    let by_tag = group_by_tag(index);

    let tags: Vec<Value> = by_tag
        .keys()
        .map(|tag| {
            let mut entry = liquid::Object::new();
            entry.insert("name".into(), Value::scalar(tag.clone()));
            entry.insert("url".into(), Value::scalar(tag_url(tag)));
            Value::Object(entry)
        })
        .collect();
    let mut context = liquid::Object::new();
    context.insert("title".into(), Value::scalar(config.site.title.clone()));
    context.insert("subtitle".into(), Value::scalar("Tags"));
    context.insert("tags".into(), Value::Array(tags));
    context.insert("site".into(), liquid::model::to_value(&config.site)?);
    output::render(engine, &tags_dir, TAGS_TEMPLATE, &context)?;

    for (tag, posts) in &by_tag {
        render_listing(
            engine,
            &tags_dir.join(tag),
            config,
            format!("Tagged {tag}"),
            posts,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::super::test::post;
    use super::*;

    #[test]
    fn groups_by_normalized_tag() {
        let index = vec![
            post("a", "tags: [Go Lang, Rust]"),
            post("b", "tags: [go-lang]"),
            post("c", "title: untagged"),
        ];
        let by_tag = group_by_tag(&index);

        assert_eq!(by_tag.keys().collect::<Vec<_>>(), ["go-lang", "rust"]);
        let go: Vec<_> = by_tag["go-lang"].iter().map(|p| p.source.stem()).collect();
        assert_eq!(go, ["a", "b"]);
    }

    #[test]
    fn variants_of_one_tag_list_post_once() {
        let index = vec![post("a", "tags: [Café, cafe, CAFE]")];
        let by_tag = group_by_tag(&index);
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag["cafe"].len(), 1);
    }

    #[test]
    fn empty_tags_are_dropped() {
        let index = vec![post("a", "tags: ['!!!', '']")];
        assert!(group_by_tag(&index).is_empty());
    }

    #[test]
    fn tag_urls() {
        assert_eq!(tag_url("go-lang"), "/blog/tags/go-lang/");
    }
}
