//! RSS 2.0 and Atom feeds of the published blog posts.

use atom_syndication::ContentBuilder;
use atom_syndication::EntryBuilder;
use atom_syndication::FeedBuilder;
use atom_syndication::FixedDateTime;
use atom_syndication::LinkBuilder;
use atom_syndication::PersonBuilder;
use atom_syndication::Text;
use plume_config::Config;
use plume_config::DateTime;
use rss::ChannelBuilder;
use rss::GuidBuilder;
use rss::ItemBuilder;

use crate::document::ContentItem;
use crate::error::Result;
use crate::listing;
use crate::output;

pub const RSS_FILE: &str = "rss.xml";
pub const ATOM_FILE: &str = "atom.xml";
const LANGUAGE: &str = "en";

/// Non-draft posts, oldest first.
pub fn feed_posts(index: &[ContentItem]) -> Vec<&ContentItem> {
    let mut posts = listing::sort_ascending(index);
    posts.retain(|post| !post.is_draft());
    posts
}

pub fn rss_channel(config: &Config, index: &[ContentItem]) -> rss::Channel {
    let site = &config.site;
    let items: Vec<rss::Item> = feed_posts(index)
        .into_iter()
        .map(|post| {
            let link = post.absolute_url(site);
            ItemBuilder::default()
                .title(Some(post.title().to_owned()))
                .link(Some(link.clone()))
                .guid(Some(GuidBuilder::default().value(link).permalink(true).build()))
                .author(Some(site.author.clone()))
                .description(post.front.description.clone())
                .content(Some(post.html_content.clone()))
                .pub_date(post.date.map(|date| date.to_rfc2822()))
                .build()
        })
        .collect();

    ChannelBuilder::default()
        .title(site.title.clone())
        .link(site.url.clone())
        .description(site.description.clone())
        .language(Some(LANGUAGE.to_owned()))
        .items(items)
        .build()
}

pub fn atom_feed(config: &Config, index: &[ContentItem]) -> atom_syndication::Feed {
    let site = &config.site;
    let posts = feed_posts(index);
    let author = PersonBuilder::default().name(site.author.clone()).build();

    let updated: FixedDateTime = posts
        .iter()
        .map(|post| post.sort_date())
        .max()
        .unwrap_or_default()
        .into();

    let entries: Vec<atom_syndication::Entry> = posts
        .into_iter()
        .map(|post| {
            let link = post.absolute_url(site);
            let published: Option<FixedDateTime> = post.date.map(DateTime::into);
            EntryBuilder::default()
                .title(Text::plain(post.title()))
                .id(link.clone())
                .updated(FixedDateTime::from(post.sort_date()))
                .published(published)
                .authors(vec![author.clone()])
                .links(vec![
                    LinkBuilder::default()
                        .href(link)
                        .rel("alternate".to_owned())
                        .build(),
                ])
                .summary(post.front.description.clone().map(Text::plain))
                .content(Some(
                    ContentBuilder::default()
                        .value(Some(post.html_content.clone()))
                        .content_type(Some("html".to_owned()))
                        .build(),
                ))
                .build()
        })
        .collect();

    FeedBuilder::default()
        .id(site.url.clone())
        .title(Text::plain(site.title.clone()))
        .subtitle(Some(Text::plain(site.description.clone())))
        .updated(updated)
        .authors(vec![author])
        .links(vec![
            LinkBuilder::default()
                .href(site.url.clone())
                .rel("alternate".to_owned())
                .build(),
        ])
        .lang(Some(LANGUAGE.to_owned()))
        .entries(entries)
        .build()
}

/// Write both feeds, even when there are no posts.
pub fn build_feeds(config: &Config, index: &[ContentItem]) -> Result<()> {
    if !config.feeds.enabled {
        log::info!("Feeds disabled, skipping");
        return Ok(());
    }
    let output_dir = config.output_dir();

    let rss_path = output::url_dir(&output_dir, &config.feeds.rss_path).join(RSS_FILE);
    output::write_file(&rss_path, &rss_channel(config, index).to_string())?;

    let atom_path = output::url_dir(&output_dir, &config.feeds.atom_path).join(ATOM_FILE);
    output::write_file(&atom_path, &atom_feed(config, index).to_string())?;

    Ok(())
}

#[cfg(test)]
mod test {
    use plume_core::SourcePath;

    use super::*;

    fn post(name: &str, front: &str) -> ContentItem {
        let root = std::path::Path::new("/site/content");
        let source = SourcePath::from_root(root, &root.join(format!("blog/{name}.md"))).unwrap();
        ContentItem::from_text(source, &format!("---\n{front}\n---\nbody\n")).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.site.title = "Test Blog".to_owned();
        config.site.author = "Test Author".to_owned();
        config.site.url = "https://example.com/".to_owned();
        config.site.description = "A test blog".to_owned();
        config
    }

    fn index() -> Vec<ContentItem> {
        vec![
            post("new", "title: New\ndate: 2024-03-01\ndescription: Fresh"),
            post("draft", "title: Draft\ndate: 2024-02-01\ndraft: true"),
            post("old", "title: Old\ndate: 2024-01-01"),
        ]
    }

    #[test]
    fn feed_posts_skip_drafts_and_ascend() {
        let index = index();
        let titles: Vec<_> = feed_posts(&index).iter().map(|p| p.title()).collect();
        assert_eq!(titles, ["Old", "New"]);
    }

    #[test]
    fn rss_items() {
        let channel = rss_channel(&config(), &index());
        assert_eq!(channel.title(), "Test Blog");
        assert_eq!(channel.language(), Some("en"));

        let items = channel.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), Some("Old"));
        assert_eq!(items[0].link(), Some("https://example.com/old/"));
        assert_eq!(items[0].description(), None);
        assert_eq!(items[1].description(), Some("Fresh"));
        assert_eq!(items[1].content(), Some("<p>body</p>\n"));
        assert!(items[1].pub_date().unwrap().contains("Mar 2024"));
    }

    #[test]
    fn atom_entries() {
        let feed = atom_feed(&config(), &index());
        assert_eq!(feed.id(), "https://example.com/");
        assert!(feed.updated().to_rfc3339().starts_with("2024-03-01"));

        let entries = feed.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title().as_str(), "Old");
        assert_eq!(entries[0].id(), "https://example.com/old/");
        assert_eq!(entries[1].summary().map(|s| s.as_str()), Some("Fresh"));
    }

    #[test]
    fn far_future_timestamp_is_undated() {
        let index = vec![post("future", "title: Future\ndate: 253402300800")];
        let channel = rss_channel(&config(), &index);
        assert_eq!(channel.items()[0].pub_date(), None);
        let feed = atom_feed(&config(), &index);
        assert_eq!(feed.entries()[0].published(), None);
    }

    #[test]
    fn empty_feeds_still_build() {
        let channel = rss_channel(&config(), &[]);
        assert!(channel.items().is_empty());
        let feed = atom_feed(&config(), &[]);
        assert!(feed.entries().is_empty());
        assert_eq!(feed.updated().timestamp(), 0);
    }

    #[test]
    fn build_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.root = dir.path().to_owned();
        build_feeds(&config, &index()).unwrap();

        let rss = std::fs::read_to_string(dir.path().join("docs/feed/rss/rss.xml")).unwrap();
        assert!(rss.contains("<title>New</title>"), "{rss}");
        assert!(!rss.contains("Draft"), "{rss}");
        let atom = std::fs::read_to_string(dir.path().join("docs/feed/atom/atom.xml")).unwrap();
        assert!(atom.contains("https://example.com/new/"), "{atom}");
    }

    #[test]
    fn disabled_feeds_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.root = dir.path().to_owned();
        config.feeds.enabled = false;
        build_feeds(&config, &index()).unwrap();
        assert!(!dir.path().join("docs/feed").exists());
    }
}
