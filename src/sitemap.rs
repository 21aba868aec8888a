use std::borrow::Cow;

use plume_config::Config;

use crate::document::ContentItem;
use crate::error::Result;
use crate::output;

pub const SITEMAP_FILE: &str = "sitemap.xml";
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

/// `urlset` of every non-draft post, in index order.
pub fn sitemap_xml(config: &Config, index: &[ContentItem]) -> String {
    let urls = index
        .iter()
        .filter(|post| !post.is_draft())
        .map(|post| UrlEntry {
            loc: post.absolute_url(&config.site),
            lastmod: post.date.map(|date| date.format_ymd()),
        });

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");
    for entry in urls {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(&lastmod);
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn build_sitemap(config: &Config, index: &[ContentItem]) -> Result<()> {
    let path = config.output_dir().join(SITEMAP_FILE);
    output::write_file(&path, &sitemap_xml(config, index))
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod test {
    use plume_core::SourcePath;

    use super::*;

    fn post(name: &str, front: &str) -> ContentItem {
        let root = std::path::Path::new("/site/content");
        let source = SourcePath::from_root(root, &root.join(format!("blog/{name}.md"))).unwrap();
        ContentItem::from_text(source, &format!("---\n{front}\n---\n")).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.site.url = "https://example.com".to_owned();
        config
    }

    #[test]
    fn empty_sitemap() {
        let xml = sitemap_xml(&config(), &[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn entries_with_lastmod() {
        let index = vec![
            post("a", "title: A\ndate: 2024-01-05 22:00:00 -0500"),
            post("b", "title: B"),
            post("c", "title: C\ndraft: true"),
        ];
        let xml = sitemap_xml(&config(), &index);
        assert_eq!(
            xml,
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <urlset xmlns=\"{SITEMAP_NS}\">\n  \
                 <url>\n    <loc>https://example.com/a/</loc>\n    <lastmod>2024-01-06</lastmod>\n  </url>\n  \
                 <url>\n    <loc>https://example.com/b/</loc>\n  </url>\n\
                 </urlset>\n"
            )
        );
    }

    #[test]
    fn aliased_posts_link_to_a_written_page() {
        let index = vec![post("hello", "title: Hello\naliases: [/blog/2024/01/05/hello/]")];
        let xml = sitemap_xml(&config(), &index);
        assert!(
            xml.contains("<loc>https://example.com/blog/2024/01/05/hello/</loc>"),
            "{xml}"
        );
        assert!(!xml.contains("<loc>https://example.com/hello/</loc>"), "{xml}");
    }

    #[test]
    fn locations_are_escaped() {
        let index = vec![post("a", "url: /q&a/")];
        let xml = sitemap_xml(&config(), &index);
        assert!(xml.contains("<loc>https://example.com/q&amp;a/</loc>"), "{xml}");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
