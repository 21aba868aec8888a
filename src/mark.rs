use pulldown_cmark as cmark;

/// Markdown to HTML with the extensions content files may rely on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markdown {}

impl Markdown {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&self, content: &str) -> String {
        let mut buf = String::new();
        let options = cmark::Options::ENABLE_FOOTNOTES
            | cmark::Options::ENABLE_TABLES
            | cmark::Options::ENABLE_STRIKETHROUGH
            | cmark::Options::ENABLE_TASKLISTS;
        let parser = cmark::Parser::new_ext(content, options);
        cmark::html::push_html(&mut buf, parser);
        buf
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_commonmark() {
        let html = Markdown::new().parse("# Hi\n\nSome *text*.\n");
        assert_eq!(html, "<h1>Hi</h1>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn renders_tables() {
        let html = Markdown::new().parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
    }

    #[test]
    fn renders_strikethrough_and_tasks() {
        let html = Markdown::new().parse("~~gone~~\n\n- [x] done\n");
        assert!(html.contains("<del>gone</del>"), "{html}");
        assert!(html.contains("checkbox"), "{html}");
    }
}
