// src/sitemap/render.rs
// =============================================================================
// Turns page records into the sitemap XML text.
//
// Output shape:
//   <?xml version="1.0" encoding="UTF-8"?>
//   <?xml-stylesheet type="text/xsl" href="/sitemap.xsl"?>
//   <urlset xmlns="..." xmlns:image="...">
//     <url>
//       <loc>https://example.com/</loc>
//       <image:image>
//         <image:loc>https://example.com/logo.png</image:loc>
//       </image:image>
//     </url>
//   </urlset>
//
// Lines are joined with '\n' and there is no trailing newline. The same
// records always produce the same bytes.
//
// XML 1.0 cannot carry ASCII control characters at all, even escaped, so
// they are percent-encoded first ("a\x01b.html" -> "a%01b.html").
// =============================================================================

use super::PageRecord;
use percent_encoding::percent_encode_byte;
use quick_xml::escape::escape;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

pub fn render_sitemap(records: &[PageRecord], stylesheet_href: &str) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(
            r#"<?xml-stylesheet type="text/xsl" href="{}"?>"#,
            url_text(stylesheet_href)
        ),
        format!(r#"<urlset xmlns="{}" xmlns:image="{}">"#, SITEMAP_NS, IMAGE_NS),
    ];

    for record in records {
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", url_text(&record.public_url)));
        for image in &record.images {
            lines.push("    <image:image>".to_string());
            lines.push(format!("      <image:loc>{}</image:loc>", url_text(image)));
            lines.push("    </image:image>".to_string());
        }
        lines.push("  </url>".to_string());
    }

    lines.push("</urlset>".to_string());
    lines.join("\n")
}

fn url_text(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        if c.is_ascii_control() {
            encoded.push_str(percent_encode_byte(c as u8));
        } else {
            encoded.push(c);
        }
    }
    escape(encoded.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::collections::BTreeSet;

    fn record(url: &str, images: &[&str]) -> PageRecord {
        PageRecord {
            relative_path: String::new(),
            public_url: url.to_string(),
            images: images.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    // Walks the whole document; any syntax or nesting error fails the test.
    fn assert_well_formed(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut texts = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Text(t)) => {
                    let text = t.unescape().unwrap().trim().to_string();
                    if !text.is_empty() {
                        texts.push(text);
                    }
                }
                Ok(_) => {}
                Err(e) => panic!("malformed XML at {}: {}", reader.buffer_position(), e),
            }
        }
        texts
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = render_sitemap(&[], "/sitemap.xsl");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <?xml-stylesheet type=\"text/xsl\" href=\"/sitemap.xsl\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
             xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">\n\
             </urlset>"
        );
    }

    #[test]
    fn test_page_with_image() {
        let xml = render_sitemap(
            &[record("https://example.com/", &["https://example.com/logo.png"])],
            "/sitemap.xsl",
        );
        assert!(xml.contains(
            "  <url>\n    <loc>https://example.com/</loc>\n    <image:image>\n      \
             <image:loc>https://example.com/logo.png</image:loc>\n    </image:image>\n  </url>"
        ));
        assert!(!xml.ends_with('\n'));
        assert_well_formed(&xml);
    }

    #[test]
    fn test_escapes_markup_in_urls() {
        let xml = render_sitemap(
            &[record(
                "https://example.com/a&b<c>.html",
                &["https://example.com/img?x=1&y=2"],
            )],
            "/sitemap.xsl",
        );
        assert!(xml.contains("a&amp;b&lt;c&gt;.html"));
        assert!(xml.contains("x=1&amp;y=2"));

        let texts = assert_well_formed(&xml);
        assert_eq!(
            texts,
            vec!["https://example.com/a&b<c>.html", "https://example.com/img?x=1&y=2"]
        );
    }

    #[test]
    fn test_control_characters_percent_encoded() {
        let xml = render_sitemap(
            &[record(
                "https://example.com/a\u{1}b.html",
                &["https://example.com/tab\there.png", "https://example.com/del\u{7f}.png"],
            )],
            "/sitemap.xsl",
        );
        assert!(xml.contains("<loc>https://example.com/a%01b.html</loc>"));
        assert!(xml.contains("<image:loc>https://example.com/tab%09here.png</image:loc>"));
        assert!(xml.contains("https://example.com/del%7F.png"));
        assert!(!xml.chars().any(|c| c.is_ascii_control() && c != '\n'));
        assert_well_formed(&xml);
    }

    #[test]
    fn test_non_ascii_left_alone() {
        let xml = render_sitemap(&[record("https://example.com/café.html", &[])], "/sitemap.xsl");
        assert!(xml.contains("<loc>https://example.com/café.html</loc>"));
    }

    #[test]
    fn test_deterministic() {
        let records = vec![
            record("https://example.com/", &["https://example.com/b.png", "https://example.com/a.png"]),
            record("https://example.com/blog/", &[]),
        ];
        assert_eq!(
            render_sitemap(&records, "/sitemap.xsl"),
            render_sitemap(&records, "/sitemap.xsl")
        );
    }
}
