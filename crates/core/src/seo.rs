//! `robots.txt`, `sitemap.xml` and canonical URL helpers.

/// Pages always listed in the sitemap, before individual guides.
pub const SITEMAP_STATIC_PAGES: [&str; 3] = ["/", "/contact", "/guides"];

/// Strip trailing slashes so paths can be appended directly.
pub fn base_url(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

/// Absolute canonical URL for a request path.
pub fn canonical_url(site_url: &str, path: &str) -> String {
    format!("{}{path}", base_url(site_url))
}

/// Body of `/robots.txt`: allow everything and advertise the sitemap.
pub fn robots_txt(site_url: &str) -> String {
    [
        "User-agent: *".to_string(),
        "Allow: /".to_string(),
        format!("Sitemap: {}/sitemap.xml", base_url(site_url)),
    ]
    .join("\n")
}

/// Body of `/sitemap.xml` for the static pages plus one entry per guide slug.
pub fn sitemap_xml<'a>(site_url: &str, guide_slugs: impl IntoIterator<Item = &'a str>) -> String {
    let base = base_url(site_url);
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#.to_string(),
    ];
    let guide_pages = guide_slugs.into_iter().map(|slug| format!("/guides/{slug}"));
    let pages = SITEMAP_STATIC_PAGES
        .iter()
        .map(|p| (*p).to_string())
        .chain(guide_pages);
    for page in pages {
        lines.push("<url>".to_string());
        lines.push(format!("  <loc>{}</loc>", xml_escape(&format!("{base}{page}"))));
        lines.push("</url>".to_string());
    }
    lines.push("</urlset>".to_string());
    lines.join("\n")
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
