use super::format::escape_html;

pub const STYLESHEET: &str = "/0/theme/css/style.css";
pub const PROJECT_URL: &str = "https://github.com/earth3300/ec01-file-index";

/// Wraps a listing fragment in a standalone page.
pub fn page_html(fragment: &str, item_type: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html class=\"dynamic {}\" lang=\"en-CA\">\n",
        escape_html(item_type)
    ));
    html.push_str("<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n");
    html.push_str("<title>File Index</title>\n");
    html.push_str("<meta name=\"robots\" content=\"noindex,nofollow\" />\n");
    html.push_str(&format!("<link rel=stylesheet href=\"{}\">\n", STYLESHEET));
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("<main>\n");
    html.push_str(fragment);
    html.push_str("</main>\n");
    html.push_str("<footer>\n");
    html.push_str("<div class=\"text-center\"><small>");
    html.push_str(&format!(
        "Note: This page has been <a href=\"{}\">automatically generated</a>. \
         No header, footer, menus or sidebars are available.",
        PROJECT_URL
    ));
    html.push_str("</small></div>\n");
    html.push_str("</footer>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wraps_fragment() {
        let page = page_html("<article class=\"file directory\">\n</article>\n", "directory");

        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<html class=\"dynamic directory\" lang=\"en-CA\">"));
        assert!(page.contains("<link rel=stylesheet href=\"/0/theme/css/style.css\">"));
        assert!(page.contains("<main>\n<article class=\"file directory\">\n</article>\n</main>\n"));
        assert!(page.contains("automatically generated"));
        assert!(page.ends_with("</html>\n"));
    }
}
