//! The render target for the series list: the `<ul id="comicsList">`
//! element of the series page, modeled as an explicit value passed to the
//! renderer. Serialization to markup is a separate step from appending.

/// Element id of the rendered container, part of the page contract.
pub const LIST_ELEMENT_ID: &str = "comicsList";

/// One rendered `<li><a href="...">text</a></li>` entry.
///
/// Both fields are stored raw. Escaping happens in [`ListItem::to_html`]
/// only, the equivalent of assigning through `textContent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub href: String,
    pub text: String,
}

impl ListItem {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        ListItem {
            href: href.into(),
            text: text.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<li><a href=\"{}\">{}</a></li>",
            escape(&self.href),
            escape(&self.text)
        )
    }
}

/// The series list container. Append-only: there is no way to clear it,
/// so loading twice leaves duplicate entries.
#[derive(Debug, Default)]
pub struct SeriesList {
    items: Vec<ListItem>,
}

impl SeriesList {
    pub fn new() -> Self {
        SeriesList::default()
    }

    pub fn append(&mut self, item: ListItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Serializes the container and its children to markup.
    pub fn to_html(&self) -> String {
        let mut html = format!("<ul id=\"{}\">\n", LIST_ELEMENT_ID);
        for item in &self.items {
            html.push_str("  ");
            html.push_str(&item.to_html());
            html.push('\n');
        }
        html.push_str("</ul>");
        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut list = SeriesList::new();
        list.append(ListItem::new("/a", "First"));
        list.append(ListItem::new("/b", "Second"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].text, "First");
        assert_eq!(list.items()[1].text, "Second");
    }

    #[test]
    fn item_html_is_a_link_inside_a_list_item() {
        let item = ListItem::new("/static/comic_reader.html?comic=x.cbz", "X");
        assert_eq!(
            item.to_html(),
            "<li><a href=\"/static/comic_reader.html?comic=x.cbz\">X</a></li>"
        );
    }

    #[test]
    fn item_html_escapes_markup_in_title() {
        let item = ListItem::new("/r", "Cats & <Dogs>");
        assert_eq!(
            item.to_html(),
            "<li><a href=\"/r\">Cats &amp; &lt;Dogs&gt;</a></li>"
        );
    }

    #[test]
    fn container_html_wraps_items_with_the_contract_id() {
        let mut list = SeriesList::new();
        list.append(ListItem::new("/r", "A"));

        let html = list.to_html();
        assert!(html.starts_with("<ul id=\"comicsList\">"));
        assert!(html.contains("<li><a href=\"/r\">A</a></li>"));
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn empty_container_has_no_children() {
        let list = SeriesList::new();
        assert!(list.is_empty());
        assert_eq!(list.to_html(), "<ul id=\"comicsList\">\n</ul>");
    }
}
