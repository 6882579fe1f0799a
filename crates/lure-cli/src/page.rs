use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lure_core::{ElementKind, Marking, PageElement, PageSource};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::sync::{Arc, Mutex};
use url::Url;

/// A link or image lifted out of the parsed DOM.
pub struct HtmlElement {
    kind: ElementKind,
    /// Resolved `href`/`src`, `None` when the attribute is missing.
    url: Option<String>,
    text: Option<String>,
    marking: Mutex<Option<Marking>>,
}

impl HtmlElement {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn marking(&self) -> Option<Marking> {
        self.marking
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PageElement for HtmlElement {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == self.kind.url_attribute() {
            self.url.clone()
        } else {
            None
        }
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn mark(&self, marking: &Marking) {
        *self
            .marking
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(marking.clone());
    }
}

/// Parsed HTML page acting as the candidate source for the scan controller.
pub struct HtmlDocument {
    scheme: Option<String>,
    elements: Vec<Arc<HtmlElement>>,
}

impl HtmlDocument {
    pub fn parse(html: &str, base_url: Option<&Url>) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut elements = Vec::new();
        collect_elements(&dom.document, base_url, &mut elements);

        Self {
            scheme: base_url.map(|u| u.scheme().to_string()),
            elements,
        }
    }

    pub fn elements(&self) -> &[Arc<HtmlElement>] {
        &self.elements
    }
}

impl PageSource for HtmlDocument {
    fn document_scheme(&self) -> Option<String> {
        self.scheme.clone()
    }

    fn snapshot(&self) -> Vec<Arc<dyn PageElement>> {
        self.elements
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn PageElement>)
            .collect()
    }
}

fn collect_elements(handle: &Handle, base_url: Option<&Url>, out: &mut Vec<Arc<HtmlElement>>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        let kind = match &*name.local {
            "a" => Some(ElementKind::Link),
            "img" => Some(ElementKind::Image),
            _ => None,
        };

        if let Some(kind) = kind {
            let url = attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == kind.url_attribute())
                .map(|attr| resolve(&attr.value, base_url));
            let text = match kind {
                ElementKind::Link => Some(visible_text(handle)),
                ElementKind::Image => None,
            };

            out.push(Arc::new(HtmlElement {
                kind,
                url,
                text,
                marking: Mutex::new(None),
            }));
        }
    }

    for child in handle.children.borrow().iter() {
        collect_elements(child, base_url, out);
    }
}

/// Resolves like a browser's `href`/`src` property; unresolvable values pass through.
fn resolve(raw: &str, base_url: Option<&Url>) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match base_url {
        Some(base) => base
            .join(raw)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => raw.to_string(),
    }
}

/// Text content with whitespace runs collapsed, roughly what `innerText` shows.
fn visible_text(handle: &Handle) -> String {
    let mut raw = String::new();
    append_text(handle, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => {
            out.push_str(&contents.borrow());
            out.push(' ');
        }
        NodeData::Element { name, .. } if matches!(&*name.local, "script" | "style") => {}
        _ => {
            for child in handle.children.borrow().iter() {
                append_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><body>
  <a href="/account/verify">  Sign
     in </a>
  <img src="img/logo.png">
  <a name="anchor-without-href">top</a>
  <p><a href="https://www.paypal.com/"><b>PayPal</b></a></p>
  <img alt="no source">
</body></html>"#;

    #[test]
    fn test_discovers_links_and_images_in_document_order() {
        let base = Url::parse("https://shop.example.com/cart/").unwrap();
        let doc = HtmlDocument::parse(PAGE, Some(&base));

        let kinds: Vec<_> = doc.elements().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Link,
                ElementKind::Image,
                ElementKind::Link,
                ElementKind::Link,
                ElementKind::Image,
            ]
        );

        let urls: Vec<_> = doc.elements().iter().map(|e| e.url()).collect();
        assert_eq!(
            urls,
            vec![
                Some("https://shop.example.com/account/verify"),
                Some("https://shop.example.com/cart/img/logo.png"),
                None,
                Some("https://www.paypal.com/"),
                None,
            ]
        );
    }

    #[test]
    fn test_link_text_is_collapsed() {
        let doc = HtmlDocument::parse(PAGE, None);
        assert_eq!(doc.elements()[0].text().as_deref(), Some("Sign in"));
        assert_eq!(doc.elements()[3].text().as_deref(), Some("PayPal"));
        assert_eq!(doc.elements()[1].text(), None);
    }

    #[test]
    fn test_without_base_url_keeps_raw_values() {
        let doc = HtmlDocument::parse(PAGE, None);
        assert_eq!(doc.document_scheme(), None);
        assert_eq!(doc.elements()[0].url(), Some("/account/verify"));
    }

    #[test]
    fn test_document_scheme_from_base() {
        let base = Url::parse("https://example.com/").unwrap();
        let doc = HtmlDocument::parse("<a href='http://x.example/'>x</a>", Some(&base));
        assert_eq!(doc.document_scheme().as_deref(), Some("https"));
        assert_eq!(doc.snapshot().len(), 1);
    }

    #[test]
    fn test_mark_is_recorded() {
        let doc = HtmlDocument::parse("<img src='https://a.example/x.png'>", None);
        let element = &doc.elements()[0];
        assert_eq!(element.marking(), None);
        element.mark(&Marking::Clean);
        assert_eq!(element.marking(), Some(Marking::Clean));
    }
}
