use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// One (tag, attribute) pair that carries an outbound reference.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSource {
    pub tag: &'static str,
    pub attr: &'static str,
    /// Whether an in-domain reference of this kind is queued for crawling
    pub crawlable: bool,
}

pub const REFERENCE_SOURCES: &[ReferenceSource] = &[
    ReferenceSource { tag: "a", attr: "href", crawlable: true },
    ReferenceSource { tag: "img", attr: "src", crawlable: false },
    ReferenceSource { tag: "video", attr: "src", crawlable: false },
    ReferenceSource { tag: "audio", attr: "src", crawlable: false },
    ReferenceSource { tag: "source", attr: "src", crawlable: false },
    ReferenceSource { tag: "iframe", attr: "src", crawlable: false },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub url: Url,
    pub crawlable: bool,
}

/// Pull every reference listed in [`REFERENCE_SOURCES`] out of `html`,
/// resolved against `page`. Missing, blank and unresolvable attributes are skipped.
pub fn extract_references(html: &str, page: &Url) -> Vec<Reference> {
    let document = Html::parse_document(html);
    let mut references = Vec::new();

    for source in REFERENCE_SOURCES {
        let Ok(selector) = Selector::parse(source.tag) else {
            warn!("Skipping unparseable selector {}", source.tag);
            continue;
        };

        for element in document.select(&selector) {
            let Some(raw) = element.value().attr(source.attr) else {
                continue;
            };

            match resolve_reference(page, raw) {
                Some(url) => references.push(Reference {
                    url,
                    crawlable: source.crawlable,
                }),
                None => debug!("Ignoring <{} {}=\"{}\"> on {}", source.tag, source.attr, raw, page),
            }
        }
    }

    references
}

pub fn resolve_reference(page: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    page.join(raw).ok()
}
