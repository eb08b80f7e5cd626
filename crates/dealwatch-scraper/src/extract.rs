//! Deal-card extraction from deals-page markup.
//!
//! Each card is located by a fixed class marker, then five sub-elements are
//! looked up independently. Any lookup may miss; a miss leaves the field at
//! its sentinel from [`DealRecord::default`].

use std::sync::OnceLock;

use dealwatch_core::DealRecord;
use scraper::{ElementRef, Html, Selector};

const CARD: &str = ".DealGridItem-module__dealItem";
const NAME: &str = ".DealContent-module__truncate";
const PRICE: &str = ".a-price-whole";
const DISCOUNT: &str = ".a-color-price";
const DISCOUNT_FALLBACK: &str = ".a-size-mini.a-color-base";
const TIMER: &str = ".a-declarative";
const LINK: &str = "a.a-link-normal";

const DURATION_ATTR: &str = "data-deal-duration";

struct CardSelectors {
    card: Selector,
    name: Selector,
    price: Selector,
    discount: Selector,
    discount_fallback: Selector,
    timer: Selector,
    link: Selector,
}

fn selectors() -> &'static CardSelectors {
    static SELECTORS: OnceLock<CardSelectors> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        let parse = |css: &str| Selector::parse(css).expect("valid deal card selector");
        CardSelectors {
            card: parse(CARD),
            name: parse(NAME),
            price: parse(PRICE),
            discount: parse(DISCOUNT),
            discount_fallback: parse(DISCOUNT_FALLBACK),
            timer: parse(TIMER),
            link: parse(LINK),
        }
    })
}

/// Turns deals-page markup into [`DealRecord`]s.
#[derive(Debug, Clone)]
pub struct DealExtractor {
    origin: String,
}

impl DealExtractor {
    /// `origin` is the scheme+host that relative links are resolved against.
    #[must_use]
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_owned(),
        }
    }

    /// Extracts every deal card in document order.
    ///
    /// Markup without any recognizable card yields an empty `Vec`; this is
    /// never an error.
    #[must_use]
    pub fn extract(&self, markup: &str) -> Vec<DealRecord> {
        let document = Html::parse_document(markup);
        let sel = selectors();

        document
            .select(&sel.card)
            .map(|card| self.extract_card(card, sel))
            .collect()
    }

    fn extract_card(&self, card: ElementRef<'_>, sel: &CardSelectors) -> DealRecord {
        let mut record = DealRecord::default();

        if let Some(name) = first_text(card, &sel.name) {
            record.product_name = name;
        }
        if let Some(price) = first_text(card, &sel.price) {
            record.price = price;
        }
        if let Some(discount) =
            first_text(card, &sel.discount).or_else(|| first_text(card, &sel.discount_fallback))
        {
            record.discount_label = discount;
        }
        if let Some(duration) = first_attr(card, &sel.timer, DURATION_ATTR) {
            record.remaining_duration = duration;
        }
        if let Some(href) = first_attr(card, &sel.link, "href") {
            record.link = self.resolve_link(&href);
        }

        record
    }

    /// Makes `href` absolute against the configured origin.
    ///
    /// Hrefs that already carry a scheme are kept; protocol-relative hrefs get
    /// `https:`; everything else is treated as a path under the origin.
    pub(crate) fn resolve_link(&self, href: &str) -> String {
        if href.starts_with("https://") || href.starts_with("http://") {
            return href.to_owned();
        }
        if let Some(rest) = href.strip_prefix("//") {
            return format!("https://{rest}");
        }
        if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            format!("{}/{href}", self.origin)
        }
    }
}

/// Whitespace-normalized text of the first match, if it has any.
///
/// Text nodes are joined as they appear in the markup before whitespace is
/// collapsed, so `49<span>,</span>` reads `49,`.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    let raw = element.text().collect::<String>();
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Trimmed, non-empty attribute value of the first match.
fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
