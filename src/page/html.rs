//! A page backend over a parsed storefront HTML document.
//!
//! The document is parsed once; element text is indexed by id and the
//! add-to-cart controls are collected with their raw attributes. Writes and
//! navigations mutate/record in memory only, which is what a headless
//! driver wants: the markup itself is out of scope.

use std::collections::HashMap;

use log::debug;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::{Error, Page, Result};

/// Raw attributes of one `.add-to-cart` control
///
/// The attributes are kept as strings; validation happens when they are fed
/// to the cart, so a malformed control is rejected there instead of
/// corrupting the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartControl {
    /// The `buy-id` attribute, empty if absent
    pub buy_id: String,
    /// The `data-price` attribute, empty if absent
    pub data_price: String,
}

/// A page backend serving a parsed HTML document
#[derive(Debug, Clone)]
pub struct HtmlPage {
    texts: HashMap<String, String>,
    controls: Vec<AddToCartControl>,
    navigations: Vec<String>,
}

impl HtmlPage {
    /// Parse a storefront document
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let id_sel = Selector::parse("[id]").unwrap();
        let control_sel = Selector::parse(".add-to-cart").unwrap();

        let mut texts = HashMap::new();
        for element in document.select(&id_sel) {
            if let Some(id) = element.value().attr("id") {
                let text = element.text().collect::<String>().trim().to_string();
                texts.insert(id.to_string(), text);
            }
        }

        let controls = document
            .select(&control_sel)
            .map(|element| AddToCartControl {
                buy_id: element.value().attr("buy-id").unwrap_or_default().to_string(),
                data_price: element
                    .value()
                    .attr("data-price")
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect::<Vec<_>>();

        debug!(
            "parsed page: {} id'd elements, {} add-to-cart controls",
            texts.len(),
            controls.len()
        );

        Self {
            texts,
            controls,
            navigations: Vec::new(),
        }
    }

    /// The add-to-cart controls found in the document, in document order
    pub fn add_to_cart_controls(&self) -> &[AddToCartControl] {
        &self.controls
    }

    /// All recorded navigation targets, oldest first
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// The most recent navigation target, if any
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(|s| s.as_str())
    }
}

impl Page for HtmlPage {
    fn text_of(&self, id: &str) -> Result<String> {
        self.texts
            .get(id)
            .cloned()
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    fn set_text(&mut self, id: &str, value: &str) -> Result<()> {
        match self.texts.get_mut(id) {
            Some(text) => {
                *text = value.to_string();
                Ok(())
            }
            None => Err(Error::MissingElement(id.to_string())),
        }
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOREFRONT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Shop</title></head>
<body>
<a class="add-to-cart" buy-id="1" data-price="100">Add</a>
<a class="add-to-cart" buy-id="2" data-price="250">Add</a>
<span id="cart-total">0 ₽</span>
<p id="orderNumber">A-100</p>
<p id="orderDate">2024-01-01</p>
</body>
</html>"#;

    #[test]
    fn reads_element_text_by_id() {
        let page = HtmlPage::parse(STOREFRONT);
        assert_eq!(page.text_of("cart-total").unwrap(), "0 ₽");
        assert_eq!(page.text_of("orderNumber").unwrap(), "A-100");
        assert!(matches!(
            page.text_of("orderAmount"),
            Err(Error::MissingElement(_))
        ));
    }

    #[test]
    fn collects_controls_in_document_order() {
        let page = HtmlPage::parse(STOREFRONT);
        let controls = page.add_to_cart_controls();
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].buy_id, "1");
        assert_eq!(controls[0].data_price, "100");
        assert_eq!(controls[1].buy_id, "2");
    }

    #[test]
    fn missing_attributes_come_back_empty() {
        let page = HtmlPage::parse(r#"<a class="add-to-cart">Add</a>"#);
        let controls = page.add_to_cart_controls();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].buy_id, "");
        assert_eq!(controls[0].data_price, "");
    }

    #[test]
    fn set_text_requires_an_existing_element() {
        let mut page = HtmlPage::parse(STOREFRONT);
        page.set_text("cart-total", "350 ₽").unwrap();
        assert_eq!(page.text_of("cart-total").unwrap(), "350 ₽");
        assert!(page.set_text("no-such-id", "x").is_err());
    }

    #[test]
    fn navigation_is_recorded() {
        let mut page = HtmlPage::parse(STOREFRONT);
        page.navigate("/buy/1,2&350").unwrap();
        assert_eq!(page.last_navigation(), Some("/buy/1,2&350"));
    }
}
