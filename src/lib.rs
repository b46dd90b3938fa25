//! Shopfront widgets
//!
//! A storefront cart widget and an order-receipt PDF exporter that run
//! headless, against any page backend that can serve element text.
//!
//! # Features
//!
//! - **Cart widget**: insertion-ordered selection of product ids with a
//!   running total, duplicate-add warnings and a checkout navigation
//! - **Receipt exporter**: fixed-layout PDF confirmation built from the
//!   order details rendered on the page
//! - **Swappable page backends**: in-memory, parsed HTML, or HTTP-fetched
//!
//! # Example
//!
//! ```
//! use shopfront::{CartConfig, CartWidget, MemoryPage};
//!
//! # fn main() -> shopfront::Result<()> {
//! let page = MemoryPage::new().with_text("cart-total", "0 ₽");
//! let mut widget = CartWidget::new(page, CartConfig::default());
//! widget.add_to_cart(1, 100)?;
//! widget.add_to_cart(2, 250)?;
//! assert!(widget.checkout()?);
//! assert_eq!(widget.page().last_navigation(), Some("/buy/1,2&350"));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod cart;
pub use cart::{AddOutcome, Cart, CartWidget};

// Page backends (memory, parsed HTML, HTTP-fetched)
pub mod page;
pub use page::html::{AddToCartControl, HtmlPage};
#[cfg(feature = "http")]
pub use page::http::HttpPage;
pub use page::memory::MemoryPage;

pub mod receipt;
pub use receipt::{export_order_details, Receipt};

/// Product identifier, as carried in the `buy-id` attribute.
pub type ProductId = u64;

/// Whole-ruble price, as carried in the `data-price` attribute.
pub type Price = i64;

/// Configuration for the cart widget
///
/// The defaults reproduce the storefront page contract exactly: the running
/// total is written to the element with id `cart-total`, formatted with a
/// trailing ruble sign, and checkout navigates under `/buy`.
///
/// # Examples
///
/// ```
/// let cfg = shopfront::CartConfig::default();
/// assert_eq!(cfg.total_element_id, "cart-total");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Element id that displays the running total
    pub total_element_id: String,
    /// Suffix appended to the displayed total (separated by one space)
    pub currency_suffix: String,
    /// Path prefix of the checkout navigation target
    pub checkout_path: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            total_element_id: "cart-total".to_string(),
            currency_suffix: "₽".to_string(),
            checkout_path: "/buy".to_string(),
        }
    }
}

/// A user-visible warning raised by the cart widget
///
/// Warnings are not errors: the cart state is left unchanged and the
/// operation that raised them still returns `Ok`. They correspond to the
/// blocking alerts of the storefront page and are delivered through the
/// handler registered with [`CartWidget::on_alert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alert {
    /// The product is already in the cart; adding it again is a no-op
    DuplicateItem { id: ProductId },
    /// Checkout was requested with nothing in the cart
    EmptyCart,
}

impl Alert {
    /// Display text shown to the shopper
    pub fn message(&self) -> &'static str {
        match self {
            Alert::DuplicateItem { .. } => {
                "This item is already in the cart. It cannot be added again."
            }
            Alert::EmptyCart => "Choose an item to purchase.",
        }
    }
}

/// Order details snapshotted from the page at export time
///
/// The three values are copied verbatim from the `orderNumber`, `orderDate`
/// and `orderAmount` elements; they are display strings and are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Text of the `orderNumber` element
    pub order_number: String,
    /// Text of the `orderDate` element
    pub order_date: String,
    /// Text of the `orderAmount` element
    pub order_amount: String,
}

/// Core trait for page backends
///
/// A minimal read/write surface over the storefront page: element text by
/// id, plus navigation. Cart and receipt logic only ever touch the page
/// through this trait, so both can be driven by an in-memory double in
/// tests or by a fetched document in a headless driver.
pub trait Page {
    /// Text content of the element with the given id
    ///
    /// Returns [`Error::MissingElement`] when no such element exists.
    fn text_of(&self, id: &str) -> Result<String>;

    /// Replace the text content of the element with the given id
    fn set_text(&mut self, id: &str, value: &str) -> Result<()>;

    /// Navigate away from the current page
    ///
    /// Backends either record the target (memory, parsed HTML) or follow
    /// it (HTTP). After a real navigation no further cart interaction is
    /// meaningful.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Whether an element with the given id is present
    fn has_element(&self, id: &str) -> bool {
        self.text_of(id).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.total_element_id, "cart-total");
        assert_eq!(config.currency_suffix, "₽");
        assert_eq!(config.checkout_path, "/buy");
    }

    #[test]
    fn test_alert_messages() {
        let dup = Alert::DuplicateItem { id: 7 };
        assert!(dup.message().contains("already in the cart"));
        assert!(Alert::EmptyCart.message().contains("Choose an item"));
    }
}
