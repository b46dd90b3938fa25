//! Cart state and the page-bound cart widget.
//!
//! [`Cart`] is a plain value: an insertion-ordered set of product ids plus
//! the running total, with no page coupling, so the selection logic can be
//! tested in isolation. [`CartWidget`] binds a cart to a [`Page`] backend
//! and reproduces the storefront interactions: updating the visible total,
//! raising shopper-facing alerts and navigating to checkout.

use std::sync::Arc;

use log::{debug, warn};

use crate::{Alert, CartConfig, Error, Page, Price, ProductId, Result};

/// Outcome of an add-to-cart interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was inserted and its price accumulated
    Added,
    /// The product was already selected; state is unchanged
    AlreadyInCart,
}

/// The shopper's current selection and running total
///
/// Invariant: the total always equals the sum of the prices of exactly the
/// selected products. The only mutation path adds an id and its price
/// together, and there is no remove operation, so the invariant holds by
/// construction. Ids iterate in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    ids: Vec<ProductId>,
    total: Price,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the selection
    ///
    /// A duplicate id is a no-op yielding [`AddOutcome::AlreadyInCart`].
    /// Negative prices are rejected rather than subtracted from the total.
    pub fn add(&mut self, id: ProductId, price: Price) -> Result<AddOutcome> {
        if price < 0 {
            return Err(Error::InvalidPrice(price.to_string()));
        }
        if self.contains(id) {
            return Ok(AddOutcome::AlreadyInCart);
        }
        self.ids.push(id);
        self.total += price;
        debug!("cart: added product {} for {}, total {}", id, price, self.total);
        Ok(AddOutcome::Added)
    }

    /// Add a product from its raw control attributes (`buy-id`, `data-price`)
    ///
    /// Malformed attributes are rejected with a typed error and leave the
    /// cart unchanged; a storefront page with a broken attribute must not
    /// silently corrupt the total.
    pub fn add_from_attrs(&mut self, id_attr: &str, price_attr: &str) -> Result<AddOutcome> {
        let id: ProductId = id_attr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidProductId(id_attr.to_string()))?;
        let price: Price = price_attr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPrice(price_attr.to_string()))?;
        self.add(id, price)
    }

    /// Whether the product is already selected
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected product ids, in insertion order
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Running total of the selection
    pub fn total(&self) -> Price {
        self.total
    }

    /// Number of selected products
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been selected yet
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checkout navigation target, or `None` for an empty cart
    ///
    /// The shape is `<path>/<comma-joined-ids>&<total>`. The `&` suffix is
    /// not a standard query string but the backend route expects exactly
    /// this string, so it is preserved verbatim.
    pub fn checkout_url(&self, path: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let ids = self
            .ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("{}/{}&{}", path, ids, self.total))
    }
}

type AlertHandler = Arc<dyn Fn(&Alert) + Send + Sync>;

/// A cart bound to a page backend
///
/// Owns the [`Cart`] state for the lifetime of the page, mirrors the total
/// into the page's total element and performs the checkout navigation.
/// Shopper-facing warnings (duplicate add, empty-cart checkout) are
/// delivered to the handler registered with [`CartWidget::on_alert`].
pub struct CartWidget<P: Page> {
    cart: Cart,
    page: P,
    config: CartConfig,
    on_alert: Option<AlertHandler>,
}

impl<P: Page> CartWidget<P> {
    /// Create a widget over a page backend
    pub fn new(page: P, config: CartConfig) -> Self {
        Self {
            cart: Cart::new(),
            page,
            config,
            on_alert: None,
        }
    }

    /// Current cart state
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The underlying page backend
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Consume the widget and return the page backend
    pub fn into_page(self) -> P {
        self.page
    }

    /// Register a handler for shopper-facing alerts
    pub fn on_alert<F>(&mut self, cb: F)
    where
        F: Fn(&Alert) + Send + Sync + 'static,
    {
        self.on_alert = Some(Arc::new(cb));
    }

    /// Remove a previously registered alert handler if any
    pub fn clear_on_alert(&mut self) {
        self.on_alert = None;
    }

    fn raise(&self, alert: Alert) {
        warn!("cart alert: {}", alert.message());
        if let Some(cb) = &self.on_alert {
            cb(&alert);
        }
    }

    /// Handle an add-to-cart interaction
    ///
    /// On success the total element is rewritten; on a duplicate the
    /// duplicate-item alert is raised and both cart and page are left
    /// unchanged.
    pub fn add_to_cart(&mut self, id: ProductId, price: Price) -> Result<AddOutcome> {
        match self.cart.add(id, price)? {
            AddOutcome::Added => {
                self.sync_total_display()?;
                Ok(AddOutcome::Added)
            }
            AddOutcome::AlreadyInCart => {
                self.raise(Alert::DuplicateItem { id });
                Ok(AddOutcome::AlreadyInCart)
            }
        }
    }

    /// Handle an add-to-cart interaction from raw control attributes
    pub fn add_to_cart_from_attrs(&mut self, id_attr: &str, price_attr: &str) -> Result<AddOutcome> {
        let id: ProductId = id_attr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidProductId(id_attr.to_string()))?;
        let price: Price = price_attr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPrice(price_attr.to_string()))?;
        self.add_to_cart(id, price)
    }

    /// Rewrite the total element from the current cart state
    pub fn sync_total_display(&mut self) -> Result<()> {
        let text = format!("{} {}", self.cart.total(), self.config.currency_suffix);
        self.page.set_text(&self.config.total_element_id, &text)
    }

    /// Handle the make-purchase interaction
    ///
    /// Returns `Ok(true)` when the page was navigated to the checkout
    /// target. An empty cart raises the choose-an-item alert and returns
    /// `Ok(false)` without navigating.
    pub fn checkout(&mut self) -> Result<bool> {
        match self.cart.checkout_url(&self.config.checkout_path) {
            Some(url) => {
                debug!("cart: checkout total {}", self.cart.total());
                self.page.navigate(&url)?;
                Ok(true)
            }
            None => {
                self.raise(Alert::EmptyCart);
                Ok(false)
            }
        }
    }
}
