//! Page backends: in-memory, parsed HTML, and HTTP-fetched
//!
//! Every backend implements the [`Page`](crate::Page) trait, so cart and
//! receipt logic never depend on which one is behind them. `MemoryPage` is
//! the test double, `HtmlPage` serves a parsed storefront document, and
//! `HttpPage` (feature `http`) fetches documents over the network and
//! follows navigations.

pub mod html;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;

pub use html::{AddToCartControl, HtmlPage};
#[cfg(feature = "http")]
pub use http::HttpPage;
pub use memory::MemoryPage;
