//! End-to-end checkout flow over a local HTTP server
#![cfg(feature = "http")]

use std::sync::Once;

use shopfront::{export_order_details, CartConfig, CartWidget, HttpPage, Page};
use tiny_http::{Response, Server};

static INIT: Once = Once::new();

const STOREFRONT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Shop</title></head>
<body>
<a class="add-to-cart" buy-id="1" data-price="100">Add</a>
<a class="add-to-cart" buy-id="2" data-price="250">Add</a>
<span id="cart-total">0 ₽</span>
</body>
</html>"#;

const CONFIRMATION: &str = r#"<!DOCTYPE html>
<html>
<head><title>Order placed</title></head>
<body>
<p id="orderNumber">A-100</p>
<p id="orderDate">2024-01-01</p>
<p id="orderAmount">350 ₽</p>
</body>
</html>"#;

/// Serve the storefront on "/" and the confirmation under "/buy/..."
fn start_test_server() -> String {
    INIT.call_once(|| {
        std::thread::spawn(|| {
            let server = Server::http("127.0.0.1:18091").unwrap();
            for request in server.incoming_requests() {
                let path = request.url().to_string();
                let response = if path == "/" {
                    Response::from_string(STOREFRONT)
                } else if path.starts_with("/buy/") {
                    Response::from_string(CONFIRMATION)
                } else {
                    Response::from_string("Not Found").with_status_code(404)
                };
                let _ = request.respond(response);
            }
        });
        // Give the server time to start
        std::thread::sleep(std::time::Duration::from_millis(100));
    });

    "http://127.0.0.1:18091".to_string()
}

#[test]
fn test_checkout_follows_navigation() {
    let base_url = start_test_server();

    let page = HttpPage::fetch(&base_url).expect("failed to fetch storefront");
    let controls = page.add_to_cart_controls().to_vec();
    assert_eq!(controls.len(), 2);

    let mut widget = CartWidget::new(page, CartConfig::default());
    for control in &controls {
        widget
            .add_to_cart_from_attrs(&control.buy_id, &control.data_price)
            .expect("control rejected");
    }
    assert!(widget.checkout().expect("checkout failed"));

    // The navigation was followed; the widget now sits on the confirmation.
    let page = widget.into_page();
    assert!(page.current_url().ends_with("/buy/1,2&350"));
    assert_eq!(page.text_of("orderNumber").unwrap(), "A-100");

    // And the receipt can be exported straight from the fetched page.
    let dir = std::env::temp_dir().join(format!("shopfront-http-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = export_order_details(&page, 350, &dir).unwrap();
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fetch_reports_unreachable_server() {
    let result = HttpPage::fetch_with_timeout("http://127.0.0.1:1/", 500);
    assert!(result.is_err());
}
