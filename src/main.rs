//! Headless storefront driver.
//!
//! `export` renders the order-receipt PDF from a confirmation page;
//! `checkout` replays every add-to-cart control on a storefront page and
//! prints the checkout URL without following it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use shopfront::{export_order_details, CartConfig, CartWidget, HtmlPage, Price};

#[derive(Parser)]
#[command(name = "shopfront", about = "Storefront cart driver and receipt exporter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the order receipt PDF from a confirmation page
    Export {
        /// Page to read: a local HTML file, or an http(s) URL with the `http` feature
        input: String,
        /// Total cost emitted on the "Total Amount" line
        #[arg(long)]
        total: Price,
        /// Directory the PDF is written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Add every add-to-cart control on a storefront page, then print the checkout URL
    Checkout {
        /// Page to read: a local HTML file, or an http(s) URL with the `http` feature
        input: String,
        /// Print the cart snapshot and checkout URL as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_page(input: &str) -> Result<HtmlPage> {
    if input.starts_with("http://") || input.starts_with("https://") {
        #[cfg(feature = "http")]
        {
            let client = reqwest::blocking::Client::new();
            let body = client
                .get(input)
                .send()
                .and_then(|r| r.text())
                .with_context(|| format!("failed to fetch {}", input))?;
            return Ok(HtmlPage::parse(&body));
        }
        #[cfg(not(feature = "http"))]
        bail!("built without the `http` feature; only local files are supported");
    }
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input))?;
    Ok(HtmlPage::parse(&html))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Export { input, total, out_dir } => {
            let page = load_page(&input)?;
            let path = export_order_details(&page, total, &out_dir)
                .context("failed to export order details")?;
            println!("Wrote {}", path.display());
        }
        Command::Checkout { input, json } => {
            let page = load_page(&input)?;
            let controls = page.add_to_cart_controls().to_vec();
            if controls.is_empty() {
                bail!("no add-to-cart controls found on the page");
            }

            let mut widget = CartWidget::new(page, CartConfig::default());
            widget.on_alert(|alert| eprintln!("alert: {}", alert.message()));
            for control in &controls {
                widget
                    .add_to_cart_from_attrs(&control.buy_id, &control.data_price)
                    .with_context(|| format!("rejected control buy-id='{}'", control.buy_id))?;
            }

            if widget.checkout()? {
                // HtmlPage records the navigation instead of following it.
                let url = widget
                    .page()
                    .last_navigation()
                    .context("checkout did not record a navigation")?;
                if json {
                    let snapshot = serde_json::json!({
                        "ids": widget.cart().ids(),
                        "total": widget.cart().total(),
                        "url": url,
                    });
                    println!("{}", snapshot);
                } else {
                    println!("{}", url);
                }
            }
        }
    }

    Ok(())
}
