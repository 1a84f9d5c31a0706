//! Fetch the menu from a running API and print it.
//!
//! ```text
//! cargo run -p sabor-api-mock &
//! cargo run -p sabor-client --example fetch_menu -- http://127.0.0.1:3000
//! ```

use sabor_client::{ClientConfig, MenuApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());

    let http = ClientConfig::new(base_url).with_timeout(5).build_http_client()?;
    let api = MenuApi::new(http);

    api.health().await?;
    let menu = api.fetch_menu().await?;

    for (category, dishes) in menu.iter() {
        println!("== {} ==", category.label());
        for dish in dishes {
            println!("  [{}] {} - {}", dish.id, dish.name, dish.price);
        }
    }
    Ok(())
}
