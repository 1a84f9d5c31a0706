//! Load the menu, fill a cart and print the order handoff
//!
//! ```text
//! SABOR_API_URL=http://localhost:3000 cargo run -p sabor-core --example order_demo
//! ```

use sabor_core::{AppSession, setup_environment};
use shared::Category;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment();
    let mut session = AppSession::from_config(&config)?;

    let source = session.start().await;
    tracing::info!(?source, offline = session.menu().is_offline(), "Menu ready");

    for (category, dishes) in session.menu().menu().iter() {
        println!("== {} ==", category.label());
        for dish in dishes {
            println!("  [{}] {} - {}", dish.id, dish.name, dish.price);
        }
    }

    let picks: Vec<(Category, i64)> = session
        .menu()
        .menu()
        .iter()
        .filter_map(|(category, dishes)| dishes.first().map(|d| (category, d.id)))
        .collect();
    for (category, id) in picks {
        session.add_to_cart(category, id)?;
    }

    session.set_table(Some("7".to_string()));
    let handoff = session.prepare_order()?;
    println!("\n{}\n\n-> {}", handoff.message, handoff.link);
    Ok(())
}
