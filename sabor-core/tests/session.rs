//! End-to-end session flow: browse, order, edit the menu

use axum::http::StatusCode;
use sabor_api_mock::MockState;
use sabor_client::OneshotHttpClient;
use sabor_core::{
    AdminError, AppConfig, AppSession, DishForm, MemoryMenuCache, MenuSource, SessionError,
    SyncOutcome,
};
use shared::Category;

fn session(state: &MockState) -> AppSession<OneshotHttpClient> {
    let mut config = AppConfig::default();
    config.retry_base_delay_ms = 0;
    config.default_contact = "5511900000000".to_string();
    config.waiters.insert("Ana".to_string(), "5511911112222".to_string());

    let http = OneshotHttpClient::new(sabor_api_mock::router(state.clone()));
    AppSession::new(&config, http, Box::new(MemoryMenuCache::new()))
}

#[tokio::test]
async fn test_browse_and_order() {
    let state = MockState::default();
    let mut session = session(&state);
    assert_eq!(session.start().await, MenuSource::Remote);
    assert_eq!(state.counts().await.health, 1);

    session.add_to_cart(Category::Entradas, 1).unwrap();
    session.add_to_cart(Category::Entradas, 1).unwrap();
    session.add_to_cart(Category::PratosPrincipais, 1).unwrap();
    assert_eq!(session.cart().total(), "100,70");

    session.set_table(Some("4".to_string()));
    session.set_waiter(Some("Ana".to_string()));
    let handoff = session.prepare_order().unwrap();
    assert_eq!(handoff.phone, "5511911112222");
    assert!(handoff.message.starts_with("*Pedido - Mesa 4*\n2x Bruschetta Tradicional (Entradas) - R$ 18,90"));
    assert!(handoff.message.ends_with("Total: R$ 100,70"));
    assert_eq!(session.cart().len(), 2);
}

#[tokio::test]
async fn test_unknown_dish_and_empty_order() {
    let state = MockState::default();
    let mut session = session(&state);
    session.start().await;

    assert!(matches!(
        session.add_to_cart(Category::Bebidas, 424242),
        Err(SessionError::DishNotFound { .. })
    ));
    assert!(matches!(session.prepare_order(), Err(SessionError::Order(_))));
}

#[tokio::test]
async fn test_unknown_waiter_uses_default_contact() {
    let state = MockState::default();
    let mut session = session(&state);
    session.start().await;
    session.add_to_cart(Category::Sobremesas, 2).unwrap();
    session.set_waiter(Some("Zé".to_string()));

    assert_eq!(session.prepare_order().unwrap().phone, "5511900000000");
}

#[tokio::test]
async fn test_admin_form_submission() {
    let state = MockState::default();
    let mut session = session(&state);
    session.start().await;
    let before = session.menu().menu().len();

    let mut form = DishForm::new(Category::Bebidas);
    form.name = "Caipirinha".to_string();
    form.description = "Limão e cachaça".to_string();
    assert!(matches!(
        session.submit_dish(&form).await,
        Err(SessionError::Admin(AdminError::MissingPrice))
    ));
    assert_eq!(session.menu().menu().len(), before);
    assert_eq!(state.counts().await.put_menu, 0);

    form.price = "18,90".to_string();
    let added = session.submit_dish(&form).await.unwrap();
    assert_eq!(added.sync, SyncOutcome::Synced);
    assert_eq!(session.menu().menu().len(), before + 1);

    // newly added dish is orderable
    session.add_to_cart(Category::Bebidas, added.dish.id).unwrap();
    assert_eq!(session.cart().total(), "18,90");

    assert_eq!(
        session.remove_dish(Category::Bebidas, added.dish.id).await,
        SyncOutcome::Synced
    );
    assert_eq!(state.counts().await.put_menu, 2);
}

#[tokio::test]
async fn test_start_while_api_is_down() {
    let state = MockState::default();
    state.set_down(true).await;
    let mut session = session(&state);

    assert_eq!(session.start().await, MenuSource::Fallback);
    assert!(session.menu().is_offline());
    session.add_to_cart(Category::Entradas, 2).unwrap();

    state.set_down(false).await;
    assert_eq!(session.reconnect().await, SyncOutcome::Unchanged);
    assert!(!session.menu().is_offline());

    state.fail_puts(Some(StatusCode::BAD_GATEWAY)).await;
    let mut form = DishForm::new(Category::Entradas);
    form.name = "Coxinha".into();
    form.description = "Frango".into();
    form.price = "R$ 7,50".into();
    let added = session.submit_dish(&form).await.unwrap();
    assert!(matches!(added.sync, SyncOutcome::LocalOnly { .. }));
    assert!(session.menu().has_pending_changes());
}
