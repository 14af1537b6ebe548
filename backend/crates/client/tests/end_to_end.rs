//! Client against a live catalog server on an ephemeral port.

use catalog::{CatalogConfig, MemoryCatalogRepository, catalog_router_generic};
use catalog_client::{
    AuthState, CatalogClient, ClientConfig, ClientError, OrderListOptions, ProductListOptions,
};
use kernel::model::{NewOrder, NewProduct, NewUser, ProductChange};
use tokio::net::TcpListener;

const ADMIN_SECRET: &str = "open sesame";

/// Start a server and return its base URL
async fn spawn_server() -> String {
    let config = CatalogConfig::development().with_admin("admin", ADMIN_SECRET);
    let app = catalog_router_generic(MemoryCatalogRepository::new(), config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(endpoint: &str, credentials: Option<(&str, &str)>) -> CatalogClient {
    let mut config = ClientConfig::new(endpoint);
    if let Some((identifier, secret)) = credentials {
        config = config.with_credentials(identifier, secret);
    }
    CatalogClient::new(config).unwrap()
}

fn lamp() -> NewProduct {
    NewProduct {
        description: "Lamp".to_string(),
        tags: vec!["light".to_string()],
        ..Default::default()
    }
}

async fn register(endpoint: &str, username: &str) {
    let view = client(endpoint, None)
        .create_user(&NewUser {
            username: username.to_string(),
            secret: "pw".to_string(),
            email: format!("{username}@x.com"),
        })
        .await
        .unwrap();
    assert_eq!(view.username, username);
}

#[tokio::test]
async fn test_admin_manages_products() {
    let endpoint = spawn_server().await;
    let admin = client(&endpoint, Some(("admin", ADMIN_SECRET)));

    let product = admin.create_product(&lamp()).await.unwrap();
    assert_eq!(admin.auth_state().await, AuthState::Authenticated);
    assert!(
        admin
            .session()
            .has_session(admin.endpoint(), "catalog_session")
    );

    let change = ProductChange {
        description: Some("Desk lamp".to_string()),
        ..Default::default()
    };
    let edited = admin.edit_product(product.id, &change).await.unwrap();
    assert_eq!(edited.description, "Desk lamp");

    // Reads are public
    let anonymous = client(&endpoint, None);
    let fetched = anonymous.get_product(product.id).await.unwrap();
    assert_eq!(fetched, Some(edited));

    let options = ProductListOptions {
        tag: Some("light".to_string()),
        ..Default::default()
    };
    assert_eq!(anonymous.list_products(&options).await.unwrap().len(), 1);

    assert!(admin.delete_product(product.id).await.unwrap().success);
    assert_eq!(anonymous.get_product(product.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_anonymous_and_user_writes_are_forbidden() {
    let endpoint = spawn_server().await;
    register(&endpoint, "alice").await;

    let anonymous = client(&endpoint, None);
    let err = anonymous.create_product(&lamp()).await.unwrap_err();
    assert_eq!(err, ClientError::Forbidden("Forbidden".to_string()));

    let alice = client(&endpoint, Some(("alice", "pw")));
    let err = alice.create_product(&lamp()).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    // The login itself succeeded
    assert_eq!(alice.auth_state().await, AuthState::Authenticated);
}

#[tokio::test]
async fn test_wrong_secret_fails_login() {
    let endpoint = spawn_server().await;
    register(&endpoint, "alice").await;

    let alice = client(&endpoint, Some(("alice", "nope")));
    let err = alice.create_order(&NewOrder::default()).await.unwrap_err();

    assert_eq!(err, ClientError::AuthFailed("Invalid credentials".to_string()));
    assert_eq!(alice.auth_state().await, AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_orders_are_scoped_to_their_owner() {
    let endpoint = spawn_server().await;
    register(&endpoint, "alice").await;
    register(&endpoint, "bob").await;

    let alice = client(&endpoint, Some(("alice", "pw")));
    let bob = client(&endpoint, Some(("bob", "pw")));

    let order = alice
        .create_order(&NewOrder {
            username: Some("bob".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(order.username, "alice");

    bob.create_order(&NewOrder::default()).await.unwrap();

    let mine = alice.list_orders(&OrderListOptions::default()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order.id);

    let admin = client(&endpoint, Some(("admin", ADMIN_SECRET)));
    let all = admin.list_orders(&OrderListOptions::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_orders_need_a_session() {
    let endpoint = spawn_server().await;
    let anonymous = client(&endpoint, None);

    let err = anonymous
        .list_orders(&OrderListOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&endpoint, None)
        .get_product(kernel::id::ProductId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
