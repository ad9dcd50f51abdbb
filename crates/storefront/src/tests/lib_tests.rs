use storage::MemoryStore;

use super::*;

async fn storefront_on(store: Arc<MemoryStore>) -> Storefront {
    Storefront::restore(StoreAdapter::new(store), Arc::new(DemoTokenIssuer)).await
}

#[tokio::test]
async fn fresh_store_gives_empty_anonymous_light_storefront() {
    let storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    assert!(storefront.cart().is_empty());
    assert!(storefront.session().is_none());
    assert_eq!(storefront.theme(), Theme::Light);
    assert_eq!(storefront.total(), 0.0);
    assert_eq!(storefront.catalog().courses().len(), 4);
    assert_eq!(storefront.media().len(), 2);
}

#[tokio::test]
async fn state_survives_restart_on_same_store() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut storefront = storefront_on(store.clone()).await;
        storefront
            .add_course(&CourseId::from("c-js"))
            .await
            .expect("add js");
        storefront
            .add_course(&CourseId::from("c-js"))
            .await
            .expect("add js again");
        storefront
            .add_course(&CourseId::from("c-html"))
            .await
            .expect("add html");
        storefront.login("a@b.com", "x").await.expect("login");
        storefront.toggle_theme().await.expect("toggle");
    }

    let storefront = storefront_on(store).await;
    assert_eq!(storefront.cart().total_qty(), 3);
    assert_eq!(storefront.total(), 2.0 * 49.0 + 29.0);
    assert_eq!(
        storefront.session().map(|s| s.user.name.as_str()),
        Some("a")
    );
    assert_eq!(storefront.theme(), Theme::Dark);
}

#[tokio::test]
async fn unknown_course_is_rejected_without_writing() {
    let store = Arc::new(MemoryStore::new());
    let mut storefront = storefront_on(store.clone()).await;
    let err = storefront
        .add_course(&CourseId::from("c-cobol"))
        .await
        .expect_err("unknown");
    assert!(matches!(err, StorefrontError::UnknownCourse(id) if id.as_str() == "c-cobol"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn mutations_publish_events() {
    let mut storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    let mut events = storefront.subscribe();

    storefront
        .add_course(&CourseId::from("c-css"))
        .await
        .expect("add");
    assert_eq!(
        events.recv().await.expect("event"),
        StorefrontEvent::CartChanged {
            total_qty: 1,
            total_price: 39.0
        }
    );

    assert!(!storefront
        .inc_qty(&CourseId::from("c-missing"))
        .await
        .expect("inc"));
    storefront.signup("ann@b.com", "Ann").await.expect("signup");
    assert_eq!(
        events.recv().await.expect("event"),
        StorefrontEvent::SessionChanged {
            user_name: Some("Ann".into())
        }
    );

    storefront.logout().await.expect("logout");
    assert_eq!(
        events.recv().await.expect("event"),
        StorefrontEvent::SessionChanged { user_name: None }
    );
}

#[tokio::test]
async fn checkout_requires_session() {
    let mut storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    storefront
        .add_course(&CourseId::from("c-react"))
        .await
        .expect("add");
    assert!(matches!(
        storefront.checkout(),
        Err(StorefrontError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn checkout_of_empty_cart_places_nothing() {
    let mut storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    storefront.login("a@b.com", "x").await.expect("login");
    assert_eq!(storefront.checkout().expect("checkout"), None);
}

#[tokio::test]
async fn checkout_returns_order_id_and_keeps_cart() {
    let mut storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    let mut events = storefront.subscribe();
    storefront.login("a@b.com", "x").await.expect("login");
    storefront
        .add_course(&CourseId::from("c-react"))
        .await
        .expect("add");

    let order_id = storefront
        .checkout()
        .expect("checkout")
        .expect("order placed");
    assert!(!order_id.as_str().is_empty());
    assert_eq!(storefront.cart().total_qty(), 1);

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    assert_eq!(last, Some(StorefrontEvent::OrderPlaced { order_id }));
}

#[tokio::test]
async fn custom_catalog_replaces_builtin_courses() {
    let catalog = Catalog::new(vec![Course {
        id: CourseId::from("c-rust"),
        title: "Rust Ownership".into(),
        price: 59.0,
        level: shared::domain::Level::Intermediate,
        hours: 9,
    }]);
    let mut storefront = storefront_on(Arc::new(MemoryStore::new()))
        .await
        .with_catalog(catalog);

    storefront
        .add_course(&CourseId::from("c-rust"))
        .await
        .expect("add");
    assert!(storefront
        .add_course(&CourseId::from("c-js"))
        .await
        .is_err());
    assert_eq!(storefront.total(), 59.0);
}

#[tokio::test]
async fn looks_up_media_items() {
    let storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    assert_eq!(
        storefront
            .media_item(&MediaId::from("m2"))
            .expect("media")
            .title,
        "Sample Audio Lecture"
    );
    assert!(matches!(
        storefront.media_item(&MediaId::from("m9")),
        Err(StorefrontError::UnknownMedia(_))
    ));
}

#[tokio::test]
async fn login_returns_session_and_announces_it() {
    let mut storefront = storefront_on(Arc::new(MemoryStore::new())).await;
    let mut events = storefront.subscribe();

    let name = storefront
        .login("ada@example.com", "pw")
        .await
        .expect("login")
        .user
        .name
        .clone();
    assert_eq!(name, "ada");
    assert_eq!(
        events.recv().await.expect("event"),
        StorefrontEvent::SessionChanged {
            user_name: Some("ada".into())
        }
    );
    assert!(storefront.session().is_some());
}

#[tokio::test]
async fn catalog_course_with_bad_price_never_reaches_the_cart() {
    let store = Arc::new(MemoryStore::new());
    let catalog = Catalog::new(vec![
        Course {
            id: CourseId::from("c-js"),
            title: "Modern JavaScript".into(),
            price: 49.0,
            level: shared::domain::Level::Intermediate,
            hours: 12,
        },
        Course {
            id: CourseId::from("c-free"),
            title: "Broken Listing".into(),
            price: -1.0,
            level: shared::domain::Level::Beginner,
            hours: 1,
        },
    ]);
    let mut storefront = storefront_on(store.clone()).await.with_catalog(catalog.clone());

    storefront
        .add_course(&CourseId::from("c-js"))
        .await
        .expect("add");
    assert!(matches!(
        storefront.add_course(&CourseId::from("c-free")).await,
        Err(StorefrontError::InvalidCart(_))
    ));
    assert_eq!(storefront.cart().len(), 1);

    let restarted = storefront_on(store).await.with_catalog(catalog);
    assert_eq!(restarted.cart().len(), 1);
    assert_eq!(restarted.total(), 49.0);
}
