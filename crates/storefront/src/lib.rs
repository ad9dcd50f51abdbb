use std::sync::Arc;

use shared::{
    domain::{Course, CourseId, MediaId, MediaItem, OrderId, Session, Theme},
    protocol::StorefrontEvent,
};
use storage::StoreAdapter;
use tokio::sync::broadcast;
use tracing::info;

pub mod cart;
pub mod catalog;
pub mod credential;
pub mod error;
pub mod forms;
pub mod media;
pub mod session;
pub mod theme;

pub use cart::{Cart, CartService, CartSummary};
pub use catalog::Catalog;
pub use credential::{CredentialIssuer, DemoTokenIssuer, SignedTokenIssuer};
pub use error::StorefrontError;
pub use media::PlaybackProgress;
pub use session::SessionService;
pub use theme::ThemePreference;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The storefront's whole client state: catalog, cart, session and theme.
///
/// Every mutator writes through to the store before it returns and then
/// publishes a [`StorefrontEvent`] for whatever renders the state.
pub struct Storefront {
    catalog: Catalog,
    media: Vec<MediaItem>,
    cart: CartService,
    session: SessionService,
    theme: ThemePreference,
    events: broadcast::Sender<StorefrontEvent>,
}

impl Storefront {
    pub async fn restore(store: StoreAdapter, issuer: Arc<dyn CredentialIssuer>) -> Self {
        let theme = ThemePreference::restore(store.clone()).await;
        let cart = CartService::restore(store.clone()).await;
        let session = SessionService::restore(store, issuer).await;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(
            "storefront: restored theme={} cart_items={} authenticated={}",
            theme.current().as_str(),
            cart.cart().len(),
            session.is_authenticated()
        );

        Self {
            catalog: Catalog::builtin(),
            media: media::builtin_media(),
            cart,
            session,
            theme,
            events,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub async fn add_to_cart(&mut self, course: &Course) -> Result<(), StorefrontError> {
        self.cart.add_to_cart(course).await?;
        self.publish_cart();
        Ok(())
    }

    /// Adds a catalog course by id.
    pub async fn add_course(&mut self, id: &CourseId) -> Result<(), StorefrontError> {
        let course = self
            .catalog
            .find(id)
            .cloned()
            .ok_or_else(|| StorefrontError::UnknownCourse(id.clone()))?;
        self.add_to_cart(&course).await
    }

    pub async fn remove_from_cart(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let removed = self.cart.remove_from_cart(id).await?;
        self.publish_cart();
        Ok(removed)
    }

    pub async fn inc_qty(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let changed = self.cart.inc_qty(id).await?;
        if changed {
            self.publish_cart();
        }
        Ok(changed)
    }

    pub async fn dec_qty(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let changed = self.cart.dec_qty(id).await?;
        if changed {
            self.publish_cart();
        }
        Ok(changed)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, StorefrontError> {
        let session = self.session.login(email, password).await?;
        let _ = self.events.send(StorefrontEvent::SessionChanged {
            user_name: Some(session.user.name.clone()),
        });
        Ok(session)
    }

    pub async fn signup(&mut self, email: &str, name: &str) -> Result<&Session, StorefrontError> {
        let session = self.session.signup(email, name).await?;
        let _ = self.events.send(StorefrontEvent::SessionChanged {
            user_name: Some(session.user.name.clone()),
        });
        Ok(session)
    }

    pub async fn logout(&mut self) -> Result<bool, StorefrontError> {
        let was_authenticated = self.session.logout().await?;
        if was_authenticated {
            self.publish_session();
        }
        Ok(was_authenticated)
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme, StorefrontError> {
        let theme = self.theme.toggle().await?;
        self.publish(StorefrontEvent::ThemeChanged { theme });
        Ok(theme)
    }

    /// Places a pretend order. Needs a session; an empty cart places
    /// nothing. The cart itself is left as is.
    pub fn checkout(&self) -> Result<Option<OrderId>, StorefrontError> {
        let Some(session) = self.session.session() else {
            return Err(StorefrontError::NotAuthenticated);
        };
        if self.cart().is_empty() {
            return Ok(None);
        }

        let order_id = OrderId::generate();
        info!(
            "storefront: order placed order_id={order_id} name={} total={}",
            session.user.name,
            cart::format_money(self.total())
        );
        self.publish(StorefrontEvent::OrderPlaced {
            order_id: order_id.clone(),
        });
        Ok(Some(order_id))
    }

    pub fn media_item(&self, id: &MediaId) -> Result<&MediaItem, StorefrontError> {
        self.media
            .iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| StorefrontError::UnknownMedia(id.clone()))
    }

    fn publish_cart(&self) {
        self.publish(StorefrontEvent::CartChanged {
            total_qty: self.cart.total_qty(),
            total_price: self.cart.total(),
        });
    }

    fn publish_session(&self) {
        self.publish(StorefrontEvent::SessionChanged {
            user_name: self.session.session().map(|s| s.user.name.clone()),
        });
    }

    fn publish(&self, event: StorefrontEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
