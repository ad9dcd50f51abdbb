use std::collections::HashSet;

use serde::Serialize;
use shared::domain::{Course, CourseId, LineItem};
use storage::StoreAdapter;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::StorefrontError;

pub const CART_KEY: &str = "cart";

/// Why a list of line items cannot form a cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCart {
    #[error("course {0} appears more than once")]
    DuplicateItem(CourseId),
    #[error("course {0} has a quantity below 1")]
    ZeroQuantity(CourseId),
    #[error("course {0} has a negative or non-finite price")]
    InvalidPrice(CourseId),
}

/// Ordered line items, at most one per course, each with `qty >= 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Result<Self, InvalidCart> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(InvalidCart::DuplicateItem(item.id.clone()));
            }
            check_line_item(item)?;
        }
        Ok(Self { items })
    }

    /// Appends a restored line item, rejecting it if it would break the
    /// cart's invariants.
    pub fn push(&mut self, item: LineItem) -> Result<(), InvalidCart> {
        if self.contains(&item.id) {
            return Err(InvalidCart::DuplicateItem(item.id));
        }
        check_line_item(&item)?;
        self.items.push(item);
        Ok(())
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &CourseId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, course: &Course) -> Result<(), InvalidCart> {
        if !is_valid_price(course.price) {
            return Err(InvalidCart::InvalidPrice(course.id.clone()));
        }
        match self.items.iter_mut().find(|i| i.id == course.id) {
            Some(existing) => existing.qty = existing.qty.saturating_add(1),
            None => self.items.push(LineItem::for_course(course)),
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &CourseId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() != before
    }

    pub fn increment(&mut self, id: &CourseId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.qty = item.qty.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Never removes the item: quantity bottoms out at 1.
    pub fn decrement(&mut self, id: &CourseId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.qty = item.qty.saturating_sub(1).max(1);
                true
            }
            None => false,
        }
    }

    pub fn total_qty(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            rows: self
                .items
                .iter()
                .map(|i| CartRow {
                    id: i.id.clone(),
                    title: i.title.clone(),
                    qty: i.qty,
                    line_total: format_money(i.line_total()),
                })
                .collect(),
            total_qty: self.total_qty(),
            total: format_money(self.total_price()),
        }
    }

    fn get_mut(&mut self, id: &CourseId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    pub id: CourseId,
    pub title: String,
    pub qty: u32,
    pub line_total: String,
}

/// Display-ready view of a cart, amounts formatted with two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub rows: Vec<CartRow>,
    pub total_qty: u32,
    pub total: String,
}

pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn check_line_item(item: &LineItem) -> Result<(), InvalidCart> {
    if item.qty < 1 {
        return Err(InvalidCart::ZeroQuantity(item.id.clone()));
    }
    if !is_valid_price(item.price) {
        return Err(InvalidCart::InvalidPrice(item.id.clone()));
    }
    Ok(())
}

pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Owns the cart and writes it through to the store after every change.
///
/// Each mutation is applied to a staged copy which replaces the live cart
/// only after the write succeeded, so a failed write leaves both sides as
/// they were.
pub struct CartService {
    store: StoreAdapter,
    cart: Cart,
}

impl CartService {
    /// Loads the persisted cart. Rows that cannot be read or that break the
    /// cart's invariants are dropped one by one; the rest are kept in order.
    pub async fn restore(store: StoreAdapter) -> Self {
        let rows: Vec<serde_json::Value> = store.get(CART_KEY, Vec::new()).await;
        let mut cart = Cart::new();
        for row in rows {
            let item = match serde_json::from_value::<LineItem>(row) {
                Ok(item) => item,
                Err(err) => {
                    warn!("cart: dropping unreadable line item: {err}");
                    continue;
                }
            };
            if let Err(err) = cart.push(item) {
                warn!("cart: dropping persisted line item: {err}");
            }
        }
        debug!(
            "cart: restored items={} total_qty={}",
            cart.len(),
            cart.total_qty()
        );
        Self { store, cart }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub async fn add_to_cart(&mut self, course: &Course) -> Result<(), StorefrontError> {
        let mut staged = self.cart.clone();
        staged.add(course)?;
        self.flush(staged).await
    }

    /// Returns whether an item was removed. The cart is written either way.
    pub async fn remove_from_cart(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let mut staged = self.cart.clone();
        let removed = staged.remove(id);
        self.flush(staged).await?;
        Ok(removed)
    }

    pub async fn inc_qty(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let mut staged = self.cart.clone();
        if !staged.increment(id) {
            return Ok(false);
        }
        self.flush(staged).await?;
        Ok(true)
    }

    pub async fn dec_qty(&mut self, id: &CourseId) -> Result<bool, StorefrontError> {
        let mut staged = self.cart.clone();
        if !staged.decrement(id) {
            return Ok(false);
        }
        self.flush(staged).await?;
        Ok(true)
    }

    pub fn total(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn total_qty(&self) -> u32 {
        self.cart.total_qty()
    }

    async fn flush(&mut self, staged: Cart) -> Result<(), StorefrontError> {
        self.store.set(CART_KEY, staged.items()).await?;
        self.cart = staged;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
