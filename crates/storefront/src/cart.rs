//! Cart model and its blob-store persistence.
//!
//! A cart maps product ids to strictly positive quantities. It serializes as
//! a flat JSON object (`{"p1": 2, "p4": 1}`) and keeps insertion order so the
//! checkout receipt lists lines in the order they were first added.

use std::fmt;
use std::num::NonZeroU32;

use mini_shop_core::ProductId;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::blob::{BlobStore, CART_KEY, StoreError};

/// Mapping from product id to desired quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<(ProductId, NonZeroU32)>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity held for `id`, if any.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|(line_id, _)| line_id == id)
            .map(|(_, qty)| qty.get())
    }

    /// Lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.lines.iter().map(|(id, qty)| (id, qty.get()))
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|(_, qty)| u64::from(qty.get())).sum()
    }

    /// Increment the quantity for `id`, inserting it if absent.
    ///
    /// Returns the line's new quantity. Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, id: ProductId, qty: NonZeroU32) -> u32 {
        if let Some((_, existing)) = self.lines.iter_mut().find(|(line_id, _)| *line_id == id) {
            *existing = existing.saturating_add(qty.get());
            existing.get()
        } else {
            self.lines.push((id, qty));
            qty.get()
        }
    }

    /// Set the quantity for `id`, replacing any existing value.
    fn set(&mut self, id: ProductId, qty: NonZeroU32) {
        if let Some((_, existing)) = self.lines.iter_mut().find(|(line_id, _)| *line_id == id) {
            *existing = qty;
        } else {
            self.lines.push((id, qty));
        }
    }

    /// Delete the whole line for `id`. Returns the removed quantity.
    pub fn remove(&mut self, id: &ProductId) -> Option<u32> {
        let pos = self.lines.iter().position(|(line_id, _)| line_id == id)?;
        let (_, qty) = self.lines.remove(pos);
        Some(qty.get())
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for (id, qty) in &self.lines {
            map.serialize_entry(id.as_str(), &qty.get())?;
        }
        map.end()
    }
}

/// Deserializes leniently: entries whose key is not a valid product id or
/// whose value is not a positive integer are skipped. Later duplicates win.
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CartVisitor;

        impl<'de> Visitor<'de> for CartVisitor {
            type Value = Cart;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of product id to quantity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Cart, A::Error> {
                let mut cart = Cart::new();
                while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
                    let Ok(id) = ProductId::parse(&key) else {
                        continue;
                    };
                    let qty = value
                        .as_u64()
                        .and_then(|v| u32::try_from(v).ok())
                        .and_then(NonZeroU32::new);
                    match qty {
                        Some(qty) => cart.set(id, qty),
                        None => {
                            cart.remove(&id);
                        }
                    }
                }
                Ok(cart)
            }
        }

        deserializer.deserialize_map(CartVisitor)
    }
}

/// Read the persisted cart.
///
/// A missing key, an unreadable store, or malformed content all yield an
/// empty cart; the failure is logged, never surfaced.
pub fn load_cart(store: &dyn BlobStore) -> Cart {
    match store.get(CART_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Persisted cart is malformed, starting empty");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted cart, starting empty");
            Cart::new()
        }
    }
}

/// Overwrite the persisted cart.
///
/// # Errors
///
/// Returns `StoreError::Encode` if the cart cannot be serialized, leaving the
/// stored blob untouched, or any error the blob store reports for the write.
pub fn save_cart(store: &dyn BlobStore, cart: &Cart) -> Result<(), StoreError> {
    let json = serde_json::to_string(cart)?;
    store.set(CART_KEY, &json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(id("p1"), qty(1)), 1);
        assert_eq!(cart.add(id("p1"), qty(2)), 3);
        assert_eq!(cart.add(id("p2"), qty(1)), 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity(&id("p1")), Some(3));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::new();
        cart.add(id("p1"), qty(5));

        assert_eq!(cart.remove(&id("p1")), Some(5));
        assert_eq!(cart.quantity(&id("p1")), None);
        assert_eq!(cart.remove(&id("p1")), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(id("p9"), qty(1));
        cart.add(id("p10"), qty(1));
        cart.add(id("p2"), qty(1));
        cart.add(id("p9"), qty(1));

        let order: Vec<&str> = cart.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, ["p9", "p10", "p2"]);
        assert_eq!(
            serde_json::to_string(&cart).unwrap(),
            r#"{"p9":2,"p10":1,"p2":1}"#
        );
    }

    #[test]
    fn test_deserialize_drops_invalid_entries() {
        let cart: Cart =
            serde_json::from_str(r#"{"p1":2,"p2":0,"p3":-1,"p4":"x","bad id":3,"p5":1.5}"#)
                .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity(&id("p1")), Some(2));
    }

    #[test]
    fn test_deserialize_duplicate_keys_last_wins() {
        let cart: Cart = serde_json::from_str(r#"{"p1":2,"p1":7}"#).unwrap();
        assert_eq!(cart.quantity(&id("p1")), Some(7));

        let cart: Cart = serde_json::from_str(r#"{"p1":2,"p1":0}"#).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<Cart>("[1,2]").is_err());
        assert!(serde_json::from_str::<Cart>("not json").is_err());
    }

    #[test]
    fn test_load_missing_is_empty() {
        assert!(load_cart(&MemoryBlobStore::new()).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let store = MemoryBlobStore::new();
        store.set(CART_KEY, "{{{ definitely not json").unwrap();
        assert!(load_cart(&store).is_empty());

        store.set(CART_KEY, "42").unwrap();
        assert!(load_cart(&store).is_empty());
    }

    /// Serves reads from a seeded store and refuses every write.
    #[derive(Debug)]
    struct FrozenStore(MemoryBlobStore);

    impl BlobStore for FrozenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_failed_save_reports_error_and_keeps_blob() {
        let seeded = MemoryBlobStore::new();
        seeded.set(CART_KEY, r#"{"p1":2}"#).unwrap();
        let store = FrozenStore(seeded);

        let mut cart = Cart::new();
        cart.add(id("p2"), qty(1));
        assert!(matches!(save_cart(&store, &cart), Err(StoreError::Poisoned)));
        assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some(r#"{"p1":2}"#));
        assert_eq!(load_cart(&store).quantity(&id("p1")), Some(2));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryBlobStore::new();
        let mut cart = Cart::new();
        cart.add(id("p3"), qty(4));
        cart.add(id("p1"), qty(1));
        save_cart(&store, &cart).unwrap();

        assert_eq!(load_cart(&store), cart);
    }
}
