//! Cart totals, line projection, and the checkout receipt.
//!
//! Everything here is a pure projection of `(cart, catalog)`. Ids the
//! catalog does not know are rendered as an "Unknown" line priced at zero.

use mini_shop_core::{Price, ProductId};
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;

/// Name shown for cart lines whose product is missing from the catalog.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown";

/// Aggregate cart figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub item_count: u64,
    /// Sum of quantity x unit price across all lines.
    pub total_price: Price,
}

/// One cart line joined with catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
    /// False when the id was not found in the catalog.
    pub known: bool,
}

/// Ordered checkout summary for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Result of starting checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart has no lines; nothing to review.
    Empty,
    /// The cart's contents, ready for confirmation.
    Review(Receipt),
}

/// Join each cart line with its catalog entry, in cart order.
#[must_use]
pub fn cart_lines(cart: &Cart, catalog: &Catalog) -> Vec<CartLine> {
    cart.iter()
        .map(|(id, quantity)| {
            let (name, unit_price, known) = catalog.get(id).map_or_else(
                || (UNKNOWN_PRODUCT_NAME.to_string(), Price::ZERO, false),
                |p| (p.name.clone(), p.price, true),
            );
            CartLine {
                product_id: id.clone(),
                name,
                unit_price,
                quantity,
                line_total: unit_price.times(quantity),
                known,
            }
        })
        .collect()
}

/// Item count and total price for `cart` priced against `catalog`.
#[must_use]
pub fn compute_totals(cart: &Cart, catalog: &Catalog) -> CartTotals {
    let total_price = cart
        .iter()
        .map(|(id, quantity)| {
            catalog
                .get(id)
                .map_or(Price::ZERO, |p| p.price.times(quantity))
        })
        .sum();

    CartTotals {
        item_count: cart.item_count(),
        total_price,
    }
}

/// Project the cart into a receipt, or signal that it is empty.
///
/// Performs no payment action.
#[must_use]
pub fn checkout(cart: &Cart, catalog: &Catalog) -> CheckoutOutcome {
    if cart.is_empty() {
        return CheckoutOutcome::Empty;
    }

    CheckoutOutcome::Review(Receipt {
        lines: cart_lines(cart, catalog),
        totals: compute_totals(cart, catalog),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use mini_shop_core::Product;

    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: id("p1"),
                name: "Canvas Tote".to_string(),
                price: Price::from_minor(500),
                description: String::new(),
                image_url: String::new(),
            },
            Product {
                id: id("p2"),
                name: "Ceramic Mug".to_string(),
                price: Price::from_minor(1_250),
                description: String::new(),
                image_url: String::new(),
            },
        ])
    }

    fn cart_with(entries: &[(&str, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (s, n) in entries {
            cart.add(id(s), NonZeroU32::new(*n).unwrap());
        }
        cart
    }

    #[test]
    fn test_totals_two_of_p1() {
        let totals = compute_totals(&cart_with(&[("p1", 2)]), &catalog());
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_price, Price::from_minor(1_000));
    }

    #[test]
    fn test_totals_mixed_lines() {
        let totals = compute_totals(&cart_with(&[("p1", 1), ("p2", 3)]), &catalog());
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.total_price, Price::from_minor(500 + 3 * 1_250));
    }

    #[test]
    fn test_stale_id_counts_items_but_not_price() {
        let cart = cart_with(&[("p1", 1), ("gone", 4)]);
        let totals = compute_totals(&cart, &catalog());
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.total_price, Price::from_minor(500));

        let lines = cart_lines(&cart, &catalog());
        let stale = &lines[1];
        assert_eq!(stale.name, UNKNOWN_PRODUCT_NAME);
        assert_eq!(stale.unit_price, Price::ZERO);
        assert_eq!(stale.line_total, Price::ZERO);
        assert!(!stale.known);
    }

    #[test]
    fn test_checkout_empty() {
        assert_eq!(checkout(&Cart::new(), &catalog()), CheckoutOutcome::Empty);
    }

    #[test]
    fn test_checkout_single_line() {
        let CheckoutOutcome::Review(receipt) = checkout(&cart_with(&[("p2", 3)]), &catalog())
        else {
            panic!("expected a receipt");
        };
        assert_eq!(receipt.lines.len(), 1);
        let line = &receipt.lines[0];
        assert_eq!(line.product_id, id("p2"));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total, Price::from_minor(3_750));
        assert_eq!(receipt.totals.total_price, Price::from_minor(3_750));
    }

    #[test]
    fn test_checkout_lines_follow_cart_order() {
        let CheckoutOutcome::Review(receipt) =
            checkout(&cart_with(&[("p2", 1), ("p1", 1)]), &catalog())
        else {
            panic!("expected a receipt");
        };
        let order: Vec<&str> = receipt.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(order, ["p2", "p1"]);
    }
}
