//! Search and sort over the catalog.

use mini_shop_core::{Product, SortKey};

/// Compute the filtered view of `products`.
///
/// The search text is trimmed and matched case-insensitively as a substring
/// of each product's name or description; empty text matches everything.
/// Sorting is stable, so products with equal prices keep catalog order.
/// The input slice is never modified.
#[must_use]
pub fn apply_filters(products: &[Product], search: &str, sort: SortKey) -> Vec<Product> {
    let needle = search.trim().to_lowercase();

    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| p.matches(&needle))
        .cloned()
        .collect();

    match sort {
        SortKey::None => {}
        SortKey::PriceAsc => view.sort_by_key(|p| p.price),
        SortKey::PriceDesc => view.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    view
}
