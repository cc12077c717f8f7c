//! Session catalog: generation, caching, and lookup.
//!
//! The catalog is synthetic. On first load in a session it is generated with
//! a fixed product count and random prices, then cached in the session blob
//! store so every later load in the same session sees identical prices.

use mini_shop_core::{Price, Product, ProductId};
use rand::Rng;
use tracing::{debug, warn};

use crate::blob::{BlobStore, CATALOG_KEY};

/// Number of products generated when no size is configured.
pub const DEFAULT_CATALOG_SIZE: usize = 12;

/// Inclusive bounds of the generated price, in major units.
const PRICE_RANGE: std::ops::RangeInclusive<u64> = 10..=100;

const PRODUCT_NAMES: [&str; 12] = [
    "Canvas Tote",
    "Ceramic Mug",
    "Linen Notebook",
    "Wireless Mouse",
    "Desk Lamp",
    "Terracotta Planter",
    "Trail Backpack",
    "Field Watch",
    "Polarized Sunglasses",
    "Pocket Speaker",
    "Steel Bottle",
    "Fleece Hoodie",
];

/// The fixed, session-scoped list of purchasable products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an existing product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

/// Generate a synthetic catalog of `size` products.
///
/// Ids are `p1..pN`. Names cycle through a fixed list, gaining a numeric
/// suffix once the list is exhausted. Prices are whole major units in
/// `10..=100`, stored as minor units.
pub fn generate_catalog<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Catalog {
    let products = (0..size)
        .filter_map(|i| {
            let base = PRODUCT_NAMES.get(i % PRODUCT_NAMES.len())?;
            let round = i / PRODUCT_NAMES.len();
            let name = if round == 0 {
                base.to_string()
            } else {
                format!("{base} {}", round + 1)
            };

            let id = ProductId::parse(&format!("p{}", i + 1)).ok()?;
            let price = Price::from_minor(rng.random_range(PRICE_RANGE) * 100);

            Some(Product {
                id,
                description: format!("{name}: simple, sturdy, and built for everyday use."),
                image_url: format!("https://picsum.photos/seed/shop{i}/800/600"),
                name,
                price,
            })
        })
        .collect();

    Catalog::new(products)
}

/// Load the session catalog, generating and caching it if needed.
///
/// A cached catalog that is missing, unreadable, malformed, or empty is
/// replaced by a freshly generated one. This never fails; write failures are
/// logged and the generated catalog is still returned.
pub fn load_catalog(session: &dyn BlobStore, size: usize) -> Catalog {
    match session.get(CATALOG_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) if !products.is_empty() => {
                debug!(count = products.len(), "Loaded cached catalog");
                return Catalog::new(products);
            }
            Ok(_) => warn!("Cached catalog is empty, regenerating"),
            Err(e) => warn!(error = %e, "Cached catalog is malformed, regenerating"),
        },
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to read cached catalog, regenerating"),
    }

    let catalog = generate_catalog(size, &mut rand::rng());
    match serde_json::to_string(catalog.products()) {
        Ok(json) => {
            if let Err(e) = session.set(CATALOG_KEY, &json) {
                warn!(error = %e, "Failed to cache catalog");
            }
        }
        Err(e) => warn!(error = %e, "Failed to encode catalog"),
    }
    debug!(count = catalog.len(), "Generated catalog");
    catalog
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::blob::MemoryBlobStore;

    #[test]
    fn test_generate_fixed_count_and_ids() {
        let catalog = generate_catalog(DEFAULT_CATALOG_SIZE, &mut StdRng::seed_from_u64(7));
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.products()[0].id.as_str(), "p1");
        assert_eq!(catalog.products()[11].id.as_str(), "p12");
        assert_eq!(catalog.products()[1].name, "Ceramic Mug");
    }

    #[test]
    fn test_generate_prices_in_range() {
        let catalog = generate_catalog(200, &mut StdRng::seed_from_u64(42));
        for p in catalog.products() {
            let minor = p.price.minor_units();
            assert!((1_000..=10_000).contains(&minor), "price {minor} out of range");
            assert_eq!(minor % 100, 0);
        }
    }

    #[test]
    fn test_generate_names_cycle_with_suffix() {
        let catalog = generate_catalog(14, &mut StdRng::seed_from_u64(1));
        assert_eq!(catalog.products()[12].name, "Canvas Tote 2");
        assert_eq!(catalog.products()[13].name, "Ceramic Mug 2");
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let a = generate_catalog(12, &mut StdRng::seed_from_u64(99));
        let b = generate_catalog(12, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_catalog_caches_for_session() {
        let session = MemoryBlobStore::new();
        let first = load_catalog(&session, 12);
        assert!(session.get(CATALOG_KEY).unwrap().is_some());

        let second = load_catalog(&session, 12);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_catalog_uses_existing_cache() {
        let session = MemoryBlobStore::new();
        let cached = generate_catalog(3, &mut StdRng::seed_from_u64(3));
        session
            .set(CATALOG_KEY, &serde_json::to_string(cached.products()).unwrap())
            .unwrap();

        assert_eq!(load_catalog(&session, 12), cached);
    }

    #[test]
    fn test_load_catalog_regenerates_on_garbage() {
        let session = MemoryBlobStore::new();
        session.set(CATALOG_KEY, "not json").unwrap();

        let catalog = load_catalog(&session, 5);
        assert_eq!(catalog.len(), 5);

        let stored: Vec<Product> =
            serde_json::from_str(&session.get(CATALOG_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, catalog.products());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = generate_catalog(4, &mut StdRng::seed_from_u64(0));
        let id = ProductId::parse("p3").unwrap();
        assert_eq!(catalog.get(&id).unwrap().name, "Linen Notebook");
        assert!(catalog.get(&ProductId::parse("p99").unwrap()).is_none());
    }
}
