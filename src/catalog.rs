//! Product catalog.
//! Fixed for the lifetime of the process and injected wherever products
//! need to be resolved, so alternate catalogs can be swapped in for tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub badge: String,
}

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

pub fn default_catalog() -> Catalog {
    Catalog::new(vec![
        Product {
            id: "copper-mug".to_string(),
            name: "Copper Mug".to_string(),
            price: 12.5,
            description: "Hand-hammered mug for warm drinks.".to_string(),
            badge: "Craft".to_string(),
        },
        Product {
            id: "linen-tote".to_string(),
            name: "Linen Tote".to_string(),
            price: 18.0,
            description: "Lightweight tote with sturdy handles.".to_string(),
            badge: "Everyday".to_string(),
        },
        Product {
            id: "atlas-notebook".to_string(),
            name: "Atlas Notebook".to_string(),
            price: 9.0,
            description: "Dot-grid pages with soft-touch cover.".to_string(),
            badge: "Study".to_string(),
        },
    ])
}
