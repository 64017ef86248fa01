use super::guarded_load;
use crate::notify::Notifier;
use crate::service::Backend;
use crate::store::{InMemoryRepository, Repository};
use crate::types::{NewProduct, Product};
use std::sync::Arc;
use tracing::{error, info};

pub struct ProductsPage {
    backend: Arc<dyn Backend>,
    pub is_loading: bool,
    products: InMemoryRepository<Product>,
    search: String,
    selected: Option<String>,
}

/// Case-insensitive substring match on product names.
pub fn filter_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

impl ProductsPage {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            is_loading: true,
            products: InMemoryRepository::default(),
            search: String::new(),
            selected: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        self.products.all()
    }

    pub async fn load(&mut self, notifier: &mut Notifier) -> bool {
        let backend = Arc::clone(&self.backend);
        let Some(products) =
            guarded_load(&mut self.is_loading, notifier, "products", backend.fetch_products())
                .await
        else {
            return false;
        };
        info!(count = products.len(), "products loaded");
        self.products.replace_all(products);
        if self
            .selected
            .as_deref()
            .is_some_and(|id| self.products.get(id).is_none())
        {
            self.selected = None;
        }
        true
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn visible(&self) -> Vec<&Product> {
        filter_by_name(self.products.all(), &self.search)
    }

    pub fn select(&mut self, id: &str) -> Option<&Product> {
        let found = self.products.get(id).is_some();
        self.selected = found.then(|| id.to_string());
        self.selected()
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_deref().and_then(|id| self.products.get(id))
    }

    /// Creates the product through the backend and inserts it locally.
    pub async fn add(&mut self, new: NewProduct, notifier: &mut Notifier) -> Option<Product> {
        match self.backend.add_new_product(new).await {
            Ok(product) => {
                if !self.products.add(product.clone()) {
                    error!(id = %product.id, "product id already in list");
                    notifier.error("Error", "Failed to add product");
                    return None;
                }
                notifier.success("Product added", &format!("{} has been added", product.name));
                Some(product)
            }
            Err(e) => {
                error!(error = %e, "failed to add product");
                notifier.error("Error", "Failed to add product");
                None
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> Option<Product> {
        let removed = self.products.remove(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!(id, name = %removed.name, "product deleted");
        Some(removed)
    }
}
