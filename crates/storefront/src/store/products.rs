//! Product repository over the record store.

use chrono::Utc;
use tracing::instrument;

use shophub_core::ProductId;

use super::{RepositoryError, Store, collections};
use crate::models::{NewProduct, Product};

/// Repository for the `products` collection.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All products, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.store.get_collection(collections::PRODUCTS)
    }

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|p| &p.id == id))
    }

    /// Number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list()?.len())
    }

    /// Create a product with a fresh time-based ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be updated.
    #[instrument(skip(self, fields), fields(name = %fields.name))]
    pub fn create(&self, fields: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::generate(),
            name: fields.name,
            price: fields.price,
            category: fields.category,
            description: fields.description,
            stock: fields.stock,
            image: fields.image,
            created_at: Utc::now(),
        };

        let created = product.clone();
        self.store
            .update_collection(collections::PRODUCTS, move |products: &mut Vec<Product>| {
                products.push(product);
                Ok(())
            })?;

        Ok(created)
    }

    /// Replace a product's fields, keeping its ID and creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    #[instrument(skip(self, fields))]
    pub fn update(&self, id: &ProductId, fields: NewProduct) -> Result<Product, RepositoryError> {
        self.store
            .update_collection(collections::PRODUCTS, |products: &mut Vec<Product>| {
                let product = products
                    .iter_mut()
                    .find(|p| &p.id == id)
                    .ok_or(RepositoryError::NotFound)?;

                product.name = fields.name;
                product.price = fields.price;
                product.category = fields.category;
                product.description = fields.description;
                product.stock = fields.stock;
                product.image = fields.image;

                Ok(product.clone())
            })
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be updated.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        self.store
            .update_collection(collections::PRODUCTS, |products: &mut Vec<Product>| {
                let before = products.len();
                products.retain(|p| &p.id != id);
                Ok(products.len() < before)
            })
    }

    /// Decrement stock for each purchased product, floored at zero.
    ///
    /// Products that no longer exist in the catalog are skipped; the order
    /// snapshot keeps its own copy of what was bought.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be updated.
    #[instrument(skip(self, purchases))]
    pub fn decrement_stock(
        &self,
        purchases: &[(ProductId, u32)],
    ) -> Result<(), RepositoryError> {
        self.store
            .update_collection(collections::PRODUCTS, |products: &mut Vec<Product>| {
                for product in products.iter_mut() {
                    if let Some((_, quantity)) =
                        purchases.iter().find(|(id, _)| id == &product.id)
                    {
                        product.stock = product.stock.saturating_sub(*quantity);
                    }
                }
                Ok(())
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shophub_core::{Category, Price};

    fn fields(name: &str, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: Price::new(Decimal::new(999, 2)).unwrap(),
            category: Category::Books,
            description: "a test product".to_owned(),
            stock,
            image: "https://example.com/x.jpg".to_owned(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let created = repo.create(fields("The Full Stack Developer", 25)).unwrap();
        let fetched = repo.get(&created.id).unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_replaces_fields_keeps_id() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let created = repo.create(fields("Old Name", 5)).unwrap();
        let updated = repo.update(&created.id, fields("New Name", 7)).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.stock, 7);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_update_missing_product() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let result = repo.update(&ProductId::new("nope"), fields("X", 1));
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_delete() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let created = repo.create(fields("Gone", 1)).unwrap();
        assert!(repo.delete(&created.id).unwrap());
        assert!(!repo.delete(&created.id).unwrap());
        assert!(repo.get(&created.id).unwrap().is_none());
    }

    #[test]
    fn test_decrement_stock_floors_at_zero() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let a = repo.create(fields("A", 5)).unwrap();
        let b = repo.create(fields("B", 1)).unwrap();

        repo.decrement_stock(&[(a.id.clone(), 2), (b.id.clone(), 3)])
            .unwrap();

        assert_eq!(repo.get(&a.id).unwrap().unwrap().stock, 3);
        assert_eq!(repo.get(&b.id).unwrap().unwrap().stock, 0);
    }

    #[test]
    fn test_decrement_stock_skips_missing_products() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(&store);

        let a = repo.create(fields("A", 5)).unwrap();
        repo.decrement_stock(&[(ProductId::new("ghost"), 2), (a.id.clone(), 1)])
            .unwrap();

        assert_eq!(repo.get(&a.id).unwrap().unwrap().stock, 4);
    }
}
