//! Fixed sample data for a fresh database.

use futures::future::try_join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::{
    entities::{category, item},
    errors::ServiceError,
    forms::{CategoryInput, ItemInput},
    services::{CategoryService, ItemService},
};

struct SampleItem {
    name: &'static str,
    description: &'static str,
    /// Index into [`CATEGORIES`]
    category: usize,
    price: Decimal,
    stock: i32,
}

const CATEGORIES: [(&str, &str); 5] = [
    ("Smartphones", "Latest and greatest smartphones"),
    ("Laptops", "High-performance laptops for work and play"),
    ("Accessories", "Essential accessories for your devices"),
    ("Gaming", "Top-notch gaming consoles and accessories"),
    ("Home Appliances", "Modern appliances for your home"),
];

const ITEMS: [SampleItem; 10] = [
    SampleItem {
        name: "iPhone 13",
        description: "Latest Apple smartphone",
        category: 0,
        price: dec!(99900),
        stock: 50,
    },
    SampleItem {
        name: "Samsung Galaxy S21",
        description: "Flagship Samsung smartphone",
        category: 0,
        price: dec!(79900),
        stock: 75,
    },
    SampleItem {
        name: "MacBook Pro",
        description: "High-performance laptop from Apple",
        category: 1,
        price: dec!(129900),
        stock: 30,
    },
    SampleItem {
        name: "Dell XPS 13",
        description: "Compact and powerful laptop",
        category: 1,
        price: dec!(99900),
        stock: 40,
    },
    SampleItem {
        name: "Wireless Mouse",
        description: "Ergonomic wireless mouse",
        category: 2,
        price: dec!(2000),
        stock: 150,
    },
    SampleItem {
        name: "Mechanical Keyboard",
        description: "High-quality mechanical keyboard",
        category: 2,
        price: dec!(5000),
        stock: 100,
    },
    SampleItem {
        name: "PlayStation 5",
        description: "Next-gen gaming console from Sony",
        category: 3,
        price: dec!(49900),
        stock: 20,
    },
    SampleItem {
        name: "Xbox Series X",
        description: "Powerful gaming console from Microsoft",
        category: 3,
        price: dec!(49900),
        stock: 25,
    },
    SampleItem {
        name: "Smart TV",
        description: "4K Ultra HD Smart TV",
        category: 4,
        price: dec!(59900),
        stock: 40,
    },
    SampleItem {
        name: "Refrigerator",
        description: "Energy-efficient refrigerator",
        category: 4,
        price: dec!(89900),
        stock: 15,
    },
];

/// Records written by [`seed`]
#[derive(Debug)]
pub struct SeedSummary {
    pub categories: Vec<category::Model>,
    pub items: Vec<item::Model>,
}

/// Inserts the sample categories concurrently, then the sample items
/// concurrently. Nothing is checked for duplicates.
pub async fn seed(
    categories: &CategoryService,
    items: &ItemService,
) -> Result<SeedSummary, ServiceError> {
    info!("Adding categories");
    let created_categories = try_join_all(CATEGORIES.iter().map(|(name, description)| async move {
        let created = categories
            .insert(CategoryInput {
                name: (*name).to_string(),
                description: (*description).to_string(),
            })
            .await?;
        info!("Added category: {}", created.name);
        Ok::<_, ServiceError>(created)
    }))
    .await?;

    info!("Adding items");
    let created_categories_ref = &created_categories;
    let created_items = try_join_all(ITEMS.iter().map(|sample| async move {
        let category_id = created_categories_ref
            .get(sample.category)
            .map(|c| c.id)
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "sample item {} references missing category {}",
                    sample.name, sample.category
                ))
            })?;
        let created = items
            .insert(ItemInput {
                name: sample.name.to_string(),
                description: sample.description.to_string(),
                price: sample.price,
                stock: sample.stock,
                category_id,
            })
            .await?;
        info!("Added item: {}", created.name);
        Ok::<_, ServiceError>(created)
    }))
    .await?;

    Ok(SeedSummary {
        categories: created_categories,
        items: created_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{run_migrations, DbPool};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;

    async fn memory_db() -> Arc<DbPool> {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        run_migrations(&db).await.unwrap();
        Arc::new(db)
    }

    #[tokio::test]
    async fn seeding_an_empty_database() {
        let db = memory_db().await;
        let categories = CategoryService::new(db.clone());
        let items = ItemService::new(db.clone());

        let summary = seed(&categories, &items).await.unwrap();
        assert_eq!(summary.categories.len(), 5);
        assert_eq!(summary.items.len(), 10);
        assert_eq!(categories.count().await.unwrap(), 5);
        assert_eq!(items.count().await.unwrap(), 10);

        let smartphones = categories.find_by_name("smartphones").await.unwrap().unwrap();
        let phones: Vec<String> = categories
            .items_in_category(smartphones.id)
            .await
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(phones, vec!["Samsung Galaxy S21", "iPhone 13"]);
    }

    #[test]
    fn sample_items_reference_sample_categories() {
        assert!(ITEMS.iter().all(|sample| sample.category < CATEGORIES.len()));
        assert!(ITEMS
            .iter()
            .all(|sample| sample.price >= crate::forms::item::MIN_PRICE && sample.stock >= 0));
    }
}
