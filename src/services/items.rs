use crate::{
    db::{observe, DbPool},
    entities::{category, item, name_key},
    errors::ServiceError,
    forms::ItemInput,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::CreateOutcome;

/// An item together with the category it references, if that still exists.
pub type ItemWithCategory = (item::Model, Option<category::Model>);

/// Service for managing items
#[derive(Clone)]
pub struct ItemService {
    db_pool: Arc<DbPool>,
}

impl ItemService {
    /// Creates a new item service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All items ordered by name, each with its category resolved
    #[instrument(skip(self))]
    pub async fn list_with_category(&self) -> Result<Vec<ItemWithCategory>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "items.list",
            item::Entity::find()
                .find_also_related(category::Entity)
                .order_by_asc(item::Column::Name)
                .all(db),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<ItemWithCategory>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "items.get_with_category",
            item::Entity::find_by_id(id)
                .find_also_related(category::Entity)
                .one(db),
        )
        .await
    }

    /// Gets an item by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        let db = &*self.db_pool;
        observe("items.get", item::Entity::find_by_id(id).one(db)).await
    }

    /// Case-insensitive lookup by name, Unicode case folded
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<item::Model>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "items.find_by_name",
            item::Entity::find()
                .filter(item::Column::NameKey.eq(name_key(name)))
                .one(db),
        )
        .await
    }

    /// Returns the item already carrying this name, or inserts a new one.
    #[instrument(skip(self))]
    pub async fn create(&self, input: ItemInput) -> Result<CreateOutcome<item::Model>, ServiceError> {
        if let Some(existing) = self.find_by_name(&input.name).await? {
            info!(item_id = %existing.id, "Item with this name already exists");
            return Ok(CreateOutcome::Existing(existing));
        }
        self.insert(input).await.map(CreateOutcome::Created)
    }

    /// Inserts an item without checking for duplicates
    #[instrument(skip(self))]
    pub async fn insert(&self, input: ItemInput) -> Result<item::Model, ServiceError> {
        let db = &*self.db_pool;
        let model = item::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            category_id: Set(input.category_id),
            ..Default::default()
        };
        let created = observe("items.insert", model.insert(db)).await?;
        info!(item_id = %created.id, "Item created");
        Ok(created)
    }

    /// Replaces every mutable field. Returns false when no item has `id`.
    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, input: ItemInput) -> Result<bool, ServiceError> {
        let db = &*self.db_pool;
        let changes = item::ActiveModel {
            name_key: Set(name_key(&input.name)),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            category_id: Set(input.category_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = observe(
            "items.update",
            item::Entity::update_many()
                .set(changes)
                .filter(item::Column::Id.eq(id))
                .exec(db),
        )
        .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;
        let result = observe("items.delete", item::Entity::delete_by_id(id).exec(db)).await?;
        info!(item_id = %id, deleted = result.rows_affected, "Item delete executed");
        Ok(result.rows_affected)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;
        observe("items.count", item::Entity::find().count(db)).await
    }
}
