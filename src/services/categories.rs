use crate::{
    db::{observe, DbPool},
    entities::{
        category,
        item::{self, ItemSummary},
        name_key,
    },
    errors::ServiceError,
    forms::CategoryInput,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::CreateOutcome;

/// Service for managing categories
#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
}

impl CategoryService {
    /// Creates a new category service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All categories, ordered by name
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "categories.list",
            category::Entity::find()
                .order_by_asc(category::Column::Name)
                .all(db),
        )
        .await
    }

    /// Gets a category by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        let db = &*self.db_pool;
        observe("categories.get", category::Entity::find_by_id(id).one(db)).await
    }

    /// Items whose reference points at `id`, projected to name and description
    #[instrument(skip(self))]
    pub async fn items_in_category(&self, id: Uuid) -> Result<Vec<ItemSummary>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "categories.items",
            item::Entity::find()
                .select_only()
                .columns([item::Column::Id, item::Column::Name, item::Column::Description])
                .filter(item::Column::CategoryId.eq(id))
                .order_by_asc(item::Column::Name)
                .into_model::<ItemSummary>()
                .all(db),
        )
        .await
    }

    /// Case-insensitive lookup by name, Unicode case folded
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        let db = &*self.db_pool;
        observe(
            "categories.find_by_name",
            category::Entity::find()
                .filter(category::Column::NameKey.eq(name_key(name)))
                .one(db),
        )
        .await
    }

    /// Returns the category already carrying this name, or inserts a new one.
    ///
    /// The lookup and the insert are separate statements, so two concurrent
    /// creates with the same name can both insert.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CategoryInput,
    ) -> Result<CreateOutcome<category::Model>, ServiceError> {
        if let Some(existing) = self.find_by_name(&input.name).await? {
            info!(category_id = %existing.id, "Category with this name already exists");
            return Ok(CreateOutcome::Existing(existing));
        }
        self.insert(input).await.map(CreateOutcome::Created)
    }

    /// Inserts a category without checking for duplicates
    #[instrument(skip(self))]
    pub async fn insert(&self, input: CategoryInput) -> Result<category::Model, ServiceError> {
        let db = &*self.db_pool;
        let model = category::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            ..Default::default()
        };
        let created = observe("categories.insert", model.insert(db)).await?;
        info!(category_id = %created.id, "Category created");
        Ok(created)
    }

    /// Replaces name and description. Returns false when no category has `id`.
    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, input: CategoryInput) -> Result<bool, ServiceError> {
        let db = &*self.db_pool;
        let changes = category::ActiveModel {
            name_key: Set(name_key(&input.name)),
            name: Set(input.name),
            description: Set(input.description),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = observe(
            "categories.update",
            category::Entity::update_many()
                .set(changes)
                .filter(category::Column::Id.eq(id))
                .exec(db),
        )
        .await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes by id. Items referencing the category are left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;
        let result = observe(
            "categories.delete",
            category::Entity::delete_by_id(id).exec(db),
        )
        .await?;
        info!(category_id = %id, deleted = result.rows_affected, "Category delete executed");
        Ok(result.rows_affected)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;
        observe("categories.count", category::Entity::find().count(db)).await
    }
}
