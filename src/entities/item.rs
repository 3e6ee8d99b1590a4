use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, FromQueryResult, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path prefix of item detail pages.
pub const URL_PREFIX: &str = "/shop/item";

/// A stocked item. `category_id` references a category by id only; the
/// database does not enforce the reference, so deleting a category leaves
/// its items pointing at nothing.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Lowercased `name`, compared by the duplicate-name lookup
    #[serde(skip)]
    pub name_key: String,

    pub description: String,

    /// Unit price, at least 0.01
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,

    /// Units on hand, never negative
    pub stock: i32,

    pub category_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.id {
                active_model.id = Set(Uuid::new_v4());
            }
            active_model.created_at = Set(now);
        }
        if let ActiveValue::Set(name) = &active_model.name {
            active_model.name_key = Set(super::name_key(name));
        }
        active_model.updated_at = Set(now);

        Ok(active_model)
    }
}

impl Model {
    /// Detail page of this item.
    pub fn url(&self) -> String {
        url_for(self.id)
    }
}

/// Detail page of the item with `id`.
pub fn url_for(id: Uuid) -> String {
    format!("{}/{}", URL_PREFIX, id)
}

/// Name and description of an item, as listed under its category.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ItemSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl ItemSummary {
    pub fn url(&self) -> String {
        url_for(self.id)
    }
}
