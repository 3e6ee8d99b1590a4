use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path prefix of category detail pages.
pub const URL_PREFIX: &str = "/shop/category";

/// A named grouping of items.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Lowercased `name`, compared by the duplicate-name lookup
    #[serde(skip)]
    pub name_key: String,

    pub description: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
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
    /// Detail page of this category.
    pub fn url(&self) -> String {
        url_for(self.id)
    }
}

/// Detail page of the category with `id`.
pub fn url_for(id: Uuid) -> String {
    format!("{}/{}", URL_PREFIX, id)
}
