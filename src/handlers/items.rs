use axum::{
    extract::{Form, Path, State},
    response::Response,
};
use tracing::warn;

use super::common::{log_rejected, parse_id, parse_uuid, see_other};
use crate::{
    entities::{category, item},
    errors::ServiceError,
    forms::{FormErrors, ItemForm, ItemInput, UpdateItemForm},
    views::{render, IndexPage, ItemDeletePage, ItemDetailPage, ItemFormPage, ItemListPage},
    AppState,
};

const ITEM_LIST: &str = "/shop/items";

/// Rejects an input whose category is not among `categories`.
fn require_category(
    input: ItemInput,
    categories: &[category::Model],
) -> Result<ItemInput, FormErrors> {
    if categories.iter().any(|c| c.id == input.category_id) {
        Ok(input)
    } else {
        let mut errors = FormErrors::new();
        errors.add("category", "Category does not exist");
        Err(errors)
    }
}

/// Dashboard with record counts.
pub async fn index(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let (category_count, item_count) =
        tokio::try_join!(state.categories.count(), state.items.count())?;
    render(&IndexPage::new(category_count, item_count))
}

pub async fn item_list(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let items = state.items.list_with_category().await?;
    render(&ItemListPage::new(&items))
}

pub async fn item_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Item")?;
    let (item, category) = state
        .items
        .get_with_category(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Item"))?;
    render(&ItemDetailPage::new(&item, category.as_ref()))
}

pub async fn item_create_get(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let categories = state.categories.list().await?;
    render(&ItemFormPage::create(&categories))
}

pub async fn item_create_post(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Response, ServiceError> {
    let categories = state.categories.list().await?;
    let input = match form
        .validate()
        .and_then(|input| require_category(input, &categories))
    {
        Ok(input) => input,
        Err(errors) => {
            log_rejected("item.create", &errors);
            return render(&ItemFormPage::resubmit(&form, &categories, &errors));
        }
    };

    let outcome = state.items.create(input).await?;
    Ok(see_other(&outcome.model().url()))
}

pub async fn item_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Item")?;
    let (stored, categories) = tokio::try_join!(state.items.get(id), state.categories.list())?;
    let stored = stored.ok_or_else(|| ServiceError::not_found("Item"))?;
    render(&ItemFormPage::update(&stored, &categories, None))
}

/// The record is addressed by the path id; the hidden `id` field only has to
/// be present.
pub async fn item_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateItemForm>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Item")?;
    let categories = state.categories.list().await?;
    let input = match form
        .validate()
        .and_then(|input| require_category(input, &categories))
    {
        Ok(input) => input,
        Err(errors) => {
            log_rejected("item.update", &errors);
            let stored = state
                .items
                .get(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Item"))?;
            return render(&ItemFormPage::update(&stored, &categories, Some(&errors)));
        }
    };

    if state.items.update(id, input).await? {
        Ok(see_other(&item::url_for(id)))
    } else {
        warn!(item_id = %id, "Item does not exist");
        Err(ServiceError::not_found("Item"))
    }
}

pub async fn item_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let Some(id) = parse_uuid(&id) else {
        return Ok(see_other(ITEM_LIST));
    };
    let Some((item, category)) = state.items.get_with_category(id).await? else {
        return Ok(see_other(ITEM_LIST));
    };
    render(&ItemDeletePage::new(&item, category.as_ref()))
}

pub async fn item_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    if let Some(id) = parse_uuid(&id) {
        state.items.delete(id).await?;
    }
    Ok(see_other(ITEM_LIST))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn unknown_category_is_a_form_error() {
        let known = category::Model {
            id: Uuid::new_v4(),
            name: "Gaming".into(),
            name_key: "gaming".into(),
            description: "Consoles".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let input = ItemInput {
            name: "Xbox Series X".into(),
            description: "Console".into(),
            price: dec!(499),
            stock: 25,
            category_id: Uuid::new_v4(),
        };

        let errors = require_category(input.clone(), std::slice::from_ref(&known)).unwrap_err();
        assert_eq!(errors.for_field("category"), Some("Category does not exist"));

        let input = ItemInput {
            category_id: known.id,
            ..input
        };
        assert!(require_category(input, &[known]).is_ok());
    }
}
