use axum::{
    extract::{Form, Path, State},
    response::Response,
};
use tracing::warn;

use super::common::{log_rejected, parse_id, parse_uuid, see_other};
use crate::{
    entities::category,
    errors::ServiceError,
    forms::CategoryForm,
    views::{render, CategoryDeletePage, CategoryDetailPage, CategoryFormPage, CategoryListPage},
    AppState,
};

const CATEGORY_LIST: &str = "/shop/categories";

pub async fn category_list(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let categories = state.categories.list().await?;
    render(&CategoryListPage::new(&categories))
}

pub async fn category_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Category")?;
    let (category, items) = tokio::try_join!(
        state.categories.get(id),
        state.categories.items_in_category(id)
    )?;
    let category = category.ok_or_else(|| ServiceError::not_found("Category"))?;
    render(&CategoryDetailPage::new(&category, &items))
}

pub async fn category_create_get() -> Result<Response, ServiceError> {
    render(&CategoryFormPage::create())
}

/// Find-or-create: a case-insensitive name match redirects to the existing
/// category instead of inserting.
pub async fn category_create_post(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, ServiceError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log_rejected("category.create", &errors);
            return render(&CategoryFormPage::resubmit(&form, &errors));
        }
    };
    let outcome = state.categories.create(input).await?;
    Ok(see_other(&outcome.model().url()))
}

pub async fn category_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Category")?;
    let stored = state
        .categories
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    render(&CategoryFormPage::update(&stored, None))
}

/// Rejected submissions re-render the stored values, not the submitted ones.
pub async fn category_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, ServiceError> {
    let id = parse_id(&id, "Category")?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log_rejected("category.update", &errors);
            let stored = state
                .categories
                .get(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Category"))?;
            return render(&CategoryFormPage::update(&stored, Some(&errors)));
        }
    };

    if state.categories.update(id, input).await? {
        Ok(see_other(&category::url_for(id)))
    } else {
        warn!(category_id = %id, "Category does not exist");
        Err(ServiceError::not_found("Category"))
    }
}

pub async fn category_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let Some(id) = parse_uuid(&id) else {
        return Ok(see_other(CATEGORY_LIST));
    };
    let (category, items) = tokio::try_join!(
        state.categories.get(id),
        state.categories.items_in_category(id)
    )?;
    let Some(category) = category else {
        return Ok(see_other(CATEGORY_LIST));
    };
    render(&CategoryDeletePage::new(&category, &items))
}

/// Deletes without checking for dependent items; they keep their reference.
pub async fn category_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    if let Some(id) = parse_uuid(&id) {
        state.categories.delete(id).await?;
    }
    Ok(see_other(CATEGORY_LIST))
}
