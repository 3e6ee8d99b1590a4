//! Page view-models rendered through askama templates in `templates/`.
//!
//! View-models hold display-ready strings so templates stay free of logic
//! beyond loops and flags.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use tracing::error;

use crate::entities::{category, item};
use crate::errors::ServiceError;
use crate::forms::{CategoryForm, FormErrors, ItemForm};

/// Renders `page` as an HTML 200 response.
pub fn render<T: Template>(page: &T) -> Result<Response, ServiceError> {
    let html = page.render()?;
    Ok(Html(html).into_response())
}

fn format_price(price: &Decimal) -> String {
    format!("{:.2}", price)
}

fn stored_errors(errors: Option<&FormErrors>) -> FormErrors {
    errors.cloned().unwrap_or_default()
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: String,
    pub category_count: u64,
    pub item_count: u64,
}

impl IndexPage {
    pub fn new(category_count: u64, item_count: u64) -> Self {
        Self {
            title: "Home".into(),
            category_count,
            item_count,
        }
    }
}

/// A category as linked from lists.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<&category::Model> for CategoryRow {
    fn from(model: &category::Model) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            url: model.url(),
        }
    }
}

/// An item as listed on its category's pages.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<&item::ItemSummary> for ItemRow {
    fn from(summary: &item::ItemSummary) -> Self {
        Self {
            name: summary.name.clone(),
            description: summary.description.clone(),
            url: summary.url(),
        }
    }
}

#[derive(Template)]
#[template(path = "category_list.html")]
pub struct CategoryListPage {
    pub title: String,
    pub categories: Vec<CategoryRow>,
}

impl CategoryListPage {
    pub fn new(categories: &[category::Model]) -> Self {
        Self {
            title: "Categories".into(),
            categories: categories.iter().map(CategoryRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "category_detail.html")]
pub struct CategoryDetailPage {
    pub title: String,
    pub category: CategoryRow,
    pub update_url: String,
    pub delete_url: String,
    pub items: Vec<ItemRow>,
}

impl CategoryDetailPage {
    pub fn new(category: &category::Model, items: &[item::ItemSummary]) -> Self {
        let url = category.url();
        Self {
            title: category.name.clone(),
            category: CategoryRow::from(category),
            update_url: format!("{}/update", url),
            delete_url: format!("{}/delete", url),
            items: items.iter().map(ItemRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "category_form.html")]
pub struct CategoryFormPage {
    pub title: String,
    pub name: String,
    pub description: String,
    /// Rendered next to the input each one belongs to
    pub errors: FormErrors,
}

impl CategoryFormPage {
    pub fn create() -> Self {
        Self {
            title: "Create Category".into(),
            name: String::new(),
            description: String::new(),
            errors: FormErrors::new(),
        }
    }

    /// Create form re-rendered with the rejected submission.
    pub fn resubmit(form: &CategoryForm, errors: &FormErrors) -> Self {
        Self {
            title: "Create Category".into(),
            name: form.name.clone(),
            description: form.description.clone(),
            errors: errors.clone(),
        }
    }

    /// Update form filled from the stored record.
    pub fn update(stored: &category::Model, errors: Option<&FormErrors>) -> Self {
        Self {
            title: "Update Category".into(),
            name: stored.name.clone(),
            description: stored.description.clone(),
            errors: stored_errors(errors),
        }
    }
}

#[derive(Template)]
#[template(path = "category_delete.html")]
pub struct CategoryDeletePage {
    pub title: String,
    pub category: CategoryRow,
    pub items: Vec<ItemRow>,
}

impl CategoryDeletePage {
    pub fn new(category: &category::Model, items: &[item::ItemSummary]) -> Self {
        Self {
            title: "Delete Category".into(),
            category: CategoryRow::from(category),
            items: items.iter().map(ItemRow::from).collect(),
        }
    }
}

/// An item with its category reference resolved for display.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: i32,
    pub url: String,
    pub has_category: bool,
    pub category_name: String,
    pub category_url: String,
}

impl ItemView {
    pub fn new(model: &item::Model, category: Option<&category::Model>) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            price: format_price(&model.price),
            stock: model.stock,
            url: model.url(),
            has_category: category.is_some(),
            category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
            category_url: category.map(|c| c.url()).unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "item_list.html")]
pub struct ItemListPage {
    pub title: String,
    pub items: Vec<ItemView>,
}

impl ItemListPage {
    pub fn new(items: &[(item::Model, Option<category::Model>)]) -> Self {
        Self {
            title: "Items".into(),
            items: items
                .iter()
                .map(|(model, category)| ItemView::new(model, category.as_ref()))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "item_detail.html")]
pub struct ItemDetailPage {
    pub title: String,
    pub item: ItemView,
    pub update_url: String,
    pub delete_url: String,
}

impl ItemDetailPage {
    pub fn new(model: &item::Model, category: Option<&category::Model>) -> Self {
        let item = ItemView::new(model, category);
        Self {
            title: model.name.clone(),
            update_url: format!("{}/update", item.url),
            delete_url: format!("{}/delete", item.url),
            item,
        }
    }
}

/// One entry of the category `<select>`.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

fn category_options(categories: &[category::Model], selected: &str) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| {
            let id = c.id.to_string();
            CategoryOption {
                selected: id.eq_ignore_ascii_case(selected.trim()),
                id,
                name: c.name.clone(),
            }
        })
        .collect()
}

#[derive(Template)]
#[template(path = "item_form.html")]
pub struct ItemFormPage {
    pub title: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    /// Hidden id field, only rendered on the update form
    pub id: String,
    pub is_update: bool,
    pub categories: Vec<CategoryOption>,
    pub errors: FormErrors,
}

impl ItemFormPage {
    pub fn create(categories: &[category::Model]) -> Self {
        Self::resubmit(&ItemForm::default(), categories, &FormErrors::new()).titled("Add Item")
    }

    /// Create form re-rendered with the rejected submission.
    pub fn resubmit(form: &ItemForm, categories: &[category::Model], errors: &FormErrors) -> Self {
        Self {
            title: "Create Item".into(),
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price.clone(),
            stock: form.stock.clone(),
            id: String::new(),
            is_update: false,
            categories: category_options(categories, &form.category),
            errors: errors.clone(),
        }
    }

    /// Update form filled from the stored record.
    pub fn update(
        stored: &item::Model,
        categories: &[category::Model],
        errors: Option<&FormErrors>,
    ) -> Self {
        Self {
            title: "Update Item".into(),
            name: stored.name.clone(),
            description: stored.description.clone(),
            price: stored.price.normalize().to_string(),
            stock: stored.stock.to_string(),
            id: stored.id.to_string(),
            is_update: true,
            categories: category_options(categories, &stored.category_id.to_string()),
            errors: stored_errors(errors),
        }
    }

    fn titled(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }
}

#[derive(Template)]
#[template(path = "item_delete.html")]
pub struct ItemDeletePage {
    pub title: String,
    pub item: ItemView,
}

impl ItemDeletePage {
    pub fn new(model: &item::Model, category: Option<&category::Model>) -> Self {
        Self {
            title: "Delete Item".into(),
            item: ItemView::new(model, category),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub status: u16,
    pub message: String,
    pub request_id: String,
    pub detail: String,
}

impl ErrorPage {
    pub fn new(
        status: StatusCode,
        message: String,
        request_id: Option<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            status: status.as_u16(),
            message,
            request_id: request_id.unwrap_or_default(),
            detail: detail.unwrap_or_default(),
        }
    }

    /// Renders the page with `status`. Falls back to plain text when the
    /// template itself fails.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        match self.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to render error page");
                (status, self.message).into_response()
            }
        }
    }
}
