use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{clean, first_failure, length_message, FormErrors};

/// Lowest accepted price.
pub const MIN_PRICE: Decimal = dec!(0.01);
/// Highest price a `decimal(16, 2)` column holds.
pub const MAX_PRICE: Decimal = dec!(99999999999999.99);
/// Decimal places kept for a price.
pub const PRICE_SCALE: u32 = 2;

const PRICE_NOT_A_NUMBER: &str = "Price must be a number";
const PRICE_TOO_SMALL: &str = "Price must be at least 0.01";
const PRICE_TOO_LARGE: &str = "Price must be at most 99999999999999.99";
const PRICE_TOO_PRECISE: &str = "Price must have at most 2 decimal places";
const STOCK_NOT_A_NUMBER: &str = "Stock must be a number";
const STOCK_NOT_WHOLE: &str = "Stock must be a whole number";
const STOCK_TOO_LARGE: &str = "Stock must be at most 2147483647";

fn price_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < MIN_PRICE {
        return Err(price_error("range", PRICE_TOO_SMALL));
    }
    if *price > MAX_PRICE {
        return Err(price_error("range", PRICE_TOO_LARGE));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(price_error("scale", PRICE_TOO_PRECISE));
    }
    Ok(())
}

/// Raw item form as submitted. `category` carries the selected category id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
}

/// Raw item update form; identical to [`ItemForm`] plus the hidden `id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub id: Option<String>,
}

/// Trimmed, coerced and validated item fields.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ItemInput {
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 255))]
    pub description: String,
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock must be at least 0"))]
    pub stock: i32,
    pub category_id: Uuid,
}

impl ItemForm {
    pub fn validate(&self) -> Result<ItemInput, FormErrors> {
        let (input, errors) = check_item(
            &self.name,
            &self.description,
            &self.price,
            &self.stock,
            &self.category,
        );
        errors.into_result(input)
    }
}

impl UpdateItemForm {
    pub fn validate(&self) -> Result<ItemInput, FormErrors> {
        let (input, mut errors) = check_item(
            &self.name,
            &self.description,
            &self.price,
            &self.stock,
            &self.category,
        );
        if self.id.is_none() {
            errors.add("id", "Id is required");
        }
        errors.into_result(input)
    }
}

/// Parses a numeric form value. Blank input counts as zero.
fn coerce_number(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Numerals outside the `Decimal` range still report the bound they break.
fn coerce_price(raw: &str) -> Result<Decimal, &'static str> {
    if let Some(price) = coerce_number(raw) {
        return Ok(price);
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => Err(PRICE_TOO_LARGE),
        Ok(value) if value.is_finite() => Err(PRICE_TOO_SMALL),
        _ => Err(PRICE_NOT_A_NUMBER),
    }
}

fn coerce_stock(raw: &str) -> Result<i32, &'static str> {
    let value = coerce_number(raw).ok_or(STOCK_NOT_A_NUMBER)?;
    if !value.fract().is_zero() {
        return Err(STOCK_NOT_WHOLE);
    }
    match value.to_i32() {
        Some(stock) => Ok(stock),
        // Below i32::MIN the range rule still reports the lower bound
        None if value.is_sign_negative() => Ok(i32::MIN),
        None => Err(STOCK_TOO_LARGE),
    }
}

fn coerce_category(raw: &str) -> Result<Uuid, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Category is required");
    }
    Uuid::parse_str(raw).map_err(|_| "Category is invalid")
}

fn check_item(
    name: &str,
    description: &str,
    price: &str,
    stock: &str,
    category: &str,
) -> (ItemInput, FormErrors) {
    let price = coerce_price(price);
    let stock = coerce_stock(stock);
    let category = coerce_category(category);

    let input = ItemInput {
        name: clean(name),
        description: clean(description),
        price: *price.as_ref().unwrap_or(&MIN_PRICE),
        stock: *stock.as_ref().unwrap_or(&0),
        category_id: *category.as_ref().unwrap_or(&Uuid::nil()),
    };

    let failures = input.validate().err().unwrap_or_else(ValidationErrors::new);
    let mut errors = FormErrors::new();

    if first_failure(&failures, "name").is_some() {
        errors.add("name", length_message("Name", &input.name));
    }
    if first_failure(&failures, "description").is_some() {
        errors.add(
            "description",
            length_message("Description", &input.description),
        );
    }
    match price {
        Err(message) => errors.add("price", message),
        Ok(_) => {
            if let Some(message) = first_failure(&failures, "price") {
                errors.add("price", message);
            }
        }
    }
    match stock {
        Err(message) => errors.add("stock", message),
        Ok(_) => {
            if let Some(message) = first_failure(&failures, "stock") {
                errors.add("stock", message);
            }
        }
    }
    if let Err(message) = category {
        errors.add("category", message);
    }

    (input, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    const CATEGORY: &str = "0b7f6a52-2f0e-4d5c-9a9e-6d0d6a1c8f11";

    fn form(price: &str, stock: &str) -> ItemForm {
        ItemForm {
            name: "Wireless Mouse".into(),
            description: "Ergonomic wireless mouse".into(),
            price: price.into(),
            stock: stock.into(),
            category: CATEGORY.into(),
        }
    }

    #[test]
    fn valid_form_is_coerced() {
        let input = form(" 20.00 ", " 150 ").validate().unwrap();
        assert_eq!(input.price, dec!(20));
        assert_eq!(input.stock, 150);
        assert_eq!(input.category_id, Uuid::parse_str(CATEGORY).unwrap());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut raw = form("10.00", "5");
        raw.name = "AB".into();
        raw.description = "ok desc".into();
        let errors = raw.validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["Name must have at least 3 characters".to_string()]
        );
    }

    #[rstest]
    #[case("0", "Price must be at least 0.01")]
    #[case("0.009", "Price must be at least 0.01")]
    #[case("123456789012345678.99", "Price must be at most 99999999999999.99")]
    #[case("100000000000000", "Price must be at most 99999999999999.99")]
    #[case("1e20", "Price must be at most 99999999999999.99")]
    #[case("1e40", "Price must be at most 99999999999999.99")]
    #[case("-1e40", "Price must be at least 0.01")]
    #[case("inf", "Price must be a number")]
    #[case("1e-40", "Price must be at least 0.01")]
    #[case("19.999", "Price must have at most 2 decimal places")]
    #[case("0.015", "Price must have at most 2 decimal places")]
    #[case("-3", "Price must be at least 0.01")]
    #[case("", "Price must be at least 0.01")]
    #[case("ten", "Price must be a number")]
    #[case("1.2.3", "Price must be a number")]
    fn invalid_prices(#[case] price: &str, #[case] expected: &str) {
        let errors = form(price, "1").validate().unwrap_err();
        assert_eq!(errors.for_field("price"), Some(expected));
        assert_eq!(errors.len(), 1);
    }

    #[rstest]
    #[case("0.01")]
    #[case("1e3")]
    #[case("99900")]
    #[case("19.990")]
    #[case("99999999999999.99")]
    fn accepted_prices(#[case] price: &str) {
        assert!(form(price, "0").validate().is_ok());
    }

    #[rstest]
    #[case("-1", "Stock must be at least 0")]
    #[case("-99999999999", "Stock must be at least 0")]
    #[case("2.5", "Stock must be a whole number")]
    #[case("lots", "Stock must be a number")]
    #[case("99999999999", "Stock must be at most 2147483647")]
    fn invalid_stock(#[case] stock: &str, #[case] expected: &str) {
        let errors = form("1", stock).validate().unwrap_err();
        assert_eq!(errors.for_field("stock"), Some(expected));
    }

    #[test]
    fn blank_stock_counts_as_zero() {
        assert_eq!(form("1", "  ").validate().unwrap().stock, 0);
    }

    #[rstest]
    #[case("", "Category is required")]
    #[case("not-an-id", "Category is invalid")]
    fn invalid_category(#[case] category: &str, #[case] expected: &str) {
        let mut raw = form("1", "1");
        raw.category = category.into();
        let errors = raw.validate().unwrap_err();
        assert_eq!(errors.for_field("category"), Some(expected));
    }

    #[test]
    fn all_failures_are_reported_in_field_order() {
        let raw = UpdateItemForm {
            name: "x".into(),
            description: "y".into(),
            price: "abc".into(),
            stock: "-2".into(),
            category: String::new(),
            id: None,
        };
        let fields: Vec<&str> = raw
            .validate()
            .unwrap_err()
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec!["name", "description", "price", "stock", "category", "id"]
        );
    }

    #[test]
    fn update_form_requires_id() {
        let base = form("5", "5");
        let mut raw = UpdateItemForm {
            name: base.name,
            description: base.description,
            price: base.price,
            stock: base.stock,
            category: base.category,
            id: None,
        };
        assert_matches!(raw.validate(), Err(errors) if errors.for_field("id").is_some());

        raw.id = Some(String::new());
        assert!(raw.validate().is_ok());
    }
}
