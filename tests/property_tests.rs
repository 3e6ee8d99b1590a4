//! Property-based tests for form validation.
//!
//! These exercise the validation rules across generated inputs: trimming,
//! length bounds, numeric coercion and error ordering.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shop_inventory::forms::{CategoryForm, ItemForm, MAX_TEXT_LEN, MIN_TEXT_LEN};
use std::str::FromStr;

const CATEGORY_ID: &str = "5d3c8f0e-1b2a-4c6d-8e9f-0a1b2c3d4e5f";

fn padding_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

fn valid_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{1,60}[A-Za-z0-9]"
}

fn price_strategy() -> impl Strategy<Value = String> {
    (0u64..1_000_000, 0u8..100).prop_map(|(units, cents)| format!("{}.{:02}", units, cents))
}

fn item_form(price: String, stock: String) -> ItemForm {
    ItemForm {
        name: "Mechanical Keyboard".into(),
        description: "High-quality mechanical keyboard".into(),
        price,
        stock,
        category: CATEGORY_ID.into(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn valid_text_survives_trimming(
        name in valid_text_strategy(),
        description in valid_text_strategy(),
        before in padding_strategy(),
        after in padding_strategy(),
    ) {
        let form = CategoryForm {
            name: format!("{}{}{}", before, name, after),
            description: format!("{}{}{}", after, description, before),
        };
        let input = form.validate();
        prop_assert!(input.is_ok(), "rejected: {:?}", form);
        let input = input.unwrap();
        prop_assert_eq!(input.name, name);
        prop_assert_eq!(input.description, description);
    }

    #[test]
    fn text_length_bounds_hold(len in 0usize..300) {
        let form = CategoryForm {
            name: "n".repeat(len),
            description: "Fine description".into(),
        };
        let accepted = form.validate().is_ok();
        prop_assert_eq!(accepted, (MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len));
    }

    #[test]
    fn price_bound_matches_minimum(price in price_strategy()) {
        let expected_ok = Decimal::from_str(&price).unwrap() >= Decimal::from_str("0.01").unwrap();
        let result = item_form(price.clone(), "1".into()).validate();
        prop_assert_eq!(result.is_ok(), expected_ok, "price {}", price);
        if let Err(errors) = result {
            prop_assert_eq!(errors.for_field("price"), Some("Price must be at least 0.01"));
        }
    }

    #[test]
    fn stock_accepts_exactly_non_negative_integers(stock in -1_000i64..1_000) {
        let result = item_form("1.00".into(), stock.to_string()).validate();
        prop_assert_eq!(result.is_ok(), stock >= 0);
        if let Ok(input) = result {
            prop_assert_eq!(i64::from(input.stock), stock);
        }
    }

    #[test]
    fn non_numeric_price_is_reported_as_such(word in "[a-z]{1,8}") {
        let errors = item_form(word, "1".into()).validate().unwrap_err();
        prop_assert_eq!(errors.for_field("price"), Some("Price must be a number"));
    }

    #[test]
    fn errors_are_ordered_by_field(short in "[a-z]{0,2}") {
        let form = ItemForm {
            name: short.clone(),
            description: short,
            price: "0".into(),
            stock: "-5".into(),
            category: String::new(),
        };
        let fields: Vec<&str> = form.validate().unwrap_err().iter().map(|e| e.field).collect();
        prop_assert_eq!(fields, vec!["name", "description", "price", "stock", "category"]);
    }
}
