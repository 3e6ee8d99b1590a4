pub mod category;
pub mod item;

/// Key under which two names count as the same (Unicode lowercase).
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn urls_are_derived_from_ids() {
        let id = Uuid::parse_str("6f1c2d8e-4b7a-4c39-9d55-0a1b2c3d4e5f").unwrap();
        assert_eq!(
            category::url_for(id),
            "/shop/category/6f1c2d8e-4b7a-4c39-9d55-0a1b2c3d4e5f"
        );
        assert_eq!(
            item::url_for(id),
            "/shop/item/6f1c2d8e-4b7a-4c39-9d55-0a1b2c3d4e5f"
        );
    }

    #[test]
    fn name_keys_fold_non_ascii_case() {
        assert_eq!(name_key("Émail"), name_key("émail"));
        assert_eq!(name_key("ÜBER Gadgets"), "über gadgets");
        assert_ne!(name_key("Emails"), name_key("Émails"));
    }
}
