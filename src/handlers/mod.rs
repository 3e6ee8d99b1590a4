pub mod categories;
pub mod common;
pub mod health;
pub mod items;
