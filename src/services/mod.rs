pub mod categories;
pub mod items;

pub use categories::CategoryService;
pub use items::ItemService;

/// Result of a find-or-create: either the freshly inserted record or the
/// existing record whose name matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<M> {
    Created(M),
    Existing(M),
}

impl<M> CreateOutcome<M> {
    pub fn model(&self) -> &M {
        match self {
            CreateOutcome::Created(model) | CreateOutcome::Existing(model) => model,
        }
    }
}
