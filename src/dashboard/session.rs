use crate::model::ProductId;

/// Which collection the panel is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Products,
    Doctors,
}

/// Whether a product row has been loaded into the form for editing.
///
/// Derived from the product buffer: `Active` exactly while the buffer carries an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSession {
    Inactive,
    Active(ProductId),
}

impl EditSession {
    pub fn is_active(&self) -> bool {
        matches!(self, EditSession::Active(_))
    }
}
