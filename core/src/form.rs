use crate::models::NewFavorite;

/// The three inputs of the add form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Note,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Category, FormField::Note];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Category => "Category",
            FormField::Note => "Note (optional)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Category,
            FormField::Category => FormField::Note,
            FormField::Note => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Note,
            FormField::Category => FormField::Name,
            FormField::Note => FormField::Category,
        }
    }
}

/// Current text of the add form. Setting a field never fails and has no
/// side effects; the only reset is `clear`, after a successful insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteForm {
    name: String,
    category: String,
    note: String,
}

impl FavoriteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
    }

    pub fn set_note(&mut self, value: impl Into<String>) {
        self.note = value.into();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Note => &self.note,
        }
    }

    /// Mutable access for character-level editing
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Category => &mut self.category,
            FormField::Note => &mut self.note,
        }
    }

    /// Name and category present. Only the empty string counts as absent.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.category.is_empty()
    }

    pub fn to_new_favorite(&self) -> Option<NewFavorite> {
        if !self.is_submittable() {
            return None;
        }
        Some(NewFavorite::new(
            self.name.clone(),
            self.category.clone(),
            self.note.clone(),
        ))
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.category.clear();
        self.note.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.category.is_empty() && self.note.is_empty()
    }
}
