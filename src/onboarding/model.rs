//! Candidate draft data model and the field-list editor.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::state::WizardStep;

/// An item that can live in a [`FieldList`].
pub trait ListItem: Clone {
    /// Whether the list must keep at least one slot after a removal.
    const KEEP_PLACEHOLDER: bool;

    /// Value used for newly appended rows.
    fn blank() -> Self;
}

impl ListItem for String {
    const KEEP_PLACEHOLDER: bool = true;

    fn blank() -> Self {
        String::new()
    }
}

/// Ordered, editable sequence backing one repeatable input group.
///
/// Indices come from the UI's view of the current sequence, so stale or
/// out-of-range indices are ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList<T: ListItem> {
    items: Vec<T>,
}

impl<T: ListItem> FieldList<T> {
    pub fn new() -> Self {
        if T::KEEP_PLACEHOLDER {
            Self {
                items: vec![T::blank()],
            }
        } else {
            Self { items: Vec::new() }
        }
    }

    /// Append one blank item.
    pub fn append(&mut self) {
        self.items.push(T::blank());
    }

    /// Replace the item at `index`. Returns false (and does nothing) when out of range.
    pub fn update_at(&mut self, index: usize, value: T) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Edit the item at `index` in place. Returns false when out of range.
    pub fn edit_at(&mut self, index: usize, f: impl FnOnce(&mut T)) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                f(slot);
                true
            }
            None => false,
        }
    }

    /// Remove the item at `index`. Returns false when out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        if self.items.is_empty() && T::KEEP_PLACEHOLDER {
            self.items.push(T::blank());
        }
        true
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: ListItem> Default for FieldList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ListItem> From<Vec<T>> for FieldList<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            return Self::new();
        }
        Self { items }
    }
}

impl<'a, T: ListItem> IntoIterator for &'a FieldList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: ListItem + Serialize> Serialize for FieldList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: ListItem + Deserialize<'de>> Deserialize<'de> for FieldList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// One work-experience entry as typed into the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    /// `YYYY-MM-DD` from a date input, or blank.
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub highlights: FieldList<String>,
}

impl ListItem for ExperienceDraft {
    const KEEP_PLACEHOLDER: bool = false;

    fn blank() -> Self {
        Self::default()
    }
}

/// One project entry as typed into the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub name: String,
    pub role: String,
    pub description: String,
    pub tech_stack: FieldList<String>,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: FieldList<String>,
}

impl ListItem for ProjectDraft {
    const KEEP_PLACEHOLDER: bool = false;

    fn blank() -> Self {
        Self::default()
    }
}

/// Optional resume section of the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDraft {
    pub summary: String,
    pub skills: FieldList<String>,
    pub experience: FieldList<ExperienceDraft>,
    pub projects: FieldList<ProjectDraft>,
}

/// In-memory candidate record assembled by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub resume_link: String,
    /// Unset until the user enters a whole number.
    pub age: Option<i64>,
    pub resume: ResumeDraft,
}

/// Free-text fields of the draft that are edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Address,
    ResumeLink,
    Summary,
}

impl TextField {
    /// Step whose screen shows this field.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::FirstName | Self::LastName => WizardStep::Personal,
            Self::Email | Self::PhoneNumber | Self::Address | Self::ResumeLink => {
                WizardStep::Contact
            }
            Self::Summary => WizardStep::Resume,
        }
    }

    /// Wire name, matching the draft's JSON keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Address => "address",
            Self::ResumeLink => "resumeLink",
            Self::Summary => "summary",
        }
    }
}

impl CandidateDraft {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Email => &self.email,
            TextField::PhoneNumber => &self.phone_number,
            TextField::Address => &self.address,
            TextField::ResumeLink => &self.resume_link,
            TextField::Summary => &self.resume.summary,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::FirstName => self.first_name = value,
            TextField::LastName => self.last_name = value,
            TextField::Email => self.email = value,
            TextField::PhoneNumber => self.phone_number = value,
            TextField::Address => self.address = value,
            TextField::ResumeLink => self.resume_link = value,
            TextField::Summary => self.resume.summary = value,
        }
    }

    /// Set age from raw input text. Blank or non-integer input leaves it unset.
    pub fn set_age_input(&mut self, input: &str) {
        self.age = input.trim().parse::<i64>().ok();
    }

    /// Back to the empty form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
