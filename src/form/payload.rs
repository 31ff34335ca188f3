//! Flattened transfer encoding of a restaurant form.
//!
//! The restaurant endpoints take a multipart body whose field names encode structure
//! (`cuisines[0]`, `menuItems[1][price]`). [`TransferPayload`] is that flat, ordered
//! field list, independent of any HTTP library, so it can be inspected in tests and
//! turned into a real multipart body by the transport.

use super::model::ImageFile;

/// Value of one transfer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(ImageFile),
}

/// Ordered list of named transfer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPayload {
    fields: Vec<(String, FieldValue)>,
}

impl TransferPayload {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a text field.
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), FieldValue::Text(value.into())));
    }

    /// Appends a binary file field.
    pub fn push_file(&mut self, name: impl Into<String>, file: ImageFile) {
        self.fields.push((name.into(), FieldValue::File(file)));
    }

    /// Fields in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Value of the first text field called `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, value)| match value {
            FieldValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// The first file field called `name`.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&ImageFile> {
        self.fields.iter().find_map(|(n, value)| match value {
            FieldValue::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    /// Consumes the payload, yielding its fields in emission order.
    #[must_use]
    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_respect_field_kind() {
        let mut payload = TransferPayload::new();
        payload.push_text("city", "Austin");
        payload.push_file("imageFile", ImageFile::new("a.png", "image/png", vec![1]));

        assert_eq!(payload.text("city"), Some("Austin"));
        assert_eq!(payload.text("imageFile"), None);
        assert!(payload.file("city").is_none());
        assert_eq!(payload.file("imageFile").map(|f| f.file_name.as_str()), Some("a.png"));
        assert_eq!(payload.names().collect::<Vec<_>>(), vec!["city", "imageFile"]);
        assert_eq!(payload.into_fields().len(), 2);
    }
}
