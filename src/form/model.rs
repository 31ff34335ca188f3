//! Editable restaurant form model.
//!
//! [`RestaurantForm`] is the UI-local copy of a restaurant that the management form
//! edits. It differs from the persisted entity in two ways: prices are in major units
//! (what a person types), and a freshly picked [`ImageFile`] may stand in for the
//! stored image URL.

use crate::domain::CuisineSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Restaurant form state.
///
/// `Default` is the empty "create" form: no cuisines, one blank menu item, no image.
/// Deserializable so a form can be loaded from a file by the command-line tool; the
/// binary `image_file` never is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantForm {
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// Major units.
    #[serde(default)]
    pub delivery_price: f64,
    /// Minutes.
    #[serde(default)]
    pub estimated_delivery_time: u32,
    #[serde(default)]
    pub cuisines: CuisineSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub menu_items: Vec<MenuItemForm>,
    #[serde(skip)]
    pub image_file: Option<ImageFile>,
}

/// One editable menu row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    /// Major units.
    pub price: f64,
}

/// A newly selected image awaiting upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self {
            restaurant_name: String::new(),
            city: String::new(),
            country: String::new(),
            delivery_price: 0.0,
            estimated_delivery_time: 0,
            cuisines: CuisineSet::new(),
            menu_items: vec![MenuItemForm::default()],
            image_url: None,
            image_file: None,
        }
    }
}

impl RestaurantForm {
    /// Appends a blank menu row.
    pub fn add_menu_item(&mut self) {
        self.menu_items.push(MenuItemForm::default());
    }

    /// Removes the menu row at `index`. Out-of-range indices are ignored.
    pub fn remove_menu_item(&mut self, index: usize) {
        if index < self.menu_items.len() {
            self.menu_items.remove(index);
        }
    }

    /// Checks or unchecks a cuisine.
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        self.cuisines.toggle(cuisine);
    }

    /// Attaches a new image to upload.
    ///
    /// The stored `image_url` is kept for display until the upload succeeds; at encode
    /// time the file takes precedence.
    pub fn set_image_file(&mut self, file: ImageFile) {
        self.image_file = Some(file);
    }
}
