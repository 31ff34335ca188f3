//! Conversion between the persisted restaurant and the editable form.
//!
//! [`decode`] turns a fetched [`Restaurant`] (or its absence) into a [`RestaurantForm`];
//! [`encode`] validates an edited form and flattens it into a [`TransferPayload`].
//! Monetary fields cross the boundary through [`MinorUnits`], which makes
//! `encode(decode(r))` reproduce every minor-unit price of `r` exactly.
//!
//! # Field layout
//!
//! `encode` always emits fields in this order:
//!
//! ```text
//! restaurantName, city, country, deliveryPrice, estimatedDeliveryTime,
//! cuisines[0..n], menuItems[0][name], menuItems[0][price], ..., imageFile | imageUrl
//! ```

use super::model::{MenuItemForm, RestaurantForm};
use super::payload::TransferPayload;
use crate::domain::{MenuhubError, MinorUnits, Restaurant, Result};

/// Smallest accepted menu item price, in major units: one minor unit.
///
/// A blank price field arrives as `0.0`; anything a stored restaurant can hold
/// decodes to at least this much.
pub const MIN_MENU_ITEM_PRICE: f64 = 0.01;

/// Builds the form model for `restaurant`.
///
/// `None` yields the empty create-mode form.
///
/// # Example
///
/// ```rust
/// use menuhub::form::decode;
///
/// let form = decode(None);
/// assert_eq!(form.menu_items.len(), 1);
/// ```
#[must_use]
pub fn decode(restaurant: Option<&Restaurant>) -> RestaurantForm {
    let Some(restaurant) = restaurant else {
        tracing::debug!("no restaurant, using create form");
        return RestaurantForm::default();
    };

    let _span = tracing::debug_span!("decode_restaurant",
        menu_items = restaurant.menu_items.len(),
        cuisines = restaurant.cuisines.len()
    )
    .entered();

    RestaurantForm {
        restaurant_name: restaurant.restaurant_name.clone(),
        city: restaurant.city.clone(),
        country: restaurant.country.clone(),
        delivery_price: restaurant.delivery_price.to_major(),
        estimated_delivery_time: restaurant.estimated_delivery_time,
        cuisines: restaurant.cuisines.clone(),
        menu_items: restaurant
            .menu_items
            .iter()
            .map(|item| MenuItemForm {
                name: item.name.clone(),
                price: item.price.to_major(),
            })
            .collect(),
        image_url: restaurant.image_url.clone(),
        image_file: None,
    }
}

/// Checks every form rule, returning the first violation.
///
/// # Errors
///
/// Returns [`MenuhubError::Validation`] naming the offending field.
pub fn validate(form: &RestaurantForm) -> Result<()> {
    require_text("restaurantName", &form.restaurant_name, "restaurant name is required")?;
    require_text("city", &form.city, "city is required")?;
    require_text("country", &form.country, "country is required")?;

    if !form.delivery_price.is_finite() {
        return Err(MenuhubError::validation("deliveryPrice", "must be a valid number"));
    }
    if form.delivery_price < 0.0 {
        return Err(MenuhubError::validation("deliveryPrice", "must not be negative"));
    }

    if form.cuisines.is_empty() {
        return Err(MenuhubError::validation("cuisines", "please select at least one item"));
    }

    for (index, item) in form.menu_items.iter().enumerate() {
        require_text(&format!("menuItems[{index}].name"), &item.name, "name is required")?;
        if !item.price.is_finite() || item.price < MIN_MENU_ITEM_PRICE {
            return Err(MenuhubError::validation(
                format!("menuItems[{index}].price"),
                "price is required",
            ));
        }
    }

    let has_url = form.image_url.as_deref().is_some_and(|url| !url.trim().is_empty());
    if !has_url && form.image_file.is_none() {
        return Err(MenuhubError::validation(
            "imageFile",
            "Either image URL or image File must be provided",
        ));
    }

    Ok(())
}

/// Validates `form` and flattens it for transfer.
///
/// Prices are converted to minor units. When both an uploaded file and a stored URL
/// are present, the file is sent and the URL omitted. The same form always yields the
/// same fields in the same order.
///
/// # Errors
///
/// Returns [`MenuhubError::Validation`] if any form rule fails; nothing is produced
/// in that case.
///
/// # Example
///
/// ```rust
/// use menuhub::form::{encode, RestaurantForm};
///
/// let mut form = RestaurantForm::default();
/// form.restaurant_name = "Casa Taco".into();
/// form.city = "Austin".into();
/// form.country = "USA".into();
/// form.delivery_price = 2.99;
/// form.toggle_cuisine("Mexican");
/// form.menu_items[0].name = "Taco".into();
/// form.menu_items[0].price = 3.99;
/// form.image_url = Some("https://img.example/taco.png".into());
///
/// let payload = encode(&form).unwrap();
/// assert_eq!(payload.text("deliveryPrice"), Some("299"));
/// assert_eq!(payload.text("menuItems[0][price]"), Some("399"));
/// ```
pub fn encode(form: &RestaurantForm) -> Result<TransferPayload> {
    let _span = tracing::debug_span!("encode_restaurant",
        menu_items = form.menu_items.len(),
        cuisines = form.cuisines.len(),
        has_image_file = form.image_file.is_some()
    )
    .entered();

    validate(form)?;

    let mut payload = TransferPayload::new();
    payload.push_text("restaurantName", form.restaurant_name.as_str());
    payload.push_text("city", form.city.as_str());
    payload.push_text("country", form.country.as_str());
    payload.push_text(
        "deliveryPrice",
        to_minor("deliveryPrice", form.delivery_price)?.to_string(),
    );
    payload.push_text(
        "estimatedDeliveryTime",
        form.estimated_delivery_time.to_string(),
    );

    for (index, cuisine) in form.cuisines.iter().enumerate() {
        payload.push_text(format!("cuisines[{index}]"), cuisine);
    }

    for (index, item) in form.menu_items.iter().enumerate() {
        let price = to_minor(&format!("menuItems[{index}].price"), item.price)?;
        payload.push_text(format!("menuItems[{index}][name]"), item.name.as_str());
        payload.push_text(format!("menuItems[{index}][price]"), price.to_string());
    }

    match (&form.image_file, &form.image_url) {
        (Some(file), url) => {
            if url.is_some() {
                tracing::debug!("image file supersedes stored image url");
            }
            payload.push_file("imageFile", file.clone());
        }
        (None, Some(url)) => payload.push_text("imageUrl", url.as_str()),
        (None, None) => {}
    }

    tracing::debug!(fields = payload.len(), "restaurant form encoded");
    Ok(payload)
}

fn require_text(field: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MenuhubError::validation(field, message));
    }
    Ok(())
}

/// Converts a major-unit amount, reporting failures against `field`.
fn to_minor(field: &str, major: f64) -> Result<MinorUnits> {
    MinorUnits::from_major(major).map_err(|err| match err {
        MenuhubError::Validation { message, .. } => MenuhubError::validation(field, message),
        other => other,
    })
}
