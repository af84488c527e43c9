//! Value converters
//!
//! Pure, diagnostic-free mappings for the embedded sub-objects. Numeric
//! fields go through `to_number`, URL fields through `normalize_url`, and
//! everything else through `to_text`.

use super::coerce::{normalize_url, to_number, to_text};
use super::shape::{Fields, Shape, has_type, sniff};
use crate::config::ConversionOptions;
use crate::models::{Address, Coordinates, Image, Offer, Place, Price};
use serde_json::Value;

/// Resolve an `image`/`logo` field.
///
/// A string is an image URL. An object is only trusted when it is tagged
/// `ImageObject`; any other shape is dropped.
pub fn image(value: Option<&Value>, options: &ConversionOptions) -> Option<Image> {
    match sniff(value) {
        Shape::Text(_) => Some(Image::from_url(normalize_url(value, options))),
        Shape::Object(obj) if has_type(obj, "ImageObject") => Some(image_object(obj, options)),
        _ => None,
    }
}

/// Map an `ImageObject`; `contentUrl` stands in when `url` is falsy.
pub fn image_object(obj: &Fields, options: &ConversionOptions) -> Image {
    let location = [obj.get("url"), obj.get("contentUrl")]
        .into_iter()
        .flatten()
        .find(|v| is_truthy(v));

    Image {
        url: normalize_url(location, options),
        width: to_number(obj.get("width")),
        height: to_number(obj.get("height")),
        caption: to_text(obj.get("caption")),
    }
}

/// `null`, `false`, zero, NaN and the empty string are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Resolve an `address` field: a string is kept verbatim as the street.
pub fn address(value: Option<&Value>) -> Option<Address> {
    match sniff(value) {
        Shape::Text(s) => Some(Address::street_only(s)),
        Shape::Object(obj) => Some(postal_address(obj)),
        _ => None,
    }
}

/// Map a `PostalAddress` field by field
pub fn postal_address(obj: &Fields) -> Address {
    Address {
        street: to_text(obj.get("streetAddress")),
        city: to_text(obj.get("addressLocality")),
        region: to_text(obj.get("addressRegion")),
        postal_code: to_text(obj.get("postalCode")),
        country: to_text(obj.get("addressCountry")),
    }
}

/// Resolve an event `location`: a string names the place.
pub fn place(value: Option<&Value>, options: &ConversionOptions) -> Option<Place> {
    match sniff(value) {
        Shape::Text(s) => Some(Place {
            name: Some(s.to_string()),
            ..Default::default()
        }),
        Shape::Object(obj) => Some(place_object(obj, options)),
        _ => None,
    }
}

/// Map a `Place`, resolving its nested address and geo fields
pub fn place_object(obj: &Fields, options: &ConversionOptions) -> Place {
    Place {
        name: to_text(obj.get("name")),
        address: address(obj.get("address")),
        coordinates: match sniff(obj.get("geo")) {
            Shape::Object(geo) => Some(coordinates(geo)),
            _ => None,
        },
        website: normalize_url(obj.get("url"), options),
    }
}

/// Map `GeoCoordinates`
pub fn coordinates(obj: &Fields) -> Coordinates {
    Coordinates {
        latitude: to_number(obj.get("latitude")),
        longitude: to_number(obj.get("longitude")),
    }
}

/// Map an `Offer`. The price object is always emitted.
pub fn offer(obj: &Fields, options: &ConversionOptions) -> Offer {
    Offer {
        price: Price {
            amount: to_number(obj.get("price")),
            currency: to_text(obj.get("priceCurrency")),
        },
        availability: to_text(obj.get("availability")),
        website: normalize_url(obj.get("url"), options),
        valid_from: to_text(obj.get("validFrom")),
        valid_through: to_text(obj.get("validThrough")),
    }
}
