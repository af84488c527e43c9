//! Product converter

use super::coerce::{collapse_context, to_non_empty_text, to_number, to_text};
use super::shape::{Fields, Shape, list_items, sniff};
use super::{Converted, require_field, values};
use crate::config::ConversionOptions;
use crate::models::{Price, Product, Provenance, Weight};
use serde_json::Value;

/// Convert a Schema.org `Product`.
pub fn convert(fields: &Fields, options: &ConversionOptions) -> Converted<Product> {
    let mut diagnostics = Vec::new();

    let product = Product {
        id: to_text(fields.get("@id")),
        source: Provenance::SchemaOrg,
        context: collapse_context(fields.get("@context")),
        name: to_text(fields.get("name")),
        description: to_text(fields.get("description")),
        images: list_items(fields.get("image")).map(|items| {
            items
                .into_iter()
                .filter_map(|item| values::image(Some(item), options))
                .collect()
        }),
        brand: name_or_text(fields.get("brand")),
        manufacturer: name_or_text(fields.get("manufacturer")),
        model: to_text(fields.get("model")),
        sku: to_text(fields.get("sku")),
        gtin: to_text(fields.get("gtin")),
        price: price(fields),
        availability: to_text(fields.get("availability")),
        category: to_text(fields.get("category")),
        weight: weight(fields.get("weight")),
        color: to_text(fields.get("color")),
    };

    require_field(fields, "name", product.name.as_deref(), options, &mut diagnostics);

    Converted::new(product, diagnostics)
}

/// `brand`/`manufacturer`: a bare name, or the `name` of a nested object
fn name_or_text(value: Option<&Value>) -> Option<String> {
    match sniff(value) {
        Shape::Text(s) => Some(s.to_string()),
        Shape::Object(obj) => to_text(obj.get("name")),
        _ => None,
    }
}

fn price(fields: &Fields) -> Option<Price> {
    match fields.get("price") {
        None | Some(Value::Null) => None,
        amount => Some(Price {
            amount: to_number(amount),
            currency: to_text(fields.get("priceCurrency")),
        }),
    }
}

/// `weight`: a bare quantity string, or a `QuantitativeValue`
fn weight(value: Option<&Value>) -> Option<Weight> {
    match sniff(value) {
        Shape::Text(_) => Some(Weight {
            value: to_number(value),
            unit: None,
        }),
        Shape::Object(obj) => Some(Weight {
            value: to_number(obj.get("value")),
            unit: to_non_empty_text(obj.get("unitCode")).or_else(|| to_text(obj.get("unitText"))),
        }),
        _ => None,
    }
}
