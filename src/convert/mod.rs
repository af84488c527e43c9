//! Schema.org conversion engine
//!
//! Converts Schema.org JSON-LD entities (Person, Organization, Product,
//! Event) into the closed set of normalized entities in [`crate::models`].
//!
//! The dispatcher routes each batch item on its primary `@type`, the entity
//! converters map their fixed field sets, and the value converters build the
//! embedded sub-objects. Diagnostics flow upward and receive their batch
//! index only at the dispatcher.

mod coerce;
pub mod event;
pub mod organization;
pub mod person;
pub mod product;
mod shape;
pub mod values;

pub use crate::models::is_of_type;
pub use shape::{Fields, Shape, list_items, sniff, type_tag};

use crate::config::ConversionOptions;
use crate::models::{Diagnostic, EntityType, INVALID_TYPE_REASON, NormalizedEntity};
use crate::validation::{Valid, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Output of a single entity converter
#[derive(Debug, Clone, PartialEq)]
pub struct Converted<T> {
    pub entity: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Converted<T> {
    pub fn new(entity: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            entity,
            diagnostics,
        }
    }
}

/// Successful batch conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "conversion results should be processed or diagnostics checked"]
pub struct BatchConversion {
    /// Converted entities, in source order
    pub entities: Vec<NormalizedEntity>,
    /// Non-fatal findings, each path starting with the source item's index
    pub diagnostics: Vec<Diagnostic>,
}

/// Successful single-entity conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "conversion results should be processed or diagnostics checked"]
pub struct SingleConversion {
    pub entity: NormalizedEntity,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converter for Schema.org structured data.
///
/// Holds the conversion options for repeated calls; every call is a pure
/// function of its input and those options.
#[derive(Debug, Clone, Default)]
pub struct SchemaOrgConverter {
    options: ConversionOptions,
}

impl SchemaOrgConverter {
    /// Create a converter with default options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use structured_data_sdk::convert::SchemaOrgConverter;
    /// use serde_json::json;
    ///
    /// let converter = SchemaOrgConverter::new();
    /// let result = converter
    ///     .convert(Some(&json!({"@type": "Person", "name": "Jane Doe"})))
    ///     .unwrap();
    /// assert_eq!(result.data.entities.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert one entity or an array of entities.
    pub fn convert(&self, input: Option<&Value>) -> ValidationResult<BatchConversion> {
        convert_batch(input, &self.options)
    }

    /// Convert a single entity, returning the first converted entity.
    pub fn convert_single(&self, input: &Value) -> ValidationResult<SingleConversion> {
        convert_single(input, &self.options)
    }

    /// Parse JSON text, then convert it as a batch.
    pub fn convert_json(&self, json_content: &str) -> ValidationResult<BatchConversion> {
        convert_json(json_content, &self.options)
    }
}

/// Convert one Schema.org entity or an array of them.
///
/// Items without a usable `@type`, or with a type outside the supported
/// set, are skipped with a diagnostic. The call only fails when the input
/// is absent or `null`, when no item could be converted, or when a
/// converter panics.
///
/// # Example
///
/// ```rust
/// use structured_data_sdk::config::ConversionOptions;
/// use structured_data_sdk::convert::convert_batch;
/// use serde_json::json;
///
/// let input = json!([
///     {"@type": "Person", "name": "John"},
///     {"@type": "UnknownType", "name": "Nope"}
/// ]);
/// let result = convert_batch(Some(&input), &ConversionOptions::default()).unwrap();
/// assert_eq!(result.data.entities.len(), 1);
/// assert_eq!(result.data.diagnostics[0].path, vec!["1"]);
/// ```
pub fn convert_batch(
    input: Option<&Value>,
    options: &ConversionOptions,
) -> ValidationResult<BatchConversion> {
    let input = match input {
        None | Some(Value::Null) => {
            return Err(ValidationError::failed("Input is null or undefined"));
        }
        Some(value) => value,
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatch(input, options)));
    let batch = match outcome {
        Ok(batch) => batch,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("Schema.org conversion aborted: {}", message);
            return Err(ValidationError::failed_with(
                "Unexpected error during Schema.org conversion",
                json!({ "originalError": message }),
            ));
        }
    };

    if batch.entities.is_empty() {
        warn!(
            "No Schema.org entities converted ({} diagnostics)",
            batch.diagnostics.len()
        );
        return Err(ValidationError::failed_with(
            "No valid Schema.org entities could be converted",
            json!({ "diagnostics": batch.diagnostics }),
        ));
    }

    let count = batch.entities.len();
    info!(
        "Converted {} Schema.org entities with {} diagnostics",
        count,
        batch.diagnostics.len()
    );
    Ok(Valid::new(
        format!(
            "Successfully converted {} Schema.org {}",
            count,
            if count == 1 { "entity" } else { "entities" }
        ),
        batch,
    ))
}

/// Convert a single entity; the first converted entity is returned.
pub fn convert_single(
    input: &Value,
    options: &ConversionOptions,
) -> ValidationResult<SingleConversion> {
    let Valid { message, data } = convert_batch(Some(input), options)?;
    let BatchConversion {
        entities,
        diagnostics,
    } = data;

    match entities.into_iter().next() {
        Some(entity) => Ok(Valid::new(
            message,
            SingleConversion {
                entity,
                diagnostics,
            },
        )),
        None => Err(ValidationError::failed("No entity could be converted")),
    }
}

/// Parse JSON text, then convert it with [`convert_batch`].
pub fn convert_json(
    json_content: &str,
    options: &ConversionOptions,
) -> ValidationResult<BatchConversion> {
    let value: Value = serde_json::from_str(json_content)
        .map_err(|e| ValidationError::failed(format!("Invalid JSON: {}", e)))?;
    convert_batch(Some(&value), options)
}

fn dispatch(input: &Value, options: &ConversionOptions) -> BatchConversion {
    let items: Vec<&Value> = match input {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut entities = Vec::with_capacity(items.len());
    let mut diagnostics = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        let Some((fields, primary)) = item.as_object().and_then(|f| Some((f, type_tag(f)?)))
        else {
            warn!("Skipping item {}: no usable @type", index);
            diagnostics.push(
                Diagnostic::new("@type", item.get("@type").cloned(), INVALID_TYPE_REASON)
                    .at(index.to_string()),
            );
            continue;
        };

        let entity_type = match primary.parse::<EntityType>() {
            Ok(entity_type) => entity_type,
            Err(reason) => {
                warn!("Skipping item {}: {}", index, reason);
                diagnostics.push(
                    Diagnostic::new("@type", Some(Value::from(primary)), reason)
                        .at(index.to_string()),
                );
                continue;
            }
        };

        debug!("Converting item {} as {}", index, entity_type);
        let (entity, found) = convert_entity(entity_type, fields, options);
        entities.push(entity);
        diagnostics.extend(found.into_iter().map(|d| d.at(index.to_string())));
    }

    BatchConversion {
        entities,
        diagnostics,
    }
}

fn convert_entity(
    entity_type: EntityType,
    fields: &Fields,
    options: &ConversionOptions,
) -> (NormalizedEntity, Vec<Diagnostic>) {
    match entity_type {
        EntityType::Person => {
            let c = person::convert(fields, options);
            (NormalizedEntity::Person(c.entity), c.diagnostics)
        }
        EntityType::Organization => {
            let c = organization::convert(fields, options);
            (NormalizedEntity::Organization(c.entity), c.diagnostics)
        }
        EntityType::Product => {
            let c = product::convert(fields, options);
            (NormalizedEntity::Product(c.entity), c.diagnostics)
        }
        EntityType::Event => {
            let c = event::convert(fields, options);
            (NormalizedEntity::Event(c.entity), c.diagnostics)
        }
    }
}

/// Record a required-field diagnostic when the resolved value is missing or empty.
pub(crate) fn require_field(
    fields: &Fields,
    field: &str,
    resolved: Option<&str>,
    options: &ConversionOptions,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if options.validate_required && resolved.is_none_or(str::is_empty) {
        diagnostics.push(Diagnostic::required(field, fields.get(field)));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_item_records_raw_type() {
        let input = json!([{"@type": 5, "name": "x"}, "just a string", {"@type": "Person", "name": "A"}]);
        let result = convert_batch(Some(&input), &ConversionOptions::default()).unwrap();
        let diags = result.data.diagnostics;

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].value, Some(json!(5)));
        assert_eq!(diags[0].reason, INVALID_TYPE_REASON);
        assert_eq!(diags[0].path, vec!["0"]);
        assert_eq!(diags[1].value, None);
        assert_eq!(diags[1].path, vec!["1"]);
    }

    #[test]
    fn test_unsupported_type_records_primary_type() {
        let input = json!([{"@type": ["Thing", "Person"]}, {"@type": "Event", "name": "E", "startDate": "2024"}]);
        let result = convert_batch(Some(&input), &ConversionOptions::default()).unwrap();
        let diag = &result.data.diagnostics[0];
        assert_eq!(diag.field, "@type");
        assert_eq!(diag.value, Some(json!("Thing")));
        assert_eq!(diag.reason, "Unsupported Schema.org type: Thing");
    }

    #[test]
    fn test_empty_type_array_is_unsupported() {
        let input = json!({"@type": [], "name": "x"});
        let err = convert_batch(Some(&input), &ConversionOptions::default()).unwrap_err();
        let context = err.context().unwrap();
        assert_eq!(
            context["diagnostics"][0]["reason"],
            json!("Unsupported Schema.org type: ")
        );
    }

    #[test]
    fn test_require_field_treats_empty_as_missing() {
        let fields = json!({"name": ""});
        let mut diags = Vec::new();
        require_field(
            fields.as_object().unwrap(),
            "name",
            Some(""),
            &ConversionOptions::default(),
            &mut diags,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].reason, "Required field 'name' is missing or invalid");
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(1u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_converter_holds_options() {
        let converter =
            SchemaOrgConverter::with_options(ConversionOptions::default().with_validate_required(false));
        let result = converter.convert_json(r#"{"@type": "Organization"}"#).unwrap();
        assert!(result.data.diagnostics.is_empty());
        assert!(!converter.options().validate_required);
    }

    #[test]
    fn test_convert_json_rejects_bad_text() {
        let err = convert_json("{not json", &ConversionOptions::default()).unwrap_err();
        assert!(err.message().starts_with("Invalid JSON"));
    }
}
