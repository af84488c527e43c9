//! Event converter

use super::coerce::{collapse_context, normalize_url, to_text};
use super::shape::{Fields, Shape, has_type, list_items, sniff};
use super::{Converted, organization, person, require_field, values};
use crate::config::ConversionOptions;
use crate::models::{Agent, Diagnostic, Event, Organization, Person, Provenance};
use serde_json::Value;

/// Convert a Schema.org `Event`.
///
/// Organizer and performers are sniffed per item: an object whose primary
/// type is `Person` converts as a person, any other object as an
/// organization. Their diagnostics are merged in source order.
pub fn convert(fields: &Fields, options: &ConversionOptions) -> Converted<Event> {
    let mut diagnostics = Vec::new();

    let organizer = agent(fields.get("organizer"), options, &mut diagnostics, |name| {
        Agent::Organization(Box::new(Organization::named(name)))
    });

    let performers = list_items(fields.get("performer")).map(|items| {
        items
            .into_iter()
            .filter_map(|item| {
                agent(Some(item), options, &mut diagnostics, |name| {
                    Agent::Person(Box::new(Person::named(name)))
                })
            })
            .collect()
    });

    let offers = list_items(fields.get("offers")).map(|items| {
        items
            .into_iter()
            .filter_map(Value::as_object)
            .map(|obj| values::offer(obj, options))
            .collect()
    });

    let event = Event {
        id: to_text(fields.get("@id")),
        source: Provenance::SchemaOrg,
        context: collapse_context(fields.get("@context")),
        name: to_text(fields.get("name")),
        description: to_text(fields.get("description")),
        start_date: to_text(fields.get("startDate")),
        end_date: to_text(fields.get("endDate")),
        location: values::place(fields.get("location"), options),
        organizer,
        performers,
        website: normalize_url(fields.get("url"), options),
        image: values::image(fields.get("image"), options),
        offers,
        status: to_text(fields.get("eventStatus")),
        attendance_mode: to_text(fields.get("eventAttendanceMode")),
    };

    require_field(fields, "name", event.name.as_deref(), options, &mut diagnostics);
    require_field(
        fields,
        "startDate",
        event.start_date.as_deref(),
        options,
        &mut diagnostics,
    );

    Converted::new(event, diagnostics)
}

/// Resolve an organizer/performer slot; `stub` wraps a bare name.
fn agent(
    value: Option<&Value>,
    options: &ConversionOptions,
    diagnostics: &mut Vec<Diagnostic>,
    stub: impl Fn(&str) -> Agent,
) -> Option<Agent> {
    match sniff(value) {
        Shape::Text(name) => Some(stub(name)),
        Shape::Object(obj) if has_type(obj, "Person") => {
            let nested = person::convert(obj, options);
            diagnostics.extend(nested.diagnostics);
            Some(Agent::Person(Box::new(nested.entity)))
        }
        Shape::Object(obj) => {
            let nested = organization::convert(obj, options);
            diagnostics.extend(nested.diagnostics);
            Some(Agent::Organization(Box::new(nested.entity)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityType, Place};
    use serde_json::json;

    fn convert_value(source: Value) -> Converted<Event> {
        convert(source.as_object().unwrap(), &ConversionOptions::default())
    }

    #[test]
    fn test_string_location_organizer_and_performer() {
        let result = convert_value(json!({
            "@type": "Event",
            "name": "Meetup",
            "startDate": "2024-06-01T18:00",
            "location": "Community Center",
            "organizer": "Rust Guild",
            "performer": "Jane Speaker"
        }));
        let event = result.entity;

        assert!(result.diagnostics.is_empty());
        assert_eq!(
            event.location,
            Some(Place {
                name: Some("Community Center".to_string()),
                ..Default::default()
            })
        );
        let organizer = event.organizer.unwrap();
        assert_eq!(organizer.entity_type(), EntityType::Organization);
        assert_eq!(organizer.name(), Some("Rust Guild"));

        let performers = event.performers.unwrap();
        assert_eq!(performers.len(), 1);
        assert_eq!(performers[0].entity_type(), EntityType::Person);
        assert_eq!(performers[0].name(), Some("Jane Speaker"));
    }

    #[test]
    fn test_organizer_type_sniffing() {
        let event = convert_value(json!({
            "@type": "Event",
            "name": "Talk",
            "startDate": "2024-06-01",
            "organizer": {"@type": "Person", "name": "Alice", "email": "alice@example.com"},
            "performer": [
                {"@type": "Person", "name": "Bob"},
                {"@type": "MusicGroup", "name": "The Band"},
                7
            ]
        }))
        .entity;

        let organizer = event.organizer.unwrap();
        assert_eq!(
            organizer.as_person().and_then(|p| p.email.as_deref()),
            Some("alice@example.com")
        );

        let performers = event.performers.unwrap();
        assert_eq!(performers.len(), 2);
        assert_eq!(performers[0].entity_type(), EntityType::Person);
        assert_eq!(performers[1].entity_type(), EntityType::Organization);
        assert_eq!(performers[1].name(), Some("The Band"));
    }

    #[test]
    fn test_offers_skip_non_objects() {
        let event = convert_value(json!({
            "@type": "Event",
            "name": "Concert",
            "startDate": "2024-07-01",
            "offers": [
                {"@type": "Offer", "price": "25.00", "priceCurrency": "EUR"},
                "free",
                {"@type": "Offer", "availability": "SoldOut"}
            ]
        }))
        .entity;
        let offers = event.offers.unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].price.amount, Some(25.0));
        assert_eq!(offers[1].price.amount, None);
        assert_eq!(offers[1].availability.as_deref(), Some("SoldOut"));
    }

    #[test]
    fn test_single_offer_object_becomes_list() {
        let event = convert_value(json!({
            "@type": "Event",
            "name": "Concert",
            "startDate": "2024-07-01",
            "offers": {"@type": "Offer", "price": 10}
        }))
        .entity;
        assert_eq!(event.offers.map(|o| o.len()), Some(1));
    }

    #[test]
    fn test_required_name_and_start_date() {
        let result = convert_value(json!({"@type": "Event", "description": "TBA"}));
        let fields: Vec<_> = result.diagnostics.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "startDate"]);
    }

    #[test]
    fn test_nested_performer_diagnostics_merge_before_own() {
        let result = convert_value(json!({
            "@type": "Event",
            "startDate": "2024-01-01",
            "performer": {"@type": "Person", "givenName": "Anon"}
        }));
        assert_eq!(result.diagnostics.len(), 2);
        assert!(result.diagnostics.iter().all(|d| d.field == "name"));
    }
}
