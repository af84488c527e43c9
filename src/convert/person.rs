//! Person converter

use super::coerce::{collapse_context, normalize_url, to_text};
use super::shape::{Fields, Shape, sniff};
use super::{Converted, organization, require_field, values};
use crate::config::ConversionOptions;
use crate::models::{Organization, Person, Provenance};

/// Convert a Schema.org `Person`.
///
/// `worksFor` may be an organization name or a nested `Organization`; the
/// nested conversion's diagnostics are carried up unchanged.
pub fn convert(fields: &Fields, options: &ConversionOptions) -> Converted<Person> {
    let mut diagnostics = Vec::new();

    let employer = match sniff(fields.get("worksFor")) {
        Shape::Text(name) => Some(Box::new(Organization::named(name))),
        Shape::Object(obj) => {
            let nested = organization::convert(obj, options);
            diagnostics.extend(nested.diagnostics);
            Some(Box::new(nested.entity))
        }
        _ => None,
    };

    let person = Person {
        id: to_text(fields.get("@id")),
        source: Provenance::SchemaOrg,
        context: collapse_context(fields.get("@context")),
        name: to_text(fields.get("name")),
        first_name: to_text(fields.get("givenName")),
        last_name: to_text(fields.get("familyName")),
        email: to_text(fields.get("email")),
        phone: to_text(fields.get("telephone")),
        website: normalize_url(fields.get("url"), options),
        image: values::image(fields.get("image"), options),
        address: values::address(fields.get("address")),
        job_title: to_text(fields.get("jobTitle")),
        employer,
        birth_date: to_text(fields.get("birthDate")),
        gender: to_text(fields.get("gender")),
    };

    require_field(fields, "name", person.name.as_deref(), options, &mut diagnostics);

    Converted::new(person, diagnostics)
}
