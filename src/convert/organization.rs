//! Organization converter

use super::coerce::{collapse_context, normalize_url, to_number, to_text};
use super::shape::Fields;
use super::{Converted, require_field, values};
use crate::config::ConversionOptions;
use crate::models::{Organization, Provenance};

/// Convert a Schema.org `Organization`.
///
/// Only the fields below are read; back-references such as
/// `parentOrganization` or `member` are never followed, so cyclic
/// source graphs terminate.
pub fn convert(fields: &Fields, options: &ConversionOptions) -> Converted<Organization> {
    let mut diagnostics = Vec::new();

    let org = Organization {
        id: to_text(fields.get("@id")),
        source: Provenance::SchemaOrg,
        context: collapse_context(fields.get("@context")),
        name: to_text(fields.get("name")),
        legal_name: to_text(fields.get("legalName")),
        website: normalize_url(fields.get("url"), options),
        logo: values::image(fields.get("logo"), options),
        address: values::address(fields.get("address")),
        phone: to_text(fields.get("telephone")),
        email: to_text(fields.get("email")),
        founding_date: to_text(fields.get("foundingDate")),
        description: to_text(fields.get("description")),
        industry: to_text(fields.get("industry")),
        employee_count: to_number(fields.get("numberOfEmployees")),
    };

    require_field(fields, "name", org.name.as_deref(), options, &mut diagnostics);

    Converted::new(org, diagnostics)
}
