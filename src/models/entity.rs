//! Normalized entity types
//!
//! A closed set of entity shapes produced by the Schema.org converter. Each
//! shape carries the shared base fields (`id`, `source`, `context`) followed
//! by its type-specific fields. The discriminant is serialized as `type`.

use super::value::{Address, Image, Offer, Place, Price, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provenance tag recorded on every normalized entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    #[default]
    #[serde(rename = "schema.org")]
    SchemaOrg,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::SchemaOrg => write!(f, "schema.org"),
        }
    }
}

/// Discriminant of a normalized entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Person,
    Organization,
    Product,
    Event,
}

impl EntityType {
    /// Schema.org type name for this discriminant
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "Person",
            EntityType::Organization => "Organization",
            EntityType::Product => "Product",
            EntityType::Event => "Event",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    /// Exact, case-sensitive match on the Schema.org type name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Person" => Ok(EntityType::Person),
            "Organization" => Ok(EntityType::Organization),
            "Product" => Ok(EntityType::Product),
            "Event" => Ok(EntityType::Event),
            other => Err(format!("Unsupported Schema.org type: {}", other)),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized Person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Employer, always rendered with its `type` discriminant
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "tagged_organization"
    )]
    pub employer: Option<Box<Organization>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Person {
    /// Minimal person known only by name (e.g. a performer given as text)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Normalized Organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<f64>,
}

impl Organization {
    /// Minimal organization stub known only by name (e.g. `worksFor: "Acme"`)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Normalized Product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present (possibly empty) whenever the source carried an `image` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Normalized Event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performers: Option<Vec<Agent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<Offer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_mode: Option<String>,
}

/// A person or organization acting in an event (organizer, performer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Agent {
    Person(Box<Person>),
    Organization(Box<Organization>),
}

impl Agent {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Agent::Person(_) => EntityType::Person,
            Agent::Organization(_) => EntityType::Organization,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Agent::Person(p) => p.name.as_deref(),
            Agent::Organization(o) => o.name.as_deref(),
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Agent::Person(p) => Some(p),
            Agent::Organization(_) => None,
        }
    }

    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Agent::Organization(o) => Some(o),
            Agent::Person(_) => None,
        }
    }
}

/// Closed union of all normalized entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NormalizedEntity {
    Person(Person),
    Organization(Organization),
    Product(Product),
    Event(Event),
}

impl NormalizedEntity {
    /// The entity's discriminant
    pub fn entity_type(&self) -> EntityType {
        match self {
            NormalizedEntity::Person(_) => EntityType::Person,
            NormalizedEntity::Organization(_) => EntityType::Organization,
            NormalizedEntity::Product(_) => EntityType::Product,
            NormalizedEntity::Event(_) => EntityType::Event,
        }
    }

    /// Discriminant equality check
    pub fn is(&self, entity_type: EntityType) -> bool {
        self.entity_type() == entity_type
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            NormalizedEntity::Person(e) => e.id.as_deref(),
            NormalizedEntity::Organization(e) => e.id.as_deref(),
            NormalizedEntity::Product(e) => e.id.as_deref(),
            NormalizedEntity::Event(e) => e.id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NormalizedEntity::Person(e) => e.name.as_deref(),
            NormalizedEntity::Organization(e) => e.name.as_deref(),
            NormalizedEntity::Product(e) => e.name.as_deref(),
            NormalizedEntity::Event(e) => e.name.as_deref(),
        }
    }

    pub fn context(&self) -> Option<&str> {
        match self {
            NormalizedEntity::Person(e) => e.context.as_deref(),
            NormalizedEntity::Organization(e) => e.context.as_deref(),
            NormalizedEntity::Product(e) => e.context.as_deref(),
            NormalizedEntity::Event(e) => e.context.as_deref(),
        }
    }

    pub fn source(&self) -> Provenance {
        match self {
            NormalizedEntity::Person(e) => e.source,
            NormalizedEntity::Organization(e) => e.source,
            NormalizedEntity::Product(e) => e.source,
            NormalizedEntity::Event(e) => e.source,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            NormalizedEntity::Person(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            NormalizedEntity::Organization(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_product(&self) -> Option<&Product> {
        match self {
            NormalizedEntity::Product(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            NormalizedEntity::Event(e) => Some(e),
            _ => None,
        }
    }
}

/// Narrow a normalized entity by its discriminant
pub fn is_of_type(entity: &NormalizedEntity, entity_type: EntityType) -> bool {
    entity.is(entity_type)
}

/// Serde adapter that writes an embedded organization with its `type` tag
mod tagged_organization {
    use super::Organization;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum Tagged<'a> {
        Organization(&'a Organization),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Owned {
        Organization(Organization),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<Box<Organization>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(org) => serializer.serialize_some(&Tagged::Organization(org)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Box<Organization>>, D::Error> {
        let owned = Option::<Owned>::deserialize(deserializer)?;
        Ok(owned.map(|Owned::Organization(org)| Box::new(org)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_type_from_str() {
        assert_eq!("Person".parse::<EntityType>(), Ok(EntityType::Person));
        assert_eq!("Event".parse::<EntityType>(), Ok(EntityType::Event));
        assert_eq!(
            "person".parse::<EntityType>(),
            Err("Unsupported Schema.org type: person".to_string())
        );
    }

    #[test]
    fn test_serialized_shape_carries_type_and_source() {
        let entity = NormalizedEntity::Person(Person::named("Ada"));
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            value,
            json!({"type": "Person", "source": "schema.org", "name": "Ada"})
        );
    }

    #[test]
    fn test_employer_serializes_with_type() {
        let person = Person {
            name: Some("Bob".to_string()),
            employer: Some(Box::new(Organization::named("Startup Inc"))),
            ..Default::default()
        };
        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(
            value["employer"],
            json!({"type": "Organization", "source": "schema.org", "name": "Startup Inc"})
        );

        let back: Person = serde_json::from_value(value).unwrap();
        assert_eq!(back, person);
    }

    #[test]
    fn test_is_of_type() {
        let org = NormalizedEntity::Organization(Organization::named("Test Org"));
        assert!(is_of_type(&org, EntityType::Organization));
        assert!(!is_of_type(&org, EntityType::Person));
    }
}
