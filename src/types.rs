//! Core types for Phonebook

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// A phonebook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    /// Unique entry identifier
    pub id: String,
    /// Display name, unique across the phonebook
    pub name: String,
    /// Phone number, free-form
    pub number: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Body of `POST /api/persons` as it arrives on the wire.
///
/// Fields stay untyped JSON so that every falsy value (`null`, `false`,
/// `0`, `""`) ends up in the same validation path as an absent field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    /// Name of the new entry
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    /// Phone number of the new entry
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub number: Option<Value>,
}

impl CreatePersonRequest {
    /// Check presence of both fields, yielding a validated [`NewPerson`].
    ///
    /// Numbers are accepted and kept as their JSON text; booleans, arrays
    /// and objects that are not falsy are rejected as malformed.
    pub fn validate(self) -> Result<NewPerson> {
        match (self.name, self.number) {
            (Some(name), Some(number)) if is_truthy(&name) && is_truthy(&number) => {
                Ok(NewPerson {
                    name: field_text("name", name)?,
                    number: field_text("number", number)?,
                })
            }
            _ => Err(Error::MissingField),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field_text(field: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::MalformedBody(format!(
            "{} must be a string or number, got {}",
            field, other
        ))),
    }
}

/// A validated entry that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl NewPerson {
    pub fn into_person(self, id: String) -> Person {
        Person {
            id,
            name: self.name,
            number: self.number,
        }
    }
}

/// The four entries every fresh phonebook starts with
pub fn sample_persons() -> Vec<Person> {
    vec![
        Person::new("1", "Arto Hellas", "040-123456"),
        Person::new("2", "Ada Lovelace", "39-44-5323523"),
        Person::new("3", "Dan Abramov", "12-43-234345"),
        Person::new("4", "Mary Poppendieck", "39-23-6423122"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> CreatePersonRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_accepts_both_fields() {
        let person = request(json!({"name": "New", "number": "555"})).validate().unwrap();
        assert_eq!(person.name, "New");
        assert_eq!(person.number, "555");
    }

    #[test]
    fn test_validate_rejects_missing_or_falsy() {
        let cases = [
            json!({"number": "555"}),
            json!({"name": "New"}),
            json!({"name": "", "number": "555"}),
            json!({"name": "New", "number": ""}),
            json!({"name": null, "number": "1"}),
            json!({"name": false, "number": "1"}),
            json!({"name": "New", "number": 0}),
            json!({"name": "New", "number": 0.0}),
            json!({}),
        ];

        for case in cases {
            assert!(
                matches!(request(case.clone()).validate(), Err(Error::MissingField)),
                "expected missing field for {}",
                case
            );
        }
    }

    #[test]
    fn test_missing_checked_before_field_types() {
        let req = request(json!({"name": ["list"], "number": 0}));
        assert!(matches!(req.validate(), Err(Error::MissingField)));
    }

    #[test]
    fn test_numbers_kept_as_text() {
        let person = request(json!({"name": "New", "number": 5551234})).validate().unwrap();
        assert_eq!(person.number, "5551234");
    }

    #[test]
    fn test_truthy_non_strings_rejected() {
        for case in [
            json!({"name": true, "number": "1"}),
            json!({"name": "New", "number": ["1"]}),
            json!({"name": {"first": "New"}, "number": "1"}),
        ] {
            assert!(
                matches!(request(case.clone()).validate(), Err(Error::MalformedBody(_))),
                "expected malformed body for {}",
                case
            );
        }
    }

    #[test]
    fn test_person_serializes_with_three_keys() {
        let json = serde_json::to_value(Person::new("2", "Ada Lovelace", "39-44-5323523")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "2", "name": "Ada Lovelace", "number": "39-44-5323523"})
        );
    }

    #[test]
    fn test_sample_persons_have_unique_ids_and_names() {
        let persons = sample_persons();
        assert_eq!(persons.len(), 4);

        let mut ids: Vec<_> = persons.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        let mut names: Vec<_> = persons.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
