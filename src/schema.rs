//! Storage contract of the aggregator's `news` collection.
//!
//! The aggregator creates the collection with a `$jsonSchema` validator; this
//! module carries the same document so tooling can install it, and checks
//! extended-JSON renderings of stored documents against it. The client itself
//! never writes to the collection.

use serde_json::{json, Map, Value};

use crate::{error::SchemaError, util::parse_published_at};

pub const NEWS_COLLECTION: &str = "news";

pub const REQUIRED_FIELDS: [&str; 6] = [
    "title",
    "link",
    "published_at",
    "authors",
    "tags",
    "categories",
];

const STRING_FIELDS: [&str; 5] = ["title", "description", "link", "source", "content"];

const STRING_ARRAY_FIELDS: [&str; 3] = ["authors", "tags", "categories"];

/// The `$jsonSchema` validator installed on the collection.
pub fn news_validator() -> Value {
    let mut properties = Map::new();
    for field in STRING_FIELDS {
        properties.insert(field.to_string(), json!({ "bsonType": "string" }));
    }
    properties.insert("published_at".to_string(), json!({ "bsonType": "date" }));
    for field in STRING_ARRAY_FIELDS {
        properties.insert(
            field.to_string(),
            json!({ "bsonType": "array", "items": { "bsonType": "string" } }),
        );
    }

    json!({
        "$jsonSchema": {
            "bsonType": "object",
            "required": REQUIRED_FIELDS,
            "properties": properties,
        }
    })
}

/// `createCollection` command that bootstraps the collection with its validator.
pub fn create_collection_command() -> Value {
    json!({
        "create": NEWS_COLLECTION,
        "validator": news_validator(),
    })
}

/// Checks a document the way the collection validator would.
///
/// `published_at` must be a BSON date in extended JSON, `{"$date": "..."}` or
/// `{"$date": {"$numberLong": "..."}}`. A bare string is a BSON string and fails.
pub fn validate_document(doc: &Value) -> Result<(), SchemaError> {
    let doc = doc.as_object().ok_or(SchemaError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !doc.contains_key(field) {
            return Err(SchemaError::MissingField(field));
        }
    }

    for field in STRING_FIELDS {
        if doc.get(field).is_some_and(|v| !v.is_string()) {
            return Err(SchemaError::InvalidType {
                field,
                expected: "string",
            });
        }
    }

    for field in STRING_ARRAY_FIELDS {
        let valid = doc
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !valid {
            return Err(SchemaError::InvalidType {
                field,
                expected: "array",
            });
        }
    }

    if !doc.get("published_at").is_some_and(is_bson_date) {
        return Err(SchemaError::InvalidType {
            field: "published_at",
            expected: "date",
        });
    }

    Ok(())
}

fn is_bson_date(value: &Value) -> bool {
    let Some(date) = value.as_object().and_then(|obj| obj.get("$date")) else {
        return false;
    };

    match date {
        Value::String(s) => parse_published_at(s).is_ok(),
        Value::Object(inner) => inner
            .get("$numberLong")
            .and_then(Value::as_str)
            .is_some_and(|n| n.parse::<i64>().is_ok()),
        _ => false,
    }
}
