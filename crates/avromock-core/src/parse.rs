//! Conversion from the JSON form of an Avro schema into [`Schema`].
//!
//! This is a structural mapping only. Unknown type tokens become
//! [`Schema::Reference`] and are reported when a generator resolves them.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::{
    EnumSchema, Field, FixedSchema, LogicalSchema, RecordSchema, Schema, UnionMember,
};
use crate::types::{DURATION_SIZE, LogicalType, Primitive};

impl Schema {
    /// Build a schema tree from its JSON representation.
    ///
    /// A JSON array is a union; a top-level array of named definitions is
    /// therefore a union root.
    pub fn from_json(value: &Value) -> Result<Schema> {
        parse_value(value, "schema")
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Schema::from_json(&value)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Schema::from_json(&value).map_err(serde::de::Error::custom)
    }
}

fn parse_value(value: &Value, context: &str) -> Result<Schema> {
    match value {
        Value::String(token) => Ok(parse_token(token)),
        Value::Array(members) => {
            let members = members
                .iter()
                .enumerate()
                .map(|(index, member)| parse_member(member, &format!("{context}[{index}]")))
                .collect::<Result<Vec<_>>>()?;
            Ok(Schema::Union(members))
        }
        Value::Object(object) => parse_object(object, context),
        other => Err(SchemaError::InvalidAttribute {
            attribute: "type",
            context: context.to_string(),
            message: format!("expected string, array or object, found {other}"),
        }),
    }
}

fn parse_token(token: &str) -> Schema {
    match Primitive::from_keyword(token) {
        Some(primitive) => Schema::Primitive(primitive),
        None => Schema::Reference(token.to_string()),
    }
}

fn parse_member(value: &Value, context: &str) -> Result<UnionMember> {
    if let Value::Object(object) = value {
        if let Some(alias) = object.get("alias") {
            let alias = alias.as_str().ok_or_else(|| SchemaError::InvalidAttribute {
                attribute: "alias",
                context: context.to_string(),
                message: "expected string".to_string(),
            })?;
            let inner = object.get("type").ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "type",
                context: context.to_string(),
            })?;
            let schema = parse_value(inner, context)?;
            return Ok(UnionMember::aliased(alias, schema));
        }
    }
    Ok(UnionMember::new(parse_value(value, context)?))
}

fn parse_object(object: &Map<String, Value>, context: &str) -> Result<Schema> {
    let type_value = object
        .get("type")
        .ok_or_else(|| SchemaError::MissingAttribute {
            attribute: "type",
            context: context.to_string(),
        })?;

    let keyword = match type_value {
        Value::String(keyword) => keyword.as_str(),
        // `{"type": {...}}` and `{"type": [...]}` wrap another schema.
        nested => return parse_value(nested, context),
    };

    match keyword {
        "record" | "error" => parse_record(object, context).map(Schema::Record),
        "enum" => parse_enum(object, context).map(Schema::Enum),
        "fixed" => parse_fixed(object, context).map(Schema::Fixed),
        "array" => {
            let items = required(object, "items", context)?;
            let items = parse_value(items, &format!("{context}.items"))?;
            Ok(Schema::Array(Box::new(items)))
        }
        "map" => {
            let values = required(object, "values", context)?;
            let values = parse_value(values, &format!("{context}.values"))?;
            Ok(Schema::Map(Box::new(values)))
        }
        other => match Primitive::from_keyword(other) {
            Some(primitive) => Ok(parse_primitive(object, primitive)),
            None => Ok(Schema::Reference(other.to_string())),
        },
    }
}

fn parse_primitive(object: &Map<String, Value>, primitive: Primitive) -> Schema {
    let logical = object
        .get("logicalType")
        .and_then(Value::as_str)
        .and_then(LogicalType::from_keyword)
        .filter(|logical| logical.annotates(primitive));

    match logical {
        Some(logical_type) => Schema::Logical(LogicalSchema {
            logical_type,
            base: primitive,
            precision: optional_u32(object, "precision"),
            scale: optional_u32(object, "scale"),
        }),
        None => Schema::Primitive(primitive),
    }
}

fn parse_record(object: &Map<String, Value>, context: &str) -> Result<RecordSchema> {
    let name = optional_str(object, "name", context)?;
    let context = name.as_deref().unwrap_or(context).to_string();
    let fields = required(object, "fields", &context)?
        .as_array()
        .ok_or_else(|| SchemaError::InvalidAttribute {
            attribute: "fields",
            context: context.clone(),
            message: "expected array".to_string(),
        })?;

    let fields = fields
        .iter()
        .map(|field| parse_field(field, &context))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordSchema {
        name,
        namespace: optional_str(object, "namespace", &context)?,
        aliases: string_list(object, "aliases", &context)?,
        doc: optional_str(object, "doc", &context)?,
        fields,
    })
}

fn parse_field(value: &Value, record: &str) -> Result<Field> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::InvalidAttribute {
            attribute: "fields",
            context: record.to_string(),
            message: "expected field object".to_string(),
        })?;
    let name = optional_str(object, "name", record)?.ok_or_else(|| {
        SchemaError::MissingAttribute {
            attribute: "name",
            context: format!("field of {record}"),
        }
    })?;
    let context = format!("{record}.{name}");
    let schema = parse_value(required(object, "type", &context)?, &context)?;

    Ok(Field {
        doc: optional_str(object, "doc", &context)?,
        name,
        schema,
    })
}

fn parse_enum(object: &Map<String, Value>, context: &str) -> Result<EnumSchema> {
    let name = optional_str(object, "name", context)?;
    let context = name.as_deref().unwrap_or(context).to_string();
    let symbols = string_list(object, "symbols", &context)?;
    if !object.contains_key("symbols") {
        return Err(SchemaError::MissingAttribute {
            attribute: "symbols",
            context,
        });
    }

    Ok(EnumSchema {
        name,
        namespace: optional_str(object, "namespace", &context)?,
        aliases: string_list(object, "aliases", &context)?,
        doc: optional_str(object, "doc", &context)?,
        symbols,
    })
}

fn parse_fixed(object: &Map<String, Value>, context: &str) -> Result<FixedSchema> {
    let name = optional_str(object, "name", context)?;
    let context = name.as_deref().unwrap_or(context).to_string();
    let logical_type = object
        .get("logicalType")
        .and_then(Value::as_str)
        .and_then(LogicalType::from_keyword)
        .filter(|logical| matches!(logical, LogicalType::Duration | LogicalType::Decimal));

    let size = match object.get("size") {
        Some(value) => value
            .as_u64()
            .and_then(|size| usize::try_from(size).ok())
            .ok_or_else(|| SchemaError::InvalidAttribute {
                attribute: "size",
                context: context.clone(),
                message: format!("expected a non-negative integer, got {value}"),
            })?,
        None if logical_type == Some(LogicalType::Duration) => DURATION_SIZE,
        None => {
            return Err(SchemaError::MissingAttribute {
                attribute: "size",
                context,
            });
        }
    };

    Ok(FixedSchema {
        namespace: optional_str(object, "namespace", &context)?,
        aliases: string_list(object, "aliases", &context)?,
        name,
        size,
        logical_type,
    })
}

fn required<'a>(
    object: &'a Map<String, Value>,
    attribute: &'static str,
    context: &str,
) -> Result<&'a Value> {
    object
        .get(attribute)
        .ok_or_else(|| SchemaError::MissingAttribute {
            attribute,
            context: context.to_string(),
        })
}

fn optional_str(
    object: &Map<String, Value>,
    attribute: &'static str,
    context: &str,
) -> Result<Option<String>> {
    match object.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(SchemaError::InvalidAttribute {
            attribute,
            context: context.to_string(),
            message: "expected string".to_string(),
        }),
    }
}

fn optional_u32(object: &Map<String, Value>, attribute: &str) -> Option<u32> {
    object
        .get(attribute)
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
}

fn string_list(
    object: &Map<String, Value>,
    attribute: &'static str,
    context: &str,
) -> Result<Vec<String>> {
    let Some(value) = object.get(attribute) else {
        return Ok(Vec::new());
    };
    let invalid = || SchemaError::InvalidAttribute {
        attribute,
        context: context.to_string(),
        message: "expected array of strings".to_string(),
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}
