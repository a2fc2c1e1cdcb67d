use serde_json::json;

use avromock_core::Schema;
use avromock_generate::{GenerateOptions, GenerationError, MockValue, generate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("avromock_generate=debug")
        .try_init();
}

fn schema(value: serde_json::Value) -> Schema {
    Schema::from_json(&value).expect("valid schema")
}

fn all_types_schema() -> Schema {
    schema(json!({
        "type": "record",
        "name": "test",
        "fields": [
            { "name": "int", "type": "int" },
            { "name": "long", "type": "long" },
            { "name": "double", "type": "double" },
            { "name": "float", "type": "float" },
            { "name": "boolean", "type": "boolean" },
            { "name": "null", "type": "null" },
            { "name": "string", "type": "string" },
            { "name": "bytes", "type": "bytes" },
            { "name": "array", "type": { "type": "array", "items": "string" } },
            { "name": "map", "type": { "type": "map", "values": "int" } },
            { "name": "fixed", "type": { "type": "fixed", "name": "md5", "size": 16 } },
            { "name": "uuid", "type": { "type": "string", "logicalType": "uuid" } },
            { "name": "decimal", "type": { "type": "bytes", "logicalType": "decimal" } },
            { "name": "time-millis", "type": { "type": "int", "logicalType": "time-millis" } },
            { "name": "time-micros", "type": { "type": "long", "logicalType": "time-micros" } },
            { "name": "timestamp-millis", "type": { "type": "long", "logicalType": "timestamp-millis" } },
            { "name": "timestamp-micros", "type": { "type": "long", "logicalType": "timestamp-micros" } },
            { "name": "duration", "type": { "type": "fixed", "logicalType": "duration" } },
            { "name": "date", "type": { "type": "int", "logicalType": "date" } }
        ]
    }))
}

#[test]
fn supports_all_primitive_and_logical_types() {
    init_tracing();
    let result = generate(&all_types_schema(), &GenerateOptions::default()).expect("generate");
    let field = |name: &str| result.get(name).expect(name);

    assert!(matches!(field("int"), MockValue::Int(value) if i32::try_from(*value).is_ok()));
    assert!(matches!(field("long"), MockValue::Int(_)));
    assert!(matches!(field("double"), MockValue::Float(_)));
    assert!(matches!(field("float"), MockValue::Float(_)));
    assert!(matches!(field("boolean"), MockValue::Bool(_)));
    assert!(field("null").is_null());
    assert!(matches!(field("string"), MockValue::Text(text) if !text.is_empty()));
    assert!(matches!(field("bytes"), MockValue::Bytes(bytes) if !bytes.is_empty()));
    assert!(field("date").as_date().is_some());

    let array = field("array").as_array().expect("array");
    assert_eq!(array.len(), 1);
    assert!(matches!(array[0], MockValue::Text(_)));

    let map = field("map").entries().expect("map");
    assert_eq!(map.len(), 1);
    assert!(matches!(map[0].1, MockValue::Int(_)));

    assert!(matches!(field("fixed"), MockValue::Fixed(_)));
    assert_eq!(field("fixed").len(), 16);

    let uuid = field("uuid").as_str().expect("uuid string");
    assert!(uuid::Uuid::parse_str(uuid).is_ok());

    let decimal = field("decimal").as_bytes().expect("decimal bytes");
    assert_eq!(decimal.len(), 4);
    let unscaled = i32::from_be_bytes([decimal[0], decimal[1], decimal[2], decimal[3]]);
    assert_eq!(unscaled.to_be_bytes().as_slice(), decimal);

    let time_millis = field("time-millis").as_i64().expect("time-millis");
    assert!((0..86_400_000).contains(&time_millis));
    let time_micros = field("time-micros").as_i64().expect("time-micros");
    assert!((0..86_400_000_000).contains(&time_micros));
    assert!(field("timestamp-millis").as_i64().is_some());
    assert!(field("timestamp-micros").as_i64().is_some());

    assert!(matches!(field("duration"), MockValue::Fixed(_)));
    assert_eq!(field("duration").len(), 12);
}

#[test]
fn keeps_field_declaration_order() {
    let result = generate(&all_types_schema(), &GenerateOptions::default()).expect("generate");
    let names: Vec<&str> = result
        .entries()
        .expect("record")
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names.first(), Some(&"int"));
    assert_eq!(names.last(), Some(&"date"));
    assert_eq!(names.len(), 19);
}

#[test]
fn parses_a_basic_anonymous_record() {
    let result = generate(
        &schema(json!({ "type": "record", "fields": [{ "name": "nbChickens", "type": "int" }] })),
        &GenerateOptions::default(),
    )
    .expect("generate");
    assert_eq!(result.len(), 1);
    assert!(result.get("nbChickens").and_then(MockValue::as_i64).is_some());
}

#[test]
fn nests_record_fields() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [{
                "name": "farm",
                "type": { "type": "record", "fields": [{ "name": "nbChickens", "type": "int" }] }
            }]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");
    let farm = result.get("farm").expect("farm");
    assert!(farm.get("nbChickens").and_then(MockValue::as_i64).is_some());
}

#[test]
fn enums_always_yield_the_first_symbol() {
    let mut symbols = vec!["Cow".to_string(); 1000];
    symbols[0] = "Chicken".to_string();
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [{ "name": "farmAnimals", "type": { "type": "enum", "name": "animals", "symbols": symbols } }]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");
    assert_eq!(
        result.get("farmAnimals"),
        Some(&MockValue::Text("Chicken".to_string()))
    );
}

#[test]
fn unknown_types_fail_with_the_token() {
    let error = generate(
        &schema(json!({ "type": "record", "fields": [{ "name": "nbChickens", "type": "3rd Kind" }] })),
        &GenerateOptions::default(),
    )
    .expect_err("unknown type");
    assert!(matches!(error, GenerationError::UnknownType(ref token) if token == "3rd Kind"));
    assert!(error.to_string().contains("Unknown type"));
}

#[test]
fn custom_generators_replace_leaves() {
    let options = GenerateOptions::default()
        .with_generator("string", || MockValue::Text("henry".to_string()))
        .with_generator("enum", || MockValue::Text("Cow".to_string()));
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "chickenName", "type": "string" },
                { "name": "animal", "type": { "type": "enum", "name": "Animal", "symbols": ["Chicken", "Cow"] } },
                { "name": "id", "type": { "type": "string", "logicalType": "uuid" } }
            ]
        })),
        &options,
    )
    .expect("generate");

    assert_eq!(
        result.get("chickenName"),
        Some(&MockValue::Text("henry".to_string()))
    );
    assert_eq!(result.get("animal"), Some(&MockValue::Text("Cow".to_string())));
    // Logical leaves only consult their logical name.
    assert!(matches!(result.get("id"), Some(MockValue::Uuid(_))));
}

#[test]
fn resolves_forward_type_alias() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "Rooster", "type": "chicken" },
                { "name": "hen", "type": {
                    "type": "record",
                    "name": "chicken",
                    "fields": [{ "name": "chickenName", "type": "string" }]
                }}
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");

    for field in ["Rooster", "hen"] {
        let chicken = result.get(field).expect(field);
        assert!(matches!(chicken.get("chickenName"), Some(MockValue::Text(_))));
        assert_eq!(chicken.len(), 1);
    }
}

#[test]
fn resolves_backward_type_alias() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "hen", "type": {
                    "type": "record",
                    "name": "chicken",
                    "fields": [{ "name": "chickenName", "type": "string" }]
                }},
                { "name": "Rooster", "type": "chicken" }
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");

    for field in ["hen", "Rooster"] {
        let chicken = result.get(field).expect(field);
        assert!(matches!(chicken.get("chickenName"), Some(MockValue::Text(_))));
        assert_eq!(chicken.len(), 1);
    }
}

#[test]
fn declared_aliases_never_shadow_real_names() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "b", "type": {
                    "type": "record",
                    "name": "B",
                    "fields": [{ "name": "fromB", "type": "int" }]
                }},
                { "name": "a", "type": {
                    "type": "record",
                    "name": "A",
                    "aliases": ["B", "Legacy"],
                    "fields": [{ "name": "fromA", "type": "int" }]
                }},
                { "name": "byName", "type": "B" },
                { "name": "byAlias", "type": "Legacy" }
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");

    let by_name = result.get("byName").expect("byName");
    assert!(by_name.get("fromB").is_some());
    assert!(by_name.get("fromA").is_none());
    let by_alias = result.get("byAlias").expect("byAlias");
    assert!(by_alias.get("fromA").is_some());
}

#[test]
fn resolves_fully_qualified_type_alias() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "Rooster", "type": "space.chicken" },
                { "name": "hen", "type": {
                    "type": "record",
                    "name": "chicken",
                    "namespace": "space",
                    "fields": [{ "name": "chickenName", "type": "string" }]
                }}
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");

    assert!(matches!(
        result.get("Rooster").and_then(|rooster| rooster.get("chickenName")),
        Some(MockValue::Text(_))
    ));
}

#[test]
fn references_by_logical_keyword_resolve_to_builtins() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "id", "type": "uuid" },
                { "name": "born", "type": "date" },
                { "name": "lease", "type": "duration" }
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");

    assert!(matches!(result.get("id"), Some(MockValue::Uuid(_))));
    assert!(matches!(result.get("born"), Some(MockValue::Date(_))));
    assert_eq!(result.get("lease").map(MockValue::len), Some(12));
}

#[test]
fn collection_len_controls_arrays_and_maps() {
    let options = GenerateOptions::default().with_collection_len(3);
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "tags", "type": { "type": "array", "items": "string" } },
                { "name": "counts", "type": { "type": "map", "values": "long" } }
            ]
        })),
        &options,
    )
    .expect("generate");

    assert_eq!(result.get("tags").map(MockValue::len), Some(3));
    assert_eq!(result.get("counts").map(MockValue::len), Some(3));
}

#[test]
fn cyclic_records_hit_the_recursion_limit() {
    let error = generate(
        &schema(json!({
            "type": "record",
            "name": "Node",
            "fields": [{ "name": "next", "type": "Node" }]
        })),
        &GenerateOptions::default(),
    )
    .expect_err("cyclic schema");
    assert!(matches!(
        error,
        GenerationError::RecursionLimit { ref name, depth: 32 } if name == "Node"
    ));
}

#[test]
fn optional_self_reference_terminates() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "name": "Node",
            "fields": [
                { "name": "value", "type": "int" },
                { "name": "next", "type": ["null", "Node"] }
            ]
        })),
        &GenerateOptions::default(),
    )
    .expect("generate");
    assert!(result.get("next").is_some_and(MockValue::is_null));
}

#[test]
fn serializes_to_json() {
    let result = generate(
        &schema(json!({
            "type": "record",
            "fields": [
                { "name": "name", "type": "string" },
                { "name": "scores", "type": { "type": "array", "items": "int" } }
            ]
        })),
        &GenerateOptions::default().with_generator("string", || MockValue::Text("henry".into())),
    )
    .expect("generate");

    let json = result.to_json();
    assert_eq!(json["name"], "henry");
    assert!(json["scores"][0].is_i64());
}
