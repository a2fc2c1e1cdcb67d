//! Deterministic union member selection and wrap-key policy.

use tracing::debug;

use avromock_core::{LogicalType, Primitive, Schema, UnionMember};

use crate::errors::GenerationError;
use crate::resolver::{Resolved, SymbolTable};

/// The selected member and the key it must be nested under, if any.
#[derive(Debug, Clone)]
pub struct Pick<'s> {
    pub index: usize,
    pub member: &'s UnionMember,
    pub wrap_key: Option<String>,
}

/// JSON-level shape of a generated value; members sharing a shape are
/// indistinguishable once inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Null,
    Boolean,
    Number,
    Text,
    Bytes,
    Date,
    Sequence,
    Object,
    Union,
}

#[derive(Debug)]
struct Candidate {
    qualified: Option<String>,
    short: Option<String>,
    kind: String,
    shape: Shape,
    scalar: bool,
}

impl Candidate {
    fn matches(&self, member: &UnionMember, preference: &str) -> bool {
        member.alias.as_deref() == Some(preference)
            || self.qualified.as_deref() == Some(preference)
            || self.short.as_deref() == Some(preference)
            || (self.qualified.is_none() && self.kind == preference)
    }
}

/// Picks union members by caller preference, falling back to declaration order.
#[derive(Debug, Clone, Copy)]
pub struct UnionPicker<'o> {
    preferences: &'o [String],
}

impl<'o> UnionPicker<'o> {
    pub fn new(preferences: &'o [String]) -> Self {
        Self { preferences }
    }

    /// Select exactly one member. Returns `None` only for an empty union.
    pub fn pick<'s>(
        &self,
        members: &'s [UnionMember],
        symbols: &SymbolTable<'s>,
        namespace: Option<&str>,
    ) -> Result<Option<Pick<'s>>, GenerationError> {
        if members.is_empty() {
            return Ok(None);
        }

        let candidates = members
            .iter()
            .map(|member| candidate(&member.schema, symbols, namespace))
            .collect::<Result<Vec<_>, _>>()?;

        let index = self
            .preferred(members, &candidates)
            .unwrap_or_default();
        let member = &members[index];
        let selected = &candidates[index];
        let wrap_key = wrap_key(member, selected, index, &candidates);

        debug!(
            index,
            member = selected.qualified.as_deref().unwrap_or(selected.kind.as_str()),
            wrap_key = ?wrap_key,
            "union member selected"
        );

        Ok(Some(Pick {
            index,
            member,
            wrap_key,
        }))
    }

    fn preferred(&self, members: &[UnionMember], candidates: &[Candidate]) -> Option<usize> {
        if self.preferences.is_empty() {
            return None;
        }
        let found = members
            .iter()
            .zip(candidates)
            .position(|(member, candidate)| {
                self.preferences
                    .iter()
                    .any(|preference| candidate.matches(member, preference))
            });
        if found.is_none() {
            debug!(
                preferences = ?self.preferences,
                "no union member matches preferences, using first member"
            );
        }
        found
    }
}

fn wrap_key(
    member: &UnionMember,
    selected: &Candidate,
    index: usize,
    candidates: &[Candidate],
) -> Option<String> {
    if selected.scalar {
        return None;
    }
    if let Some(alias) = &member.alias {
        return Some(alias.clone());
    }
    let ambiguous = candidates
        .iter()
        .enumerate()
        .any(|(other, candidate)| other != index && candidate.shape == selected.shape);
    if !ambiguous {
        return None;
    }
    Some(
        selected
            .qualified
            .clone()
            .unwrap_or_else(|| selected.kind.clone()),
    )
}

fn candidate<'s>(
    schema: &'s Schema,
    symbols: &SymbolTable<'s>,
    namespace: Option<&str>,
) -> Result<Candidate, GenerationError> {
    let Schema::Reference(token) = schema else {
        let full_name = schema.full_name(namespace);
        return Ok(describe(
            schema,
            full_name.as_ref().map(|name| name.qualified()),
            full_name.map(|name| name.name),
        ));
    };
    let candidate = match symbols.resolve(token, namespace)? {
        Resolved::Named(definition) => describe(
            definition.schema,
            Some(definition.full_name.qualified()),
            Some(definition.full_name.name.clone()),
        ),
        Resolved::Builtin(builtin) => describe(&builtin, None, None),
    };
    Ok(candidate)
}

fn describe(schema: &Schema, qualified: Option<String>, short: Option<String>) -> Candidate {
    Candidate {
        qualified,
        short,
        kind: schema.kind().to_string(),
        shape: shape(schema),
        scalar: schema.is_scalar(),
    }
}

fn shape(schema: &Schema) -> Shape {
    match schema {
        Schema::Primitive(primitive) => match primitive {
            Primitive::Null => Shape::Null,
            Primitive::Boolean => Shape::Boolean,
            Primitive::Int | Primitive::Long | Primitive::Float | Primitive::Double => {
                Shape::Number
            }
            Primitive::String => Shape::Text,
            Primitive::Bytes => Shape::Bytes,
        },
        Schema::Logical(logical) => match logical.logical_type {
            LogicalType::Uuid | LogicalType::Duration => Shape::Text,
            LogicalType::Decimal => Shape::Bytes,
            LogicalType::Date => Shape::Date,
            LogicalType::TimeMillis
            | LogicalType::TimeMicros
            | LogicalType::TimestampMillis
            | LogicalType::TimestampMicros => Shape::Number,
        },
        Schema::Fixed(fixed) if fixed.logical_type == Some(LogicalType::Decimal) => Shape::Bytes,
        Schema::Fixed(_) | Schema::Enum(_) => Shape::Text,
        Schema::Record(_) | Schema::Map(_) => Shape::Object,
        Schema::Array(_) => Shape::Sequence,
        Schema::Union(_) => Shape::Union,
        // References are resolved before shaping.
        Schema::Reference(_) => Shape::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn union(value: serde_json::Value) -> Schema {
        Schema::from_json(&value).expect("valid schema")
    }

    fn members(schema: &Schema) -> &[UnionMember] {
        match schema {
            Schema::Union(members) => members,
            _ => panic!("expected union"),
        }
    }

    #[test]
    fn optional_idiom_is_never_wrapped() {
        let schema = union(json!(["null", "int"]));
        let table = SymbolTable::build(&schema);
        let picker = UnionPicker::new(&[]);
        let pick = picker
            .pick(members(&schema), &table, None)
            .expect("pick")
            .expect("non-empty");
        assert_eq!(pick.index, 0);
        assert_eq!(pick.wrap_key, None);
    }

    #[test]
    fn ambiguous_records_wrap_under_qualified_name() {
        let schema = union(json!([
            { "type": "record", "name": "CountryFarm", "fields": [] },
            { "type": "record", "name": "CityFarm", "fields": [] }
        ]));
        let table = SymbolTable::build(&schema);
        let preferences = vec!["CityFarm".to_string()];
        let picker = UnionPicker::new(&preferences);
        let pick = picker
            .pick(members(&schema), &table, Some("com.farm"))
            .expect("pick")
            .expect("non-empty");
        assert_eq!(pick.index, 1);
        assert_eq!(pick.wrap_key.as_deref(), Some("com.farm.CityFarm"));
    }

    #[test]
    fn primitive_members_match_by_keyword() {
        let schema = union(json!(["null", "string", "long"]));
        let table = SymbolTable::build(&schema);
        let preferences = vec!["long".to_string()];
        let pick = UnionPicker::new(&preferences)
            .pick(members(&schema), &table, None)
            .expect("pick")
            .expect("non-empty");
        assert_eq!(pick.index, 2);
        assert_eq!(pick.wrap_key, None);
    }

    #[test]
    fn enum_next_to_string_is_wrapped() {
        let schema = union(json!([
            { "type": "enum", "name": "Animal", "symbols": ["Chicken"] },
            "string"
        ]));
        let table = SymbolTable::build(&schema);
        let pick = UnionPicker::new(&[])
            .pick(members(&schema), &table, None)
            .expect("pick")
            .expect("non-empty");
        assert_eq!(pick.wrap_key.as_deref(), Some("Animal"));
    }

    #[test]
    fn empty_union_has_no_pick() {
        let schema = Schema::Union(Vec::new());
        let table = SymbolTable::build(&schema);
        let pick = UnionPicker::new(&[])
            .pick(members(&schema), &table, None)
            .expect("pick");
        assert!(pick.is_none());
    }
}
