//! Symbol table of named definitions and resolution of type tokens.

use std::collections::HashMap;

use avromock_core::{
    DURATION_SIZE, FixedSchema, FullName, LogicalSchema, LogicalType, Primitive, Schema,
    effective_namespace, qualify,
};

use crate::errors::GenerationError;

/// A registered record, enum or fixed definition.
#[derive(Debug, Clone)]
pub struct Definition<'s> {
    pub schema: &'s Schema,
    pub full_name: FullName,
}

impl Definition<'_> {
    /// Namespace the definition was declared in; it scopes its own subtree.
    pub fn namespace(&self) -> Option<&str> {
        self.full_name.namespace.as_deref()
    }
}

/// Outcome of resolving a type token.
#[derive(Debug, Clone)]
pub enum Resolved<'s> {
    /// Primitive or logical keyword, materialized as a fresh node.
    Builtin(Schema),
    Named(Definition<'s>),
}

/// Named definitions keyed by fully-qualified and short name.
///
/// Built once per generation call, before any value is produced, so
/// references may point forward in declaration order. Declared `aliases`
/// live in their own table and never shadow a real name.
#[derive(Debug, Default)]
pub struct SymbolTable<'s> {
    qualified: HashMap<String, Definition<'s>>,
    short: HashMap<String, Definition<'s>>,
    aliases: HashMap<String, Definition<'s>>,
}

impl<'s> SymbolTable<'s> {
    pub fn build(schema: &'s Schema) -> Self {
        let mut table = Self::default();
        table.visit(schema, None);
        table
    }

    pub fn len(&self) -> usize {
        self.qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualified.is_empty()
    }

    fn visit(&mut self, schema: &'s Schema, namespace: Option<&str>) {
        match schema {
            Schema::Record(record) => {
                self.register(schema, namespace);
                let inner = effective_namespace(
                    record.name.as_deref(),
                    record.namespace.as_deref(),
                    namespace,
                );
                for field in &record.fields {
                    self.visit(&field.schema, inner.as_deref());
                }
            }
            Schema::Enum(_) | Schema::Fixed(_) => self.register(schema, namespace),
            Schema::Array(inner) | Schema::Map(inner) => self.visit(inner, namespace),
            Schema::Union(members) => {
                for member in members {
                    self.visit(&member.schema, namespace);
                }
            }
            Schema::Primitive(_) | Schema::Logical(_) | Schema::Reference(_) => {}
        }
    }

    fn register(&mut self, schema: &'s Schema, namespace: Option<&str>) {
        let Some(full_name) = schema.full_name(namespace) else {
            return;
        };
        let definition = Definition {
            schema,
            full_name: full_name.clone(),
        };

        for alias in schema.aliases() {
            let alias_name = FullName::new(alias, full_name.namespace.as_deref(), None);
            self.aliases
                .insert(alias_name.name.clone(), definition.clone());
            self.aliases
                .insert(alias_name.qualified(), definition.clone());
        }

        self.short
            .insert(full_name.name.clone(), definition.clone());
        self.qualified.insert(full_name.qualified(), definition);
    }

    /// Look up a named definition by token, qualified against `namespace`
    /// first, then verbatim, then by short name. Declared aliases are only
    /// tried once no real name matches.
    pub fn lookup(&self, token: &str, namespace: Option<&str>) -> Option<&Definition<'s>> {
        let qualified = qualify(token, namespace);
        self.qualified
            .get(&qualified)
            .or_else(|| self.qualified.get(token))
            .or_else(|| self.short.get(token))
            .or_else(|| self.aliases.get(&qualified))
            .or_else(|| self.aliases.get(token))
    }

    pub fn resolve(
        &self,
        token: &str,
        namespace: Option<&str>,
    ) -> Result<Resolved<'s>, GenerationError> {
        if let Some(builtin) = builtin(token) {
            return Ok(Resolved::Builtin(builtin));
        }
        self.lookup(token, namespace)
            .cloned()
            .map(Resolved::Named)
            .ok_or_else(|| GenerationError::UnknownType(token.to_string()))
    }
}

fn builtin(token: &str) -> Option<Schema> {
    if let Some(primitive) = Primitive::from_keyword(token) {
        return Some(Schema::Primitive(primitive));
    }
    let logical = LogicalType::from_keyword(token)?;
    match logical.canonical_base() {
        Some(base) => Some(Schema::Logical(LogicalSchema::new(logical, base))),
        None => Some(Schema::Fixed(FixedSchema {
            name: None,
            namespace: None,
            aliases: Vec::new(),
            size: DURATION_SIZE,
            logical_type: Some(logical),
        })),
    }
}
