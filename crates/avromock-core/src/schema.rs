use crate::names::FullName;
use crate::types::{LogicalType, Primitive};

/// A node of an Avro-derived schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(Primitive),
    Logical(LogicalSchema),
    Record(RecordSchema),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Fixed(FixedSchema),
    Enum(EnumSchema),
    /// Ordered members; declaration order is the tie-break order.
    Union(Vec<UnionMember>),
    /// Bare name of a record, enum or fixed declared elsewhere in the tree.
    Reference(String),
}

/// A logical overlay on a primitive base type.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalSchema {
    pub logical_type: LogicalType,
    pub base: Primitive,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl LogicalSchema {
    pub fn new(logical_type: LogicalType, base: Primitive) -> Self {
        Self {
            logical_type,
            base,
            precision: None,
            scale: None,
        }
    }
}

/// Record definition. Anonymous records are allowed at the root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSchema {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub aliases: Vec<String>,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

/// Record field, kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub aliases: Vec<String>,
    pub size: usize,
    pub logical_type: Option<LogicalType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub aliases: Vec<String>,
    pub doc: Option<String>,
    /// Insertion order is significant: the first symbol is the default.
    pub symbols: Vec<String>,
}

/// Union member with its optional `alias` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionMember {
    pub alias: Option<String>,
    pub schema: Schema,
}

impl UnionMember {
    pub fn new(schema: Schema) -> Self {
        Self {
            alias: None,
            schema,
        }
    }

    pub fn aliased(alias: impl Into<String>, schema: Schema) -> Self {
        Self {
            alias: Some(alias.into()),
            schema,
        }
    }
}

impl Schema {
    /// Type keyword of the node (`record`, `int`, `uuid`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Schema::Primitive(primitive) => primitive.keyword(),
            Schema::Logical(logical) => logical.logical_type.keyword(),
            Schema::Record(_) => "record",
            Schema::Array(_) => "array",
            Schema::Map(_) => "map",
            Schema::Fixed(fixed) => match fixed.logical_type {
                Some(logical) => logical.keyword(),
                None => "fixed",
            },
            Schema::Enum(_) => "enum",
            Schema::Union(_) => "union",
            Schema::Reference(token) => token,
        }
    }

    /// Declared name of a record, enum or fixed definition.
    pub fn name(&self) -> Option<&str> {
        match self {
            Schema::Record(record) => record.name.as_deref(),
            Schema::Fixed(fixed) => fixed.name.as_deref(),
            Schema::Enum(enum_schema) => enum_schema.name.as_deref(),
            _ => None,
        }
    }

    /// Declared namespace of a record, enum or fixed definition.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Schema::Record(record) => record.namespace.as_deref(),
            Schema::Fixed(fixed) => fixed.namespace.as_deref(),
            Schema::Enum(enum_schema) => enum_schema.namespace.as_deref(),
            _ => None,
        }
    }

    pub fn aliases(&self) -> &[String] {
        match self {
            Schema::Record(record) => &record.aliases,
            Schema::Fixed(fixed) => &fixed.aliases,
            Schema::Enum(enum_schema) => &enum_schema.aliases,
            _ => &[],
        }
    }

    /// Full name of a named definition, resolved against `enclosing`.
    pub fn full_name(&self, enclosing: Option<&str>) -> Option<FullName> {
        self.name()
            .map(|name| FullName::new(name, self.namespace(), enclosing))
    }

    /// True for primitives and logical overlays on primitives.
    /// Primitive and logical nodes, including logical types carried by a
    /// `fixed` such as `duration` or fixed-size `decimal`.
    pub fn is_scalar(&self) -> bool {
        match self {
            Schema::Primitive(_) | Schema::Logical(_) => true,
            Schema::Fixed(fixed) => fixed.logical_type.is_some(),
            _ => false,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Schema::Record(_) | Schema::Enum(_) | Schema::Fixed(_))
    }
}
