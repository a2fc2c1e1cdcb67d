/// Avro primitive type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Null,
        Primitive::Boolean,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Bytes,
        Primitive::String,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|primitive| primitive.keyword() == keyword)
    }
}

/// Logical type overlays recognised by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Uuid,
    Decimal,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Date,
    Duration,
}

impl LogicalType {
    pub const ALL: [LogicalType; 8] = [
        LogicalType::Uuid,
        LogicalType::Decimal,
        LogicalType::TimeMillis,
        LogicalType::TimeMicros,
        LogicalType::TimestampMillis,
        LogicalType::TimestampMicros,
        LogicalType::Date,
        LogicalType::Duration,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            LogicalType::Uuid => "uuid",
            LogicalType::Decimal => "decimal",
            LogicalType::TimeMillis => "time-millis",
            LogicalType::TimeMicros => "time-micros",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::Date => "date",
            LogicalType::Duration => "duration",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|logical| logical.keyword() == keyword)
    }

    /// Base primitive used when the logical type is referenced by keyword alone.
    ///
    /// `duration` has no primitive base; it only annotates a 12-byte `fixed`.
    pub fn canonical_base(self) -> Option<Primitive> {
        match self {
            LogicalType::Uuid => Some(Primitive::String),
            LogicalType::Decimal => Some(Primitive::Bytes),
            LogicalType::TimeMillis | LogicalType::Date => Some(Primitive::Int),
            LogicalType::TimeMicros
            | LogicalType::TimestampMillis
            | LogicalType::TimestampMicros => Some(Primitive::Long),
            LogicalType::Duration => None,
        }
    }

    /// Whether this logical type may annotate the given primitive.
    pub fn annotates(self, base: Primitive) -> bool {
        self.canonical_base() == Some(base)
    }
}

/// Size in bytes of a `duration` fixed (three little-endian u32 values).
pub const DURATION_SIZE: usize = 12;
