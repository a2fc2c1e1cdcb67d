//! Seedable source of leaf values.

use chrono::{Days, NaiveDate};
use rand::distr::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use avromock_core::{DURATION_SIZE, LogicalType, Primitive};

use crate::value::MockValue;

const LONG_BOUND: i64 = 1 << 53;
const FLOAT_MIN: f64 = -1_000_000.0;
const FLOAT_MAX: f64 = 1_000_000.0;
const TEXT_MIN_LEN: usize = 8;
const TEXT_MAX_LEN: usize = 16;
const BYTES_MIN_LEN: usize = 1;
const BYTES_MAX_LEN: usize = 16;
const MILLIS_PER_DAY: i64 = 86_400_000;
// 2100-01-01T00:00:00Z
const TIMESTAMP_MAX_MILLIS: i64 = 4_102_444_800_000;
// 1970-01-01 through 2100-12-31
const DATE_SPAN_DAYS: u64 = 47_846;

/// Leaf kinds the random source knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    Primitive(Primitive),
    Logical(LogicalType),
    Fixed {
        size: usize,
        logical_type: Option<LogicalType>,
    },
}

impl Leaf {
    /// Kind name used to look up custom generator overrides.
    pub fn kind(&self) -> &'static str {
        match self {
            Leaf::Primitive(primitive) => primitive.keyword(),
            Leaf::Logical(logical) => logical.keyword(),
            Leaf::Fixed {
                logical_type: Some(logical),
                ..
            } => logical.keyword(),
            Leaf::Fixed { .. } => "fixed",
        }
    }
}

/// Random value stream backed by ChaCha8.
///
/// Each instance owns its stream; there is no process-wide generator.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Fresh, non-reproducible stream seeded from the thread generator.
    pub fn ambient() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible stream derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn leaf(&mut self, leaf: Leaf) -> MockValue {
        match leaf {
            Leaf::Primitive(primitive) => self.primitive(primitive),
            Leaf::Logical(logical) => self.logical(logical),
            Leaf::Fixed {
                size,
                logical_type: Some(LogicalType::Decimal),
            } => MockValue::Bytes(self.bytes_exact(size)),
            Leaf::Fixed {
                logical_type: Some(LogicalType::Duration),
                ..
            } => MockValue::Fixed(self.alphanumeric(DURATION_SIZE)),
            Leaf::Fixed { size, .. } => MockValue::Fixed(self.alphanumeric(size)),
        }
    }

    pub fn primitive(&mut self, primitive: Primitive) -> MockValue {
        match primitive {
            Primitive::Null => MockValue::Null,
            Primitive::Boolean => MockValue::Bool(self.rng.random_bool(0.5)),
            Primitive::Int => MockValue::Int(i64::from(self.rng.random::<i32>())),
            Primitive::Long => MockValue::Int(self.rng.random_range(-LONG_BOUND..LONG_BOUND)),
            Primitive::Float => {
                let value = self.rng.random_range(FLOAT_MIN..FLOAT_MAX) as f32;
                MockValue::Float(f64::from(value))
            }
            Primitive::Double => MockValue::Float(self.rng.random_range(FLOAT_MIN..FLOAT_MAX)),
            Primitive::Bytes => {
                let len = self.rng.random_range(BYTES_MIN_LEN..=BYTES_MAX_LEN);
                MockValue::Bytes(self.bytes_exact(len))
            }
            Primitive::String => MockValue::Text(self.text()),
        }
    }

    pub fn logical(&mut self, logical: LogicalType) -> MockValue {
        match logical {
            LogicalType::Uuid => MockValue::Uuid(self.uuid()),
            LogicalType::Decimal => {
                MockValue::Bytes(self.rng.random::<i32>().to_be_bytes().to_vec())
            }
            LogicalType::TimeMillis => MockValue::Int(self.rng.random_range(0..MILLIS_PER_DAY)),
            LogicalType::TimeMicros => {
                MockValue::Int(self.rng.random_range(0..MILLIS_PER_DAY * 1000))
            }
            LogicalType::TimestampMillis => {
                MockValue::Int(self.rng.random_range(0..TIMESTAMP_MAX_MILLIS))
            }
            LogicalType::TimestampMicros => {
                MockValue::Int(self.rng.random_range(0..TIMESTAMP_MAX_MILLIS * 1000))
            }
            LogicalType::Date => MockValue::Date(self.date()),
            LogicalType::Duration => MockValue::Fixed(self.alphanumeric(DURATION_SIZE)),
        }
    }

    /// Alphanumeric string of random length, also used for map keys.
    pub fn text(&mut self) -> String {
        let len = self.rng.random_range(TEXT_MIN_LEN..=TEXT_MAX_LEN);
        self.alphanumeric(len)
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect()
    }

    fn bytes_exact(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0_u8; len];
        self.rng.fill(bytes.as_mut_slice());
        bytes
    }

    fn uuid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.random();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    fn date(&mut self) -> NaiveDate {
        let offset = self.rng.random_range(0..=DATE_SPAN_DAYS);
        NaiveDate::default()
            .checked_add_days(Days::new(offset))
            .unwrap_or_default()
    }
}
