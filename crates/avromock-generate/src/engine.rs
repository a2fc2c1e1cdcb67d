use tracing::debug;

use avromock_core::{RecordSchema, Schema, UnionMember, effective_namespace};

use crate::errors::GenerationError;
use crate::model::GenerateOptions;
use crate::random::{Leaf, RandomSource};
use crate::resolver::{Resolved, SymbolTable};
use crate::union::UnionPicker;
use crate::value::MockValue;

/// Generate one value tree with a fresh, non-reproducible random stream.
pub fn generate(schema: &Schema, options: &GenerateOptions) -> Result<MockValue, GenerationError> {
    let mut random = RandomSource::ambient();
    generate_with(schema, options, &mut random)
}

/// Generate one value tree drawing leaves from `random`.
pub fn generate_with(
    schema: &Schema,
    options: &GenerateOptions,
    random: &mut RandomSource,
) -> Result<MockValue, GenerationError> {
    let symbols = SymbolTable::build(schema);
    debug!(named_types = symbols.len(), "symbol table built");
    TypeGenerator::new(&symbols, options, random).generate(schema, None)
}

/// Reproducible generator bound to a seed.
///
/// Each call advances the same stream, so consecutive calls differ while two
/// generators built from the same seed stay in lockstep.
#[derive(Debug, Clone)]
pub struct SeededGenerator {
    seed: u64,
    passes: u64,
    random: RandomSource,
}

impl SeededGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            passes: 0,
            random: RandomSource::seeded(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generation passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn generate(
        &mut self,
        schema: &Schema,
        options: &GenerateOptions,
    ) -> Result<MockValue, GenerationError> {
        self.passes += 1;
        debug!(seed = self.seed, pass = self.passes, "seeded generation pass");
        generate_with(schema, options, &mut self.random)
    }
}

/// Bind a generator to `seed`.
pub fn seeded(seed: u64) -> SeededGenerator {
    SeededGenerator::new(seed)
}

/// Bind a generator to `seed` and expose it as a plain closure.
pub fn seeded_fn(
    seed: u64,
) -> impl FnMut(&Schema, &GenerateOptions) -> Result<MockValue, GenerationError> {
    let mut generator = SeededGenerator::new(seed);
    move |schema: &Schema, options: &GenerateOptions| generator.generate(schema, options)
}

/// Recursive walker turning a schema tree into a value tree.
pub struct TypeGenerator<'s, 'c> {
    symbols: &'c SymbolTable<'s>,
    options: &'c GenerateOptions,
    picker: UnionPicker<'c>,
    random: &'c mut RandomSource,
    depth: usize,
}

impl<'s, 'c> TypeGenerator<'s, 'c> {
    pub fn new(
        symbols: &'c SymbolTable<'s>,
        options: &'c GenerateOptions,
        random: &'c mut RandomSource,
    ) -> Self {
        Self {
            symbols,
            options,
            picker: UnionPicker::new(&options.pick_union),
            random,
            depth: 0,
        }
    }

    pub fn generate(
        &mut self,
        schema: &'s Schema,
        namespace: Option<&str>,
    ) -> Result<MockValue, GenerationError> {
        match schema {
            Schema::Primitive(primitive) => Ok(self.leaf(Leaf::Primitive(*primitive))),
            Schema::Logical(logical) => Ok(self.leaf(Leaf::Logical(logical.logical_type))),
            Schema::Fixed(fixed) => Ok(self.leaf(Leaf::Fixed {
                size: fixed.size,
                logical_type: fixed.logical_type,
            })),
            Schema::Enum(enum_schema) => Ok(self.options.generators.call("enum").unwrap_or_else(
                || {
                    enum_schema
                        .symbols
                        .first()
                        .map(|symbol| MockValue::Text(symbol.clone()))
                        .unwrap_or(MockValue::Null)
                },
            )),
            Schema::Record(record) => self.record(record, namespace),
            Schema::Array(items) => {
                let len = self.options.effective_collection_len();
                let items = (0..len)
                    .map(|_| self.generate(items, namespace))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MockValue::Array(items))
            }
            Schema::Map(values) => {
                let len = self.options.effective_collection_len();
                let mut entries: Vec<(String, MockValue)> = Vec::with_capacity(len);
                while entries.len() < len {
                    let key = self.random.text();
                    if entries.iter().any(|(existing, _)| existing == &key) {
                        continue;
                    }
                    let value = self.generate(values, namespace)?;
                    entries.push((key, value));
                }
                Ok(MockValue::Map(entries))
            }
            Schema::Union(members) => self.union(members, namespace),
            Schema::Reference(token) => self.reference(token, namespace),
        }
    }

    fn leaf(&mut self, leaf: Leaf) -> MockValue {
        match self.options.generators.call(leaf.kind()) {
            Some(value) => value,
            None => self.random.leaf(leaf),
        }
    }

    fn record(
        &mut self,
        record: &'s RecordSchema,
        namespace: Option<&str>,
    ) -> Result<MockValue, GenerationError> {
        let inner = effective_namespace(
            record.name.as_deref(),
            record.namespace.as_deref(),
            namespace,
        );
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            let value = self.generate(&field.schema, inner.as_deref())?;
            fields.push((field.name.clone(), value));
        }
        Ok(MockValue::Record(fields))
    }

    fn union(
        &mut self,
        members: &'s [UnionMember],
        namespace: Option<&str>,
    ) -> Result<MockValue, GenerationError> {
        let Some(pick) = self.picker.pick(members, self.symbols, namespace)? else {
            return Ok(MockValue::Null);
        };
        let value = self.generate(&pick.member.schema, namespace)?;
        Ok(match pick.wrap_key {
            Some(branch) => MockValue::Union {
                branch,
                value: Box::new(value),
            },
            None => value,
        })
    }

    fn reference(
        &mut self,
        token: &str,
        namespace: Option<&str>,
    ) -> Result<MockValue, GenerationError> {
        let definition = match self.symbols.resolve(token, namespace)? {
            Resolved::Named(definition) => definition,
            Resolved::Builtin(builtin) => return self.builtin(&builtin),
        };

        if self.depth >= self.options.max_depth {
            return Err(GenerationError::RecursionLimit {
                name: definition.full_name.qualified(),
                depth: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = self.generate(definition.schema, definition.namespace());
        self.depth -= 1;
        result
    }

    fn builtin(&mut self, schema: &Schema) -> Result<MockValue, GenerationError> {
        match schema {
            Schema::Primitive(primitive) => Ok(self.leaf(Leaf::Primitive(*primitive))),
            Schema::Logical(logical) => Ok(self.leaf(Leaf::Logical(logical.logical_type))),
            Schema::Fixed(fixed) => Ok(self.leaf(Leaf::Fixed {
                size: fixed.size,
                logical_type: fixed.logical_type,
            })),
            other => Err(GenerationError::UnknownType(other.kind().to_string())),
        }
    }
}
