use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::value::MockValue;

const DEFAULT_COLLECTION_LEN: usize = 1;
const DEFAULT_MAX_DEPTH: usize = 32;

/// Zero-argument value factory substituted for a leaf kind.
pub type GeneratorFn = Arc<dyn Fn() -> MockValue + Send + Sync>;

/// Per-kind overrides consulted before the random source.
#[derive(Clone, Default)]
pub struct GeneratorOverrides {
    by_kind: BTreeMap<String, GeneratorFn>,
}

impl GeneratorOverrides {
    pub fn insert(&mut self, kind: impl Into<String>, generator: GeneratorFn) {
        self.by_kind.insert(kind.into(), generator);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.by_kind.contains_key(kind)
    }

    /// Run the override registered for `kind`, if any.
    pub fn call(&self, kind: &str) -> Option<MockValue> {
        self.by_kind.get(kind).map(|generator| generator())
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl fmt::Debug for GeneratorOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_kind.keys()).finish()
    }
}

/// Options for a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Union member names (short, qualified or alias) preferred over the first member.
    #[serde(alias = "pickUnion")]
    pub pick_union: Vec<String>,
    /// Number of elements generated for every array and map.
    pub collection_len: usize,
    /// Maximum nesting of named references before generation is aborted.
    pub max_depth: usize,
    #[serde(skip)]
    pub generators: GeneratorOverrides,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            pick_union: Vec::new(),
            collection_len: DEFAULT_COLLECTION_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            generators: GeneratorOverrides::default(),
        }
    }
}

impl GenerateOptions {
    pub fn with_pick_union<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pick_union = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generator<F>(mut self, kind: impl Into<String>, generator: F) -> Self
    where
        F: Fn() -> MockValue + Send + Sync + 'static,
    {
        self.generators.insert(kind, Arc::new(generator));
        self
    }

    pub fn with_collection_len(mut self, len: usize) -> Self {
        self.collection_len = len;
        self
    }

    /// Elements per collection; never below one.
    pub fn effective_collection_len(&self) -> usize {
        self.collection_len.max(1)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GenerationError> {
        Ok(toml::from_str(content)?)
    }
}

/// Load the serializable part of [`GenerateOptions`] from a TOML file.
pub fn load_options(path: &Path) -> Result<GenerateOptions, GenerationError> {
    let content = std::fs::read_to_string(path)?;
    GenerateOptions::from_toml_str(&content)
}
