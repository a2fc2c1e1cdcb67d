//! Avro naming rules: qualification and namespace inheritance.

use std::fmt;

/// A named type's name split into its namespace and short name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullName {
    pub namespace: Option<String>,
    pub name: String,
}

impl FullName {
    /// Compute the full name of a definition.
    ///
    /// A dotted `name` is already qualified and ignores both namespaces.
    /// Otherwise the definition's own `namespace` wins; an empty string means
    /// the null namespace and stops inheritance from `enclosing`.
    pub fn new(name: &str, namespace: Option<&str>, enclosing: Option<&str>) -> Self {
        if let Some((prefix, short)) = name.rsplit_once('.') {
            return Self {
                namespace: non_empty(prefix),
                name: short.to_string(),
            };
        }

        Self {
            namespace: effective_namespace(None, namespace, enclosing),
            name: name.to_string(),
        }
    }

    pub fn qualified(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Namespace that a (possibly anonymous) type passes on to its children.
pub fn effective_namespace(
    name: Option<&str>,
    namespace: Option<&str>,
    enclosing: Option<&str>,
) -> Option<String> {
    if let Some((prefix, _)) = name.and_then(|name| name.rsplit_once('.')) {
        return non_empty(prefix);
    }
    match namespace {
        Some(namespace) => non_empty(namespace),
        None => enclosing.and_then(non_empty),
    }
}

/// Qualify a reference token against a namespace unless it is already dotted.
pub fn qualify(token: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(namespace) if !token.contains('.') && !namespace.is_empty() => {
            format!("{namespace}.{token}")
        }
        _ => token.to_string(),
    }
}

/// Last segment of a possibly qualified name.
pub fn short_name(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, short)| short).unwrap_or(name)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_names_ignore_namespaces() {
        let name = FullName::new("space.chicken", Some("other"), Some("outer"));
        assert_eq!(name.namespace.as_deref(), Some("space"));
        assert_eq!(name.name, "chicken");
        assert_eq!(name.qualified(), "space.chicken");
    }

    #[test]
    fn inherits_enclosing_namespace() {
        let name = FullName::new("CountryFarm", None, Some("com.farms"));
        assert_eq!(name.qualified(), "com.farms.CountryFarm");
    }

    #[test]
    fn empty_namespace_stops_inheritance() {
        let name = FullName::new("CountryFarm", Some(""), Some("com.farms"));
        assert_eq!(name.qualified(), "CountryFarm");
    }

    #[test]
    fn qualifies_bare_tokens_only() {
        assert_eq!(qualify("chicken", Some("space")), "space.chicken");
        assert_eq!(qualify("a.chicken", Some("space")), "a.chicken");
        assert_eq!(qualify("chicken", None), "chicken");
        assert_eq!(short_name("a.b.chicken"), "chicken");
    }
}
