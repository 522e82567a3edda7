use crate::workflow::{NodeRecord, scalar_key};
use ahash::AHashMap;
use serde_json::Value;

/// How a raw endpoint reference was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    Name,
    Id,
}

/// A raw endpoint reference resolved to a real node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub via: ResolvedVia,
}

impl Endpoint<'_> {
    /// True when the reference was written as a node id rather than a name.
    pub fn was_id(&self) -> bool {
        self.via == ResolvedVia::Id
    }
}

/// Two-way id/name lookup tables for the addressable nodes of one document.
///
/// Only nodes carrying both a non-empty `id` and `name` are addressable. When two
/// nodes share a name, the one declared last wins the name lookup.
#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
    id_to_name: AHashMap<String, String>,
    name_to_id: AHashMap<String, String>,
}

impl EndpointResolver {
    pub fn from_nodes(nodes: &[NodeRecord]) -> Self {
        let mut resolver = Self::default();
        for node in nodes {
            if let (Some(id), Some(name)) = (&node.id, &node.name) {
                resolver.id_to_name.insert(id.clone(), name.clone());
                resolver.name_to_id.insert(name.clone(), id.clone());
            }
        }
        resolver
    }

    /// Resolves a raw reference: an exact name match first, then an id match. Anything
    /// else is dangling.
    pub fn resolve(&self, raw: &str) -> Option<Endpoint<'_>> {
        if let Some((name, id)) = self.name_to_id.get_key_value(raw) {
            return Some(Endpoint {
                id,
                name,
                via: ResolvedVia::Name,
            });
        }
        self.id_to_name
            .get_key_value(raw)
            .map(|(id, name)| Endpoint {
                id,
                name,
                via: ResolvedVia::Id,
            })
    }

    /// Resolves a JSON reference. Strings and numbers are looked up; every other type
    /// is dangling.
    pub fn resolve_value(&self, raw: &Value) -> Option<Endpoint<'_>> {
        scalar_key(raw).and_then(|key| self.resolve(&key))
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str)
    }

    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// Ids of every addressable node.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.id_to_name.keys().map(String::as_str)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.id_to_name.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }
}
