use std::fmt;

/// Leaf value produced by scalar coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(value) => write!(f, "{value}"),
            // `f64` already drops the `.0` on whole numbers and keeps the sign of `-0`.
            Scalar::Number(value) => write!(f, "{value}"),
            Scalar::Str(value) => f.write_str(value),
        }
    }
}

/// Insertion-ordered string-keyed map.
///
/// Documents are small, so a vector with linear lookup keeps the order
/// without pulling in an ordered-map dependency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, ContentNode)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`. A repeated key replaces the earlier value
    /// but keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: ContentNode) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn extend(&mut self, other: Mapping) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
}

/// Decoded document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Scalar(Scalar),
    Sequence(Vec<ContentNode>),
    Mapping(Mapping),
}

impl Default for ContentNode {
    fn default() -> Self {
        ContentNode::Mapping(Mapping::new())
    }
}

impl ContentNode {
    pub fn null() -> Self {
        ContentNode::Scalar(Scalar::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        ContentNode::Scalar(Scalar::Str(value.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ContentNode::Scalar(Scalar::Null))
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        match self {
            ContentNode::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a chain of mapping keys.
    pub fn path(&self, keys: &[&str]) -> Option<&ContentNode> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ContentNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ContentNode]> {
        match self {
            ContentNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContentNode::Scalar(Scalar::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ContentNode::Scalar(Scalar::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ContentNode::Scalar(Scalar::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Text form of a non-null scalar, for display.
    pub fn text(&self) -> Option<String> {
        match self {
            ContentNode::Scalar(Scalar::Null) => None,
            ContentNode::Scalar(scalar) => Some(scalar.to_string()),
            _ => None,
        }
    }

    /// Display text of every non-null scalar item of a sequence.
    pub fn string_items(&self) -> Vec<String> {
        self.as_sequence()
            .map(|items| items.iter().filter_map(ContentNode::text).collect())
            .unwrap_or_default()
    }
}
