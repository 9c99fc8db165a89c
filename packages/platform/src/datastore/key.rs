use std::fmt;

/// Identifier component of a complete key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyId {
    /// Application-assigned string name.
    Name(String),
    /// Store-allocated numeric id.
    Id(i64),
}

/// A datastore entity key: kind, identifier, and optional parent chain.
///
/// A key without an identifier is *incomplete*; `StructuredStore::put`
/// completes it by allocating a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    kind: String,
    id: Option<KeyId>,
    parent: Option<Box<Key>>,
}

impl Key {
    /// Complete key with an application-assigned name.
    pub fn named(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: Some(KeyId::Name(name.into())),
            parent: None,
        }
    }

    /// Incomplete key; the store allocates its id on put.
    pub fn incomplete(kind: impl Into<String>, parent: Option<Key>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            parent: parent.map(Box::new),
        }
    }

    /// Attach a parent, establishing the ancestor relation.
    pub fn child_of(mut self, parent: Key) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> Option<&KeyId> {
        self.id.as_ref()
    }

    /// String name, for keys identified by `KeyId::Name`.
    pub fn name(&self) -> Option<&str> {
        match self.id.as_ref()? {
            KeyId::Name(name) => Some(name),
            KeyId::Id(_) => None,
        }
    }

    pub fn parent(&self) -> Option<&Key> {
        self.parent.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.id.is_some()
    }

    /// Completed copy of this key carrying the allocated id.
    pub(crate) fn with_id(&self, id: i64) -> Self {
        Self {
            kind: self.kind.clone(),
            id: Some(KeyId::Id(id)),
            parent: self.parent.clone(),
        }
    }

    /// Whether `ancestor` is this key or appears in its parent chain.
    pub fn has_ancestor(&self, ancestor: &Key) -> bool {
        let mut current = Some(self);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = key.parent();
        }
        false
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent}")?;
        }
        write!(f, "/{},", self.kind)?;
        match &self.id {
            Some(KeyId::Name(name)) => f.write_str(name),
            Some(KeyId::Id(id)) => write!(f, "{id}"),
            None => f.write_str("?"),
        }
    }
}
