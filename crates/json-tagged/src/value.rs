//! [`Value`]: the extended value tree accepted by `encode` and produced by
//! `decode`.
//!
//! Covers everything plain JSON cannot say on its own:
//! - an absent marker distinct from null (`Undefined`)
//! - instants in time (`Date`, epoch milliseconds)
//! - raw bytes (`Bytes`)
//! - sets and maps with arbitrary value keys
//! - records owned by a specialized kind the codec does not understand

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// The ownership of a string-keyed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Built with the generic base record structure.
    Plain,
    /// Built with no base structure at all.
    Bare,
    /// Owned by a specialized kind (a regular expression, a function, a
    /// class instance...). The string names the kind.
    Instance(String),
}

impl ObjectKind {
    pub fn instance(name: impl Into<String>) -> Self {
        ObjectKind::Instance(name.into())
    }
}

/// A string-keyed record.
#[derive(Debug, Clone)]
pub struct Object {
    pub kind: ObjectKind,
    pub fields: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::with_kind(ObjectKind::Plain)
    }

    pub fn with_kind(kind: ObjectKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    /// Insert a field, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        // Plain and bare records are interchangeable; IndexMap equality
        // ignores insertion order.
        let same_kind = match (&self.kind, &other.kind) {
            (ObjectKind::Instance(a), ObjectKind::Instance(b)) => a == b,
            (ObjectKind::Instance(_), _) | (_, ObjectKind::Instance(_)) => false,
            _ => true,
        };
        same_kind && self.fields == other.fields
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.kind {
            ObjectKind::Instance(name) => {
                1u8.hash(state);
                name.hash(state);
            }
            ObjectKind::Plain | ObjectKind::Bare => 0u8.hash(state),
        }
        self.fields.len().hash(state);
        unordered_hash(self.fields.iter()).hash(state);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

/// Unordered set of values, de-duplicated by [`Value`] equality.
///
/// Iteration yields elements in insertion order.
#[derive(Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
    index: HashIndex,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal element was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        let hash = hash_one(&value);
        if self.index.find(hash, |i| self.items[i] == value).is_some() {
            return false;
        }
        self.index.push(hash, self.items.len());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.index
            .find(hash_one(value), |i| self.items[i] == *value)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.items).finish()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl Eq for ValueSet {}

impl Hash for ValueSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.index.sum().hash(state);
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Association list with unique keys, compared as a map.
#[derive(Clone, Default)]
pub struct ValueMap {
    entries: Vec<(Value, Value)>,
    index: HashIndex,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an equal key in place, otherwise appends.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        let hash = hash_one(&key);
        match self.index.find(hash, |i| self.entries[i].0 == key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.push(hash, self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index
            .find(hash_one(key), |i| self.entries[i].0 == *key)
            .map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|other_v| other_v == v))
    }
}

impl Eq for ValueMap {}

impl Hash for ValueMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        unordered_hash(self.iter()).hash(state);
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Extended value tree.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent marker; never equal to `Null`.
    Undefined,
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Bytes(Vec<u8>),
    Set(ValueSet),
    Map(ValueMap),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// A plain record from `(key, value)` pairs.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(fields.into_iter().collect())
    }

    /// A record owned by the named specialized kind.
    pub fn instance(kind: impl Into<String>) -> Self {
        Value::Object(Object::with_kind(ObjectKind::instance(kind)))
    }

    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Set(items.into_iter().collect())
    }

    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether an absent marker appears anywhere in the tree.
    pub fn contains_undefined(&self) -> bool {
        match self {
            Value::Undefined => true,
            Value::Set(set) => set.iter().any(Value::contains_undefined),
            Value::Map(map) => map
                .iter()
                .any(|(k, v)| k.contains_undefined() || v.contains_undefined()),
            Value::Array(arr) => arr.iter().any(Value::contains_undefined),
            Value::Object(obj) => obj.fields.values().any(Value::contains_undefined),
            _ => false,
        }
    }
}

pub(crate) fn same_value_zero(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Bits of `f` with every NaN collapsed to one pattern and `-0.0` to `0.0`,
/// so hashing agrees with [`same_value_zero`].
fn canonical_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-independent combination of element hashes.
fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items.fold(0u64, |acc, item| acc.wrapping_add(hash_one(&item)))
}

/// Element hash → positions of the elements carrying it.
#[derive(Clone, Default)]
struct HashIndex {
    slots: HashMap<u64, Vec<usize>>,
}

impl HashIndex {
    fn find(&self, hash: u64, mut matches: impl FnMut(usize) -> bool) -> Option<usize> {
        self.slots
            .get(&hash)?
            .iter()
            .copied()
            .find(|&i| matches(i))
    }

    fn push(&mut self, hash: u64, position: usize) {
        self.slots.entry(hash).or_default().push(position);
    }

    /// Sum of the hashes of all indexed elements.
    fn sum(&self) -> u64 {
        self.slots.iter().fold(0u64, |acc, (hash, positions)| {
            acc.wrapping_add(hash.wrapping_mul(positions.len() as u64))
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => same_value_zero(*a, *b),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(n) | Value::Date(n) => n.hash(state),
            Value::Float(f) => canonical_bits(*f).hash(state),
            Value::Str(s) => s.hash(state),
            Value::Bytes(bytes) => bytes.hash(state),
            Value::Set(set) => set.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Array(arr) => arr.hash(state),
            Value::Object(obj) => obj.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

macro_rules! impl_try_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = Value;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_try_from_value! {
    bool => Bool,
    i64 => Integer,
    f64 => Float,
    String => Str,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
    ValueSet => Set,
    ValueMap => Map,
    Object => Object,
}
