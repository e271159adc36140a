//! Condition field keys and the [`KeySet`] bitset.

use std::fmt;
use std::str::FromStr;

/// A recognized keyword field of a condition specification.
///
/// The discriminant order is the canonical order used when key-sets are
/// displayed or iterated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionKey {
    /// Labeled-tensor input points.
    InputPoints,
    /// Labeled-tensor target points.
    OutputPoints,
    /// Domain over which residuals are evaluated.
    Location,
    /// One or more residual callables.
    Function,
    /// Loss-contribution weight. Never part of the discriminant.
    DataWeight,
}

impl ConditionKey {
    /// Every recognized key, in canonical order.
    pub const ALL: [ConditionKey; 5] = [
        Self::InputPoints,
        Self::OutputPoints,
        Self::Location,
        Self::Function,
        Self::DataWeight,
    ];

    /// Keys that take part in variant resolution.
    pub const DISCRIMINANTS: [ConditionKey; 4] = [
        Self::InputPoints,
        Self::OutputPoints,
        Self::Location,
        Self::Function,
    ];

    /// The keyword spelling of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputPoints => "input_points",
            Self::OutputPoints => "output_points",
            Self::Location => "location",
            Self::Function => "function",
            Self::DataWeight => "data_weight",
        }
    }

    fn bit(self) -> u8 {
        1u8 << (self as u8)
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// A keyword that names no condition field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown condition field '{}'", self.0)
    }
}

impl std::error::Error for UnknownKey {}

/// A set of condition keys, stored as a single-byte bitset.
///
/// Variant resolution compares the supplied key-set against the allowed
/// sets with plain equality, so insertion order never matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeySet {
    bits: u8,
}

impl KeySet {
    /// Create an empty key set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Insert a key into the set.
    pub fn insert(&mut self, key: ConditionKey) {
        self.bits |= key.bit();
    }

    /// Check whether the set contains a key.
    pub fn contains(&self, key: ConditionKey) -> bool {
        self.bits & key.bit() != 0
    }

    /// Returns `true` if the set contains no keys.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the keys in canonical order.
    pub fn iter(&self) -> KeySetIter {
        KeySetIter {
            bits: self.bits,
            next: 0,
        }
    }
}

impl fmt::Display for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<ConditionKey> for KeySet {
    fn from_iter<I: IntoIterator<Item = ConditionKey>>(iter: I) -> Self {
        let mut set = Self::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl IntoIterator for &KeySet {
    type Item = ConditionKey;
    type IntoIter = KeySetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys in a [`KeySet`], in canonical order.
pub struct KeySetIter {
    bits: u8,
    next: usize,
}

impl Iterator for KeySetIter {
    type Item = ConditionKey;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < ConditionKey::ALL.len() {
            let key = ConditionKey::ALL[self.next];
            self.next += 1;
            if self.bits & key.bit() != 0 {
                return Some(key);
            }
        }
        None
    }
}
