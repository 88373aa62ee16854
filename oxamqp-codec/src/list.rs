//! An ordered, index addressable container of [`Value`]s
//!
//! Setting an index past the current end fills every slot in between with
//! [`Value::Null`], so a [`List`] never has gaps once anything has been set.

use std::fmt::Display;

use serde::{de, ser};

use crate::{error::Error, value::Value};

/// A sequence of polymorphic values.
///
/// encoding name = "list0", encoding code = 0x45
/// category = fixed, width = 0,
/// label="the empty list (i.e. the list with no elements)"
///
/// encoding name = "list8", encoding code = 0xc0
/// category = compound, width = 1
/// label="up to 2^8 - 1 list elements with total size less than 2^8 octets
///
/// encoding name = "list32", encoding code = 0xd0
/// category = compound, width = 4
/// label="up to 2^32 - 1 list elements with total size less than 2^32 octets"
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct List(Vec<Value>);

impl List {
    /// Creates an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a list holding `values` starting from index 0
    pub fn from_values<T>(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Value>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Number of slots, including null filled ones
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `index` holds a value (null fill counts)
    pub fn has(&self, index: usize) -> bool {
        index < self.0.len()
    }

    /// Get the value at `index`
    pub fn get(&self, index: usize) -> Result<&Value, Error> {
        self.0.get(index).ok_or(Error::Index {
            index,
            len: self.0.len(),
        })
    }

    /// Get a mutable reference to the value at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value, Error> {
        let len = self.0.len();
        self.0.get_mut(index).ok_or(Error::Index { index, len })
    }

    /// Set the value at `index`, filling every unset slot below it with null
    pub fn set(&mut self, index: usize, value: impl Into<Value>) {
        let value = value.into();
        match self.0.get_mut(index) {
            Some(slot) => *slot = value,
            None => {
                self.0.resize(index, Value::Null);
                self.0.push(value);
            }
        }
    }

    /// Appends a value to the end
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into())
    }

    /// Removal is not supported.
    ///
    /// Unsetting an index that holds a value fails with
    /// [`Error::OperationNotSupported`]. Unsetting an index that was never set
    /// leaves the list unchanged.
    pub fn unset(&mut self, index: usize) -> Result<(), Error> {
        match self.has(index) {
            true => Err(Error::OperationNotSupported(
                "removing an entry from a list",
            )),
            false => Ok(()),
        }
    }

    /// Iterate over the values in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Get the values as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Consume the list into the inner vector
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Writes `name(v0, v1, ...)`. Typed wrappers around a list use this to
    /// display their own type name.
    pub fn fmt_with_name(&self, name: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", name)?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(")")
    }
}

impl Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_name("List", f)
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<List> for Vec<Value> {
    fn from(list: List) -> Self {
        list.0
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> Extend<T> for List {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into))
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl ser::Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut state = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            state.serialize_element(value)?;
        }
        state.end()
    }
}

impl<'de> de::Deserialize<'de> for List {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <Vec<Value> as de::Deserialize>::deserialize(deserializer).map(List)
    }
}

#[cfg(test)]
mod tests {
    use super::List;
    use crate::{Error, Value};

    #[test]
    fn set_past_the_end_fills_with_null() {
        let mut list = List::new();
        list.set(3, 7i64);
        list.set(1, "one");

        assert_eq!(list.len(), 4);
        assert_eq!(list.get(0), Ok(&Value::Null));
        assert_eq!(list.get(1), Ok(&Value::String("one".into())));
        assert_eq!(list.get(2), Ok(&Value::Null));
        assert_eq!(list.get(3), Ok(&Value::Long(7)));
    }

    #[test]
    fn out_of_order_sets_never_leave_gaps() {
        let order = [5usize, 0, 9, 2, 7];
        let mut list = List::new();
        for &i in &order {
            list.set(i, i as i64);
        }

        let max = *order.iter().max().unwrap();
        assert_eq!(list.len(), max + 1);
        for j in 0..=max {
            let value = list.get(j).unwrap();
            if order.contains(&j) {
                assert_eq!(value, &Value::Long(j as i64));
            } else {
                assert_eq!(value, &Value::Null);
            }
        }
    }

    #[test]
    fn get_unset_index_fails() {
        let list = List::from_values([1i64, 2]);
        assert!(list.has(1));
        assert!(!list.has(2));
        assert_eq!(list.get(2), Err(Error::Index { index: 2, len: 2 }));
    }

    #[test]
    fn unset_is_not_supported() {
        let mut list = List::from_values([1i64]);
        assert!(matches!(
            list.unset(0),
            Err(Error::OperationNotSupported(_))
        ));
        assert_eq!(list.unset(5), Ok(()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn display_lists_values_in_order() {
        let mut list = List::new();
        list.set(2, true);
        assert_eq!(list.to_string(), "List(null, null, boolean(true))");
    }
}
