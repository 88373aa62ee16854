//! Builder for the sections that are a wrapper around a map

use std::{hash::Hash, marker::PhantomData};

use oxamqp_codec::primitives::OrderedMap;

/// Builder for types that are simply a wrapper around a map
/// ([`DeliveryAnnotations`](super::DeliveryAnnotations),
/// [`MessageAnnotations`](super::MessageAnnotations), [`Footer`](super::Footer),
/// [`ApplicationProperties`](super::ApplicationProperties))
///
/// Entries keep the order they are inserted in.
#[derive(Debug)]
pub struct MapBuilder<K, V, T> {
    map: OrderedMap<K, V>,
    marker: PhantomData<T>,
}

impl<K, V, T> Default for MapBuilder<K, V, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, T> MapBuilder<K, V, T> {
    /// Creates a new builder
    pub fn new() -> Self {
        Self {
            map: OrderedMap::new(),
            marker: PhantomData,
        }
    }
}

impl<K, V, T> MapBuilder<K, V, T>
where
    K: Hash + Eq,
    T: From<OrderedMap<K, V>>,
{
    /// A convenience method to insert an entry into the map
    pub fn insert(mut self, key: impl Into<K>, value: impl Into<V>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Builds the section
    pub fn build(self) -> T {
        T::from(self.map)
    }
}
