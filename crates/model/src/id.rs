use std::{fmt, hash, marker::PhantomData};

use serde::{Deserialize, Serialize};

pub trait HasId {
    type IdType;
}

/// Typed wrapper around an entity's raw id, so that e.g. an operator id
/// can not be passed where a station id is expected.
pub struct Id<T: HasId>(T::IdType, PhantomData<T>);

impl<T: HasId> Id<T> {
    pub fn new(inner: T::IdType) -> Self {
        Self(inner, PhantomData)
    }
}

impl<T: HasId> Id<T>
where
    T::IdType: Clone,
{
    pub fn raw(&self) -> T::IdType {
        self.0.clone()
    }
}

impl<T: HasId> Clone for Id<T>
where
    T::IdType: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T: HasId> fmt::Debug for Id<T>
where
    T::IdType: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:?})", self.0)
    }
}

impl<T: HasId> fmt::Display for Id<T>
where
    T::IdType: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: HasId> PartialEq for Id<T>
where
    T::IdType: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: HasId> Eq for Id<T> where T::IdType: Eq {}

impl<T: HasId> hash::Hash for Id<T>
where
    T::IdType: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: HasId> Serialize for Id<T>
where
    T::IdType: Serialize,
{
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: HasId> Deserialize<'de> for Id<T>
where
    T::IdType: Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Ok(Self::new(T::IdType::deserialize(deserializer)?))
    }
}
