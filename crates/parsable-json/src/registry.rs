//! Runtime converter lookup over `serde_json::Value`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::adapter::ParsableAdapter;
use crate::errors::{Error, Result};
use crate::parsable::{type_name, Parsable};

/// A type-erased per-type converter.
pub trait Converter: Send + Sync {
    /// Display name of the type this converter produces.
    fn type_name(&self) -> String;

    /// Capability probe consulted before dispatch.
    fn can_handle(&self, candidate: TypeId) -> bool;

    /// Convert a value of the handled type into its JSON form.
    fn to_value(&self, value: &dyn Any) -> Result<Value>;

    /// Convert a JSON value back. `Ok(None)` is the absent value.
    fn from_value(&self, value: Value) -> Result<Option<Box<dyn Any + Send>>>;
}

impl<T> Converter for ParsableAdapter<T>
where
    T: Parsable + Send + 'static,
{
    fn type_name(&self) -> String {
        type_name::<T>()
    }

    fn can_handle(&self, candidate: TypeId) -> bool {
        ParsableAdapter::can_handle(self, candidate)
    }

    fn to_value(&self, value: &dyn Any) -> Result<Value> {
        let value = value.downcast_ref::<T>().ok_or_else(|| Error::TypeMismatch {
            expected: type_name::<T>(),
        })?;
        Ok(self.serialize(Some(value), serde_json::value::Serializer)?)
    }

    fn from_value(&self, value: Value) -> Result<Option<Box<dyn Any + Send>>> {
        let parsed = self.deserialize(value)?;
        Ok(parsed.map(|value| Box::new(value) as Box<dyn Any + Send>))
    }
}

/// Registered converters, probed in registration order.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
    names: HashMap<String, usize>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the string adapter for `T`. A second call for the same type
    /// is a no-op.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Parsable + Send + 'static,
    {
        self.position(TypeId::of::<T>())
            .unwrap_or_else(|| self.push(ParsableAdapter::<T>::new()));
        self
    }

    /// Register the adapter for `T` and bind `name` to it.
    ///
    /// Returns [`Error::DuplicateName`] if `name` already refers to a
    /// converter for some other type.
    pub fn register_named<T>(&mut self, name: &str) -> Result<&mut Self>
    where
        T: Parsable + Send + 'static,
    {
        let current = self.position(TypeId::of::<T>());
        if let Some(&existing) = self.names.get(name) {
            if current != Some(existing) {
                return Err(Error::DuplicateName {
                    name: name.to_string(),
                    existing: self.converters[existing].type_name(),
                });
            }
        }
        let index = current.unwrap_or_else(|| self.push(ParsableAdapter::<T>::new()));
        self.names.insert(name.to_string(), index);
        Ok(self)
    }

    /// Add a hand-written converter. It is probed after every converter
    /// registered before it.
    pub fn register_converter<C>(&mut self, converter: C) -> &mut Self
    where
        C: Converter + 'static,
    {
        self.push(converter);
        self
    }

    /// First converter whose capability probe accepts `type_id`.
    pub fn find(&self, type_id: TypeId) -> Option<&dyn Converter> {
        self.position(type_id).map(|index| self.converters[index].as_ref())
    }

    pub fn find_by_name(&self, name: &str) -> Result<&dyn Converter> {
        self.names
            .get(name)
            .map(|&index| self.converters[index].as_ref())
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub fn to_value<T: 'static>(&self, value: &T) -> Result<Value> {
        self.converter_for::<T>()?.to_value(value)
    }

    pub fn from_value<T: 'static>(&self, value: Value) -> Result<Option<T>> {
        self.converter_for::<T>()?
            .from_value(value)?
            .map(|boxed| {
                boxed.downcast::<T>().map(|value| *value).map_err(|_| Error::TypeMismatch {
                    expected: type_name::<T>(),
                })
            })
            .transpose()
    }

    fn converter_for<T: 'static>(&self) -> Result<&dyn Converter> {
        self.find(TypeId::of::<T>()).ok_or_else(|| Error::NoConverter {
            type_name: type_name::<T>(),
        })
    }

    fn position(&self, type_id: TypeId) -> Option<usize> {
        self.converters
            .iter()
            .position(|converter| converter.can_handle(type_id))
    }

    fn push<C: Converter + 'static>(&mut self, converter: C) -> usize {
        tracing::trace!(target_type = %converter.type_name(), "converter registered");
        self.converters.push(Box::new(converter));
        self.converters.len() - 1
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field(
                "converters",
                &self.converters.iter().map(|c| c.type_name()).collect::<Vec<_>>(),
            )
            .field("names", &self.names())
            .finish()
    }
}
