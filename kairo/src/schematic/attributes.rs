use super::error::*;
use super::types::*;
use super::value::*;

use std::collections::BTreeMap;

/// User-defined attribute type names and the types they stand for.
pub type UserTypes = BTreeMap<String, TypeValue>;

/// An attribute-value map whose keys and value types exactly match a declared schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, Value>,
}

impl Attributes {
    pub(crate) fn validate(
        schema: &AttributeSchema,
        values: &[(&str, Value)],
        user_types: &UserTypes,
    ) -> Result<Attributes, SchematicError> {
        let mut checked = BTreeMap::new();
        for (name, value) in values {
            let expected = schema
                .get(*name)
                .ok_or_else(|| SchematicError::InvalidAttribute {
                    attribute: name.to_string(),
                })?;
            if !conforms(value, expected, user_types)? {
                return Err(SchematicError::AttributeTypeMismatch {
                    attribute: name.to_string(),
                    expected: expected.clone(),
                    found: value.to_string(),
                });
            }
            if checked.insert(name.to_string(), value.clone()).is_some() {
                return Err(SchematicError::MultipleAssignment {
                    kind: "attribute",
                    name: name.to_string(),
                });
            }
        }

        if let Some(missing) = schema.keys().find(|name| !checked.contains_key(*name)) {
            return Err(SchematicError::UndeclaredAttribute {
                attribute: missing.clone(),
            });
        }

        Ok(Attributes { values: checked })
    }

    pub fn get(&self, name: &str) -> Result<&Value, SchematicError> {
        self.values
            .get(name)
            .ok_or_else(|| SchematicError::UndeclaredAttribute {
                attribute: name.to_string(),
            })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, SchematicError> {
        let value = self.get(name)?;
        value
            .as_bool()
            .ok_or_else(|| SchematicError::AttributeTypeMismatch {
                attribute: name.to_string(),
                expected: TypeValue::Bool,
                found: value.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves `ty` through `user_types` until it names a built-in or array type.
pub(crate) fn resolve<'t>(
    ty: &'t TypeValue,
    user_types: &'t UserTypes,
) -> Result<&'t TypeValue, SchematicError> {
    let mut ty = ty;
    // User types may only refer to previously declared user types, so this terminates.
    while let TypeValue::User(name) = ty {
        ty = user_types
            .get(name)
            .ok_or_else(|| SchematicError::undeclared(name.clone(), "in user types"))?;
    }
    Ok(ty)
}

pub(crate) fn conforms(
    value: &Value,
    ty: &TypeValue,
    user_types: &UserTypes,
) -> Result<bool, SchematicError> {
    Ok(match (value, resolve(ty, user_types)?) {
        (Value::Bool(_), TypeValue::Bool)
        | (Value::Int(_), TypeValue::Int)
        | (Value::String(_), TypeValue::String) => true,
        (Value::Array(elements), TypeValue::Array(element_type)) => {
            for element in elements {
                if !conforms(element, element_type, user_types)? {
                    return Ok(false);
                }
            }
            true
        }
        _ => false,
    })
}

/// Checks that every user type mentioned by `ty` is declared.
pub(crate) fn check_declared(ty: &TypeValue, user_types: &UserTypes) -> Result<(), SchematicError> {
    match ty {
        TypeValue::User(name) if !user_types.contains_key(name) => {
            Err(SchematicError::undeclared(name.clone(), "in user types"))
        }
        TypeValue::Array(element) => check_declared(element, user_types),
        _ => Ok(()),
    }
}
