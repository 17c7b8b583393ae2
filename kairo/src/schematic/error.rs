use super::types::TypeValue;

use thiserror::Error;

/// Errors raised while assembling a [`Schematic`](./struct.Schematic.html).
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("undeclared identifier '{identifier}' {context}")]
    UndeclaredIdentifier { identifier: String, context: String },
    #[error("multiple definition of '{name}' in {namespace}")]
    MultipleDefinition {
        namespace: &'static str,
        name: String,
    },
    #[error("multiple assignment of {kind} '{name}'")]
    MultipleAssignment { kind: &'static str, name: String },
    #[error("undeclared attribute '{attribute}'")]
    UndeclaredAttribute { attribute: String },
    #[error("invalid attribute '{attribute}': not declared by its type")]
    InvalidAttribute { attribute: String },
    #[error("attribute '{attribute}' expects a value of type {expected}, found {found}")]
    AttributeTypeMismatch {
        attribute: String,
        expected: TypeValue,
        found: String,
    },
}

impl SchematicError {
    pub(crate) fn undeclared(identifier: impl Into<String>, context: impl Into<String>) -> Self {
        SchematicError::UndeclaredIdentifier {
            identifier: identifier.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_identifier_message() {
        let e = SchematicError::undeclared("x", "context");
        assert_eq!(e.to_string(), "undeclared identifier 'x' context");
    }
}
