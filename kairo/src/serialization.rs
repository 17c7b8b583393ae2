//! Reading schematics from their JSON interchange form.
//!
//! A document names the schematic and lists, in this order: user-defined types, port types, node
//! types, connection types, constraint types, nodes, connections and constraints. Every section
//! except `name` is optional. Attribute types are written as `"Bool"`, `"Int"`, `"String"`, a
//! user type name, or `{"array": <type>}`; connection endpoints are written as `"node:port"`.

use crate::schematic::*;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("malformed schematic document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schematic(#[from] SchematicError),
    #[error("endpoint '{endpoint}' of connection '{connection}' is not of the form 'node:port'")]
    MalformedEndpoint {
        connection: String,
        endpoint: String,
    },
    #[error("attribute '{attribute}' has unsupported value {value}")]
    UnsupportedValue { attribute: String, value: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Document {
    name: String,
    #[serde(default)]
    user_defined_types: IndexMap<String, TypeDoc>,
    #[serde(default)]
    port_types: IndexMap<String, AttributeTypeDoc>,
    #[serde(default)]
    node_types: IndexMap<String, NodeTypeDoc>,
    #[serde(default)]
    connection_types: IndexMap<String, AttributeTypeDoc>,
    #[serde(default)]
    constraint_types: IndexMap<String, AttributeTypeDoc>,
    #[serde(default)]
    nodes: IndexMap<String, NodeDoc>,
    #[serde(default)]
    connections: IndexMap<String, ConnectionDoc>,
    #[serde(default)]
    constraints: IndexMap<String, ConstraintDoc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeDoc {
    Named(String),
    Array { array: Box<TypeDoc> },
}

impl TypeDoc {
    fn to_type_value(&self) -> TypeValue {
        match self {
            TypeDoc::Named(name) => {
                TypeValue::builtin(name).unwrap_or_else(|| TypeValue::User(name.clone()))
            }
            TypeDoc::Array { array } => TypeValue::Array(Box::new(array.to_type_value())),
        }
    }
}

type AttributeValues = IndexMap<String, serde_json::Value>;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AttributeTypeDoc {
    #[serde(default)]
    attributes: IndexMap<String, TypeDoc>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeTypeDoc {
    #[serde(default)]
    attributes: IndexMap<String, TypeDoc>,
    #[serde(default)]
    ports: IndexMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct NodeDoc {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    attributes: AttributeValues,
    #[serde(default)]
    port_attributes: IndexMap<String, AttributeValues>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectionDoc {
    #[serde(rename = "type")]
    connection_type: String,
    from: String,
    to: String,
    #[serde(default)]
    attributes: AttributeValues,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintDoc {
    #[serde(rename = "type")]
    constraint_type: String,
    #[serde(default)]
    attributes: AttributeValues,
}

fn schema(attributes: &IndexMap<String, TypeDoc>) -> Vec<(&str, TypeValue)> {
    attributes
        .iter()
        .map(|(name, ty)| (name.as_str(), ty.to_type_value()))
        .collect()
}

fn value(attribute: &str, json: &serde_json::Value) -> Result<Value, SerializationError> {
    use serde_json::Value as Json;

    match json {
        Json::Bool(value) => Ok(Value::Bool(*value)),
        Json::Number(number) => number.as_i64().map(Value::Int).ok_or_else(|| {
            SerializationError::UnsupportedValue {
                attribute: attribute.to_string(),
                value: json.to_string(),
            }
        }),
        Json::String(value) => Ok(Value::String(value.clone())),
        Json::Array(elements) => Ok(Value::Array(
            elements
                .iter()
                .map(|element| value(attribute, element))
                .collect::<Result<_, _>>()?,
        )),
        Json::Null | Json::Object(_) => Err(SerializationError::UnsupportedValue {
            attribute: attribute.to_string(),
            value: json.to_string(),
        }),
    }
}

fn values(attributes: &AttributeValues) -> Result<Vec<(&str, Value)>, SerializationError> {
    attributes
        .iter()
        .map(|(name, json)| Ok((name.as_str(), value(name, json)?)))
        .collect()
}

fn endpoint<'a>(
    schematic: &Schematic<'a>,
    connection: &str,
    endpoint: &str,
) -> Result<PortId<'a>, SerializationError> {
    let (node, port) = endpoint
        .rsplit_once(':')
        .filter(|(node, port)| !node.is_empty() && !port.is_empty())
        .ok_or_else(|| SerializationError::MalformedEndpoint {
            connection: connection.to_string(),
            endpoint: endpoint.to_string(),
        })?;
    let node = schematic.node(node)?;
    Ok(schematic.port(node, port)?)
}

/// Builds a [`Schematic`] from its JSON form, declaring its types in `context`.
///
/// [`Schematic`]: ../schematic/struct.Schematic.html
pub fn deserialize<'a>(
    context: &'a Context<'a>,
    text: &str,
) -> Result<Schematic<'a>, SerializationError> {
    let doc: Document = serde_json::from_str(text)?;
    let mut s = Schematic::new(doc.name.as_str());

    for (name, ty) in doc.user_defined_types.iter() {
        s.add_user_type(name.as_str(), ty.to_type_value())?;
    }
    for (name, port_type) in doc.port_types.iter() {
        let port_type = context.port_type(&schema(&port_type.attributes))?;
        s.add_port_type(name.as_str(), port_type)?;
    }
    for (name, node_type) in doc.node_types.iter() {
        let mut ports = Vec::new();
        for (port_name, port_type) in node_type.ports.iter() {
            ports.push((port_name.as_str(), s.port_type(port_type)?));
        }
        let node_type = context.node_type(&schema(&node_type.attributes), &ports)?;
        s.add_node_type(name.as_str(), node_type)?;
    }
    for (name, connection_type) in doc.connection_types.iter() {
        let connection_type = context.connection_type(&schema(&connection_type.attributes))?;
        s.add_connection_type(name.as_str(), connection_type)?;
    }
    for (name, constraint_type) in doc.constraint_types.iter() {
        let constraint_type = context.constraint_type(&schema(&constraint_type.attributes))?;
        s.add_constraint_type(name.as_str(), constraint_type)?;
    }

    for (name, node) in doc.nodes.iter() {
        let node_type = s.node_type(&node.node_type)?;
        let attributes = values(&node.attributes)?;
        let mut port_values = Vec::new();
        for (port_name, port_attributes) in node.port_attributes.iter() {
            port_values.push((port_name.as_str(), values(port_attributes)?));
        }
        let port_attributes: Vec<(&str, &[(&str, Value)])> = port_values
            .iter()
            .map(|(port_name, values)| (*port_name, values.as_slice()))
            .collect();
        s.add_node_with_port_attributes(name.as_str(), node_type, &attributes, &port_attributes)?;
    }
    for (name, connection) in doc.connections.iter() {
        let connection_type = s.connection_type(&connection.connection_type)?;
        let from = endpoint(&s, name, &connection.from)?;
        let to = endpoint(&s, name, &connection.to)?;
        s.add_connection(
            name.as_str(),
            connection_type,
            from,
            to,
            &values(&connection.attributes)?,
        )?;
    }
    for (name, constraint) in doc.constraints.iter() {
        let constraint_type = s.constraint_type(&constraint.constraint_type)?;
        s.add_constraint(
            name.as_str(),
            constraint_type,
            &values(&constraint.attributes)?,
        )?;
    }

    debug!(
        nodes = doc.nodes.len(),
        connections = doc.connections.len(),
        constraints = doc.constraints.len(),
        "deserialized schematic '{}'",
        doc.name
    );

    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::netlist::Netlist;

    const VOCABULARY: &str = r#"
        "portTypes": {
            "digitalIn": {},
            "digitalOut": {}
        },
        "nodeTypes": {
            "inputPin": { "ports": { "out": "digitalOut" } },
            "outputPin": { "ports": { "in": "digitalIn" } }
        },
        "connectionTypes": { "digitalWire": {} }
    "#;

    fn document(body: &str) -> String {
        format!("{{ \"name\": \"test\", {}, {} }}", VOCABULARY, body)
    }

    #[test]
    fn register_demo() {
        let c = Context::new();
        let s = deserialize(&c, include_str!("../../demos/register.json")).unwrap();

        assert_eq!(s.name(), "toggle");
        let state = s.node("state").unwrap();
        assert_eq!(
            RegisterParams::from_node(&s[state]).unwrap(),
            RegisterParams {
                initial_value: true,
                reset_active_high: true,
                reset_asynchronous: true,
                clock_active_high: true,
            }
        );
        let pin = s.constraint("clk_pin").unwrap();
        assert_eq!(
            pin.attributes().get("banks").unwrap(),
            &Value::Array(vec![Value::Int(1), Value::Int(2)])
        );

        let netlist = Netlist::build(&s).unwrap();
        assert_eq!(netlist.nets().count(), 4);
    }

    #[test]
    fn nodes_and_connections_keep_document_order() {
        let c = Context::new();
        let s = deserialize(
            &c,
            &document(
                r#"
                "nodes": {
                    "z": { "type": "inputPin" },
                    "a": { "type": "outputPin" }
                },
                "connections": {
                    "c1": { "type": "digitalWire", "from": "z:out", "to": "a:in" },
                    "c0": { "type": "digitalWire", "from": "a:in", "to": "z:out" }
                }
                "#,
            ),
        )
        .unwrap();

        let nodes: Vec<_> = s.nodes().map(|(_, node)| node.name()).collect();
        assert_eq!(nodes, vec!["z", "a"]);
        let connections: Vec<_> = s.connections().map(|(_, c)| c.name()).collect();
        assert_eq!(connections, vec!["c1", "c0"]);
    }

    #[test]
    fn undeclared_port_type() {
        let c = Context::new();
        let e = deserialize(
            &c,
            r#"{ "name": "t", "nodeTypes": { "n": { "ports": { "p": "wire" } } } }"#,
        )
        .unwrap_err();
        assert_eq!(e.to_string(), "undeclared identifier 'wire' in port types");
    }

    #[test]
    fn builtin_types_cannot_be_redefined() {
        let c = Context::new();
        let e = deserialize(&c, r#"{ "name": "t", "userDefinedTypes": { "Int": "Bool" } }"#)
            .unwrap_err();
        assert!(matches!(
            e,
            SerializationError::Schematic(SchematicError::MultipleDefinition { .. })
        ));
    }

    #[test]
    fn user_types_resolve() {
        let c = Context::new();
        let s = deserialize(
            &c,
            r#"{
                "name": "t",
                "userDefinedTypes": { "Word": "Int", "Words": { "array": "Word" } },
                "constraintTypes": { "k": { "attributes": { "w": "Words" } } },
                "constraints": { "k0": { "type": "k", "attributes": { "w": [1, 2, 3] } } }
            }"#,
        )
        .unwrap();
        assert_eq!(s.user_type("Words").unwrap().to_string(), "Array<Word>");
        assert!(s.constraint("k0").is_ok());
    }

    #[test]
    fn malformed_endpoint() {
        let c = Context::new();
        let e = deserialize(
            &c,
            &document(
                r#"
                "nodes": { "a": { "type": "inputPin" } },
                "connections": { "c0": { "type": "digitalWire", "from": "a", "to": "a:out" } }
                "#,
            ),
        )
        .unwrap_err();
        assert_eq!(
            e.to_string(),
            "endpoint 'a' of connection 'c0' is not of the form 'node:port'"
        );
    }

    #[test]
    fn unknown_endpoint_node() {
        let c = Context::new();
        let e = deserialize(
            &c,
            &document(
                r#"
                "nodes": { "a": { "type": "inputPin" } },
                "connections": { "c0": { "type": "digitalWire", "from": "a:out", "to": "b:in" } }
                "#,
            ),
        )
        .unwrap_err();
        assert_eq!(e.to_string(), "undeclared identifier 'b' in nodes");
    }

    #[test]
    fn unsupported_values() {
        let c = Context::new();
        for value in &["1.5", "null", "{}"] {
            let e = deserialize(
                &c,
                &format!(
                    r#"{{
                        "name": "t",
                        "constraintTypes": {{ "k": {{ "attributes": {{ "x": "Int" }} }} }},
                        "constraints": {{ "k0": {{ "type": "k", "attributes": {{ "x": {} }} }} }}
                    }}"#,
                    value
                ),
            )
            .unwrap_err();
            assert!(
                matches!(e, SerializationError::UnsupportedValue { ref attribute, .. } if attribute == "x"),
                "{}",
                e
            );
        }
    }

    #[test]
    fn malformed_json() {
        let c = Context::new();
        assert!(matches!(
            deserialize(&c, "{ \"name\": "),
            Err(SerializationError::Json(_))
        ));
        assert!(matches!(
            deserialize(&c, r#"{ "name": "t", "wires": {} }"#),
            Err(SerializationError::Json(_))
        ));
    }
}
