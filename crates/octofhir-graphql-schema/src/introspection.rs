//! Serde mirror of the introspection wire format
//!
//! The payload shape follows the standard reflection result: a schema
//! object with root type references, a `types` list, and a `directives`
//! list. Every struct here is permissive - required members are validated
//! by [`build_client_schema`](crate::build_client_schema) so shape problems
//! surface as structured errors with payload paths rather than serde
//! failures.

use octofhir_graphql_ast::ValueNode;
use serde::{Deserialize, Serialize};

/// The schema object of an introspection result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<IntrospectionNamedTypeRef>,
    pub mutation_type: Option<IntrospectionNamedTypeRef>,
    pub subscription_type: Option<IntrospectionNamedTypeRef>,
    #[serde(default)]
    pub types: Vec<IntrospectionType>,
    #[serde(default)]
    pub directives: Vec<IntrospectionDirective>,
}

/// A root type reference, carrying only the type name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionNamedTypeRef {
    pub name: String,
}

impl IntrospectionNamedTypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One entry of the `types` list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    pub kind: String,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present for OBJECT and INTERFACE kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IntrospectionField>>,
    /// Present for the OBJECT kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<IntrospectionTypeRef>>,
    /// Present for INTERFACE and UNION kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_types: Option<Vec<IntrospectionTypeRef>>,
    /// Present for the ENUM kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<IntrospectionEnumValue>>,
    /// Present for the INPUT_OBJECT kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_fields: Option<Vec<IntrospectionInputValue>>,
}

/// A type reference: a chain of LIST/NON_NULL wrappers ending in a name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRef {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<IntrospectionTypeRef>>,
}

impl IntrospectionTypeRef {
    /// A named reference
    pub fn named(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// A wrapper reference
    pub fn wrapper(kind: impl Into<String>, of_type: IntrospectionTypeRef) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }
}

/// One field of an OBJECT or INTERFACE entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub ty: IntrospectionTypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// An argument or input-object field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: IntrospectionTypeRef,
    /// A GraphQL literal rendering of the declared default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One value of an ENUM entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// One entry of the `directives` list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionDirective {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(default)]
    pub is_repeatable: bool,
}

/// Read a GraphQL value literal from its textual rendering
///
/// Default values travel through introspection as literal text. This reads
/// the scalar shapes plus bracketed lists and objects of those; it returns
/// `None` on anything it cannot read, and the caller keeps the raw text.
pub fn read_value_literal(input: &str) -> Option<ValueNode> {
    let mut reader = LiteralReader { input, pos: 0 };
    reader.skip_ws();
    let value = reader.read_value()?;
    reader.skip_ws();
    reader.at_end().then_some(value)
}

struct LiteralReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralReader<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace() || ch == ',') {
            self.bump();
        }
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn read_value(&mut self) -> Option<ValueNode> {
        match self.peek()? {
            '"' => self.read_string(),
            '[' => self.read_list(),
            '{' => self.read_object(),
            '$' => {
                self.bump();
                let name = self.read_name()?;
                Some(ValueNode::Variable(name))
            }
            ch if ch == '-' || ch.is_ascii_digit() => self.read_number(),
            _ => {
                let name = self.read_name()?;
                Some(match name.as_str() {
                    "null" => ValueNode::Null,
                    "true" => ValueNode::Boolean(true),
                    "false" => ValueNode::Boolean(false),
                    _ => ValueNode::Enum(name),
                })
            }
        }
    }

    fn read_name(&mut self) -> Option<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.bump();
        }
        (self.pos > start).then(|| self.input[start..self.pos].to_string())
    }

    fn read_number(&mut self) -> Option<ValueNode> {
        let start = self.pos;
        self.eat('-');
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.input[start..self.pos];
        if is_float {
            text.parse().ok().map(ValueNode::Float)
        } else {
            text.parse().ok().map(ValueNode::Int)
        }
    }

    fn read_string(&mut self) -> Option<ValueNode> {
        self.eat('"');
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(ValueNode::String(out)),
                '\\' => match self.bump()? {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    other => out.push(other),
                },
                ch => out.push(ch),
            }
        }
    }

    fn read_list(&mut self) -> Option<ValueNode> {
        self.eat('[');
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(']') {
                return Some(ValueNode::List(items));
            }
            items.push(self.read_value()?);
        }
    }

    fn read_object(&mut self) -> Option<ValueNode> {
        self.eat('{');
        let mut fields = Vec::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                return Some(ValueNode::Object(fields));
            }
            let name = self.read_name()?;
            self.skip_ws();
            if !self.eat(':') {
                return None;
            }
            self.skip_ws();
            let value = self.read_value()?;
            fields.push(octofhir_graphql_ast::ObjectFieldNode::new(name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalar_literals() {
        assert_eq!(read_value_literal("null"), Some(ValueNode::Null));
        assert_eq!(read_value_literal("true"), Some(ValueNode::Boolean(true)));
        assert_eq!(read_value_literal("42"), Some(ValueNode::Int(42)));
        assert_eq!(read_value_literal("-1.5"), Some(ValueNode::Float(-1.5)));
        assert_eq!(
            read_value_literal("\"hi\\nthere\""),
            Some(ValueNode::string("hi\nthere"))
        );
        assert_eq!(read_value_literal("NORTH"), Some(ValueNode::enum_value("NORTH")));
    }

    #[test]
    fn test_read_compound_literals() {
        assert_eq!(
            read_value_literal("[1, 2, 3]"),
            Some(ValueNode::List(vec![
                ValueNode::Int(1),
                ValueNode::Int(2),
                ValueNode::Int(3)
            ]))
        );
        assert_eq!(
            read_value_literal("{x: 1, y: [true]}"),
            Some(ValueNode::object([
                ("x", ValueNode::Int(1)),
                ("y", ValueNode::List(vec![ValueNode::Boolean(true)])),
            ]))
        );
    }

    #[test]
    fn test_read_rejects_trailing_garbage() {
        assert_eq!(read_value_literal("1 2"), None);
        assert_eq!(read_value_literal("[1"), None);
    }

    #[test]
    fn test_payload_round_trips_through_serde() {
        let payload = serde_json::json!({
            "queryType": {"name": "Query"},
            "types": [
                {"kind": "OBJECT", "name": "Query", "fields": [], "interfaces": []}
            ],
            "directives": []
        });
        let schema: IntrospectionSchema = serde_json::from_value(payload).unwrap();
        assert_eq!(schema.query_type.unwrap().name, "Query");
        assert_eq!(schema.types.len(), 1);
    }
}
