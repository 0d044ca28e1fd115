//! Swagger 2.0 object model.
//!
//! Only the parts the reader produces are modelled; anything else a document
//! needs goes into the `vendor_extensions` maps, which are flattened into the
//! owning object when serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub type Extensions = BTreeMap<String, Value>;

/// One security requirement: scheme name to required scopes
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    pub swagger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecuritySchemeDefinition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub vendor_extensions: Extensions,
}

impl Default for Swagger {
    fn default() -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: None,
            host: None,
            base_path: None,
            schemes: Vec::new(),
            tags: Vec::new(),
            paths: BTreeMap::new(),
            security_definitions: BTreeMap::new(),
            definitions: BTreeMap::new(),
            vendor_extensions: Extensions::new(),
        }
    }
}

impl Swagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operation registered for `method` at `path`, if any
    pub fn operation(&self, path: &str, method: &http::Method) -> Option<&Operation> {
        self.paths.get(path)?.get(method)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Whether Swagger 2.0 has an operation slot for `method`
    pub fn supports(method: &http::Method) -> bool {
        use http::Method;
        matches!(
            *method,
            Method::GET
                | Method::PUT
                | Method::POST
                | Method::DELETE
                | Method::OPTIONS
                | Method::HEAD
                | Method::PATCH
        )
    }

    fn slot_mut(&mut self, method: &http::Method) -> Option<&mut Option<Operation>> {
        use http::Method;
        Some(match *method {
            Method::GET => &mut self.get,
            Method::PUT => &mut self.put,
            Method::POST => &mut self.post,
            Method::DELETE => &mut self.delete,
            Method::OPTIONS => &mut self.options,
            Method::HEAD => &mut self.head,
            Method::PATCH => &mut self.patch,
            _ => return None,
        })
    }

    pub fn get(&self, method: &http::Method) -> Option<&Operation> {
        use http::Method;
        match *method {
            Method::GET => self.get.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            Method::HEAD => self.head.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            _ => None,
        }
    }

    /// Store `operation` under `method`, returning the operation it replaced.
    ///
    /// Methods Swagger 2.0 cannot express (e.g. `TRACE`) are handed back as
    /// `Err` unchanged.
    pub fn set(
        &mut self,
        method: &http::Method,
        operation: Operation,
    ) -> Result<Option<Operation>, Operation> {
        match self.slot_mut(method) {
            Some(slot) => Ok(slot.replace(operation)),
            None => Err(operation),
        }
    }

    /// All operations with their method, in Swagger's declaration order
    pub fn operations(&self) -> impl Iterator<Item = (http::Method, &Operation)> {
        use http::Method;
        [
            (Method::GET, &self.get),
            (Method::PUT, &self.put),
            (Method::POST, &self.post),
            (Method::DELETE, &self.delete),
            (Method::OPTIONS, &self.options),
            (Method::HEAD, &self.head),
            (Method::PATCH, &self.patch),
        ]
        .into_iter()
        .filter_map(|(m, op)| op.as_ref().map(|op| (m, op)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(flatten)]
    pub vendor_extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
    #[serde(flatten)]
    pub vendor_extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "type")]
    pub header_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Header {
    pub fn string() -> Self {
        Self {
            header_type: "string".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecuritySchemeDefinition {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub vendor_extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_empty_swagger_serializes_minimal() {
        assert_eq!(
            serde_json::to_value(Swagger::new()).unwrap(),
            json!({"swagger": "2.0", "paths": {}})
        );
    }

    #[test]
    fn test_vendor_extensions_are_flattened() {
        let mut op = Operation::default();
        op.vendor_extensions
            .insert("x-amazon-apigateway-integration".into(), json!({"type": "aws_proxy"}));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["x-amazon-apigateway-integration"]["type"], "aws_proxy");
        assert_eq!(value["responses"], json!({}));
    }

    #[test]
    fn test_path_item_set_and_replace() {
        let mut item = PathItem::default();
        let first = Operation {
            summary: Some("a".into()),
            ..Default::default()
        };
        assert_eq!(item.set(&Method::GET, first.clone()), Ok(None));
        assert_eq!(item.set(&Method::GET, Operation::default()), Ok(Some(first)));
        assert!(item.set(&Method::TRACE, Operation::default()).is_err());
        assert_eq!(item.operations().count(), 1);
    }
}
