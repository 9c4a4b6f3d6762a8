//! Codec nodes: one per shape occurrence, each able to emit a decode fragment
//! (wire document → Go value) and an encode fragment (Go value → wire document).
//!
//! Composition is explicit. A container renders its children's fragments first
//! and splices the text into its own template; nothing calls back into a node
//! while a template is being rendered.
//!
//! Every decode fragment follows one failure convention: assign the error
//! variable and `return` from the enclosing generated function.
pub mod failure;
pub mod scalar;
pub mod slice;
pub mod structure;

use serde_json::{json, Value};

use crate::error::RenderError;
use crate::ir::IntWidth;
use crate::label;
use crate::names::NameAllocator;

/// Name every failure node answers to, whatever it was declared as.
pub const FAILURE_NAME: &str = "err";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecNode {
    Bool { name: String },
    Int { name: String, width: IntWidth, unsigned: bool },
    String { name: String },
    Struct { name: String, fields: Vec<CodecNode> },
    Slice { name: String, elem: Box<CodecNode> },
    /// `field` is the declared name, kept for struct labels and member access.
    Failure { field: String },
}

impl CodecNode {
    pub fn name(&self) -> &str {
        match self {
            CodecNode::Bool { name }
            | CodecNode::Int { name, .. }
            | CodecNode::String { name }
            | CodecNode::Struct { name, .. }
            | CodecNode::Slice { name, .. } => name,
            CodecNode::Failure { .. } => FAILURE_NAME,
        }
    }

    /// Name as declared in the enclosing struct. Only differs from `name()` for failures.
    pub fn field_name(&self) -> &str {
        match self {
            CodecNode::Failure { field } => field,
            _ => self.name(),
        }
    }

    /// Failure values are never read off the wire.
    pub fn is_decodable(&self) -> bool {
        !matches!(self, CodecNode::Failure { .. })
    }

    pub fn type_label(&self) -> String {
        match self {
            CodecNode::Bool { .. } => label::BOOL.to_string(),
            CodecNode::Int { width, unsigned, .. } => label::int(*width, *unsigned),
            CodecNode::String { .. } => label::STRING.to_string(),
            CodecNode::Struct { fields, .. } => {
                label::structure(fields.iter().map(|f| (f.field_name(), f.type_label())))
            }
            CodecNode::Slice { elem, .. } => label::slice(&elem.type_label()),
            CodecNode::Failure { .. } => label::ERROR.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CodecNode::Bool { .. } => "bool",
            CodecNode::Int { .. } => "int",
            CodecNode::String { .. } => "string",
            CodecNode::Struct { .. } => "struct",
            CodecNode::Slice { .. } => "slice",
            CodecNode::Failure { .. } => "failure",
        }
    }

    /// Struct fields in declaration order; the single element codec for a slice.
    pub fn children(&self) -> &[CodecNode] {
        match self {
            CodecNode::Struct { fields, .. } => fields,
            CodecNode::Slice { elem, .. } => std::slice::from_ref(elem.as_ref()),
            _ => &[],
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(CodecNode::depth).max().unwrap_or(0)
    }

    /// Fragment that declares `result` from the wire node named by `source`.
    /// `err` must be an error variable already in scope.
    pub fn emit_decode(
        &self,
        names: &NameAllocator,
        source: &str,
        result: &str,
        err: &str,
    ) -> Result<String, RenderError> {
        tracing::debug!(node = self.name(), kind = self.kind(), source, result, "emit decode");
        match self {
            CodecNode::Bool { .. } | CodecNode::Int { .. } | CodecNode::String { .. } => {
                scalar::decode(self, names, source, result, err)
            }
            CodecNode::Struct { fields, .. } => {
                structure::decode(&self.type_label(), fields, names, source, result, err)
            }
            CodecNode::Slice { elem, .. } => {
                slice::decode(&self.type_label(), elem, names, source, result, err)
            }
            CodecNode::Failure { .. } => Ok(failure::decode()),
        }
    }

    /// Fragment that appends the wire form of `value` as a child of `target`.
    pub fn emit_encode(
        &self,
        names: &NameAllocator,
        target: &str,
        value: &str,
        err: &str,
    ) -> Result<String, RenderError> {
        tracing::debug!(node = self.name(), kind = self.kind(), target, value, "emit encode");
        match self {
            CodecNode::Bool { .. } => scalar::encode_bool(names, target, value),
            CodecNode::Int { unsigned, .. } => scalar::encode_int(*unsigned, target, value),
            CodecNode::String { .. } => scalar::encode_string(target, value),
            CodecNode::Struct { fields, .. } => structure::encode(fields, names, target, value, err),
            CodecNode::Slice { elem, .. } => slice::encode(elem, names, target, value, err),
            CodecNode::Failure { .. } => failure::encode(names, target, value),
        }
    }

    /// Debug view of the tree: name, kind, Go type and children.
    pub fn describe(&self) -> Value {
        let mut o = json!({
            "name": self.name(),
            "kind": self.kind(),
            "type": self.type_label(),
        });
        let children = self.children();
        if !children.is_empty() {
            o["children"] = Value::Array(children.iter().map(CodecNode::describe).collect());
        }
        o
    }
}
