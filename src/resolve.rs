//! Shape → codec tree.
//!
//! One node per shape occurrence, built recursively. Unsupported shapes come
//! back as a `ResolveError`; whether that aborts the run is the caller's call.
use crate::codec::CodecNode;
use crate::error::ResolveError;
use crate::ir::{IntWidth, Shape, ERROR_TYPE_NAME};

pub fn resolve(shape: &Shape, name: &str) -> Result<CodecNode, ResolveError> {
    let node = match shape {
        Shape::Int { bits, unsigned } => {
            let width = IntWidth::from_bits(*bits)
                .ok_or_else(|| ResolveError::IntWidth { name: name.to_string(), bits: *bits })?;
            CodecNode::Int { name: name.to_string(), width, unsigned: *unsigned }
        }
        Shape::String => CodecNode::String { name: name.to_string() },
        Shape::Bool => CodecNode::Bool { name: name.to_string() },
        Shape::Float { bits } => {
            let ty = if *bits == 0 { "float".to_string() } else { format!("float{bits}") };
            return Err(ResolveError::Unsupported { name: name.to_string(), ty });
        }
        Shape::Struct { fields } => {
            let fields = fields
                .iter()
                .map(|f| resolve(&f.shape, &f.name))
                .collect::<Result<Vec<_>, _>>()?;
            CodecNode::Struct { name: name.to_string(), fields }
        }
        // the element has no name of its own and reuses the list's
        Shape::List { elem } => CodecNode::Slice {
            name: name.to_string(),
            elem: Box::new(resolve(elem, name)?),
        },
        Shape::Array { len, .. } => {
            return Err(ResolveError::FixedArray { name: name.to_string(), len: *len });
        }
        Shape::Named { name: ty } if ty == ERROR_TYPE_NAME => {
            CodecNode::Failure { field: name.to_string() }
        }
        Shape::Named { name: ty } => {
            return Err(ResolveError::NamedType { name: name.to_string(), ty: ty.clone() });
        }
    };
    tracing::debug!(name, kind = node.kind(), children = node.children().len(), "resolved");
    Ok(node)
}
