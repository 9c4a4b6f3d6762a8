//! Schema-driven XML-RPC codec generator.
//!
//! A [`ir::Shape`] is resolved into a tree of [`codec::CodecNode`]s, and each
//! node emits Go fragments that decode a wire document into a value of that
//! shape or encode such a value back into the document.
pub mod cli;
pub mod codec;
pub mod error;
pub mod generate;
pub mod ir;
pub mod label;
pub mod names;
pub mod path_de;
pub mod render;
pub mod resolve;

pub use codec::CodecNode;
pub use error::{CodegenError, RenderError, ResolveError, Result};
pub use generate::{generate_signature, GenOptions};
pub use ir::{Field, Shape, Signature};
pub use names::NameAllocator;
pub use resolve::resolve;
