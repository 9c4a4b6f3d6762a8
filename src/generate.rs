//! Thin driver over the resolver: a whole signature in, labelled fragments out.
use crate::codec::CodecNode;
use crate::error::{CodegenError, Result};
use crate::ir::{Field, Signature};
use crate::names::NameAllocator;
use crate::resolve::resolve;

/// Names the emitted fragments assume are in scope.
#[derive(Debug, Clone)]
pub struct GenOptions {
    /// Wire element params are decoded from.
    pub source: String,
    /// Wire element results are encoded into.
    pub target: String,
    /// Error variable of the enclosing generated function.
    pub error_var: String,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            source: "element".to_string(),
            target: "element".to_string(),
            error_var: "err".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decode,
    Encode,
}

#[derive(Debug, Clone)]
pub struct Fragment {
    pub direction: Direction,
    pub field: String,
    pub type_label: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedSignature {
    pub name: String,
    pub fragments: Vec<Fragment>,
}

impl GeneratedSignature {
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for frag in &self.fragments {
            let verb = match frag.direction {
                Direction::Decode => "decode",
                Direction::Encode => "encode",
            };
            out.push_str(&format!("// {}: {verb} {} ({})\n", self.name, frag.field, frag.type_label));
            if !frag.code.is_empty() {
                out.push_str(&frag.code);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

/// Decode fragment for one named value.
pub fn decode_field(field: &Field, opts: &GenOptions, names: &NameAllocator) -> Result<Fragment> {
    let node = resolve(&field.shape, &field.name)?;
    let code = node.emit_decode(names, &opts.source, &field.name, &opts.error_var)?;
    Ok(fragment(Direction::Decode, field, &node, code))
}

/// Encode fragment for one named value.
pub fn encode_field(field: &Field, opts: &GenOptions, names: &NameAllocator) -> Result<Fragment> {
    let node = resolve(&field.shape, &field.name)?;
    let code = node.emit_encode(names, &opts.target, &field.name, &opts.error_var)?;
    Ok(fragment(Direction::Encode, field, &node, code))
}

/// Params are decoded, results encoded, both in declaration order.
/// The first failure aborts the signature and names it.
pub fn generate_signature(
    sig: &Signature,
    opts: &GenOptions,
    names: &NameAllocator,
) -> Result<GeneratedSignature> {
    let build = || -> Result<Vec<Fragment>> {
        let mut fragments = Vec::with_capacity(sig.params.len() + sig.results.len());
        for param in &sig.params {
            fragments.push(decode_field(param, opts, names)?);
        }
        for res in &sig.results {
            fragments.push(encode_field(res, opts, names)?);
        }
        Ok(fragments)
    };
    let fragments = build().map_err(|e: CodegenError| e.in_signature(&sig.name))?;
    tracing::debug!(signature = %sig.name, fragments = fragments.len(), "generated");
    Ok(GeneratedSignature { name: sig.name.clone(), fragments })
}

fn fragment(direction: Direction, field: &Field, node: &CodecNode, code: String) -> Fragment {
    Fragment {
        direction,
        field: field.name.clone(),
        type_label: node.type_label(),
        code,
    }
}
