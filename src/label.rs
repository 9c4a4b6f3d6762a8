//! Go type labels for generated declarations.
use crate::ir::IntWidth;

pub const BOOL: &str = "bool";
pub const INT: &str = "int";
pub const STRING: &str = "string";
pub const ERROR: &str = "error";

/// `int`, `uint`, `int32`, `uint64`, ... Platform width gets no suffix.
pub fn int(width: IntWidth, unsigned: bool) -> String {
    let mut out = String::from(if unsigned { "uint" } else { INT });
    if let Some(bits) = width.bits() {
        out.push_str(&bits.to_string());
    }
    out
}

/// Anonymous struct literal type, the way `go/types` prints it: `struct{A int; B string}`.
pub fn structure<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let body = fields
        .into_iter()
        .map(|(name, label)| format!("{name} {label}"))
        .collect::<Vec<_>>()
        .join("; ");
    format!("struct{{{body}}}")
}

pub fn slice(elem: &str) -> String {
    format!("[]{elem}")
}

/// Suffix of the `xmlrpc.XPathValueGet*` extractor for a scalar label.
pub fn extractor(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
