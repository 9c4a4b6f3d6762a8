// Shape descriptions fed to the resolver. Opaque input: produced by whatever
// type-introspection front end sits in front of us (here: JSON signature files).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Int {
        #[serde(default)]
        bits: u8,                // 0 = platform width
        #[serde(default)]
        unsigned: bool,
    },
    String,
    Bool,
    Float {
        #[serde(default)]
        bits: u8,                // never supported, kept so the error names it
    },
    Struct {
        #[serde(default)]
        fields: Vec<Field>,      // declaration order
    },
    List {
        elem: Box<Shape>,
    },
    Array {
        len: u64,                // raw fixed-size array, rejected by resolve
        elem: Box<Shape>,
    },
    Named {
        name: String,            // only `error` resolves
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
}

/// Exact type identity of the failure marker.
pub const ERROR_TYPE_NAME: &str = "error";

/// Integer bit widths accepted by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    Platform,
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Platform),
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    /// `None` for the platform width, which renders without a suffix.
    pub fn bits(self) -> Option<u8> {
        match self {
            Self::Platform => None,
            Self::W8 => Some(8),
            Self::W16 => Some(16),
            Self::W32 => Some(32),
            Self::W64 => Some(64),
        }
    }
}

/// One RPC method as seen by the driver: params come in off the wire, results go out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub results: Vec<Field>,
}

/// A signature file holds either a single signature or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignatureFile {
    One(Signature),
    Many(Vec<Signature>),
}

impl SignatureFile {
    pub fn into_vec(self) -> Vec<Signature> {
        match self {
            Self::One(sig) => vec![sig],
            Self::Many(sigs) => sigs,
        }
    }
}

impl Shape {
    pub fn int(bits: u8) -> Self { Shape::Int { bits, unsigned: false } }
    pub fn uint(bits: u8) -> Self { Shape::Int { bits, unsigned: true } }
    pub fn list(elem: Shape) -> Self { Shape::List { elem: Box::new(elem) } }
    pub fn error() -> Self { Shape::Named { name: ERROR_TYPE_NAME.to_string() } }

    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Shape)>,
        S: Into<String>,
    {
        Shape::Struct {
            fields: fields
                .into_iter()
                .map(|(name, shape)| Field { name: name.into(), shape })
                .collect(),
        }
    }

    /// Nesting depth: leaves are 1, each struct/list level adds one.
    /// An empty struct counts as a single level.
    pub fn depth(&self) -> usize {
        match self {
            Shape::Struct { fields } => {
                1 + fields.iter().map(|f| f.shape.depth()).max().unwrap_or(0)
            }
            Shape::List { elem } | Shape::Array { elem, .. } => 1 + elem.depth(),
            _ => 1,
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self { name: name.into(), shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_defaults_to_platform_signed() {
        let shape: Shape = serde_json::from_str(r#"{"kind":"int"}"#).unwrap();
        assert_eq!(shape, Shape::Int { bits: 0, unsigned: false });
    }

    #[test]
    fn struct_keeps_declaration_order() {
        let shape: Shape = serde_json::from_str(
            r#"{"kind":"struct","fields":[
                {"name":"C","shape":{"kind":"bool"}},
                {"name":"A","shape":{"kind":"string"}},
                {"name":"B","shape":{"kind":"int","bits":8}}
            ]}"#,
        ).unwrap();
        let Shape::Struct { fields } = shape else { panic!("expected struct") };
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn signature_file_accepts_one_or_many() {
        let one: SignatureFile = serde_json::from_str(r#"{"name":"Ping"}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);
        let many: SignatureFile =
            serde_json::from_str(r#"[{"name":"Ping"},{"name":"Pong"}]"#).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn depth_counts_nesting_levels() {
        assert_eq!(Shape::Bool.depth(), 1);
        assert_eq!(Shape::list(Shape::int(0)).depth(), 2);
        let nested = Shape::structure([("Items", Shape::list(Shape::structure([("X", Shape::Bool)])))]);
        assert_eq!(nested.depth(), 4);
        assert_eq!(Shape::Struct { fields: vec![] }.depth(), 1);
    }

    #[test]
    fn width_rejects_odd_sizes() {
        assert_eq!(IntWidth::from_bits(0), Some(IntWidth::Platform));
        assert_eq!(IntWidth::from_bits(32).and_then(IntWidth::bits), Some(32));
        assert_eq!(IntWidth::from_bits(24), None);
    }
}
