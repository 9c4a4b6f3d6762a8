use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Shapes the resolver refuses to build a codec for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Raw fixed-size arrays have no wire mapping; lists do.
    #[error("`{name}`: fixed-size array [{len}] is not supported, use a list")]
    FixedArray {
        /// Declared name of the offending value.
        name: String,
        /// Declared array length.
        len: u64,
    },
    /// Named/opaque types other than the failure marker.
    #[error("`{name}`: named type `{ty}` is not supported, use an inline definition")]
    NamedType {
        /// Declared name of the offending value.
        name: String,
        /// The named type.
        ty: String,
    },
    /// Integer width outside 0/8/16/32/64.
    #[error("`{name}`: unsupported integer width {bits}")]
    IntWidth {
        /// Declared name of the offending value.
        name: String,
        /// Declared width.
        bits: u8,
    },
    /// Any other basic kind.
    #[error("`{name}`: not supported param type `{ty}`")]
    Unsupported {
        /// Declared name of the offending value.
        name: String,
        /// Rendered type of the offending value.
        ty: String,
    },
}

/// Template rendering failures. These are bugs in a built-in template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("template placeholder `{{{{{0}}}}}` has no binding")]
    Unbound(String),
}

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("signature `{signature}`: {source}")]
    Signature {
        signature: String,
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    pub fn in_signature(self, signature: &str) -> Self {
        CodegenError::Signature { signature: signature.to_string(), source: Box::new(self) }
    }
}
