//! Leaf codecs: bool, integers, string.
use super::CodecNode;
use crate::error::RenderError;
use crate::label;
use crate::names::NameAllocator;
use crate::render::{render, Bindings};

const DECODE: &str = r#"
    var {{Result}} {{Type}}
    if {{Result}}, {{Err}} = xmlrpc.XPathValueGet{{Extractor}}({{Source}}, "{{Name}}"); {{Err}} != nil {
        return
    }
"#;

// sized and unsigned integers go through the one `int` extractor, then convert
const DECODE_CONVERT: &str = r#"
    var {{Raw}} int
    if {{Raw}}, {{Err}} = xmlrpc.XPathValueGetInt({{Source}}, "{{Name}}"); {{Err}} != nil {
        return
    }
    {{Result}} := {{Type}}({{Raw}})
"#;

const ENCODE_BOOL: &str = r#"
    {{Temp}} := "0"
    if {{Value}} {
        {{Temp}} = "1"
    }
    {{Target}}.CreateElement("boolean").SetText({{Temp}})
"#;

const ENCODE_INT: &str = r#"
    {{Target}}.CreateElement("int").SetText(strconv.{{Format}}({{Cast}}({{Value}}), 10))
"#;

const ENCODE_STRING: &str = r#"
    {{Target}}.CreateElement("string").SetText({{Value}})
"#;

/// Extractors exist for `bool`, `string` and `int` only.
pub fn decode(
    node: &CodecNode,
    names: &NameAllocator,
    source: &str,
    result: &str,
    err: &str,
) -> Result<String, RenderError> {
    let ty = node.type_label();
    if matches!(node, CodecNode::Int { .. }) && ty != label::INT {
        return render(
            DECODE_CONVERT,
            &Bindings::new()
                .set("Raw", names.fresh("raw"))
                .set("Err", err)
                .set("Source", source)
                .set("Name", node.name())
                .set("Result", result)
                .set("Type", ty.as_str()),
        );
    }
    render(
        DECODE,
        &Bindings::new()
            .set("Result", result)
            .set("Type", ty.as_str())
            .set("Err", err)
            .set("Extractor", label::extractor(&ty))
            .set("Source", source)
            .set("Name", node.name()),
    )
}

pub fn encode_bool(names: &NameAllocator, target: &str, value: &str) -> Result<String, RenderError> {
    render(
        ENCODE_BOOL,
        &Bindings::new()
            .set("Temp", names.fresh("boolstr"))
            .set("Value", value)
            .set("Target", target),
    )
}

pub fn encode_int(unsigned: bool, target: &str, value: &str) -> Result<String, RenderError> {
    let (format, cast) = if unsigned { ("FormatUint", "uint64") } else { ("FormatInt", "int64") };
    render(
        ENCODE_INT,
        &Bindings::new()
            .set("Target", target)
            .set("Format", format)
            .set("Cast", cast)
            .set("Value", value),
    )
}

pub fn encode_string(target: &str, value: &str) -> Result<String, RenderError> {
    render(ENCODE_STRING, &Bindings::new().set("Target", target).set("Value", value))
}
