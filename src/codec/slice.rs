//! Homogeneous lists: `array/data/value` on the wire, Go slices in code.
use super::CodecNode;
use crate::error::RenderError;
use crate::names::NameAllocator;
use crate::render::{render, Bindings};

const DECODE: &str = r#"
    {{Result}} := {{Type}}{}
    for _, {{Item}} := range {{Source}}.FindElements("array/data/value") {
        {{Decode}}
        {{Result}} = append({{Result}}, {{Elem}})
    }
"#;

const ENCODE: &str = r#"
    {{Data}} := {{Target}}.CreateElement("array").CreateElement("data")
    for _, {{Item}} := range {{Value}} {
        {{ValueElem}} := {{Data}}.CreateElement("value")
        {{Encode}}
    }
"#;

/// Appends in document order; a failing element aborts the whole list.
pub fn decode(
    ty: &str,
    elem: &CodecNode,
    names: &NameAllocator,
    source: &str,
    result: &str,
    err: &str,
) -> Result<String, RenderError> {
    let item = names.fresh("member");
    let elem_var = names.fresh("value");
    let decode = elem.emit_decode(names, &item, &elem_var, err)?;

    render(
        DECODE,
        &Bindings::new()
            .set("Result", result)
            .set("Type", ty)
            .set("Item", item)
            .set("Source", source)
            .set("Decode", decode)
            .set("Elem", elem_var),
    )
}

pub fn encode(
    elem: &CodecNode,
    names: &NameAllocator,
    target: &str,
    value: &str,
    err: &str,
) -> Result<String, RenderError> {
    let data = names.fresh("array_data");
    let item = names.fresh("item");
    let value_elem = names.fresh("value");
    let encode = elem.emit_encode(names, &value_elem, &item, err)?;

    render(
        ENCODE,
        &Bindings::new()
            .set("Data", data)
            .set("Target", target)
            .set("Item", item)
            .set("Value", value)
            .set("ValueElem", value_elem)
            .set("Encode", encode),
    )
}
