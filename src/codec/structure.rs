//! Struct codec: member list on the wire, one case per field on decode.
//!
//! Decode dispatches each wire member by exact name through a `switch`. Unknown
//! member names fall through silently, and a failing field leaves the fields
//! decoded before it assigned on the (discarded) partial result. `error` fields
//! get no case at all: failures are only ever encoded.
use super::CodecNode;
use crate::error::RenderError;
use crate::names::NameAllocator;
use crate::render::{render, Bindings};

const DECODE: &str = r#"
    {{Result}} := {{Type}}{}
    for _, {{Member}} := range {{Source}}.FindElements("struct/member") {
        {{NameElem}} := {{Member}}.FindElement("name")
        if {{NameElem}} == nil {
            {{Err}} = errors.New("xmlrpc: struct member without name")
            return
        }
        {{MemberName}} := {{NameElem}}.Text()

        {{ValueElem}} := {{Member}}.FindElement("value")
        if {{ValueElem}} == nil {
            {{Err}} = errors.New("xmlrpc: struct member without value")
            return
        }
        {{Unused}}

        switch {{MemberName}} {
        {{Cases}}
        }
    }
"#;

const DECODE_CASE: &str = r#"
    case "{{Field}}":
        {{Decode}}
        {{Result}}.{{Field}} = {{Temp}}
"#;

const ENCODE: &str = r#"
    {{Struct}} := {{Target}}.CreateElement("struct")
    {{Members}}
"#;

const ENCODE_MEMBER: &str = r#"
    {{Member}} := {{Struct}}.CreateElement("member")
    {{Member}}.CreateElement("name").SetText("{{Field}}")
    {{ValueElem}} := {{Member}}.CreateElement("value")
    {{FieldVar}} := {{Value}}.{{Field}}
    {{Encode}}
"#;

pub fn decode(
    ty: &str,
    fields: &[CodecNode],
    names: &NameAllocator,
    source: &str,
    result: &str,
    err: &str,
) -> Result<String, RenderError> {
    let member = names.fresh("member");
    let name_elem = names.fresh("name_elem");
    let member_name = names.fresh("name");
    let value_elem = names.fresh("value");

    let mut cases = Vec::with_capacity(fields.len());
    for field in fields.iter().filter(|f| f.is_decodable()) {
        let temp = names.fresh("");
        let decode = field.emit_decode(names, &value_elem, &temp, err)?;
        cases.push(render(
            DECODE_CASE,
            &Bindings::new()
                .set("Field", field.field_name())
                .set("Decode", decode)
                .set("Result", result)
                .set("Temp", temp.as_str()),
        )?);
    }

    // no case reads the value element
    let unused = if cases.is_empty() { format!("_ = {value_elem}") } else { String::new() };

    render(
        DECODE,
        &Bindings::new()
            .set("Result", result)
            .set("Type", ty)
            .set("Member", member)
            .set("Source", source)
            .set("NameElem", name_elem)
            .set("Err", err)
            .set("MemberName", member_name)
            .set("ValueElem", value_elem)
            .set("Unused", unused)
            .set("Cases", cases.join("\n")),
    )
}

pub fn encode(
    fields: &[CodecNode],
    names: &NameAllocator,
    target: &str,
    value: &str,
    err: &str,
) -> Result<String, RenderError> {
    let strukt = names.fresh("struct");

    let mut members = Vec::with_capacity(fields.len());
    for field in fields {
        let member = names.fresh("member");
        let value_elem = names.fresh("value");
        let field_var = names.fresh("struct_var");
        let encode = field.emit_encode(names, &value_elem, &field_var, err)?;
        members.push(render(
            ENCODE_MEMBER,
            &Bindings::new()
                .set("Member", member)
                .set("Struct", strukt.as_str())
                .set("Field", field.field_name())
                .set("ValueElem", value_elem)
                .set("FieldVar", field_var)
                .set("Value", value)
                .set("Encode", encode),
        )?);
    }
    // nested, `value` is a fresh binding the parent expects us to use
    if members.is_empty() {
        members.push(format!("_, _ = {strukt}, {value}"));
    }

    render(
        ENCODE,
        &Bindings::new()
            .set("Struct", strukt.as_str())
            .set("Target", target)
            .set("Members", members.join("\n\n")),
    )
}
