//! The `error` result: never decoded, encoded as a fault envelope.
use crate::error::RenderError;
use crate::names::NameAllocator;
use crate::render::{render, Bindings};

/// Default `faultCode` when the error carries no code of its own.
pub const DEFAULT_FAULT_CODE: u32 = 500;

const ENCODE: &str = r#"
    {{Fault}} := {{Target}}.CreateElement("fault")

    {{Code}} := {{DefaultCode}}
    if {{Cast}}, {{Ok}} := {{Value}}.(xmlrpc.Error); {{Ok}} {
        {{Code}} = {{Cast}}.Code()
    }

    {{Struct}} := {{Fault}}.CreateElement("value").CreateElement("struct")

    {{CodeMember}} := {{Struct}}.CreateElement("member")
    {{CodeMember}}.CreateElement("name").SetText("faultCode")
    {{CodeMember}}.CreateElement("value").CreateElement("int").SetText(strconv.Itoa({{Code}}))

    {{StringMember}} := {{Struct}}.CreateElement("member")
    {{StringMember}}.CreateElement("name").SetText("faultString")
    {{StringMember}}.CreateElement("value").CreateElement("string").SetText({{Value}}.Error())
"#;

/// Failures only ever flow outward.
pub fn decode() -> String {
    String::new()
}

pub fn encode(names: &NameAllocator, target: &str, value: &str) -> Result<String, RenderError> {
    render(
        ENCODE,
        &Bindings::new()
            .set("Fault", names.fresh("fault"))
            .set("Target", target)
            .set("Code", names.fresh("code"))
            .set("DefaultCode", DEFAULT_FAULT_CODE.to_string())
            .set("Cast", names.fresh("coder"))
            .set("Ok", names.fresh("ok"))
            .set("Value", value)
            .set("Struct", names.fresh("struct"))
            .set("CodeMember", names.fresh("member"))
            .set("StringMember", names.fresh("member")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_empty() {
        assert!(decode().is_empty());
    }

    #[test]
    fn fault_defaults_to_500_then_code_then_string() {
        let names = NameAllocator::new();
        let out = encode(&names, "resp", "err").unwrap();
        assert!(out.starts_with("fault_0 := resp.CreateElement(\"fault\")"));
        assert!(out.contains("code_1 := 500\n"));
        assert!(out.contains("if coder_2, ok_3 := err.(xmlrpc.Error); ok_3 {\n    code_1 = coder_2.Code()\n}"));
        assert!(out.contains("struct_4 := fault_0.CreateElement(\"value\").CreateElement(\"struct\")"));
        let code = out.find("SetText(\"faultCode\")").unwrap();
        let string = out.find("SetText(\"faultString\")").unwrap();
        assert!(code < string);
        assert!(out.contains("member_5.CreateElement(\"value\").CreateElement(\"int\").SetText(strconv.Itoa(code_1))"));
        assert!(out.contains("member_6.CreateElement(\"value\").CreateElement(\"string\").SetText(err.Error())"));
    }
}
