use xmlrpc_codegen::generate::{generate_signature, Direction, GenOptions};
use xmlrpc_codegen::path_de::signatures_from_str;
use xmlrpc_codegen::NameAllocator;

const INVENTORY: &str = r#"{
    "name": "ListWidgets",
    "params": [
        {"name": "filter", "shape": {"kind": "struct", "fields": [
            {"name": "Owner", "shape": {"kind": "string"}},
            {"name": "Active", "shape": {"kind": "bool"}},
            {"name": "Ids", "shape": {"kind": "list", "elem": {"kind": "int", "bits": 64, "unsigned": true}}}
        ]}}
    ],
    "results": [
        {"name": "widgets", "shape": {"kind": "list", "elem": {"kind": "struct", "fields": [
            {"name": "Id", "shape": {"kind": "int", "bits": 64, "unsigned": true}},
            {"name": "Name", "shape": {"kind": "string"}}
        ]}}},
        {"name": "failure", "shape": {"kind": "named", "name": "error"}}
    ]
}"#;

fn generate() -> xmlrpc_codegen::generate::GeneratedSignature {
    let sigs = signatures_from_str(INVENTORY).unwrap();
    let opts = GenOptions {
        source: "params".into(),
        target: "response".into(),
        error_var: "err".into(),
    };
    generate_signature(&sigs[0], &opts, &NameAllocator::new()).unwrap()
}

#[test]
fn nested_struct_param_decodes_every_field() {
    let out = generate();
    let filter = &out.fragments[0];
    assert_eq!(filter.direction, Direction::Decode);
    assert_eq!(filter.type_label, "struct{Owner string; Active bool; Ids []uint64}");
    let code = &filter.code;
    assert!(code.starts_with("filter := struct{Owner string; Active bool; Ids []uint64}{}\n"));
    assert!(code.contains("range params.FindElements(\"struct/member\")"));
    for case in ["case \"Owner\":", "case \"Active\":", "case \"Ids\":"] {
        assert!(code.contains(case), "missing {case}");
    }
    assert!(code.contains("xmlrpc.XPathValueGetInt("));
    assert!(code.contains(" := uint64(raw_"));
    assert!(!code.contains("XPathValueGetUint64"));
    assert!(code.contains("FindElements(\"array/data/value\")"));
}

#[test]
fn list_of_structs_result_encodes_members_per_item() {
    let out = generate();
    let widgets = &out.fragments[1];
    assert_eq!(widgets.direction, Direction::Encode);
    let code = &widgets.code;
    assert!(code.contains("response.CreateElement(\"array\").CreateElement(\"data\")"));
    assert!(code.contains("range widgets {"));
    let id = code.find("SetText(\"Id\")").unwrap();
    let name = code.find("SetText(\"Name\")").unwrap();
    assert!(id < name);
    assert!(code.contains("strconv.FormatUint(uint64("));
}

#[test]
fn failure_result_becomes_fault_envelope() {
    let out = generate();
    let failure = &out.fragments[2];
    assert_eq!(failure.field, "failure");
    assert_eq!(failure.type_label, "error");
    assert!(failure.code.contains(":= response.CreateElement(\"fault\")"));
    assert!(failure.code.contains(".SetText(failure.Error())"));
}

#[test]
fn rendered_source_lists_fragments_in_order() {
    let src = generate().to_source();
    let headers: Vec<&str> = src.lines().filter(|l| l.starts_with("// ListWidgets:")).collect();
    assert_eq!(
        headers,
        [
            "// ListWidgets: decode filter (struct{Owner string; Active bool; Ids []uint64})",
            "// ListWidgets: encode widgets ([]struct{Id uint64; Name string})",
            "// ListWidgets: encode failure (error)",
        ]
    );
}
