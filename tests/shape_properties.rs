use std::collections::HashSet;

use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;

use xmlrpc_codegen::{resolve, Field, NameAllocator, Shape};

static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\bvar\s+(\w+)|(\w+)\s*:=)").unwrap());

fn supported_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (prop::sample::select(vec![0u8, 8, 16, 32, 64]), any::<bool>())
            .prop_map(|(bits, unsigned)| Shape::Int { bits, unsigned }),
        Just(Shape::String),
        Just(Shape::Bool),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Shape::list),
            prop::collection::vec(("[A-Z][a-z]{0,5}", inner), 0..4).prop_map(|fields| {
                Shape::Struct {
                    fields: fields.into_iter().map(|(name, shape)| Field::new(name, shape)).collect(),
                }
            }),
        ]
    })
}

fn declared(code: &str) -> Vec<String> {
    DECLARATION
        .captures_iter(code)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).map(|m| m.as_str().to_string()))
        .collect()
}

fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_digit()).collect()
}

proptest! {
    #[test]
    fn resolve_never_fails_and_mirrors_depth(shape in supported_shape()) {
        let node = resolve(&shape, "root").unwrap();
        prop_assert_eq!(node.depth(), shape.depth());
        let names = NameAllocator::new();
        node.emit_decode(&names, "element", "root", "err").unwrap();
        node.emit_encode(&names, "element", "root", "err").unwrap();
    }

    #[test]
    fn no_identifier_is_declared_twice(shape in supported_shape()) {
        let node = resolve(&shape, "root").unwrap();
        let names = NameAllocator::new();
        let mut code = node.emit_decode(&names, "element", "root", "err").unwrap();
        code.push('\n');
        code.push_str(&node.emit_encode(&names, "element", "root", "err").unwrap());
        let all = declared(&code);
        let unique: HashSet<_> = all.iter().collect();
        prop_assert_eq!(all.len(), unique.len(), "{}", code);
    }

    #[test]
    fn repeated_emission_differs_only_in_numbering(shape in supported_shape()) {
        let node = resolve(&shape, "root").unwrap();
        let names = NameAllocator::new();
        let a = node.emit_encode(&names, "element", "root", "err").unwrap();
        let b = node.emit_encode(&names, "element", "root", "err").unwrap();
        prop_assert_eq!(strip_digits(&a), strip_digits(&b));
    }
}
