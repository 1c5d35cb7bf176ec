#![allow(dead_code)]

use sprite_lex::{Item, ItemType, tokenize};

pub fn lex(input: &str) -> Vec<Item> {
    tokenize(input).unwrap_or_else(|e| panic!("tokenize failed: {e}\n--- input ---\n{input}"))
}

pub fn kinds(input: &str) -> Vec<ItemType> {
    lex(input).iter().map(|i| i.kind).collect()
}

pub fn values(input: &str) -> Vec<String> {
    lex(input).into_iter().map(|i| i.value).collect()
}

/// Every non-error item must cover exactly its value in the input,
/// and positions must never go backwards.
pub fn assert_spans(input: &str, items: &[Item]) {
    let mut last = 0;
    for item in items {
        assert!(
            item.pos >= last,
            "position went backwards at {item:?}\n--- input ---\n{input}"
        );
        last = item.pos;
        if item.kind != ItemType::Error {
            assert_eq!(
                input.get(item.pos..item.pos + item.value.len()),
                Some(item.value.as_str()),
                "span mismatch for {item:?}"
            );
        }
    }
}
