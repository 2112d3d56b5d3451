use macrosub::{MacroValue, macro_env};

#[test]
fn empty_env() {
    let env = macro_env! {};
    assert!(env.is_empty());
}

#[test]
fn single_entry() {
    let env = macro_env! { "user" => "Alice" };
    assert_eq!(env.len(), 1);
    assert_eq!(env.get("user").map(|v| v.resolve("")), Some("Alice".to_string()));
}

#[test]
fn multiple_entries() {
    let env = macro_env! {
        "user" => "Alice",
        "char" => "Stella",
        "group" => "The Party"
    };
    assert_eq!(env.len(), 3);
    assert!(env.contains("char"));
}

#[test]
fn trailing_comma() {
    let env = macro_env! {
        "a" => "1",
        "b" => "2",
    };
    assert_eq!(env.len(), 2);
}

#[test]
fn owned_string_value() {
    let name = String::from("Charlie");
    let env = macro_env! { "user" => name };
    assert_eq!(env.get("user").map(|v| v.resolve("")), Some("Charlie".to_string()));
}

#[test]
fn dynamic_value() {
    let env = macro_env! { "now" => MacroValue::dynamic(|_| "later".to_string()) };
    assert_eq!(env.get("now").map(|v| v.resolve("")), Some("later".to_string()));
}

#[test]
fn expression_keys() {
    let key = "dynamic_key";
    let env = macro_env! { key => "7" };
    assert!(env.contains("dynamic_key"));
}

#[test]
fn expression_values() {
    let total = format!("{}", 2 + 3);
    let env = macro_env! { "total" => total };
    assert_eq!(env.get("total").map(|v| v.resolve("")), Some("5".to_string()));
}
