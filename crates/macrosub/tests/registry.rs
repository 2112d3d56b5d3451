//! Tests for the macro registry: registration, removal, key validation,
//! environment merging, and nonce semantics for dynamic values.

use std::sync::{Arc, Mutex};

use macrosub::{
    ChatMetadata, EvalContext, MacroEngine, MacroEnv, MacroValue, RegistryError, macro_env,
};

fn expand(engine: &MacroEngine, env: &mut MacroEnv, content: &str) -> String {
    let mut metadata = ChatMetadata::default();
    let mut ctx = EvalContext::new(&[], &mut metadata, "test-chat");
    engine.evaluate(content, env, &mut ctx)
}

// === Registration and Substitution ===

#[test]
fn registered_static_macro_substitutes() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("genre", "fantasy").unwrap();

    let mut env = MacroEnv::new();
    assert_eq!(
        expand(&engine, &mut env, "a {{genre}} story"),
        "a fantasy story"
    );
}

#[test]
fn registered_macro_matches_case_insensitively() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("genre", "fantasy").unwrap();

    let mut env = MacroEnv::new();
    assert_eq!(
        expand(&engine, &mut env, "{{GENRE}} and {{Genre}}"),
        "fantasy and fantasy"
    );
}

#[test]
fn registered_dynamic_macro_is_invoked() {
    let mut engine = MacroEngine::new();
    engine
        .registry_mut()
        .register("counter", MacroValue::dynamic(|_| "called".to_string()))
        .unwrap();

    let mut env = MacroEnv::new();
    assert_eq!(expand(&engine, &mut env, "{{counter}}"), "called");
}

#[test]
fn registered_name_is_trimmed() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("  padded  ", "value").unwrap();

    assert!(engine.registry().get("padded").is_some());
    let mut env = MacroEnv::new();
    assert_eq!(expand(&engine, &mut env, "{{padded}}"), "value");
}

#[test]
fn reregistering_overwrites() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("foo", "first").unwrap();
    engine.registry_mut().register("foo", "second").unwrap();

    assert_eq!(engine.registry().len(), 1);
    let mut env = MacroEnv::new();
    assert_eq!(expand(&engine, &mut env, "{{foo}}"), "second");
}

// === Key Validation ===

#[test]
fn register_rejects_empty_and_whitespace_names() {
    let mut engine = MacroEngine::new();
    assert_eq!(
        engine.registry_mut().register("", "x"),
        Err(RegistryError::EmptyKey)
    );
    assert_eq!(
        engine.registry_mut().register("   ", "x"),
        Err(RegistryError::EmptyKey)
    );
}

#[test]
fn register_rejects_names_with_braces() {
    let mut engine = MacroEngine::new();
    let err = engine.registry_mut().register("{{foo}}", "x").unwrap_err();
    assert!(matches!(err, RegistryError::KeyContainsBraces { .. }));

    let err = engine.registry_mut().register("foo}}", "x").unwrap_err();
    assert!(matches!(err, RegistryError::KeyContainsBraces { .. }));
}

#[test]
fn unregister_rejects_invalid_names() {
    let mut engine = MacroEngine::new();
    assert_eq!(
        engine.registry_mut().unregister(""),
        Err(RegistryError::EmptyKey)
    );
}

// === Removal ===

#[test]
fn unregister_removes_entry() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("foo", "bar").unwrap();
    engine.registry_mut().unregister("foo").unwrap();

    assert!(engine.registry().is_empty());
    let mut env = MacroEnv::new();
    assert_eq!(expand(&engine, &mut env, "{{foo}}"), "{{foo}}");
}

#[test]
fn unregister_absent_name_is_a_noop() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("keep", "me").unwrap();

    engine.registry_mut().unregister("never-registered").unwrap();
    assert_eq!(engine.registry().len(), 1);
}

// === Environment Merge Precedence ===

#[test]
fn registered_macro_shadows_env_entry() {
    // Registered macros win over same-named call-site entries by design.
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("foo", "B").unwrap();

    let mut env = macro_env! { "foo" => "A" };
    assert_eq!(expand(&engine, &mut env, "{{foo}}"), "B");
}

#[test]
fn env_entry_without_registered_shadow_survives() {
    let mut engine = MacroEngine::new();
    engine.registry_mut().register("other", "X").unwrap();

    let mut env = macro_env! { "foo" => "A" };
    assert_eq!(expand(&engine, &mut env, "{{foo}}{{other}}"), "AX");
}

// === Nonce Semantics ===

#[test]
fn dynamic_values_share_one_nonce_per_evaluation() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    let mut engine = MacroEngine::new();
    engine
        .registry_mut()
        .register(
            "n",
            MacroValue::dynamic(move |nonce| {
                log.lock().unwrap().push(nonce.to_string());
                "x".to_string()
            }),
        )
        .unwrap();

    let mut env = MacroEnv::new();
    expand(&engine, &mut env, "{{n}} {{n}}");
    expand(&engine, &mut env, "{{n}}");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    // Both occurrences in the first call observe the same nonce.
    assert_eq!(seen[0], seen[1]);
    // A separate evaluation call gets a fresh nonce.
    assert_ne!(seen[0], seen[2]);
}
