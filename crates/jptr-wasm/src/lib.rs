//! WASM bindings for jptr-core.
//!
//! Exposes `get`, `add`, `replace`, and `remove` as `#[wasm_bindgen]`
//! functions. Documents and values cross the boundary as JSON strings and
//! results come back as compact JSON strings; any pointer or parse failure is
//! thrown as a JS error carrying the message.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jptr-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/jptr-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/jptr_wasm.wasm
//! # Rename .js → .cjs for ESM compatibility
//! mv packages/jptr-js/wasm/jptr_wasm.js packages/jptr-js/wasm/jptr_wasm.cjs
//! ```

use jptr_core::{JsonValue, Pointer};
use wasm_bindgen::prelude::*;

/// Value at `pointer` in `document`, as JSON.
#[wasm_bindgen]
pub fn get(document: &str, pointer: &str) -> std::result::Result<String, JsValue> {
    run_get(document, pointer).map_err(|e| JsValue::from_str(&e))
}

/// `document` with `value` added at `pointer`, as JSON.
#[wasm_bindgen]
pub fn add(document: &str, pointer: &str, value: &str) -> std::result::Result<String, JsValue> {
    run_add(document, pointer, value).map_err(|e| JsValue::from_str(&e))
}

/// `document` with the value at `pointer` replaced, as JSON.
#[wasm_bindgen]
pub fn replace(document: &str, pointer: &str, value: &str) -> std::result::Result<String, JsValue> {
    run_replace(document, pointer, value).map_err(|e| JsValue::from_str(&e))
}

/// `document` with the value at `pointer` removed, as JSON.
#[wasm_bindgen]
pub fn remove(document: &str, pointer: &str) -> std::result::Result<String, JsValue> {
    run_remove(document, pointer).map_err(|e| JsValue::from_str(&e))
}

// ---------------------------------------------------------------------------
// String-level implementations
// ---------------------------------------------------------------------------

type Outcome = std::result::Result<String, String>;

fn run_get(document: &str, pointer: &str) -> Outcome {
    let (pointer, document) = inputs(pointer, document)?;
    let value = jptr_core::get(&pointer, &document).map_err(|e| e.to_string())?;
    Ok(value.to_string())
}

fn run_add(document: &str, pointer: &str, value: &str) -> Outcome {
    let (pointer, document) = inputs(pointer, document)?;
    let value = parse_json(value, "value")?;
    let result = jptr_core::add(&pointer, &document, value).map_err(|e| e.to_string())?;
    Ok(result.to_string())
}

fn run_replace(document: &str, pointer: &str, value: &str) -> Outcome {
    let (pointer, document) = inputs(pointer, document)?;
    let value = parse_json(value, "value")?;
    let result = jptr_core::replace(&pointer, &document, value).map_err(|e| e.to_string())?;
    Ok(result.to_string())
}

fn run_remove(document: &str, pointer: &str) -> Outcome {
    let (pointer, document) = inputs(pointer, document)?;
    let result = jptr_core::remove(&pointer, &document).map_err(|e| e.to_string())?;
    Ok(result.to_string())
}

fn inputs(pointer: &str, document: &str) -> std::result::Result<(Pointer, JsonValue), String> {
    let pointer = Pointer::parse(pointer).map_err(|e| e.to_string())?;
    let document = parse_json(document, "document")?;
    Ok((pointer, document))
}

fn parse_json(text: &str, what: &str) -> std::result::Result<JsonValue, String> {
    serde_json::from_str(text).map_err(|e| format!("Invalid JSON {what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_compact_json() {
        assert_eq!(run_get(r#"{"a":[1,{"b":2}]}"#, "/a/1").unwrap(), r#"{"b":2}"#);
    }

    #[test]
    fn structural_operations() {
        let doc = r#"{"a":[1,2,3]}"#;
        assert_eq!(run_add(doc, "/a/1", "9").unwrap(), r#"{"a":[1,9,2,3]}"#);
        assert_eq!(run_replace(doc, "/a/1", "9").unwrap(), r#"{"a":[1,9,3]}"#);
        assert_eq!(run_remove(doc, "/a/1").unwrap(), r#"{"a":[1,3]}"#);
    }

    #[test]
    fn errors_carry_messages() {
        assert!(run_get("{}", "a").unwrap_err().contains("must begin with '/'"));
        assert!(run_get("{", "/a").unwrap_err().starts_with("Invalid JSON document"));
        assert!(run_add("{}", "/a", "nope").unwrap_err().starts_with("Invalid JSON value"));
        assert!(run_remove("{}", "").unwrap_err().contains("root pointer"));
    }
}
