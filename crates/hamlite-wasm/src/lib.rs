//! WASM bindings for the hamlite parser.
//!
//! Exposes `parse()` to JavaScript via wasm-bindgen.
//! Returns the tree as a plain JS object or throws on error.

use hamlite_parser::{Parser, ParserOptions, Root};
use wasm_bindgen::prelude::*;

/// Parse a template and return its tree.
///
/// `options` may be `undefined`/`null` or an object of string values; keys
/// are passed through to the parser, which currently ignores them.
/// Throws a JS error carrying `"<message> at line <n>"` if parsing fails.
#[wasm_bindgen]
pub fn parse(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = if options.is_undefined() || options.is_null() {
        ParserOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };

    let root = parse_native(source, options)?;
    serde_wasm_bindgen::to_value(&root).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the parser version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_native(source: &str, options: ParserOptions) -> Result<Root, hamlite_parser::ParseError> {
    Parser::with_options(options).parse(source)
}
