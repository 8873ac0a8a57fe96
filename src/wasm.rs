//! WASM bindings for in-browser document assembly.
//!
//! Analysis runs outside the module; these entry points take the analyzer's
//! JSON output and return DOCX bytes ready for download.

use wasm_bindgen::prelude::*;

use crate::assemble::Assembler;
use crate::config::ThesisProfile;
use crate::error::Error;
use crate::footnote::UnresolvedPolicy;
use crate::schema::StructuredDocument;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Assemble a structured document given as JSON, dropping markers that
/// name unknown footnotes.
#[wasm_bindgen]
pub fn assemble_json(json: &str) -> Result<Vec<u8>, JsValue> {
    assemble_with(json, UnresolvedPolicy::Drop)
}

/// Like [`assemble_json`], but fails on markers naming unknown footnotes.
#[wasm_bindgen]
pub fn assemble_json_strict(json: &str) -> Result<Vec<u8>, JsValue> {
    assemble_with(json, UnresolvedPolicy::Reject)
}

fn assemble_with(json: &str, policy: UnresolvedPolicy) -> Result<Vec<u8>, JsValue> {
    let doc = StructuredDocument::from_json(json).map_err(|e| to_js(Error::Analysis(e)))?;
    let profile = ThesisProfile::default().with_unresolved_markers(policy);
    Assembler::new(profile)
        .and_then(|assembler| assembler.assemble(&doc))
        .map_err(to_js)
}

/// Errors cross into JavaScript as their user-facing message.
fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.user_message())
}
