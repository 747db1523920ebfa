//! JavaScript bindings.
//!
//! Results are returned as plain JS objects/arrays built with `Reflect`, so
//! callers get `{ name, canonicalHex, normalizedHex }`-style values without a
//! serialization layer.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::phash::{DEFAULT_DUPLICATE_THRESHOLD, HashCandidate};

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn get_string(source: &JsValue, key: &str) -> Result<String, JsValue> {
    Reflect::get(source, &JsValue::from_str(key))?
        .as_string()
        .ok_or_else(|| JsValue::from_str(&format!("`{key}` must be a string")))
}

// ------------------------------------------------------------
// Naming
// ------------------------------------------------------------

/// Name a hex color. Throws on malformed input.
#[wasm_bindgen(js_name = nameColor)]
pub fn name_color(hex: &str) -> Result<Object, JsValue> {
    let named = crate::name_color(hex).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = Object::new();
    set(&result, "name", &JsValue::from_str(&named.name))?;
    set(&result, "canonicalHex", &JsValue::from_str(&named.canonical_hex))?;
    set(&result, "normalizedHex", &JsValue::from_str(&named.normalized_hex))?;
    Ok(result)
}

// ------------------------------------------------------------
// Extraction
// ------------------------------------------------------------

/// Dominant colors of an encoded image as `[{ hex, name }]`. Never throws
/// for bad images; returns an empty array instead.
#[wasm_bindgen(js_name = extractDominantColors)]
pub fn extract_dominant_colors(input: Vec<u8>) -> Result<Array, JsValue> {
    let colors = Array::new();
    for color in crate::extract_dominant_colors(&input) {
        let entry = Object::new();
        set(&entry, "hex", &JsValue::from_str(&color.hex))?;
        set(&entry, "name", &JsValue::from_str(&color.name))?;
        colors.push(&entry);
    }
    Ok(colors)
}

// ------------------------------------------------------------
// Harmony
// ------------------------------------------------------------

/// Harmony score (0-100) of an array of hex strings.
#[wasm_bindgen(js_name = computeHarmonyScore)]
pub fn compute_harmony_score(colors: Array) -> Result<u8, JsValue> {
    let mut hexes = Vec::with_capacity(colors.length() as usize);
    for value in colors.iter() {
        let hex = value
            .as_string()
            .ok_or_else(|| JsValue::from_str("Color values must be strings"))?;
        hexes.push(hex);
    }
    Ok(crate::compute_harmony_score(&hexes))
}

// ------------------------------------------------------------
// Perceptual hashing
// ------------------------------------------------------------

/// 64-character average hash of an encoded image. Throws if it cannot be decoded.
#[wasm_bindgen(js_name = computeHash)]
pub fn compute_hash(input: Vec<u8>) -> Result<String, JsValue> {
    crate::compute_hash(&input)
        .map(String::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Near-duplicates of `target` among `[{ id, hash }]`, as `[{ id, similarity }]`.
///
/// `id` values are passed through untouched. `threshold` defaults to 10.
#[wasm_bindgen(js_name = findDuplicates)]
pub fn find_duplicates(
    target: &str,
    candidates: Array,
    threshold: Option<u32>,
) -> Result<Array, JsValue> {
    let mut parsed = Vec::with_capacity(candidates.length() as usize);
    for candidate in candidates.iter() {
        let id = Reflect::get(&candidate, &JsValue::from_str("id"))?;
        let hash = get_string(&candidate, "hash")?;
        parsed.push(HashCandidate { id, hash });
    }

    let matches = Array::new();
    let threshold = threshold.unwrap_or(DEFAULT_DUPLICATE_THRESHOLD);
    for found in crate::find_duplicates(target, &parsed, threshold) {
        let entry = Object::new();
        set(&entry, "id", &found.id)?;
        set(&entry, "similarity", &JsValue::from(found.similarity))?;
        matches.push(&entry);
    }
    Ok(matches)
}
