//! Entities -> blueprint string, ported from the original `blueprint.py`:
//! `"0" + base64(deflate(json))`, positions re-centered, and orientations
//! doubled with `Up` elided.

use crate::error::BlueprintError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use factoriocalc_layout::{kind, Entity, Orientation};
use serde_json::{json, Map, Value};
use std::io::{Read, Write};

pub const FORMAT_VERSION: char = '0';
pub const MAP_VERSION: u64 = 0x1000330000;

/// Footprint `(width, height)` as laid out facing up/down; rotated for
/// left/right orientations in [`encode_entity`]. Anything absent here is
/// assumed 1x1.
fn entity_size(name: &str) -> (i64, i64) {
    match name {
        k if k == kind::PUMP => (1, 2),
        k if k == kind::BIG_POLE => (2, 2),
        k if k == kind::BEACON => (3, 3),
        k if k == kind::ASSEMBLER => (3, 3),
        k if k == kind::CHEMICAL_PLANT => (3, 3),
        k if k == kind::SPLITTER => (2, 1),
        k if k == kind::ROBOPORT => (4, 4),
        k if k == kind::FURNACE => (3, 3),
        k if k == kind::REFINERY => (5, 5),
        _ => (1, 1),
    }
}

/// Encode a blueprint string for `entities`, with the given label and
/// icon item names.
pub fn encode(entities: &[Entity], label: &str, icons: &[&str]) -> Result<String, BlueprintError> {
    if entities.is_empty() {
        return Err(BlueprintError::NoEntities);
    }
    let width = entities
        .iter()
        .map(|e| {
            let (w, _) = entity_size(&e.name);
            e.position.x + w
        })
        .max()
        .unwrap();
    let height = entities
        .iter()
        .map(|e| {
            let (_, h) = entity_size(&e.name);
            e.position.y + h
        })
        .max()
        .unwrap();
    let center_x = width as f64 / 2.0 + 0.5;
    let center_y = height as f64 / 2.0 + 0.5;

    let icon_values: Vec<Value> = icons
        .iter()
        .enumerate()
        .map(|(i, item)| {
            json!({
                "index": i as u64 + 1,
                "signal": { "type": "item", "name": item },
            })
        })
        .collect();

    let entity_values: Vec<Value> =
        entities.iter().enumerate().map(|(i, e)| encode_entity(i as u64 + 1, e, center_x, center_y)).collect();

    let blueprint = json!({
        "blueprint": {
            "item": "blueprint",
            "label": label,
            "version": MAP_VERSION,
            "icons": icon_values,
            "entities": entity_values,
        }
    });
    encode_json(&blueprint)
}

fn encode_entity(number: u64, entity: &Entity, center_x: f64, center_y: f64) -> Value {
    let (mut w, mut h) = entity_size(&entity.name);
    let rotated = matches!(entity.orientation, Some(Orientation::Right) | Some(Orientation::Left));
    if rotated {
        std::mem::swap(&mut w, &mut h);
    }
    let mut obj = Map::new();
    obj.insert("entity_number".into(), json!(number));
    obj.insert("name".into(), json!(entity.name));
    obj.insert(
        "position".into(),
        json!({
            "x": entity.position.x as f64 + w as f64 / 2.0 - center_x,
            "y": entity.position.y as f64 + h as f64 / 2.0 - center_y,
        }),
    );
    if let Some(orientation) = entity.orientation {
        if orientation != Orientation::Up {
            obj.insert("direction".into(), json!(orientation.blueprint_direction()));
        }
    }
    for (key, value) in &entity.attrs {
        obj.insert(key.clone(), value.clone());
    }
    Value::Object(obj)
}

/// `"0" + base64(deflate(json))`.
pub fn encode_json(data: &Value) -> Result<String, BlueprintError> {
    let json_bytes = serde_json::to_vec(data)?;
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&json_bytes)?;
    let compressed = encoder.finish()?;
    Ok(format!("{FORMAT_VERSION}{}", STANDARD.encode(compressed)))
}

/// Inverse of [`encode_json`].
pub fn decode_json(data: &str) -> Result<Value, BlueprintError> {
    let mut chars = data.chars();
    let version = chars.next().ok_or(BlueprintError::Empty)?;
    if version != FORMAT_VERSION {
        return Err(BlueprintError::UnknownFormatVersion(version));
    }
    let compressed = STANDARD.decode(chars.as_str())?;
    let mut decoder = flate2::read::ZlibDecoder::new(&compressed[..]);
    let mut json_bytes = Vec::new();
    decoder.read_to_end(&mut json_bytes)?;
    Ok(serde_json::from_slice(&json_bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_layout::Entity;

    #[test]
    fn round_trips_through_encode_and_decode() {
        let entities = vec![Entity::new(0, 0, kind::ASSEMBLER), Entity::new(4, 0, kind::MEDIUM_POLE)];
        let encoded = encode(&entities, "Test", &[kind::ASSEMBLER]).unwrap();
        assert!(encoded.starts_with(FORMAT_VERSION));
        let decoded = decode_json(&encoded).unwrap();
        assert_eq!(decoded["blueprint"]["label"], "Test");
        assert_eq!(decoded["blueprint"]["entities"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn up_orientation_omits_direction_field() {
        let entities = vec![Entity::new(0, 0, kind::BELT).oriented(Orientation::Up)];
        let encoded = encode(&entities, "Test", &[]).unwrap();
        let decoded = decode_json(&encoded).unwrap();
        let entity = &decoded["blueprint"]["entities"][0];
        assert!(entity.get("direction").is_none());
    }

    #[test]
    fn non_up_orientation_doubles_the_direction_code() {
        let entities = vec![Entity::new(0, 0, kind::BELT).oriented(Orientation::Down)];
        let encoded = encode(&entities, "Test", &[]).unwrap();
        let decoded = decode_json(&encoded).unwrap();
        assert_eq!(decoded["blueprint"]["entities"][0]["direction"], 4);
    }

    #[test]
    fn rejects_empty_entity_lists() {
        assert!(matches!(encode(&[], "Test", &[]), Err(BlueprintError::NoEntities)));
    }
}
