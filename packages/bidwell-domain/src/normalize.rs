//! Filter normalization shared by search requests and condition criteria.
//!
//! A key is dropped when its value is `null`, an empty array, or an object that is empty after
//! normalization. Objects are cleaned at every depth.

use serde_json::{Map, Value};

pub fn normalize(filters: &Value) -> Value {
	match filters {
		Value::Null => Value::Object(Map::new()),
		Value::Object(map) => Value::Object(normalize_map(map)),
		other => other.clone(),
	}
}

fn normalize_map(map: &Map<String, Value>) -> Map<String, Value> {
	let mut out = Map::new();

	for (key, value) in map {
		match value {
			Value::Null => continue,
			Value::Array(items) if items.is_empty() => continue,
			Value::Object(nested) => {
				let nested = normalize_map(nested);

				if nested.is_empty() {
					continue;
				}

				out.insert(key.clone(), Value::Object(nested));
			},
			_ => {
				out.insert(key.clone(), value.clone());
			},
		}
	}

	out
}
