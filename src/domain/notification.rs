use serde_json::Value;

/// Callback payload received from the provider.
///
/// Synchronous API responses nest their fields under `Model` while webhook
/// deliveries put them at the top level, so every read goes through an
/// ordered list of dotted paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notification {
	payload: Value,
}

impl Notification {
	pub fn new(payload: Value) -> Self {
		Self { payload }
	}

	pub fn payload(&self) -> &Value {
		&self.payload
	}

	/// Value at a dotted path such as `Model.InvoiceId`.
	pub fn get(&self, path: &str) -> Option<&Value> {
		path.split('.')
			.try_fold(&self.payload, |node, key| match node {
				Value::Object(map) => map.get(key),
				Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
				_ => None,
			})
			.filter(|value| !value.is_null())
	}

	/// First non-null value among `paths`, in order.
	pub fn lookup(&self, paths: &[&str]) -> Option<&Value> {
		paths.iter().find_map(|path| self.get(path))
	}

	pub fn string_or(&self, paths: &[&str], default: &str) -> String {
		self.lookup(paths)
			.and_then(scalar_to_string)
			.unwrap_or_else(|| default.to_string())
	}

	pub fn number_or(&self, paths: &[&str], default: f64) -> f64 {
		match self.lookup(paths) {
			Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
			Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
			_ => default,
		}
	}

	pub fn flag_or(&self, paths: &[&str], default: bool) -> bool {
		match self.lookup(paths) {
			Some(Value::Bool(b)) => *b,
			Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
			Some(Value::String(s)) => {
				!matches!(s.trim().to_ascii_lowercase().as_str(), "" | "0" | "false")
			}
			_ => default,
		}
	}

	/// Structured value among `paths`. Strings holding encoded JSON are
	/// decoded, since form-encoded webhooks send `Data` that way.
	pub fn structure(&self, paths: &[&str]) -> Option<Value> {
		match self.lookup(paths)? {
			Value::String(raw) => serde_json::from_str(raw).ok(),
			other => Some(other.clone()),
		}
	}
}

impl From<Value> for Notification {
	fn from(payload: Value) -> Self {
		Self::new(payload)
	}
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}
