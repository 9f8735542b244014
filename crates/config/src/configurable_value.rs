//! Configurable value types that can load from environment variables or plain values

use agg_types::SecretString;
use serde::{Deserialize, Serialize};

/// A configurable value that is either an environment-variable reference or
/// a plain inline value.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConfigurableValue {
	/// Type of value: "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// The value: either the environment variable name or the actual value
	pub value: String,
}

/// Type of configurable value
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Load value from an environment variable (name in the `value` field)
	Env,
	/// Use the `value` field directly
	Plain,
}

impl ConfigurableValue {
	/// Create a new environment variable reference
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	/// Create a new plain value
	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type.
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve into a [`SecretString`] for sensitive values such as API keys.
	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		let resolved_value = self.resolve()?;
		Ok(SecretString::from_str(&resolved_value))
	}
}

/// Errors that can occur when resolving configurable values
#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_plain_value_resolves_directly() {
		let value = ConfigurableValue::from_plain("abc123");
		assert_eq!(value.resolve().unwrap(), "abc123");
	}

	#[test]
	fn test_env_value_resolves_from_environment() {
		std::env::set_var("AGG_TEST_API_KEY", "from-env");
		let value = ConfigurableValue::from_env("AGG_TEST_API_KEY");
		assert_eq!(value.resolve().unwrap(), "from-env");
		assert_eq!(value.resolve_for_secret().unwrap().expose_secret(), "from-env");
	}

	#[test]
	fn test_missing_env_var_errors() {
		let value = ConfigurableValue::from_env("AGG_TEST_DOES_NOT_EXIST");
		assert!(value.resolve().is_err());
	}
}
