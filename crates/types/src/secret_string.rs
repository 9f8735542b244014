//! Secure string handling for vendor API keys
//!
//! Keys are opaque inputs to the core; this type keeps them out of logs and
//! zeroizes the backing memory on drop.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose contents are cleared from memory when dropped and
/// redacted in `Debug`/`Display` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	/// Create a new `SecretString` from a `String`
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Create a new `SecretString` from a string slice
	pub fn from_str(secret: &str) -> Self {
		Self::new(secret.to_string())
	}

	/// Expose the secret value
	///
	/// Use sparingly, at the point the key is actually written into a
	/// request.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	/// Check whether the secret is empty without exposing it
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::from_str(secret)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("***REDACTED***")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_and_display_redact() {
		let secret = SecretString::from("super-secret-key");
		assert_eq!(format!("{:?}", secret), "SecretString(***REDACTED***)");
		assert_eq!(secret.to_string(), "***REDACTED***");
		assert_eq!(secret.expose_secret(), "super-secret-key");
	}

	#[test]
	fn test_empty_check() {
		assert!(SecretString::from("").is_empty());
		assert!(!SecretString::from("k").is_empty());
	}
}
