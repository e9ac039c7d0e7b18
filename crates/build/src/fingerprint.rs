use xxhash_rust::xxh3::Xxh3;

/// Hex digits available from one xxh3-64 digest.
pub const MAX_DIGEST_LENGTH: usize = 16;

/// Content fingerprint of rendered CSS for the orchestrator's filename
/// templating.
///
/// Lowercase hex of an xxh3-64 digest over `salt` followed by `css`, cut to
/// `digest_length` characters (at most [`MAX_DIGEST_LENGTH`]).
pub fn fingerprint(css: &str, salt: Option<&str>, digest_length: usize) -> String {
	let mut hasher = Xxh3::new();
	if let Some(salt) = salt {
		hasher.update(salt.as_bytes());
	}
	hasher.update(css.as_bytes());
	let mut hex = format!("{:016x}", hasher.digest());
	hex.truncate(digest_length.min(MAX_DIGEST_LENGTH));
	hex
}
