//! Anonymous user id shown in the admin view

use sha2::{Digest, Sha256};

/// Returns a stable anonymous id of the form `anon_xxxxx` (5 hex chars of
/// SHA-256 over user@host). Falls back to the config dir path when neither
/// is available.
pub fn admin_user_id() -> String {
    anon_id(&identity_seed())
}

fn identity_seed() -> String {
    let user = ["USER", "USERNAME"]
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()));
    let host = hostname::get().ok().and_then(|h| h.into_string().ok());

    match (user, host) {
        (None, None) => dirs::config_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "vibewall-unknown".to_string()),
        (user, host) => format!("{}@{}", user.unwrap_or_default(), host.unwrap_or_default()),
    }
}

pub fn anon_id(seed: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(seed.as_bytes()));
    format!("anon_{}", &digest[..5])
}
