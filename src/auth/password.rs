//! bcrypt password hashing.
//!
//! Hashing is CPU-bound, so both operations hop onto tokio's blocking pool.

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Returns `Ok(false)` for a mismatch and for a stored hash that is not valid bcrypt.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matched = tokio::task::spawn_blocking(move || match bcrypt::verify(password, &hash) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    })
    .await?;
    Ok(matched)
}
