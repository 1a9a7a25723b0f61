use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore, UserStore};

/// Delete the account with `email`; its schedule items go with it.
pub async fn delete(email: &str, config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    let store = PgStore::new(pool);

    let user = store
        .find_user_by_email(email)
        .await?
        .with_context(|| format!("no account with email '{}'", email))?;

    if store.delete_user(user.id).await? {
        tracing::info!("Deleted user {} and their schedule items", user.id);
        println!("Deleted {}", email);
    } else {
        println!("{} was already gone", email);
    }

    store.pool().close().await;
    Ok(())
}
