use auditdesk_domain::UserRole;

use super::*;

/// Identifier of the built-in administrator.
pub const BOOTSTRAP_ADMIN_ID: &str = "admin-1";

/// Username of the built-in administrator.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";

impl AuthService {
    /// Seeds the built-in administrator when no users exist yet.
    ///
    /// Returns `true` when a seed happened. Does nothing once any user exists
    /// and writes no activity entry.
    pub async fn bootstrap(&self) -> AppResult<bool> {
        let _guard = self.collections.write_gate().await;
        let users = self.collections.users().await?;
        if !users.is_empty() {
            return Ok(false);
        }

        let password_hash = self
            .password_hasher
            .hash_password(BOOTSTRAP_ADMIN_PASSWORD)?;
        let admin = User::new(
            BOOTSTRAP_ADMIN_ID,
            BOOTSTRAP_ADMIN_USERNAME,
            password_hash,
            UserRole::Admin,
            true,
            self.clock.now(),
        )?;
        self.collections.save_users(&[admin]).await?;

        info!(user_id = BOOTSTRAP_ADMIN_ID, "seeded built-in administrator");
        Ok(true)
    }
}
