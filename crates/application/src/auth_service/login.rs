use super::*;

impl AuthService {
    /// Authenticates a user by username and password.
    ///
    /// Looks up the first active user with that username. Every attempt is
    /// logged: `LOGIN_FAIL` with an empty reference for unknown users,
    /// `LOGIN_FAIL` with the user's id for a wrong password, `LOGIN_SUCCESS`
    /// otherwise. Success also persists the session marker.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let _guard = self.collections.write_gate().await;
        let users = self.collections.users().await?;

        let Some(user) = users
            .into_iter()
            .find(|user| user.username() == username && user.is_active())
        else {
            // Hash anyway so unknown usernames cost the same as wrong passwords.
            let _timing_equalizer = self.password_hasher.hash_password(password);
            self.activity
                .append(
                    "",
                    ActivityAction::LoginFail,
                    Some(format!("Failed login attempt for username: {username}")),
                )
                .await?;
            return Ok(LoginOutcome::Failed);
        };

        let password_valid = match self
            .password_hasher
            .verify_password(password, user.password_hash())
        {
            Ok(valid) => valid,
            Err(error) => {
                warn!(user_id = %user.id(), error = %error, "stored password hash is unusable");
                false
            }
        };

        if !password_valid {
            self.activity
                .append(
                    user.id(),
                    ActivityAction::LoginFail,
                    Some("Incorrect password".to_owned()),
                )
                .await?;
            return Ok(LoginOutcome::Failed);
        }

        let identity = user.identity();
        self.collections.save_session_identity(&identity).await?;
        self.activity
            .append(
                user.id(),
                ActivityAction::LoginSuccess,
                Some(format!("User {username} logged in")),
            )
            .await?;

        info!(user_id = %user.id(), "user logged in");
        Ok(LoginOutcome::Authenticated {
            user,
            session: SessionContext::authenticated(identity),
        })
    }
}
