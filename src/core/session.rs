use crate::core::{KeyValueStore, Participant, ParticipantSource};
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::validate_email;

/// Store key holding the signed-in participant.
pub const CURRENT_USER_KEY: &str = "user";

/// Resolves "the current user" from a key-value store.
///
/// Sign-in is an email lookup with no credential check.
pub struct Session<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> Session<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub async fn sign_in<S: ParticipantSource>(
        &self,
        source: &S,
        email: &str,
    ) -> Result<Participant> {
        validate_email(email)?;

        let participant = source
            .find_by_email(email)
            .await?
            .ok_or_else(|| BoardError::not_found(email.trim()))?;

        self.store
            .set(CURRENT_USER_KEY, &serde_json::to_string(&participant)?)
            .await?;
        tracing::info!("Signed in as {} ({})", participant.name, participant.id);
        Ok(participant)
    }

    pub async fn current_user(&self) -> Result<Option<Participant>> {
        match self.store.get(CURRENT_USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn current_user_id(&self) -> Result<String> {
        self.current_user()
            .await?
            .map(|p| p.id)
            .ok_or(BoardError::NotSignedIn)
    }

    /// Replaces the stored session copy when `participant` is the signed-in user.
    pub async fn refresh(&self, participant: &Participant) -> Result<()> {
        if let Some(current) = self.current_user().await? {
            if current.id == participant.id {
                self.store
                    .set(CURRENT_USER_KEY, &serde_json::to_string(participant)?)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await
    }
}
