use crate::domain::model::Participant;
use crate::domain::ports::{ConfigProvider, KeyValueStore, ParticipantSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;

/// Store key holding the JSON array of participants added or updated at runtime.
pub const REGISTERED_USERS_KEY: &str = "registeredUsers";

const DEPARTMENTS: [&str; 6] = ["Engineering", "Marketing", "Design", "Sales", "HR", "Finance"];

/// The seeded interns every board starts with.
pub fn default_roster() -> Vec<Participant> {
    let seed = [
        ("1", "Alex Chen", "alex.chen@company.com", "AC2024X7", 1250.0),
        ("2", "Sarah Johnson", "sarah.j@company.com", "SJ2024Y9", 2840.0),
        ("3", "Michael Rodriguez", "m.rodriguez@company.com", "MR2024Z3", 3150.0),
        ("4", "Emily Davis", "emily.d@company.com", "ED2024A1", 1890.0),
        ("5", "David Kim", "david.kim@company.com", "DK2024B5", 2670.0),
        ("6", "Lisa Wang", "lisa.wang@company.com", "LW2024C8", 1560.0),
        ("7", "James Wilson", "j.wilson@company.com", "JW2024D2", 2230.0),
        ("8", "Maria Garcia", "maria.g@company.com", "MG2024E6", 1780.0),
        ("9", "Robert Taylor", "robert.t@company.com", "RT2024F4", 2950.0),
        ("10", "Jennifer Brown", "jennifer.b@company.com", "JB2024G1", 1420.0),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, (id, name, email, code, total))| {
            Participant::new(*id, *name, *total)
                .with_email(*email)
                .with_referral_code(*code)
                .with_department(DEPARTMENTS[i % DEPARTMENTS.len()])
        })
        .collect()
}

/// Artificial delays applied before each source operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub leaderboard: Duration,
    pub lookup: Duration,
    pub update: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self {
            leaderboard: Duration::ZERO,
            lookup: Duration::ZERO,
            update: Duration::ZERO,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            leaderboard: Duration::from_millis(config.leaderboard_delay_ms()),
            lookup: Duration::from_millis(config.lookup_delay_ms()),
            update: Duration::from_millis(config.update_delay_ms()),
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            leaderboard: Duration::from_millis(1200),
            lookup: Duration::from_millis(600),
            update: Duration::from_millis(500),
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Static roster overlaid with the participants persisted in a key-value store.
///
/// Stored entries replace roster entries with the same id; the rest are
/// appended after the roster in the order they were first stored.
pub struct MockParticipantSource<K: KeyValueStore> {
    roster: Vec<Participant>,
    store: K,
    latency: Latency,
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> MockParticipantSource<K> {
    pub fn new(roster: Vec<Participant>, store: K, latency: Latency) -> Self {
        Self {
            roster,
            store,
            latency,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_default_roster(store: K, latency: Latency) -> Self {
        Self::new(default_roster(), store, latency)
    }

    async fn registered(&self) -> Result<Vec<Participant>> {
        match self.store.get(REGISTERED_USERS_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn merged(&self) -> Result<Vec<Participant>> {
        let mut registered = self.registered().await?;
        let mut merged = Vec::with_capacity(self.roster.len() + registered.len());

        for member in &self.roster {
            match registered.iter().position(|r| r.id == member.id) {
                Some(idx) => merged.push(registered.remove(idx)),
                None => merged.push(member.clone()),
            }
        }
        merged.extend(registered);
        Ok(merged)
    }

    /// Caller holds `write_lock`.
    async fn store_participant(&self, participant: Participant) -> Result<()> {
        let mut registered = self.registered().await?;
        match registered.iter_mut().find(|r| r.id == participant.id) {
            Some(existing) => *existing = participant,
            None => registered.push(participant),
        }

        let raw = serde_json::to_string(&registered)?;
        self.store.set(REGISTERED_USERS_KEY, &raw).await
    }
}

#[async_trait]
impl<K: KeyValueStore> ParticipantSource for MockParticipantSource<K> {
    async fn participants(&self) -> Result<Vec<Participant>> {
        simulate(self.latency.leaderboard).await;
        let participants = self.merged().await?;
        tracing::debug!("Loaded {} participants", participants.len());
        Ok(participants)
    }

    async fn find(&self, id: &str) -> Result<Option<Participant>> {
        simulate(self.latency.lookup).await;
        Ok(self.merged().await?.into_iter().find(|p| p.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>> {
        simulate(self.latency.lookup).await;
        let email = email.trim();
        let has_email = |p: &Participant| p.email.as_deref() == Some(email);

        if let Some(found) = self.registered().await?.into_iter().find(|p| has_email(p)) {
            return Ok(Some(found));
        }
        Ok(self.roster.iter().find(|p| has_email(*p)).cloned())
    }

    async fn upsert(&self, participant: Participant) -> Result<()> {
        simulate(self.latency.update).await;
        let _guard = self.write_lock.lock().await;
        self.store_participant(participant).await
    }

    async fn add_to_total(&self, id: &str, amount: f64) -> Result<Option<Participant>> {
        simulate(self.latency.update).await;
        let _guard = self.write_lock.lock().await;

        let found = self.merged().await?.into_iter().find(|p| p.id == id);
        let Some(mut participant) = found else {
            return Ok(None);
        };
        participant.total_raised += amount;
        self.store_participant(participant.clone()).await?;
        Ok(Some(participant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;

    fn source(store: MemoryStore) -> MockParticipantSource<MemoryStore> {
        MockParticipantSource::with_default_roster(store, Latency::none())
    }

    #[test]
    fn test_default_roster() {
        let roster = default_roster();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster[2].name, "Michael Rodriguez");
        assert_eq!(roster[2].total_raised, 3150.0);
        assert!(roster.iter().all(|p| p.department.is_some()));
    }

    #[tokio::test]
    async fn test_stored_participants_are_appended() {
        let store = MemoryStore::new();
        store
            .set(
                REGISTERED_USERS_KEY,
                r#"[{"id":"u-1","name":"New Intern","email":"new@company.com"}]"#,
            )
            .await
            .unwrap();

        let participants = source(store).participants().await.unwrap();
        assert_eq!(participants.len(), 11);
        assert_eq!(participants[10].id, "u-1");
        assert_eq!(participants[10].total_raised, 0.0);
    }

    #[tokio::test]
    async fn test_upsert_overrides_roster_entry() {
        let store = MemoryStore::new();
        let source = source(store.clone());

        let mut alex = source.find("1").await.unwrap().unwrap();
        alex.total_raised += 100.0;
        source.upsert(alex).await.unwrap();

        let participants = source.participants().await.unwrap();
        assert_eq!(participants.len(), 10);
        assert_eq!(participants[0].total_raised, 1350.0);
        assert!(store.get(REGISTERED_USERS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_by_email_prefers_stored_copy() {
        let store = MemoryStore::new();
        let source = source(store);

        let mut sarah = source.find_by_email("sarah.j@company.com").await.unwrap().unwrap();
        sarah.total_raised = 9000.0;
        source.upsert(sarah).await.unwrap();

        let found = source.find_by_email(" sarah.j@company.com ").await.unwrap().unwrap();
        assert_eq!(found.total_raised, 9000.0);
        assert!(source.find_by_email("nobody@company.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_to_total() {
        let source = source(MemoryStore::new());

        let updated = source.add_to_total("10", 80.0).await.unwrap().unwrap();
        assert_eq!(updated.total_raised, 1500.0);
        assert_eq!(source.find("10").await.unwrap().unwrap().total_raised, 1500.0);

        assert!(source.add_to_total("missing-id", 80.0).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_additions_are_not_lost() {
        let source =
            MockParticipantSource::with_default_roster(MemoryStore::new(), Latency::default());

        let (a, b, c) = tokio::join!(
            source.add_to_total("1", 10.0),
            source.add_to_total("1", 20.0),
            source.add_to_total("1", 30.0),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        assert_eq!(source.find("1").await.unwrap().unwrap().total_raised, 1310.0);
    }

    #[tokio::test]
    async fn test_malformed_store_is_an_error() {
        let store = MemoryStore::new();
        store.set(REGISTERED_USERS_KEY, "{not json").await.unwrap();
        assert!(source(store).participants().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let latency = Latency::default();
        let source = MockParticipantSource::with_default_roster(MemoryStore::new(), latency);

        let start = tokio::time::Instant::now();
        source.participants().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1200));
    }
}
