//! Robot registry
//!
//! Owns robot identity and every per-robot attribute. All state lives in the
//! injected [`KeyValueStore`]; the registry itself holds no mutable state.

use super::attributes::{self, AttributeCodec, AttributeSpec};
use super::feedback::evaluate_feedback_rating;
use super::naming::random_name;
use super::summary::compose_summary;
use crate::config::RegistryConfig;
use crate::templates::StringCatalog;
use crate::types::{ContextCodec, KeyValueStore, Localizer};
use crate::{PeerHabitError, Result};
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Identity and profile fields of one robot
#[derive(Debug, Clone, PartialEq)]
pub struct RobotProfile {
    /// Primary key
    pub id: String,
    /// Display nickname
    pub nickname: Option<String>,
    /// Response probability
    pub probability: Option<f64>,
    /// Mean of the simulated normal profile
    pub mean: Option<f64>,
    /// Standard deviation of the simulated normal profile
    pub sigma: Option<f64>,
}

fn fmt_opt<T: fmt::Debug>(value: &Option<T>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "None".to_string(),
    }
}

impl fmt::Display for RobotProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            "ROBOT".to_string(),
            format!("pk: {:?}", self.id),
            format!("nick: {}", fmt_opt(&self.nickname)),
            format!("prob: {}", fmt_opt(&self.probability)),
            format!("mean: {}", fmt_opt(&self.mean)),
            format!("sigma: {}", fmt_opt(&self.sigma)),
        ];
        f.write_str(&parts.join("; "))
    }
}

/// Registry of simulated robots backed by a key-value store
pub struct RobotRegistry {
    store: Arc<dyn KeyValueStore>,
    localizer: Arc<dyn Localizer>,
    config: RegistryConfig,
    registered_set: String,
    issued_set: String,
}

impl RobotRegistry {
    /// Create a registry with the default configuration
    pub fn new(store: Arc<dyn KeyValueStore>, localizer: Arc<dyn Localizer>) -> Self {
        Self::build(store, localizer, RegistryConfig::default())
    }

    /// Create a registry with a validated configuration
    pub fn with_config(
        store: Arc<dyn KeyValueStore>,
        localizer: Arc<dyn Localizer>,
        config: RegistryConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(store, localizer, config))
    }

    /// Create a registry whose string catalog is picked by `config.locale`
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let catalog = StringCatalog::for_locale(&config.locale)?;
        Ok(Self::build(store, Arc::new(catalog), config))
    }

    fn build(
        store: Arc<dyn KeyValueStore>,
        localizer: Arc<dyn Localizer>,
        config: RegistryConfig,
    ) -> Self {
        let registered_set = format!("{}-registered-robots", config.key_prefix);
        let issued_set = format!("{}-primary-keys", config.key_prefix);
        Self {
            store,
            localizer,
            config,
            registered_set,
            issued_set,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    fn candidate_key<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let suffix: String = (0..self.config.key_length)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
            .collect();
        format!("{}:{}", self.config.key_prefix, suffix)
    }

    /// Produce a never-issued primary key and record it as issued.
    ///
    /// Membership check and insert are separate store calls, so two registries
    /// sharing a store can race; with 25 letters the odds are negligible.
    pub async fn generate_primary_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        for attempt in 1..=self.config.max_key_attempts {
            let candidate = self.candidate_key(rng);
            if self.is_known_key(&candidate).await? {
                warn!(attempt, %candidate, "Primary key collision, retrying");
                continue;
            }
            self.store.set_add(&self.issued_set, &candidate).await?;
            debug!(attempt, key = %candidate, "Issued primary key");
            return Ok(candidate);
        }
        Err(PeerHabitError::GenerationExhausted {
            attempts: self.config.max_key_attempts,
        })
    }

    /// Create, register and initialize a new robot, returning its key.
    ///
    /// Initialization writes are sequential; a failure part-way leaves a
    /// registered robot with some attributes missing.
    pub async fn create_robot<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        let id = self.generate_primary_key(rng).await?;
        self.store.set_add(&self.registered_set, &id).await?;

        let nick = random_name(self.localizer.name_vocabulary(), rng)?;
        let probability = rng.gen_range(0.5..0.9);
        let mean = rng.gen_range(25.0..75.0);
        let sigma = rng.gen_range(5.0..15.0);

        self.set_nickname(&id, &nick).await?;
        self.set_probability(&id, probability).await?;
        self.set_mean(&id, mean).await?;
        self.set_sigma(&id, sigma).await?;

        info!(robot = %id, %nick, probability, mean, sigma, "Created robot");
        Ok(id)
    }

    /// Issue and register a caller-chosen key without initializing attributes
    pub async fn register_with_key(&self, key: &str) -> Result<()> {
        if self.is_known_key(key).await? {
            return Err(PeerHabitError::validation(format!(
                "Primary key '{}' was already issued",
                key
            )));
        }
        self.store.set_add(&self.issued_set, key).await?;
        self.store.set_add(&self.registered_set, key).await?;
        debug!(robot = %key, "Registered robot with explicit key");
        Ok(())
    }

    /// Registered robots in lexicographic order
    pub async fn list_robots(&self) -> Result<Vec<String>> {
        let mut robots: Vec<String> = self
            .store
            .set_members(&self.registered_set)
            .await?
            .into_iter()
            .collect();
        robots.sort();
        Ok(robots)
    }

    /// Whether the key was ever issued
    pub async fn is_known_key(&self, key: &str) -> Result<bool> {
        self.store.set_is_member(&self.issued_set, key).await
    }

    // ------------------------------------------------------------------
    // Generic accessor
    // ------------------------------------------------------------------

    /// Read an attribute.
    ///
    /// Missing or empty values yield the spec's default, or `None` when it has
    /// none. Unparseable values are a [`PeerHabitError::DecodeFailure`].
    pub async fn get<C>(&self, spec: &AttributeSpec<C>, robot_id: &str) -> Result<Option<C::Value>>
    where
        C: AttributeCodec,
        C::Value: Clone,
    {
        let key = attributes::storage_key(&self.config.key_prefix, spec.name(), robot_id)?;
        let stored = self.store.get(&key).await?;
        match stored {
            Some(raw) if !raw.is_empty() => match spec.codec().decode(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(%key, error = %e, "Stored value failed to decode");
                    Err(PeerHabitError::decode(key, spec.codec().kind(), raw))
                }
            },
            _ => Ok(spec.default_value().cloned()),
        }
    }

    /// Write an attribute
    pub async fn set<C>(
        &self,
        spec: &AttributeSpec<C>,
        robot_id: &str,
        value: &C::Value,
    ) -> Result<()>
    where
        C: AttributeCodec,
    {
        let key = attributes::storage_key(&self.config.key_prefix, spec.name(), robot_id)?;
        let encoded = spec.codec().encode(value)?;
        debug!(%key, "Writing attribute");
        self.store.set(&key, &encoded).await
    }

    /// Write when `value` is given (returning `None`), otherwise read
    pub async fn getset<C>(
        &self,
        spec: &AttributeSpec<C>,
        robot_id: &str,
        value: Option<&C::Value>,
    ) -> Result<Option<C::Value>>
    where
        C: AttributeCodec,
        C::Value: Clone,
    {
        match value {
            Some(value) => {
                self.set(spec, robot_id, value).await?;
                Ok(None)
            }
            None => self.get(spec, robot_id).await,
        }
    }

    async fn get_defaulted<C>(&self, spec: &AttributeSpec<C>, robot_id: &str) -> Result<C::Value>
    where
        C: AttributeCodec,
        C::Value: Clone,
    {
        self.get(spec, robot_id).await?.ok_or_else(|| {
            PeerHabitError::validation(format!("Attribute '{}' has no default", spec.name()))
        })
    }

    // ------------------------------------------------------------------
    // Named attributes
    // ------------------------------------------------------------------

    /// Nickname
    pub async fn nickname(&self, robot_id: &str) -> Result<Option<String>> {
        self.get(&attributes::nickname(), robot_id).await
    }

    /// Set nickname
    pub async fn set_nickname(&self, robot_id: &str, nick: &str) -> Result<()> {
        self.set(&attributes::nickname(), robot_id, &nick.to_string())
            .await
    }

    /// Response probability
    pub async fn probability(&self, robot_id: &str) -> Result<Option<f64>> {
        self.get(&attributes::probability(), robot_id).await
    }

    /// Set response probability
    pub async fn set_probability(&self, robot_id: &str, value: f64) -> Result<()> {
        self.set(&attributes::probability(), robot_id, &value).await
    }

    /// Profile mean
    pub async fn mean(&self, robot_id: &str) -> Result<Option<f64>> {
        self.get(&attributes::mean(), robot_id).await
    }

    /// Set profile mean
    pub async fn set_mean(&self, robot_id: &str, value: f64) -> Result<()> {
        self.set(&attributes::mean(), robot_id, &value).await
    }

    /// Profile standard deviation
    pub async fn sigma(&self, robot_id: &str) -> Result<Option<f64>> {
        self.get(&attributes::sigma(), robot_id).await
    }

    /// Set profile standard deviation
    pub async fn set_sigma(&self, robot_id: &str, value: f64) -> Result<()> {
        self.set(&attributes::sigma(), robot_id, &value).await
    }

    /// Last first try timestamp, 0 if never set
    pub async fn last_first_try(&self, robot_id: &str) -> Result<i64> {
        self.get_defaulted(&attributes::last_first_try(), robot_id)
            .await
    }

    /// Set last first try timestamp
    pub async fn set_last_first_try(&self, robot_id: &str, value: i64) -> Result<()> {
        self.set(&attributes::last_first_try(), robot_id, &value)
            .await
    }

    /// Last second try timestamp, 0 if never set
    pub async fn last_second_try(&self, robot_id: &str) -> Result<i64> {
        self.get_defaulted(&attributes::last_second_try(), robot_id)
            .await
    }

    /// Set last second try timestamp
    pub async fn set_last_second_try(&self, robot_id: &str, value: i64) -> Result<()> {
        self.set(&attributes::last_second_try(), robot_id, &value)
            .await
    }

    /// Last feedback try timestamp, 0 if never set
    pub async fn last_feedback_try(&self, robot_id: &str) -> Result<i64> {
        self.get_defaulted(&attributes::last_feedback_try(), robot_id)
            .await
    }

    /// Set last feedback try timestamp
    pub async fn set_last_feedback_try(&self, robot_id: &str, value: i64) -> Result<()> {
        self.set(&attributes::last_feedback_try(), robot_id, &value)
            .await
    }

    /// Day-0 anchor, [`attributes::DEFAULT_ZERO_DAY`] if never set
    pub async fn zero_day(&self, robot_id: &str) -> Result<i64> {
        self.get_defaulted(&attributes::zero_day(), robot_id).await
    }

    /// Set day-0 anchor
    pub async fn set_zero_day(&self, robot_id: &str, value: i64) -> Result<()> {
        self.set(&attributes::zero_day(), robot_id, &value).await
    }

    /// Streak counter, 0 if never set
    pub async fn combo(&self, robot_id: &str) -> Result<i64> {
        self.get_defaulted(&attributes::combo(), robot_id).await
    }

    /// Set streak counter
    pub async fn set_combo(&self, robot_id: &str, value: i64) -> Result<()> {
        self.set(&attributes::combo(), robot_id, &value).await
    }

    /// Score on a day, 0 if never set
    pub async fn score(&self, robot_id: &str, absolute_day: i64) -> Result<f64> {
        self.get_defaulted(&attributes::score(absolute_day), robot_id)
            .await
    }

    /// Set score on a day
    pub async fn set_score(&self, robot_id: &str, absolute_day: i64, value: f64) -> Result<()> {
        self.set(&attributes::score(absolute_day), robot_id, &value)
            .await
    }

    /// Response on a day
    pub async fn response(&self, robot_id: &str, absolute_day: i64) -> Result<Option<i64>> {
        self.get(&attributes::response(absolute_day), robot_id)
            .await
    }

    /// Set response on a day
    pub async fn set_response(&self, robot_id: &str, absolute_day: i64, value: i64) -> Result<()> {
        self.set(&attributes::response(absolute_day), robot_id, &value)
            .await
    }

    /// Feedback rating on a day
    pub async fn feedback(&self, robot_id: &str, absolute_day: i64) -> Result<Option<i64>> {
        self.get(&attributes::feedback(absolute_day), robot_id)
            .await
    }

    /// Set feedback rating on a day
    pub async fn set_feedback(&self, robot_id: &str, absolute_day: i64, value: i64) -> Result<()> {
        self.set(&attributes::feedback(absolute_day), robot_id, &value)
            .await
    }

    /// Partner context, decoded by `codec`
    pub async fn partner<C>(&self, codec: &C, robot_id: &str) -> Result<Option<C::Context>>
    where
        C: ContextCodec,
        C::Context: Clone,
    {
        self.get(&attributes::partner(codec), robot_id).await
    }

    /// Set partner context, encoded by `codec`
    pub async fn set_partner<C>(
        &self,
        codec: &C,
        robot_id: &str,
        context: &C::Context,
    ) -> Result<()>
    where
        C: ContextCodec,
    {
        self.set(&attributes::partner(codec), robot_id, context)
            .await
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Day index relative to the robot's day 0
    pub async fn relative_day(&self, robot_id: &str, absolute_day: i64) -> Result<i64> {
        Ok(absolute_day - self.zero_day(robot_id).await?)
    }

    /// Identity and profile fields
    pub async fn profile(&self, robot_id: &str) -> Result<RobotProfile> {
        Ok(RobotProfile {
            id: robot_id.to_string(),
            nickname: self.nickname(robot_id).await?,
            probability: self.probability(robot_id).await?,
            mean: self.mean(robot_id).await?,
            sigma: self.sigma(robot_id).await?,
        })
    }

    /// One-line diagnostic description
    pub async fn brief_info(&self, robot_id: &str) -> Result<String> {
        Ok(self.profile(robot_id).await?.to_string())
    }

    /// Localized report of a day's response and the current streak.
    ///
    /// Falls back to the primary key when no nickname is stored.
    pub async fn summarize(&self, robot_id: &str, absolute_day: i64) -> Result<String> {
        let nick = self
            .nickname(robot_id)
            .await?
            .unwrap_or_else(|| robot_id.to_string());
        let response = self.response(robot_id, absolute_day).await?;
        let combo = self.combo(robot_id).await?;
        compose_summary(self.localizer.as_ref(), &nick, response, combo)
    }

    /// Rate the day's score and store the rating as that day's feedback
    pub async fn evaluate_and_store_feedback<R: Rng + ?Sized>(
        &self,
        robot_id: &str,
        absolute_day: i64,
        rng: &mut R,
    ) -> Result<u8> {
        let score = self.score(robot_id, absolute_day).await?;
        let rating = evaluate_feedback_rating(Some(score), rng);
        self.set_feedback(robot_id, absolute_day, i64::from(rating))
            .await?;
        debug!(robot = %robot_id, absolute_day, score, rating, "Stored feedback rating");
        Ok(rating)
    }
}
