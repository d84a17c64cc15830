//! The poll coordinator: per-cycle fan-out, merge, and snapshot publication.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use armorywatch_client::{ArmoryClient, Bracket, ClientError};
use armorywatch_types::{Features, MetricRecord, Snapshot, TrackedCharacter};

use crate::config::PollerConfig;
use crate::extract::{CharacterMetrics, MythicPlusMetrics, PvpMetrics, RaidMetrics, RealmMetrics};
use crate::output::Output;

/// Drives poll cycles and publishes snapshots.
///
/// One cycle walks every tracked character (and, when enabled, every
/// distinct realm) sequentially, fetching the resources each enabled
/// feature category needs, running the matching extractors, and merging
/// the groups into one record per entity. Cycles never overlap: the whole
/// cycle runs inside a single task, and missed ticks are delayed rather
/// than stacked.
///
/// # Example
///
/// ```rust,no_run
/// use armorywatch::{Poller, PollerConfig};
/// use armorywatch_client::ArmoryClient;
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = PollerConfig::load(Path::new("armorywatch.toml"))?;
///     let client = ArmoryClient::builder()
///         .region(config.region)
///         .credentials(config.client_id.clone(), config.client_secret.clone())
///         .build();
///
///     let handle = Poller::new(client, &config).start();
///     let mut snapshots = handle.snapshots();
///
///     snapshots.changed().await?;
///     println!("{} characters", snapshots.borrow().character_count());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Poller {
    client: ArmoryClient,
    characters: Vec<TrackedCharacter>,
    realms: Vec<String>,
    features: Features,
    season_id: u32,
    current_expansion: String,
    courtesy_delay: Duration,
    interval: Duration,
    outputs: Vec<Output>,
}

impl Poller {
    /// Create a poller from a client and configuration.
    pub fn new(client: ArmoryClient, config: &PollerConfig) -> Self {
        Self {
            client,
            characters: config.characters.clone(),
            realms: config.realms(),
            features: config.features,
            season_id: config.season_id,
            current_expansion: config.current_expansion.clone(),
            courtesy_delay: config.courtesy_delay(),
            interval: config.poll_interval(),
            outputs: Vec::new(),
        }
    }

    /// Add an output destination. Snapshots are emitted to all of them.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Run one complete poll cycle and assemble a snapshot.
    ///
    /// Individual resource fetches that fail have already degraded to
    /// empty documents inside the gateway; the only error that escapes is
    /// a failed credential exchange, which fails the whole cycle.
    pub async fn run_cycle(&self) -> Result<Snapshot, ClientError> {
        let mut builder = Snapshot::builder();

        for character in &self.characters {
            debug!(character = %character, "collecting character");
            let record = self.collect_character(character).await?;
            builder = builder.character(character.key(), record);
            tokio::time::sleep(self.courtesy_delay).await;
        }

        if self.features.server_status {
            for realm in &self.realms {
                debug!(realm = %realm, "collecting realm status");
                let record = self.collect_realm(realm).await?;
                builder = builder.realm(realm.clone(), record);
                tokio::time::sleep(self.courtesy_delay).await;
            }
        }

        Ok(builder.build())
    }

    /// Fetch and extract every enabled metric group for one character.
    async fn collect_character(&self, character: &TrackedCharacter) -> Result<MetricRecord, ClientError> {
        let realm = &character.realm;
        let name = &character.name;
        let mut record = MetricRecord::new();

        let profile = self.client.character_profile(realm, name).await?;
        let equipment = self.client.character_equipment(realm, name).await?;
        let achievements = self.client.character_achievements(realm, name).await?;
        CharacterMetrics::from_documents(&profile, &equipment, &achievements).apply(&mut record);

        if self.features.pvp {
            let summary = self.client.pvp_summary(realm, name).await?;
            let mut brackets = Vec::with_capacity(Bracket::ALL.len());
            for bracket in Bracket::ALL {
                brackets.push((bracket, self.client.pvp_bracket(realm, name, bracket).await?));
                tokio::time::sleep(self.courtesy_delay).await;
            }
            PvpMetrics::from_documents(&summary, &brackets).apply(&mut record);
        }

        if self.features.raids {
            let encounters = self.client.raid_encounters(realm, name).await?;
            RaidMetrics::from_document(&encounters, &self.current_expansion).apply(&mut record);
        }

        if self.features.mythic_plus {
            let profile = self.client.mythic_keystone_profile(realm, name).await?;
            let season = self.client.mythic_keystone_season(realm, name, self.season_id).await?;
            MythicPlusMetrics::from_documents(&profile, &season).apply(&mut record);
        }

        Ok(record)
    }

    /// Fetch and extract the server record for one realm.
    ///
    /// The connected-realm fetch depends on the id found in the realm
    /// document; without one, the extractor runs on an empty document and
    /// the record reads "Unknown".
    async fn collect_realm(&self, realm: &str) -> Result<MetricRecord, ClientError> {
        let realm_info = self.client.realm_info(realm).await?;

        let connected = match realm_info.get("id").and_then(serde_json::Value::as_u64) {
            Some(id) => self.client.connected_realm(id).await?,
            None => armorywatch_client::Payload::Empty,
        };

        let mut record = MetricRecord::new();
        RealmMetrics::from_documents(&realm_info, &connected).apply(&mut record);
        Ok(record)
    }

    /// Start the poll loop in a background task.
    ///
    /// The first cycle runs immediately; subsequent cycles follow the
    /// configured interval. Each snapshot goes to the watch channel and to
    /// every configured output. A failed cycle republishes the previous
    /// snapshot's records with `success` cleared, and the loop carries on
    /// with the next tick.
    pub fn start(self) -> PollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::builder().success(false).build());

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = Snapshot::builder().success(false).build();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Cancellation is whole-cycle: a stop request mid-cycle
                        // abandons in-flight work with no partial publish.
                        let result = tokio::select! {
                            result = self.run_cycle() => result,
                            _ = stop_requested(&mut stop_rx) => return,
                        };

                        let snapshot = match result {
                            Ok(snapshot) => {
                                info!(
                                    characters = snapshot.character_count(),
                                    realms = snapshot.realm_count(),
                                    "poll cycle complete"
                                );
                                snapshot
                            }
                            Err(err) => {
                                error!(error = %err, "poll cycle failed, keeping previous snapshot");
                                last.clone().into_failed()
                            }
                        };

                        for output in &self.outputs {
                            if let Err(err) = output.emit(&snapshot).await {
                                error!(error = %err, "failed to emit snapshot");
                            }
                        }

                        last = snapshot.clone();
                        let _ = snapshot_tx.send(snapshot);
                    }
                    _ = stop_requested(&mut stop_rx) => return,
                }
            }
        });

        PollerHandle {
            stop_tx,
            snapshot_rx,
        }
    }
}

/// Resolves once a stop has been requested. A dropped [`PollerHandle`]
/// counts as a stop request.
async fn stop_requested(stop_rx: &mut watch::Receiver<bool>) {
    while stop_rx.changed().await.is_ok() {
        if *stop_rx.borrow() {
            return;
        }
    }
}

/// Handle for observing and stopping a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl PollerHandle {
    /// A receiver of published snapshots. The initial value is an empty
    /// snapshot with `success` cleared; wait for a change before reading.
    pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the poll loop. In-flight work is abandoned at the next await
    /// point; no partial snapshot is published.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}
