//! Build/release driver.
//!
//! Issues a version build on the control plane, polls until the build
//! reaches a terminal status within a bounded wall-clock budget, then
//! repoints a named alias at the resulting version.
//!
//! The build state machine is `Requested -> Building -> {Available, Failed}`.
//! `Available` and `Failed` are terminal and never left. A `NotFound` from
//! the status poll is treated as `Building` -- the job record may not be
//! queryable for a short window after creation -- but only until the timeout
//! budget runs out, so a job that never materializes fails with
//! `BuildTimeout` instead of hanging.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use colloquy_types::config::PollConfig;
use colloquy_types::error::LifecycleError;
use colloquy_types::lifecycle::{AliasBinding, BuildJob, BuildStatus, VersionSource};

use crate::endpoint::LifecycleEndpoint;

/// Consecutive transport failures on the idempotent status poll before the
/// error is surfaced. Mutating calls are never retried.
const MAX_POLL_TRANSPORT_FAILURES: u32 = 3;

/// Delay sequence between polls.
///
/// With a multiplier of 1.0 this is a fixed interval; above 1.0 the delay
/// stretches after each attempt, capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    multiplier: f64,
    max: Duration,
}

impl Backoff {
    pub fn new(config: &PollConfig) -> Self {
        Self {
            next: config.interval(),
            multiplier: config.backoff_multiplier,
            max: config.max_interval(),
        }
    }

    /// The delay to apply before the next poll, advancing the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.next;
        let stretched = current.mul_f64(self.multiplier.max(1.0));
        self.next = stretched.min(self.max);
        current
    }
}

/// Drives version builds and alias flips against a [`LifecycleEndpoint`].
///
/// Holds no per-job state; independent build jobs may run concurrently
/// through the same driver.
pub struct ReleaseDriver<E> {
    endpoint: E,
    poll: PollConfig,
}

impl<E: LifecycleEndpoint> ReleaseDriver<E> {
    pub fn new(endpoint: E, poll: PollConfig) -> Self {
        Self { endpoint, poll }
    }

    /// Direct access to the underlying control-plane endpoint, for
    /// operations outside the build/release flow (e.g. preflight lookups).
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Request a new version build from `DRAFT` and wait for it to finish.
    ///
    /// Blocks the calling flow (cooperatively) until the build reaches a
    /// terminal status or the configured timeout elapses. The service offers
    /// no cancellation primitive; on timeout the job is left in whatever
    /// state the service reports.
    ///
    /// # Errors
    ///
    /// `BuildFailed` when the service reports a terminal failure,
    /// `BuildTimeout` when the wait budget is exhausted, plus the transport
    /// and service errors of the underlying calls.
    pub async fn build_new_version(
        &self,
        bot_id: &str,
        locale_id: &str,
        description: &str,
    ) -> Result<BuildJob, LifecycleError> {
        let job = self
            .endpoint
            .create_version(bot_id, locale_id, VersionSource::Draft, description)
            .await?;

        info!(bot_id = %job.bot_id, version = %job.version, "Version build requested");

        match job.status {
            BuildStatus::Available => Ok(job),
            BuildStatus::Failed => Err(LifecycleError::BuildFailed {
                reason: job
                    .failure_reason
                    .unwrap_or_else(|| "no failure reason reported".to_string()),
            }),
            BuildStatus::Building => self.wait_for_available(job).await,
        }
    }

    /// Poll `describe_version` until the job leaves `Building`.
    async fn wait_for_available(&self, job: BuildJob) -> Result<BuildJob, LifecycleError> {
        let started = Instant::now();
        let deadline = started + self.poll.timeout();
        let mut backoff = Backoff::new(&self.poll);
        let mut transport_failures = 0u32;

        loop {
            let now = Instant::now();
            if now >= deadline {
                warn!(
                    bot_id = %job.bot_id,
                    version = %job.version,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "Build wait budget exhausted"
                );
                return Err(LifecycleError::BuildTimeout {
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }

            // Never sleep past the deadline; a delay longer than the
            // remaining budget would turn the timeout into interval rounding.
            let delay = backoff.next_delay().min(deadline - now);
            tokio::time::sleep(delay).await;

            match self.endpoint.describe_version(&job.bot_id, &job.version).await {
                Ok(polled) => {
                    transport_failures = 0;
                    debug!(version = %polled.version, status = %polled.status, "Build status");
                    match polled.status {
                        BuildStatus::Available => return Ok(polled),
                        BuildStatus::Failed => {
                            return Err(LifecycleError::BuildFailed {
                                reason: polled
                                    .failure_reason
                                    .unwrap_or_else(|| "no failure reason reported".to_string()),
                            });
                        }
                        BuildStatus::Building => {}
                    }
                }
                // The job record may lag its creation; treat as Building.
                Err(LifecycleError::NotFound) => {
                    debug!(version = %job.version, "Build not yet queryable");
                }
                Err(LifecycleError::Transport { message })
                    if transport_failures + 1 < MAX_POLL_TRANSPORT_FAILURES =>
                {
                    transport_failures += 1;
                    warn!(
                        version = %job.version,
                        attempt = transport_failures,
                        error = %message,
                        "Transient transport failure during status poll"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Point `alias_name` at `version`.
    ///
    /// The control plane offers no lookup-by-name primitive, so the alias id
    /// is resolved by listing all aliases and matching on name. A miss fails
    /// with `AliasNotFound` and never issues the update call.
    pub async fn point_alias_at_version(
        &self,
        bot_id: &str,
        alias_name: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<AliasBinding, LifecycleError> {
        let aliases = self.endpoint.list_aliases(bot_id).await?;
        let alias = aliases
            .into_iter()
            .find(|a| a.alias_name == alias_name)
            .ok_or_else(|| LifecycleError::AliasNotFound {
                name: alias_name.to_string(),
            })?;

        let binding = self
            .endpoint
            .update_alias(bot_id, &alias.alias_id, alias_name, version, locale_id)
            .await?;

        info!(
            alias = %binding.alias_name,
            alias_id = %binding.alias_id,
            version = %binding.bound_version,
            "Alias updated"
        );
        Ok(binding)
    }

    /// Build a new version from `DRAFT` and flip `alias_name` to it.
    ///
    /// The end-to-end release flow: build, wait, repoint. After success the
    /// binding's `bound_version` equals the build job's result version.
    pub async fn release(
        &self,
        bot_id: &str,
        locale_id: &str,
        alias_name: &str,
        description: &str,
    ) -> Result<(BuildJob, AliasBinding), LifecycleError> {
        let job = self.build_new_version(bot_id, locale_id, description).await?;
        let version = match job.result_version() {
            Some(v) => v.to_string(),
            // Unreachable while build_new_version only returns Available
            // jobs, but a surfaced error beats a panic if that changes.
            None => {
                return Err(LifecycleError::BuildFailed {
                    reason: format!("build ended in non-available status {}", job.status),
                });
            }
        };
        let binding = self
            .point_alias_at_version(bot_id, alias_name, &version, locale_id)
            .await?;
        Ok((job, binding))
    }
}
