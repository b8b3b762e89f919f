//! Endpoint trait definitions.
//!
//! These are the two remote collaborators, expressed as traits so the
//! drivers can be exercised against scripted in-memory endpoints in tests.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in colloquy-infra (`HttpConversationClient`,
//! `HttpLifecycleClient`).

use colloquy_types::conversation::{RecognizeRequest, Turn};
use colloquy_types::error::{ConverseError, LifecycleError};
use colloquy_types::lifecycle::{AliasBinding, AliasSummary, BotInfo, BuildJob, VersionSource};

/// The conversation runtime plane: one utterance in, one parsed turn out.
///
/// Stateful on the server side per session identifier, but the caller must
/// still forward the last known attribute bag on every request.
pub trait ConversationEndpoint: Send + Sync {
    /// Send a single user utterance and receive the parsed turn.
    fn recognize_text(
        &self,
        request: &RecognizeRequest,
    ) -> impl std::future::Future<Output = Result<Turn, ConverseError>> + Send;
}

/// The control plane: version builds and alias management.
///
/// Build creation and alias updates are asynchronous on the service side;
/// `describe_version` is the polling primitive and may transiently report
/// [`LifecycleError::NotFound`] for a short window after creation.
pub trait LifecycleEndpoint: Send + Sync {
    /// Request a new version build from the given source.
    ///
    /// The returned job carries the version identifier the service assigned;
    /// the build itself completes asynchronously.
    fn create_version(
        &self,
        bot_id: &str,
        locale_id: &str,
        source: VersionSource,
        description: &str,
    ) -> impl std::future::Future<Output = Result<BuildJob, LifecycleError>> + Send;

    /// Poll the status of a version build.
    ///
    /// Returns `Err(LifecycleError::NotFound)` while the job record is not
    /// yet queryable.
    fn describe_version(
        &self,
        bot_id: &str,
        version: &str,
    ) -> impl std::future::Future<Output = Result<BuildJob, LifecycleError>> + Send;

    /// List all aliases defined on a bot.
    fn list_aliases(
        &self,
        bot_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<AliasSummary>, LifecycleError>> + Send;

    /// Point an alias at a version, enabling it for the given locale.
    fn update_alias(
        &self,
        bot_id: &str,
        alias_id: &str,
        alias_name: &str,
        version: &str,
        locale_id: &str,
    ) -> impl std::future::Future<Output = Result<AliasBinding, LifecycleError>> + Send;

    /// Fetch basic bot metadata, used as a preflight check before a release.
    fn describe_bot(
        &self,
        bot_id: &str,
    ) -> impl std::future::Future<Output = Result<BotInfo, LifecycleError>> + Send;
}
