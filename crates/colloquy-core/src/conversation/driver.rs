//! Session conversation driver.
//!
//! Threads a session identifier and a mutable attribute bag through repeated
//! request/response exchanges against a [`ConversationEndpoint`]. Turns
//! within one session are serialized; the service is not guaranteed to handle
//! out-of-order turns against the same session identifier.

use std::collections::HashMap;

use tracing::{debug, warn};

use colloquy_types::config::BotTarget;
use colloquy_types::conversation::{RecognizeRequest, Session, Turn};
use colloquy_types::error::ConverseError;

use crate::endpoint::ConversationEndpoint;

/// Attribute key recording the most recently recognized intent.
const ATTR_LAST_INTENT: &str = "lastIntent";

/// Result of feeding a scripted sequence of utterances through a session.
///
/// A failed turn truncates the script: `turns` holds the completed prefix
/// and `failure` the error that stopped it. A partial script never silently
/// continues with stale state.
#[derive(Debug)]
pub struct ScriptRun {
    /// Turns completed before the script ended or failed.
    pub turns: Vec<Turn>,
    /// The error that stopped the script early, if any.
    pub failure: Option<ConverseError>,
}

impl ScriptRun {
    /// Whether every scripted utterance produced a turn.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Drives multi-turn conversations against one bot target.
///
/// Holds no per-conversation state itself; each [`Session`] carries its own
/// identifier and attribute bag, so independent sessions may run
/// concurrently against the same driver.
pub struct SessionDriver<E> {
    endpoint: E,
    target: BotTarget,
}

impl<E: ConversationEndpoint> SessionDriver<E> {
    pub fn new(endpoint: E, target: BotTarget) -> Self {
        Self { endpoint, target }
    }

    pub fn target(&self) -> &BotTarget {
        &self.target
    }

    /// Allocate a fresh session with a unique identifier and an empty
    /// attribute bag.
    pub fn start_session(&self) -> Session {
        let session = Session::new();
        debug!(session_id = %session.session_id, bot_id = %self.target.bot_id, "Session started");
        session
    }

    /// Send one utterance and advance the session.
    ///
    /// Merges `extra_attributes` into the session bag (new keys win), issues
    /// a single request carrying the merged bag, and on success replaces the
    /// bag with the attributes the service echoed back. On failure the error
    /// is returned as a value so a multi-turn loop can decide to abort; the
    /// merged extras stay in the bag for a retry.
    pub async fn send_turn(
        &self,
        session: &mut Session,
        utterance: &str,
        extra_attributes: HashMap<String, String>,
    ) -> Result<Turn, ConverseError> {
        session.merge_attributes(extra_attributes);

        let request = RecognizeRequest {
            bot_id: self.target.bot_id.clone(),
            alias_id: self.target.alias_id.clone(),
            locale_id: self.target.locale_id.clone(),
            session_id: session.session_id.clone(),
            text: utterance.to_string(),
            session_attributes: session.attributes.clone(),
        };

        let turn = self.endpoint.recognize_text(&request).await?;

        debug!(
            session_id = %session.session_id,
            intent = %turn.intent_name,
            state = %turn.intent_state,
            "Turn completed"
        );

        session.attributes = turn.session_attributes.clone();
        Ok(turn)
    }

    /// Feed each utterance through [`send_turn`](Self::send_turn) in order,
    /// threading attributes turn-to-turn.
    ///
    /// After each successful turn the driver injects bookkeeping keys into
    /// the bag (`turn_<n>_intent`, `turn_<n>_state`, `lastIntent`) so later
    /// turns and the caller can see how the conversation progressed. Stops
    /// at the first failed turn, returning the completed prefix.
    pub async fn run_script<S: AsRef<str>>(
        &self,
        session: &mut Session,
        utterances: &[S],
    ) -> ScriptRun {
        let mut turns = Vec::with_capacity(utterances.len());

        for (i, utterance) in utterances.iter().enumerate() {
            match self.send_turn(session, utterance.as_ref(), HashMap::new()).await {
                Ok(turn) => {
                    let n = i + 1;
                    session
                        .attributes
                        .insert(format!("turn_{n}_intent"), turn.intent_name.clone());
                    session
                        .attributes
                        .insert(format!("turn_{n}_state"), turn.intent_state.to_string());
                    session
                        .attributes
                        .insert(ATTR_LAST_INTENT.to_string(), turn.intent_name.clone());
                    turns.push(turn);
                }
                Err(e) => {
                    warn!(
                        session_id = %session.session_id,
                        turn = i + 1,
                        error = %e,
                        "Script stopped early"
                    );
                    return ScriptRun {
                        turns,
                        failure: Some(e),
                    };
                }
            }
        }

        ScriptRun {
            turns,
            failure: None,
        }
    }
}
