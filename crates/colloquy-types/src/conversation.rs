//! Conversation runtime types.
//!
//! These types model one side of the runtime-plane contract: the caller-held
//! [`Session`] with its attribute bag, the [`RecognizeRequest`] sent for each
//! utterance, and the parsed [`Turn`] the service replies with. The remote
//! dialog engine owns intent and slot state; the client's only obligation is
//! to thread the attribute bag faithfully between turns.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A caller-held conversation context.
///
/// The service is stateful per `session_id`, but it treats an omitted
/// attribute bag as "no context" rather than "unchanged context", so the
/// caller must carry the most recently observed bag on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque, globally unique session identifier.
    pub session_id: String,
    /// String-to-string attribute bag threaded across turns.
    pub attributes: HashMap<String, String>,
}

impl Session {
    /// Create a fresh session with a random identifier and an empty bag.
    ///
    /// Identifiers are `session-<uuid-v4>`, making collisions across
    /// concurrent conversations cryptographically negligible.
    pub fn new() -> Self {
        Self {
            session_id: format!("session-{}", Uuid::new_v4()),
            attributes: HashMap::new(),
        }
    }

    /// Merge `extra` into the attribute bag. New keys win on conflict.
    pub fn merge_attributes(&mut self, extra: HashMap<String, String>) {
        self.attributes.extend(extra);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// One utterance sent to the conversation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeRequest {
    pub bot_id: String,
    pub alias_id: String,
    pub locale_id: String,
    pub session_id: String,
    /// The user's utterance text.
    pub text: String,
    /// Attribute bag to carry; the service echoes it back merged with its
    /// own derived attributes.
    pub session_attributes: HashMap<String, String>,
}

/// The remote dialog engine's classification of how complete the current
/// user goal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentState {
    InProgress,
    Fulfilled,
    FulfillmentInProgress,
    Failed,
    Waiting,
    ReadyForFulfillment,
}

impl IntentState {
    /// Whether the dialog engine considers the current goal finished,
    /// successfully or not.
    pub fn is_closed(self) -> bool {
        matches!(self, IntentState::Fulfilled | IntentState::Failed)
    }
}

impl fmt::Display for IntentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentState::InProgress => write!(f, "InProgress"),
            IntentState::Fulfilled => write!(f, "Fulfilled"),
            IntentState::FulfillmentInProgress => write!(f, "FulfillmentInProgress"),
            IntentState::Failed => write!(f, "Failed"),
            IntentState::Waiting => write!(f, "Waiting"),
            IntentState::ReadyForFulfillment => write!(f, "ReadyForFulfillment"),
        }
    }
}

impl FromStr for IntentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InProgress" => Ok(IntentState::InProgress),
            "Fulfilled" => Ok(IntentState::Fulfilled),
            "FulfillmentInProgress" => Ok(IntentState::FulfillmentInProgress),
            "Failed" => Ok(IntentState::Failed),
            "Waiting" => Ok(IntentState::Waiting),
            "ReadyForFulfillment" => Ok(IntentState::ReadyForFulfillment),
            other => Err(format!("invalid intent state: '{other}'")),
        }
    }
}

/// Confirmation status of the current intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationState {
    None,
    Confirmed,
    Denied,
}

impl fmt::Display for ConfirmationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationState::None => write!(f, "None"),
            ConfirmationState::Confirmed => write!(f, "Confirmed"),
            ConfirmationState::Denied => write!(f, "Denied"),
        }
    }
}

impl FromStr for ConfirmationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(ConfirmationState::None),
            "Confirmed" => Ok(ConfirmationState::Confirmed),
            "Denied" => Ok(ConfirmationState::Denied),
            other => Err(format!("invalid confirmation state: '{other}'")),
        }
    }
}

/// What the dialog engine will do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogActionType {
    ElicitIntent,
    ElicitSlot,
    ConfirmIntent,
    Close,
    Delegate,
}

impl fmt::Display for DialogActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogActionType::ElicitIntent => write!(f, "ElicitIntent"),
            DialogActionType::ElicitSlot => write!(f, "ElicitSlot"),
            DialogActionType::ConfirmIntent => write!(f, "ConfirmIntent"),
            DialogActionType::Close => write!(f, "Close"),
            DialogActionType::Delegate => write!(f, "Delegate"),
        }
    }
}

impl FromStr for DialogActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ElicitIntent" => Ok(DialogActionType::ElicitIntent),
            "ElicitSlot" => Ok(DialogActionType::ElicitSlot),
            "ConfirmIntent" => Ok(DialogActionType::ConfirmIntent),
            "Close" => Ok(DialogActionType::Close),
            "Delegate" => Ok(DialogActionType::Delegate),
            other => Err(format!("invalid dialog action type: '{other}'")),
        }
    }
}

/// Content type of a bot output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
    Ssml,
    CustomPayload,
    ImageResponseCard,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::PlainText => write!(f, "PlainText"),
            ContentType::Ssml => write!(f, "SSML"),
            ContentType::CustomPayload => write!(f, "CustomPayload"),
            ContentType::ImageResponseCard => write!(f, "ImageResponseCard"),
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlainText" => Ok(ContentType::PlainText),
            "SSML" => Ok(ContentType::Ssml),
            "CustomPayload" => Ok(ContentType::CustomPayload),
            "ImageResponseCard" => Ok(ContentType::ImageResponseCard),
            other => Err(format!("invalid content type: '{other}'")),
        }
    }
}

/// One bot output message within a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotMessage {
    pub content: String,
    pub content_type: ContentType,
}

/// An active dialog context reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveContext {
    pub name: String,
}

/// One utterance/response exchange within a session.
///
/// Ephemeral: produced by the conversation endpoint for a single request.
/// `session_attributes` is the attribute bag as echoed back by the service;
/// the driver copies it into the [`Session`] before handing the turn to the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// The user utterance this turn answered.
    pub utterance: String,
    /// Bot output messages, in service order. May be empty when the dialog
    /// engine delegates fulfillment without a prompt.
    pub messages: Vec<BotMessage>,
    pub intent_name: String,
    pub intent_state: IntentState,
    pub confirmation_state: ConfirmationState,
    pub dialog_action: Option<DialogActionType>,
    /// Slot fill state: `None` means the slot exists but is not yet filled.
    pub slots: HashMap<String, Option<String>>,
    /// Attribute bag echoed by the service for this turn.
    pub session_attributes: HashMap<String, String>,
    pub active_contexts: Vec<ActiveContext>,
}

impl Turn {
    /// Content of the first bot message, the conversational reply.
    pub fn reply(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }

    /// Interpreted value of a filled slot, if present and filled.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|v| v.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_session_id_format() {
        let session = Session::new();
        assert!(session.session_id.starts_with("session-"));
        assert!(session.attributes.is_empty());
    }

    #[test]
    fn test_session_ids_distinct() {
        let ids: HashSet<String> = (0..100).map(|_| Session::new().session_id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_merge_attributes_new_keys_win() {
        let mut session = Session::new();
        session
            .attributes
            .insert("customerType".to_string(), "Standard".to_string());
        session
            .attributes
            .insert("orderCount".to_string(), "3".to_string());

        let mut extra = HashMap::new();
        extra.insert("customerType".to_string(), "VIP".to_string());
        extra.insert("customerName".to_string(), "John Doe".to_string());
        session.merge_attributes(extra);

        assert_eq!(session.attributes["customerType"], "VIP");
        assert_eq!(session.attributes["orderCount"], "3");
        assert_eq!(session.attributes["customerName"], "John Doe");
    }

    #[test]
    fn test_intent_state_roundtrip() {
        for state in [
            IntentState::InProgress,
            IntentState::Fulfilled,
            IntentState::FulfillmentInProgress,
            IntentState::Failed,
            IntentState::Waiting,
            IntentState::ReadyForFulfillment,
        ] {
            let s = state.to_string();
            let parsed: IntentState = s.parse().unwrap();
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn test_intent_state_rejects_unknown() {
        assert!("Pondering".parse::<IntentState>().is_err());
    }

    #[test]
    fn test_intent_state_is_closed() {
        assert!(IntentState::Fulfilled.is_closed());
        assert!(IntentState::Failed.is_closed());
        assert!(!IntentState::InProgress.is_closed());
        assert!(!IntentState::Waiting.is_closed());
    }

    #[test]
    fn test_content_type_roundtrip() {
        for ct in [
            ContentType::PlainText,
            ContentType::Ssml,
            ContentType::CustomPayload,
            ContentType::ImageResponseCard,
        ] {
            let s = ct.to_string();
            let parsed: ContentType = s.parse().unwrap();
            assert_eq!(ct, parsed);
        }
    }

    #[test]
    fn test_dialog_action_roundtrip() {
        for action in [
            DialogActionType::ElicitIntent,
            DialogActionType::ElicitSlot,
            DialogActionType::ConfirmIntent,
            DialogActionType::Close,
            DialogActionType::Delegate,
        ] {
            let s = action.to_string();
            let parsed: DialogActionType = s.parse().unwrap();
            assert_eq!(action, parsed);
        }
    }

    #[test]
    fn test_turn_reply_and_slot() {
        let mut slots = HashMap::new();
        slots.insert("size".to_string(), Some("Large".to_string()));
        slots.insert("crust".to_string(), None);

        let turn = Turn {
            utterance: "Large".to_string(),
            messages: vec![BotMessage {
                content: "Pepperoni or cheese?".to_string(),
                content_type: ContentType::PlainText,
            }],
            intent_name: "OrderPizza".to_string(),
            intent_state: IntentState::InProgress,
            confirmation_state: ConfirmationState::None,
            dialog_action: Some(DialogActionType::ElicitSlot),
            slots,
            session_attributes: HashMap::new(),
            active_contexts: vec![],
        };

        assert_eq!(turn.reply(), Some("Pepperoni or cheese?"));
        assert_eq!(turn.slot("size"), Some("Large"));
        assert_eq!(turn.slot("crust"), None);
        assert_eq!(turn.slot("topping"), None);
    }
}
