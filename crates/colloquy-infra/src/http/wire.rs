//! Platform wire types.
//!
//! These are the HTTP request/response shapes of the platform's REST API.
//! They are NOT the domain types from colloquy-types -- those are
//! plane-agnostic. Required fields are validated here, at the
//! deserialization boundary: a response missing its session state or intent
//! is a typed error, never a silent default.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use colloquy_types::conversation::{
    ActiveContext, BotMessage, ConfirmationState, ContentType, DialogActionType, IntentState, Turn,
};
use colloquy_types::error::ConverseError;
use colloquy_types::lifecycle::{
    AliasBinding, AliasStatus, AliasSummary, BotInfo, BuildJob, BuildStatus, VersionSource,
};

// ---------------------------------------------------------------------------
// Runtime plane
// ---------------------------------------------------------------------------

/// Request body for the recognize-text operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeTextRequest {
    pub text: String,
    /// Always sent: the service treats an omitted bag as "no context",
    /// not as "unchanged context".
    pub session_state: RequestSessionState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSessionState {
    pub session_attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeTextResponse {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
    pub session_state: Option<WireSessionState>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    pub content: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSessionState {
    #[serde(default)]
    pub session_attributes: HashMap<String, String>,
    pub intent: Option<WireIntent>,
    pub dialog_action: Option<WireDialogAction>,
    #[serde(default)]
    pub active_contexts: Vec<WireActiveContext>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireIntent {
    pub name: String,
    pub state: Option<String>,
    pub confirmation_state: Option<String>,
    /// A slot key mapped to `null` means the slot exists but is unfilled.
    #[serde(default)]
    pub slots: HashMap<String, Option<WireSlot>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSlot {
    pub value: Option<WireSlotValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSlotValue {
    pub interpreted_value: Option<String>,
    pub original_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDialogAction {
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireActiveContext {
    pub name: String,
}

/// Error body returned by both planes on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// Convert a runtime-plane response into a domain [`Turn`].
///
/// # Errors
///
/// `Deserialization` when the response is missing its session state or
/// intent, or when an enum string falls outside the documented contract.
pub fn turn_from_wire(utterance: &str, resp: RecognizeTextResponse) -> Result<Turn, ConverseError> {
    let state = resp
        .session_state
        .ok_or_else(|| ConverseError::Deserialization("response missing sessionState".to_string()))?;
    let intent = state
        .intent
        .ok_or_else(|| ConverseError::Deserialization("sessionState missing intent".to_string()))?;

    let intent_state = intent
        .state
        .as_deref()
        .ok_or_else(|| ConverseError::Deserialization("intent missing state".to_string()))
        .and_then(|s| IntentState::from_str(s).map_err(ConverseError::Deserialization))?;

    let confirmation_state = match intent.confirmation_state.as_deref() {
        Some(s) => ConfirmationState::from_str(s).map_err(ConverseError::Deserialization)?,
        None => ConfirmationState::None,
    };

    let dialog_action = match state.dialog_action {
        Some(action) => Some(
            DialogActionType::from_str(&action.action_type)
                .map_err(ConverseError::Deserialization)?,
        ),
        None => None,
    };

    let mut messages = Vec::with_capacity(resp.messages.len());
    for m in resp.messages {
        let content = m
            .content
            .ok_or_else(|| ConverseError::Deserialization("message missing content".to_string()))?;
        let content_type = match m.content_type.as_deref() {
            Some(s) => ContentType::from_str(s).map_err(ConverseError::Deserialization)?,
            None => ContentType::PlainText,
        };
        messages.push(BotMessage {
            content,
            content_type,
        });
    }

    let slots = intent
        .slots
        .into_iter()
        .map(|(name, slot)| {
            let value = slot
                .and_then(|s| s.value)
                .and_then(|v| v.interpreted_value.or(v.original_value));
            (name, value)
        })
        .collect();

    Ok(Turn {
        utterance: utterance.to_string(),
        messages,
        intent_name: intent.name,
        intent_state,
        confirmation_state,
        dialog_action,
        slots,
        session_attributes: state.session_attributes,
        active_contexts: state
            .active_contexts
            .into_iter()
            .map(|c| ActiveContext { name: c.name })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Control plane
// ---------------------------------------------------------------------------

/// Request body for version creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    pub description: String,
    /// Per-locale version source, keyed by locale id.
    pub locale_specification: HashMap<String, LocaleVersionSource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleVersionSource {
    pub source_version: VersionSource,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub bot_id: String,
    pub version: String,
    pub status: String,
    #[serde(default)]
    pub failure_reasons: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAliasesResponse {
    #[serde(default)]
    pub alias_summaries: Vec<WireAliasSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAliasSummary {
    pub alias_id: String,
    pub alias_name: String,
    pub bound_version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAliasRequest {
    pub alias_name: String,
    pub version: String,
    /// Per-locale enablement, keyed by locale id.
    pub locale_settings: HashMap<String, AliasLocaleSetting>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasLocaleSetting {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAliasResponse {
    pub alias_id: String,
    pub alias_name: String,
    pub bot_id: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    pub bot_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// Map a control-plane bot status string onto the build state machine.
///
/// The service reports a handful of transitional statuses while a build is
/// underway; all of them are `Building` to the caller. Unknown strings are
/// an error, not a silent default.
pub fn build_status_from_wire(status: &str) -> Result<BuildStatus, String> {
    match status {
        "Available" => Ok(BuildStatus::Available),
        "Failed" => Ok(BuildStatus::Failed),
        "Building" | "Versioning" | "Creating" => Ok(BuildStatus::Building),
        other => Err(format!("invalid bot status: '{other}'")),
    }
}

impl VersionResponse {
    /// Convert into a domain [`BuildJob`], joining any failure reasons into
    /// one literal message.
    pub fn into_build_job(self) -> Result<BuildJob, String> {
        let status = build_status_from_wire(&self.status)?;
        let failure_reason = if self.failure_reasons.is_empty() {
            None
        } else {
            Some(self.failure_reasons.join("; "))
        };
        Ok(BuildJob {
            bot_id: self.bot_id,
            version: self.version,
            status,
            failure_reason,
        })
    }
}

impl WireAliasSummary {
    pub fn into_summary(self) -> AliasSummary {
        AliasSummary {
            alias_id: self.alias_id,
            alias_name: self.alias_name,
            bound_version: self.bound_version,
        }
    }
}

impl UpdateAliasResponse {
    pub fn into_binding(self) -> Result<AliasBinding, String> {
        let status = AliasStatus::from_str(&self.status)?;
        Ok(AliasBinding {
            alias_id: self.alias_id,
            alias_name: self.alias_name,
            bot_id: self.bot_id,
            bound_version: self.version,
            status,
        })
    }
}

impl BotResponse {
    pub fn into_info(self) -> BotInfo {
        BotInfo {
            bot_id: self.bot_id,
            name: self.name,
            description: self.description,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_request_always_carries_bag() {
        let req = RecognizeTextRequest {
            text: "I want to order a pizza".to_string(),
            session_state: RequestSessionState {
                session_attributes: HashMap::new(),
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["text"], "I want to order a pizza");
        // Even an empty bag is serialized explicitly.
        assert!(json["sessionState"]["sessionAttributes"].is_object());
    }

    #[test]
    fn test_turn_from_wire_full_response() {
        let json = r#"{
            "messages": [
                {"content": "Pepperoni or cheese?", "contentType": "PlainText"}
            ],
            "sessionState": {
                "sessionAttributes": {"customerName": "John Doe"},
                "intent": {
                    "name": "OrderPizza",
                    "state": "InProgress",
                    "confirmationState": "None",
                    "slots": {
                        "size": {"value": {"interpretedValue": "Large", "originalValue": "large"}},
                        "topping": null
                    }
                },
                "dialogAction": {"type": "ElicitSlot"},
                "activeContexts": [{"name": "ordering"}]
            }
        }"#;
        let resp: RecognizeTextResponse = serde_json::from_str(json).unwrap();
        let turn = turn_from_wire("Large", resp).unwrap();

        assert_eq!(turn.utterance, "Large");
        assert_eq!(turn.reply(), Some("Pepperoni or cheese?"));
        assert_eq!(turn.intent_name, "OrderPizza");
        assert_eq!(turn.intent_state, IntentState::InProgress);
        assert_eq!(turn.dialog_action, Some(DialogActionType::ElicitSlot));
        assert_eq!(turn.slot("size"), Some("Large"));
        assert_eq!(turn.slot("topping"), None);
        assert_eq!(turn.session_attributes["customerName"], "John Doe");
        assert_eq!(turn.active_contexts[0].name, "ordering");
    }

    #[test]
    fn test_turn_from_wire_missing_session_state() {
        let resp: RecognizeTextResponse =
            serde_json::from_str(r#"{"messages": []}"#).unwrap();
        let err = turn_from_wire("hi", resp).unwrap_err();
        assert!(err.to_string().contains("sessionState"));
    }

    #[test]
    fn test_turn_from_wire_missing_intent() {
        let resp: RecognizeTextResponse =
            serde_json::from_str(r#"{"sessionState": {"sessionAttributes": {}}}"#).unwrap();
        let err = turn_from_wire("hi", resp).unwrap_err();
        assert!(err.to_string().contains("intent"));
    }

    #[test]
    fn test_turn_from_wire_unknown_intent_state_is_error() {
        let json = r#"{
            "sessionState": {
                "intent": {"name": "OrderPizza", "state": "Pondering"}
            }
        }"#;
        let resp: RecognizeTextResponse = serde_json::from_str(json).unwrap();
        let err = turn_from_wire("hi", resp).unwrap_err();
        assert!(err.to_string().contains("Pondering"));
    }

    #[test]
    fn test_slot_falls_back_to_original_value() {
        let json = r#"{
            "sessionState": {
                "intent": {
                    "name": "OrderPizza",
                    "state": "InProgress",
                    "slots": {"size": {"value": {"originalValue": "large"}}}
                }
            }
        }"#;
        let resp: RecognizeTextResponse = serde_json::from_str(json).unwrap();
        let turn = turn_from_wire("large", resp).unwrap();
        assert_eq!(turn.slot("size"), Some("large"));
    }

    #[test]
    fn test_create_version_request_serialization() {
        let mut locales = HashMap::new();
        locales.insert(
            "en_US".to_string(),
            LocaleVersionSource {
                source_version: VersionSource::Draft,
            },
        );
        let req = CreateVersionRequest {
            description: "Version created via SDK".to_string(),
            locale_specification: locales,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json["localeSpecification"]["en_US"]["sourceVersion"],
            "DRAFT"
        );
    }

    #[test]
    fn test_build_status_mapping() {
        assert_eq!(build_status_from_wire("Available").unwrap(), BuildStatus::Available);
        assert_eq!(build_status_from_wire("Failed").unwrap(), BuildStatus::Failed);
        assert_eq!(build_status_from_wire("Building").unwrap(), BuildStatus::Building);
        assert_eq!(build_status_from_wire("Versioning").unwrap(), BuildStatus::Building);
        assert!(build_status_from_wire("Frobnicating").is_err());
    }

    #[test]
    fn test_version_response_joins_failure_reasons() {
        let resp = VersionResponse {
            bot_id: "B123".to_string(),
            version: "2".to_string(),
            status: "Failed".to_string(),
            failure_reasons: vec![
                "Intent 'OrderPizza' has no sample utterances".to_string(),
                "Slot 'size' has no prompt".to_string(),
            ],
        };
        let job = resp.into_build_job().unwrap();
        assert_eq!(job.status, BuildStatus::Failed);
        let reason = job.failure_reason.unwrap();
        assert!(reason.contains("no sample utterances"));
        assert!(reason.contains("no prompt"));
    }

    #[test]
    fn test_update_alias_response_into_binding() {
        let resp = UpdateAliasResponse {
            alias_id: "ALIAS2".to_string(),
            alias_name: "PROD".to_string(),
            bot_id: "B123".to_string(),
            version: "2".to_string(),
            status: "Updating".to_string(),
        };
        let binding = resp.into_binding().unwrap();
        assert_eq!(binding.bound_version, "2");
        assert_eq!(binding.status, AliasStatus::Updating);
    }

    #[test]
    fn test_list_aliases_response_deserialization() {
        let json = r#"{
            "aliasSummaries": [
                {"aliasId": "ALIAS1", "aliasName": "DEMO", "boundVersion": "1"},
                {"aliasId": "ALIAS2", "aliasName": "PROD"}
            ]
        }"#;
        let resp: ListAliasesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.alias_summaries.len(), 2);
        let prod = resp.alias_summaries[1].clone().into_summary();
        assert_eq!(prod.alias_name, "PROD");
        assert_eq!(prod.bound_version, None);
    }

    #[test]
    fn test_api_error_deserialization() {
        let err: ApiError =
            serde_json::from_str(r#"{"message": "Bot B123 not found"}"#).unwrap();
        assert_eq!(err.message, "Bot B123 not found");
    }
}
