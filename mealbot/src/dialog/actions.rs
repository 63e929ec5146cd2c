// Dialog actions: the single value a turn produces
//
// Each variant carries the payload the external response builder needs to
// render the reply. Exactly one action comes out of every turn.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::SlotSet;

/// A button offered alongside a prompt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Label shown to the user
    pub text: String,
    /// Slot value submitted when pressed
    pub value: String,
}

impl Button {
    pub fn new(text: &str, value: &str) -> Self {
        Self {
            text: text.to_string(),
            value: value.to_string(),
        }
    }
}

/// The next dialog step decided by the core
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogAction {
    /// Ask the user for one slot as free text
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        slot_to_elicit: String,
        message: String,
    },
    /// Ask for one slot with a fixed set of answer buttons
    #[serde(rename_all = "camelCase")]
    ButtonElicitSlot {
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        slot_to_elicit: String,
        message: String,
        prompt: String,
        buttons: Vec<Button>,
    },
    /// Let the external dialog manager decide the next step
    #[serde(rename_all = "camelCase")]
    Delegate {
        session_attributes: HashMap<String, String>,
        slots: SlotSet,
    },
    /// Ask the user to confirm the resolved address
    #[serde(rename_all = "camelCase")]
    ConfirmAddress {
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        address: String,
    },
    /// Terminal failure with a conversational message
    Fail { message: String },
    /// Terminal success with a conversational message
    Fulfill { message: String },
}

impl DialogAction {
    pub fn elicit_slot(
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        slot_to_elicit: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::ElicitSlot {
            session_attributes,
            intent_name,
            slots,
            slot_to_elicit: slot_to_elicit.to_string(),
            message: message.into(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn button_elicit_slot(
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        slot_to_elicit: &str,
        message: impl Into<String>,
        prompt: impl Into<String>,
        buttons: Vec<Button>,
    ) -> Self {
        Self::ButtonElicitSlot {
            session_attributes,
            intent_name,
            slots,
            slot_to_elicit: slot_to_elicit.to_string(),
            message: message.into(),
            prompt: prompt.into(),
            buttons,
        }
    }

    pub fn delegate(session_attributes: HashMap<String, String>, slots: SlotSet) -> Self {
        Self::Delegate {
            session_attributes,
            slots,
        }
    }

    pub fn confirm_address(
        session_attributes: HashMap<String, String>,
        intent_name: String,
        slots: SlotSet,
        address: impl Into<String>,
    ) -> Self {
        Self::ConfirmAddress {
            session_attributes,
            intent_name,
            slots,
            address: address.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
        }
    }

    pub fn fulfill(message: impl Into<String>) -> Self {
        Self::Fulfill {
            message: message.into(),
        }
    }

    /// Variant name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ElicitSlot { .. } => "ElicitSlot",
            Self::ButtonElicitSlot { .. } => "ButtonElicitSlot",
            Self::Delegate { .. } => "Delegate",
            Self::ConfirmAddress { .. } => "ConfirmAddress",
            Self::Fail { .. } => "Fail",
            Self::Fulfill { .. } => "Fulfill",
        }
    }

    /// Session attributes carried back to the dialog manager, if any
    pub fn session_attributes(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::ElicitSlot {
                session_attributes, ..
            }
            | Self::ButtonElicitSlot {
                session_attributes, ..
            }
            | Self::Delegate {
                session_attributes, ..
            }
            | Self::ConfirmAddress {
                session_attributes, ..
            } => Some(session_attributes),
            Self::Fail { .. } | Self::Fulfill { .. } => None,
        }
    }

    /// Slot state carried back to the dialog manager, if any
    pub fn slots(&self) -> Option<&SlotSet> {
        match self {
            Self::ElicitSlot { slots, .. }
            | Self::ButtonElicitSlot { slots, .. }
            | Self::Delegate { slots, .. }
            | Self::ConfirmAddress { slots, .. } => Some(slots),
            Self::Fail { .. } | Self::Fulfill { .. } => None,
        }
    }
}
