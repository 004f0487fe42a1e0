//! Typed privileged commands accepted from the UI surface.

use handset_common::{Bounds, HandsetError, MenuAction, TabId};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Every command kind the UI surface may send.
pub const COMMAND_KINDS: &[&str] = &[
    "create",
    "switch",
    "close",
    "close-all",
    "get-all",
    "load-url",
    "go-back",
    "go-forward",
    "reload",
    "can-go-back",
    "can-go-forward",
    "get-url",
    "get-title",
    "set-visible",
    "set-bounds",
    "get-theme-color",
    "exit-fullscreen",
    "context-menu-action",
    "get-orientation",
    "toggle-orientation",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create { url: Option<String> },
    Switch { id: TabId },
    Close { id: TabId },
    CloseAll,
    GetAll,
    LoadUrl { url: String },
    GoBack,
    GoForward,
    Reload,
    CanGoBack,
    CanGoForward,
    GetUrl,
    GetTitle,
    SetVisible { visible: bool },
    SetBounds { bounds: Bounds },
    GetThemeColor,
    ExitFullscreen { id: TabId },
    ContextMenuAction { action: MenuAction },
    GetOrientation,
    ToggleOrientation,
}

impl Command {
    /// Build a command from its wire kind and payload.
    ///
    /// Single-argument commands accept the argument either as a named field
    /// (`{"id": 3}`) or as the bare payload (`3`).
    pub fn parse(kind: &str, payload: &Value) -> Result<Self, HandsetError> {
        let command = match kind {
            "create" => Command::Create {
                url: optional(payload, "url")?,
            },
            "switch" => Command::Switch {
                id: required(kind, payload, "id")?,
            },
            "close" => Command::Close {
                id: required(kind, payload, "id")?,
            },
            "close-all" => Command::CloseAll,
            "get-all" => Command::GetAll,
            "load-url" => Command::LoadUrl {
                url: required(kind, payload, "url")?,
            },
            "go-back" => Command::GoBack,
            "go-forward" => Command::GoForward,
            "reload" => Command::Reload,
            "can-go-back" => Command::CanGoBack,
            "can-go-forward" => Command::CanGoForward,
            "get-url" => Command::GetUrl,
            "get-title" => Command::GetTitle,
            "set-visible" => Command::SetVisible {
                visible: required(kind, payload, "visible")?,
            },
            "set-bounds" => Command::SetBounds {
                bounds: required(kind, payload, "bounds")?,
            },
            "get-theme-color" => Command::GetThemeColor,
            "exit-fullscreen" => Command::ExitFullscreen {
                id: required(kind, payload, "id")?,
            },
            "context-menu-action" => Command::ContextMenuAction {
                action: required(kind, payload, "action")?,
            },
            "get-orientation" => Command::GetOrientation,
            "toggle-orientation" => Command::ToggleOrientation,
            other => {
                return Err(HandsetError::InvalidCommand(format!(
                    "unknown command kind '{other}'"
                )))
            }
        };
        Ok(command)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Switch { .. } => "switch",
            Command::Close { .. } => "close",
            Command::CloseAll => "close-all",
            Command::GetAll => "get-all",
            Command::LoadUrl { .. } => "load-url",
            Command::GoBack => "go-back",
            Command::GoForward => "go-forward",
            Command::Reload => "reload",
            Command::CanGoBack => "can-go-back",
            Command::CanGoForward => "can-go-forward",
            Command::GetUrl => "get-url",
            Command::GetTitle => "get-title",
            Command::SetVisible { .. } => "set-visible",
            Command::SetBounds { .. } => "set-bounds",
            Command::GetThemeColor => "get-theme-color",
            Command::ExitFullscreen { .. } => "exit-fullscreen",
            Command::ContextMenuAction { .. } => "context-menu-action",
            Command::GetOrientation => "get-orientation",
            Command::ToggleOrientation => "toggle-orientation",
        }
    }
}

fn argument<'a>(payload: &'a Value, name: &str) -> Option<&'a Value> {
    match payload {
        Value::Null => None,
        Value::Object(map) => match map.get(name) {
            Some(value) => Some(value),
            // A whole-object argument (bounds) may arrive unwrapped.
            None if name == "bounds" => Some(payload),
            None => None,
        },
        other => Some(other),
    }
}

fn required<T: DeserializeOwned>(kind: &str, payload: &Value, name: &str) -> Result<T, HandsetError> {
    let value = argument(payload, name).ok_or_else(|| {
        HandsetError::InvalidCommand(format!("'{kind}' is missing '{name}'"))
    })?;
    serde_json::from_value(value.clone())
        .map_err(|e| HandsetError::InvalidCommand(format!("'{kind}' has a bad '{name}': {e}")))
}

fn optional<T: DeserializeOwned>(payload: &Value, name: &str) -> Result<Option<T>, HandsetError> {
    match argument(payload, name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| HandsetError::InvalidCommand(format!("bad '{name}': {e}"))),
    }
}
