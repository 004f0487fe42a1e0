use handset_common::HandsetError;
use serde_json::{json, Value};

use super::{HostWindow, Orchestrator};
use crate::gateway::Command;

impl<H: HostWindow> Orchestrator<H> {
    /// Run an authenticated command and produce its reply payload.
    pub fn execute(&mut self, command: Command) -> Result<Value, HandsetError> {
        let value = match command {
            Command::Create { url } => json!({ "id": self.tabs.create_tab(url.as_deref())? }),
            Command::Switch { id } => {
                self.tabs.switch_to_tab(id)?;
                Value::Null
            }
            Command::Close { id } => {
                self.tabs.close_tab(id)?;
                Value::Null
            }
            Command::CloseAll => json!({ "id": self.tabs.close_all_tabs()? }),
            Command::GetAll => json!({
                "tabs": self.tabs.summaries(),
                "activeId": self.tabs.active_id(),
            }),
            Command::LoadUrl { url } => {
                self.tabs.load_url(&url)?;
                Value::Null
            }
            Command::GoBack => {
                self.tabs.go_back()?;
                Value::Null
            }
            Command::GoForward => {
                self.tabs.go_forward()?;
                Value::Null
            }
            Command::Reload => {
                self.tabs.reload()?;
                Value::Null
            }
            Command::CanGoBack => json!(self.tabs.can_go_back()?),
            Command::CanGoForward => json!(self.tabs.can_go_forward()?),
            Command::GetUrl => json!(self.tabs.url()?),
            Command::GetTitle => json!(self.tabs.title()?),
            Command::SetVisible { visible } => {
                self.tabs.set_visible(visible)?;
                Value::Null
            }
            Command::SetBounds { bounds } => {
                self.tabs.set_bounds(bounds)?;
                Value::Null
            }
            Command::GetThemeColor => json!(self.tabs.theme_color()),
            Command::ExitFullscreen { id } => {
                self.tabs.exit_fullscreen(id)?;
                Value::Null
            }
            Command::ContextMenuAction { action } => {
                self.tabs.context_menu_action(action)?;
                Value::Null
            }
            Command::GetOrientation => json!(self.orientation),
            Command::ToggleOrientation => json!(self.toggle_orientation()),
        };
        Ok(value)
    }
}
