pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HandsetError, PersistError, SecurityError, SurfaceError};
pub use events::{ContextMenuItem, EventBus, MenuAction, TabSummary, UiEvent};
pub use id::CapabilityToken;
pub use types::{Bounds, Orientation, Size, TabId};

pub type Result<T> = std::result::Result<T, HandsetError>;
