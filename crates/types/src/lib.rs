pub mod config;
pub mod ids;
pub mod labels;
pub mod payload;
pub mod view;

pub use config::{NavigatorConfig, PageConfig, SectionEndpoint};
pub use ids::{DocumentId, SectionIndex};
pub use labels::Labels;
pub use payload::{SectionPayload, SectionResponse, SharedHtml};
pub use view::{
    BodyContent, ControlsState, HistoryState, ScrollTarget, SectionVisibility, UnknownViewMode,
    ViewMode,
};
