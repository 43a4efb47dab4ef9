pub mod history;
pub mod live_region;
pub mod source;
pub mod view;

pub use history::{HistoryEntry, HistoryPort, MemoryHistory};
pub use live_region::{LiveRegion, RecordingLiveRegion};
pub use source::{
    FetchError, InMemorySectionSource, SectionSource, parse_section_body, payload_from_response,
};
pub use view::{DocumentView, RecordedBody, RecordingView};
