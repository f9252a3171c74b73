use helmsight_common::{
    HistoryItem, HistoryRange, HistoryResponse, Masthead, ReadingSnapshot, SensorPosition,
    WindSnapshot,
};

use crate::stream::CommandLink;

/// Messages for the Helmsight application.
#[derive(Debug, Clone)]
pub enum Message {
    /// Wind socket opened; carries the handle for outbound commands.
    WindConnected(CommandLink),

    /// Wind socket dropped (will retry with backoff).
    WindDisconnected(String),

    /// Full wind sensor snapshot received.
    WindSensors(WindSnapshot),

    /// Combined active wind display update received.
    MastheadUpdated(Masthead),

    /// Data socket opened.
    DataConnected,

    /// Data socket dropped (will retry with backoff).
    DataDisconnected(String),

    /// Full generic readings snapshot received.
    ReadingsReceived(ReadingSnapshot),

    /// The hub asked clients to reload; all live state is discarded.
    ReloadRequested,

    /// User switched pages.
    PageSelected(Page),

    /// User assigned a mounting position to a sensor.
    PositionPicked(String, SensorPosition),

    /// User is typing a new vane offset for a sensor.
    OffsetEdited(String, String),

    /// User committed the vane offset for a sensor.
    OffsetSubmitted(String),

    /// User asked the hub to scan for new sensors.
    ScanRequested,

    /// User picked the history quantity.
    HistoryItemPicked(HistoryItem),

    /// User picked the history window.
    HistoryRangePicked(HistoryRange),

    /// User pressed Refresh on the history page.
    HistoryRefreshRequested,

    /// A history query finished. The generation guards against
    /// responses outliving the query that issued them.
    HistoryFetched(u64, Result<HistoryResponse, String>),

    /// The scheduled re-poll timer fired for the given generation.
    HistoryPollFired(u64),
}

/// Top-level pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Wind,
    Readings,
    History,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: &'static [Page] = &[Page::Wind, Page::Readings, Page::History];

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Wind => "Wind",
            Page::Readings => "Readings",
            Page::History => "History",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
