//! Declarative table of interaction kinds that count as user presence.
//!
//! Front ends attach one handler per kind and detach the same set on
//! unmount; driving both from [`ActivityKind::ALL`] keeps attach/detach
//! symmetric so no listener leaks across navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-interaction event kind recognized as activity.
///
/// Serialized using the DOM event names the dashboard front end listens
/// for, so a config file can list e.g. `["keydown", "scroll"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "mousemove")]
    PointerMove,
    #[serde(rename = "mousedown")]
    PointerDown,
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "scroll")]
    Scroll,
    #[serde(rename = "touchstart")]
    TouchStart,
}

impl ActivityKind {
    /// Every interaction kind the monitor understands, in a fixed order.
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::PointerMove,
        ActivityKind::PointerDown,
        ActivityKind::KeyDown,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
    ];

    /// DOM-style event name, used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::PointerMove => "mousemove",
            ActivityKind::PointerDown => "mousedown",
            ActivityKind::KeyDown => "keydown",
            ActivityKind::Scroll => "scroll",
            ActivityKind::TouchStart => "touchstart",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
