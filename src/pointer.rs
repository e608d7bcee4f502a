use crate::presentation::Bindings;

/// Format of the placeholder payload written on drag start.
pub const DRAG_PAYLOAD_FORMAT: &str = "text";
/// Placeholder payload content; the widget tracks the drag source itself.
pub const DRAG_PAYLOAD_DATA: &str = "tree-node";

/// Kind of raw pointer event delivered to a presentation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    DoubleClick,
    /// Click on the disclosure icon.
    Toggle,
    DragStart,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
}

impl PointerKind {
    /// Binding a node must carry for this event to be handled.
    pub const fn binding(self) -> Bindings {
        match self {
            Self::Click => Bindings::CLICK,
            Self::DoubleClick => Bindings::DOUBLE_CLICK,
            Self::Toggle => Bindings::TOGGLE,
            Self::DragStart => Bindings::DRAG_START,
            Self::DragOver => Bindings::DRAG_OVER,
            Self::DragLeave => Bindings::DRAG_LEAVE,
            Self::Drop => Bindings::DROP,
            Self::DragEnd => Bindings::DRAG_END,
        }
    }
}

/// Data attached to a drag operation by its source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragPayload {
    entries: Vec<(String, String)>,
}

impl DragPayload {
    /// Stores data under a format, replacing any previous entry for it.
    pub fn set_data(&mut self, format: &str, data: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| f == format) {
            entry.1 = data.to_owned();
        } else {
            self.entries.push((format.to_owned(), data.to_owned()));
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, data)| data.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw pointer event as delivered by the host surface.
///
/// Handlers record propagation and default handling on the event itself, so the
/// host can decide afterwards whether to bubble it or run its own defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Vertical pointer offset inside the target row.
    pub offset_y: f32,
    /// Rendered height of the target row.
    pub target_height: f32,
    pub payload: DragPayload,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind) -> Self {
        Self {
            kind,
            offset_y: 0.0,
            target_height: 0.0,
            payload: DragPayload::default(),
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Creates an event carrying pointer geometry within the target row.
    pub fn at(kind: PointerKind, offset_y: f32, target_height: f32) -> Self {
        Self {
            offset_y,
            target_height,
            ..Self::new(kind)
        }
    }

    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub const fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_replaces_entries_per_format() {
        let mut payload = DragPayload::default();
        payload.set_data("text", "one");
        payload.set_data("text", "two");

        assert_eq!(payload.get_data("text"), Some("two"));
        assert_eq!(payload.get_data("uri"), None);
    }

    #[test]
    fn new_event_is_untouched() {
        let event = PointerEvent::at(PointerKind::DragOver, 3.0, 24.0);

        assert!(!event.propagation_stopped());
        assert!(!event.default_prevented());
        assert!(event.payload.is_empty());
    }
}
