/// Whether lines following a purpose label are being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    CapturingDetails,
}

impl CaptureState {
    pub fn on_purpose_line(self) -> Self {
        Self::CapturingDetails
    }

    pub fn on_blank_line(self) -> Self {
        Self::Idle
    }

    pub fn is_capturing(self) -> bool {
        matches!(self, Self::CapturingDetails)
    }
}

/// Details buffer for one document.
///
/// Only lines strictly after a purpose line and before the next blank line
/// are kept. A later purpose line re-opens capture and appends to the same
/// buffer.
#[derive(Debug, Default)]
pub struct DetailsCapture {
    state: CaptureState,
    lines: Vec<String>,
}

impl DetailsCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Feeds one non-blank line.
    pub fn observe(&mut self, line: &str, is_purpose_line: bool) {
        if is_purpose_line {
            self.state = self.state.on_purpose_line();
        } else if self.state.is_capturing() {
            self.lines.push(line.to_string());
        }
    }

    pub fn observe_blank(&mut self) {
        self.state = self.state.on_blank_line();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
