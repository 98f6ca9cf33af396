/// In-flight request counter behind the loading modal.
///
/// The modal shows when the first request starts and hides when the last
/// one completes, whatever its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestIndicator {
    in_flight: usize,
}

impl RequestIndicator {
    pub fn on_request_started(&mut self) {
        self.in_flight += 1;
    }

    pub fn on_request_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight > 0
    }
}
