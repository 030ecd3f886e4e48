// Phase controller: which of the three workflow stages is on screen.

use std::str::FromStr;

/// The three mutually exclusive workflow stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Events,
    Attendees,
    Notifications,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Events, Phase::Attendees, Phase::Notifications];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Events => "events",
            Phase::Attendees => "attendees",
            Phase::Notifications => "notifications",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Phase::Events => "Discover Events",
            Phase::Attendees => "Discover Attendees",
            Phase::Notifications => "Notify & Act",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "events" | "event" | "1" => Ok(Phase::Events),
            "attendees" | "attendee" | "2" => Ok(Phase::Attendees),
            "notifications" | "notify" | "queue" | "3" => Ok(Phase::Notifications),
            other => Err(format!(
                "unknown phase '{other}' (expected events, attendees or notifications)"
            )),
        }
    }
}

/// Result of a phase switch. `rerender_queue` is set when entering the
/// notifications phase, which always re-projects the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub previous: Phase,
    pub current: Phase,
    pub rerender_queue: bool,
}

/// Tracks the single active phase.
#[derive(Debug, Clone, Default)]
pub struct PhaseController {
    active: Phase,
}

impl PhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Phase {
        self.active
    }

    pub fn switch(&mut self, phase: Phase) -> PhaseChange {
        let previous = self.active;
        self.active = phase;
        PhaseChange {
            previous,
            current: phase,
            rerender_queue: phase == Phase::Notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_events_phase() {
        assert_eq!(PhaseController::new().active(), Phase::Events);
    }

    #[test]
    fn exactly_one_phase_is_active() {
        let mut controller = PhaseController::new();
        for target in Phase::ALL {
            controller.switch(target);
            let active: Vec<Phase> = Phase::ALL
                .into_iter()
                .filter(|p| controller.active() == *p)
                .collect();
            assert_eq!(active, vec![target]);
        }
    }

    #[test]
    fn entering_notifications_requests_queue_render() {
        let mut controller = PhaseController::new();
        assert!(!controller.switch(Phase::Attendees).rerender_queue);
        let change = controller.switch(Phase::Notifications);
        assert!(change.rerender_queue);
        assert_eq!(change.previous, Phase::Attendees);
        // Re-entering still re-renders
        assert!(controller.switch(Phase::Notifications).rerender_queue);
    }

    #[test]
    fn parse_rejects_unknown_phase() {
        assert!("settings".parse::<Phase>().is_err());
        assert_eq!("Queue".parse::<Phase>().unwrap(), Phase::Notifications);
    }
}
