// Notification queue: the user-curated list of attendees to act on.
//
// Survives phase switches and new discoveries. The queue itself keeps
// whatever it is given, duplicates included; callers decide whether to skip
// attendees that are already queued.

use crate::api::types::Attendee;

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: Vec<Attendee>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attendee: Attendee) {
        self.items.push(attendee);
    }

    /// Remove the first entry with this username. Returns whether one was removed.
    pub fn remove(&mut self, username: &str) -> bool {
        match self.items.iter().position(|a| a.username == username) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.items.iter().any(|a| a.username == username)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Attendee] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attendee> {
        self.items.iter()
    }
}
