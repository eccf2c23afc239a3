//! Notification center with derived unread badge.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Health,
    Appointment,
    Transaction,
}

impl NotificationCategory {
    pub fn label(self) -> &'static str {
        match self {
            NotificationCategory::Health => "health",
            NotificationCategory::Appointment => "appointment",
            NotificationCategory::Transaction => "transaction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub category: NotificationCategory,
    pub message: String,
    pub time: String,
    pub read: bool,
}

impl Notification {
    fn unread(id: u32, category: NotificationCategory, message: &str, time: &str) -> Self {
        Self {
            id,
            category,
            message: message.to_string(),
            time: time.to_string(),
            read: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    modal_open: bool,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::seeded()
    }
}

impl NotificationCenter {
    /// The three notifications every session starts with.
    pub fn seeded() -> Self {
        Self {
            items: vec![
                Notification::unread(
                    1,
                    NotificationCategory::Health,
                    "New health data recorded",
                    "2 hours ago",
                ),
                Notification::unread(
                    2,
                    NotificationCategory::Appointment,
                    "Appointment reminder: Tomorrow, 10 AM",
                    "5 hours ago",
                ),
                Notification::unread(
                    3,
                    NotificationCategory::Transaction,
                    "You received 25 HTB for data sharing",
                    "Yesterday",
                ),
            ],
            modal_open: false,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Badge text; empty (hidden) when nothing is unread.
    pub fn badge(&self) -> String {
        match self.unread_count() {
            0 => String::new(),
            n => n.to_string(),
        }
    }

    /// Open the modal. Everything becomes read.
    pub fn open(&mut self) {
        self.modal_open = true;
        for n in &mut self.items {
            n.read = true;
        }
    }

    pub fn close(&mut self) {
        self.modal_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }
}
