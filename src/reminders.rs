use chrono::Duration;
use uuid::Uuid;

use crate::models::LoanItem;
use crate::utils::{format_date, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderType {
    ReturnDue,
    PaymentDue,
    ExtensionReminder,
}

/// Ephemeral reminder entry; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: Uuid,
    pub item_id: Uuid,
    pub title: String,
    pub date: String,
    pub reminder_type: ReminderType,
}

/// Seam to the OS notification center. Calls are fire-and-forget: no
/// confirmation comes back, and scheduling under an existing id replaces the
/// pending notification.
pub trait NotificationScheduler {
    fn request_permission(&self);
    fn schedule(&self, id: Uuid, date: &str, title: &str, body: &str);
    fn cancel(&self, id: Uuid);
}

/// Default scheduler; logs what a shell would hand to the OS.
pub struct LogScheduler;

impl NotificationScheduler for LogScheduler {
    fn request_permission(&self) {
        log::info!("notification permission requested");
    }

    fn schedule(&self, id: Uuid, date: &str, title: &str, body: &str) {
        log::info!("scheduling notification {} at {}: {} / {}", id, date, title, body);
    }

    fn cancel(&self, id: Uuid) {
        log::info!("cancelling notification {}", id);
    }
}

pub struct ReminderManager {
    scheduler: Box<dyn NotificationScheduler>,
    pub reminders: Vec<Reminder>,
}

impl ReminderManager {
    pub fn new(scheduler: Box<dyn NotificationScheduler>) -> ReminderManager {
        scheduler.request_permission();
        ReminderManager {
            scheduler,
            reminders: Vec::new(),
        }
    }

    /// Schedules a return notification `days_before` days ahead of the end
    /// date, keyed by the item id. An unparseable end date schedules on the
    /// end date string as-is.
    pub fn schedule_return_reminder(&self, item: &LoanItem, days_before: i64) {
        let reminder_date = match parse_date(&item.end_date) {
            Some(end) => format_date(end - Duration::days(days_before)),
            None => item.end_date.clone(),
        };
        let body = format!("{} is due in {} day(s)", item.name, days_before);
        self.scheduler
            .schedule(item.id, &reminder_date, "Return Due Soon", &body);
    }

    pub fn cancel_reminder(&self, item: &LoanItem) {
        self.scheduler.cancel(item.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, EquipmentType, ItemCondition, LoanType};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Permission,
        Schedule(Uuid, String, String, String),
        Cancel(Uuid),
    }

    #[derive(Clone, Default)]
    struct RecordingScheduler {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl NotificationScheduler for RecordingScheduler {
        fn request_permission(&self) {
            self.calls.borrow_mut().push(Call::Permission);
        }

        fn schedule(&self, id: Uuid, date: &str, title: &str, body: &str) {
            self.calls.borrow_mut().push(Call::Schedule(
                id,
                date.to_string(),
                title.to_string(),
                body.to_string(),
            ));
        }

        fn cancel(&self, id: Uuid) {
            self.calls.borrow_mut().push(Call::Cancel(id));
        }
    }

    fn item(end_date: &str) -> LoanItem {
        LoanItem::new(
            "Splitboard",
            EquipmentType::Snowboard,
            LoanType::Borrow,
            Contact::new("Alex Carter"),
            "2026-02-01",
            end_date,
            ItemCondition::Excellent,
        )
    }

    #[test]
    fn permission_is_requested_at_construction() {
        let scheduler = RecordingScheduler::default();
        let calls = scheduler.calls.clone();
        let _manager = ReminderManager::new(Box::new(scheduler));
        assert_eq!(calls.borrow().as_slice(), &[Call::Permission]);
    }

    #[test]
    fn schedules_one_day_before_the_end_date() {
        let scheduler = RecordingScheduler::default();
        let calls = scheduler.calls.clone();
        let manager = ReminderManager::new(Box::new(scheduler));

        let loan = item("2026-02-20");
        manager.schedule_return_reminder(&loan, 1);

        assert_eq!(
            calls.borrow().last().unwrap(),
            &Call::Schedule(
                loan.id,
                "2026-02-19".to_string(),
                "Return Due Soon".to_string(),
                "Splitboard is due in 1 day(s)".to_string(),
            )
        );
    }

    #[test]
    fn unparseable_end_date_schedules_as_is() {
        let scheduler = RecordingScheduler::default();
        let calls = scheduler.calls.clone();
        let manager = ReminderManager::new(Box::new(scheduler));

        let loan = item("next week");
        manager.schedule_return_reminder(&loan, 2);

        let calls_ref = calls.borrow();
        match calls_ref.last().unwrap() {
            Call::Schedule(_, date, _, _) => assert_eq!(date, "next week"),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn cancel_uses_the_item_id() {
        let scheduler = RecordingScheduler::default();
        let calls = scheduler.calls.clone();
        let manager = ReminderManager::new(Box::new(scheduler));

        let loan = item("2026-02-20");
        manager.cancel_reminder(&loan);
        assert_eq!(calls.borrow().last().unwrap(), &Call::Cancel(loan.id));
    }
}
