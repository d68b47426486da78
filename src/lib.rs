mod models;
mod utils;
mod db;
mod loans;
mod contacts;
mod payments;
mod reminders;
mod onboarding;

#[cfg(test)]
mod testutil;

// Re-export specific types from models
pub use models::{
    Contact, EquipmentType, ItemCondition, LoanAction, LoanHistory, LoanItem, LoanStatus,
    LoanType, PaymentMethod, PaymentRecord,
};

// Re-export utility functions
pub use utils::{format_date, get_db_path, parse_date, today, DATE_FORMAT};

// Re-export the persistence adapter
pub use db::{Store, CONTACTS_KEY, LOAN_ITEMS_KEY, ONBOARDING_KEY, PAYMENTS_KEY};

// Re-export collection managers
pub use contacts::ContactManager;
pub use loans::{LoanManager, SortOption};
pub use onboarding::OnboardingManager;
pub use payments::PaymentManager;
pub use reminders::{
    LogScheduler, NotificationScheduler, Reminder, ReminderManager, ReminderType,
};

/// Application state handed to the presentation shell: one manager per
/// collection, all over the same store file.
pub struct AppState {
    pub loans: LoanManager,
    pub contacts: ContactManager,
    pub payments: PaymentManager,
    pub reminders: ReminderManager,
    pub onboarding: OnboardingManager,
}

impl AppState {
    pub fn load(store: Store) -> AppState {
        AppState::with_scheduler(store, Box::new(LogScheduler))
    }

    pub fn with_scheduler(store: Store, scheduler: Box<dyn NotificationScheduler>) -> AppState {
        AppState {
            loans: LoanManager::load(store.clone()),
            contacts: ContactManager::load(store.clone()),
            payments: PaymentManager::load(store.clone()),
            reminders: ReminderManager::new(scheduler),
            onboarding: OnboardingManager::load(store),
        }
    }

    /// Loads from the database at the platform data directory.
    pub fn open_default() -> Result<AppState, String> {
        Ok(AppState::load(Store::open_default()?))
    }
}
