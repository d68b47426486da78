use crate::db::{Store, ONBOARDING_KEY};

/// Onboarding completion flag plus the three-page walkthrough position.
pub struct OnboardingManager {
    store: Store,
    current_page: i32,
    has_completed_onboarding: bool,
}

impl OnboardingManager {
    pub fn load(store: Store) -> OnboardingManager {
        let has_completed_onboarding = store.get_flag(ONBOARDING_KEY);
        OnboardingManager {
            store,
            current_page: 0,
            has_completed_onboarding,
        }
    }

    pub fn current_page(&self) -> i32 {
        self.current_page
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.has_completed_onboarding
    }

    pub fn complete_onboarding(&mut self) {
        self.has_completed_onboarding = true;
        if let Err(e) = self.store.set_flag(ONBOARDING_KEY, true) {
            log::warn!("failed to save onboarding flag: {}", e);
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page < 2 {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }
}
