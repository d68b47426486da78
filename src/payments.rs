use std::collections::HashMap;

use chrono::Duration;
use uuid::Uuid;

use crate::db::{Store, PAYMENTS_KEY};
use crate::models::PaymentRecord;
use crate::utils::{parse_date, today};

/// In-memory payment list with spending aggregates.
pub struct PaymentManager {
    store: Store,
    payments: Vec<PaymentRecord>,
}

impl PaymentManager {
    pub fn load(store: Store) -> PaymentManager {
        let payments = store.load_collection(PAYMENTS_KEY);
        PaymentManager { store, payments }
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub fn add_payment(&mut self, payment: PaymentRecord) {
        self.payments.push(payment);
        self.save_payments();
    }

    /// Replaces the payment with the matching id; a no-op when absent.
    pub fn update_payment(&mut self, payment: PaymentRecord) {
        if let Some(index) = self.payments.iter().position(|p| p.id == payment.id) {
            self.payments[index] = payment;
            self.save_payments();
        }
    }

    pub fn delete_payment(&mut self, id: Uuid) {
        self.payments.retain(|p| p.id != id);
        self.save_payments();
    }

    pub fn get_payment(&self, id: Uuid) -> Option<&PaymentRecord> {
        self.payments.iter().find(|p| p.id == id)
    }

    // Deleting a loan item does not cascade here; rows keep their item_id.
    pub fn payments_for(&self, item_id: Uuid) -> Vec<PaymentRecord> {
        self.payments
            .iter()
            .filter(|p| p.item_id == item_id)
            .cloned()
            .collect()
    }

    pub fn total_spent(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Amounts summed per "YYYY-MM" key.
    pub fn monthly_spending(&self) -> HashMap<String, f64> {
        let mut monthly: HashMap<String, f64> = HashMap::new();
        for payment in &self.payments {
            let month = match parse_date(&payment.date) {
                Some(date) => date.format("%Y-%m").to_string(),
                None => payment.date.chars().take(7).collect(),
            };
            *monthly.entry(month).or_insert(0.0) += payment.amount;
        }
        monthly
    }

    /// Payments dated after today and within the next seven days.
    pub fn upcoming_payments(&self) -> Vec<PaymentRecord> {
        let now = today();
        let cutoff = now + Duration::days(7);
        self.payments
            .iter()
            .filter(|p| match parse_date(&p.date) {
                Some(date) => date > now && date <= cutoff,
                None => false,
            })
            .cloned()
            .collect()
    }

    fn save_payments(&self) {
        if let Err(e) = self.store.save_collection(PAYMENTS_KEY, &self.payments) {
            log::warn!("failed to save payments: {}", e);
        }
    }
}
