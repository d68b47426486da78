use uuid::Uuid;

use crate::db::{Store, CONTACTS_KEY};
use crate::models::Contact;

/// In-memory contact list with a searched, name-sorted view.
pub struct ContactManager {
    store: Store,
    contacts: Vec<Contact>,
    filtered_contacts: Vec<Contact>,
    search_text: String,
}

impl ContactManager {
    pub fn load(store: Store) -> ContactManager {
        let contacts = store.load_collection(CONTACTS_KEY);
        let mut manager = ContactManager {
            store,
            contacts,
            filtered_contacts: Vec::new(),
            search_text: String::new(),
        };
        manager.apply_filters();
        manager
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn filtered_contacts(&self) -> &[Contact] {
        &self.filtered_contacts
    }

    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
        self.save_contacts();
        self.apply_filters();
    }

    /// Replaces the contact with the matching id; a no-op when absent.
    pub fn update_contact(&mut self, contact: Contact) {
        if let Some(index) = self.contacts.iter().position(|c| c.id == contact.id) {
            self.contacts[index] = contact;
            self.save_contacts();
            self.apply_filters();
        }
    }

    pub fn delete_contact(&mut self, id: Uuid) {
        self.contacts.retain(|c| c.id != id);
        self.save_contacts();
        self.apply_filters();
    }

    pub fn get_contact(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.apply_filters();
    }

    pub fn apply_filters(&mut self) {
        if self.search_text.is_empty() {
            self.filtered_contacts = self.contacts.clone();
        } else {
            let needle = self.search_text.to_lowercase();
            self.filtered_contacts = self
                .contacts
                .iter()
                .filter(|contact| {
                    contact.name.to_lowercase().contains(&needle)
                        || contact
                            .company
                            .as_ref()
                            .map(|c| c.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                        || contact
                            .phone
                            .as_ref()
                            .map(|p| p.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                })
                .cloned()
                .collect();
        }

        self.filtered_contacts.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn save_contacts(&self) {
        if let Err(e) = self.store.save_collection(CONTACTS_KEY, &self.contacts) {
            log::warn!("failed to save contacts: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_store;

    #[test]
    fn add_update_delete_round_trip() {
        let mut manager = ContactManager::load(test_store("contacts_crud"));
        let contact = Contact::new("Alex Carter");
        let id = contact.id;

        manager.add_contact(contact.clone());
        assert_eq!(manager.contacts().len(), 1);

        let mut updated = contact;
        updated.email = Some("alex@example.com".to_string());
        manager.update_contact(updated);
        assert_eq!(
            manager.get_contact(id).unwrap().email.as_deref(),
            Some("alex@example.com")
        );

        manager.delete_contact(id);
        assert!(manager.get_contact(id).is_none());
    }

    #[test]
    fn update_with_unknown_id_is_a_noop() {
        let mut manager = ContactManager::load(test_store("contacts_update_noop"));
        manager.add_contact(Contact::new("Dana Petrov"));
        manager.update_contact(Contact::new("Sam Lowe"));
        assert_eq!(manager.contacts().len(), 1);
        assert_eq!(manager.contacts()[0].name, "Dana Petrov");
    }

    #[test]
    fn search_covers_name_company_and_phone() {
        let mut manager = ContactManager::load(test_store("contacts_search"));
        let mut shop = Contact::new("Rental Desk");
        shop.company = Some("Alpine Sports".to_string());
        let mut mobile = Contact::new("Dana Petrov");
        mobile.phone = Some("+1 555 0199".to_string());
        manager.add_contact(shop);
        manager.add_contact(mobile);
        manager.add_contact(Contact::new("Sam Lowe"));

        manager.set_search_text("alpine");
        assert_eq!(manager.filtered_contacts().len(), 1);
        assert_eq!(manager.filtered_contacts()[0].name, "Rental Desk");

        manager.set_search_text("0199");
        assert_eq!(manager.filtered_contacts().len(), 1);
        assert_eq!(manager.filtered_contacts()[0].name, "Dana Petrov");

        manager.set_search_text("");
        assert_eq!(manager.filtered_contacts().len(), 3);
    }

    #[test]
    fn view_is_sorted_by_name() {
        let mut manager = ContactManager::load(test_store("contacts_sorted"));
        manager.add_contact(Contact::new("Zoe Quinn"));
        manager.add_contact(Contact::new("Alex Carter"));
        manager.add_contact(Contact::new("Mia Wong"));

        let names: Vec<&str> = manager
            .filtered_contacts()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alex Carter", "Mia Wong", "Zoe Quinn"]);
    }

    #[test]
    fn contacts_persist_across_managers() {
        let store = test_store("contacts_reload");
        let mut manager = ContactManager::load(store.clone());
        manager.add_contact(Contact::new("Alex Carter"));

        let reloaded = ContactManager::load(store);
        assert_eq!(reloaded.contacts().len(), 1);
    }
}
