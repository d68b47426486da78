use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::{Store, LOAN_ITEMS_KEY};
use crate::models::{EquipmentType, LoanItem, LoanStatus};
use crate::utils::{parse_date, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    DueDate,
    Status,
    Name,
    Type,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::DueDate,
        SortOption::Status,
        SortOption::Name,
        SortOption::Type,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::DueDate => "Due Date",
            SortOption::Status => "Status",
            SortOption::Name => "Name",
            SortOption::Type => "Type",
        }
    }
}

/// In-memory loan list with a filtered/sorted view. Every mutation persists
/// the whole collection and recomputes the view.
pub struct LoanManager {
    store: Store,
    items: Vec<LoanItem>,
    filtered_items: Vec<LoanItem>,
    search_text: String,
    selected_status: Option<LoanStatus>,
    selected_type: Option<EquipmentType>,
    sort_option: SortOption,
}

impl LoanManager {
    pub fn load(store: Store) -> LoanManager {
        let items = store.load_collection(LOAN_ITEMS_KEY);
        let mut manager = LoanManager {
            store,
            items,
            filtered_items: Vec::new(),
            search_text: String::new(),
            selected_status: None,
            selected_type: None,
            sort_option: SortOption::DueDate,
        };
        manager.apply_filters();
        manager
    }

    pub fn items(&self) -> &[LoanItem] {
        &self.items
    }

    pub fn filtered_items(&self) -> &[LoanItem] {
        &self.filtered_items
    }

    pub fn add_item(&mut self, item: LoanItem) {
        self.items.push(item);
        self.save_items();
        self.apply_filters();
    }

    /// Replaces the item with the matching id; a no-op when the id is absent.
    pub fn update_item(&mut self, item: LoanItem) {
        if let Some(index) = self.items.iter().position(|i| i.id == item.id) {
            self.items[index] = item;
            self.save_items();
            self.apply_filters();
        }
    }

    pub fn delete_item(&mut self, id: Uuid) {
        self.items.retain(|i| i.id != id);
        self.save_items();
        self.apply_filters();
    }

    pub fn get_item(&self, id: Uuid) -> Option<&LoanItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Re-saves the item as-is. No field feeding status derivation changes,
    /// so the status stays date-derived.
    pub fn mark_as_returned(&mut self, item: LoanItem) {
        self.update_item(item);
    }

    pub fn extend_loan(&mut self, id: Uuid, new_end_date: impl Into<String>) {
        if let Some(item) = self.get_item(id).cloned() {
            let mut updated = item;
            updated.end_date = new_end_date.into();
            self.update_item(updated);
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.apply_filters();
    }

    pub fn set_status_filter(&mut self, status: Option<LoanStatus>) {
        self.selected_status = status;
        self.apply_filters();
    }

    pub fn set_type_filter(&mut self, equipment_type: Option<EquipmentType>) {
        self.selected_type = equipment_type;
        self.apply_filters();
    }

    pub fn set_sort_option(&mut self, sort_option: SortOption) {
        self.sort_option = sort_option;
        self.apply_filters();
    }

    pub fn apply_filters(&mut self) {
        let now = today();
        let mut filtered = self.items.clone();

        // Search filter
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            filtered.retain(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .brand
                        .as_ref()
                        .map(|b| b.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                    || item.owner.name.to_lowercase().contains(&needle)
            });
        }

        // Status filter
        if let Some(status) = self.selected_status {
            filtered.retain(|item| item.status(now) == status);
        }

        // Type filter
        if let Some(equipment_type) = self.selected_type {
            filtered.retain(|item| item.equipment_type == equipment_type);
        }

        // Sort. Status and type order by display label.
        match self.sort_option {
            SortOption::DueDate => filtered.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
            SortOption::Status => {
                filtered.sort_by(|a, b| a.status(now).label().cmp(b.status(now).label()))
            }
            SortOption::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOption::Type => {
                filtered.sort_by(|a, b| a.equipment_type.label().cmp(b.equipment_type.label()))
            }
        }

        self.filtered_items = filtered;
    }

    pub fn active_items(&self) -> Vec<LoanItem> {
        let now = today();
        self.items
            .iter()
            .filter(|i| i.status(now) != LoanStatus::Returned)
            .cloned()
            .collect()
    }

    pub fn due_soon_items(&self) -> Vec<LoanItem> {
        let now = today();
        self.items
            .iter()
            .filter(|i| {
                let status = i.status(now);
                status == LoanStatus::DueSoon || status == LoanStatus::DueToday
            })
            .cloned()
            .collect()
    }

    pub fn overdue_items(&self) -> Vec<LoanItem> {
        let now = today();
        self.items
            .iter()
            .filter(|i| i.status(now) == LoanStatus::Overdue)
            .cloned()
            .collect()
    }

    pub fn summary_text(&self) -> String {
        let active = self.active_items().len();
        let due_soon = self.due_soon_items().len();
        if due_soon > 0 {
            return format!("{} items on loan, {} due soon", active, due_soon);
        }
        format!("{} items on loan", active)
    }

    /// Active items whose end date falls on the given calendar day.
    pub fn items_due_on(&self, date: NaiveDate) -> Vec<LoanItem> {
        self.active_items()
            .into_iter()
            .filter(|i| parse_date(&i.end_date) == Some(date))
            .collect()
    }

    /// Name lookup for payment rows; deleted items render as "Unknown Item".
    pub fn item_name(&self, item_id: Uuid) -> String {
        self.get_item(item_id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "Unknown Item".to_string())
    }

    fn save_items(&self) {
        if let Err(e) = self.store.save_collection(LOAN_ITEMS_KEY, &self.items) {
            log::warn!("failed to save loan items: {}", e);
        }
    }
}
