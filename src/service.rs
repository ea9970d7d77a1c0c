//! Typed domain access over the generic document store.
//!
//! Each operation is a thin pass-through to the store plus a triggered
//! background push: saves and deletes return as soon as the local write
//! lands, and the mirror push runs detached so a sync failure can never
//! fail a user action. Documents that no longer decode into the current
//! model shape are skipped with a warning rather than failing the read —
//! the store is schema-on-write and typing lives only at this layer.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    AttendanceRecord, ChatMessage, Complaint, Expense, InventoryItem, Meeting, NoteTemplate,
    OnboardingRecord, PasswordRequest, PayslipEntry, Task, User,
};
use crate::store::{Collection, LocalStore, StoreError};
use crate::sync::MirrorClient;

/// Facade over the local store and the mirror client.
#[derive(Debug, Clone)]
pub struct DeskService {
    store: LocalStore,
    mirror: MirrorClient,
}

impl DeskService {
    pub fn new(store: LocalStore, mirror: MirrorClient) -> Self {
        Self { store, mirror }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn mirror(&self) -> &MirrorClient {
        &self.mirror
    }

    async fn get_typed<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.store.get_all(collection).await?;
        let mut items = Vec::with_capacity(docs.len());
        for doc in docs {
            match serde_json::from_value(doc) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(collection = %collection, "skipping undecodable document: {}", e)
                }
            }
        }
        Ok(items)
    }

    async fn save_typed<T: Serialize>(
        &self,
        collection: Collection,
        item: &T,
    ) -> Result<(), StoreError> {
        let doc = serde_json::to_value(item)?;
        self.store.put(collection, &doc).await?;
        self.mirror.spawn_push();
        Ok(())
    }

    async fn save_batch<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StoreError> {
        let docs = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.store.put_bulk(collection, &docs).await?;
        self.mirror.spawn_push();
        Ok(())
    }

    async fn delete_from(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.store.delete(collection, id).await?;
        self.mirror.spawn_push();
        Ok(())
    }

    /// Reads the collection, mutates the document matching `id`, and puts
    /// it back. Returns whether a match was found.
    async fn update_where<T, F>(
        &self,
        collection: Collection,
        id: &str,
        mutate: F,
    ) -> Result<bool, StoreError>
    where
        T: DeserializeOwned + Serialize + HasId,
        F: FnOnce(&mut T),
    {
        let items: Vec<T> = self.get_typed(collection).await?;
        let Some(mut item) = items.into_iter().find(|item| item.id() == id) else {
            return Ok(false);
        };

        mutate(&mut item);
        self.save_typed(collection, &item).await?;
        Ok(true)
    }

    // Tasks

    pub async fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.get_typed(Collection::Tasks).await
    }

    pub async fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        self.save_typed(Collection::Tasks, task).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Tasks, id).await
    }

    // Users

    /// Returns all users, seeding the two default accounts into an empty
    /// collection first. This bootstrap is the one place the facade
    /// manufactures data instead of passing through.
    pub async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        let users: Vec<User> = self.get_typed(Collection::Users).await?;
        if !users.is_empty() {
            return Ok(users);
        }

        let seeded = vec![User::seed_root(), User::seed_operator()];
        let docs = seeded
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.store.put_bulk(Collection::Users, &docs).await?;

        tracing::info!("seeded default root and operator accounts");
        Ok(seeded)
    }

    pub async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        self.save_typed(Collection::Users, user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Users, id).await
    }

    // Expenses

    pub async fn get_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.get_typed(Collection::Expenses).await
    }

    pub async fn save_expense(&self, expense: &Expense) -> Result<(), StoreError> {
        self.save_typed(Collection::Expenses, expense).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Expenses, id).await
    }

    // Payroll

    pub async fn get_payslips(&self) -> Result<Vec<PayslipEntry>, StoreError> {
        self.get_typed(Collection::Payroll).await
    }

    pub async fn save_payslip(&self, entry: &PayslipEntry) -> Result<(), StoreError> {
        self.save_typed(Collection::Payroll, entry).await
    }

    /// Stores a whole payroll batch atomically.
    pub async fn save_payroll_batch(&self, entries: &[PayslipEntry]) -> Result<(), StoreError> {
        self.save_batch(Collection::Payroll, entries).await
    }

    /// Marks one payslip paid. Returns false when the id is unknown.
    pub async fn mark_payslip_paid(&self, id: &str) -> Result<bool, StoreError> {
        self.update_where::<PayslipEntry, _>(Collection::Payroll, id, |entry| entry.mark_paid())
            .await
    }

    pub async fn delete_payslip(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Payroll, id).await
    }

    // Inventory

    pub async fn get_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.get_typed(Collection::Inventory).await
    }

    pub async fn save_inventory_item(&self, item: &InventoryItem) -> Result<(), StoreError> {
        self.save_typed(Collection::Inventory, item).await
    }

    /// Stores an inventory count as one atomic batch.
    pub async fn save_inventory_batch(&self, items: &[InventoryItem]) -> Result<(), StoreError> {
        self.save_batch(Collection::Inventory, items).await
    }

    pub async fn delete_inventory_item(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Inventory, id).await
    }

    // Onboarding

    pub async fn get_onboarding(&self) -> Result<Vec<OnboardingRecord>, StoreError> {
        self.get_typed(Collection::Onboarding).await
    }

    pub async fn save_onboarding(&self, record: &OnboardingRecord) -> Result<(), StoreError> {
        self.save_typed(Collection::Onboarding, record).await
    }

    pub async fn delete_onboarding(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Onboarding, id).await
    }

    // Attendance

    pub async fn get_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.get_typed(Collection::Attendance).await
    }

    pub async fn save_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        self.save_typed(Collection::Attendance, record).await
    }

    pub async fn delete_attendance(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Attendance, id).await
    }

    // Complaints

    pub async fn get_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        self.get_typed(Collection::Complaints).await
    }

    pub async fn save_complaint(&self, complaint: &Complaint) -> Result<(), StoreError> {
        self.save_typed(Collection::Complaints, complaint).await
    }

    /// Marks one complaint resolved. Returns false when the id is unknown.
    pub async fn resolve_complaint(&self, id: &str) -> Result<bool, StoreError> {
        self.update_where::<Complaint, _>(Collection::Complaints, id, |complaint| {
            complaint.resolve()
        })
        .await
    }

    pub async fn delete_complaint(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Complaints, id).await
    }

    // Meetings

    pub async fn get_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        self.get_typed(Collection::Meetings).await
    }

    pub async fn save_meeting(&self, meeting: &Meeting) -> Result<(), StoreError> {
        self.save_typed(Collection::Meetings, meeting).await
    }

    pub async fn delete_meeting(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Meetings, id).await
    }

    // Chats

    pub async fn get_chat_messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        self.get_typed(Collection::Chats).await
    }

    pub async fn save_chat_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        self.save_typed(Collection::Chats, message).await
    }

    pub async fn delete_chat_message(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Chats, id).await
    }

    // Password requests

    pub async fn get_password_requests(&self) -> Result<Vec<PasswordRequest>, StoreError> {
        self.get_typed(Collection::PasswordRequests).await
    }

    pub async fn save_password_request(&self, request: &PasswordRequest) -> Result<(), StoreError> {
        self.save_typed(Collection::PasswordRequests, request).await
    }

    /// Marks one password request processed. Returns false when the id is
    /// unknown.
    pub async fn process_password_request(&self, id: &str) -> Result<bool, StoreError> {
        self.update_where::<PasswordRequest, _>(Collection::PasswordRequests, id, |request| {
            request.processed = true;
        })
        .await
    }

    pub async fn delete_password_request(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::PasswordRequests, id).await
    }

    // Templates

    pub async fn get_templates(&self) -> Result<Vec<NoteTemplate>, StoreError> {
        self.get_typed(Collection::Templates).await
    }

    pub async fn save_template(&self, template: &NoteTemplate) -> Result<(), StoreError> {
        self.save_typed(Collection::Templates, template).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        self.delete_from(Collection::Templates, id).await
    }
}

/// Entities addressable by the transition helpers.
trait HasId {
    fn id(&self) -> &str;
}

impl HasId for PayslipEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Complaint {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for PasswordRequest {
    fn id(&self) -> &str {
        &self.id
    }
}
