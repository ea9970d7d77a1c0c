mod comms;
mod finance;
mod task;
mod user;
mod workplace;

pub use comms::{ChatMessage, Meeting, NoteTemplate};
pub use finance::{Expense, PayslipEntry};
pub use task::{Task, TaskStatus};
pub use user::{PasswordRequest, Role, User};
pub use workplace::{AttendanceRecord, Complaint, InventoryItem, OnboardingRecord};
