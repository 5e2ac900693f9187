//! Concrete resources served by the API.
//!
//! Each module holds one record type, its [`Schema`](crate::framework::Schema) and its
//! generator, wired together through [`Resource`](crate::framework::Resource). Nothing
//! here knows about the store or the transport.

pub mod analytics;
pub mod attendances;
pub mod chats;
pub mod crypto_transactions;
pub mod cryptos;
pub mod employees;
pub mod expenses;
pub mod fake;
pub mod feedbacks;
pub mod incomes;
pub mod medical;
pub mod notifications;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod products;
pub mod todos;
pub mod users;

pub use analytics::Analytic;
pub use attendances::Attendance;
pub use chats::Chat;
pub use crypto_transactions::CryptoTransaction;
pub use cryptos::Crypto;
pub use employees::Employee;
pub use expenses::Expense;
pub use feedbacks::Feedback;
pub use incomes::Income;
pub use medical::Medical;
pub use notifications::Notification;
pub use order_items::OrderItem;
pub use orders::Order;
pub use payments::Payment;
pub use products::Product;
pub use todos::Todo;
pub use users::User;
