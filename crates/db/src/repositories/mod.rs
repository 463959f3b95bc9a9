//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod company;
pub mod product;
pub mod sale;
pub mod subscription;
pub mod transaction;
pub mod user;

pub use category::{CategoryError, CategoryRepository};
pub use company::{CompanyError, CompanyRepository, CreateCompanyInput};
pub use product::{CreateProductInput, ProductFilter, ProductRepository, UpdateProductInput};
pub use sale::{CheckoutInput, SaleRepository, SaleWithItems};
pub use subscription::{Feature, LimitCheckResult, SubscriptionError, SubscriptionRepository};
pub use transaction::{TransactionFilter, TransactionRepository, TransactionWithItems};
pub use user::{CreateUserInput, UserError, UserRepository};
