//! sqlx-backed repositories, one per entity. Methods that take part in a
//! multi-step write are associated functions generic over the executor so
//! services can run them inside a single transaction.

pub mod comments;
pub mod condominiums;
pub mod departments;
pub mod financials;
pub mod priorities;
pub mod profiles;
pub mod tokens;
pub mod users;

pub use comments::CommentRepository;
pub use condominiums::CondominiumRepository;
pub use departments::{DepartmentRepository, NewDepartment};
pub use financials::FinancialRepository;
pub use priorities::PriorityRepository;
pub use profiles::{NewProfile, ProfileRepository};
pub use tokens::TokenRepository;
pub use users::{NewUser, UserRepository};
