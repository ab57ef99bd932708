pub mod comment;
pub mod condominium;
pub mod department;
pub mod financial;
pub mod priority;
pub mod profile;
pub mod user;

pub use comment::Comment;
pub use condominium::Condominium;
pub use department::Department;
pub use financial::FinancialStat;
pub use priority::PriorityItem;
pub use profile::HabitantProfile;
pub use user::User;
