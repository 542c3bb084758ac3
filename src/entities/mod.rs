//! SeaORM entities backing the garage workflow tables.
pub mod customer;
pub mod job_card;
pub mod job_card_part;
pub mod job_card_service;
pub mod setting;
pub mod user;
pub mod vehicle;

pub use customer::{Entity as Customer, Model as CustomerModel};
pub use job_card::{Entity as JobCard, JobStatus, Model as JobCardModel};
pub use job_card_part::{Entity as JobCardPart, Model as JobCardPartModel};
pub use job_card_service::{Entity as JobCardService, Model as JobCardServiceModel};
pub use setting::{Entity as Setting, Model as SettingModel};
pub use user::{Entity as User, Model as UserModel, UserRole};
pub use vehicle::{Entity as Vehicle, Model as VehicleModel};
