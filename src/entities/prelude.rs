pub use super::chains::Entity as Chains;
