pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Franchise, FranchiseAdmin, FranchiseView, NewFranchise, Store};
pub use errors::FranchiseError;
pub use ports::FranchiseRepository;
pub use services::FranchiseService;
