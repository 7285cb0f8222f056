//! Authentication use cases

mod login_user;
mod logout_user;
mod register_user;
mod update_user;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use update_user::{UpdateUserCommand, UpdateUserUseCase};
