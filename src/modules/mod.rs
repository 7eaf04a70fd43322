pub mod auth;
pub mod private;
pub mod public;
pub mod users;

pub use self::auth::model::RegisterResponse;
pub use self::users::service::UserService;
