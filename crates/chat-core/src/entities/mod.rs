//! Domain entities - core business objects

mod channel;
mod message;
mod role;
mod settings;
mod user;

pub use channel::Channel;
pub use message::Message;
pub use role::Role;
pub use settings::ServerSettings;
pub use user::User;
