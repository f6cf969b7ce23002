//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod message;
pub mod photo;
pub mod query;
pub mod user;

// Re-exports per facilitare l'import
pub use message::{CreateMessageDTO, MessageDTO, SendMessageDTO};
pub use photo::{CreatePhotoDTO, PhotoDTO};
pub use query::{MessageParams, UserParams};
pub use user::{AuthResponse, CreateUserDTO, LoginDTO, UpdateUserDTO, UserDetailDTO, UserListDTO};
