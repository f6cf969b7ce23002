//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod enums;
pub mod like;
pub mod message;
pub mod photo;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::{Gender, LikeDirection, MessageContainer, UserOrderBy};
pub use like::Like;
pub use message::{Message, MessageWithParties};
pub use photo::Photo;
pub use user::{User, UserWithMainPhoto};
