//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository possiede un clone del pool e gestisce le operazioni di database
//! per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query sono scritte con le funzioni runtime (`sqlx::query`, `sqlx::query_as::<_, T>`)
   e non con le macro `query!` / `query_as!`: il crate deve compilare anche senza un database
   raggiungibile, e le liste (utenti, messaggi) hanno WHERE costruiti a runtime con `QueryBuilder`
   (vedi `crate::queries`).
   In cambio il controllo dello schema si sposta nei test: ogni `#[sqlx::test]` applica le
   migrations e carica i fixtures, quindi una colonna sbagliata fa fallire i test di integrazione.

   Promemoria sui metodi:
   .execute(..)         INSERT/UPDATE/DELETE
   .fetch_optional(..)  zero o una riga
   .fetch_one(..)       esattamente una riga (aggregate, COUNT)
   .fetch_all(..)       tutte le righe
   Sempre con `.await?`, l'errore risale al service che lo converte in AppError.
*/

pub mod like;
pub mod message;
pub mod photo;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use like::LikeRepository;
pub use message::MessageRepository;
pub use photo::PhotoRepository;
pub use user::UserRepository;
