//! Queries - Costruzione dinamica di filtri e ordinamenti
//!
//! Ogni query è una pipeline ordinata di filtri tipizzati più un ordinamento.
//! La descrizione viene tradotta in SQL con `QueryBuilder`, una volta per il
//! conteggio e una per la pagina, con le stesse condizioni.

pub mod likes;
pub mod messages;
pub mod users;

pub use likes::resolve_like_set;
pub use messages::{MessageQuery, MessageScope};
pub use users::{UserFilter, UserQuery};

use crate::core::PageSource;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

/// A filter/sort description that can be rendered against MySQL
pub trait SqlQuery {
    type Row: for<'r> FromRow<'r, MySqlRow> + Send + Unpin;

    /// `SELECT ... FROM ...` used for the page itself
    const SELECT_FROM: &'static str;

    /// `SELECT COUNT(*) FROM ...` over the same candidate set
    const COUNT_FROM: &'static str;

    /// Appends ` WHERE ...` (nothing when there are no conditions)
    fn push_conditions(&self, qb: &mut QueryBuilder<'_, MySql>);

    /// Appends ` ORDER BY ...`
    fn push_ordering(&self, qb: &mut QueryBuilder<'_, MySql>);
}

/// Scrive `WHERE` prima della prima condizione e `AND` prima delle successive
pub(crate) fn push_clause(qb: &mut QueryBuilder<'_, MySql>, first: &mut bool) {
    qb.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// `SqlQuery` eseguita su un pool: sorgente per `PagedList`
pub struct SqlPage<'a, Q> {
    pool: &'a MySqlPool,
    query: &'a Q,
}

impl<'a, Q: SqlQuery> SqlPage<'a, Q> {
    pub fn new(pool: &'a MySqlPool, query: &'a Q) -> Self {
        Self { pool, query }
    }

    /// Intero insieme ordinato, senza paginazione
    pub async fn fetch_all(&self) -> Result<Vec<Q::Row>, sqlx::Error> {
        let mut qb = QueryBuilder::new(Q::SELECT_FROM);
        self.query.push_conditions(&mut qb);
        self.query.push_ordering(&mut qb);
        qb.build_query_as::<Q::Row>().fetch_all(self.pool).await
    }
}

impl<Q: SqlQuery + Sync> PageSource for SqlPage<'_, Q> {
    type Item = Q::Row;

    async fn count(&self) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::new(Q::COUNT_FROM);
        self.query.push_conditions(&mut qb);
        let total: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Q::Row>, sqlx::Error> {
        let mut qb = QueryBuilder::new(Q::SELECT_FROM);
        self.query.push_conditions(&mut qb);
        self.query.push_ordering(&mut qb);
        qb.push(" LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);
        qb.build_query_as::<Q::Row>().fetch_all(self.pool).await
    }
}
