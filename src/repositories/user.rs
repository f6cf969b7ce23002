//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Read, Update};
use crate::core::PagedList;
use crate::dtos::{CreateUserDTO, UpdateUserDTO};
use crate::entities::{User, UserWithMainPhoto};
use crate::queries::{SqlPage, UserQuery};
use chrono::{DateTime, Utc};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};
use tracing::{debug, instrument};

const SELECT_USER: &str = "SELECT user_id, username, password, gender, date_of_birth, known_as, \
    created, last_active, introduction, looking_for, interests, city, country FROM users";

// USER REPO
pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> UserRepository {
        Self { connection_pool }
    }

    /// Username univoco, match esatto
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE username = ?", SELECT_USER))
            .bind(username)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(user)
    }

    /// Aggiorna `last_active` senza rileggere la riga
    pub async fn touch_last_active(&self, user_id: &i32, at: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE users SET last_active = ? WHERE user_id = ?")
            .bind(at)
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    /// One page of the user listing, each row joined with its main photo url
    #[instrument(skip(self, query))]
    pub async fn find_paged(
        &self,
        query: &UserQuery,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedList<UserWithMainPhoto>, Error> {
        debug!("Listing users with {} filters", query.filters().len());
        PagedList::create(&SqlPage::new(&self.connection_pool, query), page_number, page_size).await
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, gender, date_of_birth, known_as, created, last_active, city, country)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.username)
        .bind(&data.password)
        .bind(data.gender.as_str())
        .bind(data.date_of_birth)
        .bind(&data.known_as)
        .bind(now)
        .bind(now)
        .bind(&data.city)
        .bind(&data.country)
        .execute(&self.connection_pool)
        .await?;

        // Get the last inserted ID
        let new_id = result.last_insert_id() as i32;

        Ok(User {
            user_id: new_id,
            username: data.username.clone(),
            password: data.password.clone(),
            gender: data.gender,
            date_of_birth: data.date_of_birth,
            known_as: data.known_as.clone(),
            created: now,
            last_active: now,
            introduction: None,
            looking_for: None,
            interests: None,
            city: data.city.clone(),
            country: data.country.clone(),
        })
    }
}

impl Read<User, i32> for UserRepository {
    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE user_id = ?", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(user)
    }
}

impl Update<User, UpdateUserDTO, i32> for UserRepository {
    async fn update(&self, id: &i32, data: &UpdateUserDTO) -> Result<User, Error> {
        // First, get the current user to ensure it exists
        let current_user = self.read(id).await?.ok_or(Error::RowNotFound)?;

        if data.is_empty() {
            return Ok(current_user);
        }

        let mut qb: QueryBuilder<MySql> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = qb.separated(", ");
        let columns = [
            ("introduction", &data.introduction),
            ("looking_for", &data.looking_for),
            ("interests", &data.interests),
            ("city", &data.city),
            ("country", &data.country),
        ];
        for (column, value) in columns {
            if let Some(value) = value {
                fields.push(format!("{} = ", column));
                fields.push_bind_unseparated(value.clone());
            }
        }
        qb.push(" WHERE user_id = ").push_bind(*id);
        qb.build().execute(&self.connection_pool).await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}
