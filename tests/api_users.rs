//! Integration tests per gli endpoints degli utenti
//!
//! Test per:
//! - GET /users (lista paginata con filtri)
//! - GET /users/{id}
//! - PUT /users/{user_id}
//! - POST /users/{user_id}/like/{recipient_id}

mod common;

#[cfg(test)]
mod user_tests {
    use super::common::*;
    use axum::http::{HeaderName, StatusCode};
    use axum_test::TestServer;
    use chrono::{Days, Months, NaiveDate, Utc};
    use dating_api::AppError;
    use dating_api::entities::Like;
    use dating_api::repositories::Create;
    use serde_json::{Value, json};
    use sqlx::MySqlPool;

    fn auth() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    async fn list(server: &TestServer, user_id: i32, username: &str, query: &str) -> Value {
        let response = server
            .get(&format!("/users{}", query))
            .add_header(auth(), bearer(user_id, username))
            .await;
        response.assert_status_ok();
        response.json()
    }

    fn years_ago(years: u32) -> NaiveDate {
        Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(years * 12))
            .unwrap()
    }

    async fn insert_male(pool: &MySqlPool, user_id: i32, date_of_birth: NaiveDate) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO users (user_id, username, password, gender, date_of_birth, known_as, \
             created, last_active, city, country) \
             VALUES (?, ?, 'x', 'male', ?, ?, '2024-01-10 09:00:00', '2024-05-01 09:00:00', 'Torino', 'Italy')",
        )
        .bind(user_id)
        .bind(format!("edge{}", user_id))
        .bind(date_of_birth)
        .bind(format!("Edge {}", user_id))
        .execute(pool)
        .await?;
        Ok(())
    }

    fn ids(page: &Value) -> Vec<i64> {
        page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_i64().unwrap())
            .collect()
    }

    // ============================================================
    // Test per GET /users - list_users
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_list_defaults_to_opposite_gender(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "").await;

        // maschi, ordinati per last_active decrescente
        assert_eq!(ids(&page), vec![6, 2, 4, 3]);
        assert_eq!(page["total_count"], 4);
        assert_eq!(page["total_pages"], 1);
        assert_eq!(page["current_page"], 1);
        assert_eq!(page["page_size"], 10);

        let bob = &page["items"][1];
        assert_eq!(bob["known_as"], "Bob");
        assert_eq!(bob["age"], 36);
        assert_eq!(
            bob["photo_url"],
            "https://res.cloudinary.com/demo/image/upload/bob_main.jpg"
        );
        assert!(page["items"][0]["photo_url"].is_null());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_list_never_contains_requester(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 2, "bob", "?gender=male").await;

        assert_eq!(ids(&page), vec![6, 4, 3]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_list_order_by_created(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?order_by=created").await;

        assert_eq!(ids(&page), vec![6, 4, 3, 2]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_list_age_range(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?min_age=30&max_age=39").await;

        assert_eq!(ids(&page), vec![2]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_list_age_bounds_are_inclusive(pool: MySqlPool) -> sqlx::Result<()> {
        // età 20..=30: nati tra oggi-31 anni e oggi-20 anni, estremi compresi
        let oldest = years_ago(31);
        let youngest = years_ago(20);
        insert_male(&pool, 201, oldest).await?;
        insert_male(&pool, 202, oldest - Days::new(1)).await?;
        insert_male(&pool, 203, youngest).await?;
        insert_male(&pool, 204, youngest + Days::new(1)).await?;
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?min_age=20&max_age=30").await;

        let mut listed = ids(&page);
        listed.sort();
        // dave (25 anni) più i due nati esattamente sugli estremi
        assert_eq!(listed, vec![4, 201, 203]);
        assert_eq!(page["total_count"], 3);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_list_with_huge_max_age(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?max_age=3000").await;

        assert_eq!(ids(&page), vec![6, 2, 4, 3]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_list_counts_each_user_once(pool: MySqlPool) -> sqlx::Result<()> {
        // dati sporchi: bob con due foto principali
        sqlx::query(
            "INSERT INTO photos (user_id, url, date_added, is_main) \
             VALUES (2, 'https://media.test/bob_extra.jpg', '2024-03-01 10:00:00', TRUE)",
        )
        .execute(&pool)
        .await?;
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "").await;

        assert_eq!(ids(&page), vec![6, 2, 4, 3]);
        assert_eq!(page["total_count"], 4);
        assert_eq!(
            page["items"][1]["photo_url"],
            "https://res.cloudinary.com/demo/image/upload/bob_main.jpg"
        );
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_list_likers(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?likers=true").await;

        // bob e charlie hanno messo like ad alice
        assert_eq!(ids(&page), vec![2, 3]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_list_likees(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 1, "alice", "?likees=true").await;

        // alice ha messo like solo a dave
        assert_eq!(ids(&page), vec![4]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_list_likers_without_relations_is_empty(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 5, "erin", "?likers=true").await;

        assert!(ids(&page).is_empty());
        assert_eq!(page["total_count"], 0);
        assert_eq!(page["total_pages"], 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "crowd")))]
    async fn test_list_third_page_of_twenty_five(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 2, "bob", "?page_number=3&page_size=10").await;

        assert_eq!(page["total_count"], 25);
        assert_eq!(page["total_pages"], 3);
        assert_eq!(page["current_page"], 3);
        assert_eq!(ids(&page), vec![105, 104, 103, 102, 101]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "crowd")))]
    async fn test_list_page_past_the_end(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 2, "bob", "?page_number=9").await;

        assert!(ids(&page).is_empty());
        assert_eq!(page["total_count"], 25);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "crowd")))]
    async fn test_list_page_size_is_clamped(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let page = list(&server, 2, "bob", "?page_size=0&page_number=0").await;

        assert_eq!(page["page_size"], 1);
        assert_eq!(page["current_page"], 1);
        assert_eq!(ids(&page), vec![5]);
        Ok(())
    }

    // ============================================================
    // Test per GET /users/{id} - get_user
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_get_user_with_photos(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/users/2").add_header(auth(), bearer(1, "alice")).await;

        response.assert_status_ok();
        let user: Value = response.json();
        assert_eq!(user["username"], "bob");
        assert_eq!(user["photos"].as_array().unwrap().len(), 3);
        assert_eq!(
            user["photo_url"],
            "https://res.cloudinary.com/demo/image/upload/bob_main.jpg"
        );
        assert!(user.get("password").is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_get_user_not_found(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/users/999").add_header(auth(), bearer(1, "alice")).await;

        response.assert_status_not_found();
        Ok(())
    }

    // ============================================================
    // Test per PUT /users/{user_id} - update_user
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_update_own_profile(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let body = json!({ "introduction": "Ciao a tutti", "city": "Milano" });
        server
            .put("/users/1")
            .add_header(auth(), bearer(1, "alice"))
            .json(&body)
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        let user: Value = server
            .get("/users/1")
            .add_header(auth(), bearer(1, "alice"))
            .await
            .json();
        assert_eq!(user["introduction"], "Ciao a tutti");
        assert_eq!(user["city"], "Milano");
        // campi non inviati restano invariati
        assert_eq!(user["looking_for"], "Someone kind");
        assert_eq!(user["country"], "Italy");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_update_other_profile_unauthorized(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/users/2")
            .add_header(auth(), bearer(1, "alice"))
            .json(&json!({ "city": "Milano" }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    // ============================================================
    // Test per POST /users/{user_id}/like/{recipient_id} - like_user
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_like_user(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        server
            .post("/users/5/like/2")
            .add_header(auth(), bearer(5, "erin"))
            .await
            .assert_status_ok();

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE liker_id = 5 AND likee_id = 2")
                .fetch_one(&pool)
                .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_like_twice_conflict(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/1/like/4")
            .add_header(auth(), bearer(1, "alice"))
            .await;

        response.assert_status_conflict();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "likes")))]
    async fn test_duplicate_like_insert_is_conflict(pool: MySqlPool) -> sqlx::Result<()> {
        // un like concorrente che supera il controllo urta la chiave primaria
        let state = create_test_state(pool);

        let err = state
            .like
            .create(&Like {
                liker_id: 1,
                likee_id: 4,
            })
            .await
            .unwrap_err();

        assert_eq!(AppError::from(err).status(), StatusCode::CONFLICT);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_like_missing_user(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/1/like/999")
            .add_header(auth(), bearer(1, "alice"))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_like_yourself(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/1/like/1")
            .add_header(auth(), bearer(1, "alice"))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_like_on_behalf_of_someone_else(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/2/like/4")
            .add_header(auth(), bearer(1, "alice"))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }
}
