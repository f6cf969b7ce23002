//! Integration tests per gli endpoints delle foto
//!
//! Test per:
//! - GET /users/{user_id}/photos/{id}
//! - POST /users/{user_id}/photos (multipart)
//! - POST /users/{user_id}/photos/{id}/set_main
//! - DELETE /users/{user_id}/photos/{id}

mod common;

#[cfg(test)]
mod photo_tests {
    use super::common::*;
    use axum::http::{HeaderName, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use futures::future::join;
    use serde_json::Value;
    use sqlx::MySqlPool;
    use std::future::IntoFuture;
    use std::sync::Arc;

    fn auth() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    fn jpeg_form() -> MultipartForm {
        let part = Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
            .file_name("me.jpg")
            .mime_type("image/jpeg");
        MultipartForm::new()
            .add_part("file", part)
            .add_text("description", "Al mare")
    }

    async fn main_photo_ids(pool: &MySqlPool, user_id: i32) -> sqlx::Result<Vec<i32>> {
        sqlx::query_scalar("SELECT photo_id FROM photos WHERE user_id = ? AND is_main = TRUE")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    // ============================================================
    // Test per GET /users/{user_id}/photos/{id} - get_photo
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_get_photo(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/users/2/photos/2")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_ok();
        let photo: Value = response.json();
        assert_eq!(photo["id"], 2);
        assert_eq!(photo["description"], "Hiking");
        assert_eq!(photo["is_main"], false);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_get_photo_not_found(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/users/2/photos/999")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_get_photo_of_another_user(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // la foto 3 è di alice
        let response = server
            .get("/users/2/photos/3")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    // ============================================================
    // Test per POST /users/{user_id}/photos - upload_photo
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_first_upload_becomes_main(pool: MySqlPool) -> sqlx::Result<()> {
        let media = Arc::new(FakeMediaHost::default());
        let server = create_test_server(create_test_state_with_media(pool.clone(), media.clone()));

        let response = server
            .post("/users/4/photos")
            .add_header(auth(), bearer(4, "dave"))
            .multipart(jpeg_form())
            .await;

        response.assert_status(StatusCode::CREATED);
        let photo: Value = response.json();
        assert_eq!(photo["is_main"], true);
        assert_eq!(photo["url"], "https://media.test/fake_1.jpg");
        assert_eq!(photo["description"], "Al mare");
        assert_eq!(media.uploads(), vec!["me.jpg".to_string()]);

        let stored: Option<String> =
            sqlx::query_scalar("SELECT public_id FROM photos WHERE user_id = 4")
                .fetch_one(&pool)
                .await?;
        assert_eq!(stored.as_deref(), Some("fake_1"));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_upload_keeps_existing_main(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let response = server
            .post("/users/2/photos")
            .add_header(auth(), bearer(2, "bob"))
            .multipart(jpeg_form())
            .await;

        response.assert_status(StatusCode::CREATED);
        let photo: Value = response.json();
        assert_eq!(photo["is_main"], false);
        assert_eq!(main_photo_ids(&pool, 2).await?, vec![1]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_concurrent_first_uploads_keep_one_main(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let first = server
            .post("/users/4/photos")
            .add_header(auth(), bearer(4, "dave"))
            .multipart(jpeg_form());
        let second = server
            .post("/users/4/photos")
            .add_header(auth(), bearer(4, "dave"))
            .multipart(jpeg_form());
        let (a, b) = join(first.into_future(), second.into_future()).await;

        a.assert_status(StatusCode::CREATED);
        b.assert_status(StatusCode::CREATED);
        assert_eq!(main_photo_ids(&pool, 4).await?.len(), 1);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_upload_without_file(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/4/photos")
            .add_header(auth(), bearer(4, "dave"))
            .multipart(MultipartForm::new().add_text("description", "solo testo"))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_upload_for_someone_else(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/2/photos")
            .add_header(auth(), bearer(4, "dave"))
            .multipart(jpeg_form())
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    // ============================================================
    // Test per POST /users/{user_id}/photos/{id}/set_main - set_main_photo
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_set_main_swaps_main_photo(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        server
            .post("/users/2/photos/2/set_main")
            .add_header(auth(), bearer(2, "bob"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(main_photo_ids(&pool, 2).await?, vec![2]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_set_main_already_main(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users/2/photos/1/set_main")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_set_main_photo_of_another_user(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let response = server
            .post("/users/2/photos/3/set_main")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_not_found();
        assert_eq!(main_photo_ids(&pool, 2).await?, vec![1]);
        Ok(())
    }

    // ============================================================
    // Test per DELETE /users/{user_id}/photos/{id} - delete_photo
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_delete_hosted_photo(pool: MySqlPool) -> sqlx::Result<()> {
        let media = Arc::new(FakeMediaHost::default());
        let server = create_test_server(create_test_state_with_media(pool.clone(), media.clone()));

        server
            .delete("/users/2/photos/2")
            .add_header(auth(), bearer(2, "bob"))
            .await
            .assert_status_ok();

        assert_eq!(media.destroyed(), vec!["bob_hike".to_string()]);
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE photo_id = 2")
            .fetch_one(&pool)
            .await?;
        assert_eq!(remaining, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_delete_photo_without_public_id(pool: MySqlPool) -> sqlx::Result<()> {
        let media = Arc::new(FakeMediaHost::default());
        let server = create_test_server(create_test_state_with_media(pool, media.clone()));

        server
            .delete("/users/2/photos/4")
            .add_header(auth(), bearer(2, "bob"))
            .await
            .assert_status_ok();

        assert!(media.destroyed().is_empty(), "Nessuna chiamata al media host");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_delete_main_photo_rejected(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .delete("/users/2/photos/1")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "photos")))]
    async fn test_delete_refused_by_media_host(pool: MySqlPool) -> sqlx::Result<()> {
        let media = Arc::new(FakeMediaHost::refusing_destroy());
        let server = create_test_server(create_test_state_with_media(pool.clone(), media));

        let response = server
            .delete("/users/2/photos/2")
            .add_header(auth(), bearer(2, "bob"))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE photo_id = 2")
            .fetch_one(&pool)
            .await?;
        assert_eq!(remaining, 1, "La riga resta se il media host non conferma");
        Ok(())
    }
}
