#![allow(dead_code)]

use axum_test::TestServer;
use dating_api::core::AppState;
use dating_api::media::{ImageUpload, MediaError, MediaHost, UploadedImage};
use futures::future::{BoxFuture, FutureExt};
use sqlx::MySqlPool;
use std::sync::{Arc, Mutex};

pub const TEST_JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Media host finto: non fa chiamate di rete e ricorda cosa gli è stato chiesto
#[derive(Default)]
pub struct FakeMediaHost {
    pub uploads: Mutex<Vec<String>>,
    pub destroyed: Mutex<Vec<String>>,
    /// se true, `destroy` risponde come un host che non trova l'immagine
    pub refuse_destroy: bool,
}

impl FakeMediaHost {
    pub fn refusing_destroy() -> Self {
        Self {
            refuse_destroy: true,
            ..Self::default()
        }
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

impl MediaHost for FakeMediaHost {
    fn upload(&self, image: ImageUpload) -> BoxFuture<'_, Result<UploadedImage, MediaError>> {
        async move {
            if image.bytes.is_empty() {
                return Err(MediaError::EmptyFile);
            }
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(image.file_name);
            let public_id = format!("fake_{}", uploads.len());
            Ok(UploadedImage {
                url: format!("https://media.test/{}.jpg", public_id),
                public_id,
            })
        }
        .boxed()
    }

    fn destroy<'a>(&'a self, public_id: &'a str) -> BoxFuture<'a, Result<bool, MediaError>> {
        async move {
            if self.refuse_destroy {
                return Ok(false);
            }
            self.destroyed.lock().unwrap().push(public_id.to_string());
            Ok(true)
        }
        .boxed()
    }
}

/// Crea un AppState per i test con un media host finto
pub fn create_test_state(pool: MySqlPool) -> Arc<AppState> {
    create_test_state_with_media(pool, Arc::new(FakeMediaHost::default()))
}

pub fn create_test_state_with_media(pool: MySqlPool, media: Arc<FakeMediaHost>) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string(), media))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = dating_api::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token valido 24 ore, firmato con il segreto di test
pub fn create_test_jwt(user_id: i32, username: &str) -> String {
    dating_api::core::encode_jwt(username.to_string(), user_id, TEST_JWT_SECRET)
        .expect("Failed to create JWT token")
}

/// Valore dell'header Authorization per l'utente dato
pub fn bearer(user_id: i32, username: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id, username))
}
