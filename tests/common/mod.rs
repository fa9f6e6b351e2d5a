#![allow(dead_code)]

use anyhow::Result;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use eduverse_service::app::create_app;
use eduverse_service::config::JWT_EXPRIED_TIME;
use eduverse_service::database::get_database_connection;
use eduverse_service::entities::sea_orm_active_enums::RoleEnum;
use eduverse_service::entities::{student, user};
use eduverse_service::repositories::{NewStudent, StudentRepository, UserRepository};
use eduverse_service::state::{AppSettings, AppState};
use eduverse_service::utils::jwt::JwtManager;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "password123";

// bcrypt's lowest cost keeps the tests fast
const TEST_BCRYPT_COST: u32 = 4;

/// A migrated SQLite database in its own temp directory. The directory is
/// removed when this value is dropped, so keep it alive for the whole test.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub async fn setup_db() -> Result<TestDb> {
    let dir = TempDir::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let db = get_database_connection(&db_url).await?;

    Ok(TestDb { db, _dir: dir })
}

pub async fn seed_student(db: &DatabaseConnection, email: &str) -> Result<student::Model> {
    seed_student_for_user(db, email, None).await
}

pub async fn seed_student_for_user(
    db: &DatabaseConnection,
    email: &str,
    user_id: Option<Uuid>,
) -> Result<student::Model> {
    StudentRepository::new(db)
        .create(NewStudent {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            department: "Computer Science".to_string(),
            semester: 1,
            user_id,
            profile_image_url: None,
        })
        .await
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, role: RoleEnum) -> Result<user::Model> {
    let hashed = bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST)?;
    UserRepository::new(db)
        .create(Uuid::new_v4(), email.to_string(), hashed, role)
        .await
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub test_db: TestDb,
}

impl TestApp {
    pub fn db(&self) -> &DatabaseConnection {
        &self.test_db.db
    }

    pub fn token_for(&self, user: &user::Model) -> String {
        self.state
            .jwt
            .create_jwt(&user.user_id.to_string(), &user.email, user.role, JWT_EXPRIED_TIME)
            .expect("token should encode")
    }

    /// Creates a user with `role` and returns a bearer token for it.
    pub async fn login_as(&self, email: &str, role: RoleEnum) -> Result<String> {
        let user = seed_user(self.db(), email, role).await?;
        Ok(self.token_for(&user))
    }
}

pub async fn setup_app() -> Result<TestApp> {
    setup_app_with(AppSettings::default()).await
}

pub async fn setup_app_with(settings: AppSettings) -> Result<TestApp> {
    let test_db = setup_db().await?;
    let state = AppState::new(
        test_db.db.clone(),
        JwtManager::new(TEST_JWT_SECRET),
        settings,
    );

    let app = create_app(state.clone())?;
    let server = TestServer::new(app)?;

    Ok(TestApp {
        server,
        state,
        test_db,
    })
}

pub fn csv_form(file_name: &str, content: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.as_bytes().to_vec())
            .file_name(file_name)
            .mime_type("text/csv"),
    )
}

/// Header plus one line per row, LF-terminated.
pub fn marks_csv(rows: &[&str]) -> String {
    let mut csv = String::from(
        "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n",
    );
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}
