//! HTTP-level tests for the internal-marks routes, role gating and login.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use common::{
    TEST_PASSWORD, csv_form, marks_csv, seed_student, seed_student_for_user, setup_app,
    setup_app_with,
};
use eduverse_service::state::AppSettings;
use eduverse_service::entities::prelude::InternalMark;
use eduverse_service::entities::sea_orm_active_enums::RoleEnum;
use eduverse_service::ingest::SAMPLE_CSV;
use eduverse_service::middleware::permission::PERMISSION_DENIED;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

const UPLOAD_PATH: &str = "/api/v1/teacher/internal-marks/upload";
const SAMPLE_PATH: &str = "/api/v1/teacher/internal-marks/sample";

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let app = setup_app().await?;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_upload_reports_partial_success() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let csv = marks_csv(&[
        "s1@x.com,1,Math,80,85,90,15",
        "bad@x.com,1,Math,1,1,1,1",
        "s1@x.com,1,Math,99,99,99,99",
    ]);

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.csv", &csv))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_records"], 3);
    assert_eq!(body["successful"], 2);
    assert_eq!(body["inserted"], 1);
    assert_eq!(body["updated"], 1);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["errors"][0]["row"], 3);
    assert_eq!(body["errors"][0]["email"], "bad@x.com");
    assert_eq!(body["errors"][0]["kind"], "student_not_found");
    assert_eq!(
        body["messages"],
        json!([
            "2 internal mark record(s) uploaded/updated successfully.",
            "Student with email bad@x.com not found."
        ])
    );

    let mark = InternalMark::find()
        .one(app.db())
        .await?
        .expect("one mark should exist");
    assert_eq!(mark.mid_exam1, 99);

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_uppercase_extension() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("MARKS.CSV", &marks_csv(&["s1@x.com,1,Math,1,2,3,4"])))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid file type. Please upload a CSV file.");
    assert_eq!(InternalMark::find().count(app.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_upload_over_limit_is_payload_too_large() -> Result<()> {
    let app = setup_app_with(AppSettings {
        max_upload_bytes: 512,
        ..AppSettings::default()
    })
    .await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let rows: Vec<String> = (1..=100)
        .map(|semester| format!("s1@x.com,{semester},Math,1,2,3,4"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.csv", &marks_csv(&rows)))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(InternalMark::find().count(app.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_upload_accepts_padded_scores() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.csv", &marks_csv(&["s1@x.com,1,Math, 80,85 ,90,15"])))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["successful"], 1);

    let mark = InternalMark::find()
        .one(app.db())
        .await?
        .expect("one mark should exist");
    assert_eq!((mark.mid_exam1, mark.mid_exam2), (80, 85));

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_wrong_extension() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.txt", &marks_csv(&["s1@x.com,1,Math,1,2,3,4"])))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid file type. Please upload a CSV file.");
    assert_eq!(InternalMark::find().count(app.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_empty_file_name() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("", SAMPLE_CSV))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "No selected file");

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_missing_file_part() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "No file part");

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_missing_columns() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;

    let response = app
        .server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.csv", "student_email,semester,subject\ns1@x.com,1,Math\n"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text(),
        "Missing required columns: mid_exam1, mid_exam2, final_mid_exam, lab_internal"
    );
    assert_eq!(InternalMark::find().count(app.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_sample_download_returns_exact_csv() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;

    let response = app.server.get(SAMPLE_PATH).authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.text(),
        "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n\
         student1@example.com,1,Math,80,85,90,15\n\
         student2@example.com,1,Science,75,70,80,12\n"
    );
    assert_eq!(response.header("content-type"), "text/csv");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"internal_marks_sample.csv\""
    );

    Ok(())
}

#[tokio::test]
async fn test_teacher_routes_require_token() -> Result<()> {
    let app = setup_app().await?;

    let response = app.server.get(SAMPLE_PATH).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(SAMPLE_PATH)
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_teacher_routes_reject_other_roles() -> Result<()> {
    let app = setup_app().await?;
    seed_student(app.db(), "s1@x.com").await?;

    for (email, role) in [
        ("student@x.com", RoleEnum::Student),
        ("admin@x.com", RoleEnum::Admin),
    ] {
        let token = app.login_as(email, role).await?;

        let response = app
            .server
            .post(UPLOAD_PATH)
            .authorization_bearer(&token)
            .multipart(csv_form("marks.csv", &marks_csv(&["s1@x.com,1,Math,1,2,3,4"])))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(response.text(), PERMISSION_DENIED);
    }

    assert_eq!(InternalMark::find().count(app.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_login_then_list_students() -> Result<()> {
    let app = setup_app().await?;
    app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    seed_student(app.db(), "s1@x.com").await?;
    seed_student(app.db(), "s2@x.com").await?;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "teacher@x.com", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "teacher@x.com", "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["token_type"], "Bearer");
    let token = body["access_token"].as_str().expect("token").to_string();

    let response = app
        .server
        .get("/api/v1/teacher/students")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total"], 2);

    Ok(())
}

#[tokio::test]
async fn test_teacher_reads_student_marks() -> Result<()> {
    let app = setup_app().await?;
    let token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    let student = seed_student(app.db(), "s1@x.com").await?;

    app.server
        .post(UPLOAD_PATH)
        .authorization_bearer(&token)
        .multipart(csv_form("marks.csv", &marks_csv(&["s1@x.com,2,Math,10,20,30,5"])))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get(&format!(
            "/api/v1/teacher/students/{}/internal-marks",
            student.student_id
        ))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let marks: Vec<Value> = response.json();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["semester"], 2);
    assert_eq!(marks[0]["final_mid_exam"], 30);

    let response = app
        .server
        .get(&format!(
            "/api/v1/teacher/students/{}/internal-marks",
            uuid::Uuid::new_v4()
        ))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_student_reads_own_marks() -> Result<()> {
    let app = setup_app().await?;
    let teacher_token = app.login_as("teacher@x.com", RoleEnum::Teacher).await?;
    let student_user = common::seed_user(app.db(), "s1@x.com", RoleEnum::Student).await?;
    seed_student_for_user(app.db(), "s1@x.com", Some(student_user.user_id)).await?;
    seed_student(app.db(), "s2@x.com").await?;

    let csv = marks_csv(&["s1@x.com,1,Math,80,85,90,15", "s2@x.com,1,Math,1,1,1,1"]);
    app.server
        .post(UPLOAD_PATH)
        .authorization_bearer(&teacher_token)
        .multipart(csv_form("marks.csv", &csv))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/api/v1/student/internal-marks")
        .authorization_bearer(app.token_for(&student_user))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let marks: Vec<Value> = response.json();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["mid_exam2"], 85);

    let response = app
        .server
        .get("/api/v1/student/internal-marks")
        .authorization_bearer(&teacher_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    Ok(())
}
