use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::ingest::RowErrorKind;
use crate::routes::{auth, health, internal_marks, students, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::route::health,
        auth::route::login,
        internal_marks::route::upload_internal_marks,
        internal_marks::route::download_sample_csv,
        internal_marks::route::get_my_internal_marks,
        students::route::get_all_students,
        students::route::get_student_internal_marks,
        users::route::get_all_users,
        users::route::delete_user,
    ),
    components(schemas(
        RoleEnum,
        RowErrorKind,
        health::route::HealthResponse,
        auth::dto::LoginRequest,
        auth::dto::LoginResponse,
        internal_marks::dto::UploadInternalMarksResponse,
        internal_marks::dto::InternalMarkRowError,
        internal_marks::dto::InternalMarkResponse,
        students::dto::StudentResponse,
        students::dto::StudentListResponse,
        users::dto::UserResponse,
        users::dto::UserListResponse,
        users::dto::DeleteUserResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Login"),
        (name = "Internal Marks", description = "CSV bulk upload and read-back of internal marks"),
        (name = "Students", description = "Students visible to teachers"),
        (name = "Users", description = "Account administration")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
