use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentRecordDoc {
    pub Id: i64,
    pub StudentName: String,
    pub Age: i64,
    pub City: String,
}

#[derive(ToSchema)]
pub struct MessageResponse { pub data: String }

#[derive(ToSchema)]
pub struct StudentResponse { pub data: StudentRecordDoc }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::create_student,
        crate::routes::students::read_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            StudentRecordDoc,
            MessageResponse,
            StudentResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
