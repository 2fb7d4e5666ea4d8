use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceInfoDoc { pub message: String, pub version: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub detail: Option<String> }

/// Customer record as serialized by the API (timestamps are RFC 3339).
#[derive(ToSchema)]
pub struct CustomerDoc {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub criado_em: String,
    pub atualizado_em: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Sistema de Cadastro de Clientes", description = "API para gerenciamento de clientes"),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::customers::create,
        crate::routes::customers::list,
        crate::routes::customers::get,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceInfoDoc,
            ErrorBody,
            CustomerDoc,
            crate::routes::customers::CreateCustomerRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "clientes")
    )
)]
pub struct ApiDoc;
