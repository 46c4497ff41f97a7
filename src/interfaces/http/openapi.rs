//! OpenAPI document
//!
//! Account, role and health operations are annotated handlers. Catalog
//! routes are generic, so their operations are added by [`CatalogPaths`].

use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{ContentBuilder, Ref, Required, ResponseBuilder};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::application::catalog::resources::{
    BookingLocationPayload, BookingPayload, ClientCompanyPayload, CustomerPayload, DriverPayload,
    LocationPayload, VehiclePayload,
};
use crate::application::catalog::{
    BookingLocationResource, BookingResource, ClientCompanyResource, CustomerResource,
    DriverResource, LocationResource, Operation, Resource, VehicleResource,
};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::account::dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisteredUser,
};
use crate::interfaces::http::modules::roles::dto::{
    AssignRoleRequest, CreateRoleRequest, RoleDto, UpdateRoleRequest,
};
use crate::interfaces::http::modules::{account, health, roles};

/// Security scheme
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
                        .description(Some("Token from POST /api/Account/login"))
                        .build(),
                ),
            );
        }
    }
}

/// Operations of the generic catalog routes
struct CatalogPaths;

impl Modify for CatalogPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        add_resource_paths::<VehicleResource>(openapi);
        add_resource_paths::<DriverResource>(openapi);
        add_resource_paths::<CustomerResource>(openapi);
        add_resource_paths::<ClientCompanyResource>(openapi);
        add_resource_paths::<LocationResource>(openapi);
        add_resource_paths::<BookingResource>(openapi);
        add_resource_paths::<BookingLocationResource>(openapi);
    }
}

fn add_resource_paths<R: Resource>(openapi: &mut utoipa::openapi::OpenApi) {
    let collection = R::path();
    let item = format!("{collection}/{}", R::KEY_SEGMENTS);
    let key_params: Vec<&str> = R::KEY_SEGMENTS
        .split('/')
        .map(|s| s.trim_matches(|c| c == '{' || c == '}'))
        .collect();
    let payload = <R::Payload as ToSchema>::name().to_string();

    let operation = |op: Operation, summary: String, keyed: bool, with_body: bool| {
        let mut builder = OperationBuilder::new()
            .tag(R::NAME)
            .operation_id(Some(format!("{}_{}", R::NAME, op.as_str())))
            .summary(Some(summary));
        if keyed {
            for name in &key_params {
                builder = builder.parameter(
                    ParameterBuilder::new()
                        .name(*name)
                        .parameter_in(ParameterIn::Path)
                        .required(Required::True)
                        .build(),
                );
            }
        }
        if with_body {
            builder = builder.request_body(Some(
                RequestBodyBuilder::new()
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(Ref::from_schema_name(payload.clone())))
                            .build(),
                    )
                    .required(Some(Required::True))
                    .build(),
            ));
        }
        builder = match op {
            Operation::List | Operation::Get => builder
                .response("200", ResponseBuilder::new().description("Success").build()),
            Operation::Create => builder
                .response("201", ResponseBuilder::new().description("Created").build())
                .response("400", ResponseBuilder::new().description("Invalid body").build()),
            Operation::Update => builder
                .response("204", ResponseBuilder::new().description("Updated").build())
                .response(
                    "400",
                    ResponseBuilder::new()
                        .description("Invalid body or key mismatch")
                        .build(),
                ),
            Operation::Delete => builder
                .response("204", ResponseBuilder::new().description("Deleted").build()),
        };
        if keyed {
            builder = builder.response("404", ResponseBuilder::new().description("Not found").build());
        }
        if !R::access(op).is_public() {
            builder = builder
                .security(SecurityRequirement::new("bearer_auth", Vec::<String>::new()))
                .response("401", ResponseBuilder::new().description("Unauthorized").build())
                .response("403", ResponseBuilder::new().description("Role required").build());
        }
        builder.build()
    };

    let name = R::NAME;
    let paths = &mut openapi.paths;
    paths.add_path_operation(
        &collection,
        vec![HttpMethod::Get],
        operation(Operation::List, format!("List {name} records"), false, false),
    );
    paths.add_path_operation(
        &collection,
        vec![HttpMethod::Post],
        operation(Operation::Create, format!("Create a {name}"), false, true),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Get],
        operation(Operation::Get, format!("Get a {name}"), true, false),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Put],
        operation(Operation::Update, format!("Replace a {name}"), true, true),
    );
    paths.add_path_operation(
        &item,
        vec![HttpMethod::Delete],
        operation(Operation::Delete, format!("Delete a {name}"), true, false),
    );
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health_check,
        account::handlers::register,
        account::handlers::verify_email,
        account::handlers::login,
        account::handlers::logout,
        roles::handlers::list_roles,
        roles::handlers::get_role,
        roles::handlers::create_role,
        roles::handlers::update_role,
        roles::handlers::delete_role,
        roles::handlers::assign_role_to_user,
    ),
    components(
        schemas(
            ApiResponse<RegisteredUser>,
            ApiResponse<LoginResponse>,
            ApiResponse<MessageResponse>,
            ApiResponse<RoleDto>,
            RegisterRequest,
            LoginRequest,
            RegisteredUser,
            LoginResponse,
            MessageResponse,
            RoleDto,
            CreateRoleRequest,
            UpdateRoleRequest,
            AssignRoleRequest,
            VehiclePayload,
            DriverPayload,
            CustomerPayload,
            ClientCompanyPayload,
            LocationPayload,
            BookingPayload,
            BookingLocationPayload,
        )
    ),
    modifiers(&SecurityAddon, &CatalogPaths),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Account", description = "Registration, email verification and login"),
        (name = "Roles", description = "Role management (Admin only)"),
        (name = "Vehicle", description = "Fleet vehicles"),
        (name = "Driver", description = "Drivers"),
        (name = "Customer", description = "Customers"),
        (name = "ClientCompany", description = "Corporate clients"),
        (name = "Location", description = "Pick-up and drop-off locations"),
        (name = "Booking", description = "Bookings"),
        (name = "BookingLocation", description = "Locations attached to bookings"),
    ),
    info(
        title = "TCTravel Booking API",
        version = "0.1.0",
        description = "Vehicle booking management: catalog CRUD, accounts and roles"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_catalog_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/Vehicle"));
        assert!(paths.contains_key("/api/Vehicle/{id}"));
        assert!(paths.contains_key("/api/BookingLocation/{booking_id}/{location_id}"));
        assert!(paths.contains_key("/api/Account/login"));
        assert!(paths.contains_key("/api/Roles/assign-role-to-user"));

        let item = &paths["/api/Vehicle/{id}"];
        assert!(item.get.is_some() && item.put.is_some() && item.delete.is_some());
    }
}
