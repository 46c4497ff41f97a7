use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::{Access, Operation, Resource};
use crate::domain::role::{ROLE_ADMIN, ROLE_CLIENT_COMPANY, ROLE_SUPER_ADMIN};
use crate::infrastructure::database::entities::client_company;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClientCompanyPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub contact_name: Option<String>,
}

pub struct ClientCompanyResource;

impl Resource for ClientCompanyResource {
    type Entity = client_company::Entity;
    type Model = client_company::Model;
    type ActiveModel = client_company::ActiveModel;
    type Key = i32;
    type Payload = ClientCompanyPayload;

    const NAME: &'static str = "ClientCompany";

    fn model_key(model: &client_company::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &ClientCompanyPayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: ClientCompanyPayload, key: Option<i32>) -> client_company::ActiveModel {
        client_company::ActiveModel {
            id: key.map_or(NotSet, Set),
            name: Set(p.name),
            address: Set(p.address),
            email: Set(p.email),
            phone: Set(p.phone),
            contact_name: Set(p.contact_name),
        }
    }

    fn access(op: Operation) -> Access {
        match op {
            Operation::List | Operation::Delete => Access::Roles(&[ROLE_SUPER_ADMIN, ROLE_ADMIN]),
            Operation::Get | Operation::Create | Operation::Update => {
                Access::Roles(&[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_CLIENT_COMPANY])
            }
        }
    }
}
