use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ensure_exists;
use crate::application::catalog::{Access, Operation, Resource};
use crate::domain::role::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_SUPER_ADMIN};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{client_company, customer};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    #[serde(default)]
    pub client_company_id: Option<i32>,
}

pub struct CustomerResource;

#[async_trait]
impl Resource for CustomerResource {
    type Entity = customer::Entity;
    type Model = customer::Model;
    type ActiveModel = customer::ActiveModel;
    type Key = i32;
    type Payload = CustomerPayload;

    const NAME: &'static str = "Customer";

    fn model_key(model: &customer::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &CustomerPayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: CustomerPayload, key: Option<i32>) -> customer::ActiveModel {
        customer::ActiveModel {
            id: key.map_or(NotSet, Set),
            first_name: Set(p.first_name),
            last_name: Set(p.last_name),
            dob: Set(p.dob),
            nationality: Set(p.nationality),
            client_company_id: Set(p.client_company_id),
        }
    }

    async fn verify_references(db: &DatabaseConnection, p: &CustomerPayload) -> DomainResult<()> {
        if let Some(id) = p.client_company_id {
            ensure_exists::<client_company::Entity>(db, "ClientCompany", id).await?;
        }
        Ok(())
    }

    fn access(op: Operation) -> Access {
        match op {
            Operation::List | Operation::Delete => Access::Roles(&[ROLE_SUPER_ADMIN, ROLE_ADMIN]),
            Operation::Get | Operation::Create | Operation::Update => {
                Access::Roles(&[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_CUSTOMER])
            }
        }
    }
}
