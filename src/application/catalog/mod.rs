//! Booking catalog
//!
//! Every catalog table goes through the same generic service. What differs
//! per table lives in a [`Resource`] implementation under `resources`.

pub mod resource;
pub mod resources;
pub mod service;

pub use resource::{Access, Operation, Resource, ResourceKey};
pub use resources::{
    BookingLocationResource, BookingResource, ClientCompanyResource, CustomerResource,
    DriverResource, LocationResource, VehicleResource,
};
pub use service::CrudService;
