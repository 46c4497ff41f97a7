//! Database entities module

pub mod booking;
pub mod booking_location;
pub mod client_company;
pub mod customer;
pub mod driver;
pub mod email_verification_token;
pub mod location;
pub mod role;
pub mod user;
pub mod user_role;
pub mod vehicle;

pub use booking::Entity as Booking;
pub use booking_location::Entity as BookingLocation;
pub use client_company::Entity as ClientCompany;
pub use customer::Entity as Customer;
pub use driver::Entity as Driver;
pub use email_verification_token::Entity as EmailVerificationToken;
pub use location::Entity as Location;
pub use role::Entity as Role;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
pub use vehicle::Entity as Vehicle;
