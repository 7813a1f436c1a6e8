//! Presentation-state controllers
//!
//! Plain state machines with no rendering dependencies: a host UI reads
//! their state after each event or completed operation. All network work is
//! delegated to the clients in [`crate::booking`] and [`crate::services`];
//! identity mutations go through [`crate::auth::IdentityProvider`].

mod account;
mod banner;
mod bookings;
mod messages;
mod schedule;

pub use account::*;
pub use banner::*;
pub use bookings::*;
pub use messages::*;
pub use schedule::*;
