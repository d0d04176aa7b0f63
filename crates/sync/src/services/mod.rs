//! Engine services.
//!
//! Everything above the repositories: the order lifecycle boundary that
//! enforces the state machine, the notification dispatcher, the owner
//! dashboard feed with its session-scoped archive, the instant-paint
//! session cache, proximity ranking, and the HTTP clients for the two
//! external collaborators (recipe generator, geocoder).

pub mod geocoder;
pub mod notifications;
pub mod orders;
pub mod owner_feed;
pub mod proximity;
pub mod recipes;
pub mod session;

pub use geocoder::{GeocodeError, GeocoderClient};
pub use notifications::{
    AppNotification, CustomerStatusWatch, NotificationCenter, NotificationKind, OwnerIntakeWatch,
};
pub use orders::{OrderService, SendOutcome};
pub use owner_feed::OwnerFeed;
pub use proximity::ProximityService;
pub use recipes::{RecipeClient, RecipeError};
pub use session::SessionCache;
