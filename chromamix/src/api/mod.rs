//! HTTP API handlers for chromamix

pub mod color;
pub mod health;
pub mod lab;
pub mod palette;
pub mod preferences;
pub mod recipes;
pub mod session;

pub use color::color_routes;
pub use health::health_routes;
pub use lab::lab_routes;
pub use palette::palette_routes;
pub use preferences::preference_routes;
pub use recipes::recipe_routes;
pub use session::session_routes;
