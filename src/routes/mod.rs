pub mod admin_routes;
pub mod booking_routes;
pub mod host_routes;
pub mod review_routes;
pub mod vehicle_routes;
