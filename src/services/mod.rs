pub mod payback_service;
pub mod record_service;
pub mod roi_service;
