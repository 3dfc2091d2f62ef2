pub mod health;
pub mod payback;
pub mod roi;
