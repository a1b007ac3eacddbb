pub mod dose;
pub mod patient;
pub mod vaccine;
