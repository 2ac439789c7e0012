pub mod goals;
pub mod meals;
pub mod steps;
