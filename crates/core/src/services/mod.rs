pub mod budget_service;
pub mod projection_service;

mod rules;
