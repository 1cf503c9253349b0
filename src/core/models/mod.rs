pub mod audit;
pub mod budget;
pub mod expense;
pub mod money;
pub mod participant;
pub mod settlement;
