pub mod animal;
pub mod needs;
pub mod plant;
