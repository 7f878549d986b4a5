pub mod node;
pub mod record;
