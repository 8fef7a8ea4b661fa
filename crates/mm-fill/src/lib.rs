pub mod fill;
pub mod identity;
pub mod reciprocal;
pub mod sequential;
pub mod uniform;

pub use fill::Fill;
pub use identity::IdentityFill;
pub use reciprocal::ReciprocalFill;
pub use sequential::SequentialFill;
pub use uniform::UniformFill;
