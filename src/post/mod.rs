mod location;
mod model;
mod publish;

pub use location::random_location;
pub use model::{PostPayload, PostQuery};
pub use publish::publish;
