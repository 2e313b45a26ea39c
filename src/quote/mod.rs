mod fetch;
mod model;

pub use fetch::fetch_random_quote;
