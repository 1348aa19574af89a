mod static_provider;
mod yahoo;

pub use static_provider::StaticProvider;
pub use yahoo::YahooClient;
