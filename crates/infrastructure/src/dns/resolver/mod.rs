pub mod config;
pub mod core;
pub mod state;

pub use config::ResolverOptions;
pub use self::core::{ResolveCallback, Resolver};
pub use state::ResolverState;
