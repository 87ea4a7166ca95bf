//! Coinbase Commerce provider adapter.
//!
//! Implements the `ProviderMapper` port for Commerce charges. A charge is
//! always a one-time purchase from the classifier's point of view.

mod mapper;
mod types;

pub use mapper::CoinbaseMapper;
pub use types::CoinbaseCharge;
