pub mod elab_client;

pub use elab_client::ElabClient;
