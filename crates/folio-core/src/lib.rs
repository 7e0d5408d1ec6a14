pub mod activity;
pub mod config;
pub mod contact;
pub mod content;
pub mod games;
pub mod heatmap;
pub mod intent;
pub mod persona;
pub mod responder;
pub mod settings;

pub use activity::*;
pub use config::*;
pub use contact::*;
pub use heatmap::*;
pub use intent::*;
pub use persona::*;
pub use responder::*;
pub use settings::*;
