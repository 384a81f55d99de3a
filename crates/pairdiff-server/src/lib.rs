//! HTTP server for pairdiff.
//!
//! Accepts left and right payloads per identifier and answers whether they
//! are structurally equal, with a path-addressed diff when they are not.
//!
//! | Route | Effect |
//! |---|---|
//! | `POST /v1/diff/:id/left` | store the left payload |
//! | `POST /v1/diff/:id/right` | store the right payload |
//! | `GET /v1/diff/:id` | compare both payloads |

pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::SharedValidator;
pub use response::ResponseBody;
pub use server::PairdiffServer;
