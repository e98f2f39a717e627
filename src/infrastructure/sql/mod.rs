/// SQL client infrastructure
pub mod sqlcl_client;

pub use sqlcl_client::{SqlClient, SqlClientError, SqlclClient};
