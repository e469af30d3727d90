pub mod store;

use log::info;
use sqlx::{Connection, PgConnection};

use crate::config::DatabaseSettings;
use crate::errors::AppError;

pub use store::SqlStore;

/// Opens the single connection a run uses.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgConnection, AppError> {
    info!(
        "Connecting to database '{}' on {} as {}",
        settings.database, settings.host, settings.user_id
    );
    let connection = PgConnection::connect_with(&settings.connect_options()).await?;
    Ok(connection)
}
