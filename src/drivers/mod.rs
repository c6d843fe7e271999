mod mysql_async;
mod tokio_postgres;

pub use self::in_memory_test::{InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedQuery};
pub use self::mysql_async::{MySqlConnection, MySqlDriver};
pub use self::tokio_postgres::{TokioPostgresConnection, TokioPostgresDriver};
