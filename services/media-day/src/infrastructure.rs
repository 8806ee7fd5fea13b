// インフラストラクチャ層モジュール
pub mod config;
pub mod logging;
pub mod output_writer;
pub mod photo_store;
pub mod roster_reader;
pub mod user_repository;
pub mod zip_archive;

// 再エクスポート
pub use config::{AuthorizerConfig, ConfigError, ContentServiceConfig};
pub use logging::{init_cli_logging, init_logging};
pub use output_writer::{read_media_day_rows, write_media_day_rows};
pub use photo_store::{PhotoStore, PhotoStoreError, S3PhotoStore};
pub use roster_reader::{read_attendees, read_members, RosterError};
pub use user_repository::{DynamoUserRepository, RepositoryError, UserRepository};
pub use zip_archive::{build_zip, ArchiveError};
