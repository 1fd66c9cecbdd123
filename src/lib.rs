//! i18n-store
//!
//! ネストした翻訳ファイルとフラットなキーパスの相互変換、および
//! ユーザー単位の上書きを持つ `SQLite` 翻訳ストア

pub mod codec;
pub mod config;
pub mod importer;
pub mod input;
pub mod store;
pub mod types;

pub use store::TranslationStore;
