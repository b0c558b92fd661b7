//! Handler implementations for different target systems
//!
//! 各ハンドラーは共通の McpHandler トレイトを実装します。

pub mod wordpress;

pub use wordpress::*;
