//! User-Facing Messages
//!
//! Fallback texts for the list panel; remote rejections show the
//! server's own message when one exists.

pub const LIST_FAILED: &str = "TODOの取得に失敗しました。";
pub const CREATE_FAILED: &str = "TODOの追加に失敗しました。";
pub const UPDATE_FAILED: &str = "TODOの更新に失敗しました。";
pub const DELETE_FAILED: &str = "TODOの削除に失敗しました。";
